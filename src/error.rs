//! Error types.

use crate::grammar::matcher::MAX_DEPTH;
use cssparser::{BasicParseErrorKind, CowRcStr, ParseError, ParseErrorKind, SourceLocation, Token};
use std::fmt;

/// An error with a source location.
#[derive(Debug, PartialEq, Clone)]
pub struct Error<T> {
  /// The type of error that occurred.
  pub kind: T,
  /// The location where the error occurred.
  pub loc: Option<ErrorLocation>,
}

impl<T: fmt::Display> fmt::Display for Error<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.kind.fmt(f)?;
    if let Some(loc) = &self.loc {
      write!(f, " at {}", loc)?;
    }
    Ok(())
  }
}

impl<T: fmt::Display + fmt::Debug> std::error::Error for Error<T> {}

/// A line and column location within the parsed text.
#[derive(Debug, PartialEq, Clone)]
pub struct ErrorLocation {
  /// The line number, starting from 0.
  pub line: u32,
  /// The column number, starting from 1.
  pub column: u32,
}

impl From<SourceLocation> for ErrorLocation {
  fn from(loc: SourceLocation) -> ErrorLocation {
    ErrorLocation {
      line: loc.line,
      column: loc.column,
    }
  }
}

impl fmt::Display for ErrorLocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}

/// An error produced while parsing a CSS value.
#[derive(Debug, PartialEq, Clone)]
pub enum ParserError<'i> {
  /// Unexpectedly encountered the end of input data.
  EndOfInput,
  /// An invalid value was encountered.
  InvalidValue,
  /// An unexpected token was encountered.
  UnexpectedToken(Token<'i>),
  /// A function that is not part of the value model was encountered.
  UnknownFunction(CowRcStr<'i>),
  /// A dimension with an unrecognized unit was encountered.
  UnknownUnit(CowRcStr<'i>),
}

impl<'i> fmt::Display for ParserError<'i> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    use ParserError::*;
    match self {
      EndOfInput => write!(f, "Unexpected end of input"),
      InvalidValue => write!(f, "Invalid value"),
      UnexpectedToken(token) => write!(f, "Unexpected token {:?}", token),
      UnknownFunction(name) => write!(f, "Unknown CSS function '{}'", name),
      UnknownUnit(unit) => write!(f, "Unknown unit '{}'", unit),
    }
  }
}

impl<'i> Error<ParserError<'i>> {
  /// Creates an error from a cssparser error.
  pub fn from(err: ParseError<'i, ParserError<'i>>) -> Error<ParserError<'i>> {
    let kind = match err.kind {
      ParseErrorKind::Basic(b) => match b {
        BasicParseErrorKind::UnexpectedToken(t) => ParserError::UnexpectedToken(t),
        BasicParseErrorKind::EndOfInput => ParserError::EndOfInput,
        _ => ParserError::InvalidValue,
      },
      ParseErrorKind::Custom(c) => c,
    };

    Error {
      kind,
      loc: Some(err.location.into()),
    }
  }
}

/// An error produced while compiling a value definition syntax string.
pub type GrammarError = Error<GrammarErrorKind>;

/// A value definition syntax error type.
#[derive(Debug, PartialEq, Clone)]
pub enum GrammarErrorKind {
  /// A character that cannot start any syntax component.
  UnexpectedChar(char),
  /// The syntax string ended in the middle of a component.
  UnexpectedEnd,
  /// A malformed `{m,n}` multiplier, or one where `m > n`.
  InvalidQuantifier(String),
  /// A `[` group or `<` data type reference was never closed.
  UnclosedGroup,
  /// An operator that is not one of the value definition combinators.
  UnknownCombinator(String),
  /// A group, function or combinator operand with no components.
  EmptyGroup,
}

impl fmt::Display for GrammarErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    use GrammarErrorKind::*;
    match self {
      UnexpectedChar(c) => write!(f, "Unexpected character '{}'", c),
      UnexpectedEnd => write!(f, "Unexpected end of syntax"),
      InvalidQuantifier(q) => write!(f, "Invalid multiplier '{}'", q),
      UnclosedGroup => write!(f, "Unclosed group"),
      UnknownCombinator(c) => write!(f, "Unknown combinator '{}'", c),
      EmptyGroup => write!(f, "Empty group"),
    }
  }
}

impl GrammarError {
  pub(crate) fn at(kind: GrammarErrorKind, offset: usize) -> GrammarError {
    Error {
      kind,
      loc: Some(ErrorLocation {
        line: 0,
        column: offset as u32 + 1,
      }),
    }
  }
}

/// An error produced while computing suggestions.
pub type SuggestionError = Error<SuggestionErrorKind>;

/// A suggestion error type.
#[derive(Debug, PartialEq, Clone)]
pub enum SuggestionErrorKind {
  /// A grammar node names a data type that no value kind is bound to, and that no
  /// named syntax defines.
  UnknownDataType {
    /// The data type name.
    name: String,
    /// The source text of the grammar node.
    raw: String,
  },
  /// The grammar is nested deeper than the matcher follows.
  NestingTooDeep {
    /// The source text of the grammar node where matching gave up.
    raw: String,
  },
}

impl fmt::Display for SuggestionErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SuggestionErrorKind::UnknownDataType { name, raw } => {
        write!(f, "Unknown data type '{}' in expression '{}'", name, raw)
      }
      SuggestionErrorKind::NestingTooDeep { raw } => {
        write!(f, "Grammar nested deeper than {} levels in expression '{}'", MAX_DEPTH, raw)
      }
    }
  }
}

/// An error produced while building or querying a spec registry.
pub type RegistryError = Error<RegistryErrorKind>;

/// A registry error type.
#[derive(Debug, PartialEq, Clone)]
pub enum RegistryErrorKind {
  /// A property or syntax table could not be deserialized.
  InvalidTable(String),
  /// The property is not present in the registry.
  UnknownProperty(String),
  /// A declaration value could not be parsed into component values.
  InvalidValue(String),
  /// Suggestions could not be computed for a property.
  Suggestion(SuggestionErrorKind),
}

impl fmt::Display for RegistryErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    use RegistryErrorKind::*;
    match self {
      InvalidTable(reason) => write!(f, "Invalid data table: {}", reason),
      UnknownProperty(name) => write!(f, "Unknown property '{}'", name),
      InvalidValue(reason) => write!(f, "Invalid value: {}", reason),
      Suggestion(kind) => fmt::Display::fmt(kind, f),
    }
  }
}

impl<'i> From<Error<ParserError<'i>>> for RegistryError {
  fn from(err: Error<ParserError<'i>>) -> RegistryError {
    Error {
      kind: RegistryErrorKind::InvalidValue(err.kind.to_string()),
      loc: err.loc,
    }
  }
}

impl From<SuggestionError> for RegistryError {
  fn from(err: SuggestionError) -> RegistryError {
    Error {
      kind: RegistryErrorKind::Suggestion(err.kind),
      loc: err.loc,
    }
  }
}

impl From<serde_json::Error> for RegistryError {
  fn from(err: serde_json::Error) -> RegistryError {
    Error {
      kind: RegistryErrorKind::InvalidTable(err.to_string()),
      loc: Some(ErrorLocation {
        line: err.line().saturating_sub(1) as u32,
        column: err.column() as u32,
      }),
    }
  }
}

/// A printer error.
pub type PrinterError = Error<PrinterErrorKind>;

/// A printer error type.
#[derive(Debug, PartialEq)]
pub enum PrinterErrorKind {
  /// A [std::fmt::Error](std::fmt::Error) was encountered in the underlying destination.
  FmtError,
}

impl From<fmt::Error> for PrinterError {
  fn from(_: fmt::Error) -> PrinterError {
    PrinterError {
      kind: PrinterErrorKind::FmtError,
      loc: None,
    }
  }
}

impl fmt::Display for PrinterErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    use PrinterErrorKind::*;
    match self {
      FmtError => write!(f, "Printer error"),
    }
  }
}
