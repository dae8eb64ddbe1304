//! CSS time values.

use super::length::serialize_dimension;
use super::number::CSSNumber;
use crate::error::{ParserError, PrinterError};
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A CSS [`<time>`](https://www.w3.org/TR/css-values-4/#time) value, in either
/// seconds or milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Time {
  /// A time in seconds.
  Seconds(CSSNumber),
  /// A time in milliseconds.
  Milliseconds(CSSNumber),
}

impl Time {
  /// Returns the time in milliseconds.
  pub fn to_ms(&self) -> CSSNumber {
    match self {
      Time::Seconds(s) => s * 1000.0,
      Time::Milliseconds(ms) => *ms,
    }
  }
}

impl<'i> Parse<'i> for Time {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let token = input.next()?;
    match Time::try_from(token) {
      Ok(time) => Ok(time),
      Err(()) => Err(location.new_unexpected_token_error(token.clone())),
    }
  }
}

impl<'i> TryFrom<&Token<'i>> for Time {
  type Error = ();

  fn try_from(token: &Token) -> Result<Self, Self::Error> {
    match token {
      Token::Dimension { value, ref unit, .. } => match_ignore_ascii_case! { unit,
        "s" => Ok(Time::Seconds(*value)),
        "ms" => Ok(Time::Milliseconds(*value)),
        _ => Err(()),
      },
      _ => Err(()),
    }
  }
}

impl ToCss for Time {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      Time::Seconds(s) => serialize_dimension(*s, "s", dest),
      Time::Milliseconds(ms) => serialize_dimension(*ms, "ms", dest),
    }
  }
}

/// A CSS [`<frequency>`](https://www.w3.org/TR/css-values-4/#frequency) value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frequency {
  /// A frequency in hertz.
  Hz(CSSNumber),
  /// A frequency in kilohertz.
  KHz(CSSNumber),
}

impl<'i> Parse<'i> for Frequency {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let token = input.next()?;
    match Frequency::try_from(token) {
      Ok(frequency) => Ok(frequency),
      Err(()) => Err(location.new_unexpected_token_error(token.clone())),
    }
  }
}

impl<'i> TryFrom<&Token<'i>> for Frequency {
  type Error = ();

  fn try_from(token: &Token) -> Result<Self, Self::Error> {
    match token {
      Token::Dimension { value, ref unit, .. } => match_ignore_ascii_case! { unit,
        "hz" => Ok(Frequency::Hz(*value)),
        "khz" => Ok(Frequency::KHz(*value)),
        _ => Err(()),
      },
      _ => Err(()),
    }
  }
}

impl ToCss for Frequency {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      Frequency::Hz(hz) => serialize_dimension(*hz, "Hz", dest),
      Frequency::KHz(khz) => serialize_dimension(*khz, "kHz", dest),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  #[test]
  fn test_time() {
    assert_eq!(Time::parse_string("2s").unwrap(), Time::Seconds(2.0));
    assert_eq!(Time::parse_string("150MS").unwrap().to_ms(), 150.0);
    assert_eq!(Time::Seconds(0.3).to_css_string(PrinterOptions::default()).unwrap(), ".3s");
  }

  #[test]
  fn test_frequency() {
    assert_eq!(Frequency::parse_string("10khz").unwrap(), Frequency::KHz(10.0));
    assert_eq!(Frequency::Hz(440.0).to_css_string(PrinterOptions::default()).unwrap(), "440Hz");
  }
}
