//! Traits for parsing and serializing CSS values.

use crate::error::{Error, ParserError, PrinterError};
use crate::printer::{Printer, PrinterOptions};
use cssparser::*;

/// Trait for things that can be parsed from CSS syntax.
pub trait Parse<'i>: Sized {
  /// Parse a value of this type using an existing parser.
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>>;

  /// Parse a value from a string.
  ///
  /// The whole string must be consumed, apart from trailing whitespace.
  fn parse_string(input: &'i str) -> Result<Self, Error<ParserError<'i>>> {
    let mut input = ParserInput::new(input);
    let mut parser = Parser::new(&mut input);
    let result = parser.parse_entirely(Self::parse).map_err(Error::from)?;
    Ok(result)
  }
}

/// Trait for things the can serialize themselves in CSS syntax.
pub trait ToCss {
  /// Serialize `self` in CSS syntax, writing to `dest`.
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write;

  /// Serialize `self` in CSS syntax and return a string.
  ///
  /// (This is a convenience wrapper for `to_css` and probably should not be overridden.)
  #[inline]
  fn to_css_string(&self, options: PrinterOptions) -> Result<String, PrinterError> {
    let mut s = String::new();
    let mut printer = Printer::new(&mut s, options);
    self.to_css(&mut printer)?;
    Ok(s)
  }
}

impl<'a, T> ToCss for &'a T
where
  T: ToCss + ?Sized,
{
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    (*self).to_css(dest)
  }
}

impl<T: ToCss> ToCss for Box<T> {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    (**self).to_css(dest)
  }
}

impl<T: ToCss> ToCss for Option<T> {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    if let Some(v) = self {
      v.to_css(dest)?;
    }
    Ok(())
  }
}

/// Writes a comma separated list, honoring the `minify` option.
pub(crate) fn to_css_comma_separated<T, W>(items: &[T], dest: &mut Printer<W>) -> Result<(), PrinterError>
where
  T: ToCss,
  W: std::fmt::Write,
{
  let mut first = true;
  for item in items {
    if first {
      first = false;
    } else {
      dest.delim(',', false)?;
    }
    item.to_css(dest)?;
  }
  Ok(())
}

/// Writes a space separated list.
pub(crate) fn to_css_space_separated<T, W>(items: &[T], dest: &mut Printer<W>) -> Result<(), PrinterError>
where
  T: ToCss,
  W: std::fmt::Write,
{
  let mut first = true;
  for item in items {
    if first {
      first = false;
    } else {
      dest.write_char(' ')?;
    }
    item.to_css(dest)?;
  }
  Ok(())
}
