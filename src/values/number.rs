//! CSS number values.

use crate::error::{ParserError, PrinterError};
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A CSS [`<number>`](https://www.w3.org/TR/css-values-4/#numbers) value.
pub type CSSNumber = f32;

impl<'i> Parse<'i> for CSSNumber {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let number = input.expect_number()?;
    Ok(number)
  }
}

impl ToCss for CSSNumber {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    serialize_number(*self, false, dest)
  }
}

/// Serializes a number, omitting the leading zero of fractional values.
///
/// When `integral` is false a whole number keeps a `.0` suffix, so that it
/// reparses as a `<number>` rather than an `<integer>`.
pub(crate) fn serialize_number<W>(number: f32, integral: bool, dest: &mut Printer<W>) -> Result<(), PrinterError>
where
  W: std::fmt::Write,
{
  use cssparser::ToCss;
  // Handle NaN
  if number.is_nan() {
    return dest.write_str("0");
  }
  // Handle infinity
  if number.is_infinite() {
    if number.is_sign_negative() {
      return dest.write_str("calc(-1/0)");
    } else {
      return dest.write_str("calc(1/0)");
    }
  }

  let int_value = if integral { Some(number as i32) } else { None };
  let token = Token::Number {
    has_sign: number < 0.0,
    value: number,
    int_value,
  };
  if number != 0.0 && number.abs() < 1.0 {
    let mut s = String::new();
    token.to_css(&mut s)?;
    if number < 0.0 {
      dest.write_char('-')?;
      dest.write_str(s.trim_start_matches("-0"))
    } else {
      dest.write_str(s.trim_start_matches('0'))
    }
  } else {
    token.to_css(dest)?;
    Ok(())
  }
}

/// A CSS [`<integer>`](https://www.w3.org/TR/css-values-4/#integers) value.
pub type CSSInteger = i32;

impl<'i> Parse<'i> for CSSInteger {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let integer = input.expect_integer()?;
    Ok(integer)
  }
}

impl ToCss for CSSInteger {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    serialize_number(*self as f32, true, dest)
  }
}

/// A CSS [`<flex>`](https://www.w3.org/TR/css-grid-2/#typedef-flex) value, in `fr` units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flex(pub CSSNumber);

impl<'i> Parse<'i> for Flex {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let token = input.next()?;
    match Flex::try_from(token) {
      Ok(flex) => Ok(flex),
      Err(()) => Err(location.new_unexpected_token_error(token.clone())),
    }
  }
}

impl<'i> TryFrom<&Token<'i>> for Flex {
  type Error = ();

  fn try_from(token: &Token) -> Result<Self, Self::Error> {
    match token {
      Token::Dimension { value, ref unit, .. } if unit.eq_ignore_ascii_case("fr") => Ok(Flex(*value)),
      _ => Err(()),
    }
  }
}

impl ToCss for Flex {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    super::length::serialize_dimension(self.0, "fr", dest)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  fn number(n: f32) -> String {
    n.to_css_string(PrinterOptions::default()).unwrap()
  }

  #[test]
  fn test_number() {
    assert_eq!(number(0.5), ".5");
    assert_eq!(number(-0.25), "-.25");
    assert_eq!(number(1.0), "1.0");
    assert_eq!(number(12.5), "12.5");
    assert_eq!(number(0.0), "0.0");
    assert_eq!(3i32.to_css_string(PrinterOptions::default()).unwrap(), "3");
    assert_eq!((-7i32).to_css_string(PrinterOptions::default()).unwrap(), "-7");
  }

  #[test]
  fn test_flex() {
    assert_eq!(Flex::parse_string("1fr").unwrap(), Flex(1.0));
    assert_eq!(Flex::parse_string("2.5FR").unwrap(), Flex(2.5));
    assert!(Flex::parse_string("1px").is_err());
    assert_eq!(Flex(0.5).to_css_string(PrinterOptions::default()).unwrap(), ".5fr");
  }
}
