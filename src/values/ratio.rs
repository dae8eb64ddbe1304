//! CSS ratio values.

use super::number::{serialize_number, CSSNumber};
use crate::error::{ParserError, PrinterError};
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A [`<ratio>`](https://www.w3.org/TR/css-values-4/#ratios), such as the `16 / 9` of `aspect-ratio`.
///
/// The value parser never produces one: within a declaration value, a ratio is the three component
/// values `16`, `/` and `9`, matched through the `<ratio>` grammar. A `Ratio` is what a suggestion
/// for `<ratio>` inserts.
#[derive(Debug, Clone, PartialEq)]
pub struct Ratio(pub CSSNumber, pub CSSNumber);

impl<'i> Parse<'i> for Ratio {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let first = CSSNumber::parse(input)?;
    let second = if input.try_parse(|input| input.expect_delim('/')).is_ok() {
      CSSNumber::parse(input)?
    } else {
      1.0
    };
    if first < 0.0 || second < 0.0 {
      return Err(input.new_custom_error(ParserError::InvalidValue));
    }

    Ok(Ratio(first, second))
  }
}

impl ToCss for Ratio {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    serialize_number(self.0, self.0.fract() == 0.0, dest)?;
    dest.delim('/', true)?;
    serialize_number(self.1, self.1.fract() == 0.0, dest)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;
  use pretty_assertions::assert_eq;

  fn test(source: &str, expected: &str) {
    let ratio = Ratio::parse_string(source).unwrap();
    assert_eq!(ratio.to_css_string(PrinterOptions::default()).unwrap(), expected);
  }

  #[test]
  fn test_ratio() {
    test("16/9", "16 / 9");
    test("1.5", "1.5 / 1");
    test("0 / 1", "0 / 1");
    assert_eq!(Ratio::parse_string("4 / 3").unwrap(), Ratio(4.0, 3.0));
    assert!(Ratio::parse_string("-1 / 2").is_err());
    assert!(Ratio::parse_string("1 / auto").is_err());
  }
}
