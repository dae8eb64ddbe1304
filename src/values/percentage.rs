//! CSS percentage values.

use super::calc::MathFunction;
use super::number::{serialize_number, CSSNumber};
use crate::error::{ParserError, PrinterError};
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A CSS [`<percentage>`](https://www.w3.org/TR/css-values-4/#percentages) value.
///
/// The value is stored as a fraction, i.e. `50%` is `0.5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentage(pub CSSNumber);

impl<'i> Parse<'i> for Percentage {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let percent = input.expect_percentage()?;
    Ok(Percentage(percent))
  }
}

impl ToCss for Percentage {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    use cssparser::ToCss;
    let int_value = if (self.0 * 100.0).fract() == 0.0 {
      Some((self.0 * 100.0) as i32)
    } else {
      None
    };
    let percent = Token::Percentage {
      has_sign: self.0 < 0.0,
      unit_value: self.0,
      int_value,
    };
    if self.0 != 0.0 && self.0.abs() < 0.01 {
      let mut s = String::new();
      percent.to_css(&mut s)?;
      if self.0 < 0.0 {
        dest.write_char('-')?;
        dest.write_str(s.trim_start_matches("-0"))
      } else {
        dest.write_str(s.trim_start_matches('0'))
      }
    } else {
      percent.to_css(dest)?;
      Ok(())
    }
  }
}

/// A generic type that allows any kind of dimension and percentage to be
/// used standalone or mixed within a math function.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionPercentage<D> {
  /// An explicit dimension value.
  Dimension(D),
  /// A percentage.
  Percentage(Percentage),
  /// A math function such as `calc()`.
  Calc(Box<MathFunction>),
}

impl<'i, D: Parse<'i>> Parse<'i> for DimensionPercentage<D> {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    if let Ok(calc) = input.try_parse(MathFunction::parse) {
      return Ok(DimensionPercentage::Calc(Box::new(calc)));
    }

    if let Ok(length) = input.try_parse(|input| D::parse(input)) {
      return Ok(DimensionPercentage::Dimension(length));
    }

    if let Ok(percent) = input.try_parse(|input| Percentage::parse(input)) {
      return Ok(DimensionPercentage::Percentage(percent));
    }

    Err(input.new_error_for_next_token())
  }
}

impl<D: ToCss> ToCss for DimensionPercentage<D> {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      DimensionPercentage::Dimension(length) => length.to_css(dest),
      DimensionPercentage::Percentage(percent) => percent.to_css(dest),
      DimensionPercentage::Calc(calc) => calc.to_css(dest),
    }
  }
}

/// Either a `<number>` or `<percentage>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberOrPercentage {
  /// A number.
  Number(CSSNumber),
  /// A percentage.
  Percentage(Percentage),
}

impl<'i> Parse<'i> for NumberOrPercentage {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    if let Ok(number) = input.try_parse(CSSNumber::parse) {
      return Ok(NumberOrPercentage::Number(number));
    }

    if let Ok(percent) = input.try_parse(|input| Percentage::parse(input)) {
      return Ok(NumberOrPercentage::Percentage(percent));
    }

    Err(input.new_error_for_next_token())
  }
}

impl ToCss for NumberOrPercentage {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      NumberOrPercentage::Number(number) => serialize_number(*number, number.fract() == 0.0, dest),
      NumberOrPercentage::Percentage(percent) => percent.to_css(dest),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  #[test]
  fn test_percentage() {
    let print = |p: Percentage| p.to_css_string(PrinterOptions::default()).unwrap();
    assert_eq!(Percentage::parse_string("50%").unwrap(), Percentage(0.5));
    assert_eq!(print(Percentage(0.5)), "50%");
    assert_eq!(print(Percentage(0.125)), "12.5%");
    assert_eq!(print(Percentage(-1.0)), "-100%");
    assert_eq!(print(Percentage(0.005)), ".5%");
  }
}
