//! CSS length values.

use super::number::CSSNumber;
use super::percentage::DimensionPercentage;
use crate::error::{ParserError, PrinterError};
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use const_str;
use cssparser::*;

/// A CSS [`<length-percentage>`](https://www.w3.org/TR/css-values-4/#typedef-length-percentage) value.
/// May be specified as either a length or a percentage that resolves to an length.
pub type LengthPercentage = DimensionPercentage<LengthValue>;

impl LengthPercentage {
  /// Constructs a `LengthPercentage` with the given pixel value.
  pub fn px(val: CSSNumber) -> LengthPercentage {
    LengthPercentage::Dimension(LengthValue::Px(val))
  }
}

/// Either a [`<length-percentage>`](https://www.w3.org/TR/css-values-4/#typedef-length-percentage), or the `auto` keyword.
#[derive(Debug, Clone, PartialEq)]
pub enum LengthPercentageOrAuto {
  /// The `auto` keyword.
  Auto,
  /// A [`<length-percentage>`](https://www.w3.org/TR/css-values-4/#typedef-length-percentage).
  LengthPercentage(LengthPercentage),
}

impl<'i> Parse<'i> for LengthPercentageOrAuto {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    if input.try_parse(|i| i.expect_ident_matching("auto")).is_ok() {
      return Ok(LengthPercentageOrAuto::Auto);
    }

    if let Ok(percent) = input.try_parse(|input| LengthPercentage::parse(input)) {
      return Ok(LengthPercentageOrAuto::LengthPercentage(percent));
    }

    Err(input.new_error_for_next_token())
  }
}

impl ToCss for LengthPercentageOrAuto {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    use LengthPercentageOrAuto::*;
    match self {
      Auto => dest.write_str("auto"),
      LengthPercentage(l) => l.to_css(dest),
    }
  }
}

macro_rules! define_length_units {
  (
    $(
      $(#[$meta: meta])*
      $name: ident,
    )+
  ) => {
    /// A CSS [`<length>`](https://www.w3.org/TR/css-values-4/#lengths) value,
    /// without support for `calc()`.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum LengthValue {
      $(
        $(#[$meta])*
        $name(CSSNumber),
      )+
    }

    impl<'i> TryFrom<&Token<'i>> for LengthValue {
      type Error = ();

      fn try_from(token: &Token) -> Result<Self, Self::Error> {
        match token {
          Token::Dimension { value, ref unit, .. } => {
            Ok(match unit {
              $(
                s if s.eq_ignore_ascii_case(stringify!($name)) => LengthValue::$name(*value),
              )+
              _ => return Err(()),
            })
          },
          // Unitless zero.
          Token::Number { value, .. } if *value == 0.0 => Ok(LengthValue::Px(0.0)),
          _ => Err(()),
        }
      }
    }

    impl LengthValue {
      /// Returns the numeric value and unit string for the length value.
      pub fn to_unit_value(&self) -> (CSSNumber, &str) {
        match self {
          $(
            LengthValue::$name(value) => (*value, const_str::convert_ascii_case!(lower, stringify!($name))),
          )+
        }
      }

      /// Returns whether the given unit names a length.
      pub fn is_length_unit(unit: &str) -> bool {
        match unit {
          $(
            s if s.eq_ignore_ascii_case(stringify!($name)) => true,
          )+
          _ => false,
        }
      }
    }
  };
}

define_length_units! {
  // https://www.w3.org/TR/css-values-4/#absolute-lengths
  /// A length in pixels.
  Px,
  /// A length in inches. 1in = 96px.
  In,
  /// A length in centimeters. 1cm = 96px / 2.54.
  Cm,
  /// A length in millimeters. 1mm = 1/10th of 1cm.
  Mm,
  /// A length in quarter-millimeters. 1Q = 1/40th of 1cm.
  Q,
  /// A length in points. 1pt = 1/72nd of 1in.
  Pt,
  /// A length in picas. 1pc = 1/6th of 1in.
  Pc,

  // https://www.w3.org/TR/css-values-4/#font-relative-lengths
  /// A length in the `em` unit, relative to the font size of the element.
  Em,
  /// A length in the `rem` unit, relative to the font size of the root element.
  Rem,
  /// A length in the `ex` unit. An `ex` is equal to the x-height of the font.
  Ex,
  /// A length in the `rex` unit.
  Rex,
  /// A length in the `ch` unit. A `ch` is equal to the width of the zero ("0") character in the current font.
  Ch,
  /// A length in the `rch` unit.
  Rch,
  /// A length in the `cap` unit. A `cap` is equal to the cap-height of the font.
  Cap,
  /// A length in the `rcap` unit.
  Rcap,
  /// A length in the `ic` unit, the advance of the “水” ideograph.
  Ic,
  /// A length in the `ric` unit.
  Ric,
  /// A length in the `lh` unit. An `lh` is equal to the computed value of the `line-height` property.
  Lh,
  /// A length in the `rlh` unit.
  Rlh,

  // https://www.w3.org/TR/css-values-4/#viewport-relative-units
  /// A length in the `vw` unit, 1% of the viewport width.
  Vw,
  Lvw,
  Svw,
  Dvw,
  /// A length in the `vh` unit, 1% of the viewport height.
  Vh,
  Lvh,
  Svh,
  Dvh,
  /// A length in the `vi` unit, 1% of the viewport size in the inline axis.
  Vi,
  Svi,
  Lvi,
  Dvi,
  /// A length in the `vb` unit, 1% of the viewport size in the block axis.
  Vb,
  Svb,
  Lvb,
  Dvb,
  /// A length in the `vmin` unit, the smaller of `vw` and `vh`.
  Vmin,
  Svmin,
  Lvmin,
  Dvmin,
  /// A length in the `vmax` unit, the larger of `vw` and `vh`.
  Vmax,
  Svmax,
  Lvmax,
  Dvmax,

  // https://www.w3.org/TR/css-contain-3/#container-lengths
  /// A length in the `cqw` unit, 1% of the query container's width.
  Cqw,
  /// A length in the `cqh` unit, 1% of the query container's height.
  Cqh,
  /// A length in the `cqi` unit, 1% of the query container's inline size.
  Cqi,
  /// A length in the `cqb` unit, 1% of the query container's block size.
  Cqb,
  /// A length in the `cqmin` unit.
  Cqmin,
  /// A length in the `cqmax` unit.
  Cqmax,
}

impl<'i> Parse<'i> for LengthValue {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let token = input.next()?;
    match LengthValue::try_from(token) {
      Ok(length) => Ok(length),
      Err(()) => Err(location.new_unexpected_token_error(token.clone())),
    }
  }
}

impl ToCss for LengthValue {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    let (value, unit) = self.to_unit_value();
    serialize_dimension(value, unit, dest)
  }
}

impl LengthValue {
  /// Returns the numeric value of the length, regardless of unit.
  pub fn value(&self) -> CSSNumber {
    self.to_unit_value().0
  }
}

pub(crate) fn serialize_dimension<W>(value: f32, unit: &str, dest: &mut Printer<W>) -> Result<(), PrinterError>
where
  W: std::fmt::Write,
{
  use cssparser::ToCss;
  let int_value = if value.fract() == 0.0 { Some(value as i32) } else { None };
  let token = Token::Dimension {
    has_sign: value < 0.0,
    value,
    int_value,
    unit: CowRcStr::from(unit),
  };
  if value != 0.0 && value.abs() < 1.0 {
    let mut s = String::new();
    token.to_css(&mut s)?;
    if value < 0.0 {
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

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  fn test(source: &str, expected: &str) {
    let length = LengthValue::parse_string(source).unwrap();
    assert_eq!(length.to_css_string(PrinterOptions::default()).unwrap(), expected);
  }

  #[test]
  fn test_length() {
    test("10px", "10px");
    test("0.5em", ".5em");
    test("-0.5REM", "-.5rem");
    test("2.25cqmin", "2.25cqmin");
    test("1Q", "1q");
    test("0", "0px");
    assert!(LengthValue::parse_string("1").is_err());
    assert!(LengthValue::parse_string("1deg").is_err());
  }

  #[test]
  fn test_length_percentage() {
    assert_eq!(LengthPercentage::parse_string("10px").unwrap(), LengthPercentage::px(10.0));
    assert_eq!(
      LengthPercentageOrAuto::parse_string("auto").unwrap(),
      LengthPercentageOrAuto::Auto
    );
    assert_eq!(
      LengthPercentage::parse_string("50%")
        .unwrap()
        .to_css_string(PrinterOptions::default())
        .unwrap(),
      "50%"
    );
  }
}
