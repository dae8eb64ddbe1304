//! CSS resolution values.

use super::length::serialize_dimension;
use super::number::CSSNumber;
use crate::error::{ParserError, PrinterError};
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A CSS [`<resolution>`](https://www.w3.org/TR/css-values-4/#resolution) value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
  /// A resolution in dots per inch.
  Dpi(CSSNumber),
  /// A resolution in dots per centimeter.
  Dpcm(CSSNumber),
  /// A resolution in dots per px.
  Dppx(CSSNumber),
  /// A resolution in the `x` unit, an alias of `dppx`.
  X(CSSNumber),
}

impl<'i> Parse<'i> for Resolution {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let token = input.next()?;
    match Resolution::try_from(token) {
      Ok(res) => Ok(res),
      Err(()) => Err(location.new_unexpected_token_error(token.clone())),
    }
  }
}

impl<'i> TryFrom<&Token<'i>> for Resolution {
  type Error = ();

  fn try_from(token: &Token) -> Result<Self, Self::Error> {
    match token {
      Token::Dimension { value, ref unit, .. } => match_ignore_ascii_case! { unit,
        "dpi" => Ok(Resolution::Dpi(*value)),
        "dpcm" => Ok(Resolution::Dpcm(*value)),
        "dppx" => Ok(Resolution::Dppx(*value)),
        "x" => Ok(Resolution::X(*value)),
        _ => Err(()),
      },
      _ => Err(()),
    }
  }
}

impl ToCss for Resolution {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    let (value, unit) = match self {
      Resolution::Dpi(dpi) => (*dpi, "dpi"),
      Resolution::Dpcm(dpcm) => (*dpcm, "dpcm"),
      Resolution::Dppx(dppx) => (*dppx, "dppx"),
      Resolution::X(x) => (*x, "x"),
    };

    serialize_dimension(value, unit, dest)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  #[test]
  fn test_resolution() {
    assert_eq!(Resolution::parse_string("96DPI").unwrap(), Resolution::Dpi(96.0));
    assert_eq!(Resolution::parse_string("2dppx").unwrap(), Resolution::Dppx(2.0));
    assert_eq!(Resolution::parse_string("1.5x").unwrap(), Resolution::X(1.5));
    assert_eq!(Resolution::Dpcm(38.0).to_css_string(PrinterOptions::default()).unwrap(), "38dpcm");
    assert_eq!(Resolution::X(1.5).to_css_string(PrinterOptions::default()).unwrap(), "1.5x");
    assert!(Resolution::parse_string("10px").is_err());
    assert!(Resolution::parse_string("2").is_err());
  }
}
