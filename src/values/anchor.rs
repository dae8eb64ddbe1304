//! The `anchor-size()` function of anchor positioning.

use super::ident::DashedIdent;
use super::length::LengthPercentage;
use crate::error::{ParserError, PrinterError};
use crate::macros::enum_property;
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

enum_property! {
  /// An [`<anchor-size>`](https://drafts.csswg.org/css-anchor-position-1/#typedef-anchor-size) keyword.
  pub enum AnchorSizeKeyword {
    "width": Width,
    "height": Height,
    "block": Block,
    "inline": Inline,
    "self-block": SelfBlock,
    "self-inline": SelfInline,
  }
}

/// An [`anchor-size()`](https://drafts.csswg.org/css-anchor-position-1/#funcdef-anchor-size) function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnchorSize {
  /// The anchor element name.
  pub anchor: Option<DashedIdent>,
  /// The measured dimension.
  pub size: Option<AnchorSizeKeyword>,
  /// The value used when the anchor is missing.
  pub fallback: Option<LengthPercentage>,
}

impl<'i> Parse<'i> for AnchorSize {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("anchor-size")?;
    input.parse_nested_block(|input| {
      let mut result = AnchorSize::default();
      loop {
        if result.anchor.is_none() {
          if let Ok(name) = input.try_parse(DashedIdent::parse) {
            result.anchor = Some(name);
            continue;
          }
        }
        if result.size.is_none() {
          if let Ok(size) = input.try_parse(AnchorSizeKeyword::parse) {
            result.size = Some(size);
            continue;
          }
        }
        break;
      }

      let has_prefix = result.anchor.is_some() || result.size.is_some();
      if has_prefix {
        if input.try_parse(|input| input.expect_comma()).is_ok() {
          result.fallback = Some(LengthPercentage::parse(input)?);
        }
      } else if !input.is_exhausted() {
        result.fallback = Some(LengthPercentage::parse(input)?);
      }
      Ok(result)
    })
  }
}

impl ToCss for AnchorSize {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("anchor-size(")?;
    if let Some(anchor) = &self.anchor {
      anchor.to_css(dest)?;
      if self.size.is_some() {
        dest.write_char(' ')?;
      }
    }
    if let Some(size) = &self.size {
      size.to_css(dest)?;
    }
    if let Some(fallback) = &self.fallback {
      if self.anchor.is_some() || self.size.is_some() {
        dest.delim(',', false)?;
      }
      fallback.to_css(dest)?;
    }
    dest.write_char(')')
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  fn test(source: &str, expected: &str) {
    let value = AnchorSize::parse_string(source).unwrap();
    assert_eq!(value.to_css_string(PrinterOptions::default()).unwrap(), expected);
    assert_eq!(AnchorSize::parse_string(expected).unwrap(), value);
  }

  #[test]
  fn test_anchor_size() {
    test("anchor-size()", "anchor-size()");
    test("anchor-size(width)", "anchor-size(width)");
    test("anchor-size(self-inline --tooltip)", "anchor-size(--tooltip self-inline)");
    test("anchor-size(--menu height, 20%)", "anchor-size(--menu height, 20%)");
    test("anchor-size(10px)", "anchor-size(10px)");
    assert!(AnchorSize::parse_string("anchor-size(width width)").is_err());
  }
}
