//! Font related functions: alternate glyph selectors and `add()`.

use super::ident::CustomIdent;
use super::number::CSSInteger;
use crate::error::{ParserError, PrinterError};
use crate::macros::enum_property;
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

enum_property! {
  /// A [`font-variant-alternates`](https://www.w3.org/TR/css-fonts-4/#font-variant-alternates-prop)
  /// function name.
  pub enum AlternateGlyphFunction {
    "stylistic": Stylistic,
    "styleset": Styleset,
    "character-variant": CharacterVariant,
    "swash": Swash,
    "ornament": Ornament,
    "annotation": Annotation,
  }
}

impl AlternateGlyphFunction {
  /// Whether the function accepts a comma separated list of names.
  pub fn is_list(&self) -> bool {
    matches!(self, AlternateGlyphFunction::Styleset | AlternateGlyphFunction::CharacterVariant)
  }
}

/// An alternate glyph function, such as `styleset(fancy, ligatures)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlternateGlyph {
  /// The function name.
  pub function: AlternateGlyphFunction,
  /// The feature value names defined by `@font-feature-values`.
  pub names: Vec<CustomIdent>,
}

impl<'i> Parse<'i> for AlternateGlyph {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let name = input.expect_function()?.clone();
    let function = match AlternateGlyphFunction::from_str(&name) {
      Some(f) => f,
      None => return Err(location.new_unexpected_token_error(Token::Function(name))),
    };
    let names = input.parse_nested_block(|input| input.parse_comma_separated(CustomIdent::parse))?;
    if !function.is_list() && names.len() > 1 {
      return Err(location.new_custom_error(ParserError::InvalidValue));
    }
    Ok(AlternateGlyph { function, names })
  }
}

impl ToCss for AlternateGlyph {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    self.function.to_css(dest)?;
    dest.write_char('(')?;
    crate::traits::to_css_comma_separated(&self.names, dest)?;
    dest.write_char(')')
  }
}

/// The [`add()`](https://drafts.csswg.org/css-fonts-4/#valdef-math-depth-add) function of `math-depth`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Add(pub CSSInteger);

impl<'i> Parse<'i> for Add {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("add")?;
    let depth = input.parse_nested_block(CSSInteger::parse)?;
    Ok(Add(depth))
  }
}

impl ToCss for Add {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("add(")?;
    self.0.to_css(dest)?;
    dest.write_char(')')
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  #[test]
  fn test_alternate_glyph() {
    let glyph = AlternateGlyph::parse_string("styleset(fancy,ligatures)").unwrap();
    assert_eq!(glyph.function, AlternateGlyphFunction::Styleset);
    assert_eq!(
      glyph.to_css_string(PrinterOptions::default()).unwrap(),
      "styleset(fancy, ligatures)"
    );
    assert!(AlternateGlyph::parse_string("swash(a, b)").is_err());
    assert!(AlternateGlyph::parse_string("annotation()").is_err());
  }

  #[test]
  fn test_add() {
    assert_eq!(Add::parse_string("add(-2)").unwrap(), Add(-2));
    assert_eq!(Add(3).to_css_string(PrinterOptions::default()).unwrap(), "add(3)");
    assert!(Add::parse_string("add(1.5)").is_err());
  }
}
