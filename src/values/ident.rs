//! CSS identifiers.

use crate::error::{ParserError, PrinterError};
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;
use smallvec::SmallVec;

/// The [CSS-wide keywords](https://www.w3.org/TR/css-values-4/#css-wide-keywords),
/// valid in every property.
pub const CSS_WIDE_KEYWORDS: [&str; 5] = ["initial", "inherit", "unset", "revert", "revert-layer"];

/// Returns whether the identifier is a CSS-wide keyword.
pub fn is_css_wide_keyword(ident: &str) -> bool {
  CSS_WIDE_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(ident))
}

/// A keyword, i.e. any identifier that is not a dashed ident.
///
/// Keywords compare case-sensitively, as written. Matching them against a grammar
/// is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(pub String);

impl<'i> Parse<'i> for Ident {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let ident = input.expect_ident()?;
    if ident.starts_with("--") {
      return Err(location.new_unexpected_token_error(Token::Ident(ident.clone())));
    }
    Ok(Ident(ident.as_ref().to_owned()))
  }
}

impl ToCss for Ident {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_ident(&self.0)
  }
}

impl Ident {
  /// Returns whether the keyword is a CSS-wide keyword such as `inherit`.
  pub fn is_css_wide(&self) -> bool {
    is_css_wide_keyword(&self.0)
  }
}

/// https://www.w3.org/TR/css-values-4/#custom-idents
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomIdent(pub String);

impl<'i> Parse<'i> for CustomIdent {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let ident = input.expect_ident()?;
    let valid = match_ignore_ascii_case! { &ident,
      "initial" | "inherit" | "unset" | "default" | "revert" | "revert-layer" => false,
      _ => true
    };

    if !valid {
      return Err(location.new_unexpected_token_error(Token::Ident(ident.clone())));
    }

    Ok(CustomIdent(ident.as_ref().to_owned()))
  }
}

impl ToCss for CustomIdent {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_ident(&self.0)
  }
}

/// A list of `<custom-ident>` values.
pub type CustomIdentList = SmallVec<[CustomIdent; 1]>;

/// https://www.w3.org/TR/css-values-4/#dashed-idents
///
/// The stored name includes the leading `--`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DashedIdent(pub String);

impl<'i> Parse<'i> for DashedIdent {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let ident = input.expect_ident()?;
    if !ident.starts_with("--") {
      return Err(location.new_unexpected_token_error(Token::Ident(ident.clone())));
    }

    Ok(DashedIdent(ident.as_ref().to_owned()))
  }
}

impl ToCss for DashedIdent {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_dashed_ident(&self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_idents() {
    assert_eq!(Ident::parse_string("Auto").unwrap(), Ident("Auto".into()));
    assert!(Ident::parse_string("--x").is_err());
    assert!(Ident::parse_string("inherit").unwrap().is_css_wide());
    assert!(CustomIdent::parse_string("revert-layer").is_err());
    assert_eq!(CustomIdent::parse_string("slide-in").unwrap(), CustomIdent("slide-in".into()));
    assert_eq!(DashedIdent::parse_string("--accent").unwrap(), DashedIdent("--accent".into()));
    assert!(DashedIdent::parse_string("accent").is_err());
  }
}
