//! Grid track sizing functions.

use super::ident::CustomIdent;
use super::length::LengthPercentage;
use super::number::{CSSInteger, Flex};
use super::value::Value;
use crate::error::{ParserError, PrinterError};
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A [`<track-breadth>`](https://drafts.csswg.org/css-grid-2/#typedef-track-breadth) value.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackBreadth {
  /// An explicit length.
  Length(LengthPercentage),
  /// A flex factor.
  Flex(Flex),
  /// The `min-content` keyword.
  MinContent,
  /// The `max-content` keyword.
  MaxContent,
  /// The `auto` keyword.
  Auto,
}

impl<'i> Parse<'i> for TrackBreadth {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    if let Ok(len) = input.try_parse(LengthPercentage::parse) {
      return Ok(TrackBreadth::Length(len));
    }

    if let Ok(flex) = input.try_parse(Flex::parse) {
      return Ok(TrackBreadth::Flex(flex));
    }

    let location = input.current_source_location();
    let ident = input.expect_ident()?;
    match_ignore_ascii_case! { &*ident,
      "auto" => Ok(TrackBreadth::Auto),
      "min-content" => Ok(TrackBreadth::MinContent),
      "max-content" => Ok(TrackBreadth::MaxContent),
      _ => Err(location.new_unexpected_token_error(Token::Ident(ident.clone())))
    }
  }
}

impl ToCss for TrackBreadth {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      TrackBreadth::Auto => dest.write_str("auto"),
      TrackBreadth::MinContent => dest.write_str("min-content"),
      TrackBreadth::MaxContent => dest.write_str("max-content"),
      TrackBreadth::Length(len) => len.to_css(dest),
      TrackBreadth::Flex(flex) => flex.to_css(dest),
    }
  }
}

/// A [`minmax()`](https://drafts.csswg.org/css-grid-2/#valdef-grid-template-columns-minmax) function.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMax {
  /// The minimum value. A flex factor is not allowed here.
  pub min: TrackBreadth,
  /// The maximum value.
  pub max: TrackBreadth,
}

impl<'i> Parse<'i> for MinMax {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("minmax")?;
    input.parse_nested_block(|input| {
      let location = input.current_source_location();
      let min = TrackBreadth::parse(input)?;
      if let TrackBreadth::Flex(_) = min {
        return Err(location.new_custom_error(ParserError::InvalidValue));
      }
      input.expect_comma()?;
      let max = TrackBreadth::parse(input)?;
      Ok(MinMax { min, max })
    })
  }
}

impl ToCss for MinMax {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("minmax(")?;
    self.min.to_css(dest)?;
    dest.delim(',', false)?;
    self.max.to_css(dest)?;
    dest.write_char(')')
  }
}

/// A [`fit-content()`](https://drafts.csswg.org/css-grid-2/#valdef-grid-template-columns-fit-content) function.
#[derive(Debug, Clone, PartialEq)]
pub struct FitContent(pub LengthPercentage);

impl<'i> Parse<'i> for FitContent {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("fit-content")?;
    let len = input.parse_nested_block(LengthPercentage::parse)?;
    Ok(FitContent(len))
  }
}

impl ToCss for FitContent {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("fit-content(")?;
    self.0.to_css(dest)?;
    dest.write_char(')')
  }
}

/// The number of repetitions in a `repeat()` function.
#[derive(Debug, Clone, PartialEq)]
pub enum RepeatCount {
  /// A fixed number of repetitions.
  Number(CSSInteger),
  /// The `auto-fill` keyword.
  AutoFill,
  /// The `auto-fit` keyword.
  AutoFit,
}

impl<'i> Parse<'i> for RepeatCount {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    if let Ok(count) = input.try_parse(CSSInteger::parse) {
      if count < 1 {
        return Err(location.new_custom_error(ParserError::InvalidValue));
      }
      return Ok(RepeatCount::Number(count));
    }

    let ident = input.expect_ident()?;
    match_ignore_ascii_case! { &*ident,
      "auto-fill" => Ok(RepeatCount::AutoFill),
      "auto-fit" => Ok(RepeatCount::AutoFit),
      _ => Err(location.new_unexpected_token_error(Token::Ident(ident.clone())))
    }
  }
}

impl ToCss for RepeatCount {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      RepeatCount::AutoFill => dest.write_str("auto-fill"),
      RepeatCount::AutoFit => dest.write_str("auto-fit"),
      RepeatCount::Number(num) => num.to_css(dest),
    }
  }
}

/// An item in the track list of a `repeat()` function.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackListItem {
  /// A bracketed list of line names, e.g. `[a b]`.
  LineNames(Vec<CustomIdent>),
  /// A track size.
  Track(Value),
}

/// A [`repeat()`](https://drafts.csswg.org/css-grid-2/#funcdef-repeat) function.
#[derive(Debug, Clone, PartialEq)]
pub struct Repeat {
  /// The number of times to repeat the tracks.
  pub count: RepeatCount,
  /// The repeated line names and track sizes.
  pub tracks: Vec<TrackListItem>,
}

impl<'i> Parse<'i> for Repeat {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("repeat")?;
    input.parse_nested_block(|input| {
      let count = RepeatCount::parse(input)?;
      input.expect_comma()?;

      let mut tracks = Vec::new();
      loop {
        if input.try_parse(|input| input.expect_square_bracket_block()).is_ok() {
          let names = input.parse_nested_block(|input| {
            let mut names = Vec::new();
            while let Ok(name) = input.try_parse(CustomIdent::parse) {
              names.push(name);
            }
            Ok(names)
          })?;
          tracks.push(TrackListItem::LineNames(names));
          continue;
        }

        if input.is_exhausted() {
          break;
        }

        tracks.push(TrackListItem::Track(Value::parse(input)?));
      }

      if !tracks.iter().any(|t| matches!(t, TrackListItem::Track(_))) {
        return Err(input.new_custom_error(ParserError::InvalidValue));
      }

      Ok(Repeat { count, tracks })
    })
  }
}

impl ToCss for Repeat {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("repeat(")?;
    self.count.to_css(dest)?;
    dest.delim(',', false)?;
    let mut first = true;
    for track in &self.tracks {
      if !first {
        dest.write_char(' ')?;
      }
      first = false;
      match track {
        TrackListItem::LineNames(names) => {
          dest.write_char('[')?;
          crate::traits::to_css_space_separated(names, dest)?;
          dest.write_char(']')?;
        }
        TrackListItem::Track(value) => value.to_css(dest)?,
      }
    }
    dest.write_char(')')
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  fn test<'i, T: Parse<'i> + ToCss + PartialEq + std::fmt::Debug>(source: &'i str, expected: &'i str) {
    let value = T::parse_string(source).unwrap();
    assert_eq!(value.to_css_string(PrinterOptions::default()).unwrap(), expected);
    assert_eq!(T::parse_string(expected).unwrap(), value);
  }

  #[test]
  fn test_minmax() {
    test::<MinMax>("minmax(100px, 1fr)", "minmax(100px, 1fr)");
    test::<MinMax>("minmax(MIN-CONTENT, auto)", "minmax(min-content, auto)");
    assert!(MinMax::parse_string("minmax(1fr, 100px)").is_err());
  }

  #[test]
  fn test_fit_content() {
    test::<FitContent>("fit-content(40%)", "fit-content(40%)");
    assert!(FitContent::parse_string("fit-content(auto)").is_err());
  }

  #[test]
  fn test_repeat() {
    test::<Repeat>("repeat(3, 1fr)", "repeat(3, 1fr)");
    test::<Repeat>("repeat(auto-fill, minmax(100px, 1fr))", "repeat(auto-fill, minmax(100px, 1fr))");
    test::<Repeat>("repeat(2, [a] 10px [b c] 20px)", "repeat(2, [a] 10px [b c] 20px)");
    assert!(Repeat::parse_string("repeat(0, 1fr)").is_err());
    assert!(Repeat::parse_string("repeat(2, [a])").is_err());
  }
}
