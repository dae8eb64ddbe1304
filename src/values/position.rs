//! CSS position values.

use super::length::LengthPercentage;
use crate::error::{ParserError, PrinterError};
use crate::macros::enum_property;
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A CSS [`<position>`](https://www.w3.org/TR/css-values-4/#position) value, as used
/// inside gradients and basic shapes.
///
/// Omitted components are filled with `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
  /// The x-position.
  pub x: HorizontalPosition,
  /// The y-position.
  pub y: VerticalPosition,
}

impl Position {
  /// Returns a `Position` with both components set to `center`.
  pub fn center() -> Position {
    Position {
      x: HorizontalPosition::Center,
      y: VerticalPosition::Center,
    }
  }

  /// Returns whether both components are the `center` keyword.
  pub fn is_center(&self) -> bool {
    *self == Position::center()
  }
}

impl Default for Position {
  fn default() -> Position {
    Position::center()
  }
}

impl<'i> Parse<'i> for Position {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    match input.try_parse(HorizontalPosition::parse) {
      Ok(HorizontalPosition::Center) => {
        if let Ok(y) = input.try_parse(VerticalPosition::parse) {
          return Ok(Position {
            x: HorizontalPosition::Center,
            y,
          });
        }

        // `center left` rather than `left center`.
        let x = input
          .try_parse(HorizontalPosition::parse)
          .unwrap_or(HorizontalPosition::Center);
        return Ok(Position {
          x,
          y: VerticalPosition::Center,
        });
      }
      Ok(x @ HorizontalPosition::Length(_)) => {
        // After a length only a keyword or another length may follow.
        if let Ok(keyword) = input.try_parse(VerticalPositionKeyword::parse) {
          return Ok(Position {
            x,
            y: VerticalPosition::Side(keyword, None),
          });
        }
        if let Ok(lp) = input.try_parse(LengthPercentage::parse) {
          return Ok(Position {
            x,
            y: VerticalPosition::Length(lp),
          });
        }
        let _ = input.try_parse(|i| i.expect_ident_matching("center"));
        return Ok(Position {
          x,
          y: VerticalPosition::Center,
        });
      }
      Ok(HorizontalPosition::Side(x_keyword, lp)) => {
        if input.try_parse(|i| i.expect_ident_matching("center")).is_ok() {
          return Ok(Position {
            x: HorizontalPosition::Side(x_keyword, lp),
            y: VerticalPosition::Center,
          });
        }

        // `left top`, `left top 20px`, `left 20px top` or `left 20px top 20px`
        if let Ok(y_keyword) = input.try_parse(VerticalPositionKeyword::parse) {
          let y_lp = input.try_parse(LengthPercentage::parse).ok();
          return Ok(Position {
            x: HorizontalPosition::Side(x_keyword, lp),
            y: VerticalPosition::Side(y_keyword, y_lp),
          });
        }

        // `left 20px`: the offset is the vertical component.
        let y = lp.map_or(VerticalPosition::Center, VerticalPosition::Length);
        return Ok(Position {
          x: HorizontalPosition::Side(x_keyword, None),
          y,
        });
      }
      Err(_) => {}
    }

    // Out of order, e.g. `top left` or `bottom 10px right`.
    let y_keyword = VerticalPositionKeyword::parse(input)?;
    let rest: Result<_, ParseError<'i, ParserError<'i>>> = input.try_parse(|i| {
      let y_lp = i.try_parse(LengthPercentage::parse).ok();
      if let Ok(x_keyword) = i.try_parse(HorizontalPositionKeyword::parse) {
        let x_lp = i.try_parse(LengthPercentage::parse).ok();
        return Ok((y_lp, HorizontalPosition::Side(x_keyword, x_lp)));
      }
      i.expect_ident_matching("center")?;
      Ok((y_lp, HorizontalPosition::Center))
    });

    if let Ok((y_lp, x)) = rest {
      return Ok(Position {
        x,
        y: VerticalPosition::Side(y_keyword, y_lp),
      });
    }

    Ok(Position {
      x: HorizontalPosition::Center,
      y: VerticalPosition::Side(y_keyword, None),
    })
  }
}

impl ToCss for Position {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match (&self.x, &self.y) {
      // A missing y component is `center`.
      (HorizontalPosition::Center | HorizontalPosition::Length(_) | HorizontalPosition::Side(_, None), VerticalPosition::Center) => {
        self.x.to_css(dest)
      }
      (HorizontalPosition::Center, VerticalPosition::Side(_, None)) => self.y.to_css(dest),
      // A side offset followed by a bare length would read as a vertical offset.
      (HorizontalPosition::Side(_, Some(_)), VerticalPosition::Length(_)) => {
        self.x.to_css(dest)?;
        dest.write_str(" top ")?;
        self.y.to_css(dest)
      }
      _ => {
        self.x.to_css(dest)?;
        dest.write_char(' ')?;
        self.y.to_css(dest)
      }
    }
  }
}

/// A component within a [Position](Position) value, representing a position
/// along either the horizontal or vertical axis of a box.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionComponent<S> {
  /// `center`
  Center,
  /// `<length-percentage>`
  Length(LengthPercentage),
  /// `<side> <length-percentage>?`
  Side(S, Option<LengthPercentage>),
}

impl<'i, S: Parse<'i>> Parse<'i> for PositionComponent<S> {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    if input.try_parse(|i| i.expect_ident_matching("center")).is_ok() {
      return Ok(PositionComponent::Center);
    }

    if let Ok(lp) = input.try_parse(LengthPercentage::parse) {
      return Ok(PositionComponent::Length(lp));
    }

    let keyword = S::parse(input)?;
    let lp = input.try_parse(LengthPercentage::parse).ok();
    Ok(PositionComponent::Side(keyword, lp))
  }
}

impl<S: ToCss> ToCss for PositionComponent<S> {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    use PositionComponent::*;
    match &self {
      Center => dest.write_str("center"),
      Length(lp) => lp.to_css(dest),
      Side(s, lp) => {
        s.to_css(dest)?;
        if let Some(lp) = lp {
          dest.write_char(' ')?;
          lp.to_css(dest)?;
        }
        Ok(())
      }
    }
  }
}

enum_property! {
  /// A horizontal position keyword.
  pub enum HorizontalPositionKeyword {
    /// The `left` keyword.
    Left,
    /// The `right` keyword.
    Right,
  }
}

enum_property! {
  /// A vertical position keyword.
  pub enum VerticalPositionKeyword {
    /// The `top` keyword.
    Top,
    /// The `bottom` keyword.
    Bottom,
  }
}

/// A horizontal position component.
pub type HorizontalPosition = PositionComponent<HorizontalPositionKeyword>;

/// A vertical position component.
pub type VerticalPosition = PositionComponent<VerticalPositionKeyword>;

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  fn test(source: &str, expected: &str) {
    let position = Position::parse_string(source).unwrap();
    assert_eq!(position.to_css_string(PrinterOptions::default()).unwrap(), expected);
    assert_eq!(Position::parse_string(expected).unwrap(), position);
  }

  #[test]
  fn test_position() {
    test("center", "center");
    test("left", "left");
    test("top", "top");
    test("center center", "center");
    test("top left", "left top");
    test("10px", "10px");
    test("10px 20%", "10px 20%");
    test("left 20px", "left 20px");
    test("right 10px top", "right 10px top");
    test("left 10px top 20px", "left 10px top 20px");
    test("bottom 10px right 5px", "right 5px bottom 10px");
    assert!(Position::parse_string("middle").is_err());
  }
}
