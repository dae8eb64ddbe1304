//! CSS gradient values.

use super::angle::{Angle, AnglePercentage};
use super::color::AnyColor;
use super::length::{LengthPercentage, LengthValue};
use super::position::{HorizontalPositionKeyword, Position, VerticalPositionKeyword};
use crate::error::{ParserError, PrinterError};
use crate::macros::enum_property;
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A CSS [`<gradient>`](https://www.w3.org/TR/css-images-3/#gradients) value.
#[derive(Debug, Clone, PartialEq)]
pub enum Gradient {
  /// A `linear-gradient()` or `repeating-linear-gradient()`.
  Linear(LinearGradient),
  /// A `radial-gradient()` or `repeating-radial-gradient()`.
  Radial(RadialGradient),
  /// A `conic-gradient()` or `repeating-conic-gradient()`.
  Conic(ConicGradient),
}

impl<'i> Parse<'i> for Gradient {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    if let Ok(g) = input.try_parse(LinearGradient::parse) {
      return Ok(Gradient::Linear(g));
    }
    if let Ok(g) = input.try_parse(RadialGradient::parse) {
      return Ok(Gradient::Radial(g));
    }
    Ok(Gradient::Conic(ConicGradient::parse(input)?))
  }
}

impl ToCss for Gradient {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      Gradient::Linear(g) => g.to_css(dest),
      Gradient::Radial(g) => g.to_css(dest),
      Gradient::Conic(g) => g.to_css(dest),
    }
  }
}

/// Parses the function token of a gradient and returns whether it is the repeating form.
fn parse_gradient_function<'i, 't>(
  input: &mut Parser<'i, 't>,
  name: &str,
) -> Result<bool, ParseError<'i, ParserError<'i>>> {
  let location = input.current_source_location();
  let function = input.expect_function()?;
  if function.eq_ignore_ascii_case(name) {
    return Ok(false);
  }
  match function.get(..10) {
    Some(prefix) if prefix.eq_ignore_ascii_case("repeating-") && function[10..].eq_ignore_ascii_case(name) => Ok(true),
    _ => Err(location.new_unexpected_token_error(Token::Function(function.clone()))),
  }
}

fn write_gradient_function<W>(dest: &mut Printer<W>, name: &str, repeating: bool) -> Result<(), PrinterError>
where
  W: std::fmt::Write,
{
  if repeating {
    dest.write_str("repeating-")?;
  }
  dest.write_str(name)?;
  dest.write_char('(')
}

/// A CSS [`linear-gradient()`](https://www.w3.org/TR/css-images-3/#linear-gradients) or `repeating-linear-gradient()`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
  /// Whether this is a `repeating-linear-gradient()`.
  pub repeating: bool,
  /// The direction of the gradient.
  pub direction: LineDirection,
  /// The color stops and transition hints for the gradient.
  pub items: Vec<GradientItem<LengthPercentage>>,
}

impl<'i> Parse<'i> for LinearGradient {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let repeating = parse_gradient_function(input, "linear-gradient")?;
    input.parse_nested_block(|input| {
      let direction = if let Ok(direction) = input.try_parse(LineDirection::parse) {
        input.expect_comma()?;
        direction
      } else {
        LineDirection::Vertical(VerticalPositionKeyword::Bottom)
      };
      let items = parse_items(input)?;
      Ok(LinearGradient {
        repeating,
        direction,
        items,
      })
    })
  }
}

impl ToCss for LinearGradient {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    write_gradient_function(dest, "linear-gradient", self.repeating)?;
    // `to bottom` is the default.
    if self.direction != LineDirection::Vertical(VerticalPositionKeyword::Bottom) {
      self.direction.to_css(dest)?;
      dest.delim(',', false)?;
    }
    serialize_items(&self.items, dest)?;
    dest.write_char(')')
  }
}

/// The direction of a CSS `linear-gradient()`.
#[derive(Debug, Clone, PartialEq)]
pub enum LineDirection {
  /// An angle.
  Angle(Angle),
  /// A horizontal position keyword, e.g. `left` or `right.
  Horizontal(HorizontalPositionKeyword),
  /// A vertical position keyword, e.g. `top` or `bottom`.
  Vertical(VerticalPositionKeyword),
  /// A corner, e.g. `bottom left` or `top right`.
  Corner {
    /// A horizontal position keyword, e.g. `left` or `right.
    horizontal: HorizontalPositionKeyword,
    /// A vertical position keyword, e.g. `top` or `bottom`.
    vertical: VerticalPositionKeyword,
  },
}

impl<'i> Parse<'i> for LineDirection {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    // Gradients allow unitless zero angles.
    if let Ok(angle) = input.try_parse(Angle::parse_with_unitless_zero) {
      return Ok(LineDirection::Angle(angle));
    }

    input.expect_ident_matching("to")?;

    if let Ok(x) = input.try_parse(HorizontalPositionKeyword::parse) {
      if let Ok(y) = input.try_parse(VerticalPositionKeyword::parse) {
        return Ok(LineDirection::Corner {
          horizontal: x,
          vertical: y,
        });
      }
      return Ok(LineDirection::Horizontal(x));
    }

    let y = VerticalPositionKeyword::parse(input)?;
    if let Ok(x) = input.try_parse(HorizontalPositionKeyword::parse) {
      return Ok(LineDirection::Corner {
        horizontal: x,
        vertical: y,
      });
    }
    Ok(LineDirection::Vertical(y))
  }
}

impl ToCss for LineDirection {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      LineDirection::Angle(angle) => angle.to_css(dest),
      LineDirection::Horizontal(k) => {
        dest.write_str("to ")?;
        k.to_css(dest)
      }
      LineDirection::Vertical(k) => {
        dest.write_str("to ")?;
        k.to_css(dest)
      }
      LineDirection::Corner { horizontal, vertical } => {
        dest.write_str("to ")?;
        vertical.to_css(dest)?;
        dest.write_char(' ')?;
        horizontal.to_css(dest)
      }
    }
  }
}

/// A CSS [`radial-gradient()`](https://www.w3.org/TR/css-images-3/#radial-gradients) or `repeating-radial-gradient()`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
  /// Whether this is a `repeating-radial-gradient()`.
  pub repeating: bool,
  /// The shape of the gradient.
  pub shape: EndingShape,
  /// The position of the gradient.
  pub position: Position,
  /// The color stops and transition hints for the gradient.
  pub items: Vec<GradientItem<LengthPercentage>>,
}

impl<'i> Parse<'i> for RadialGradient {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let repeating = parse_gradient_function(input, "radial-gradient")?;
    input.parse_nested_block(|input| {
      let shape = input.try_parse(EndingShape::parse).ok();
      let position = input
        .try_parse(|input| {
          input.expect_ident_matching("at")?;
          Position::parse(input)
        })
        .ok();

      if shape.is_some() || position.is_some() {
        input.expect_comma()?;
      }

      let items = parse_items(input)?;
      Ok(RadialGradient {
        repeating,
        shape: shape.unwrap_or_default(),
        position: position.unwrap_or_default(),
        items,
      })
    })
  }
}

impl ToCss for RadialGradient {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    write_gradient_function(dest, "radial-gradient", self.repeating)?;
    if self.shape != EndingShape::default() {
      self.shape.to_css(dest)?;
      if self.position.is_center() {
        dest.delim(',', false)?;
      } else {
        dest.write_char(' ')?;
      }
    }

    if !self.position.is_center() {
      dest.write_str("at ")?;
      self.position.to_css(dest)?;
      dest.delim(',', false)?;
    }

    serialize_items(&self.items, dest)?;
    dest.write_char(')')
  }
}

/// A `radial-gradient()` [ending shape](https://www.w3.org/TR/css-images-3/#valdef-radial-gradient-ending-shape)
/// together with its size.
#[derive(Debug, Clone, PartialEq)]
pub enum EndingShape {
  /// A circle with an explicit radius.
  CircleRadius(LengthValue),
  /// A circle sized by an extent keyword.
  CircleExtent(ShapeExtent),
  /// An ellipse with an explicit horizontal and vertical radius.
  EllipseRadii(LengthPercentage, LengthPercentage),
  /// An ellipse sized by an extent keyword.
  EllipseExtent(ShapeExtent),
}

impl Default for EndingShape {
  fn default() -> EndingShape {
    EndingShape::EllipseExtent(ShapeExtent::FarthestCorner)
  }
}

#[derive(Clone, Copy, PartialEq)]
enum ShapeKeyword {
  Circle,
  Ellipse,
}

fn parse_shape_keyword<'i, 't>(input: &mut Parser<'i, 't>) -> Result<ShapeKeyword, ParseError<'i, ParserError<'i>>> {
  let location = input.current_source_location();
  let ident = input.expect_ident()?;
  match_ignore_ascii_case! { &*ident,
    "circle" => Ok(ShapeKeyword::Circle),
    "ellipse" => Ok(ShapeKeyword::Ellipse),
    _ => Err(location.new_unexpected_token_error(Token::Ident(ident.clone())))
  }
}

fn parse_radii<'i, 't>(
  input: &mut Parser<'i, 't>,
) -> Result<(LengthPercentage, Option<LengthPercentage>), ParseError<'i, ParserError<'i>>> {
  let x = LengthPercentage::parse(input)?;
  let y = input.try_parse(LengthPercentage::parse).ok();
  Ok((x, y))
}

impl<'i> Parse<'i> for EndingShape {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    // The shape keyword may come before or after the size.
    let mut keyword = input.try_parse(parse_shape_keyword).ok();
    let extent = input.try_parse(ShapeExtent::parse).ok();
    let radii = match extent {
      Some(_) => None,
      None => input.try_parse(parse_radii).ok(),
    };
    if keyword.is_none() {
      keyword = input.try_parse(parse_shape_keyword).ok();
    }

    let location = input.current_source_location();
    match (keyword, extent, radii) {
      (Some(ShapeKeyword::Circle) | None, None, Some((LengthPercentage::Dimension(radius), None))) => {
        Ok(EndingShape::CircleRadius(radius))
      }
      (Some(ShapeKeyword::Ellipse) | None, None, Some((x, Some(y)))) => Ok(EndingShape::EllipseRadii(x, y)),
      (Some(ShapeKeyword::Circle), extent, None) => Ok(EndingShape::CircleExtent(
        extent.unwrap_or(ShapeExtent::FarthestCorner),
      )),
      (Some(ShapeKeyword::Ellipse), extent, None) => Ok(EndingShape::EllipseExtent(
        extent.unwrap_or(ShapeExtent::FarthestCorner),
      )),
      (None, Some(extent), None) => Ok(EndingShape::EllipseExtent(extent)),
      _ => Err(location.new_custom_error(ParserError::InvalidValue)),
    }
  }
}

impl ToCss for EndingShape {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      EndingShape::CircleRadius(radius) => radius.to_css(dest),
      EndingShape::CircleExtent(extent) => {
        dest.write_str("circle")?;
        if *extent != ShapeExtent::FarthestCorner {
          dest.write_char(' ')?;
          extent.to_css(dest)?;
        }
        Ok(())
      }
      EndingShape::EllipseRadii(x, y) => {
        x.to_css(dest)?;
        dest.write_char(' ')?;
        y.to_css(dest)
      }
      // Ellipse is the default shape.
      EndingShape::EllipseExtent(extent) => extent.to_css(dest),
    }
  }
}

enum_property! {
  /// A shape extent for a `radial-gradient()`.
  pub enum ShapeExtent {
    /// The closest side of the box to the gradient's center.
    "closest-side": ClosestSide,
    /// The farthest side of the box from the gradient's center.
    "farthest-side": FarthestSide,
    /// The closest corner of the box to the gradient's center.
    "closest-corner": ClosestCorner,
    /// The farthest corner of the box from the gradient's center.
    "farthest-corner": FarthestCorner,
  }
}

/// A CSS [`conic-gradient()`](https://www.w3.org/TR/css-images-4/#conic-gradients) or `repeating-conic-gradient()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConicGradient {
  /// Whether this is a `repeating-conic-gradient()`.
  pub repeating: bool,
  /// The angle of the gradient.
  pub angle: Angle,
  /// The position of the gradient.
  pub position: Position,
  /// The color stops and transition hints for the gradient.
  pub items: Vec<GradientItem<AnglePercentage>>,
}

impl<'i> Parse<'i> for ConicGradient {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let repeating = parse_gradient_function(input, "conic-gradient")?;
    input.parse_nested_block(|input| {
      let angle = input.try_parse(|input| {
        input.expect_ident_matching("from")?;
        Angle::parse_with_unitless_zero(input)
      });

      let position = input.try_parse(|input| {
        input.expect_ident_matching("at")?;
        Position::parse(input)
      });

      if angle.is_ok() || position.is_ok() {
        input.expect_comma()?;
      }

      let items = parse_items(input)?;
      Ok(ConicGradient {
        repeating,
        angle: angle.unwrap_or(Angle::Deg(0.0)),
        position: position.unwrap_or_default(),
        items,
      })
    })
  }
}

impl ToCss for ConicGradient {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    write_gradient_function(dest, "conic-gradient", self.repeating)?;
    if self.angle != Angle::Deg(0.0) {
      dest.write_str("from ")?;
      self.angle.to_css(dest)?;

      if self.position.is_center() {
        dest.delim(',', false)?;
      } else {
        dest.write_char(' ')?;
      }
    }

    if !self.position.is_center() {
      dest.write_str("at ")?;
      self.position.to_css(dest)?;
      dest.delim(',', false)?;
    }

    serialize_items(&self.items, dest)?;
    dest.write_char(')')
  }
}

/// A [`<color-stop>`](https://www.w3.org/TR/css-images-4/#color-stop-syntax) within a gradient.
///
/// This type is generic, and may be either a [LengthPercentage](super::length::LengthPercentage)
/// or [Angle](super::angle::Angle) depending on what type of gradient it is within.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop<D> {
  /// The color of the color stop.
  pub color: AnyColor,
  /// The position of the color stop.
  pub position: Option<D>,
}

impl<'i, D: Parse<'i>> Parse<'i> for ColorStop<D> {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let color = AnyColor::parse(input)?;
    let position = input.try_parse(D::parse).ok();
    Ok(ColorStop { color, position })
  }
}

impl<D: ToCss> ToCss for ColorStop<D> {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    self.color.to_css(dest)?;
    if let Some(position) = &self.position {
      dest.write_char(' ')?;
      position.to_css(dest)?;
    }
    Ok(())
  }
}

/// Either a color stop or interpolation hint within a gradient.
#[derive(Debug, Clone, PartialEq)]
pub enum GradientItem<D> {
  /// A color stop.
  ColorStop(ColorStop<D>),
  /// A color interpolation hint.
  Hint(D),
}

impl<D: ToCss> ToCss for GradientItem<D> {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      GradientItem::ColorStop(stop) => stop.to_css(dest),
      GradientItem::Hint(hint) => hint.to_css(dest),
    }
  }
}

/// Parses a comma separated list of color stops and hints. A stop with two
/// positions is split into two stops of the same color.
fn parse_items<'i, 't, D: Parse<'i>>(
  input: &mut Parser<'i, 't>,
) -> Result<Vec<GradientItem<D>>, ParseError<'i, ParserError<'i>>> {
  let mut items = Vec::new();
  let mut seen_stop = false;

  loop {
    input.parse_until_before(Delimiter::Comma, |input| {
      if seen_stop {
        if let Ok(hint) = input.try_parse(D::parse) {
          seen_stop = false;
          items.push(GradientItem::Hint(hint));
          return Ok(());
        }
      }

      let stop = ColorStop::parse(input)?;

      if let Ok(position) = input.try_parse(D::parse) {
        let color = stop.color.clone();
        items.push(GradientItem::ColorStop(stop));
        items.push(GradientItem::ColorStop(ColorStop {
          color,
          position: Some(position),
        }))
      } else {
        items.push(GradientItem::ColorStop(stop));
      }

      seen_stop = true;
      Ok(())
    })?;

    match input.next() {
      Err(_) => break,
      Ok(Token::Comma) => continue,
      Ok(t) => {
        let t = t.clone();
        return Err(input.new_unexpected_token_error(t));
      }
    }
  }

  // At least two color stops are required.
  let stops = items.iter().filter(|item| matches!(item, GradientItem::ColorStop(_))).count();
  if stops < 2 || matches!(items.last(), Some(GradientItem::Hint(_))) {
    return Err(input.new_custom_error(ParserError::InvalidValue));
  }

  Ok(items)
}

/// Writes the items, merging consecutive positioned stops of the same color into a
/// double position stop.
fn serialize_items<D: ToCss + PartialEq, W>(items: &[GradientItem<D>], dest: &mut Printer<W>) -> Result<(), PrinterError>
where
  W: std::fmt::Write,
{
  let mut first = true;
  let mut last: Option<&GradientItem<D>> = None;
  for item in items {
    if let Some(prev) = last {
      match (prev, item) {
        (
          GradientItem::ColorStop(ColorStop {
            position: Some(_),
            color: ca,
          }),
          GradientItem::ColorStop(ColorStop {
            position: Some(p),
            color: cb,
          }),
        ) if ca == cb => {
          dest.write_char(' ')?;
          p.to_css(dest)?;
          last = None;
          continue;
        }
        _ => {}
      }
    }

    if first {
      first = false;
    } else {
      dest.delim(',', false)?;
    }
    item.to_css(dest)?;
    last = Some(item)
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  fn test(source: &str, expected: &str) {
    let gradient = Gradient::parse_string(source).unwrap();
    assert_eq!(gradient.to_css_string(PrinterOptions::default()).unwrap(), expected);
    assert_eq!(Gradient::parse_string(expected).unwrap(), gradient);
  }

  #[test]
  fn test_linear_gradient() {
    test("linear-gradient(red, blue)", "linear-gradient(red, blue)");
    test("linear-gradient(to bottom, red, blue)", "linear-gradient(red, blue)");
    test("linear-gradient(to left top, red, blue)", "linear-gradient(to top left, red, blue)");
    test("linear-gradient(45deg, red 10%, blue)", "linear-gradient(45deg, red 10%, blue)");
    test("linear-gradient(0, red, blue)", "linear-gradient(0deg, red, blue)");
    test("linear-gradient(red 10% 20%, 50%, blue)", "linear-gradient(red 10% 20%, 50%, blue)");
    test(
      "repeating-linear-gradient(#f00 0px, #00f 10px)",
      "repeating-linear-gradient(#f00 0px, #00f 10px)",
    );
    test(
      "linear-gradient(color-mix(in srgb, red, blue), light-dark(white, black))",
      "linear-gradient(color-mix(in srgb, red, blue), light-dark(white, black))",
    );
    assert!(Gradient::parse_string("linear-gradient(red)").is_err());
    assert!(Gradient::parse_string("linear-gradient(red, 50%)").is_err());
  }

  #[test]
  fn test_radial_gradient() {
    test("radial-gradient(red, blue)", "radial-gradient(red, blue)");
    test("radial-gradient(circle, red, blue)", "radial-gradient(circle, red, blue)");
    test("radial-gradient(circle 10px at top, red, blue)", "radial-gradient(10px at top, red, blue)");
    test(
      "radial-gradient(closest-side ellipse, red, blue)",
      "radial-gradient(closest-side, red, blue)",
    );
    test("radial-gradient(10px 20% at 5px 5px, red, blue)", "radial-gradient(10px 20% at 5px 5px, red, blue)");
    test("repeating-radial-gradient(at center, red, blue)", "repeating-radial-gradient(red, blue)");
    test(
      "radial-gradient(closest-side circle at left, red, blue)",
      "radial-gradient(circle closest-side at left, red, blue)",
    );
    test("radial-gradient(ellipse farthest-corner, red, blue)", "radial-gradient(red, blue)");
    assert!(Gradient::parse_string("radial-gradient(circle 10px 20px, red, blue)").is_err());
    assert!(Gradient::parse_string("radial-gradient(circle 10%, red, blue)").is_err());
  }

  #[test]
  fn test_conic_gradient() {
    test("conic-gradient(red, blue)", "conic-gradient(red, blue)");
    test("conic-gradient(from 90deg, red, blue 50%)", "conic-gradient(from 90deg, red, blue 50%)");
    test("conic-gradient(at left, red 0deg, blue 180deg)", "conic-gradient(at left, red 0deg, blue 180deg)");
    test("repeating-conic-gradient(from .5turn at 10px 20px, red, blue)", "repeating-conic-gradient(from .5turn at 10px 20px, red, blue)");
    assert!(Gradient::parse_string("radial-conic-gradient(red, blue)").is_err());
  }
}
