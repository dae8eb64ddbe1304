//! CSS shape values.

use super::length::{LengthPercentage, LengthPercentageOrAuto};
use super::position::Position;
use super::string::CSSString;
use crate::error::{ParserError, PrinterError};
use crate::macros::enum_property;
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A generic value for the four sides of a box, in top, right, bottom, left order.
///
/// When serialized, as few components as possible are written when
/// there are duplicate values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rect<T>(
  /// The top component.
  pub T,
  /// The right component.
  pub T,
  /// The bottom component.
  pub T,
  /// The left component.
  pub T,
);

impl<T: Clone> Rect<T> {
  /// Returns a rect with all the values equal to `v`.
  pub fn all(v: T) -> Self {
    Rect(v.clone(), v.clone(), v.clone(), v)
  }
}

impl<'i, T> Parse<'i> for Rect<T>
where
  T: Clone + Parse<'i>,
{
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let first = T::parse(input)?;
    let second = match input.try_parse(T::parse) {
      Ok(second) => second,
      Err(_) => return Ok(Rect::all(first)),
    };
    let third = match input.try_parse(T::parse) {
      Ok(third) => third,
      Err(_) => return Ok(Rect(first.clone(), second.clone(), first, second)),
    };
    let fourth = match input.try_parse(T::parse) {
      Ok(fourth) => fourth,
      Err(_) => return Ok(Rect(first, second.clone(), third, second)),
    };
    Ok(Rect(first, second, third, fourth))
  }
}

impl<T> ToCss for Rect<T>
where
  T: PartialEq + ToCss,
{
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    self.0.to_css(dest)?;
    let same_vertical = self.0 == self.2;
    let same_horizontal = self.1 == self.3;
    if same_vertical && same_horizontal && self.0 == self.1 {
      return Ok(());
    }
    dest.write_char(' ')?;
    self.1.to_css(dest)?;
    if same_vertical && same_horizontal {
      return Ok(());
    }
    dest.write_char(' ')?;
    self.2.to_css(dest)?;
    if same_horizontal {
      return Ok(());
    }
    dest.write_char(' ')?;
    self.3.to_css(dest)
  }
}

/// The corner radii given after the `round` keyword of a basic shape.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderRadius {
  /// The horizontal radii.
  pub horizontal: Rect<LengthPercentage>,
  /// The vertical radii, after a `/`.
  pub vertical: Option<Rect<LengthPercentage>>,
}

impl<'i> Parse<'i> for BorderRadius {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let horizontal = Rect::parse(input)?;
    let vertical = if input.try_parse(|input| input.expect_delim('/')).is_ok() {
      Some(Rect::parse(input)?)
    } else {
      None
    };
    Ok(BorderRadius { horizontal, vertical })
  }
}

impl ToCss for BorderRadius {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    self.horizontal.to_css(dest)?;
    if let Some(vertical) = &self.vertical {
      dest.delim('/', true)?;
      vertical.to_css(dest)?;
    }
    Ok(())
  }
}

fn parse_round<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Option<BorderRadius>, ParseError<'i, ParserError<'i>>> {
  if input.try_parse(|input| input.expect_ident_matching("round")).is_ok() {
    Ok(Some(BorderRadius::parse(input)?))
  } else {
    Ok(None)
  }
}

fn write_round<W>(radius: &Option<BorderRadius>, dest: &mut Printer<W>) -> Result<(), PrinterError>
where
  W: std::fmt::Write,
{
  if let Some(radius) = radius {
    dest.write_str(" round ")?;
    radius.to_css(dest)?;
  }
  Ok(())
}

/// https://www.w3.org/TR/css-shapes-1/#funcdef-inset
#[derive(Debug, Clone, PartialEq)]
pub struct InsetRect {
  /// The offsets from the reference box edges.
  pub rect: Rect<LengthPercentage>,
  /// The corner radii.
  pub radius: Option<BorderRadius>,
}

impl<'i> Parse<'i> for InsetRect {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("inset")?;
    input.parse_nested_block(|input| {
      let rect = Rect::parse(input)?;
      let radius = parse_round(input)?;
      Ok(InsetRect { rect, radius })
    })
  }
}

impl ToCss for InsetRect {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("inset(")?;
    self.rect.to_css(dest)?;
    write_round(&self.radius, dest)?;
    dest.write_char(')')
  }
}

/// https://drafts.csswg.org/css-shapes-1/#funcdef-basic-shape-rect
///
/// The four edges are offsets from the top and left edges of the reference box.
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
  /// The top, right, bottom and left edges.
  pub edges: [LengthPercentageOrAuto; 4],
  /// The corner radii.
  pub radius: Option<BorderRadius>,
}

impl<'i> Parse<'i> for RectShape {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("rect")?;
    input.parse_nested_block(|input| {
      let edges = [
        LengthPercentageOrAuto::parse(input)?,
        LengthPercentageOrAuto::parse(input)?,
        LengthPercentageOrAuto::parse(input)?,
        LengthPercentageOrAuto::parse(input)?,
      ];
      let radius = parse_round(input)?;
      Ok(RectShape { edges, radius })
    })
  }
}

impl ToCss for RectShape {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("rect(")?;
    crate::traits::to_css_space_separated(&self.edges, dest)?;
    write_round(&self.radius, dest)?;
    dest.write_char(')')
  }
}

/// https://drafts.csswg.org/css-shapes-1/#funcdef-basic-shape-xywh
#[derive(Debug, Clone, PartialEq)]
pub struct Xywh {
  /// The offset of the left edge.
  pub x: LengthPercentage,
  /// The offset of the top edge.
  pub y: LengthPercentage,
  /// The width of the rectangle.
  pub width: LengthPercentage,
  /// The height of the rectangle.
  pub height: LengthPercentage,
  /// The corner radii.
  pub radius: Option<BorderRadius>,
}

impl<'i> Parse<'i> for Xywh {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("xywh")?;
    input.parse_nested_block(|input| {
      let x = LengthPercentage::parse(input)?;
      let y = LengthPercentage::parse(input)?;
      let width = parse_non_negative(input)?;
      let height = parse_non_negative(input)?;
      let radius = parse_round(input)?;
      Ok(Xywh {
        x,
        y,
        width,
        height,
        radius,
      })
    })
  }
}

fn parse_non_negative<'i, 't>(input: &mut Parser<'i, 't>) -> Result<LengthPercentage, ParseError<'i, ParserError<'i>>> {
  let location = input.current_source_location();
  let lp = LengthPercentage::parse(input)?;
  let negative = match &lp {
    LengthPercentage::Dimension(d) => d.value() < 0.0,
    LengthPercentage::Percentage(p) => p.0 < 0.0,
    LengthPercentage::Calc(_) => false,
  };
  if negative {
    return Err(location.new_custom_error(ParserError::InvalidValue));
  }
  Ok(lp)
}

impl ToCss for Xywh {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("xywh(")?;
    for (i, lp) in [&self.x, &self.y, &self.width, &self.height].iter().enumerate() {
      if i > 0 {
        dest.write_char(' ')?;
      }
      lp.to_css(dest)?;
    }
    write_round(&self.radius, dest)?;
    dest.write_char(')')
  }
}

/// https://www.w3.org/TR/css-shapes-1/#funcdef-circle
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
  /// The radius of the circle.
  pub radius: ShapeRadius,
  /// The center of the circle.
  pub position: Position,
}

impl<'i> Parse<'i> for Circle {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("circle")?;
    input.parse_nested_block(|input| {
      let radius = input.try_parse(ShapeRadius::parse).unwrap_or_default();
      let position = parse_at_position(input)?;
      Ok(Circle { radius, position })
    })
  }
}

impl ToCss for Circle {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("circle(")?;
    let has_radius = self.radius != ShapeRadius::default();
    if has_radius {
      self.radius.to_css(dest)?;
    }
    write_at_position(&self.position, has_radius, dest)?;
    dest.write_char(')')
  }
}

/// https://www.w3.org/TR/css-shapes-1/#funcdef-ellipse
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
  /// The horizontal radius.
  pub radius_x: ShapeRadius,
  /// The vertical radius.
  pub radius_y: ShapeRadius,
  /// The center of the ellipse.
  pub position: Position,
}

impl<'i> Parse<'i> for Ellipse {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("ellipse")?;
    input.parse_nested_block(|input| {
      let (radius_x, radius_y) = input
        .try_parse(|input| -> Result<_, ParseError<'i, ParserError<'i>>> {
          Ok((ShapeRadius::parse(input)?, ShapeRadius::parse(input)?))
        })
        .unwrap_or_default();
      let position = parse_at_position(input)?;
      Ok(Ellipse {
        radius_x,
        radius_y,
        position,
      })
    })
  }
}

impl ToCss for Ellipse {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("ellipse(")?;
    let has_radius = self.radius_x != ShapeRadius::default() || self.radius_y != ShapeRadius::default();
    if has_radius {
      self.radius_x.to_css(dest)?;
      dest.write_char(' ')?;
      self.radius_y.to_css(dest)?;
    }
    write_at_position(&self.position, has_radius, dest)?;
    dest.write_char(')')
  }
}

fn parse_at_position<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Position, ParseError<'i, ParserError<'i>>> {
  if input.try_parse(|input| input.expect_ident_matching("at")).is_ok() {
    Position::parse(input)
  } else {
    Ok(Position::center())
  }
}

fn write_at_position<W>(position: &Position, space: bool, dest: &mut Printer<W>) -> Result<(), PrinterError>
where
  W: std::fmt::Write,
{
  if position.is_center() {
    return Ok(());
  }
  if space {
    dest.write_char(' ')?;
  }
  dest.write_str("at ")?;
  position.to_css(dest)
}

/// https://www.w3.org/TR/css-shapes-1/#typedef-shape-radius
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeRadius {
  /// An explicit length or percentage.
  LengthPercentage(LengthPercentage),
  /// The length from the center to the closest side of the box.
  ClosestSide,
  /// The length from the center to the farthest side of the box.
  FarthestSide,
}

impl Default for ShapeRadius {
  fn default() -> ShapeRadius {
    ShapeRadius::ClosestSide
  }
}

impl<'i> Parse<'i> for ShapeRadius {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    if let Ok(len) = input.try_parse(LengthPercentage::parse) {
      return Ok(ShapeRadius::LengthPercentage(len));
    }

    if input.try_parse(|input| input.expect_ident_matching("closest-side")).is_ok() {
      return Ok(ShapeRadius::ClosestSide);
    }

    input.expect_ident_matching("farthest-side")?;
    Ok(ShapeRadius::FarthestSide)
  }
}

impl ToCss for ShapeRadius {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      ShapeRadius::LengthPercentage(len) => len.to_css(dest),
      ShapeRadius::ClosestSide => dest.write_str("closest-side"),
      ShapeRadius::FarthestSide => dest.write_str("farthest-side"),
    }
  }
}

enum_property! {
  /// A [`<fill-rule>`](https://www.w3.org/TR/css-shapes-1/#typedef-fill-rule) used to
  /// determine the interior of a `polygon()` or `path()`.
  pub enum FillRule {
    /// The `nonzero` fill rule.
    Nonzero,
    /// The `evenodd` fill rule.
    Evenodd,
  }
}

impl Default for FillRule {
  fn default() -> FillRule {
    FillRule::Nonzero
  }
}

fn parse_fill_rule<'i, 't>(input: &mut Parser<'i, 't>) -> Result<FillRule, ParseError<'i, ParserError<'i>>> {
  match input.try_parse(FillRule::parse) {
    Ok(fill_rule) => {
      input.expect_comma()?;
      Ok(fill_rule)
    }
    Err(_) => Ok(FillRule::default()),
  }
}

fn write_fill_rule<W>(fill_rule: FillRule, dest: &mut Printer<W>) -> Result<(), PrinterError>
where
  W: std::fmt::Write,
{
  if fill_rule != FillRule::default() {
    fill_rule.to_css(dest)?;
    dest.delim(',', false)?;
  }
  Ok(())
}

/// https://www.w3.org/TR/css-shapes-1/#funcdef-polygon
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
  /// The fill rule used to determine the interior of the polygon.
  pub fill_rule: FillRule,
  /// The vertices of the polygon.
  pub points: Vec<Point>,
}

/// A point within a `polygon()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
  /// The x position of the point.
  pub x: LengthPercentage,
  /// The y position of the point.
  pub y: LengthPercentage,
}

impl<'i> Parse<'i> for Polygon {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("polygon")?;
    input.parse_nested_block(|input| {
      let fill_rule = parse_fill_rule(input)?;
      let points = input.parse_comma_separated(Point::parse)?;
      Ok(Polygon { fill_rule, points })
    })
  }
}

impl<'i> Parse<'i> for Point {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let x = LengthPercentage::parse(input)?;
    let y = LengthPercentage::parse(input)?;
    Ok(Point { x, y })
  }
}

impl ToCss for Polygon {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("polygon(")?;
    write_fill_rule(self.fill_rule, dest)?;
    crate::traits::to_css_comma_separated(&self.points, dest)?;
    dest.write_char(')')
  }
}

impl ToCss for Point {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    self.x.to_css(dest)?;
    dest.write_char(' ')?;
    self.y.to_css(dest)
  }
}

/// https://www.w3.org/TR/css-shapes-1/#funcdef-basic-shape-path
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
  /// The fill rule used to determine the interior of the path.
  pub fill_rule: FillRule,
  /// The SVG path data.
  pub path: CSSString,
}

impl<'i> Parse<'i> for Path {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("path")?;
    input.parse_nested_block(|input| {
      let fill_rule = parse_fill_rule(input)?;
      let path = CSSString::parse(input)?;
      Ok(Path { fill_rule, path })
    })
  }
}

impl ToCss for Path {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("path(")?;
    write_fill_rule(self.fill_rule, dest)?;
    self.path.to_css(dest)?;
    dest.write_char(')')
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  fn test<'i, T: Parse<'i> + ToCss + PartialEq + std::fmt::Debug>(source: &'i str, expected: &'i str) {
    let shape = T::parse_string(source).unwrap();
    assert_eq!(shape.to_css_string(PrinterOptions::default()).unwrap(), expected);
    assert_eq!(T::parse_string(expected).unwrap(), shape);
  }

  #[test]
  fn test_inset() {
    test::<InsetRect>("inset(10px)", "inset(10px)");
    test::<InsetRect>("inset(10px 20px 10px 20px)", "inset(10px 20px)");
    test::<InsetRect>("inset(1px 2px 3px round 5px)", "inset(1px 2px 3px round 5px)");
    test::<InsetRect>("inset(0 round 5px 10px / 2px)", "inset(0px round 5px 10px / 2px)");
  }

  #[test]
  fn test_rect_and_xywh() {
    test::<RectShape>("rect(0 auto 50% 10px)", "rect(0px auto 50% 10px)");
    test::<RectShape>("rect(1px 2px 3px 4px round 50%)", "rect(1px 2px 3px 4px round 50%)");
    test::<Xywh>("xywh(1px 2% 3px 4px)", "xywh(1px 2% 3px 4px)");
    assert!(Xywh::parse_string("xywh(1px 2px -3px 4px)").is_err());
    assert!(RectShape::parse_string("rect(1px 2px 3px)").is_err());
  }

  #[test]
  fn test_circle_and_ellipse() {
    test::<Circle>("circle()", "circle()");
    test::<Circle>("circle(closest-side at center)", "circle()");
    test::<Circle>("circle(50px)", "circle(50px)");
    test::<Circle>("circle(farthest-side at left top)", "circle(farthest-side at left top)");
    test::<Circle>("circle(at 10% 20%)", "circle(at 10% 20%)");
    test::<Ellipse>("ellipse(10px 20px)", "ellipse(10px 20px)");
    test::<Ellipse>("ellipse(at right)", "ellipse(at right)");
  }

  #[test]
  fn test_polygon_and_path() {
    test::<Polygon>("polygon(0 0, 100% 0, 50% 100%)", "polygon(0px 0px, 100% 0px, 50% 100%)");
    test::<Polygon>("polygon(evenodd, 0 0, 1px 1px)", "polygon(evenodd, 0px 0px, 1px 1px)");
    test::<Polygon>("polygon(nonzero, 1px 1px)", "polygon(1px 1px)");
    test::<Path>("path('M 0 0 L 10 10')", "path(\"M 0 0 L 10 10\")");
    test::<Path>("path(evenodd, \"M 0 0\")", "path(evenodd, \"M 0 0\")");
  }
}
