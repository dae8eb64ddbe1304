//! The value model: one parsed CSS component value.
//!
//! A declaration value such as `1px solid red` is parsed into a flat list of
//! [Value](Value)s, which is what the grammar matcher consumes. Functions are
//! parsed into their own structured types, dispatched by name through a static
//! table. Commas, slashes and the brackets of line name lists are kept as
//! [Value::Delimiter](Value::Delimiter) entries.

use super::anchor::AnchorSize;
use super::angle::Angle;
use super::calc::MathFunction;
use super::color::{is_color_keyword, ColorMix, ColorSpace, CssColor, DeviceCmyk, LightDark};
use super::content::{Attr, Counter, Counters, Env, Leader, Symbols, TargetCounter, TargetCounters, TargetText, Var};
use super::easing::{CubicBezier, Linear, Steps};
use super::font::{Add, AlternateGlyph};
use super::gradient::{ConicGradient, LinearGradient, RadialGradient};
use super::grid::{FitContent, MinMax, Repeat};
use super::ident::{DashedIdent, Ident};
use super::image::{CrossFade, Element, ImageSet, Paint};
use super::length::LengthValue;
use super::number::{CSSInteger, CSSNumber, Flex};
use super::percentage::Percentage;
use super::position::Position;
use super::ratio::Ratio;
use super::resolution::Resolution;
use super::shape::{Circle, Ellipse, InsetRect, Path, Polygon, RectShape, Xywh};
use super::string::CSSString;
use super::time::{Frequency, Time};
use super::timeline::{Scroll, View};
use super::transform::{Filter, Transform};
use super::url::Url;
use crate::error::{Error, ParserError, PrinterError};
use crate::macros::enum_property;
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::{Serialize, Serializer};
use std::cell::Cell;

/// A single CSS component value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  /// A `<percentage>`.
  Percentage(Percentage),
  /// An `<integer>`.
  Integer(CSSInteger),
  /// A `<number>` written with a fraction or exponent.
  Number(CSSNumber),
  /// A `<flex>` value in `fr` units.
  Flex(Flex),
  /// A `<length>`.
  Length(LengthValue),
  /// An `<angle>`.
  Angle(Angle),
  /// A `<time>`.
  Time(Time),
  /// A `<frequency>`.
  Frequency(Frequency),
  /// A `<resolution>`.
  Resolution(Resolution),
  /// A `<string>`.
  String(CSSString),
  /// A keyword or other identifier, as written.
  Keyword(Ident),
  /// A `--` prefixed identifier.
  DashedIdent(DashedIdent),
  /// A `url()`.
  Url(Url),
  /// A color keyword, hex color or color function.
  Color(CssColor),
  /// A `color-mix()` function.
  ColorMix(Box<ColorMix>),
  /// A `light-dark()` function.
  LightDark(Box<LightDark>),
  /// A `device-cmyk()` function.
  DeviceCmyk(Box<DeviceCmyk>),
  /// A `linear-gradient()` or `repeating-linear-gradient()`.
  LinearGradient(Box<LinearGradient>),
  /// A `radial-gradient()` or `repeating-radial-gradient()`.
  RadialGradient(Box<RadialGradient>),
  /// A `conic-gradient()` or `repeating-conic-gradient()`.
  ConicGradient(Box<ConicGradient>),
  /// An `image-set()`.
  ImageSet(ImageSet),
  /// A `cross-fade()`.
  CrossFade(CrossFade),
  /// An `element()`.
  Element(Element),
  /// A `paint()`.
  Paint(Paint),
  /// A `circle()` shape.
  Circle(Box<Circle>),
  /// An `ellipse()` shape.
  Ellipse(Box<Ellipse>),
  /// An `inset()` shape.
  Inset(Box<InsetRect>),
  /// A `rect()` shape.
  Rect(Box<RectShape>),
  /// A `xywh()` shape.
  Xywh(Box<Xywh>),
  /// A `polygon()` shape.
  Polygon(Polygon),
  /// A `path()` shape.
  Path(Path),
  /// A `minmax()` track size.
  MinMax(Box<MinMax>),
  /// A `repeat()` track list.
  Repeat(Repeat),
  /// A `fit-content()` track size.
  FitContent(FitContent),
  /// A `cubic-bezier()` easing function.
  CubicBezier(CubicBezier),
  /// A `steps()` easing function.
  Steps(Steps),
  /// A `linear()` easing function.
  Linear(Linear),
  /// A `counter()` function.
  Counter(Counter),
  /// A `counters()` function.
  Counters(Counters),
  /// A `symbols()` function.
  Symbols(Symbols),
  /// An `attr()` function.
  Attr(Attr),
  /// An `env()` function.
  Env(Env),
  /// A `var()` function.
  Var(Var),
  /// A `leader()` function.
  Leader(Leader),
  /// A `target-counter()` function.
  TargetCounter(TargetCounter),
  /// A `target-counters()` function.
  TargetCounters(TargetCounters),
  /// A `target-text()` function.
  TargetText(TargetText),
  /// A transform function such as `rotate()`.
  Transform(Transform),
  /// A filter function such as `blur()`.
  Filter(Filter),
  /// A math function such as `calc()`.
  Math(Box<MathFunction>),
  /// An `anchor-size()` function.
  AnchorSize(AnchorSize),
  /// The `add()` function of `math-depth`.
  Add(Add),
  /// An alternate glyph function such as `swash()`.
  AlternateGlyph(AlternateGlyph),
  /// A `view()` timeline.
  View(View),
  /// A `scroll()` timeline.
  Scroll(Scroll),
  /// A whole `<position>`. Parsed declaration values hold its components instead.
  Position(Box<Position>),
  /// A whole `<ratio>`. Parsed declaration values hold its components instead.
  Ratio(Ratio),
  /// A `,` or `/` separator, or the `[` and `]` around a list of line names.
  Delimiter(char),
}

enum_property! {
  /// The variant of a [Value](Value), without its data.
  pub enum ValueKind {
    "percentage": Percentage,
    "integer": Integer,
    "number": Number,
    "flex": Flex,
    "length": Length,
    "angle": Angle,
    "time": Time,
    "frequency": Frequency,
    "resolution": Resolution,
    "string": String,
    "keyword": Keyword,
    "dashed-ident": DashedIdent,
    "url": Url,
    "color": Color,
    "color-mix": ColorMix,
    "light-dark": LightDark,
    "device-cmyk": DeviceCmyk,
    "linear-gradient": LinearGradient,
    "radial-gradient": RadialGradient,
    "conic-gradient": ConicGradient,
    "image-set": ImageSet,
    "cross-fade": CrossFade,
    "element": Element,
    "paint": Paint,
    "circle": Circle,
    "ellipse": Ellipse,
    "inset": Inset,
    "rect": Rect,
    "xywh": Xywh,
    "polygon": Polygon,
    "path": Path,
    "minmax": MinMax,
    "repeat": Repeat,
    "fit-content": FitContent,
    "cubic-bezier": CubicBezier,
    "steps": Steps,
    "linear": Linear,
    "counter": Counter,
    "counters": Counters,
    "symbols": Symbols,
    "attr": Attr,
    "env": Env,
    "var": Var,
    "leader": Leader,
    "target-counter": TargetCounter,
    "target-counters": TargetCounters,
    "target-text": TargetText,
    "transform": Transform,
    "filter": Filter,
    "math": Math,
    "anchor-size": AnchorSize,
    "add": Add,
    "alternate-glyph": AlternateGlyph,
    "view": View,
    "scroll": Scroll,
    "position": Position,
    "ratio": Ratio,
    "delimiter": Delimiter,
  }
}

impl ValueKind {
  /// Every value kind, in declaration order.
  pub const ALL: &'static [ValueKind] = &[
    ValueKind::Percentage,
    ValueKind::Integer,
    ValueKind::Number,
    ValueKind::Flex,
    ValueKind::Length,
    ValueKind::Angle,
    ValueKind::Time,
    ValueKind::Frequency,
    ValueKind::Resolution,
    ValueKind::String,
    ValueKind::Keyword,
    ValueKind::DashedIdent,
    ValueKind::Url,
    ValueKind::Color,
    ValueKind::ColorMix,
    ValueKind::LightDark,
    ValueKind::DeviceCmyk,
    ValueKind::LinearGradient,
    ValueKind::RadialGradient,
    ValueKind::ConicGradient,
    ValueKind::ImageSet,
    ValueKind::CrossFade,
    ValueKind::Element,
    ValueKind::Paint,
    ValueKind::Circle,
    ValueKind::Ellipse,
    ValueKind::Inset,
    ValueKind::Rect,
    ValueKind::Xywh,
    ValueKind::Polygon,
    ValueKind::Path,
    ValueKind::MinMax,
    ValueKind::Repeat,
    ValueKind::FitContent,
    ValueKind::CubicBezier,
    ValueKind::Steps,
    ValueKind::Linear,
    ValueKind::Counter,
    ValueKind::Counters,
    ValueKind::Symbols,
    ValueKind::Attr,
    ValueKind::Env,
    ValueKind::Var,
    ValueKind::Leader,
    ValueKind::TargetCounter,
    ValueKind::TargetCounters,
    ValueKind::TargetText,
    ValueKind::Transform,
    ValueKind::Filter,
    ValueKind::Math,
    ValueKind::AnchorSize,
    ValueKind::Add,
    ValueKind::AlternateGlyph,
    ValueKind::View,
    ValueKind::Scroll,
    ValueKind::Position,
    ValueKind::Ratio,
    ValueKind::Delimiter,
  ];

  /// The CSS text of a representative value of this kind, used when offering
  /// a kind as a completion. Keywords have no representative value.
  pub fn default_css(&self) -> Option<&'static str> {
    use ValueKind::*;
    let css = match self {
      Percentage => "0%",
      Integer => "0",
      Number => "0.0",
      Flex => "1fr",
      Length => "0px",
      Angle => "0deg",
      Time => "0s",
      Frequency => "0hz",
      Resolution => "1x",
      String => "\"\"",
      Keyword => return None,
      DashedIdent => "--name",
      Url => "url(\"\")",
      Color => "currentcolor",
      ColorMix => "color-mix(in srgb, white, black)",
      LightDark => "light-dark(white, black)",
      DeviceCmyk => "device-cmyk(0 0 0 1)",
      LinearGradient => "linear-gradient(white, black)",
      RadialGradient => "radial-gradient(white, black)",
      ConicGradient => "conic-gradient(white, black)",
      ImageSet => "image-set(url(\"image.png\") 1x)",
      CrossFade => "cross-fade(url(\"a.png\"), url(\"b.png\"))",
      Element => "element(#id)",
      Paint => "paint(worklet)",
      Circle => "circle()",
      Ellipse => "ellipse()",
      Inset => "inset(0px)",
      Rect => "rect(auto auto auto auto)",
      Xywh => "xywh(0px 0px 100% 100%)",
      Polygon => "polygon(0px 0px)",
      Path => "path(\"M 0 0\")",
      MinMax => "minmax(auto, auto)",
      Repeat => "repeat(1, auto)",
      FitContent => "fit-content(100%)",
      CubicBezier => "cubic-bezier(.25, .1, .25, 1.0)",
      Steps => "steps(1)",
      Linear => "linear(0.0, 1.0)",
      Counter => "counter(name)",
      Counters => "counters(name, \".\")",
      Symbols => "symbols(\"*\")",
      Attr => "attr(name)",
      Env => "env(safe-area-inset-top)",
      Var => "var(--name)",
      Leader => "leader(dotted)",
      TargetCounter => "target-counter(url(\"#id\"), page)",
      TargetCounters => "target-counters(url(\"#id\"), page, \".\")",
      TargetText => "target-text(url(\"#id\"))",
      Transform => "translate(0px)",
      Filter => "blur(0px)",
      Math => "calc(0px)",
      AnchorSize => "anchor-size()",
      Add => "add(1)",
      AlternateGlyph => "stylistic(name)",
      View => "view()",
      Scroll => "scroll()",
      Position => "center",
      Ratio => "1 / 1",
      Delimiter => ",",
    };
    Some(css)
  }

  /// Returns a representative value of this kind.
  pub fn default_value(&self) -> Option<Value> {
    let css = self.default_css()?;
    match self.parse_value(css) {
      Ok(value) => Some(value),
      Err(err) => {
        log::warn!("Default value {} for {} does not parse: {}", css, self.as_str(), err);
        None
      }
    }
  }

  /// Parses a single value of this kind. Unlike [Value::parse](Value::parse), this reads a whole
  /// `<position>` or `<ratio>` into one value.
  pub fn parse_value<'i>(&self, css: &'i str) -> Result<Value, Error<ParserError<'i>>> {
    match self {
      ValueKind::Position => Position::parse_string(css).map(|p| Value::Position(Box::new(p))),
      ValueKind::Ratio => Ratio::parse_string(css).map(Value::Ratio),
      _ => Value::parse_string(css),
    }
  }

  /// Returns whether values of this kind stand for a whole named syntax rather than a single
  /// component value.
  pub fn is_composite(&self) -> bool {
    matches!(self, ValueKind::Position | ValueKind::Ratio)
  }
}

impl Serialize for ValueKind {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(self.as_str())
  }
}

type ParseFn = for<'i, 't> fn(&mut Parser<'i, 't>) -> Result<Value, ParseError<'i, ParserError<'i>>>;

/// An entry of the function table.
#[derive(Clone, Copy)]
struct FunctionEntry {
  kind: ValueKind,
  parse: ParseFn,
}

macro_rules! function_parser {
  ($fn_name: ident, $ty: ty, $wrap: expr) => {
    fn $fn_name<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Value, ParseError<'i, ParserError<'i>>> {
      <$ty>::parse(input).map($wrap)
    }
  };
}

function_parser!(parse_url, Url, Value::Url);
function_parser!(parse_color, CssColor, Value::Color);
function_parser!(parse_color_mix, ColorMix, |v| Value::ColorMix(Box::new(v)));
function_parser!(parse_light_dark, LightDark, |v| Value::LightDark(Box::new(v)));
function_parser!(parse_device_cmyk, DeviceCmyk, |v| Value::DeviceCmyk(Box::new(v)));
function_parser!(parse_linear_gradient, LinearGradient, |v| Value::LinearGradient(Box::new(v)));
function_parser!(parse_radial_gradient, RadialGradient, |v| Value::RadialGradient(Box::new(v)));
function_parser!(parse_conic_gradient, ConicGradient, |v| Value::ConicGradient(Box::new(v)));
function_parser!(parse_image_set, ImageSet, Value::ImageSet);
function_parser!(parse_cross_fade, CrossFade, Value::CrossFade);
function_parser!(parse_element, Element, Value::Element);
function_parser!(parse_paint, Paint, Value::Paint);
function_parser!(parse_circle, Circle, |v| Value::Circle(Box::new(v)));
function_parser!(parse_ellipse, Ellipse, |v| Value::Ellipse(Box::new(v)));
function_parser!(parse_inset, InsetRect, |v| Value::Inset(Box::new(v)));
function_parser!(parse_rect, RectShape, |v| Value::Rect(Box::new(v)));
function_parser!(parse_xywh, Xywh, |v| Value::Xywh(Box::new(v)));
function_parser!(parse_polygon, Polygon, Value::Polygon);
function_parser!(parse_path, Path, Value::Path);
function_parser!(parse_minmax, MinMax, |v| Value::MinMax(Box::new(v)));
function_parser!(parse_repeat, Repeat, Value::Repeat);
function_parser!(parse_fit_content, FitContent, Value::FitContent);
function_parser!(parse_cubic_bezier, CubicBezier, Value::CubicBezier);
function_parser!(parse_steps, Steps, Value::Steps);
function_parser!(parse_linear, Linear, Value::Linear);
function_parser!(parse_counter, Counter, Value::Counter);
function_parser!(parse_counters, Counters, Value::Counters);
function_parser!(parse_symbols, Symbols, Value::Symbols);
function_parser!(parse_attr, Attr, Value::Attr);
function_parser!(parse_env, Env, Value::Env);
function_parser!(parse_var, Var, Value::Var);
function_parser!(parse_leader, Leader, Value::Leader);
function_parser!(parse_target_counter, TargetCounter, Value::TargetCounter);
function_parser!(parse_target_counters, TargetCounters, Value::TargetCounters);
function_parser!(parse_target_text, TargetText, Value::TargetText);
function_parser!(parse_transform, Transform, Value::Transform);
function_parser!(parse_filter, Filter, Value::Filter);
function_parser!(parse_math, MathFunction, |v| Value::Math(Box::new(v)));
function_parser!(parse_anchor_size, AnchorSize, Value::AnchorSize);
function_parser!(parse_add, Add, Value::Add);
function_parser!(parse_alternate_glyph, AlternateGlyph, Value::AlternateGlyph);
function_parser!(parse_view, View, Value::View);
function_parser!(parse_scroll, Scroll, Value::Scroll);

fn register(map: &mut IndexMap<&'static str, FunctionEntry>, names: &[&'static str], kind: ValueKind, parse: ParseFn) {
  for name in names {
    map.insert(*name, FunctionEntry { kind, parse });
  }
}

lazy_static! {
  /// Every supported function, keyed by its lowercase name.
  static ref FUNCTIONS: IndexMap<&'static str, FunctionEntry> = {
    let mut map = IndexMap::new();
    register(&mut map, &["url"], ValueKind::Url, parse_url);
    register(
      &mut map,
      &["rgb", "rgba", "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "color"],
      ValueKind::Color,
      parse_color,
    );
    register(&mut map, &["color-mix"], ValueKind::ColorMix, parse_color_mix);
    register(&mut map, &["light-dark"], ValueKind::LightDark, parse_light_dark);
    register(&mut map, &["device-cmyk"], ValueKind::DeviceCmyk, parse_device_cmyk);
    register(
      &mut map,
      &["linear-gradient", "repeating-linear-gradient"],
      ValueKind::LinearGradient,
      parse_linear_gradient,
    );
    register(
      &mut map,
      &["radial-gradient", "repeating-radial-gradient"],
      ValueKind::RadialGradient,
      parse_radial_gradient,
    );
    register(
      &mut map,
      &["conic-gradient", "repeating-conic-gradient"],
      ValueKind::ConicGradient,
      parse_conic_gradient,
    );
    register(&mut map, &["image-set"], ValueKind::ImageSet, parse_image_set);
    register(&mut map, &["cross-fade"], ValueKind::CrossFade, parse_cross_fade);
    register(&mut map, &["element"], ValueKind::Element, parse_element);
    register(&mut map, &["paint"], ValueKind::Paint, parse_paint);
    register(&mut map, &["circle"], ValueKind::Circle, parse_circle);
    register(&mut map, &["ellipse"], ValueKind::Ellipse, parse_ellipse);
    register(&mut map, &["inset"], ValueKind::Inset, parse_inset);
    register(&mut map, &["rect"], ValueKind::Rect, parse_rect);
    register(&mut map, &["xywh"], ValueKind::Xywh, parse_xywh);
    register(&mut map, &["polygon"], ValueKind::Polygon, parse_polygon);
    register(&mut map, &["path"], ValueKind::Path, parse_path);
    register(&mut map, &["minmax"], ValueKind::MinMax, parse_minmax);
    register(&mut map, &["repeat"], ValueKind::Repeat, parse_repeat);
    register(&mut map, &["fit-content"], ValueKind::FitContent, parse_fit_content);
    register(&mut map, &["cubic-bezier"], ValueKind::CubicBezier, parse_cubic_bezier);
    register(&mut map, &["steps"], ValueKind::Steps, parse_steps);
    register(&mut map, &["linear"], ValueKind::Linear, parse_linear);
    register(&mut map, &["counter"], ValueKind::Counter, parse_counter);
    register(&mut map, &["counters"], ValueKind::Counters, parse_counters);
    register(&mut map, &["symbols"], ValueKind::Symbols, parse_symbols);
    register(&mut map, &["attr"], ValueKind::Attr, parse_attr);
    register(&mut map, &["env"], ValueKind::Env, parse_env);
    register(&mut map, &["var"], ValueKind::Var, parse_var);
    register(&mut map, &["leader"], ValueKind::Leader, parse_leader);
    register(&mut map, &["target-counter"], ValueKind::TargetCounter, parse_target_counter);
    register(&mut map, &["target-counters"], ValueKind::TargetCounters, parse_target_counters);
    register(&mut map, &["target-text"], ValueKind::TargetText, parse_target_text);
    register(
      &mut map,
      &[
        "translate", "translatex", "translatey", "translatez", "translate3d", "rotate", "rotatex", "rotatey",
        "rotatez", "rotate3d", "scale", "scalex", "scaley", "scalez", "scale3d", "skew", "skewx", "skewy",
        "matrix", "matrix3d", "perspective",
      ],
      ValueKind::Transform,
      parse_transform,
    );
    register(
      &mut map,
      &[
        "blur", "brightness", "contrast", "drop-shadow", "grayscale", "hue-rotate", "invert", "opacity",
        "saturate", "sepia",
      ],
      ValueKind::Filter,
      parse_filter,
    );
    register(
      &mut map,
      &[
        "calc", "min", "max", "clamp", "round", "mod", "rem", "sin", "cos", "tan", "asin", "acos", "atan",
        "atan2", "pow", "sqrt", "hypot", "log", "exp", "abs", "sign", "calc-size", "anchor",
      ],
      ValueKind::Math,
      parse_math,
    );
    register(&mut map, &["anchor-size"], ValueKind::AnchorSize, parse_anchor_size);
    register(&mut map, &["add"], ValueKind::Add, parse_add);
    register(
      &mut map,
      &["stylistic", "styleset", "character-variant", "swash", "ornament", "annotation"],
      ValueKind::AlternateGlyph,
      parse_alternate_glyph,
    );
    register(&mut map, &["view"], ValueKind::View, parse_view);
    register(&mut map, &["scroll"], ValueKind::Scroll, parse_scroll);
    map
  };
}

/// Returns the value kind produced by the function with the given name, if the
/// function is supported.
pub fn function_kind(name: &str) -> Option<ValueKind> {
  FUNCTIONS.get(name.to_ascii_lowercase().as_str()).map(|entry| entry.kind)
}

/// Returns the names of all supported functions.
pub fn function_names() -> impl Iterator<Item = &'static str> {
  FUNCTIONS.keys().copied()
}

impl<'i> Parse<'i> for Value {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let state = input.state();
    let token = input.next()?.clone();
    match token {
      Token::Number {
        int_value: Some(int), ..
      } => Ok(Value::Integer(int)),
      Token::Number { value, .. } => Ok(Value::Number(value)),
      Token::Percentage { unit_value, .. } => Ok(Value::Percentage(Percentage(unit_value))),
      Token::Dimension { ref unit, .. } => {
        if let Ok(length) = LengthValue::try_from(&token) {
          return Ok(Value::Length(length));
        }
        if let Ok(angle) = Angle::try_from(&token) {
          return Ok(Value::Angle(angle));
        }
        if let Ok(time) = Time::try_from(&token) {
          return Ok(Value::Time(time));
        }
        if let Ok(frequency) = Frequency::try_from(&token) {
          return Ok(Value::Frequency(frequency));
        }
        if let Ok(resolution) = Resolution::try_from(&token) {
          return Ok(Value::Resolution(resolution));
        }
        if let Ok(flex) = Flex::try_from(&token) {
          return Ok(Value::Flex(flex));
        }
        Err(location.new_custom_error(ParserError::UnknownUnit(unit.clone())))
      }
      Token::QuotedString(s) => Ok(Value::String(CSSString(s.as_ref().to_owned()))),
      Token::UnquotedUrl(url) => Ok(Value::Url(Url {
        url: url.as_ref().to_owned(),
      })),
      Token::Hash(_) | Token::IDHash(_) => {
        input.reset(&state);
        Ok(Value::Color(CssColor::parse(input)?))
      }
      Token::Ident(ref ident) if ident.starts_with("--") => Ok(Value::DashedIdent(DashedIdent(ident.as_ref().to_owned()))),
      Token::Ident(ref ident) if is_color_keyword(ident) => {
        input.reset(&state);
        Ok(Value::Color(CssColor::parse(input)?))
      }
      Token::Ident(ident) => Ok(Value::Keyword(Ident(ident.as_ref().to_owned()))),
      Token::Comma => Ok(Value::Delimiter(',')),
      Token::Delim('/') => Ok(Value::Delimiter('/')),
      Token::Function(ref name) => match FUNCTIONS.get(name.to_ascii_lowercase().as_str()) {
        Some(entry) => {
          input.reset(&state);
          parse_nested(input, entry.parse)
        }
        None => Err(location.new_custom_error(ParserError::UnknownFunction(name.clone()))),
      },
      t => Err(location.new_unexpected_token_error(t)),
    }
  }
}

/// Functions, brackets and math parentheses may nest at most this deep within one value.
pub const MAX_NESTING: usize = 128;

thread_local! {
  static NESTING: Cell<usize> = Cell::new(0);
}

/// Runs the parser of a function or block nested in the current one. Fails with an invalid value
/// error once nesting exceeds [MAX_NESTING](MAX_NESTING).
pub(crate) fn parse_nested<'i, 't, T, F>(input: &mut Parser<'i, 't>, parse: F) -> Result<T, ParseError<'i, ParserError<'i>>>
where
  F: FnOnce(&mut Parser<'i, 't>) -> Result<T, ParseError<'i, ParserError<'i>>>,
{
  let depth = NESTING.with(Cell::get);
  if depth >= MAX_NESTING {
    return Err(input.new_custom_error(ParserError::InvalidValue));
  }
  NESTING.with(|nesting| nesting.set(depth + 1));
  let result = parse(input);
  NESTING.with(|nesting| nesting.set(depth));
  result
}

/// Parses component values until the input is exhausted.
pub(crate) fn parse_values<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Vec<Value>, ParseError<'i, ParserError<'i>>> {
  let mut values = Vec::new();
  while !input.is_exhausted() {
    if input.try_parse(|input| input.expect_square_bracket_block()).is_ok() {
      values.push(Value::Delimiter('['));
      let inner = parse_nested(input, |input| input.parse_nested_block(parse_values))?;
      values.extend(inner);
      values.push(Value::Delimiter(']'));
      continue;
    }
    values.push(Value::parse(input)?);
  }
  Ok(values)
}

/// Parses a declaration value into a list of component values.
pub fn parse_list<'i>(text: &'i str) -> Result<Vec<Value>, Error<ParserError<'i>>> {
  let mut input = ParserInput::new(text);
  let mut parser = Parser::new(&mut input);
  parser.parse_entirely(parse_values).map_err(Error::from)
}

/// Serializes a list of component values with canonical spacing.
pub(crate) fn values_to_css<W>(values: &[Value], dest: &mut Printer<W>) -> Result<(), PrinterError>
where
  W: std::fmt::Write,
{
  let mut needs_space = false;
  for value in values {
    match value {
      Value::Delimiter(',') => {
        dest.delim(',', false)?;
        needs_space = false;
      }
      Value::Delimiter('/') => {
        dest.delim('/', true)?;
        needs_space = false;
      }
      Value::Delimiter('[') => {
        if needs_space {
          dest.write_char(' ')?;
        }
        dest.write_char('[')?;
        needs_space = false;
      }
      Value::Delimiter(']') => {
        dest.write_char(']')?;
        needs_space = true;
      }
      value => {
        if needs_space {
          dest.write_char(' ')?;
        }
        value.to_css(dest)?;
        needs_space = true;
      }
    }
  }
  Ok(())
}

/// Serializes a list of component values to a string.
pub fn list_to_css_string(values: &[Value], options: crate::printer::PrinterOptions) -> Result<String, PrinterError> {
  let mut s = String::new();
  let mut printer = Printer::new(&mut s, options);
  values_to_css(values, &mut printer)?;
  Ok(s)
}

impl Value {
  /// Returns the kind of this value.
  pub fn kind(&self) -> ValueKind {
    match self {
      Value::Percentage(_) => ValueKind::Percentage,
      Value::Integer(_) => ValueKind::Integer,
      Value::Number(_) => ValueKind::Number,
      Value::Flex(_) => ValueKind::Flex,
      Value::Length(_) => ValueKind::Length,
      Value::Angle(_) => ValueKind::Angle,
      Value::Time(_) => ValueKind::Time,
      Value::Frequency(_) => ValueKind::Frequency,
      Value::Resolution(_) => ValueKind::Resolution,
      Value::String(_) => ValueKind::String,
      Value::Keyword(_) => ValueKind::Keyword,
      Value::DashedIdent(_) => ValueKind::DashedIdent,
      Value::Url(_) => ValueKind::Url,
      Value::Color(_) => ValueKind::Color,
      Value::ColorMix(_) => ValueKind::ColorMix,
      Value::LightDark(_) => ValueKind::LightDark,
      Value::DeviceCmyk(_) => ValueKind::DeviceCmyk,
      Value::LinearGradient(_) => ValueKind::LinearGradient,
      Value::RadialGradient(_) => ValueKind::RadialGradient,
      Value::ConicGradient(_) => ValueKind::ConicGradient,
      Value::ImageSet(_) => ValueKind::ImageSet,
      Value::CrossFade(_) => ValueKind::CrossFade,
      Value::Element(_) => ValueKind::Element,
      Value::Paint(_) => ValueKind::Paint,
      Value::Circle(_) => ValueKind::Circle,
      Value::Ellipse(_) => ValueKind::Ellipse,
      Value::Inset(_) => ValueKind::Inset,
      Value::Rect(_) => ValueKind::Rect,
      Value::Xywh(_) => ValueKind::Xywh,
      Value::Polygon(_) => ValueKind::Polygon,
      Value::Path(_) => ValueKind::Path,
      Value::MinMax(_) => ValueKind::MinMax,
      Value::Repeat(_) => ValueKind::Repeat,
      Value::FitContent(_) => ValueKind::FitContent,
      Value::CubicBezier(_) => ValueKind::CubicBezier,
      Value::Steps(_) => ValueKind::Steps,
      Value::Linear(_) => ValueKind::Linear,
      Value::Counter(_) => ValueKind::Counter,
      Value::Counters(_) => ValueKind::Counters,
      Value::Symbols(_) => ValueKind::Symbols,
      Value::Attr(_) => ValueKind::Attr,
      Value::Env(_) => ValueKind::Env,
      Value::Var(_) => ValueKind::Var,
      Value::Leader(_) => ValueKind::Leader,
      Value::TargetCounter(_) => ValueKind::TargetCounter,
      Value::TargetCounters(_) => ValueKind::TargetCounters,
      Value::TargetText(_) => ValueKind::TargetText,
      Value::Transform(_) => ValueKind::Transform,
      Value::Filter(_) => ValueKind::Filter,
      Value::Math(_) => ValueKind::Math,
      Value::AnchorSize(_) => ValueKind::AnchorSize,
      Value::Add(_) => ValueKind::Add,
      Value::AlternateGlyph(_) => ValueKind::AlternateGlyph,
      Value::View(_) => ValueKind::View,
      Value::Scroll(_) => ValueKind::Scroll,
      Value::Position(_) => ValueKind::Position,
      Value::Ratio(_) => ValueKind::Ratio,
      Value::Delimiter(_) => ValueKind::Delimiter,
    }
  }

  /// Returns the identifier of a keyword, including color keywords, as written.
  pub fn as_ident(&self) -> Option<&str> {
    match self {
      Value::Keyword(ident) => Some(&ident.0),
      Value::Color(color) => color.as_keyword(),
      _ => None,
    }
  }

  /// Returns the name of the function this value was written with, for functional values.
  pub fn function_name(&self) -> Option<&str> {
    let name = match self {
      Value::Url(_) => "url",
      Value::Color(color) => return color.function_name(),
      Value::ColorMix(_) => "color-mix",
      Value::LightDark(_) => "light-dark",
      Value::DeviceCmyk(_) => "device-cmyk",
      Value::LinearGradient(g) if g.repeating => "repeating-linear-gradient",
      Value::LinearGradient(_) => "linear-gradient",
      Value::RadialGradient(g) if g.repeating => "repeating-radial-gradient",
      Value::RadialGradient(_) => "radial-gradient",
      Value::ConicGradient(g) if g.repeating => "repeating-conic-gradient",
      Value::ConicGradient(_) => "conic-gradient",
      Value::ImageSet(_) => "image-set",
      Value::CrossFade(_) => "cross-fade",
      Value::Element(_) => "element",
      Value::Paint(_) => "paint",
      Value::Circle(_) => "circle",
      Value::Ellipse(_) => "ellipse",
      Value::Inset(_) => "inset",
      Value::Rect(_) => "rect",
      Value::Xywh(_) => "xywh",
      Value::Polygon(_) => "polygon",
      Value::Path(_) => "path",
      Value::MinMax(_) => "minmax",
      Value::Repeat(_) => "repeat",
      Value::FitContent(_) => "fit-content",
      Value::CubicBezier(_) => "cubic-bezier",
      Value::Steps(_) => "steps",
      Value::Linear(_) => "linear",
      Value::Counter(_) => "counter",
      Value::Counters(_) => "counters",
      Value::Symbols(_) => "symbols",
      Value::Attr(_) => "attr",
      Value::Env(_) => "env",
      Value::Var(_) => "var",
      Value::Leader(_) => "leader",
      Value::TargetCounter(_) => "target-counter",
      Value::TargetCounters(_) => "target-counters",
      Value::TargetText(_) => "target-text",
      Value::Transform(t) => t.name.as_str(),
      Value::Filter(f) => f.name.as_str(),
      Value::Math(m) => m.name.as_str(),
      Value::AnchorSize(_) => "anchor-size",
      Value::Add(_) => "add",
      Value::AlternateGlyph(g) => g.function.as_str(),
      Value::View(_) => "view",
      Value::Scroll(_) => "scroll",
      _ => return None,
    };
    Some(name)
  }

  /// Returns whether this value is a call of the named function. Legacy color
  /// aliases such as `rgba()` match their modern counterpart.
  pub fn matches_function(&self, name: &str) -> bool {
    if let Value::Color(CssColor::Function(f)) = self {
      return ColorSpace::from_function_name(name) == Some(f.space);
    }
    match self.function_name() {
      Some(n) => n.eq_ignore_ascii_case(name),
      None => false,
    }
  }

  /// Returns whether this value is a `,` delimiter.
  pub fn is_comma(&self) -> bool {
    matches!(self, Value::Delimiter(','))
  }
}

impl ToCss for Value {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      Value::Percentage(v) => v.to_css(dest),
      Value::Integer(v) => v.to_css(dest),
      Value::Number(v) => v.to_css(dest),
      Value::Flex(v) => v.to_css(dest),
      Value::Length(v) => v.to_css(dest),
      Value::Angle(v) => v.to_css(dest),
      Value::Time(v) => v.to_css(dest),
      Value::Frequency(v) => v.to_css(dest),
      Value::Resolution(v) => v.to_css(dest),
      Value::String(v) => v.to_css(dest),
      Value::Keyword(v) => v.to_css(dest),
      Value::DashedIdent(v) => v.to_css(dest),
      Value::Url(v) => v.to_css(dest),
      Value::Color(v) => v.to_css(dest),
      Value::ColorMix(v) => v.to_css(dest),
      Value::LightDark(v) => v.to_css(dest),
      Value::DeviceCmyk(v) => v.to_css(dest),
      Value::LinearGradient(v) => v.to_css(dest),
      Value::RadialGradient(v) => v.to_css(dest),
      Value::ConicGradient(v) => v.to_css(dest),
      Value::ImageSet(v) => v.to_css(dest),
      Value::CrossFade(v) => v.to_css(dest),
      Value::Element(v) => v.to_css(dest),
      Value::Paint(v) => v.to_css(dest),
      Value::Circle(v) => v.to_css(dest),
      Value::Ellipse(v) => v.to_css(dest),
      Value::Inset(v) => v.to_css(dest),
      Value::Rect(v) => v.to_css(dest),
      Value::Xywh(v) => v.to_css(dest),
      Value::Polygon(v) => v.to_css(dest),
      Value::Path(v) => v.to_css(dest),
      Value::MinMax(v) => v.to_css(dest),
      Value::Repeat(v) => v.to_css(dest),
      Value::FitContent(v) => v.to_css(dest),
      Value::CubicBezier(v) => v.to_css(dest),
      Value::Steps(v) => v.to_css(dest),
      Value::Linear(v) => v.to_css(dest),
      Value::Counter(v) => v.to_css(dest),
      Value::Counters(v) => v.to_css(dest),
      Value::Symbols(v) => v.to_css(dest),
      Value::Attr(v) => v.to_css(dest),
      Value::Env(v) => v.to_css(dest),
      Value::Var(v) => v.to_css(dest),
      Value::Leader(v) => v.to_css(dest),
      Value::TargetCounter(v) => v.to_css(dest),
      Value::TargetCounters(v) => v.to_css(dest),
      Value::TargetText(v) => v.to_css(dest),
      Value::Transform(v) => v.to_css(dest),
      Value::Filter(v) => v.to_css(dest),
      Value::Math(v) => v.to_css(dest),
      Value::AnchorSize(v) => v.to_css(dest),
      Value::Add(v) => v.to_css(dest),
      Value::AlternateGlyph(v) => v.to_css(dest),
      Value::View(v) => v.to_css(dest),
      Value::Scroll(v) => v.to_css(dest),
      Value::Position(v) => v.to_css(dest),
      Value::Ratio(v) => v.to_css(dest),
      Value::Delimiter(c) => dest.write_char(*c),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;
  use pretty_assertions::assert_eq;

  fn kinds(text: &str) -> Vec<ValueKind> {
    parse_list(text).unwrap().iter().map(|v| v.kind()).collect()
  }

  fn round_trip(text: &str, expected: &str) {
    let values = parse_list(text).unwrap();
    let css = list_to_css_string(&values, PrinterOptions::default()).unwrap();
    assert_eq!(css, expected);
    assert_eq!(parse_list(&css).unwrap(), values);
  }

  #[test]
  fn test_token_dispatch() {
    use ValueKind::*;
    assert_eq!(kinds("1 1.5 50% 2fr 10px 90deg 2s 1khz 2dppx"), vec![
      Integer, Number, Percentage, Flex, Length, Angle, Time, Frequency, Resolution
    ]);
    assert_eq!(kinds("'a' auto --x red #fff url(a.png)"), vec![
      String, Keyword, DashedIdent, Color, Color, Url
    ]);
    assert_eq!(kinds("a, b / c"), vec![Keyword, Delimiter, Keyword, Delimiter, Keyword]);
    assert_eq!(kinds("[a b] 1fr"), vec![Delimiter, Keyword, Keyword, Delimiter, Flex]);
  }

  #[test]
  fn test_function_dispatch() {
    use ValueKind::*;
    assert_eq!(kinds("rgba(0 0 0 / 50%) translateX(1px) calc(1px + 2%)"), vec![Color, Transform, Math]);
    assert_eq!(kinds("repeating-linear-gradient(red, blue 10%)"), vec![LinearGradient]);
    assert_eq!(kinds("var(--a, 1px) env(safe-area-inset-top)"), vec![Var, Env]);
    assert_eq!(function_kind("SATURATE"), Some(Filter));
    assert_eq!(function_kind("nope"), None);
  }

  #[test]
  fn test_errors() {
    let err = parse_list("mystery(1px)").unwrap_err();
    assert_eq!(err.kind, ParserError::UnknownFunction("mystery".into()));
    let err = parse_list("10parsecs").unwrap_err();
    assert_eq!(err.kind, ParserError::UnknownUnit("parsecs".into()));
    assert!(parse_list("1px !").is_err());
  }

  #[test]
  fn test_serialization() {
    round_trip("1px  solid   red", "1px solid red");
    round_trip("a,b , c", "a, b, c");
    round_trip("1/2", "1 / 2");
    round_trip("[ first ] 10px [second]", "[first] 10px [second]");
    round_trip("0 1.0 .5", "0 1.0 .5");

    let values = parse_list("a, b / c").unwrap();
    let css = list_to_css_string(&values, PrinterOptions { minify: true }).unwrap();
    assert_eq!(css, "a,b/c");
  }

  #[test]
  fn test_function_names() {
    let value = Value::parse_string("rgba(0, 0, 0, .5)").unwrap();
    assert!(value.matches_function("rgb"));
    assert!(value.matches_function("RGBA"));
    assert!(!value.matches_function("hsl"));
    let value = Value::parse_string("repeating-radial-gradient(red, blue)").unwrap();
    assert_eq!(value.function_name(), Some("repeating-radial-gradient"));
    assert_eq!(Value::parse_string("rotatez(1deg)").unwrap().function_name(), Some("rotateZ"));
    assert_eq!(Value::parse_string("auto").unwrap().function_name(), None);
  }

  #[test]
  fn test_default_values() {
    for kind in ValueKind::ALL {
      let value = match kind.default_value() {
        Some(value) => value,
        None => {
          assert_eq!(*kind, ValueKind::Keyword);
          continue;
        }
      };
      assert_eq!(value.kind(), *kind, "default of {}", kind.as_str());
      let css = value.to_css_string(PrinterOptions::default()).unwrap();
      assert_eq!(kind.parse_value(&css).unwrap(), value, "{} reparsed from {}", kind.as_str(), css);
    }
    assert_eq!(
      ValueKind::Position.default_value(),
      Some(Value::Position(Box::new(Position::center())))
    );
    assert_eq!(ValueKind::Ratio.default_value(), Some(Value::Ratio(Ratio(1.0, 1.0))));
  }

  #[test]
  fn test_as_ident() {
    assert_eq!(Value::parse_string("Auto").unwrap().as_ident(), Some("Auto"));
    assert_eq!(Value::parse_string("RED").unwrap().as_ident(), Some("red"));
    assert_eq!(Value::parse_string("10px").unwrap().as_ident(), None);
  }
}
