//! CSS color values.

use super::angle::Angle;
use super::calc::MathFunction;
use super::number::{serialize_number, CSSNumber};
use super::percentage::{NumberOrPercentage, Percentage};
use super::value::parse_nested;
use crate::error::{ParserError, PrinterError};
use crate::macros::enum_property;
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;
use smallvec::SmallVec;
use std::fmt::Write;

/// A CSS [`<color>`](https://www.w3.org/TR/css-color-4/#color-type) value.
///
/// Mixing functions (`color-mix()`, `light-dark()`) and `device-cmyk()` are separate
/// value types; see [AnyColor](AnyColor) for a color that may be any of them.
#[derive(Debug, Clone, PartialEq)]
pub enum CssColor {
  /// The [`currentcolor`](https://www.w3.org/TR/css-color-4/#currentcolor-color) keyword.
  CurrentColor,
  /// A [named color](https://www.w3.org/TR/css-color-4/#named-colors), or `transparent`.
  /// Stored in lowercase.
  Named(String),
  /// A [system color](https://www.w3.org/TR/css-color-4/#css-system-colors) keyword,
  /// including the deprecated ones. Stored in its canonical case.
  System(String),
  /// A [hex color](https://www.w3.org/TR/css-color-4/#hex-notation).
  Hex(RGBA),
  /// A functional notation, e.g. `rgb()`, `oklch()` or `color()`.
  Function(ColorFunction),
}

/// An sRGB color with 8 bit channels, as written in hex notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBA {
  /// The red channel.
  pub red: u8,
  /// The green channel.
  pub green: u8,
  /// The blue channel.
  pub blue: u8,
  /// The alpha channel.
  pub alpha: u8,
}

/// The system colors defined by CSS Color 4.
pub const SYSTEM_COLORS: [&str; 19] = [
  "AccentColor",
  "AccentColorText",
  "ActiveText",
  "ButtonBorder",
  "ButtonFace",
  "ButtonText",
  "Canvas",
  "CanvasText",
  "Field",
  "FieldText",
  "GrayText",
  "Highlight",
  "HighlightText",
  "LinkText",
  "Mark",
  "MarkText",
  "SelectedItem",
  "SelectedItemText",
  "VisitedText",
];

/// The deprecated system colors, still valid in `<color>`.
pub const DEPRECATED_SYSTEM_COLORS: [&str; 23] = [
  "ActiveBorder",
  "ActiveCaption",
  "AppWorkspace",
  "Background",
  "ButtonHighlight",
  "ButtonShadow",
  "CaptionText",
  "InactiveBorder",
  "InactiveCaption",
  "InactiveCaptionText",
  "InfoBackground",
  "InfoText",
  "Menu",
  "MenuText",
  "Scrollbar",
  "ThreeDDarkShadow",
  "ThreeDFace",
  "ThreeDHighlight",
  "ThreeDLightShadow",
  "ThreeDShadow",
  "Window",
  "WindowFrame",
  "WindowText",
];

/// The named colors defined by CSS Color 4.
pub const NAMED_COLORS: [&str; 148] = [
  "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black", "blanchedalmond",
  "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse", "chocolate", "coral",
  "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue", "darkcyan", "darkgoldenrod", "darkgray",
  "darkgreen", "darkgrey", "darkkhaki", "darkmagenta", "darkolivegreen", "darkorange", "darkorchid",
  "darkred", "darksalmon", "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey",
  "darkturquoise", "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue",
  "firebrick", "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
  "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki",
  "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
  "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink", "lightsalmon",
  "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue", "lightyellow",
  "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine", "mediumblue", "mediumorchid",
  "mediumpurple", "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
  "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite", "navy",
  "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod", "palegreen",
  "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue",
  "purple", "rebeccapurple", "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown",
  "seagreen", "seashell", "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow",
  "springgreen", "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white",
  "whitesmoke", "yellow", "yellowgreen",
];

/// Returns whether the identifier is a color keyword: a named color, a system color,
/// `transparent` or `currentcolor`.
pub fn is_color_keyword(ident: &str) -> bool {
  lookup_named_color(ident).is_some() || lookup_system_color(ident).is_some() || ident.eq_ignore_ascii_case("currentcolor")
}

fn lookup_named_color(ident: &str) -> Option<&'static str> {
  if ident.eq_ignore_ascii_case("transparent") {
    return Some("transparent");
  }
  NAMED_COLORS.iter().copied().find(|c| c.eq_ignore_ascii_case(ident))
}

fn lookup_system_color(ident: &str) -> Option<&'static str> {
  SYSTEM_COLORS
    .iter()
    .chain(DEPRECATED_SYSTEM_COLORS.iter())
    .copied()
    .find(|c| c.eq_ignore_ascii_case(ident))
}

impl CssColor {
  /// Returns the keyword of a keyword color.
  pub fn as_keyword(&self) -> Option<&str> {
    match self {
      CssColor::CurrentColor => Some("currentcolor"),
      CssColor::Named(name) | CssColor::System(name) => Some(name),
      _ => None,
    }
  }

  /// Returns the name of the function for functional notations.
  pub fn function_name(&self) -> Option<&str> {
    match self {
      CssColor::Function(f) => Some(f.space.as_str()),
      _ => None,
    }
  }
}

impl<'i> Parse<'i> for CssColor {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let token = input.next()?;
    match *token {
      Token::Hash(ref value) | Token::IDHash(ref value) => match RGBA::parse_hash(value.as_bytes()) {
        Ok(rgba) => Ok(CssColor::Hex(rgba)),
        Err(()) => Err(location.new_unexpected_token_error(token.clone())),
      },
      Token::Ident(ref ident) => {
        if ident.eq_ignore_ascii_case("currentcolor") {
          return Ok(CssColor::CurrentColor);
        }
        if let Some(name) = lookup_named_color(ident) {
          return Ok(CssColor::Named(name.to_owned()));
        }
        if let Some(name) = lookup_system_color(ident) {
          return Ok(CssColor::System(name.to_owned()));
        }
        Err(location.new_unexpected_token_error(token.clone()))
      }
      Token::Function(ref name) => {
        let space = match ColorSpace::from_function_name(name) {
          Some(space) => space,
          None => return Err(location.new_unexpected_token_error(token.clone())),
        };
        input.parse_nested_block(|input| {
          let f = ColorFunction::parse_arguments(space, input)?;
          Ok(CssColor::Function(f))
        })
      }
      ref t => Err(location.new_unexpected_token_error(t.clone())),
    }
  }
}

impl ToCss for CssColor {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      CssColor::CurrentColor => dest.write_str("currentcolor"),
      CssColor::Named(name) | CssColor::System(name) => dest.write_str(name),
      CssColor::Hex(rgba) => rgba.to_css(dest),
      CssColor::Function(f) => f.to_css(dest),
    }
  }
}

impl RGBA {
  fn parse_hash(value: &[u8]) -> Result<RGBA, ()> {
    fn hex(c: u8) -> Result<u8, ()> {
      match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(()),
      }
    }

    let pair = |i: usize| -> Result<u8, ()> { Ok(hex(value[i])? * 16 + hex(value[i + 1])?) };
    let single = |i: usize| -> Result<u8, ()> { Ok(hex(value[i])? * 17) };
    match value.len() {
      8 => Ok(RGBA { red: pair(0)?, green: pair(2)?, blue: pair(4)?, alpha: pair(6)? }),
      6 => Ok(RGBA { red: pair(0)?, green: pair(2)?, blue: pair(4)?, alpha: 255 }),
      4 => Ok(RGBA { red: single(0)?, green: single(1)?, blue: single(2)?, alpha: single(3)? }),
      3 => Ok(RGBA { red: single(0)?, green: single(1)?, blue: single(2)?, alpha: 255 }),
      _ => Err(()),
    }
  }
}

impl ToCss for RGBA {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    let compact = |c: u8| c % 17 == 0;
    let channels = [self.red, self.green, self.blue, self.alpha];
    let len = if self.alpha == 255 { 3 } else { 4 };
    dest.write_char('#')?;
    if channels[..len].iter().all(|c| compact(*c)) {
      for c in &channels[..len] {
        write!(dest, "{:x}", c / 17)?;
      }
    } else {
      for c in &channels[..len] {
        write!(dest, "{:02x}", c)?;
      }
    }
    Ok(())
  }
}

enum_property! {
  /// The color space, or notation, of a functional color.
  pub enum ColorSpace {
    "rgb": Rgb,
    "hsl": Hsl,
    "hwb": Hwb,
    "lab": Lab,
    "lch": Lch,
    "oklab": Oklab,
    "oklch": Oklch,
    "color": Color,
  }
}

impl ColorSpace {
  /// Maps a function name to its color space. The legacy `rgba()` and `hsla()`
  /// aliases map to `rgb` and `hsl`.
  pub fn from_function_name(name: &str) -> Option<ColorSpace> {
    match_ignore_ascii_case! { name,
      "rgba" => Some(ColorSpace::Rgb),
      "hsla" => Some(ColorSpace::Hsl),
      _ => ColorSpace::from_str(name),
    }
  }
}

/// One channel of a functional color.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorChannel {
  /// A plain number.
  Number(CSSNumber),
  /// A percentage.
  Percentage(Percentage),
  /// A hue angle.
  Angle(Angle),
  /// The `none` keyword, or a channel keyword of relative color syntax such as `r`.
  Keyword(String),
  /// A math function.
  Calc(Box<MathFunction>),
}

impl<'i> Parse<'i> for ColorChannel {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    if let Ok(calc) = input.try_parse(MathFunction::parse) {
      return Ok(ColorChannel::Calc(Box::new(calc)));
    }

    if let Ok(angle) = input.try_parse(Angle::parse) {
      return Ok(ColorChannel::Angle(angle));
    }

    let location = input.current_source_location();
    match *input.next()? {
      Token::Number { value, .. } => Ok(ColorChannel::Number(value)),
      Token::Percentage { unit_value, .. } => Ok(ColorChannel::Percentage(Percentage(unit_value))),
      Token::Ident(ref ident) => Ok(ColorChannel::Keyword(ident.as_ref().to_ascii_lowercase())),
      ref t => Err(location.new_unexpected_token_error(t.clone())),
    }
  }
}

impl ToCss for ColorChannel {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      ColorChannel::Number(n) => serialize_number(*n, n.fract() == 0.0, dest),
      ColorChannel::Percentage(p) => p.to_css(dest),
      ColorChannel::Angle(a) => a.to_css(dest),
      ColorChannel::Keyword(k) => dest.write_ident(k),
      ColorChannel::Calc(c) => c.to_css(dest),
    }
  }
}

/// A functional color notation, e.g. `rgb(255 0 0 / 50%)` or `color(display-p3 1 0 0)`.
///
/// Both the legacy comma syntax and the modern space syntax are accepted. Colors are
/// always serialized using the modern syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorFunction {
  /// The color space.
  pub space: ColorSpace,
  /// For `color()`, the predefined color space name, e.g. `display-p3`.
  pub predefined: Option<String>,
  /// The origin color of a relative color, i.e. `rgb(from red r g b)`.
  pub origin: Option<Box<AnyColor>>,
  /// The color channels.
  pub channels: SmallVec<[ColorChannel; 3]>,
  /// The alpha channel.
  pub alpha: Option<ColorChannel>,
}

impl ColorFunction {
  fn parse_arguments<'i, 't>(
    space: ColorSpace,
    input: &mut Parser<'i, 't>,
  ) -> Result<ColorFunction, ParseError<'i, ParserError<'i>>> {
    let origin = if input.try_parse(|input| input.expect_ident_matching("from")).is_ok() {
      Some(Box::new(AnyColor::parse(input)?))
    } else {
      None
    };

    let predefined = if space == ColorSpace::Color {
      Some(input.expect_ident()?.as_ref().to_ascii_lowercase())
    } else {
      None
    };

    let mut channels = SmallVec::new();
    let mut alpha = None;
    let mut legacy = false;
    loop {
      if input.is_exhausted() {
        break;
      }

      if !channels.is_empty() && input.try_parse(|input| input.expect_delim('/')).is_ok() {
        alpha = Some(ColorChannel::parse(input)?);
        break;
      }

      if !channels.is_empty() && (legacy || channels.len() == 1) {
        if input.try_parse(|input| input.expect_comma()).is_ok() {
          legacy = true;
          if channels.len() == 3 {
            alpha = Some(ColorChannel::parse(input)?);
            break;
          }
        } else if legacy {
          return Err(input.new_custom_error(ParserError::InvalidValue));
        }
      }

      channels.push(ColorChannel::parse(input)?);
    }

    if channels.len() < 3 {
      return Err(input.new_custom_error(ParserError::InvalidValue));
    }

    Ok(ColorFunction {
      space,
      predefined,
      origin,
      channels,
      alpha,
    })
  }
}

impl ToCss for ColorFunction {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    self.space.to_css(dest)?;
    dest.write_char('(')?;
    let mut needs_space = false;
    if let Some(origin) = &self.origin {
      dest.write_str("from ")?;
      origin.to_css(dest)?;
      needs_space = true;
    }
    if let Some(predefined) = &self.predefined {
      if needs_space {
        dest.write_char(' ')?;
      }
      dest.write_ident(predefined)?;
      needs_space = true;
    }
    for channel in &self.channels {
      if needs_space {
        dest.write_char(' ')?;
      }
      channel.to_css(dest)?;
      needs_space = true;
    }
    if let Some(alpha) = &self.alpha {
      dest.delim('/', true)?;
      alpha.to_css(dest)?;
    }
    dest.write_char(')')
  }
}

/// A [`color-mix()`](https://www.w3.org/TR/css-color-5/#color-mix) function.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMix {
  /// The interpolation method: a color space optionally followed by a hue
  /// interpolation method, e.g. `["hsl", "longer", "hue"]`.
  pub interpolation: Vec<String>,
  /// The first color and its optional percentage.
  pub first: (AnyColor, Option<Percentage>),
  /// The second color and its optional percentage.
  pub second: (AnyColor, Option<Percentage>),
}

impl<'i> Parse<'i> for ColorMix {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("color-mix")?;
    input.parse_nested_block(|input| {
      input.expect_ident_matching("in")?;
      let mut interpolation = vec![input.expect_ident()?.as_ref().to_ascii_lowercase()];
      while let Ok(ident) = input.try_parse(|input| input.expect_ident().map(|i| i.as_ref().to_ascii_lowercase())) {
        interpolation.push(ident);
      }
      input.expect_comma()?;
      let first = parse_mix_component(input)?;
      input.expect_comma()?;
      let second = parse_mix_component(input)?;
      Ok(ColorMix {
        interpolation,
        first,
        second,
      })
    })
  }
}

fn parse_mix_component<'i, 't>(
  input: &mut Parser<'i, 't>,
) -> Result<(AnyColor, Option<Percentage>), ParseError<'i, ParserError<'i>>> {
  let before = input.try_parse(Percentage::parse).ok();
  let color = AnyColor::parse(input)?;
  let percentage = match before {
    Some(p) => Some(p),
    None => input.try_parse(Percentage::parse).ok(),
  };
  Ok((color, percentage))
}

impl ToCss for ColorMix {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("color-mix(in")?;
    for ident in &self.interpolation {
      dest.write_char(' ')?;
      dest.write_ident(ident)?;
    }
    for (color, percentage) in [&self.first, &self.second] {
      dest.delim(',', false)?;
      color.to_css(dest)?;
      if let Some(p) = percentage {
        dest.write_char(' ')?;
        p.to_css(dest)?;
      }
    }
    dest.write_char(')')
  }
}

/// A [`light-dark()`](https://drafts.csswg.org/css-color-5/#light-dark) function.
#[derive(Debug, Clone, PartialEq)]
pub struct LightDark {
  /// The color used in light mode.
  pub light: AnyColor,
  /// The color used in dark mode.
  pub dark: AnyColor,
}

impl<'i> Parse<'i> for LightDark {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("light-dark")?;
    input.parse_nested_block(|input| {
      let light = AnyColor::parse(input)?;
      input.expect_comma()?;
      let dark = AnyColor::parse(input)?;
      Ok(LightDark { light, dark })
    })
  }
}

impl ToCss for LightDark {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("light-dark(")?;
    self.light.to_css(dest)?;
    dest.delim(',', false)?;
    self.dark.to_css(dest)?;
    dest.write_char(')')
  }
}

/// A [`device-cmyk()`](https://www.w3.org/TR/css-color-5/#device-cmyk) function.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceCmyk {
  /// The cyan, magenta, yellow and black channels.
  pub channels: [NumberOrPercentage; 4],
  /// The alpha channel.
  pub alpha: Option<NumberOrPercentage>,
  /// The fallback color.
  pub fallback: Option<Box<AnyColor>>,
}

impl<'i> Parse<'i> for DeviceCmyk {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("device-cmyk")?;
    input.parse_nested_block(|input| {
      let c = NumberOrPercentage::parse(input)?;
      let legacy = input.try_parse(|input| input.expect_comma()).is_ok();
      let mut rest = SmallVec::<[NumberOrPercentage; 3]>::new();
      for i in 0..3 {
        if legacy && i > 0 {
          input.expect_comma()?;
        }
        rest.push(NumberOrPercentage::parse(input)?);
      }
      let alpha = if legacy {
        None
      } else if input.try_parse(|input| input.expect_delim('/')).is_ok() {
        Some(NumberOrPercentage::parse(input)?)
      } else {
        None
      };
      let fallback = if input.try_parse(|input| input.expect_comma()).is_ok() {
        Some(Box::new(AnyColor::parse(input)?))
      } else {
        None
      };
      Ok(DeviceCmyk {
        channels: [c, rest[0], rest[1], rest[2]],
        alpha,
        fallback,
      })
    })
  }
}

impl ToCss for DeviceCmyk {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("device-cmyk(")?;
    let mut first = true;
    for channel in &self.channels {
      if !first {
        dest.write_char(' ')?;
      }
      first = false;
      channel.to_css(dest)?;
    }
    if let Some(alpha) = &self.alpha {
      dest.delim('/', true)?;
      alpha.to_css(dest)?;
    }
    if let Some(fallback) = &self.fallback {
      dest.delim(',', false)?;
      fallback.to_css(dest)?;
    }
    dest.write_char(')')
  }
}

/// Any color value: a plain color, or one of the mixing functions.
///
/// Used wherever a color appears as a component of another value, such as a gradient stop.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyColor {
  /// A plain color.
  Color(CssColor),
  /// A `color-mix()` function.
  Mix(Box<ColorMix>),
  /// A `light-dark()` function.
  LightDark(Box<LightDark>),
  /// A `device-cmyk()` function.
  DeviceCmyk(Box<DeviceCmyk>),
}

impl<'i> Parse<'i> for AnyColor {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    parse_nested(input, |input| {
      if let Ok(mix) = input.try_parse(ColorMix::parse) {
        return Ok(AnyColor::Mix(Box::new(mix)));
      }

      if let Ok(ld) = input.try_parse(LightDark::parse) {
        return Ok(AnyColor::LightDark(Box::new(ld)));
      }

      if let Ok(cmyk) = input.try_parse(DeviceCmyk::parse) {
        return Ok(AnyColor::DeviceCmyk(Box::new(cmyk)));
      }

      Ok(AnyColor::Color(CssColor::parse(input)?))
    })
  }
}

impl ToCss for AnyColor {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      AnyColor::Color(c) => c.to_css(dest),
      AnyColor::Mix(m) => m.to_css(dest),
      AnyColor::LightDark(ld) => ld.to_css(dest),
      AnyColor::DeviceCmyk(c) => c.to_css(dest),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  fn test(source: &str, expected: &str) {
    let color = AnyColor::parse_string(source).unwrap();
    assert_eq!(color.to_css_string(PrinterOptions::default()).unwrap(), expected);
    assert_eq!(AnyColor::parse_string(expected).unwrap(), color);
  }

  #[test]
  fn test_keywords() {
    test("Red", "red");
    test("transparent", "transparent");
    test("CurrentColor", "currentcolor");
    test("buttontext", "ButtonText");
    test("threeddarkshadow", "ThreeDDarkShadow");
    assert!(CssColor::parse_string("reddish").is_err());
    assert!(is_color_keyword("REBECCAPURPLE"));
    assert!(!is_color_keyword("auto"));
  }

  #[test]
  fn test_hex() {
    test("#FF0000", "#f00");
    test("#ff000080", "#ff000080");
    test("#abc", "#abc");
    test("#1234", "#1234");
    test("#123456", "#123456");
    assert!(CssColor::parse_string("#12345").is_err());
    assert!(CssColor::parse_string("#ggg").is_err());
  }

  #[test]
  fn test_functions() {
    test("rgb(255, 0, 0)", "rgb(255 0 0)");
    test("rgba(255, 0, 0, 0.5)", "rgb(255 0 0 / .5)");
    test("rgb(255 0 0 / 50%)", "rgb(255 0 0 / 50%)");
    test("hsla(120deg, 100%, 50%, .3)", "hsl(120deg 100% 50% / .3)");
    test("oklch(70% 0.1 200)", "oklch(70% .1 200)");
    test("lab(50% 40 59.5)", "lab(50% 40 59.5)");
    test("color(Display-P3 1 0 0)", "color(display-p3 1 0 0)");
    test("rgb(from red r g b / 50%)", "rgb(from red r g b / 50%)");
    test("hwb(none 20% 30%)", "hwb(none 20% 30%)");
    assert!(CssColor::parse_string("rgb(1 2)").is_err());
    assert!(CssColor::parse_string("rgb(1, 2 3)").is_err());
    assert!(CssColor::parse_string("foo(1 2 3)").is_err());
  }

  #[test]
  fn test_mixes() {
    test("color-mix(in srgb, red 40%, blue)", "color-mix(in srgb, red 40%, blue)");
    test("color-mix(in hsl longer hue, 30% red, blue)", "color-mix(in hsl longer hue, red 30%, blue)");
    test("light-dark(white, #000)", "light-dark(white, #000)");
    test("device-cmyk(0 81% 81% 30%)", "device-cmyk(0 81% 81% 30%)");
    test("device-cmyk(0, .5, .5, .3)", "device-cmyk(0 .5 .5 .3)");
    test("device-cmyk(0 0 0 1 / 50%, black)", "device-cmyk(0 0 0 1 / 50%, black)");
  }
}
