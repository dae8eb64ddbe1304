//! Transform and filter functions.
//!
//! Both keep their arguments as a generic value list: the argument types differ from
//! function to function, and the grammar of the including property decides what is
//! acceptable. Only the argument count is checked here.

use super::value::{parse_values, values_to_css, Value};
use crate::error::{ParserError, PrinterError};
use crate::macros::enum_property;
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

enum_property! {
  /// The name of a [transform function](https://www.w3.org/TR/css-transforms-2/#transform-functions).
  pub enum TransformFunctionName {
    "translate": Translate,
    "translateX": TranslateX,
    "translateY": TranslateY,
    "translateZ": TranslateZ,
    "translate3d": Translate3d,
    "rotate": Rotate,
    "rotateX": RotateX,
    "rotateY": RotateY,
    "rotateZ": RotateZ,
    "rotate3d": Rotate3d,
    "scale": Scale,
    "scaleX": ScaleX,
    "scaleY": ScaleY,
    "scaleZ": ScaleZ,
    "scale3d": Scale3d,
    "skew": Skew,
    "skewX": SkewX,
    "skewY": SkewY,
    "matrix": Matrix,
    "matrix3d": Matrix3d,
    "perspective": Perspective,
  }
}

impl TransformFunctionName {
  /// The minimum and maximum number of comma separated arguments.
  fn arity(&self) -> (usize, usize) {
    use TransformFunctionName::*;
    match self {
      Translate | Scale | Skew => (1, 2),
      Translate3d | Scale3d => (3, 3),
      Rotate3d => (4, 4),
      Matrix => (6, 6),
      Matrix3d => (16, 16),
      _ => (1, 1),
    }
  }
}

/// Counts the comma separated arguments of a value list.
fn count_arguments(args: &[Value]) -> usize {
  if args.is_empty() {
    return 0;
  }
  1 + args.iter().filter(|v| matches!(v, Value::Delimiter(','))).count()
}

/// A [transform function](https://www.w3.org/TR/css-transforms-2/#transform-functions),
/// e.g. `translateX(10px)` or `rotate3d(1, 1, 0, 45deg)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
  /// The function name.
  pub name: TransformFunctionName,
  /// The arguments, including comma delimiters.
  pub args: Vec<Value>,
}

impl<'i> Parse<'i> for Transform {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let function = input.expect_function()?.clone();
    let name = match TransformFunctionName::from_str(&function) {
      Some(name) => name,
      None => return Err(location.new_unexpected_token_error(Token::Function(function))),
    };
    let args = input.parse_nested_block(parse_values)?;
    let (min, max) = name.arity();
    let count = count_arguments(&args);
    if count < min || count > max {
      return Err(location.new_custom_error(ParserError::InvalidValue));
    }
    Ok(Transform { name, args })
  }
}

impl ToCss for Transform {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    self.name.to_css(dest)?;
    dest.write_char('(')?;
    values_to_css(&self.args, dest)?;
    dest.write_char(')')
  }
}

enum_property! {
  /// The name of a [filter function](https://drafts.fxtf.org/filter-effects-1/#filter-functions).
  pub enum FilterFunctionName {
    "blur": Blur,
    "brightness": Brightness,
    "contrast": Contrast,
    "drop-shadow": DropShadow,
    "grayscale": Grayscale,
    "hue-rotate": HueRotate,
    "invert": Invert,
    "opacity": Opacity,
    "saturate": Saturate,
    "sepia": Sepia,
  }
}

/// A [filter function](https://drafts.fxtf.org/filter-effects-1/#filter-functions),
/// e.g. `blur(2px)` or `drop-shadow(1px 1px 2px black)`.
///
/// Every function except `drop-shadow()` takes at most one argument, and may omit it.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
  /// The function name.
  pub name: FilterFunctionName,
  /// The arguments.
  pub args: Vec<Value>,
}

impl<'i> Parse<'i> for Filter {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let function = input.expect_function()?.clone();
    let name = match FilterFunctionName::from_str(&function) {
      Some(name) => name,
      None => return Err(location.new_unexpected_token_error(Token::Function(function))),
    };
    let args = input.parse_nested_block(parse_values)?;
    let valid = match name {
      FilterFunctionName::DropShadow => !args.is_empty() && count_arguments(&args) == 1,
      _ => args.len() <= 1,
    };
    if !valid {
      return Err(location.new_custom_error(ParserError::InvalidValue));
    }
    Ok(Filter { name, args })
  }
}

impl ToCss for Filter {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    self.name.to_css(dest)?;
    dest.write_char('(')?;
    values_to_css(&self.args, dest)?;
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
  fn test_transform() {
    test::<Transform>("translatex(10px)", "translateX(10px)");
    test::<Transform>("translate(10px,20%)", "translate(10px, 20%)");
    test::<Transform>("rotate3d(1, 1, 0, 45deg)", "rotate3d(1, 1, 0, 45deg)");
    test::<Transform>("scale(1.5)", "scale(1.5)");
    test::<Transform>("matrix(1, 0, 0, 1, 0, 0)", "matrix(1, 0, 0, 1, 0, 0)");
    assert!(Transform::parse_string("translate()").is_err());
    assert!(Transform::parse_string("translate3d(1px, 2px)").is_err());
    assert!(Transform::parse_string("spin(10deg)").is_err());
  }

  #[test]
  fn test_filter() {
    test::<Filter>("blur(2px)", "blur(2px)");
    test::<Filter>("blur()", "blur()");
    test::<Filter>("HUE-ROTATE(90deg)", "hue-rotate(90deg)");
    test::<Filter>("drop-shadow(1px 1px 2px black)", "drop-shadow(1px 1px 2px black)");
    assert!(Filter::parse_string("drop-shadow()").is_err());
    assert!(Filter::parse_string("opacity(50% 20%)").is_err());
  }
}
