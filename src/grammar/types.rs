//! Primitive data types and the value kinds bound to them.
//!
//! A data type named in a syntax string is either primitive, in which case it is a leaf that
//! accepts values of certain [ValueKind](ValueKind)s, or it is defined by a named syntax of its own
//! and compiles to a reference.

use crate::values::color::CssColor;
use crate::values::ident::is_css_wide_keyword;
use crate::values::value::{Value, ValueKind};

const LENGTH: &[ValueKind] = &[ValueKind::Length];
const LENGTH_PERCENTAGE: &[ValueKind] = &[ValueKind::Length, ValueKind::Percentage];
const PERCENTAGE: &[ValueKind] = &[ValueKind::Percentage];
const NUMBER: &[ValueKind] = &[ValueKind::Number, ValueKind::Integer];
const INTEGER: &[ValueKind] = &[ValueKind::Integer];
const ANGLE: &[ValueKind] = &[ValueKind::Angle];
const ANGLE_PERCENTAGE: &[ValueKind] = &[ValueKind::Angle, ValueKind::Percentage];
const TIME: &[ValueKind] = &[ValueKind::Time];
const TIME_PERCENTAGE: &[ValueKind] = &[ValueKind::Time, ValueKind::Percentage];
const FREQUENCY: &[ValueKind] = &[ValueKind::Frequency];
const FREQUENCY_PERCENTAGE: &[ValueKind] = &[ValueKind::Frequency, ValueKind::Percentage];
const RESOLUTION: &[ValueKind] = &[ValueKind::Resolution];
const FLEX: &[ValueKind] = &[ValueKind::Flex];
const DIMENSION: &[ValueKind] = &[
  ValueKind::Length,
  ValueKind::Angle,
  ValueKind::Time,
  ValueKind::Frequency,
  ValueKind::Resolution,
  ValueKind::Flex,
];
const STRING: &[ValueKind] = &[ValueKind::String];
const URL: &[ValueKind] = &[ValueKind::Url];
const KEYWORD: &[ValueKind] = &[ValueKind::Keyword];
const DASHED_IDENT: &[ValueKind] = &[ValueKind::DashedIdent];
const COLOR: &[ValueKind] = &[
  ValueKind::Color,
  ValueKind::ColorMix,
  ValueKind::LightDark,
  ValueKind::DeviceCmyk,
];
const COLOR_KEYWORD: &[ValueKind] = &[ValueKind::Color];
const GRADIENT: &[ValueKind] = &[
  ValueKind::LinearGradient,
  ValueKind::RadialGradient,
  ValueKind::ConicGradient,
];
const IMAGE: &[ValueKind] = &[
  ValueKind::Url,
  ValueKind::LinearGradient,
  ValueKind::RadialGradient,
  ValueKind::ConicGradient,
  ValueKind::ImageSet,
  ValueKind::CrossFade,
  ValueKind::Element,
  ValueKind::Paint,
];
const BASIC_SHAPE: &[ValueKind] = &[
  ValueKind::Circle,
  ValueKind::Ellipse,
  ValueKind::Inset,
  ValueKind::Rect,
  ValueKind::Xywh,
  ValueKind::Polygon,
  ValueKind::Path,
];
const TRANSFORM_FUNCTION: &[ValueKind] = &[ValueKind::Transform];
const FILTER_FUNCTION: &[ValueKind] = &[ValueKind::Filter];

/// Returns the value kinds bound to a primitive data type, or `None` if the name is not primitive.
pub fn data_type_kinds(name: &str) -> Option<&'static [ValueKind]> {
  let kinds = match name {
    "length" => LENGTH,
    "length-percentage" => LENGTH_PERCENTAGE,
    "percentage" => PERCENTAGE,
    "number" => NUMBER,
    "integer" => INTEGER,
    "angle" => ANGLE,
    "angle-percentage" => ANGLE_PERCENTAGE,
    "time" => TIME,
    "time-percentage" => TIME_PERCENTAGE,
    "frequency" => FREQUENCY,
    "frequency-percentage" => FREQUENCY_PERCENTAGE,
    "resolution" => RESOLUTION,
    "flex" => FLEX,
    "dimension" => DIMENSION,
    "string" => STRING,
    "url" => URL,
    "ident" | "custom-ident" => KEYWORD,
    "dashed-ident" | "custom-property-name" => DASHED_IDENT,
    "color" => COLOR,
    "hex-color" | "named-color" | "system-color" | "deprecated-system-color" => COLOR_KEYWORD,
    "gradient" => GRADIENT,
    "image" => IMAGE,
    "basic-shape" => BASIC_SHAPE,
    "transform-function" => TRANSFORM_FUNCTION,
    "filter-function" => FILTER_FUNCTION,
    "declaration-value" | "any-value" => ValueKind::ALL,
    _ => return None,
  };
  Some(kinds)
}

const POSITION: &[ValueKind] = &[ValueKind::Position];
const RATIO: &[ValueKind] = &[ValueKind::Ratio];

/// Returns the value kinds bound to a named syntax that is matched through its grammar, but is
/// offered as a single suggestion with its own default value.
pub fn composite_kinds(name: &str) -> Option<&'static [ValueKind]> {
  match name {
    "position" => Some(POSITION),
    "ratio" => Some(RATIO),
    _ => None,
  }
}

/// Returns whether a name is a primitive data type.
pub fn is_primitive(name: &str) -> bool {
  data_type_kinds(name).is_some()
}

fn is_numeric(kinds: &[ValueKind]) -> bool {
  kinds.iter().any(|kind| {
    matches!(
      kind,
      ValueKind::Length
        | ValueKind::Percentage
        | ValueKind::Number
        | ValueKind::Integer
        | ValueKind::Angle
        | ValueKind::Time
        | ValueKind::Frequency
        | ValueKind::Resolution
        | ValueKind::Flex
    )
  })
}

/// Returns whether a value is a `var()`, `env()` or `attr()` substitution, which may stand in
/// for any component.
pub fn is_substitution(value: &Value) -> bool {
  matches!(value, Value::Var(_) | Value::Env(_) | Value::Attr(_))
}

/// Returns whether a primitive data type accepts a value.
///
/// Identifiers in `forbidden` are rejected by `<custom-ident>`, in addition to the CSS-wide keywords.
pub fn accepts(name: &str, value: &Value, forbidden: &[String]) -> bool {
  let kinds = match data_type_kinds(name) {
    Some(kinds) => kinds,
    None => return false,
  };

  if is_substitution(value) {
    return true;
  }

  match name {
    "custom-ident" | "ident" => {
      return match value.as_ident() {
        Some(ident) => {
          !is_css_wide_keyword(ident)
            && (name == "ident" || !forbidden.iter().any(|f| f.eq_ignore_ascii_case(ident)))
        }
        None => false,
      };
    }
    "hex-color" => return matches!(value, Value::Color(CssColor::Hex(_))),
    "named-color" => {
      return matches!(value, Value::Color(CssColor::Named(_)) | Value::Color(CssColor::CurrentColor))
    }
    "system-color" | "deprecated-system-color" => return matches!(value, Value::Color(CssColor::System(_))),
    _ => {}
  }

  if is_numeric(kinds) {
    if let Value::Math(_) = value {
      return true;
    }
    // A unitless zero is a valid length.
    if kinds.contains(&ValueKind::Length) {
      match value {
        Value::Integer(0) => return true,
        Value::Number(n) if *n == 0.0 => return true,
        _ => {}
      }
    }
  }

  kinds.contains(&value.kind())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn value(css: &str) -> Value {
    use crate::traits::Parse;
    Value::parse_string(css).unwrap()
  }

  #[test]
  fn test_bindings() {
    assert_eq!(data_type_kinds("length"), Some(LENGTH));
    assert_eq!(data_type_kinds("number"), Some(NUMBER));
    assert_eq!(data_type_kinds("position"), None);
    assert!(is_primitive("custom-ident"));
    assert!(!is_primitive("line-width"));
  }

  #[test]
  fn test_accepts() {
    let none: &[String] = &[];
    assert!(accepts("length", &value("1px"), none));
    assert!(accepts("length", &value("0"), none));
    assert!(!accepts("length", &value("1"), none));
    assert!(accepts("length", &value("calc(1px + 2%)"), none));
    assert!(accepts("length", &value("var(--x)"), none));
    assert!(!accepts("length", &value("inherit"), none));
    assert!(!accepts("length", &value("10%"), none));
    assert!(accepts("length-percentage", &value("10%"), none));
    assert!(accepts("number", &value("3"), none));
    assert!(!accepts("integer", &value("3.5"), none));
    assert!(accepts("color", &value("red"), none));
    assert!(accepts("color", &value("#fff"), none));
    assert!(accepts("hex-color", &value("#fff"), none));
    assert!(!accepts("hex-color", &value("red"), none));
    assert!(accepts("image", &value("linear-gradient(red, blue)"), none));
    assert!(accepts("declaration-value", &value(","), none));
  }

  #[test]
  fn test_custom_ident() {
    let forbidden = vec!["none".to_owned()];
    assert!(accepts("custom-ident", &value("slide-in"), &forbidden));
    assert!(accepts("custom-ident", &value("red"), &forbidden));
    assert!(!accepts("custom-ident", &value("None"), &forbidden));
    assert!(!accepts("custom-ident", &value("inherit"), &forbidden));
    assert!(!accepts("custom-ident", &value("1px"), &forbidden));
  }
}
