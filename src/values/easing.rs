//! CSS easing functions.

use super::number::{CSSInteger, CSSNumber};
use super::percentage::Percentage;
use crate::error::{ParserError, PrinterError};
use crate::macros::enum_property;
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;
use smallvec::SmallVec;

/// A [`cubic-bezier()`](https://www.w3.org/TR/css-easing-1/#cubic-bezier-easing-functions) easing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
  /// The x-position of the first point in the curve.
  pub x1: CSSNumber,
  /// The y-position of the first point in the curve.
  pub y1: CSSNumber,
  /// The x-position of the second point in the curve.
  pub x2: CSSNumber,
  /// The y-position of the second point in the curve.
  pub y2: CSSNumber,
}

impl<'i> Parse<'i> for CubicBezier {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("cubic-bezier")?;
    input.parse_nested_block(|input| {
      let location = input.current_source_location();
      let x1 = CSSNumber::parse(input)?;
      input.expect_comma()?;
      let y1 = CSSNumber::parse(input)?;
      input.expect_comma()?;
      let x2 = CSSNumber::parse(input)?;
      input.expect_comma()?;
      let y2 = CSSNumber::parse(input)?;
      // The x coordinates must be in the [0, 1] range.
      if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
        return Err(location.new_custom_error(ParserError::InvalidValue));
      }
      Ok(CubicBezier { x1, y1, x2, y2 })
    })
  }
}

impl ToCss for CubicBezier {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("cubic-bezier(")?;
    self.x1.to_css(dest)?;
    dest.delim(',', false)?;
    self.y1.to_css(dest)?;
    dest.delim(',', false)?;
    self.x2.to_css(dest)?;
    dest.delim(',', false)?;
    self.y2.to_css(dest)?;
    dest.write_char(')')
  }
}

enum_property! {
  /// A [step position](https://www.w3.org/TR/css-easing-1/#step-position), used within the `steps()` function.
  pub enum StepPosition {
    /// The first rise occurs at input progress value of 0.
    "start": Start,
    /// The last rise occurs at input progress value of 1.
    "end": End,
    /// Same as `start`.
    "jump-start": JumpStart,
    /// Same as `end`.
    "jump-end": JumpEnd,
    /// All rises occur within the range (0, 1).
    "jump-none": JumpNone,
    /// The first rise occurs at input progress value of 0 and the last rise occurs at input progress value of 1.
    "jump-both": JumpBoth,
  }
}

/// A [`steps()`](https://www.w3.org/TR/css-easing-1/#step-easing-functions) easing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
  /// The number of intervals in the function.
  pub count: CSSInteger,
  /// The step position.
  pub position: Option<StepPosition>,
}

impl<'i> Parse<'i> for Steps {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("steps")?;
    input.parse_nested_block(|input| {
      let location = input.current_source_location();
      let count = CSSInteger::parse(input)?;
      let position = input
        .try_parse(|input| {
          input.expect_comma()?;
          StepPosition::parse(input)
        })
        .ok();
      // `jump-none` needs at least two steps, everything else at least one.
      let min = if position == Some(StepPosition::JumpNone) { 2 } else { 1 };
      if count < min {
        return Err(location.new_custom_error(ParserError::InvalidValue));
      }
      Ok(Steps { count, position })
    })
  }
}

impl ToCss for Steps {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("steps(")?;
    self.count.to_css(dest)?;
    if let Some(position) = &self.position {
      dest.delim(',', false)?;
      position.to_css(dest)?;
    }
    dest.write_char(')')
  }
}

/// A control point of a [`linear()`](https://www.w3.org/TR/css-easing-2/#the-linear-easing-function)
/// easing function.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearStop {
  /// The output progress value.
  pub output: CSSNumber,
  /// Up to two input progress values.
  pub input: SmallVec<[Percentage; 2]>,
}

impl<'i> Parse<'i> for LinearStop {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let mut positions = SmallVec::new();
    if let Ok(p) = input.try_parse(Percentage::parse) {
      positions.push(p);
    }
    let output = CSSNumber::parse(input)?;
    while positions.len() < 2 {
      match input.try_parse(Percentage::parse) {
        Ok(p) => positions.push(p),
        Err(_) => break,
      }
    }
    Ok(LinearStop {
      output,
      input: positions,
    })
  }
}

impl ToCss for LinearStop {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    self.output.to_css(dest)?;
    for p in &self.input {
      dest.write_char(' ')?;
      p.to_css(dest)?;
    }
    Ok(())
  }
}

/// A [`linear()`](https://www.w3.org/TR/css-easing-2/#the-linear-easing-function) easing function.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
  /// The control points.
  pub stops: Vec<LinearStop>,
}

impl<'i> Parse<'i> for Linear {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("linear")?;
    let stops = input.parse_nested_block(|input| input.parse_comma_separated(LinearStop::parse))?;
    Ok(Linear { stops })
  }
}

impl ToCss for Linear {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("linear(")?;
    crate::traits::to_css_comma_separated(&self.stops, dest)?;
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
  fn test_cubic_bezier() {
    test::<CubicBezier>("cubic-bezier(0.25, 0.1, 0.25, 1)", "cubic-bezier(.25, .1, .25, 1.0)");
    test::<CubicBezier>("cubic-bezier(0, -2, 1, 3)", "cubic-bezier(0.0, -2.0, 1.0, 3.0)");
    assert!(CubicBezier::parse_string("cubic-bezier(2, 0, 1, 1)").is_err());
  }

  #[test]
  fn test_steps() {
    test::<Steps>("steps(4)", "steps(4)");
    test::<Steps>("steps(3, JUMP-BOTH)", "steps(3, jump-both)");
    test::<Steps>("steps(2, jump-none)", "steps(2, jump-none)");
    assert!(Steps::parse_string("steps(1, jump-none)").is_err());
    assert!(Steps::parse_string("steps(0)").is_err());
    assert!(Steps::parse_string("steps(1.5)").is_err());
  }

  #[test]
  fn test_linear() {
    test::<Linear>("linear(0, 0.25 75%, 1)", "linear(0.0, .25 75%, 1.0)");
    test::<Linear>("linear(0 0% 10%, 1)", "linear(0.0 0% 10%, 1.0)");
  }
}
