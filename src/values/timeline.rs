//! Anonymous animation timelines: `scroll()` and `view()`.

use super::length::LengthPercentageOrAuto;
use crate::error::{ParserError, PrinterError};
use crate::macros::enum_property;
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;
use smallvec::SmallVec;

enum_property! {
  /// A scroll [`<axis>`](https://drafts.csswg.org/scroll-animations-1/#typedef-axis).
  pub enum ScrollAxis {
    Block,
    Inline,
    X,
    Y,
  }
}

enum_property! {
  /// The [`<scroller>`](https://drafts.csswg.org/scroll-animations-1/#typedef-scroller) of a `scroll()` timeline.
  pub enum Scroller {
    "root": Root,
    "nearest": Nearest,
    "self": SelfElement,
  }
}

/// A [`scroll()`](https://drafts.csswg.org/scroll-animations-1/#scroll-notation) timeline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scroll {
  /// The scroll container, `nearest` when omitted.
  pub scroller: Option<Scroller>,
  /// The scroll axis, `block` when omitted.
  pub axis: Option<ScrollAxis>,
}

impl<'i> Parse<'i> for Scroll {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("scroll")?;
    input.parse_nested_block(|input| {
      let mut scroll = Scroll::default();
      loop {
        if scroll.scroller.is_none() {
          if let Ok(s) = input.try_parse(Scroller::parse) {
            scroll.scroller = Some(s);
            continue;
          }
        }
        if scroll.axis.is_none() {
          if let Ok(axis) = input.try_parse(ScrollAxis::parse) {
            scroll.axis = Some(axis);
            continue;
          }
        }
        break;
      }
      Ok(scroll)
    })
  }
}

impl ToCss for Scroll {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("scroll(")?;
    if let Some(scroller) = &self.scroller {
      scroller.to_css(dest)?;
      if self.axis.is_some() {
        dest.write_char(' ')?;
      }
    }
    if let Some(axis) = &self.axis {
      axis.to_css(dest)?;
    }
    dest.write_char(')')
  }
}

/// A [`view()`](https://drafts.csswg.org/scroll-animations-1/#view-notation) timeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct View {
  /// The scroll axis, `block` when omitted.
  pub axis: Option<ScrollAxis>,
  /// The start and end insets. A single value applies to both.
  pub inset: SmallVec<[LengthPercentageOrAuto; 2]>,
}

impl<'i> Parse<'i> for View {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("view")?;
    input.parse_nested_block(|input| {
      let mut view = View::default();
      view.axis = input.try_parse(ScrollAxis::parse).ok();
      while view.inset.len() < 2 {
        match input.try_parse(LengthPercentageOrAuto::parse) {
          Ok(inset) => view.inset.push(inset),
          Err(_) => break,
        }
      }
      if view.axis.is_none() && !view.inset.is_empty() {
        view.axis = input.try_parse(ScrollAxis::parse).ok();
      }
      Ok(view)
    })
  }
}

impl ToCss for View {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("view(")?;
    if let Some(axis) = &self.axis {
      axis.to_css(dest)?;
      if !self.inset.is_empty() {
        dest.write_char(' ')?;
      }
    }
    crate::traits::to_css_space_separated(&self.inset, dest)?;
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
  fn test_scroll() {
    test::<Scroll>("scroll()", "scroll()");
    test::<Scroll>("scroll(inline root)", "scroll(root inline)");
    test::<Scroll>("scroll(self)", "scroll(self)");
    assert!(Scroll::parse_string("scroll(x y)").is_err());
  }

  #[test]
  fn test_view() {
    test::<View>("view()", "view()");
    test::<View>("view(x)", "view(x)");
    test::<View>("view(auto 20%)", "view(auto 20%)");
    test::<View>("view(10px inline)", "view(inline 10px)");
    assert!(View::parse_string("view(1px 2px 3px)").is_err());
  }
}
