//! Common [CSS values](https://www.w3.org/TR/css3-values/) that make up a declaration value.
//!
//! Each value provides parsing and serialization support using the [Parse](super::traits::Parse)
//! and [ToCss](super::traits::ToCss) traits. The [value](value) module ties them together into the
//! [Value](value::Value) enum, which is what the grammar matcher works on.
//!
//! # Example
//!
//! This example parses a declaration value into component values and re-serializes it.
//!
//! ```
//! use css_value_grammar::{
//!   printer::PrinterOptions,
//!   values::value::{list_to_css_string, parse_list, ValueKind},
//! };
//!
//! let values = parse_list("1PX  solid  red, blue").unwrap();
//! assert_eq!(values[0].kind(), ValueKind::Length);
//! assert_eq!(
//!   list_to_css_string(&values, PrinterOptions::default()).unwrap(),
//!   "1px solid red, blue"
//! );
//! ```
//!
//! If you have a [cssparser::Parser](cssparser::Parser) already, you can also use the `parse` and `to_css`
//! methods instead, rather than parsing from a string.

pub mod anchor;
pub mod angle;
pub mod calc;
pub mod color;
pub mod content;
pub mod easing;
pub mod font;
pub mod gradient;
pub mod grid;
pub mod ident;
pub mod image;
pub mod length;
pub mod number;
pub mod percentage;
pub mod position;
pub mod ratio;
pub mod resolution;
pub mod shape;
pub mod string;
pub mod time;
pub mod timeline;
pub mod transform;
pub mod url;
pub mod value;
