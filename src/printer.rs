//! CSS value serialization.

use crate::error::PrinterError;
use cssparser::{serialize_identifier, serialize_name};

/// Options that control how CSS values are serialized to a string.
#[derive(Default, Debug, Clone, Copy)]
pub struct PrinterOptions {
  /// Whether to minify the output, i.e. remove optional white space.
  pub minify: bool,
}

/// A `Printer` represents a destination to output serialized CSS, as used in
/// the [ToCss](super::traits::ToCss) trait. It can wrap any destination that
/// implements [std::fmt::Write](std::fmt::Write), such as a [String](String).
///
/// `Printer` also includes helper functions that assist with writing output
/// that respects options such as `minify`.
pub struct Printer<'a, W> {
  dest: &'a mut W,
  col: u32,
  pub(crate) minify: bool,
}

impl<'a, W: std::fmt::Write + Sized> Printer<'a, W> {
  /// Create a new Printer wrapping the given destination.
  pub fn new(dest: &'a mut W, options: PrinterOptions) -> Self {
    Printer {
      dest,
      col: 0,
      minify: options.minify,
    }
  }

  /// Returns the number of characters written so far.
  pub fn column(&self) -> u32 {
    self.col
  }

  /// Writes a raw string to the underlying destination.
  pub fn write_str(&mut self, s: &str) -> Result<(), PrinterError> {
    self.col += s.len() as u32;
    self.dest.write_str(s)?;
    Ok(())
  }

  /// Write a single character to the underlying destination.
  pub fn write_char(&mut self, c: char) -> Result<(), PrinterError> {
    self.col += 1;
    self.dest.write_char(c)?;
    Ok(())
  }

  /// Writes a single whitespace character, unless the `minify` option is enabled.
  ///
  /// Use `write_char` instead if you wish to force a space character to be written,
  /// regardless of the `minify` option.
  pub fn whitespace(&mut self) -> Result<(), PrinterError> {
    if self.minify {
      return Ok(());
    }

    self.write_char(' ')
  }

  /// Writes a delimeter character, followed by whitespace (depending on the `minify` option).
  /// If `ws_before` is true, then whitespace is also written before the delimeter.
  pub fn delim(&mut self, delim: char, ws_before: bool) -> Result<(), PrinterError> {
    if ws_before {
      self.whitespace()?;
    }
    self.write_char(delim)?;
    self.whitespace()
  }

  /// Writes a CSS identifier to the underlying destination, escaping it
  /// as appropriate.
  pub fn write_ident(&mut self, ident: &str) -> Result<(), PrinterError> {
    serialize_identifier(ident, self)?;
    Ok(())
  }

  /// Writes a `--` prefixed identifier. The prefix is never escaped.
  pub fn write_dashed_ident(&mut self, ident: &str) -> Result<(), PrinterError> {
    self.write_str("--")?;
    serialize_name(ident.strip_prefix("--").unwrap_or(ident), self)?;
    Ok(())
  }
}

impl<'a, W: std::fmt::Write + Sized> std::fmt::Write for Printer<'a, W> {
  fn write_str(&mut self, s: &str) -> std::fmt::Result {
    self.col += s.len() as u32;
    self.dest.write_str(s)
  }
}
