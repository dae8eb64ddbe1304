//! CSS string values.

use crate::error::{ParserError, PrinterError};
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A CSS [`<string>`](https://www.w3.org/TR/css-values-4/#strings) value.
///
/// Holds the unescaped contents. Strings are always serialized with double quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CSSString(pub String);

impl<'i> Parse<'i> for CSSString {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let s = input.expect_string()?;
    Ok(CSSString(s.as_ref().to_owned()))
  }
}

impl ToCss for CSSString {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    serialize_string(&self.0, dest)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  #[test]
  fn test_string() {
    let s = CSSString::parse_string("'it\\'s'").unwrap();
    assert_eq!(s, CSSString("it's".into()));
    assert_eq!(s.to_css_string(PrinterOptions::default()).unwrap(), "\"it's\"");
    assert_eq!(
      CSSString("say \"hi\"".into()).to_css_string(PrinterOptions::default()).unwrap(),
      "\"say \\\"hi\\\"\""
    );
  }
}
