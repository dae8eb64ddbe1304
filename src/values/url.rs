//! CSS url() values.

use crate::error::{ParserError, PrinterError};
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A CSS [url()](https://www.w3.org/TR/css-values-4/#urls) value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url {
  /// The url string.
  pub url: String,
}

impl<'i> Parse<'i> for Url {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let url = input.expect_url()?;
    Ok(Url { url: url.as_ref().to_owned() })
  }
}

impl ToCss for Url {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    use cssparser::ToCss;
    if dest.minify {
      let mut buf = String::new();
      Token::UnquotedUrl(CowRcStr::from(self.url.as_ref())).to_css(&mut buf)?;

      // If the unquoted url is longer than it would be quoted (e.g. `url("...")`)
      // then serialize as a string and choose the shorter version.
      if buf.len() > self.url.len() + 7 {
        let mut buf2 = String::new();
        serialize_string(&self.url, &mut buf2)?;
        if buf2.len() + 5 < buf.len() {
          dest.write_str("url(")?;
          dest.write_str(&buf2)?;
          return dest.write_char(')');
        }
      }

      dest.write_str(&buf)?;
    } else {
      dest.write_str("url(")?;
      serialize_string(&self.url, dest)?;
      dest.write_char(')')?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  #[test]
  fn test_url() {
    let url = Url::parse_string("url(image.png)").unwrap();
    assert_eq!(url.url, "image.png");
    assert_eq!(url.to_css_string(PrinterOptions::default()).unwrap(), "url(\"image.png\")");
    assert_eq!(
      url.to_css_string(PrinterOptions { minify: true }).unwrap(),
      "url(image.png)"
    );
    assert_eq!(Url::parse_string("url('a b.png')").unwrap().url, "a b.png");
  }
}
