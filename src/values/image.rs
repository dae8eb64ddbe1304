//! CSS image values.

use super::color::AnyColor;
use super::gradient::Gradient;
use super::percentage::Percentage;
use super::resolution::Resolution;
use super::string::CSSString;
use super::url::Url;
use super::value::{parse_values, values_to_css, Value};
use crate::error::{ParserError, PrinterError};
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A CSS [`<image>`](https://www.w3.org/TR/css-images-3/#image-values) value, as
/// used inside `image-set()` and `cross-fade()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Image {
  /// A `url()`.
  Url(Url),
  /// A gradient.
  Gradient(Box<Gradient>),
  /// An `image-set()`.
  ImageSet(ImageSet),
  /// A `cross-fade()`.
  CrossFade(CrossFade),
  /// An `element()`.
  Element(Element),
  /// A `paint()`.
  Paint(Paint),
}

impl<'i> Parse<'i> for Image {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    if let Ok(url) = input.try_parse(Url::parse) {
      return Ok(Image::Url(url));
    }

    if let Ok(gradient) = input.try_parse(Gradient::parse) {
      return Ok(Image::Gradient(Box::new(gradient)));
    }

    if let Ok(set) = input.try_parse(ImageSet::parse) {
      return Ok(Image::ImageSet(set));
    }

    if let Ok(fade) = input.try_parse(CrossFade::parse) {
      return Ok(Image::CrossFade(fade));
    }

    if let Ok(element) = input.try_parse(Element::parse) {
      return Ok(Image::Element(element));
    }

    Ok(Image::Paint(Paint::parse(input)?))
  }
}

impl ToCss for Image {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      Image::Url(url) => url.to_css(dest),
      Image::Gradient(gradient) => gradient.to_css(dest),
      Image::ImageSet(set) => set.to_css(dest),
      Image::CrossFade(fade) => fade.to_css(dest),
      Image::Element(element) => element.to_css(dest),
      Image::Paint(paint) => paint.to_css(dest),
    }
  }
}

/// A CSS [`image-set()`](https://drafts.csswg.org/css-images-4/#image-set-notation) value.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSet {
  /// The image options to choose from.
  pub options: Vec<ImageSetOption>,
}

impl<'i> Parse<'i> for ImageSet {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("image-set")?;
    let options = input.parse_nested_block(|input| input.parse_comma_separated(ImageSetOption::parse))?;
    Ok(ImageSet { options })
  }
}

impl ToCss for ImageSet {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("image-set(")?;
    crate::traits::to_css_comma_separated(&self.options, dest)?;
    dest.write_char(')')
  }
}

/// An image option within the `image-set()` function.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSetOption {
  /// The image for this option. A bare string is read as a url.
  pub image: Image,
  /// The resolution of the image.
  pub resolution: Option<Resolution>,
  /// The mime type of the image, from `type()`.
  pub file_type: Option<String>,
}

impl<'i> Parse<'i> for ImageSetOption {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let image = if let Ok(s) = input.try_parse(CSSString::parse) {
      Image::Url(Url { url: s.0 })
    } else {
      Image::parse(input)?
    };

    let (resolution, file_type) = if let Ok(res) = input.try_parse(Resolution::parse) {
      let file_type = input.try_parse(parse_file_type).ok();
      (Some(res), file_type)
    } else {
      let file_type = input.try_parse(parse_file_type).ok();
      let resolution = input.try_parse(Resolution::parse).ok();
      (resolution, file_type)
    };

    Ok(ImageSetOption {
      image,
      resolution,
      file_type,
    })
  }
}

impl ToCss for ImageSetOption {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    self.image.to_css(dest)?;

    if let Some(resolution) = &self.resolution {
      dest.write_char(' ')?;
      resolution.to_css(dest)?;
    }

    if let Some(file_type) = &self.file_type {
      dest.write_str(" type(")?;
      serialize_string(file_type, dest)?;
      dest.write_char(')')?;
    }

    Ok(())
  }
}

fn parse_file_type<'i, 't>(input: &mut Parser<'i, 't>) -> Result<String, ParseError<'i, ParserError<'i>>> {
  input.expect_function_matching("type")?;
  input.parse_nested_block(|input| Ok(input.expect_string()?.as_ref().to_owned()))
}

/// A CSS [`cross-fade()`](https://drafts.csswg.org/css-images-4/#cross-fade-function) value.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossFade {
  /// The images to blend.
  pub items: Vec<CrossFadeItem>,
}

/// One argument of `cross-fade()`.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossFadeItem {
  /// The image or solid color.
  pub image: CrossFadeImage,
  /// How much of the image is used in the blend.
  pub percentage: Option<Percentage>,
}

/// An image or a solid color within `cross-fade()`.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossFadeImage {
  /// An image.
  Image(Image),
  /// A solid color.
  Color(AnyColor),
}

impl<'i> Parse<'i> for CrossFade {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("cross-fade")?;
    let items = input.parse_nested_block(|input| input.parse_comma_separated(CrossFadeItem::parse))?;
    Ok(CrossFade { items })
  }
}

impl<'i> Parse<'i> for CrossFadeItem {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let before = input.try_parse(Percentage::parse).ok();
    let image = if let Ok(image) = input.try_parse(Image::parse) {
      CrossFadeImage::Image(image)
    } else {
      CrossFadeImage::Color(AnyColor::parse(input)?)
    };
    let percentage = match before {
      Some(p) => Some(p),
      None => input.try_parse(Percentage::parse).ok(),
    };
    Ok(CrossFadeItem { image, percentage })
  }
}

impl ToCss for CrossFade {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("cross-fade(")?;
    crate::traits::to_css_comma_separated(&self.items, dest)?;
    dest.write_char(')')
  }
}

impl ToCss for CrossFadeItem {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match &self.image {
      CrossFadeImage::Image(image) => image.to_css(dest)?,
      CrossFadeImage::Color(color) => color.to_css(dest)?,
    }
    if let Some(p) = &self.percentage {
      dest.write_char(' ')?;
      p.to_css(dest)?;
    }
    Ok(())
  }
}

/// A CSS [`element()`](https://drafts.csswg.org/css-images-4/#element-notation) value.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
  /// The id of the referenced element, without the `#`.
  pub id: String,
}

impl<'i> Parse<'i> for Element {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("element")?;
    input.parse_nested_block(|input| {
      let location = input.current_source_location();
      match input.next()? {
        Token::IDHash(id) => Ok(Element { id: id.as_ref().to_owned() }),
        t => Err(location.new_unexpected_token_error(t.clone())),
      }
    })
  }
}

impl ToCss for Element {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("element(#")?;
    serialize_name(&self.id, dest)?;
    dest.write_char(')')
  }
}

/// A CSS Houdini [`paint()`](https://drafts.css-houdini.org/css-paint-api/#paint-notation) value.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
  /// The name of the registered paint worklet.
  pub name: String,
  /// The arguments passed to the worklet.
  pub args: Vec<Value>,
}

impl<'i> Parse<'i> for Paint {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("paint")?;
    input.parse_nested_block(|input| {
      let name = input.expect_ident()?.as_ref().to_owned();
      let args = if input.try_parse(|input| input.expect_comma()).is_ok() {
        parse_values(input)?
      } else {
        Vec::new()
      };
      Ok(Paint { name, args })
    })
  }
}

impl ToCss for Paint {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("paint(")?;
    dest.write_ident(&self.name)?;
    if !self.args.is_empty() {
      dest.delim(',', false)?;
      values_to_css(&self.args, dest)?;
    }
    dest.write_char(')')
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  fn test(source: &str, expected: &str) {
    let image = Image::parse_string(source).unwrap();
    assert_eq!(image.to_css_string(PrinterOptions::default()).unwrap(), expected);
    assert_eq!(Image::parse_string(expected).unwrap(), image);
  }

  #[test]
  fn test_image_set() {
    test(
      "image-set(\"a.png\" 1x, url(b.png) 2x)",
      "image-set(url(\"a.png\") 1x, url(\"b.png\") 2x)",
    );
    test(
      "image-set(url(a.avif) type(\"image/avif\"), url(a.png) 192dpi)",
      "image-set(url(\"a.avif\") type(\"image/avif\"), url(\"a.png\") 192dpi)",
    );
    test(
      "image-set(linear-gradient(red, blue) 1x)",
      "image-set(linear-gradient(red, blue) 1x)",
    );
  }

  #[test]
  fn test_cross_fade() {
    test(
      "cross-fade(url(a.png) 25%, url(b.png))",
      "cross-fade(url(\"a.png\") 25%, url(\"b.png\"))",
    );
    test("cross-fade(50% red, url(b.png))", "cross-fade(red 50%, url(\"b.png\"))");
  }

  #[test]
  fn test_element_and_paint() {
    test("element(#hero)", "element(#hero)");
    test("paint(checkerboard)", "paint(checkerboard)");
    test("paint(ripple, 10px, red)", "paint(ripple, 10px, red)");
    assert!(Image::parse_string("element(hero)").is_err());
  }
}
