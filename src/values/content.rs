//! Generated content and substitution functions.

use super::ident::{CustomIdent, DashedIdent};
use super::image::Image;
use super::number::CSSInteger;
use super::string::CSSString;
use super::url::Url;
use super::value::{parse_values, values_to_css, Value};
use crate::error::{ParserError, PrinterError};
use crate::macros::enum_property;
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

/// A [`<counter-style>`](https://www.w3.org/TR/css-counter-styles-3/#typedef-counter-style) value.
#[derive(Debug, Clone, PartialEq)]
pub enum CounterStyle {
  /// A named counter style, e.g. `lower-roman`.
  Name(CustomIdent),
  /// An anonymous counter style from `symbols()`.
  Symbols(Symbols),
}

impl<'i> Parse<'i> for CounterStyle {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    if let Ok(symbols) = input.try_parse(Symbols::parse) {
      return Ok(CounterStyle::Symbols(symbols));
    }
    Ok(CounterStyle::Name(CustomIdent::parse(input)?))
  }
}

impl ToCss for CounterStyle {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      CounterStyle::Name(name) => name.to_css(dest),
      CounterStyle::Symbols(symbols) => symbols.to_css(dest),
    }
  }
}

fn parse_optional_style<'i, 't>(
  input: &mut Parser<'i, 't>,
) -> Result<Option<CounterStyle>, ParseError<'i, ParserError<'i>>> {
  if input.try_parse(|input| input.expect_comma()).is_ok() {
    Ok(Some(CounterStyle::parse(input)?))
  } else {
    Ok(None)
  }
}

fn write_optional_style<W>(style: &Option<CounterStyle>, dest: &mut Printer<W>) -> Result<(), PrinterError>
where
  W: std::fmt::Write,
{
  if let Some(style) = style {
    dest.delim(',', false)?;
    style.to_css(dest)?;
  }
  Ok(())
}

/// A [`counter()`](https://www.w3.org/TR/css-lists-3/#funcdef-counter) function.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
  /// The counter name.
  pub name: CustomIdent,
  /// The counter style.
  pub style: Option<CounterStyle>,
}

impl<'i> Parse<'i> for Counter {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("counter")?;
    input.parse_nested_block(|input| {
      let name = CustomIdent::parse(input)?;
      let style = parse_optional_style(input)?;
      Ok(Counter { name, style })
    })
  }
}

impl ToCss for Counter {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("counter(")?;
    self.name.to_css(dest)?;
    write_optional_style(&self.style, dest)?;
    dest.write_char(')')
  }
}

/// A [`counters()`](https://www.w3.org/TR/css-lists-3/#funcdef-counters) function.
#[derive(Debug, Clone, PartialEq)]
pub struct Counters {
  /// The counter name.
  pub name: CustomIdent,
  /// The string inserted between the values of nested counters.
  pub separator: CSSString,
  /// The counter style.
  pub style: Option<CounterStyle>,
}

impl<'i> Parse<'i> for Counters {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("counters")?;
    input.parse_nested_block(|input| {
      let name = CustomIdent::parse(input)?;
      input.expect_comma()?;
      let separator = CSSString::parse(input)?;
      let style = parse_optional_style(input)?;
      Ok(Counters { name, separator, style })
    })
  }
}

impl ToCss for Counters {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("counters(")?;
    self.name.to_css(dest)?;
    dest.delim(',', false)?;
    self.separator.to_css(dest)?;
    write_optional_style(&self.style, dest)?;
    dest.write_char(')')
  }
}

enum_property! {
  /// The [`<symbols-type>`](https://www.w3.org/TR/css-counter-styles-3/#typedef-symbols-type)
  /// of a `symbols()` function.
  pub enum SymbolsType {
    Cyclic,
    Numeric,
    Alphabetic,
    Symbolic,
    Fixed,
  }
}

/// A symbol within `symbols()`: a string or an image.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
  /// A string.
  String(CSSString),
  /// An image.
  Image(Image),
}

/// A [`symbols()`](https://www.w3.org/TR/css-counter-styles-3/#symbols-function) function.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbols {
  /// The counter system, `symbolic` when omitted.
  pub kind: Option<SymbolsType>,
  /// The symbols, at least one.
  pub symbols: Vec<Symbol>,
}

impl<'i> Parse<'i> for Symbols {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("symbols")?;
    input.parse_nested_block(|input| {
      let kind = input.try_parse(SymbolsType::parse).ok();
      let mut symbols = Vec::new();
      loop {
        if let Ok(s) = input.try_parse(CSSString::parse) {
          symbols.push(Symbol::String(s));
        } else if let Ok(image) = input.try_parse(Image::parse) {
          symbols.push(Symbol::Image(image));
        } else {
          break;
        }
      }
      if symbols.is_empty() {
        return Err(input.new_custom_error(ParserError::InvalidValue));
      }
      Ok(Symbols { kind, symbols })
    })
  }
}

impl ToCss for Symbols {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("symbols(")?;
    if let Some(kind) = &self.kind {
      kind.to_css(dest)?;
      dest.write_char(' ')?;
    }
    let mut first = true;
    for symbol in &self.symbols {
      if !first {
        dest.write_char(' ')?;
      }
      first = false;
      match symbol {
        Symbol::String(s) => s.to_css(dest)?,
        Symbol::Image(image) => image.to_css(dest)?,
      }
    }
    dest.write_char(')')
  }
}

/// Parses the fallback after a comma. `Some(vec![])` represents an empty fallback,
/// as in `var(--x,)`.
fn parse_fallback<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Option<Vec<Value>>, ParseError<'i, ParserError<'i>>> {
  if input.try_parse(|input| input.expect_comma()).is_ok() {
    Ok(Some(parse_values(input)?))
  } else {
    Ok(None)
  }
}

fn write_fallback<W>(fallback: &Option<Vec<Value>>, dest: &mut Printer<W>) -> Result<(), PrinterError>
where
  W: std::fmt::Write,
{
  if let Some(fallback) = fallback {
    if fallback.is_empty() {
      dest.write_char(',')?;
    } else {
      dest.delim(',', false)?;
      values_to_css(fallback, dest)?;
    }
  }
  Ok(())
}

/// An [`attr()`](https://drafts.csswg.org/css-values-5/#attr-notation) function.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
  /// The attribute name.
  pub name: String,
  /// The attribute type or unit, e.g. `string`, `px` or `%`.
  pub attr_type: Option<String>,
  /// The fallback value.
  pub fallback: Option<Vec<Value>>,
}

impl<'i> Parse<'i> for Attr {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("attr")?;
    input.parse_nested_block(|input| {
      let name = input.expect_ident()?.as_ref().to_owned();
      let attr_type = input
        .try_parse(|input| -> Result<String, ParseError<'i, ParserError<'i>>> {
          let location = input.current_source_location();
          match input.next()? {
            Token::Ident(ident) => Ok(ident.as_ref().to_owned()),
            Token::Delim('%') => Ok("%".to_owned()),
            t => Err(location.new_unexpected_token_error(t.clone())),
          }
        })
        .ok();
      let fallback = parse_fallback(input)?;
      Ok(Attr { name, attr_type, fallback })
    })
  }
}

impl ToCss for Attr {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("attr(")?;
    dest.write_ident(&self.name)?;
    match self.attr_type.as_deref() {
      Some("%") => dest.write_str(" %")?,
      Some(t) => {
        dest.write_char(' ')?;
        dest.write_ident(t)?;
      }
      None => {}
    }
    write_fallback(&self.fallback, dest)?;
    dest.write_char(')')
  }
}

/// An [`env()`](https://drafts.csswg.org/css-env-1/#env-function) function.
#[derive(Debug, Clone, PartialEq)]
pub struct Env {
  /// The environment variable name.
  pub name: String,
  /// Indices into multi-dimensional variables.
  pub indices: Vec<CSSInteger>,
  /// The fallback value.
  pub fallback: Option<Vec<Value>>,
}

impl<'i> Parse<'i> for Env {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("env")?;
    input.parse_nested_block(|input| {
      let name = input.expect_ident()?.as_ref().to_owned();
      let mut indices = Vec::new();
      while let Ok(index) = input.try_parse(CSSInteger::parse) {
        indices.push(index);
      }
      let fallback = parse_fallback(input)?;
      Ok(Env { name, indices, fallback })
    })
  }
}

impl ToCss for Env {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("env(")?;
    dest.write_ident(&self.name)?;
    for index in &self.indices {
      dest.write_char(' ')?;
      index.to_css(dest)?;
    }
    write_fallback(&self.fallback, dest)?;
    dest.write_char(')')
  }
}

/// A [`var()`](https://drafts.csswg.org/css-variables/#using-variables) reference to a custom property.
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
  /// The name of the referenced custom property.
  pub name: DashedIdent,
  /// The fallback value.
  pub fallback: Option<Vec<Value>>,
}

impl<'i> Parse<'i> for Var {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("var")?;
    input.parse_nested_block(|input| {
      let name = DashedIdent::parse(input)?;
      let fallback = parse_fallback(input)?;
      Ok(Var { name, fallback })
    })
  }
}

impl ToCss for Var {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("var(")?;
    self.name.to_css(dest)?;
    write_fallback(&self.fallback, dest)?;
    dest.write_char(')')
  }
}

/// The fill pattern of a [`leader()`](https://www.w3.org/TR/css-gcpm-3/#leaders) function.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaderType {
  /// `dotted`
  Dotted,
  /// `solid`
  Solid,
  /// `space`
  Space,
  /// A custom string.
  String(CSSString),
}

/// A [`leader()`](https://www.w3.org/TR/css-gcpm-3/#leaders) function.
#[derive(Debug, Clone, PartialEq)]
pub struct Leader(pub LeaderType);

impl<'i> Parse<'i> for Leader {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("leader")?;
    input.parse_nested_block(|input| {
      if let Ok(s) = input.try_parse(CSSString::parse) {
        return Ok(Leader(LeaderType::String(s)));
      }
      let location = input.current_source_location();
      let ident = input.expect_ident()?;
      let leader = match_ignore_ascii_case! { &*ident,
        "dotted" => LeaderType::Dotted,
        "solid" => LeaderType::Solid,
        "space" => LeaderType::Space,
        _ => return Err(location.new_unexpected_token_error(Token::Ident(ident.clone())))
      };
      Ok(Leader(leader))
    })
  }
}

impl ToCss for Leader {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("leader(")?;
    match &self.0 {
      LeaderType::Dotted => dest.write_str("dotted")?,
      LeaderType::Solid => dest.write_str("solid")?,
      LeaderType::Space => dest.write_str("space")?,
      LeaderType::String(s) => s.to_css(dest)?,
    }
    dest.write_char(')')
  }
}

/// The target of a cross reference: a url, a string holding one, or an `attr()`
/// reading one from the element.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetUrl {
  /// A `url()`.
  Url(Url),
  /// A string.
  String(CSSString),
  /// An `attr()` function.
  Attr(Attr),
}

impl<'i> Parse<'i> for TargetUrl {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    if let Ok(s) = input.try_parse(CSSString::parse) {
      return Ok(TargetUrl::String(s));
    }
    if let Ok(attr) = input.try_parse(Attr::parse) {
      return Ok(TargetUrl::Attr(attr));
    }
    Ok(TargetUrl::Url(Url::parse(input)?))
  }
}

impl ToCss for TargetUrl {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    match self {
      TargetUrl::Url(url) => url.to_css(dest),
      TargetUrl::String(s) => s.to_css(dest),
      TargetUrl::Attr(attr) => attr.to_css(dest),
    }
  }
}

/// A [`target-counter()`](https://www.w3.org/TR/css-gcpm-3/#target-counter) function.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetCounter {
  /// The referenced element.
  pub url: TargetUrl,
  /// The counter name.
  pub name: CustomIdent,
  /// The counter style.
  pub style: Option<CounterStyle>,
}

impl<'i> Parse<'i> for TargetCounter {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("target-counter")?;
    input.parse_nested_block(|input| {
      let url = TargetUrl::parse(input)?;
      input.expect_comma()?;
      let name = CustomIdent::parse(input)?;
      let style = parse_optional_style(input)?;
      Ok(TargetCounter { url, name, style })
    })
  }
}

impl ToCss for TargetCounter {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("target-counter(")?;
    self.url.to_css(dest)?;
    dest.delim(',', false)?;
    self.name.to_css(dest)?;
    write_optional_style(&self.style, dest)?;
    dest.write_char(')')
  }
}

/// A [`target-counters()`](https://www.w3.org/TR/css-gcpm-3/#target-counters) function.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetCounters {
  /// The referenced element.
  pub url: TargetUrl,
  /// The counter name.
  pub name: CustomIdent,
  /// The string inserted between nested counter values.
  pub separator: CSSString,
  /// The counter style.
  pub style: Option<CounterStyle>,
}

impl<'i> Parse<'i> for TargetCounters {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("target-counters")?;
    input.parse_nested_block(|input| {
      let url = TargetUrl::parse(input)?;
      input.expect_comma()?;
      let name = CustomIdent::parse(input)?;
      input.expect_comma()?;
      let separator = CSSString::parse(input)?;
      let style = parse_optional_style(input)?;
      Ok(TargetCounters {
        url,
        name,
        separator,
        style,
      })
    })
  }
}

impl ToCss for TargetCounters {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("target-counters(")?;
    self.url.to_css(dest)?;
    dest.delim(',', false)?;
    self.name.to_css(dest)?;
    dest.delim(',', false)?;
    self.separator.to_css(dest)?;
    write_optional_style(&self.style, dest)?;
    dest.write_char(')')
  }
}

enum_property! {
  /// The part of the referenced element's text retrieved by `target-text()`.
  pub enum TargetTextPart {
    "content": Content,
    "before": Before,
    "after": After,
    "first-letter": FirstLetter,
  }
}

/// A [`target-text()`](https://www.w3.org/TR/css-gcpm-3/#target-text) function.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetText {
  /// The referenced element.
  pub url: TargetUrl,
  /// The retrieved part, `content` when omitted.
  pub part: Option<TargetTextPart>,
}

impl<'i> Parse<'i> for TargetText {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    input.expect_function_matching("target-text")?;
    input.parse_nested_block(|input| {
      let url = TargetUrl::parse(input)?;
      let part = if input.try_parse(|input| input.expect_comma()).is_ok() {
        Some(TargetTextPart::parse(input)?)
      } else {
        None
      };
      Ok(TargetText { url, part })
    })
  }
}

impl ToCss for TargetText {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    dest.write_str("target-text(")?;
    self.url.to_css(dest)?;
    if let Some(part) = &self.part {
      dest.delim(',', false)?;
      part.to_css(dest)?;
    }
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
  fn test_counters() {
    test::<Counter>("counter(chapter)", "counter(chapter)");
    test::<Counter>("counter(chapter,upper-roman)", "counter(chapter, upper-roman)");
    test::<Counter>(
      "counter(item, symbols(cyclic '*' '+'))",
      "counter(item, symbols(cyclic \"*\" \"+\"))",
    );
    test::<Counters>("counters(section, '.', decimal)", "counters(section, \".\", decimal)");
    test::<Symbols>("symbols('a')", "symbols(\"a\")");
    assert!(Counter::parse_string("counter(inherit)").is_err());
    assert!(Counters::parse_string("counters(section)").is_err());
    assert!(Symbols::parse_string("symbols(fixed)").is_err());
  }

  #[test]
  fn test_substitutions() {
    test::<Var>("var(--main-color)", "var(--main-color)");
    test::<Var>("var(--gap, 1px 2px)", "var(--gap, 1px 2px)");
    test::<Var>("var(--x,)", "var(--x,)");
    test::<Var>("var(--a, var(--b, red))", "var(--a, var(--b, red))");
    test::<Env>("env(safe-area-inset-top, 20px)", "env(safe-area-inset-top, 20px)");
    test::<Env>("env(viewport-segment-width 0 0)", "env(viewport-segment-width 0 0)");
    test::<Attr>("attr(data-count)", "attr(data-count)");
    test::<Attr>("attr(data-width px, 10px)", "attr(data-width px, 10px)");
    test::<Attr>("attr(data-ratio %)", "attr(data-ratio %)");
    assert!(Var::parse_string("var(main-color)").is_err());
  }

  #[test]
  fn test_references() {
    test::<Leader>("leader(dotted)", "leader(dotted)");
    test::<Leader>("leader('. ')", "leader(\". \")");
    test::<TargetCounter>("target-counter(attr(href url), page)", "target-counter(attr(href url), page)");
    test::<TargetCounter>("target-counter(\"#intro\", page, lower-roman)", "target-counter(\"#intro\", page, lower-roman)");
    test::<TargetCounters>(
      "target-counters(url(#a), section, '.')",
      "target-counters(url(\"#a\"), section, \".\")",
    );
    test::<TargetText>("target-text(url(#a), first-letter)", "target-text(url(\"#a\"), first-letter)");
    assert!(Leader::parse_string("leader(dashed)").is_err());
  }
}
