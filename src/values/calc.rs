//! Mathematical calculation functions and expressions.

use super::value::{parse_nested, Value, ValueKind};
use crate::error::{ParserError, PrinterError};
use crate::macros::enum_property;
use crate::printer::Printer;
use crate::traits::{Parse, ToCss};
use cssparser::*;

enum_property! {
  /// The name of a [math function](https://www.w3.org/TR/css-values-4/#math).
  pub enum MathFunctionName {
    "calc": Calc,
    "min": Min,
    "max": Max,
    "clamp": Clamp,
    "round": Round,
    "mod": Mod,
    "rem": Rem,
    "sin": Sin,
    "cos": Cos,
    "tan": Tan,
    "asin": Asin,
    "acos": Acos,
    "atan": Atan,
    "atan2": Atan2,
    "pow": Pow,
    "sqrt": Sqrt,
    "hypot": Hypot,
    "log": Log,
    "exp": Exp,
    "abs": Abs,
    "sign": Sign,
    "calc-size": CalcSize,
    "anchor": Anchor,
  }
}

enum_property! {
  /// A [rounding strategy](https://www.w3.org/TR/css-values-4/#typedef-rounding-strategy),
  /// as used in the `round()` function.
  pub enum RoundingStrategy {
    "nearest": Nearest,
    "up": Up,
    "down": Down,
    "to-zero": ToZero,
  }
}

/// A math function such as `calc()`, `clamp()` or `round()`.
///
/// The expression tree is kept as written; nothing is simplified.
#[derive(Debug, Clone, PartialEq)]
pub struct MathFunction {
  /// The function name.
  pub name: MathFunctionName,
  /// The comma separated arguments.
  pub args: Vec<Calc>,
}

/// A node of a math expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Calc {
  /// `a + b`
  Sum(Box<Calc>, Box<Calc>),
  /// `a - b`
  Difference(Box<Calc>, Box<Calc>),
  /// `a * b`
  Product(Box<Calc>, Box<Calc>),
  /// `a / b`
  Quotient(Box<Calc>, Box<Calc>),
  /// A numeric leaf, or a substitution function such as `var()`.
  Value(Box<Value>),
  /// A keyword, e.g. a constant like `pi` or a rounding strategy.
  Keyword(String),
  /// A nested math function.
  Function(Box<MathFunction>),
}

impl<'i> Parse<'i> for MathFunction {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let location = input.current_source_location();
    let f = input.expect_function()?;
    let name = match MathFunctionName::from_str(f) {
      Some(name) => name,
      None => return Err(location.new_unexpected_token_error(Token::Function(f.clone()))),
    };

    parse_nested(input, |input| {
      input.parse_nested_block(|input| {
        let args = input.parse_comma_separated(Calc::parse_sum)?;
        Ok(MathFunction { name, args })
      })
    })
  }
}

impl ToCss for MathFunction {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    self.name.to_css(dest)?;
    dest.write_char('(')?;
    crate::traits::to_css_comma_separated(&self.args, dest)?;
    dest.write_char(')')
  }
}

impl MathFunction {
  /// Returns whether the function is a plain `calc()` wrapper.
  pub fn is_calc(&self) -> bool {
    self.name == MathFunctionName::Calc
  }
}

impl<'i> Parse<'i> for Calc {
  fn parse<'t>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    Calc::parse_sum(input)
  }
}

impl Calc {
  fn parse_sum<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let mut cur = Calc::parse_product(input)?;
    loop {
      let start = input.state();
      match input.next_including_whitespace() {
        Ok(&Token::WhiteSpace(_)) => {
          if input.is_exhausted() {
            break; // allow trailing whitespace
          }
          match *input.next()? {
            Token::Delim('+') => {
              let next = Calc::parse_product(input)?;
              cur = Calc::Sum(Box::new(cur), Box::new(next));
            }
            Token::Delim('-') => {
              let next = Calc::parse_product(input)?;
              cur = Calc::Difference(Box::new(cur), Box::new(next));
            }
            ref t => {
              let t = t.clone();
              return Err(input.new_unexpected_token_error(t));
            }
          }
        }
        _ => {
          input.reset(&start);
          break;
        }
      }
    }
    Ok(cur)
  }

  fn parse_product<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let mut node = Calc::parse_value(input)?;
    loop {
      let start = input.state();
      match input.next() {
        Ok(&Token::Delim('*')) => {
          let rhs = Calc::parse_value(input)?;
          node = Calc::Product(Box::new(node), Box::new(rhs));
        }
        Ok(&Token::Delim('/')) => {
          let rhs = Calc::parse_value(input)?;
          node = Calc::Quotient(Box::new(node), Box::new(rhs));
        }
        _ => {
          input.reset(&start);
          break;
        }
      }
    }
    Ok(node)
  }

  fn parse_value<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Self, ParseError<'i, ParserError<'i>>> {
    let start = input.state();
    let is_math = matches!(input.next(), Ok(Token::Function(name)) if MathFunctionName::from_str(name).is_some());
    input.reset(&start);
    if is_math {
      return Ok(Calc::Function(Box::new(MathFunction::parse(input)?)));
    }

    if input.try_parse(|input| input.expect_parenthesis_block()).is_ok() {
      return parse_nested(input, |input| input.parse_nested_block(Calc::parse_sum));
    }

    let location = input.current_source_location();
    let value = Value::parse(input)?;
    match value {
      Value::Keyword(ident) => Ok(Calc::Keyword(ident.0.to_ascii_lowercase())),
      v if is_calc_operand(v.kind()) => Ok(Calc::Value(Box::new(v))),
      _ => Err(location.new_custom_error(ParserError::InvalidValue)),
    }
  }

  fn precedence(&self) -> u8 {
    match self {
      Calc::Sum(..) | Calc::Difference(..) => 1,
      Calc::Product(..) | Calc::Quotient(..) => 2,
      _ => 3,
    }
  }

  fn operand_to_css<W>(&self, dest: &mut Printer<W>, parenthesize: bool) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    if parenthesize {
      dest.write_char('(')?;
      self.to_css(dest)?;
      dest.write_char(')')
    } else {
      self.to_css(dest)
    }
  }
}

fn is_calc_operand(kind: ValueKind) -> bool {
  use ValueKind::*;
  matches!(
    kind,
    Number | Integer | Percentage | Length | Angle | Time | Frequency | Resolution | Flex | Var | Env | Attr | AnchorSize
  )
}

impl ToCss for Calc {
  fn to_css<W>(&self, dest: &mut Printer<W>) -> Result<(), PrinterError>
  where
    W: std::fmt::Write,
  {
    // Operators are left associative, so a right operand of equal precedence
    // needs parentheses, while a left one does not.
    let binary = |dest: &mut Printer<W>, a: &Calc, b: &Calc, op: char| -> Result<(), PrinterError> {
      let prec = self.precedence();
      a.operand_to_css(dest, a.precedence() < prec)?;
      if op == '+' || op == '-' {
        // Whitespace around + and - is required.
        dest.write_char(' ')?;
        dest.write_char(op)?;
        dest.write_char(' ')?;
      } else {
        dest.delim(op, true)?;
      }
      b.operand_to_css(dest, b.precedence() <= prec)
    };

    match self {
      Calc::Sum(a, b) => binary(dest, &**a, &**b, '+'),
      Calc::Difference(a, b) => binary(dest, &**a, &**b, '-'),
      Calc::Product(a, b) => binary(dest, &**a, &**b, '*'),
      Calc::Quotient(a, b) => binary(dest, &**a, &**b, '/'),
      Calc::Value(v) => v.to_css(dest),
      Calc::Keyword(k) => dest.write_ident(k),
      Calc::Function(f) => f.to_css(dest),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::printer::PrinterOptions;

  fn test(source: &str, expected: &str) {
    let f = MathFunction::parse_string(source).unwrap();
    assert_eq!(f.to_css_string(PrinterOptions::default()).unwrap(), expected);
    assert_eq!(MathFunction::parse_string(expected).unwrap(), f);
  }

  #[test]
  fn test_calc() {
    test("calc(1px + 2%)", "calc(1px + 2%)");
    test("calc( 100% - 2 * 10px )", "calc(100% - 2 * 10px)");
    test("calc((1px + 2px) * 3)", "calc((1px + 2px) * 3)");
    test("calc(1px - (2px - 3px))", "calc(1px - (2px - 3px))");
    test("calc(1px - 2px - 3px)", "calc(1px - 2px - 3px)");
    test("calc(100% / (2 / 3))", "calc(100% / (2 / 3))");
    test("calc(var(--gap) * 2)", "calc(var(--gap) * 2)");
    test("CALC(2 * pi)", "calc(2 * pi)");
  }

  #[test]
  fn test_math_functions() {
    test("min(10px, 5vw)", "min(10px, 5vw)");
    test("clamp(1rem, 2.5vw, 2rem)", "clamp(1rem, 2.5vw, 2rem)");
    test("round(to-zero, 7px, 2px)", "round(to-zero, 7px, 2px)");
    test("max(1px, calc(2px + 1em))", "max(1px, calc(2px + 1em))");
    test("atan2(1, 2)", "atan2(1, 2)");
    assert!(MathFunction::parse_string("calc(1px +)").is_err());
    assert!(MathFunction::parse_string("calc(1px+2px)").is_err());
    assert!(MathFunction::parse_string("calc(red)").is_err());
    assert!(MathFunction::parse_string("foo(1px)").is_err());
  }

  #[test]
  fn test_nesting() {
    use crate::values::value::{parse_list, MAX_NESTING};

    let nested = |open: &str, close: &str, n: usize| format!("{}1px{}", open.repeat(n), close.repeat(n));
    assert!(parse_list(&nested("calc(", ")", 100)).is_ok());
    assert!(parse_list(&nested("calc(", ")", MAX_NESTING * 4)).is_err());
    assert!(parse_list(&format!("calc({})", nested("(", ")", 100))).is_ok());
    assert!(parse_list(&format!("calc({})", nested("(", ")", MAX_NESTING * 4))).is_err());
    assert!(parse_list(&nested("[", "]", MAX_NESTING * 4)).is_err());
    assert!(parse_list(&nested("min(1px, ", ")", MAX_NESTING * 4)).is_err());

    // The limit applies per value, not cumulatively.
    for _ in 0..3 {
      assert!(parse_list(&nested("calc(", ")", 100)).is_ok());
    }
  }
}
