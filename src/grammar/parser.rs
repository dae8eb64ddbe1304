//! A parser for the [value definition syntax](https://www.w3.org/TR/css-values-4/#value-defs).
//!
//! Combinators bind in the order juxtaposition, `&&`, `||`, `|`, from tightest to loosest.
//! Multipliers follow a component directly, without whitespace in between.

use super::node::{GrammarArena, GrammarNode, NodeId, NodeKind, Quantifier};
use super::types::is_primitive;
use crate::error::{GrammarError, GrammarErrorKind};

// https://drafts.csswg.org/css-syntax-3/#whitespace
static SPACE_CHARACTERS: &'static [char] = &['\u{0020}', '\u{0009}', '\u{000A}', '\u{000C}', '\u{000D}'];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Combinator {
  /// `|`
  Alternation,
  /// `||`
  Subset,
  /// `&&`
  Unordered,
}

/// Compiles a syntax string into the arena and returns the root node.
///
/// Names that are not primitive data types become references to named slots of the arena.
pub fn parse_syntax(arena: &mut GrammarArena, syntax: &str) -> Result<NodeId, GrammarError> {
  let mut parser = SyntaxParser {
    source: syntax,
    input: syntax,
    arena,
  };
  let root = parser.parse_alternation()?;
  parser.skip_whitespace();
  if let Some(c) = parser.input.chars().next() {
    return Err(parser.error(GrammarErrorKind::UnexpectedChar(c)));
  }
  Ok(root)
}

/// Compiles the syntax of a named data type or property into its slot, and returns the slot.
///
/// On failure the slot stays a placeholder.
pub fn compile_named(arena: &mut GrammarArena, name: &str, syntax: &str) -> Result<NodeId, GrammarError> {
  let slot = arena.slot(name);
  let root = parse_syntax(arena, syntax)?;
  arena.fill(slot, root);
  Ok(slot)
}

struct SyntaxParser<'a, 'g> {
  source: &'a str,
  input: &'a str,
  arena: &'g mut GrammarArena,
}

impl<'a, 'g> SyntaxParser<'a, 'g> {
  fn offset(&self) -> usize {
    self.source.len() - self.input.len()
  }

  fn error(&self, kind: GrammarErrorKind) -> GrammarError {
    GrammarError::at(kind, self.offset())
  }

  fn skip_whitespace(&mut self) {
    self.input = self.input.trim_start_matches(SPACE_CHARACTERS);
  }

  fn push(&mut self, kind: NodeKind, start: usize) -> NodeId {
    let raw = &self.source[start..self.offset()];
    self.arena.push(GrammarNode::new(kind, raw))
  }

  fn peek_combinator(&mut self) -> Result<Option<(Combinator, usize)>, GrammarError> {
    self.skip_whitespace();
    let c = match self.input.chars().next() {
      Some(c @ ('|' | '&')) => c,
      _ => return Ok(None),
    };
    let len = self.input.find(|x| x != c).unwrap_or(self.input.len());
    match (c, len) {
      ('|', 1) => Ok(Some((Combinator::Alternation, 1))),
      ('|', 2) => Ok(Some((Combinator::Subset, 2))),
      ('&', 2) => Ok(Some((Combinator::Unordered, 2))),
      _ => Err(self.error(GrammarErrorKind::UnknownCombinator(self.input[..len].to_owned()))),
    }
  }

  fn parse_alternation(&mut self) -> Result<NodeId, GrammarError> {
    self.parse_combined(Combinator::Alternation)
  }

  /// Parses operands joined by `combinator`, each of which binds tighter.
  fn parse_combined(&mut self, combinator: Combinator) -> Result<NodeId, GrammarError> {
    self.skip_whitespace();
    let start = self.offset();
    let mut children = vec![self.parse_operand(combinator)?];
    loop {
      match self.peek_combinator()? {
        Some((c, len)) if c == combinator => {
          self.input = &self.input[len..];
          children.push(self.parse_operand(combinator)?);
        }
        _ => break,
      }
    }

    if children.len() == 1 {
      return Ok(children[0]);
    }

    let kind = match combinator {
      Combinator::Alternation => NodeKind::Alternation(children),
      Combinator::Subset => NodeKind::Subset(children),
      Combinator::Unordered => NodeKind::UnorderedSequence(children),
    };
    Ok(self.push(kind, start))
  }

  fn parse_operand(&mut self, combinator: Combinator) -> Result<NodeId, GrammarError> {
    match combinator {
      Combinator::Alternation => self.parse_combined(Combinator::Subset),
      Combinator::Subset => self.parse_combined(Combinator::Unordered),
      Combinator::Unordered => self.parse_juxtaposition(),
    }
  }

  fn parse_juxtaposition(&mut self) -> Result<NodeId, GrammarError> {
    self.skip_whitespace();
    let start = self.offset();
    let mut children = Vec::new();
    loop {
      self.skip_whitespace();
      match self.input.chars().next() {
        None | Some(']' | ')' | '|' | '&') => break,
        Some(_) => children.push(self.parse_component()?),
      }
    }

    match children.len() {
      0 => match self.input.chars().next() {
        Some(_) => Err(self.error(GrammarErrorKind::EmptyGroup)),
        None => Err(self.error(GrammarErrorKind::UnexpectedEnd)),
      },
      1 => Ok(children[0]),
      _ => Ok(self.push(NodeKind::OrderedSequence(children), start)),
    }
  }

  fn parse_component(&mut self) -> Result<NodeId, GrammarError> {
    let start = self.offset();
    let c = match self.input.chars().next() {
      Some(c) => c,
      None => return Err(self.error(GrammarErrorKind::UnexpectedEnd)),
    };

    let node = match c {
      '[' => {
        self.input = &self.input[1..];
        self.skip_whitespace();
        if self.input.starts_with(']') {
          return Err(self.error(GrammarErrorKind::EmptyGroup));
        }
        let group = self.parse_alternation()?;
        self.skip_whitespace();
        if !self.input.starts_with(']') {
          return Err(self.error(GrammarErrorKind::UnclosedGroup));
        }
        self.input = &self.input[1..];
        group
      }
      '<' => self.parse_data_type(start)?,
      '\'' | '"' => {
        let rest = &self.input[1..];
        let end = match rest.find(c) {
          Some(end) => end,
          None => return Err(self.error(GrammarErrorKind::UnexpectedEnd)),
        };
        let text = rest[..end].to_owned();
        self.input = &rest[end + 1..];
        self.push(NodeKind::Literal(text), start)
      }
      ',' | '/' => {
        self.input = &self.input[1..];
        self.push(NodeKind::Literal(c.to_string()), start)
      }
      c if is_name_code_point(c) => {
        let end = self.input.find(|c| !is_name_code_point(c)).unwrap_or(self.input.len());
        let name = self.input[..end].to_owned();
        self.input = &self.input[end..];
        if self.input.starts_with('(') {
          self.parse_function(name, start)?
        } else {
          self.push(NodeKind::Literal(name), start)
        }
      }
      c => return Err(self.error(GrammarErrorKind::UnexpectedChar(c))),
    };

    self.parse_multipliers(node, start)
  }

  /// Parses `<name>`, `<name()>`, `<'property'>` and `<name [min,max]>`.
  fn parse_data_type(&mut self, start: usize) -> Result<NodeId, GrammarError> {
    let end = match self.input.find('>') {
      Some(end) => end,
      None => return Err(self.error(GrammarErrorKind::UnclosedGroup)),
    };
    let inner = self.input[1..end].trim_matches(SPACE_CHARACTERS);
    self.input = &self.input[end + 1..];

    // The range of a numeric type is not enforced.
    let name = match inner.find(|c| SPACE_CHARACTERS.contains(&c) || c == '[') {
      Some(idx) => inner[..idx].to_owned(),
      None => inner.to_owned(),
    };
    if name.is_empty() {
      return Err(self.error(GrammarErrorKind::EmptyGroup));
    }

    if let Some(function) = name.strip_suffix("()") {
      let function = function.to_owned();
      return Ok(self.push(
        NodeKind::FunctionCall {
          name: function,
          children: Vec::new(),
        },
        start,
      ));
    }

    if is_primitive(&name) {
      return Ok(self.push(NodeKind::DataType(name), start));
    }

    let target = self.arena.slot(&name);
    Ok(self.push(NodeKind::Reference { name, target }, start))
  }

  fn parse_function(&mut self, name: String, start: usize) -> Result<NodeId, GrammarError> {
    // Skip the opening parenthesis.
    self.input = &self.input[1..];
    self.skip_whitespace();
    let children = if self.input.starts_with(')') {
      Vec::new()
    } else {
      vec![self.parse_alternation()?]
    };
    self.skip_whitespace();
    if !self.input.starts_with(')') {
      return Err(self.error(GrammarErrorKind::UnclosedGroup));
    }
    self.input = &self.input[1..];
    Ok(self.push(NodeKind::FunctionCall { name, children }, start))
  }

  /// Parses the multipliers that directly follow a component, and applies them.
  fn parse_multipliers(&mut self, mut node: NodeId, start: usize) -> Result<NodeId, GrammarError> {
    // Whether the last multiplier was a bare `#`, which a following `{m,n}` or `?` refines.
    let mut hash = false;
    loop {
      let c = match self.input.chars().next() {
        Some(c) => c,
        None => break,
      };
      let quantifier = match c {
        '?' => Quantifier::new(0, Some(1)),
        '*' => Quantifier::new(0, None),
        '+' => Quantifier::new(1, None),
        '#' => Quantifier {
          separator: Some(','),
          ..Quantifier::new(1, None)
        },
        '{' => self.parse_range()?,
        '!' => {
          self.input = &self.input[1..];
          self.arena.get_mut(node).quantifier.required = true;
          hash = false;
          continue;
        }
        _ => break,
      };
      if c != '{' {
        self.input = &self.input[1..];
      }

      if hash && (c == '{' || c == '?') {
        let q = &mut self.arena.get_mut(node).quantifier;
        if c == '{' {
          q.min = quantifier.min;
          q.max = quantifier.max;
        } else {
          q.min = 0;
        }
        hash = false;
        continue;
      }

      node = self.apply(node, quantifier, start);
      hash = c == '#';
    }
    Ok(node)
  }

  fn apply(&mut self, node: NodeId, quantifier: Quantifier, start: usize) -> NodeId {
    if self.arena.get(node).quantifier.is_one() {
      self.arena.get_mut(node).quantifier = quantifier;
      return node;
    }

    // Stacked multipliers, e.g. `<length>+#`, repeat the already quantified component.
    let wrapper = self.push(NodeKind::OrderedSequence(vec![node]), start);
    self.arena.get_mut(wrapper).quantifier = quantifier;
    wrapper
  }

  /// Parses `{m}`, `{m,}` or `{m,n}`.
  fn parse_range(&mut self) -> Result<Quantifier, GrammarError> {
    let end = match self.input.find('}') {
      Some(end) => end,
      None => {
        let text = self.input.to_owned();
        return Err(self.error(GrammarErrorKind::InvalidQuantifier(text)));
      }
    };
    let text = &self.input[..end + 1];
    let invalid = || GrammarErrorKind::InvalidQuantifier(text.to_owned());
    let body = &text[1..text.len() - 1];
    let parse = |s: &str| s.trim_matches(SPACE_CHARACTERS).parse::<u32>();

    let quantifier = match body.split_once(',') {
      None => {
        let n = parse(body).map_err(|_| self.error(invalid()))?;
        Quantifier::new(n, Some(n))
      }
      Some((min, max)) => {
        let min = parse(min).map_err(|_| self.error(invalid()))?;
        let max = if max.trim_matches(SPACE_CHARACTERS).is_empty() {
          None
        } else {
          Some(parse(max).map_err(|_| self.error(invalid()))?)
        };
        Quantifier::new(min, max)
      }
    };

    if let Some(max) = quantifier.max {
      if quantifier.min > max {
        return Err(self.error(invalid()));
      }
    }

    self.input = &self.input[end + 1..];
    Ok(quantifier)
  }
}

#[inline]
fn is_ident_start(c: char) -> bool {
  // https://drafts.csswg.org/css-syntax-3/#ident-start-code-point
  c >= 'A' && c <= 'Z' || c >= 'a' && c <= 'z' || c >= '\u{80}' || c == '_'
}

#[inline]
fn is_name_code_point(c: char) -> bool {
  // https://drafts.csswg.org/css-syntax-3/#ident-code-point
  is_ident_start(c) || c >= '0' && c <= '9' || c == '-'
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn test(source: &str, expected: &str) {
    let mut arena = GrammarArena::new();
    let root = parse_syntax(&mut arena, source).unwrap();
    assert_eq!(arena.to_syntax(root), expected);
  }

  fn error_test(source: &str, expected: GrammarErrorKind) {
    let mut arena = GrammarArena::new();
    assert_eq!(parse_syntax(&mut arena, source).unwrap_err().kind, expected);
  }

  fn quantifier(source: &str) -> Quantifier {
    let mut arena = GrammarArena::new();
    let root = parse_syntax(&mut arena, source).unwrap();
    arena.get(root).quantifier
  }

  #[test]
  fn test_combinators() {
    test("auto | <length>", "auto | <length>");
    test("a b | c d", "[ a b ] | [ c d ]");
    test("a | b || c && d e", "a | [ b || [ c && [ d e ] ] ]");
    test("[ a | b ] c", "[ a | b ] c");
    test("[a|b]", "a | b");
    test("[ [ a ] ]", "a");
    test("a, b / c", "a , b / c");
    test("'[' <custom-ident>* ']'", "'[' <custom-ident>* ']'");
  }

  #[test]
  fn test_components() {
    test("<length [0,∞]>", "<length>");
    test("<'margin-top'>", "<'margin-top'>");
    test("<rotate()>", "rotate()");
    test("fit-content( <length-percentage> )", "fit-content( <length-percentage> )");
    test("rect()", "rect()");
    test("currentColor", "currentColor");

    let mut arena = GrammarArena::new();
    let root = parse_syntax(&mut arena, "<line-width> | <length>").unwrap();
    let children = arena.get(root).children().to_vec();
    assert_eq!(
      arena.get(children[0]).kind,
      NodeKind::Reference {
        name: "line-width".into(),
        target: arena.lookup("line-width").unwrap(),
      }
    );
    assert_eq!(arena.get(children[1]).kind, NodeKind::DataType("length".into()));
    assert_eq!(arena.get(children[1]).raw, "<length>");
  }

  #[test]
  fn test_multipliers() {
    assert_eq!(quantifier("<length>{2,4}"), Quantifier::new(2, Some(4)));
    assert_eq!(
      quantifier("<percentage>#"),
      Quantifier {
        separator: Some(','),
        ..Quantifier::new(1, None)
      }
    );
    assert_eq!(
      quantifier("<length>#{1,4}"),
      Quantifier {
        separator: Some(','),
        ..Quantifier::new(1, Some(4))
      }
    );
    assert_eq!(quantifier("<length>{3}"), Quantifier::new(3, Some(3)));
    assert_eq!(quantifier("<length>{1,}"), Quantifier::new(1, None));
    assert_eq!(quantifier("a?"), Quantifier::new(0, Some(1)));
    assert_eq!(quantifier("a*"), Quantifier::new(0, None));
    assert!(quantifier("[ a? b? ]!").required);
    test("[ a | b ]#", "[ a | b ]#");
    test("<length>+#", "[ <length>+ ]#");
    test("<length>#?", "<length>#{0,}");
  }

  #[test]
  fn test_errors() {
    error_test("a ||| b", GrammarErrorKind::UnknownCombinator("|||".into()));
    error_test("a & b", GrammarErrorKind::UnknownCombinator("&".into()));
    error_test("<length>{4,2}", GrammarErrorKind::InvalidQuantifier("{4,2}".into()));
    error_test("<length>{a}", GrammarErrorKind::InvalidQuantifier("{a}".into()));
    error_test("[ a b", GrammarErrorKind::UnclosedGroup);
    error_test("<length", GrammarErrorKind::UnclosedGroup);
    error_test("[ ]", GrammarErrorKind::EmptyGroup);
    error_test("a | | b", GrammarErrorKind::EmptyGroup);
    error_test("a ]", GrammarErrorKind::UnexpectedChar(']'));
    error_test("a | ", GrammarErrorKind::UnexpectedEnd);
    error_test("a = b", GrammarErrorKind::UnexpectedChar('='));
  }

  #[test]
  fn test_named() {
    let mut arena = GrammarArena::new();
    let root = parse_syntax(&mut arena, "<line-width>{1,4}").unwrap();
    let slot = arena.lookup("line-width").unwrap();
    assert!(!arena.is_filled(slot));
    assert_eq!(compile_named(&mut arena, "line-width", "<length> | thin | medium | thick").unwrap(), slot);
    assert!(arena.is_filled(slot));
    assert_eq!(arena.resolve(root), slot);
    assert_eq!(arena.to_syntax(slot), "<length> | thin | medium | thick");
  }
}
