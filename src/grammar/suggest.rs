//! Computing the values that may come next at a matching position.

use super::matcher::{Expectation, Matcher, Progress, Reduction, MAX_DEPTH};
use super::node::{GrammarArena, NodeId, NodeKind};
use super::types::{composite_kinds, data_type_kinds};
use crate::error::{Error, SuggestionError, SuggestionErrorKind};
use crate::traits::Parse;
use crate::values::value::{function_kind, Value, ValueKind};
use indexmap::IndexSet;
use serde::Serialize;

/// A value that is valid at a matching position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Suggestion {
  /// A keyword, in lowercase.
  Keyword {
    /// The keyword.
    keyword: String,
  },
  /// Any value of a primitive data type.
  DataType {
    /// The data type name, e.g. `length-percentage`.
    name: String,
    /// The value kinds it accepts.
    kinds: &'static [ValueKind],
  },
  /// A call of a function.
  Function {
    /// The function name.
    name: String,
    /// The kind of value the function produces.
    kind: ValueKind,
  },
  /// A delimiter, e.g. the `,` between the items of a list.
  Delimiter {
    /// The delimiter character.
    delimiter: char,
  },
}

impl Suggestion {
  /// A short label for display, e.g. `auto`, `<length>` or `rotate()`.
  pub fn label(&self) -> String {
    match self {
      Suggestion::Keyword { keyword } => keyword.clone(),
      Suggestion::DataType { name, .. } => format!("<{}>", name),
      Suggestion::Function { name, .. } => format!("{}()", name),
      Suggestion::Delimiter { delimiter } => delimiter.to_string(),
    }
  }

  /// Returns a value an editor may insert for this suggestion.
  pub fn default_value(&self) -> Option<Value> {
    match self {
      Suggestion::Keyword { keyword } => Value::parse_string(keyword).ok(),
      Suggestion::DataType { kinds, .. } => kinds.iter().find_map(|kind| kind.default_value()),
      Suggestion::Function { kind, .. } => kind.default_value(),
      Suggestion::Delimiter { delimiter } => Some(Value::Delimiter(*delimiter)),
    }
  }
}

type Suggestions = IndexSet<Suggestion>;

/// Returns the values that may follow the input an expectation has consumed.
pub fn suggestions<M: Matcher + ?Sized>(matcher: &M, expectation: &Expectation) -> Result<Suggestions, SuggestionError> {
  let mut collector = Collector {
    matcher,
    arena: matcher.arena(),
    result: IndexSet::new(),
  };
  collector.expectation(expectation, 0)?;
  Ok(collector.result)
}

/// Folds a list of values into a root node and returns the values that may follow.
///
/// Rejected values are skipped, so a typo in the middle of a declaration does not hide the
/// suggestions for the rest of it.
pub fn suggest_at<M: Matcher + ?Sized>(
  matcher: &M,
  root: NodeId,
  values: &[Value],
) -> Result<Suggestions, SuggestionError> {
  let mut expectation = matcher.start(root);
  for value in values {
    match matcher.reduce(&expectation, value) {
      Reduction::Rejected => continue,
      Reduction::Exhausted(_) => return Ok(IndexSet::new()),
      Reduction::Partial(next) => expectation = next,
    }
  }
  suggestions(matcher, &expectation)
}

struct Collector<'m, M: Matcher + ?Sized> {
  matcher: &'m M,
  arena: &'m GrammarArena,
  result: Suggestions,
}

impl<'m, M: Matcher + ?Sized> Collector<'m, M> {
  fn expectation(&mut self, e: &Expectation, depth: usize) -> Result<(), SuggestionError> {
    let node = self.arena.get(e.node);
    if depth > MAX_DEPTH {
      return Err(nesting_too_deep(&node.raw));
    }
    let quantifier = node.quantifier;
    let count = match &e.current {
      Some(progress) => {
        if !self.progress(e.node, progress, depth + 1)? {
          return Ok(());
        }
        e.count + 1
      }
      None => e.count,
    };

    if !quantifier.allows(count) {
      return Ok(());
    }
    match quantifier.separator {
      Some(separator) if count > 0 && !e.after_separator => {
        self.result.insert(Suggestion::Delimiter { delimiter: separator });
        Ok(())
      }
      _ => self.fresh(e.node, depth + 1),
    }
  }

  /// Adds the suggestions of the repetition in progress. Returns whether it may be closed, so
  /// that a new repetition could start instead.
  fn progress(&mut self, id: NodeId, progress: &Progress, depth: usize) -> Result<bool, SuggestionError> {
    let arena = self.arena;
    let node = arena.get(id);
    match progress {
      Progress::Sequence { index, child } => {
        self.expectation(child, depth + 1)?;
        if !self.satisfied(child) {
          return Ok(false);
        }
        self.heads(&node.children()[index + 1..], depth)
      }
      Progress::Choice { child, .. } | Progress::Reference(child) => {
        self.expectation(child, depth + 1)?;
        Ok(self.satisfied(child))
      }
      Progress::Group { states, active } => {
        if let Some(Some(state)) = states.get(*active) {
          self.expectation(state, depth + 1)?;
          if !self.satisfied(state) {
            return Ok(false);
          }
        }
        let mut complete = true;
        let unordered = matches!(node.kind, NodeKind::UnorderedSequence(_));
        for (state, child) in states.iter().zip(node.children()) {
          if state.is_none() {
            self.expectation(&Expectation::new(*child), depth + 1)?;
            if unordered && !self.nullable(*child) {
              complete = false;
            }
          }
        }
        Ok(complete)
      }
    }
  }

  /// Adds the suggestions for starting a new repetition of a node.
  fn fresh(&mut self, id: NodeId, depth: usize) -> Result<(), SuggestionError> {
    let arena = self.arena;
    let node = arena.get(id);
    if depth > MAX_DEPTH {
      return Err(nesting_too_deep(&node.raw));
    }
    match &node.kind {
      NodeKind::Literal(text) => {
        let mut chars = text.chars();
        let suggestion = match (chars.next(), chars.next()) {
          (Some(c), None) if !c.is_alphanumeric() => Suggestion::Delimiter { delimiter: c },
          _ => Suggestion::Keyword {
            keyword: text.to_ascii_lowercase(),
          },
        };
        self.result.insert(suggestion);
      }
      NodeKind::DataType(name) => {
        if let Some(kinds) = data_type_kinds(name) {
          self.result.insert(Suggestion::DataType {
            name: name.clone(),
            kinds,
          });
        }
      }
      NodeKind::FunctionCall { name, .. } => match function_kind(name) {
        Some(kind) => {
          self.result.insert(Suggestion::Function {
            name: name.to_ascii_lowercase(),
            kind,
          });
        }
        None => return Err(unknown_data_type(name, &node.raw)),
      },
      NodeKind::Placeholder => {
        let name = node.name.as_deref().unwrap_or_default();
        return Err(unknown_data_type(name, &node.raw));
      }
      NodeKind::Reference { name, target } => {
        if !arena.is_filled(*target) {
          return Err(unknown_data_type(name, &node.raw));
        }
        match composite_kinds(name) {
          Some(kinds) => {
            self.result.insert(Suggestion::DataType {
              name: name.clone(),
              kinds,
            });
          }
          None => self.expectation(&Expectation::new(*target), depth + 1)?,
        }
      }
      NodeKind::OrderedSequence(children) => {
        self.heads(children, depth)?;
      }
      NodeKind::Alternation(children) | NodeKind::Subset(children) | NodeKind::UnorderedSequence(children) => {
        for child in children {
          self.expectation(&Expectation::new(*child), depth + 1)?;
        }
      }
    }
    Ok(())
  }

  /// Adds the suggestions for the children of a sequence up to the first one that is not
  /// nullable. Returns whether all of them are nullable.
  fn heads(&mut self, children: &[NodeId], depth: usize) -> Result<bool, SuggestionError> {
    for child in children {
      self.expectation(&Expectation::new(*child), depth + 1)?;
      if !self.nullable(*child) {
        return Ok(false);
      }
    }
    Ok(true)
  }

  fn satisfied(&self, e: &Expectation) -> bool {
    self.matcher.is_satisfied(e)
  }

  fn nullable(&self, id: NodeId) -> bool {
    self.matcher.is_satisfied(&Expectation::new(id))
  }
}

fn unknown_data_type(name: &str, raw: &str) -> SuggestionError {
  Error {
    kind: SuggestionErrorKind::UnknownDataType {
      name: name.to_owned(),
      raw: raw.to_owned(),
    },
    loc: None,
  }
}

fn nesting_too_deep(raw: &str) -> SuggestionError {
  Error {
    kind: SuggestionErrorKind::NestingTooDeep { raw: raw.to_owned() },
    loc: None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::matcher::GreedyMatcher;
  use crate::grammar::parser::{compile_named, parse_syntax};
  use crate::printer::PrinterOptions;
  use crate::traits::ToCss;
  use crate::values::value::parse_list;
  use pretty_assertions::assert_eq;

  fn test(syntax: &str, input: &str, expected: &[&str]) {
    let mut arena = GrammarArena::new();
    compile_named(&mut arena, "line-width", "<length> | thin | medium | thick").unwrap();
    let root = parse_syntax(&mut arena, syntax).unwrap();
    let matcher = GreedyMatcher::new(&arena);
    let values = parse_list(input).unwrap();
    let labels: Vec<String> = suggest_at(&matcher, root, &values)
      .unwrap()
      .iter()
      .map(|s| s.label())
      .collect();
    assert_eq!(labels, expected);
  }

  #[test]
  fn test_leaves() {
    test("auto | <length>", "", &["auto", "<length>"]);
    test("<length> | auto", "", &["<length>", "auto"]);
    test("auto | auto | <length> | <length>", "", &["auto", "<length>"]);
    test("rotate( <angle> ) | <scale()>", "", &["rotate()", "scale()"]);
    test("',' | '/'", "", &[",", "/"]);
  }

  #[test]
  fn test_sequences() {
    test("<length> <percentage>", "", &["<length>"]);
    test("<length> <percentage>", "1px", &["<percentage>"]);
    test("<length> <percentage>", "1px 10%", &[]);
    test("<length>? <percentage>", "", &["<length>", "<percentage>"]);
    test("<length> <percentage>?", "1px", &["<percentage>"]);
    test("<length>+", "1px", &["<length>"]);
  }

  #[test]
  fn test_groups() {
    test("<length> || <color>", "", &["<length>", "<color>"]);
    test("<length> || <color>", "1px", &["<color>"]);
    test("<length> && <color>", "red", &["<length>"]);
    test("<length>+ && <color>", "1px", &["<length>", "<color>"]);
  }

  #[test]
  fn test_lists() {
    test("<percentage>#", "", &["<percentage>"]);
    test("<percentage>#", "10%", &[","]);
    test("<percentage>#", "10%,", &["<percentage>"]);
    test("[ <length> <color>? ]#", "1px", &["<color>", ","]);
  }

  #[test]
  fn test_references() {
    test("<line-width>{1,4}", "", &["<length>", "thin", "medium", "thick"]);
    test("<line-width>{1,4}", "thin", &["<length>", "thin", "medium", "thick"]);
    test("<line-width>{1,4}", "1px 2px 3px 4px", &[]);
    // Rejected values are skipped.
    test("<line-width>{1,4}", "thin 10% medium", &["<length>", "thin", "medium", "thick"]);
  }

  #[test]
  fn test_composite_data_types() {
    let mut arena = GrammarArena::new();
    compile_named(
      &mut arena,
      "position",
      "[ left | center | right ] || [ top | center | bottom ] | <length-percentage>{2}",
    )
    .unwrap();
    compile_named(&mut arena, "ratio", "<number> [ / <number> ]?").unwrap();
    let root = parse_syntax(&mut arena, "<position> | auto || <ratio>").unwrap();
    let matcher = GreedyMatcher::new(&arena);

    let result: Vec<Suggestion> = suggest_at(&matcher, root, &[]).unwrap().into_iter().collect();
    let labels: Vec<String> = result.iter().map(|s| s.label()).collect();
    assert_eq!(labels, ["<position>", "auto", "<ratio>"]);
    let defaults: Vec<String> = result
      .iter()
      .filter_map(|s| s.default_value())
      .map(|v| v.to_css_string(PrinterOptions::default()).unwrap())
      .collect();
    assert_eq!(defaults, ["center", "auto", "1 / 1"]);

    // Once a position is under way, its own grammar drives the suggestions.
    let values = parse_list("left").unwrap();
    let labels: Vec<String> = suggest_at(&matcher, root, &values)
      .unwrap()
      .iter()
      .map(|s| s.label())
      .collect();
    assert_eq!(labels, ["top", "center", "bottom"]);

    // The inserted default value is accepted where the syntax is referenced.
    let auto = &parse_list("auto").unwrap()[0];
    let ratio = matcher.reduce(&matcher.start(root), auto).into_expectation().unwrap();
    let inserted = ValueKind::Ratio.default_value().unwrap();
    assert!(matches!(matcher.reduce(&ratio, &inserted), Reduction::Exhausted(_)));
    let position = ValueKind::Position.default_value().unwrap();
    assert!(matcher.reduce(&matcher.start(root), &position).into_expectation().is_some());
  }

  #[test]
  fn test_unknown_data_type() {
    let mut arena = GrammarArena::new();
    let root = parse_syntax(&mut arena, "auto | <undefined-type>").unwrap();
    let matcher = GreedyMatcher::new(&arena);
    let err = suggest_at(&matcher, root, &[]).unwrap_err();
    assert_eq!(
      err.kind,
      SuggestionErrorKind::UnknownDataType {
        name: "undefined-type".into(),
        raw: "<undefined-type>".into(),
      }
    );
    assert_eq!(
      err.to_string(),
      "Unknown data type 'undefined-type' in expression '<undefined-type>'"
    );

    let mut arena = GrammarArena::new();
    let root = parse_syntax(&mut arena, "frobnicate( <length> )").unwrap();
    let matcher = GreedyMatcher::new(&arena);
    assert!(suggest_at(&matcher, root, &[]).is_err());
  }

  fn nested(depth: usize) -> String {
    let mut syntax = "a".to_owned();
    for _ in 0..depth {
      syntax = format!("x? [ {} ]", syntax);
    }
    syntax
  }

  #[test]
  fn test_deep_nesting() {
    test(&nested(40), "", &["x", "a"]);
    test(&nested(40), "x x", &["x", "a"]);
    test(&nested(40), "a", &[]);

    let mut arena = GrammarArena::new();
    let root = parse_syntax(&mut arena, &nested(150)).unwrap();
    let matcher = GreedyMatcher::new(&arena);
    let err = suggest_at(&matcher, root, &[]).unwrap_err();
    assert!(matches!(err.kind, SuggestionErrorKind::NestingTooDeep { .. }));
  }

  #[test]
  fn test_default_values() {
    let length = Suggestion::DataType {
      name: "length".into(),
      kinds: data_type_kinds("length").unwrap(),
    };
    assert_eq!(length.default_value().map(|v| v.kind()), Some(ValueKind::Length));
    let keyword = Suggestion::Keyword { keyword: "auto".into() };
    assert_eq!(keyword.default_value().and_then(|v| v.as_ident().map(str::to_owned)), Some("auto".into()));
    assert_eq!(
      serde_json::to_string(&keyword).unwrap(),
      r#"{"type":"keyword","keyword":"auto"}"#
    );
  }
}
