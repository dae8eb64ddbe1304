//! Matching component values against a grammar tree, one value at a time.
//!
//! The state of a match is an [Expectation](Expectation): the node being matched, how many of its
//! repetitions are complete, and the progress of the repetition in flight. Expectations only hold
//! node ids and counters, so the grammar tree itself is never copied or modified.

use super::node::{GrammarArena, NodeId, NodeKind};
use super::types;
use crate::values::value::Value;
use log::{trace, warn};

/// Grammars are recursive through named references. Matching gives up on a branch nested deeper
/// than this.
pub const MAX_DEPTH: usize = 256;

/// The matching state of one grammar node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expectation {
  /// The node being matched.
  pub node: NodeId,
  /// The number of completed repetitions.
  pub count: u32,
  pub(crate) current: Option<Progress>,
  /// A `#` separator was consumed, so another repetition must follow.
  pub(crate) after_separator: bool,
}

/// The progress of a repetition that has consumed at least one value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Progress {
  /// An ordered sequence matching the child at `index`. Earlier children are complete.
  Sequence { index: usize, child: Box<Expectation> },
  /// An alternation committed to the child at `index`.
  Choice { index: usize, child: Box<Expectation> },
  /// An unordered sequence or subset. Children that have not begun are `None`, and only the
  /// `active` child may consume further values.
  Group { states: Vec<Option<Expectation>>, active: usize },
  /// A reference, matching its target.
  Reference(Box<Expectation>),
}

impl Expectation {
  /// A fresh expectation for a node, before any value has been consumed.
  pub fn new(node: NodeId) -> Expectation {
    Expectation {
      node,
      count: 0,
      current: None,
      after_separator: false,
    }
  }
}

/// The outcome of reducing an expectation by one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Reduction {
  /// The value is not valid at this position.
  Rejected,
  /// The value was consumed, and nothing more may follow.
  Exhausted(Expectation),
  /// The value was consumed, and more values may follow.
  Partial(Expectation),
}

impl Reduction {
  /// Returns the expectation after the reduction, unless the value was rejected.
  pub fn into_expectation(self) -> Option<Expectation> {
    match self {
      Reduction::Rejected => None,
      Reduction::Exhausted(e) | Reduction::Partial(e) => Some(e),
    }
  }
}

/// Matches values against grammar nodes.
pub trait Matcher {
  /// The arena holding the grammar.
  fn arena(&self) -> &GrammarArena;

  /// The identifiers that `<custom-ident>` must not accept.
  fn forbidden_idents(&self) -> &[String] {
    &[]
  }

  /// Returns the expectation for matching a root node from the start.
  fn start(&self, root: NodeId) -> Expectation {
    Expectation::new(root)
  }

  /// Consumes one value.
  fn reduce(&self, expectation: &Expectation, value: &Value) -> Reduction;

  /// Returns whether the values consumed so far form a complete match.
  fn is_satisfied(&self, expectation: &Expectation) -> bool;

  /// Returns whether more values may be consumed.
  fn is_open(&self, expectation: &Expectation) -> bool;
}

/// A matcher that commits to the first alternative accepting a value, and never backtracks.
///
/// In `[ a b ] | [ a c ]`, the values `a c` are rejected, because `a` commits to the first branch.
/// Nullable components of ordered sequences are skipped when they reject a value.
pub struct GreedyMatcher<'a> {
  arena: &'a GrammarArena,
  forbidden: &'a [String],
}

impl<'a> GreedyMatcher<'a> {
  /// Creates a matcher over an arena.
  pub fn new(arena: &'a GrammarArena) -> GreedyMatcher<'a> {
    GreedyMatcher { arena, forbidden: &[] }
  }

  /// Sets the identifiers that `<custom-ident>` must not accept.
  pub fn with_forbidden_idents(mut self, forbidden: &'a [String]) -> GreedyMatcher<'a> {
    self.forbidden = forbidden;
    self
  }

  fn reduce_state(&self, e: &Expectation, value: &Value, depth: usize) -> Option<Expectation> {
    if depth > MAX_DEPTH {
      warn!(
        "Grammar nested deeper than {} levels in '{}', rejecting {:?}",
        MAX_DEPTH,
        self.arena.get(e.node).raw,
        value
      );
      return None;
    }
    let quantifier = self.arena.get(e.node).quantifier;
    let mut count = e.count;

    if let Some(progress) = &e.current {
      if let Some(progress) = self.reduce_progress(e.node, progress, value, depth + 1) {
        return Some(self.normalize(Expectation {
          node: e.node,
          count,
          current: Some(progress),
          after_separator: false,
        }));
      }
      if !self.progress_satisfied(e.node, progress, depth + 1) {
        return None;
      }
      count += 1;
    }

    if !quantifier.allows(count) {
      return None;
    }

    if let Some(separator) = quantifier.separator {
      if count > 0 && !e.after_separator {
        return match value {
          Value::Delimiter(c) if *c == separator => Some(Expectation {
            node: e.node,
            count,
            current: None,
            after_separator: true,
          }),
          _ => None,
        };
      }
    }

    let progress = self.begin(e.node, value, depth + 1)?;
    let next = match progress {
      Some(progress) => Expectation {
        node: e.node,
        count,
        current: Some(progress),
        after_separator: false,
      },
      None => Expectation {
        node: e.node,
        count: count + 1,
        current: None,
        after_separator: false,
      },
    };
    Some(self.normalize(next))
  }

  /// Folds a repetition that cannot consume anything more into the count.
  fn normalize(&self, mut e: Expectation) -> Expectation {
    if let Some(progress) = &e.current {
      if !self.progress_open(e.node, progress, 0) {
        e.current = None;
        e.count += 1;
      }
    }
    e
  }

  /// Starts a new repetition of a node with a value. Returns `Some(None)` when a leaf consumed the
  /// value, and `None` when the value is rejected.
  fn begin(&self, id: NodeId, value: &Value, depth: usize) -> Option<Option<Progress>> {
    let node = self.arena.get(id);
    match &node.kind {
      NodeKind::Literal(text) => literal_matches(text, value).then(|| None),
      NodeKind::DataType(name) => types::accepts(name, value, self.forbidden).then(|| None),
      NodeKind::FunctionCall { name, .. } => {
        (value.matches_function(name) || types::is_substitution(value)).then(|| None)
      }
      NodeKind::Placeholder => None,
      NodeKind::Reference { name, target } => {
        // A whole position or ratio, as inserted from a suggestion.
        if types::composite_kinds(name).map_or(false, |kinds| kinds.contains(&value.kind())) {
          return Some(None);
        }
        let inner = self.reduce_state(&Expectation::new(*target), value, depth + 1)?;
        Some(Some(Progress::Reference(Box::new(inner))))
      }
      NodeKind::OrderedSequence(children) => {
        let (index, child) = self.begin_sequence(children, 0, value, depth)?;
        Some(Some(Progress::Sequence {
          index,
          child: Box::new(child),
        }))
      }
      NodeKind::Alternation(children) => children.iter().enumerate().find_map(|(index, child)| {
        let child = self.reduce_state(&Expectation::new(*child), value, depth + 1)?;
        Some(Some(Progress::Choice {
          index,
          child: Box::new(child),
        }))
      }),
      NodeKind::UnorderedSequence(children) | NodeKind::Subset(children) => {
        let states = vec![None; children.len()];
        self.begin_group(children, states, value, depth).map(Some)
      }
    }
  }

  /// Finds the first child from `from` that accepts a value, skipping nullable children.
  fn begin_sequence(
    &self,
    children: &[NodeId],
    from: usize,
    value: &Value,
    depth: usize,
  ) -> Option<(usize, Expectation)> {
    for (index, child) in children.iter().enumerate().skip(from) {
      if let Some(state) = self.reduce_state(&Expectation::new(*child), value, depth + 1) {
        return Some((index, state));
      }
      if !self.nullable(*child, depth + 1) {
        return None;
      }
    }
    None
  }

  /// Starts the first child of a group that has not begun yet and accepts a value.
  fn begin_group(
    &self,
    children: &[NodeId],
    mut states: Vec<Option<Expectation>>,
    value: &Value,
    depth: usize,
  ) -> Option<Progress> {
    for (index, child) in children.iter().enumerate() {
      if states[index].is_some() {
        continue;
      }
      if let Some(state) = self.reduce_state(&Expectation::new(*child), value, depth + 1) {
        states[index] = Some(state);
        return Some(Progress::Group { states, active: index });
      }
    }
    None
  }

  fn reduce_progress(&self, id: NodeId, progress: &Progress, value: &Value, depth: usize) -> Option<Progress> {
    let node = self.arena.get(id);
    match progress {
      Progress::Sequence { index, child } => {
        if let Some(child) = self.reduce_state(child, value, depth + 1) {
          return Some(Progress::Sequence {
            index: *index,
            child: Box::new(child),
          });
        }
        if !self.satisfied(child, depth + 1) {
          return None;
        }
        let (index, child) = self.begin_sequence(node.children(), index + 1, value, depth)?;
        Some(Progress::Sequence {
          index,
          child: Box::new(child),
        })
      }
      Progress::Choice { index, child } => {
        let child = self.reduce_state(child, value, depth + 1)?;
        Some(Progress::Choice {
          index: *index,
          child: Box::new(child),
        })
      }
      Progress::Group { states, active } => {
        if let Some(Some(state)) = states.get(*active) {
          if let Some(state) = self.reduce_state(state, value, depth + 1) {
            let mut states = states.clone();
            states[*active] = Some(state);
            return Some(Progress::Group { states, active: *active });
          }
          if !self.satisfied(state, depth + 1) {
            return None;
          }
        }
        self.begin_group(node.children(), states.clone(), value, depth)
      }
      Progress::Reference(inner) => {
        let inner = self.reduce_state(inner, value, depth + 1)?;
        Some(Progress::Reference(Box::new(inner)))
      }
    }
  }

  /// Returns whether a node, including its quantifier, may match no values at all.
  pub(crate) fn nullable(&self, id: NodeId, depth: usize) -> bool {
    self.arena.get(id).quantifier.min == 0 || self.content_nullable(id, depth)
  }

  /// Returns whether one repetition of a node may match no values at all.
  fn content_nullable(&self, id: NodeId, depth: usize) -> bool {
    if depth > MAX_DEPTH {
      return false;
    }
    let node = self.arena.get(id);
    if node.quantifier.required {
      return false;
    }
    match &node.kind {
      NodeKind::OrderedSequence(children) | NodeKind::UnorderedSequence(children) => {
        children.iter().all(|child| self.nullable(*child, depth + 1))
      }
      NodeKind::Subset(children) | NodeKind::Alternation(children) => {
        children.iter().any(|child| self.nullable(*child, depth + 1))
      }
      NodeKind::Reference { target, .. } => self.nullable(*target, depth + 1),
      _ => false,
    }
  }

  pub(crate) fn satisfied(&self, e: &Expectation, depth: usize) -> bool {
    if e.after_separator {
      return false;
    }
    let quantifier = self.arena.get(e.node).quantifier;
    let count = match &e.current {
      Some(progress) => {
        if !self.progress_satisfied(e.node, progress, depth + 1) {
          return false;
        }
        e.count + 1
      }
      None => e.count,
    };
    count >= quantifier.min || self.content_nullable(e.node, depth + 1)
  }

  pub(crate) fn progress_satisfied(&self, id: NodeId, progress: &Progress, depth: usize) -> bool {
    if depth > MAX_DEPTH {
      return false;
    }
    let node = self.arena.get(id);
    match progress {
      Progress::Sequence { index, child } => {
        self.satisfied(child, depth + 1)
          && node.children()[index + 1..]
            .iter()
            .all(|child| self.nullable(*child, depth + 1))
      }
      Progress::Choice { child, .. } | Progress::Reference(child) => self.satisfied(child, depth + 1),
      Progress::Group { states, .. } => {
        let all_required = matches!(node.kind, NodeKind::UnorderedSequence(_));
        states.iter().zip(node.children()).all(|(state, child)| match state {
          Some(state) => self.satisfied(state, depth + 1),
          None => !all_required || self.nullable(*child, depth + 1),
        })
      }
    }
  }

  pub(crate) fn open(&self, e: &Expectation, depth: usize) -> bool {
    if depth > MAX_DEPTH {
      return false;
    }
    let quantifier = self.arena.get(e.node).quantifier;
    match &e.current {
      Some(progress) => {
        self.progress_open(e.node, progress, depth + 1) || quantifier.allows(e.count + 1)
      }
      None => quantifier.allows(e.count),
    }
  }

  fn progress_open(&self, id: NodeId, progress: &Progress, depth: usize) -> bool {
    if depth > MAX_DEPTH {
      return false;
    }
    let node = self.arena.get(id);
    match progress {
      Progress::Sequence { index, child } => {
        index + 1 < node.children().len() || self.open(child, depth + 1)
      }
      Progress::Choice { child, .. } | Progress::Reference(child) => self.open(child, depth + 1),
      Progress::Group { states, active } => {
        states.iter().any(|state| state.is_none())
          || states
            .get(*active)
            .and_then(|state| state.as_ref())
            .map_or(false, |state| self.open(state, depth + 1))
      }
    }
  }
}

impl<'a> Matcher for GreedyMatcher<'a> {
  fn arena(&self) -> &GrammarArena {
    self.arena
  }

  fn forbidden_idents(&self) -> &[String] {
    self.forbidden
  }

  fn reduce(&self, expectation: &Expectation, value: &Value) -> Reduction {
    let reduction = match self.reduce_state(expectation, value, 0) {
      None => Reduction::Rejected,
      Some(next) if self.open(&next, 0) => Reduction::Partial(next),
      Some(next) => Reduction::Exhausted(next),
    };
    trace!(
      "reduce {} by {:?}: {}",
      self.arena.get(expectation.node).raw,
      value,
      match &reduction {
        Reduction::Rejected => "rejected",
        Reduction::Exhausted(_) => "exhausted",
        Reduction::Partial(_) => "partial",
      }
    );
    reduction
  }

  fn is_satisfied(&self, expectation: &Expectation) -> bool {
    self.satisfied(expectation, 0)
  }

  fn is_open(&self, expectation: &Expectation) -> bool {
    self.open(expectation, 0)
  }
}

/// Literals match keywords case-insensitively, and delimiters exactly.
fn literal_matches(text: &str, value: &Value) -> bool {
  match value {
    Value::Delimiter(c) => {
      let mut chars = text.chars();
      chars.next() == Some(*c) && chars.next().is_none()
    }
    value => match value.as_ident() {
      Some(ident) => ident.eq_ignore_ascii_case(text),
      None => false,
    },
  }
}

/// Folds a list of values into an expectation. Returns the index of the first rejected value on
/// failure.
pub fn reduce_all<M: Matcher + ?Sized>(
  matcher: &M,
  root: NodeId,
  values: &[Value],
) -> Result<Expectation, usize> {
  let mut expectation = matcher.start(root);
  for (index, value) in values.iter().enumerate() {
    expectation = match matcher.reduce(&expectation, value).into_expectation() {
      Some(next) => next,
      None => return Err(index),
    };
  }
  Ok(expectation)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::parser::{compile_named, parse_syntax};
  use crate::values::value::parse_list;

  fn check(syntax: &str, input: &str) -> (bool, bool, Option<usize>) {
    let mut arena = GrammarArena::new();
    compile_named(&mut arena, "line-width", "<length> | thin | medium | thick").unwrap();
    let root = parse_syntax(&mut arena, syntax).unwrap();
    let matcher = GreedyMatcher::new(&arena);
    let values = parse_list(input).unwrap();
    match reduce_all(&matcher, root, &values) {
      Ok(e) => (matcher.is_satisfied(&e), matcher.is_open(&e), None),
      Err(index) => (false, false, Some(index)),
    }
  }

  fn valid(syntax: &str, input: &str) {
    let (satisfied, _, rejected) = check(syntax, input);
    assert_eq!(rejected, None, "{} rejected by {}", input, syntax);
    assert!(satisfied, "{} does not complete {}", input, syntax);
  }

  fn incomplete(syntax: &str, input: &str) {
    let (satisfied, open, rejected) = check(syntax, input);
    assert_eq!(rejected, None, "{} rejected by {}", input, syntax);
    assert!(!satisfied && open, "{} completes {}", input, syntax);
  }

  fn invalid(syntax: &str, input: &str, index: usize) {
    assert_eq!(check(syntax, input).2, Some(index), "{} accepted by {}", input, syntax);
  }

  #[test]
  fn test_leaves() {
    valid("auto", "AUTO");
    valid("<length>", "10px");
    valid("<length>", "0");
    valid("<color>", "red");
    valid("',' | '/'", "/");
    valid("fit-content( <length-percentage> )", "fit-content(10px)");
    valid("<rotate()>", "rotate(45deg)");
    valid("rgb( <number>{3} )", "rgba(1 2 3)");
    invalid("auto", "none", 0);
    invalid("<length>", "10%", 0);
    invalid("<undefined-type>", "10%", 0);
  }

  #[test]
  fn test_quantifiers() {
    valid("<length>{2,4}", "1px 2px");
    valid("<length>{2,4}", "1px 2px 3px 4px");
    incomplete("<length>{2,4}", "1px");
    invalid("<length>{2,4}", "1px 2px 3px 4px 5px", 4);
    valid("<length>?", "1px");
    valid("<length>*", "1px 2px 3px");
    invalid("<length>+", "1px red", 1);
  }

  #[test]
  fn test_comma_lists() {
    valid("<percentage>#", "10%");
    valid("<percentage>#", "10%, 20%, 30%");
    incomplete("<percentage>#", "10%,");
    invalid("<percentage>#", "10% 20%", 1);
    invalid("<percentage>#", ", 10%", 0);
    valid("[ <length> <color>? ]#", "1px red, 2px, 3px blue");
    valid("<length>#{1,2}", "1px, 2px");
    invalid("<length>#{1,2}", "1px, 2px, 3px", 3);
  }

  #[test]
  fn test_sequences() {
    valid("<length> <percentage>", "1px 50%");
    incomplete("<length> <percentage>", "1px");
    invalid("<length> <percentage>", "50% 1px", 0);
    valid("<length>? <percentage>", "50%");
    valid("<length> , <length>", "1px, 2px");
    invalid("<length> , <length>", "1px 2px", 1);
  }

  #[test]
  fn test_alternation() {
    valid("auto | <length>", "auto");
    valid("auto | <length>", "1px");
    invalid("auto | <length>", "auto 1px", 1);

    // The first branch commits, even when only the second could complete.
    valid("[ <length> <percentage> ] | [ <length> <integer> ]", "1px 10%");
    invalid("[ <length> <percentage> ] | [ <length> <integer> ]", "1px 3", 1);
  }

  #[test]
  fn test_groups() {
    valid("<length> && <color>", "1px red");
    valid("<length> && <color>", "red 1px");
    incomplete("<length> && <color>", "red");
    invalid("<length> && <color>", "red blue", 1);

    valid("<length> || <color> || auto", "auto");
    valid("<length> || <color> || auto", "red 1px");
    valid("<length> || <color> || auto", "auto red 1px");
    invalid("<length> || <color> || auto", "red red", 1);

    valid("<length>+ || <color>", "1px 2px red");
    invalid("<length>+ || <color>", "1px red 2px", 2);
  }

  #[test]
  fn test_references() {
    valid("<line-width>{1,4}", "thin");
    valid("<line-width>{1,4}", "1px medium THICK 0");
    invalid("<line-width>{1,4}", "thin thin thin thin thin", 4);

    let (satisfied, open, _) = check("<line-width>{1,4}", "1px 2px 3px 4px");
    assert!(satisfied);
    assert!(!open);
  }

  #[test]
  fn test_substitutions() {
    valid("<length> <color>", "var(--size) red");
    invalid("<length> | auto", "inherit", 0);
    valid("<length> <percentage>", "calc(1px + 2px) 10%");
    invalid("auto", "inherit", 0);
  }

  #[test]
  fn test_custom_ident() {
    let mut arena = GrammarArena::new();
    let root = parse_syntax(&mut arena, "[ none | <custom-ident> ]#").unwrap();
    let forbidden = vec!["none".to_owned(), "initial".to_owned()];
    let matcher = GreedyMatcher::new(&arena).with_forbidden_idents(&forbidden);
    let start = matcher.start(root);

    assert!(matches!(
      matcher.reduce(&start, &parse_list("slide").unwrap()[0]),
      Reduction::Partial(_)
    ));
    assert!(matches!(
      matcher.reduce(&start, &parse_list("none").unwrap()[0]),
      Reduction::Partial(_)
    ));
    assert_eq!(
      matcher.reduce(&start, &parse_list("unset").unwrap()[0]),
      Reduction::Rejected
    );
  }

  #[test]
  fn test_recursion() {
    let mut arena = GrammarArena::new();
    compile_named(&mut arena, "nested", "<length> | [ '[' <nested> ']' ]").unwrap();
    let root = parse_syntax(&mut arena, "<nested>").unwrap();
    let matcher = GreedyMatcher::new(&arena);

    let values = parse_list("1px").unwrap();
    assert!(matcher.is_satisfied(&reduce_all(&matcher, root, &values).unwrap()));
    let values = parse_list("[[1px]]").unwrap();
    assert!(matcher.is_satisfied(&reduce_all(&matcher, root, &values).unwrap()));
    let values = parse_list("[[1px] 2px]").unwrap();
    assert_eq!(reduce_all(&matcher, root, &values), Err(4));
  }

  #[test]
  fn test_deep_nesting() {
    let mut syntax = "a".to_owned();
    for _ in 0..40 {
      syntax = format!("x? [ {} ]", syntax);
    }
    valid(&syntax, "a");
    valid(&syntax, "x x x a");
    incomplete(&syntax, "x");
    invalid(&syntax, "a a", 1);
  }
}
