//! The grammar tree: nodes, quantifiers and the arena that owns them.

use indexmap::IndexMap;
use serde::Serialize;

/// The index of a node within a [GrammarArena](GrammarArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
  fn index(self) -> usize {
    self.0 as usize
  }
}

/// How many times a node may repeat, and what separates the repetitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quantifier {
  /// The minimum number of repetitions.
  pub min: u32,
  /// The maximum number of repetitions. `None` is unbounded.
  pub max: Option<u32>,
  /// The delimiter between repetitions, `,` for `#` multipliers.
  pub separator: Option<char>,
  /// Set by `!`: a group must not match the empty sequence.
  pub required: bool,
}

impl Quantifier {
  /// Exactly one occurrence.
  pub const ONE: Quantifier = Quantifier {
    min: 1,
    max: Some(1),
    separator: None,
    required: false,
  };

  /// Creates a quantifier with the given bounds.
  pub fn new(min: u32, max: Option<u32>) -> Quantifier {
    Quantifier {
      min,
      max,
      separator: None,
      required: false,
    }
  }

  /// Returns whether this is the default quantifier of exactly one occurrence.
  pub fn is_one(&self) -> bool {
    *self == Quantifier::ONE
  }

  /// Returns whether `count` repetitions leave room for another one.
  pub fn allows(&self, count: u32) -> bool {
    match self.max {
      Some(max) => count < max,
      None => true,
    }
  }
}

impl Default for Quantifier {
  fn default() -> Quantifier {
    Quantifier::ONE
  }
}

/// The kind of a grammar node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
  /// A keyword or delimiter that must appear as written, e.g. `auto` or `,`.
  Literal(String),
  /// A primitive data type bound to value kinds, e.g. `<length>`.
  DataType(String),
  /// A function, e.g. `fit-content( <length-percentage> )` or `<rotate()>`.
  ///
  /// Function values are parsed as a whole, so the argument grammar is kept for display only.
  FunctionCall {
    /// The function name, without the parenthesis.
    name: String,
    /// The argument grammar.
    children: Vec<NodeId>,
  },
  /// Juxtaposed components, which must all occur in order.
  OrderedSequence(Vec<NodeId>),
  /// Components joined by `&&`, which must all occur in any order.
  UnorderedSequence(Vec<NodeId>),
  /// Components joined by `||`, of which one or more must occur in any order.
  Subset(Vec<NodeId>),
  /// Components joined by `|`, of which exactly one must occur.
  Alternation(Vec<NodeId>),
  /// A reference to a named syntax, e.g. `<line-width>` or `<'margin-top'>`.
  Reference {
    /// The referenced name.
    name: String,
    /// The slot holding the named syntax.
    target: NodeId,
  },
  /// A named slot whose syntax has not been compiled.
  Placeholder,
}

/// A node of the grammar tree.
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarNode {
  /// What the node matches.
  pub kind: NodeKind,
  /// How often it matches.
  pub quantifier: Quantifier,
  /// The syntax text the node was compiled from.
  pub raw: String,
  /// The name of the syntax, for named slots.
  pub name: Option<String>,
}

impl GrammarNode {
  pub(crate) fn new(kind: NodeKind, raw: &str) -> GrammarNode {
    GrammarNode {
      kind,
      quantifier: Quantifier::ONE,
      raw: raw.trim().to_owned(),
      name: None,
    }
  }

  /// The child nodes of a combinator or function.
  pub fn children(&self) -> &[NodeId] {
    match &self.kind {
      NodeKind::FunctionCall { children, .. }
      | NodeKind::OrderedSequence(children)
      | NodeKind::UnorderedSequence(children)
      | NodeKind::Subset(children)
      | NodeKind::Alternation(children) => children,
      _ => &[],
    }
  }
}

/// Owns every node of one or more grammar trees.
///
/// Named syntaxes live in slots. Referring to a name that has no slot yet creates a
/// [Placeholder](NodeKind::Placeholder) slot, so forward and recursive references are valid
/// immediately. Compiling the name later overwrites the slot in place, and every
/// [Reference](NodeKind::Reference) to it shares the result.
#[derive(Debug, Clone, Default)]
pub struct GrammarArena {
  nodes: Vec<GrammarNode>,
  names: IndexMap<String, NodeId>,
}

impl GrammarArena {
  /// Creates an empty arena.
  pub fn new() -> GrammarArena {
    GrammarArena::default()
  }

  /// Adds a node and returns its id.
  pub fn push(&mut self, node: GrammarNode) -> NodeId {
    let id = NodeId(self.nodes.len() as u32);
    self.nodes.push(node);
    id
  }

  /// Returns the node with the given id.
  ///
  /// Ids are only handed out by this arena, so the lookup cannot fail.
  pub fn get(&self, id: NodeId) -> &GrammarNode {
    &self.nodes[id.index()]
  }

  pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut GrammarNode {
    &mut self.nodes[id.index()]
  }

  /// Returns the number of nodes.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  /// Returns whether the arena has no nodes.
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Returns the slot for a name, creating a placeholder if needed.
  pub fn slot(&mut self, name: &str) -> NodeId {
    if let Some(id) = self.names.get(name) {
      return *id;
    }
    let mut node = GrammarNode::new(NodeKind::Placeholder, "");
    node.name = Some(name.to_owned());
    let id = self.push(node);
    self.names.insert(name.to_owned(), id);
    id
  }

  /// Returns the slot for a name, if one exists.
  pub fn lookup(&self, name: &str) -> Option<NodeId> {
    self.names.get(name).copied()
  }

  /// Overwrites a named slot with a copy of a compiled node.
  pub(crate) fn fill(&mut self, slot: NodeId, root: NodeId) {
    let mut node = self.get(root).clone();
    node.name = self.get(slot).name.clone();
    *self.get_mut(slot) = node;
  }

  /// Returns whether the slot has been compiled.
  pub fn is_filled(&self, slot: NodeId) -> bool {
    !matches!(self.get(slot).kind, NodeKind::Placeholder)
  }

  /// Iterates over the named slots in creation order.
  pub fn names(&self) -> impl Iterator<Item = (&str, NodeId)> {
    self.names.iter().map(|(name, id)| (name.as_str(), *id))
  }

  /// Follows references until a node that is not a reference is reached.
  /// Quantifiers of the references passed through are not applied.
  pub fn resolve(&self, mut id: NodeId) -> NodeId {
    // A chain longer than the arena can only be a cycle of references.
    for _ in 0..self.nodes.len() {
      match &self.get(id).kind {
        NodeKind::Reference { target, .. } => id = *target,
        _ => break,
      }
    }
    id
  }

  /// Serializes a node back to value definition syntax.
  pub fn to_syntax(&self, id: NodeId) -> String {
    let mut s = String::new();
    self.write_syntax(id, &mut s, true);
    s
  }

  fn write_syntax(&self, id: NodeId, dest: &mut String, top: bool) {
    let node = self.get(id);
    let (children, sep) = match &node.kind {
      NodeKind::Literal(text) => {
        match text.as_str() {
          "," | "/" => dest.push_str(text),
          t if t.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') => dest.push_str(t),
          t => {
            dest.push('\'');
            dest.push_str(t);
            dest.push('\'');
          }
        }
        write_quantifier(&node.quantifier, dest);
        return;
      }
      NodeKind::DataType(name) => {
        dest.push('<');
        dest.push_str(name);
        dest.push('>');
        write_quantifier(&node.quantifier, dest);
        return;
      }
      NodeKind::Reference { name, .. } => {
        dest.push('<');
        dest.push_str(name);
        dest.push('>');
        write_quantifier(&node.quantifier, dest);
        return;
      }
      NodeKind::Placeholder => {
        // Only reachable for a top-level slot that was never compiled.
        dest.push_str(node.name.as_deref().unwrap_or(""));
        return;
      }
      NodeKind::FunctionCall { name, children } => {
        dest.push_str(name);
        dest.push('(');
        if !children.is_empty() {
          dest.push(' ');
          self.write_children(children, " ", dest);
          dest.push(' ');
        }
        dest.push(')');
        write_quantifier(&node.quantifier, dest);
        return;
      }
      NodeKind::OrderedSequence(children) => (children, " "),
      NodeKind::UnorderedSequence(children) => (children, " && "),
      NodeKind::Subset(children) => (children, " || "),
      NodeKind::Alternation(children) => (children, " | "),
    };

    let bracket = !top || !node.quantifier.is_one();
    if bracket {
      dest.push_str("[ ");
    }
    self.write_children(children, sep, dest);
    if bracket {
      dest.push_str(" ]");
    }
    write_quantifier(&node.quantifier, dest);
  }

  fn write_children(&self, children: &[NodeId], sep: &str, dest: &mut String) {
    for (i, child) in children.iter().enumerate() {
      if i > 0 {
        dest.push_str(sep);
      }
      self.write_syntax(*child, dest, false);
    }
  }
}

fn write_quantifier(q: &Quantifier, dest: &mut String) {
  use std::fmt::Write;
  let comma = q.separator == Some(',');
  match (q.min, q.max, comma) {
    (1, Some(1), false) => {}
    (0, Some(1), false) => dest.push('?'),
    (0, None, false) => dest.push('*'),
    (1, None, false) => dest.push('+'),
    (1, None, true) => dest.push('#'),
    (min, max, comma) => {
      if comma {
        dest.push('#');
      }
      let _ = match max {
        Some(max) if max == min => write!(dest, "{{{}}}", min),
        Some(max) => write!(dest, "{{{},{}}}", min, max),
        None => write!(dest, "{{{},}}", min),
      };
    }
  }
  if q.required {
    dest.push('!');
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_slots() {
    let mut arena = GrammarArena::new();
    let a = arena.slot("line-width");
    assert_eq!(arena.slot("line-width"), a);
    assert!(!arena.is_filled(a));

    let literal = arena.push(GrammarNode::new(NodeKind::Literal("thin".into()), "thin"));
    let reference = arena.push(GrammarNode::new(
      NodeKind::Reference {
        name: "line-width".into(),
        target: a,
      },
      "<line-width>",
    ));
    arena.fill(a, literal);
    assert!(arena.is_filled(a));
    assert_eq!(arena.get(a).name.as_deref(), Some("line-width"));
    assert_eq!(arena.resolve(reference), a);
    assert_eq!(arena.get(arena.resolve(reference)).kind, NodeKind::Literal("thin".into()));
  }

  #[test]
  fn test_quantifier() {
    assert!(Quantifier::default().is_one());
    assert!(Quantifier::new(0, None).allows(100));
    assert!(!Quantifier::new(2, Some(4)).allows(4));
    let mut s = String::new();
    write_quantifier(
      &Quantifier {
        min: 1,
        max: Some(4),
        separator: Some(','),
        required: false,
      },
      &mut s,
    );
    assert_eq!(s, "#{1,4}");
  }
}
