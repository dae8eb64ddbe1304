//! Compiling and executing CSS [value definition syntax](https://www.w3.org/TR/css-values-4/#value-defs).
//!
//! A syntax string such as `<line-width>{1,4}` is compiled by the [parser](parser) into nodes of a
//! [GrammarArena](node::GrammarArena). The [matcher](matcher) consumes parsed
//! [Value](crate::values::value::Value)s against a node one at a time, and the [suggest](suggest)
//! module reports which values may come next.
//!
//! ```
//! use css_value_grammar::grammar::{parse_syntax, suggest_at, GrammarArena, GreedyMatcher};
//! use css_value_grammar::values::value::parse_list;
//!
//! let mut arena = GrammarArena::new();
//! let root = parse_syntax(&mut arena, "auto | <length>").unwrap();
//! let matcher = GreedyMatcher::new(&arena);
//! let labels: Vec<String> = suggest_at(&matcher, root, &[])
//!   .unwrap()
//!   .iter()
//!   .map(|s| s.label())
//!   .collect();
//! assert_eq!(labels, ["auto", "<length>"]);
//!
//! let values = parse_list("10px").unwrap();
//! assert!(suggest_at(&matcher, root, &values).unwrap().is_empty());
//! ```

pub mod matcher;
pub mod node;
pub mod parser;
pub mod suggest;
pub mod types;

pub use matcher::{reduce_all, Expectation, GreedyMatcher, Matcher, Reduction};
pub use node::{GrammarArena, GrammarNode, NodeId, NodeKind, Quantifier};
pub use parser::{compile_named, parse_syntax};
pub use suggest::{suggest_at, suggestions, Suggestion};
