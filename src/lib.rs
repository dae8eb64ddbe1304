//! A CSS value definition syntax compiler and value autocomplete engine.
//!
//! This crate compiles the [value definition syntax](https://www.w3.org/TR/css-values-4/#value-defs)
//! used to describe CSS properties, such as `<line-width>{1,4}`, into grammar trees. Declaration
//! values are parsed into typed component [values](values), which can then be validated against a
//! property's grammar, or used to compute which values may come next.
//!
//! The [SpecRegistry](registry::SpecRegistry) compiles a whole table of properties at once, in the
//! format of [mdn-data](https://github.com/mdn/data/tree/main/css). A subset of that data is bundled
//! with the crate behind the `bundled-data` feature.
//!
//! # Example
//!
//! ```
//! use css_value_grammar::registry::{SpecRegistry, ValidationState};
//!
//! let registry = SpecRegistry::bundled().unwrap();
//! let validation = registry.validate("border-width", "thin 2px").unwrap();
//! assert_eq!(validation.state, ValidationState::Complete);
//!
//! let labels: Vec<String> = registry
//!   .suggest("border-style", "solid")
//!   .unwrap()
//!   .iter()
//!   .map(|s| s.label())
//!   .collect();
//! assert!(labels.contains(&"dashed".to_string()));
//! ```

mod macros;
pub mod error;
pub mod grammar;
pub mod printer;
pub mod registry;
pub mod traits;
pub mod values;

#[cfg(test)]
mod tests {
  use crate::grammar::{reduce_all, suggest_at, Matcher, NodeKind, Quantifier};
  use crate::registry::{RegistryOptions, SpecRegistry, ValidationState};
  use crate::values::value::{parse_list, ValueKind};
  use indoc::indoc;
  use pretty_assertions::assert_eq;

  const PROPERTIES: &str = indoc! {r#"
    {
      "border-width": {
        "syntax": "<line-width>{1,4}",
        "inherited": false,
        "initial": ["border-top-width", "border-right-width", "border-bottom-width", "border-left-width"],
        "status": "standard"
      },
      "column-rule-width": {
        "syntax": "<line-width>",
        "inherited": false,
        "initial": "medium",
        "status": "standard"
      }
    }
  "#};

  const SYNTAXES: &str = indoc! {r#"
    {
      "line-width": { "syntax": "<length> | thin | medium | thick" }
    }
  "#};

  fn registry() -> SpecRegistry {
    SpecRegistry::from_json(PROPERTIES, SYNTAXES, &RegistryOptions::default()).unwrap()
  }

  fn labels(registry: &SpecRegistry, property: &str, text: &str) -> Vec<String> {
    registry
      .suggest(property, text)
      .unwrap()
      .iter()
      .map(|s| s.label())
      .collect()
  }

  #[test]
  fn test_four_lengths() {
    let registry = registry();
    let entry = registry.get("border-width").unwrap();
    let root = registry.resolve(entry.root);
    assert_eq!(root.quantifier, Quantifier::new(1, Some(4)));

    let values = parse_list("1px 2px 3px 4px").unwrap();
    assert_eq!(values.len(), 4);
    assert!(values.iter().all(|v| v.kind() == ValueKind::Length));

    let matcher = registry.matcher(entry);
    let expectation = reduce_all(&matcher, entry.root, &values).unwrap();
    assert_eq!(expectation.count, 4);
    assert!(!matcher.is_open(&expectation));
    assert!(suggest_at(&matcher, entry.root, &values).unwrap().is_empty());
    assert_eq!(
      registry.validate("border-width", "1px 2px 3px 4px").unwrap().state,
      ValidationState::Complete
    );
    assert_eq!(
      registry.validate("border-width", "1px 2px 3px 4px 5px").unwrap().state,
      ValidationState::Invalid { index: 4 }
    );
  }

  #[test]
  fn test_one_keyword() {
    let registry = registry();
    let entry = registry.get("border-width").unwrap();
    let matcher = registry.matcher(entry);
    let values = parse_list("thin").unwrap();
    let expectation = reduce_all(&matcher, entry.root, &values).unwrap();
    assert_eq!(expectation.count, 1);
    assert!(matcher.is_satisfied(&expectation));
    assert!(matcher.is_open(&expectation));
    assert_eq!(labels(&registry, "border-width", "thin"), ["<length>", "thin", "medium", "thick"]);
  }

  #[test]
  fn test_shared_line_width() {
    let registry = registry();
    let line_width = registry.syntax("line-width").unwrap();
    let target = |property: &str| match &registry.resolve(registry.get(property).unwrap().root).kind {
      NodeKind::Reference { target, .. } => *target,
      kind => panic!("expected a reference, got {:?}", kind),
    };
    assert_eq!(target("border-width"), line_width);
    assert_eq!(target("column-rule-width"), line_width);
  }

  #[test]
  fn test_registry_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SpecRegistry>();

    let registry = registry();
    std::thread::scope(|scope| {
      for text in ["thin", "2px medium"] {
        let registry = &registry;
        scope.spawn(move || {
          assert_eq!(
            registry.validate("border-width", text).unwrap().state,
            ValidationState::Complete
          );
        });
      }
    });
  }
}
