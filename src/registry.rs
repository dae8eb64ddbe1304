//! The spec registry: compiled grammars for every property.
//!
//! A registry is built once from a property table and a named syntax table, in the format of
//! [mdn-data](https://github.com/mdn/data/tree/main/css). Building compiles every syntax into one
//! shared [GrammarArena](GrammarArena), so two properties that reference `<line-width>` share the
//! same nodes. The registry is immutable afterwards, and is passed to consumers explicitly.

use crate::error::{Error, GrammarError, RegistryError, RegistryErrorKind, SuggestionError};
use crate::grammar::matcher::{GreedyMatcher, Matcher, Reduction};
use crate::grammar::node::{GrammarArena, GrammarNode, NodeId, NodeKind};
use crate::grammar::parser::compile_named;
use crate::grammar::suggest::{suggest_at, suggestions, Suggestion};
use crate::grammar::Expectation;
use crate::printer::PrinterOptions;
use crate::values::value::{parse_list, Value};
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize, Serializer};

/// A field that is either a single string, or a list of property names it is derived from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StringOrList {
  /// A single value.
  String(String),
  /// A list of property names.
  List(Vec<String>),
}

/// The metadata of a property.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
  /// The value definition syntax.
  pub syntax: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub media: Option<StringOrList>,
  #[serde(default)]
  pub inherited: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub animation_type: Option<StringOrList>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub percentages: Option<StringOrList>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub groups: Vec<String>,
  /// The initial value.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub initial: Option<StringOrList>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub appliesto: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub computed: Option<StringOrList>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub order: Option<String>,
  /// The standardization status, e.g. `standard` or `experimental`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
  #[serde(default, rename = "mdn_url", skip_serializing_if = "Option::is_none")]
  pub mdn_url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub stacking: Option<bool>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub also_applies_to: Vec<String>,
  /// Identifiers that `<custom-ident>` does not accept in this property.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub forbidden_idents: Vec<String>,
}

/// A named syntax, e.g. `line-width`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SyntaxSpec {
  /// The value definition syntax.
  pub syntax: String,
}

/// Options for building a registry.
#[derive(Debug, Clone)]
pub struct RegistryOptions {
  /// The property statuses to include.
  pub statuses: Vec<String>,
  /// Properties to include regardless of their status.
  pub include: Vec<String>,
  /// Properties to exclude.
  pub exclude: Vec<String>,
  /// Replacement syntaxes for properties.
  pub property_syntaxes: IndexMap<String, String>,
  /// Replacement syntaxes for named syntaxes.
  pub named_syntaxes: IndexMap<String, String>,
  /// Identifiers that `<custom-ident>` does not accept, per property.
  pub forbidden_idents: IndexMap<String, Vec<String>>,
  /// Named syntaxes compiled before all others, which are compiled in alphabetical order.
  pub priority: Vec<String>,
}

const CSS_WIDE_AND_NONE: &[&str] = &["unset", "initial", "inherit", "none"];

const PRIORITY: &[&str] = &[
  "length-percentage",
  "visual-box",
  "box",
  "line-names",
  "name-repeat",
  "masking-mode",
  "mask-source",
  "target",
  "cubic-bezier-timing-function",
  "step-timing-function",
  "single-animation-iteration-count",
  "single-animation-direction",
  "single-animation-fill-mode",
  "single-animation-play-state",
  "bg-position",
  "transition-behavior-value",
  "single-animation-timeline",
  "single-transition-property",
  "easing-function",
  "shape-box",
  "quote",
  "display-outside",
  "counter-style-name",
  "mask-reference",
  "paint-box",
];

fn strings(list: &[&str]) -> Vec<String> {
  list.iter().map(|s| (*s).to_owned()).collect()
}

impl Default for RegistryOptions {
  fn default() -> RegistryOptions {
    let mut forbidden_idents = IndexMap::new();
    for name in [
      "animation-name",
      "counter-reset",
      "counter-increment",
      "list-style-type",
      "view-transition-name",
    ] {
      forbidden_idents.insert(name.to_owned(), strings(CSS_WIDE_AND_NONE));
    }
    for name in ["grid-row-start", "grid-row-end", "grid-column-start", "grid-column-end"] {
      forbidden_idents.insert(name.to_owned(), strings(&["span"]));
    }
    forbidden_idents.insert(
      "will-change".to_owned(),
      strings(&["unset", "initial", "inherit", "will-change", "auto", "scroll-position", "contents"]),
    );

    let mut property_syntaxes = IndexMap::new();
    property_syntaxes.insert(
      "offset-path".to_owned(),
      "none | <url> | <basic-shape> || <coord-box>".to_owned(),
    );
    let mut named_syntaxes = IndexMap::new();
    named_syntaxes.insert(
      "keyframe-block".to_owned(),
      "<keyframe-selector># '{' <declaration-list> '}'".to_owned(),
    );

    RegistryOptions {
      statuses: strings(&["standard"]),
      include: strings(&["font-smooth"]),
      exclude: strings(&["font-palette"]),
      property_syntaxes,
      named_syntaxes,
      forbidden_idents,
      priority: strings(PRIORITY),
    }
  }
}

/// A compiled property.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyEntry {
  /// The property name.
  pub name: String,
  /// The syntax the grammar was compiled from, after overrides.
  #[serde(rename = "compiledSyntax")]
  pub syntax: String,
  /// The root node of the grammar.
  #[serde(skip)]
  pub root: NodeId,
  /// Identifiers that `<custom-ident>` does not accept in this property.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub forbidden_idents: Vec<String>,
  /// The property metadata.
  #[serde(flatten)]
  pub spec: PropertySpec,
}

/// The outcome of validating a declaration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum ValidationState {
  /// The value is complete.
  Complete,
  /// The value is valid so far, but more components are required.
  Incomplete,
  /// The component at `index` is not valid at its position.
  Invalid {
    /// The index of the first invalid component.
    index: usize,
  },
}

/// A validated declaration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
  /// The parsed components.
  #[serde(serialize_with = "serialize_values")]
  pub values: Vec<Value>,
  /// The outcome.
  #[serde(flatten)]
  pub state: ValidationState,
}

fn serialize_values<S>(values: &[Value], serializer: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
{
  use crate::traits::ToCss;
  let css: Result<Vec<String>, _> = values
    .iter()
    .map(|v| v.to_css_string(PrinterOptions::default()))
    .collect();
  match css {
    Ok(css) => serializer.collect_seq(css),
    Err(err) => Err(serde::ser::Error::custom(err)),
  }
}

/// A grammar problem found by [SpecRegistry::audit](SpecRegistry::audit).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditFailure {
  /// The property whose grammar has the problem.
  pub property: String,
  /// The error description.
  pub error: String,
}

/// Compiled grammars for a set of properties.
#[derive(Debug, Clone)]
pub struct SpecRegistry {
  arena: GrammarArena,
  properties: IndexMap<String, PropertyEntry>,
  syntaxes: IndexMap<String, NodeId>,
  excluded: Vec<(String, GrammarError)>,
}

/// The slot name of the grammar of a property, as referenced by `<'property'>`.
fn property_slot(name: &str) -> String {
  format!("'{}'", name)
}

impl SpecRegistry {
  /// Builds a registry from parsed tables.
  ///
  /// A property whose syntax fails to compile is excluded and logged, and does not affect the others.
  pub fn build(
    properties: IndexMap<String, PropertySpec>,
    syntaxes: IndexMap<String, SyntaxSpec>,
    options: &RegistryOptions,
  ) -> SpecRegistry {
    let mut arena = GrammarArena::new();
    let mut excluded = Vec::new();
    let mut compiled = IndexMap::new();

    let prioritized = options.priority.iter().filter(|name| syntaxes.contains_key(name.as_str()));
    let rest = syntaxes
      .keys()
      .filter(|name| !options.priority.contains(name))
      .sorted();
    for name in prioritized.chain(rest) {
      let syntax = match options.named_syntaxes.get(name) {
        Some(syntax) => syntax.as_str(),
        None => syntaxes[name.as_str()].syntax.as_str(),
      };
      match compile_named(&mut arena, name, syntax) {
        Ok(slot) => {
          compiled.insert(name.clone(), slot);
        }
        Err(err) => {
          warn!("Excluding syntax <{}> = {}: {}", name, syntax, err);
          excluded.push((name.clone(), err));
        }
      }
    }

    let mut entries = IndexMap::new();
    for (name, spec) in &properties {
      let allowed = spec.status.as_ref().map_or(false, |status| options.statuses.contains(status))
        || options.include.contains(name);
      if !allowed || options.exclude.contains(name) {
        continue;
      }

      let syntax = options.property_syntaxes.get(name).unwrap_or(&spec.syntax).clone();
      match compile_named(&mut arena, &property_slot(name), &syntax) {
        Ok(root) => {
          let mut forbidden_idents = options.forbidden_idents.get(name).cloned().unwrap_or_default();
          forbidden_idents.extend(spec.forbidden_idents.iter().cloned());
          entries.insert(
            name.clone(),
            PropertyEntry {
              name: name.clone(),
              syntax,
              root,
              forbidden_idents,
              spec: spec.clone(),
            },
          );
        }
        Err(err) => {
          warn!("Excluding property {}: {} ({})", name, syntax, err);
          excluded.push((name.clone(), err));
        }
      }
    }

    // Properties that were filtered out may still be referenced as `<'name'>` by others.
    loop {
      let pending: Vec<(String, String)> = arena
        .names()
        .filter(|(_, slot)| !arena.is_filled(*slot))
        .filter_map(|(slot, _)| {
          let name = slot.strip_prefix('\'')?.strip_suffix('\'')?;
          let spec = properties.get(name)?;
          Some((slot.to_owned(), spec.syntax.clone()))
        })
        .filter(|(slot, _)| !excluded.iter().any(|(name, _)| property_slot(name) == *slot))
        .collect();
      if pending.is_empty() {
        break;
      }
      for (slot, syntax) in pending {
        if let Err(err) = compile_named(&mut arena, &slot, &syntax) {
          warn!("Excluding referenced property {}: {} ({})", slot, syntax, err);
          excluded.push((slot.trim_matches('\'').to_owned(), err));
        }
      }
    }

    let unresolved = arena.names().filter(|(_, slot)| !arena.is_filled(*slot)).count();
    debug!(
      "Compiled {} properties and {} syntaxes into {} nodes, {} excluded, {} unresolved",
      entries.len(),
      compiled.len(),
      arena.len(),
      excluded.len(),
      unresolved
    );

    SpecRegistry {
      arena,
      properties: entries,
      syntaxes: compiled,
      excluded,
    }
  }

  /// Builds a registry from the JSON text of a property table and a syntax table.
  pub fn from_json(properties: &str, syntaxes: &str, options: &RegistryOptions) -> Result<SpecRegistry, RegistryError> {
    let properties: IndexMap<String, PropertySpec> = serde_json::from_str(properties)?;
    let syntaxes: IndexMap<String, SyntaxSpec> = serde_json::from_str(syntaxes)?;
    Ok(SpecRegistry::build(properties, syntaxes, options))
  }

  /// Builds a registry from the tables embedded in the crate, with the default options.
  #[cfg(feature = "bundled-data")]
  pub fn bundled() -> Result<SpecRegistry, RegistryError> {
    SpecRegistry::from_json(
      include_str!("../data/properties.json"),
      include_str!("../data/syntaxes.json"),
      &RegistryOptions::default(),
    )
  }

  /// Returns a compiled property.
  pub fn get(&self, property: &str) -> Option<&PropertyEntry> {
    self.properties.get(property)
  }

  fn entry(&self, property: &str) -> Result<&PropertyEntry, RegistryError> {
    self.get(property).ok_or_else(|| Error {
      kind: RegistryErrorKind::UnknownProperty(property.to_owned()),
      loc: None,
    })
  }

  /// Iterates over the compiled properties.
  pub fn properties(&self) -> impl Iterator<Item = &PropertyEntry> {
    self.properties.values()
  }

  /// The properties and syntaxes that failed to compile.
  pub fn excluded(&self) -> &[(String, GrammarError)] {
    &self.excluded
  }

  /// Returns a grammar node.
  pub fn resolve(&self, id: NodeId) -> &GrammarNode {
    self.arena.get(id)
  }

  /// Returns the root node of a named syntax.
  pub fn syntax(&self, name: &str) -> Option<NodeId> {
    self.syntaxes.get(name).copied()
  }

  /// The arena holding every compiled grammar.
  pub fn arena(&self) -> &GrammarArena {
    &self.arena
  }

  /// Returns a matcher for a property.
  pub fn matcher<'a>(&'a self, entry: &'a PropertyEntry) -> GreedyMatcher<'a> {
    GreedyMatcher::new(&self.arena).with_forbidden_idents(&entry.forbidden_idents)
  }

  /// Parses a declaration value of a property into component values.
  pub fn parse_value(&self, property: &str, text: &str) -> Result<Vec<Value>, RegistryError> {
    self.entry(property)?;
    Ok(parse_list(text)?)
  }

  /// Parses and validates a declaration value of a property.
  ///
  /// A CSS-wide keyword on its own is valid for every property.
  pub fn validate(&self, property: &str, text: &str) -> Result<Validation, RegistryError> {
    let entry = self.entry(property)?;
    let values = parse_list(text)?;
    if let [Value::Keyword(ident)] = values.as_slice() {
      if ident.is_css_wide() {
        return Ok(Validation {
          values,
          state: ValidationState::Complete,
        });
      }
    }
    let matcher = self.matcher(entry);
    let mut expectation = matcher.start(entry.root);
    let mut state = None;
    for (index, value) in values.iter().enumerate() {
      match matcher.reduce(&expectation, value) {
        Reduction::Rejected => {
          state = Some(ValidationState::Invalid { index });
          break;
        }
        Reduction::Exhausted(next) | Reduction::Partial(next) => expectation = next,
      }
    }
    let state = state.unwrap_or_else(|| {
      if matcher.is_satisfied(&expectation) {
        ValidationState::Complete
      } else {
        ValidationState::Incomplete
      }
    });
    Ok(Validation { values, state })
  }

  /// Returns the values that may follow a partial declaration value of a property.
  pub fn suggest(&self, property: &str, text: &str) -> Result<Vec<Suggestion>, RegistryError> {
    let entry = self.entry(property)?;
    let values = parse_list(text)?;
    let matcher = self.matcher(entry);
    Ok(suggest_at(&matcher, entry.root, &values)?.into_iter().collect())
  }

  /// Checks that suggestions can be computed at every node of every property grammar, and
  /// returns the failures.
  pub fn audit(&self) -> Vec<AuditFailure> {
    let mut failures = Vec::new();
    for entry in self.properties.values() {
      let matcher = self.matcher(entry);
      let mut errors: IndexSet<String> = IndexSet::new();
      let mut visited = IndexSet::new();
      let mut stack = vec![entry.root];
      while let Some(id) = stack.pop() {
        if !visited.insert(id) {
          continue;
        }
        let result: Result<_, SuggestionError> = suggestions(&matcher, &Expectation::new(id));
        if let Err(err) = result {
          errors.insert(err.to_string());
        }
        let node = self.arena.get(id);
        match &node.kind {
          NodeKind::Reference { target, .. } if self.arena.is_filled(*target) => stack.push(*target),
          // Function arguments are matched by the value parser, not by the grammar.
          NodeKind::FunctionCall { .. } => {}
          _ => stack.extend(node.children().iter().rev()),
        }
      }
      failures.extend(errors.into_iter().map(|error| AuditFailure {
        property: entry.name.clone(),
        error,
      }));
    }
    failures
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use indoc::indoc;
  use pretty_assertions::assert_eq;

  const PROPERTIES: &str = indoc! {r#"
    {
      "border-top-width": {
        "syntax": "<line-width>",
        "inherited": false,
        "initial": "medium",
        "status": "standard"
      },
      "border-width": {
        "syntax": "<line-width>{1,4}",
        "inherited": false,
        "initial": ["border-top-width", "border-right-width"],
        "status": "standard"
      },
      "outline-width": {
        "syntax": "<'border-top-width'>",
        "status": "standard"
      },
      "animation-name": {
        "syntax": "[ none | <keyframes-name> ]#",
        "status": "standard"
      },
      "zoom": {
        "syntax": "normal | reset | <number> | <percentage>",
        "status": "nonstandard"
      },
      "broken": {
        "syntax": "<length>{4,2}",
        "status": "standard"
      }
    }
  "#};

  const SYNTAXES: &str = indoc! {r#"
    {
      "line-width": { "syntax": "<length> | thin | medium | thick" },
      "keyframes-name": { "syntax": "<custom-ident> | <string>" }
    }
  "#};

  fn registry() -> SpecRegistry {
    SpecRegistry::from_json(PROPERTIES, SYNTAXES, &RegistryOptions::default()).unwrap()
  }

  fn labels(suggestions: Vec<Suggestion>) -> Vec<String> {
    suggestions.iter().map(|s| s.label()).collect()
  }

  #[test]
  fn test_build() {
    let registry = registry();
    let names: Vec<&str> = registry.properties().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["border-top-width", "border-width", "outline-width", "animation-name"]);
    assert_eq!(registry.excluded().len(), 1);
    assert_eq!(registry.excluded()[0].0, "broken");
    assert!(registry.get("zoom").is_none());

    let entry = registry.get("border-width").unwrap();
    assert_eq!(entry.syntax, "<line-width>{1,4}");
    assert_eq!(
      entry.spec.initial,
      Some(StringOrList::List(vec!["border-top-width".into(), "border-right-width".into()]))
    );
    assert_eq!(entry.spec.status.as_deref(), Some("standard"));
    assert_eq!(
      registry.get("animation-name").unwrap().forbidden_idents,
      ["unset", "initial", "inherit", "none"]
    );
  }

  #[test]
  fn test_shared_references() {
    let registry = registry();
    let line_width = registry.syntax("line-width").unwrap();
    let top = registry.get("border-top-width").unwrap().root;
    let all = registry.get("border-width").unwrap().root;
    assert_eq!(registry.arena().resolve(top), line_width);
    assert_eq!(registry.arena().resolve(all), line_width);
    assert_eq!(registry.resolve(line_width).name.as_deref(), Some("line-width"));

    let outline = registry.get("outline-width").unwrap().root;
    assert_eq!(registry.arena().resolve(outline), line_width);
    match &registry.resolve(outline).kind {
      NodeKind::Reference { target, .. } => assert_eq!(*target, top),
      kind => panic!("expected a reference, found {:?}", kind),
    }
  }

  #[test]
  fn test_validate() {
    let registry = registry();
    let validation = registry.validate("border-width", "1px 2px 3px 4px").unwrap();
    assert_eq!(validation.values.len(), 4);
    assert_eq!(validation.state, ValidationState::Complete);
    assert_eq!(
      registry.validate("border-width", "1px 2px 3px 4px 5px").unwrap().state,
      ValidationState::Invalid { index: 4 }
    );
    assert_eq!(
      registry.validate("animation-name", "slide,").unwrap().state,
      ValidationState::Incomplete
    );
    assert_eq!(
      registry.validate("animation-name", "inherit").unwrap().state,
      ValidationState::Complete
    );
    assert_eq!(
      registry.validate("animation-name", "slide, inherit").unwrap().state,
      ValidationState::Invalid { index: 2 }
    );
    assert_eq!(
      serde_json::to_string(&registry.validate("border-width", "thin 2PX").unwrap()).unwrap(),
      r#"{"values":["thin","2px"],"state":"complete"}"#
    );
  }

  #[test]
  fn test_errors() {
    let registry = registry();
    assert_eq!(
      registry.validate("zoom", "1").unwrap_err().kind,
      RegistryErrorKind::UnknownProperty("zoom".into())
    );
    assert!(matches!(
      registry.parse_value("border-width", "1px foo(2)").unwrap_err().kind,
      RegistryErrorKind::InvalidValue(_)
    ));
    assert!(matches!(
      SpecRegistry::from_json("{", SYNTAXES, &RegistryOptions::default()).unwrap_err().kind,
      RegistryErrorKind::InvalidTable(_)
    ));
  }

  #[test]
  fn test_suggest() {
    let registry = registry();
    assert_eq!(
      labels(registry.suggest("border-width", "thin").unwrap()),
      ["<length>", "thin", "medium", "thick"]
    );
    assert!(registry.suggest("border-width", "1px 2px 3px 4px").unwrap().is_empty());
    assert_eq!(
      labels(registry.suggest("animation-name", "").unwrap()),
      ["none", "<custom-ident>", "<string>"]
    );
    assert_eq!(labels(registry.suggest("animation-name", "slide").unwrap()), [","]);
  }

  #[test]
  fn test_audit() {
    let syntaxes = r#"{ "line-width": { "syntax": "<length> | thin | <missing>" } }"#;
    let registry = SpecRegistry::from_json(PROPERTIES, syntaxes, &RegistryOptions::default()).unwrap();
    let failures = registry.audit();
    assert!(failures.iter().any(|f| f.property == "border-width"
      && f.error == "Unknown data type 'missing' in expression '<missing>'"));
    assert!(failures.iter().any(|f| f.property == "animation-name"));
    assert!(registry.audit().iter().all(|f| f.property != "zoom"));
  }

  #[cfg(feature = "bundled-data")]
  #[test]
  fn test_bundled() {
    let registry = SpecRegistry::bundled().unwrap();
    assert!(registry.excluded().is_empty(), "{:?}", registry.excluded());
    let failures = registry.audit();
    assert!(failures.is_empty(), "{:?}", failures);
    assert_eq!(
      registry.validate("border-width", "1px 2px 3px 4px").unwrap().state,
      ValidationState::Complete
    );
  }

  #[cfg(feature = "bundled-data")]
  #[test]
  fn test_counter_style_names() {
    let registry = SpecRegistry::bundled().unwrap();
    for text in ["decimal", "disc", "lower-roman", "my-style", "\"-\"", "none"] {
      assert_eq!(
        registry.validate("list-style-type", text).unwrap().state,
        ValidationState::Complete,
        "{}",
        text
      );
    }
    assert_eq!(
      registry.validate("list-style-type", "inherit decimal").unwrap().state,
      ValidationState::Invalid { index: 0 }
    );
    let entry = registry.get("list-style-type").unwrap();
    assert!(entry.forbidden_idents.iter().all(|ident| ident != "decimal"));
  }
}
