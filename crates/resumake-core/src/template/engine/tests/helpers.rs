//! Shared test helpers for template engine tests

use crate::template::engine::TemplateContext;
use serde_yaml::{Mapping, Value};

/// Build a context from a YAML document
pub(super) fn yaml_context(text: &str) -> TemplateContext {
    match serde_yaml::from_str::<Value>(text).unwrap() {
        Value::Mapping(map) => TemplateContext::new(map),
        Value::Null => TemplateContext::new(Mapping::new()),
        other => panic!("test context must be a mapping, got {:?}", other),
    }
}

/// Create a simple test context with basic scalar values
pub(super) fn simple_context() -> TemplateContext {
    yaml_context(
        r#"
title: "My Title"
count: 42
price: 9.99
enabled: true
nothing: null
empty: ""
"#,
    )
}

/// Create a resume-shaped context with sequences and mappings
pub(super) fn resume_context() -> TemplateContext {
    yaml_context(
        r#"
basics:
  name: "Ada Lovelace"
  email: "ada@example.com"
  location:
    city: "London"
skills:
  - Rust
  - LaTeX
  - YAML
jobs:
  - title: "Engineer"
    company: "R&D Ltd"
    highlights:
      - "Cut build time by 50%"
      - "Shipped v2"
  - title: "Lead"
    company: "Analytical Engines"
    highlights: []
projects: []
"#,
    )
}
