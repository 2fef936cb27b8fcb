//! Filter registry and built-in filters

use serde_yaml::Value;
use std::collections::HashMap;

use super::helpers::{scalar_to_text, untag};
use crate::data::describe_value;

/// A filter maps a value (plus literal arguments) to a new value.
/// The error string becomes `TemplateError::FilterFailed`.
pub type Filter = Box<dyn Fn(&Value, &[Value]) -> Result<Value, String> + Send + Sync>;

/// Named filters available to a template engine
pub struct FilterRegistry {
    filters: HashMap<String, Filter>,
}

impl FilterRegistry {
    /// Registry without any filters
    pub fn empty() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }

    /// Registry with the built-in filters
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.insert("join", Box::new(join));
        registry.insert(
            "upper",
            Box::new(|v: &Value, _: &[Value]| text_filter(v, |s| s.to_uppercase())),
        );
        registry.insert(
            "lower",
            Box::new(|v: &Value, _: &[Value]| text_filter(v, |s| s.to_lowercase())),
        );
        registry.insert(
            "trim",
            Box::new(|v: &Value, _: &[Value]| text_filter(v, |s| s.trim().to_string())),
        );
        registry.insert("length", Box::new(length));
        registry.insert("default", Box::new(default));
        registry
    }

    pub fn insert(&mut self, name: &str, filter: Filter) {
        self.filters.insert(name.to_string(), filter);
    }

    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.filters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Coerce a scalar to text or explain why it cannot be
pub fn expect_text(value: &Value) -> Result<String, String> {
    scalar_to_text(value)
        .ok_or_else(|| format!("expected text, found {}", describe_value(untag(value))))
}

/// Coerce any value to text: scalars as in output, sequences as their items
/// joined with `", "`, mappings as `key: value` pairs joined the same way
pub fn coerce_text(value: &Value) -> String {
    match untag(value) {
        Value::Sequence(items) => items.iter().map(coerce_text).collect::<Vec<_>>().join(", "),
        Value::Mapping(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", coerce_text(key), coerce_text(value)))
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_to_text(other).unwrap_or_default(),
    }
}

fn text_filter(value: &Value, f: impl Fn(&str) -> String) -> Result<Value, String> {
    Ok(Value::String(f(&expect_text(value)?)))
}

/// `join(sep = "")`
fn join(value: &Value, args: &[Value]) -> Result<Value, String> {
    let separator = match args {
        [] => String::new(),
        [sep] => expect_text(sep)?,
        _ => return Err(format!("expected at most 1 argument, got {}", args.len())),
    };

    match untag(value) {
        Value::Sequence(items) => {
            let parts = items.iter().map(expect_text).collect::<Result<Vec<_>, _>>()?;
            Ok(Value::String(parts.join(&separator)))
        }
        other => Err(format!("expected a sequence, found {}", describe_value(other))),
    }
}

/// `default(value = "")`: replaces null. The engine passes undefined
/// operands in as null.
fn default(value: &Value, args: &[Value]) -> Result<Value, String> {
    match (untag(value), args) {
        (Value::Null, []) => Ok(Value::String(String::new())),
        (Value::Null, [fallback]) => Ok(fallback.clone()),
        (_, [] | [_]) => Ok(value.clone()),
        _ => Err(format!("expected at most 1 argument, got {}", args.len())),
    }
}

fn length(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let len = match untag(value) {
        Value::Sequence(items) => items.len(),
        Value::Mapping(map) => map.len(),
        Value::String(s) => s.chars().count(),
        other => return Err(format!("{} has no length", describe_value(other))),
    };
    Ok(Value::Number((len as u64).into()))
}
