//! Helper functions for template rendering

use serde_yaml::Value;

use crate::template::error::TemplateError;

/// Follow path segments below `value`. Numeric segments index sequences.
pub(crate) fn resolve_segments<'a>(value: &'a Value, segments: &[String]) -> Option<&'a Value> {
    let mut current = untag(value);

    for segment in segments {
        current = match current {
            Value::Mapping(map) => map.get(segment.as_str())?,
            Value::Sequence(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
        current = untag(current);
    }

    Some(current)
}

/// See through YAML tags (`!tag value`)
pub(crate) fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

/// Scalar as text; `None` for sequences and mappings
pub(crate) fn scalar_to_text(value: &Value) -> Option<String> {
    match untag(value) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

/// Stringify a value for template output
pub(crate) fn stringify_value(value: &Value, key: &str) -> Result<String, TemplateError> {
    match untag(value) {
        Value::Sequence(_) => Err(TemplateError::SequenceInOutput {
            key: key.to_string(),
        }),
        Value::Mapping(_) => Err(TemplateError::MappingInOutput {
            key: key.to_string(),
        }),
        other => Ok(scalar_to_text(other).unwrap_or_default()),
    }
}

/// Condition truthiness: null, false, 0, "" and empty collections are false
pub(crate) fn is_truthy(value: &Value) -> bool {
    match untag(value) {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(_) => true,
    }
}
