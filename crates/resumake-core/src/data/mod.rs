//! Resume data loading
//!
//! Resume data is an untyped YAML mapping. No schema is enforced here: the
//! template decides which fields it needs, and a missing field surfaces as a
//! template error at render time.

use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

use crate::error::{ResumakeError, Result};

/// Parsed resume data (top-level YAML mapping)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResumeData {
    root: Mapping,
}

impl ResumeData {
    pub fn new(root: Mapping) -> Self {
        Self { root }
    }

    /// Parse YAML text. `origin` is only used in error messages.
    pub fn from_yaml_str(text: &str, origin: &Path) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_yaml::from_str(text).map_err(|e| ResumakeError::DataParse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;

        match value {
            Value::Mapping(root) => Ok(Self { root }),
            // Empty document
            Value::Null => Ok(Self::default()),
            other => Err(ResumakeError::DataParse {
                path: origin.to_path_buf(),
                reason: format!(
                    "top level must be a mapping, found {}",
                    describe_value(&other)
                ),
            }),
        }
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// The data as a single YAML value (for template contexts)
    pub fn to_value(&self) -> Value {
        Value::Mapping(self.root.clone())
    }
}

/// Load resume data from a YAML file
pub fn load_resume_data(path: impl AsRef<Path>) -> Result<ResumeData> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ResumakeError::MissingFile {
            role: "data",
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path)?;
    let data = ResumeData::from_yaml_str(&text, path)?;
    log::debug!(
        "loaded {} top-level field(s) from {}",
        data.root.len(),
        path.display()
    );
    Ok(data)
}

pub(crate) fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
