//! Template error types

use std::fmt;

/// Template parsing and rendering errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Key not found in data context
    UndefinedKey {
        /// The dotted key that was not found
        key: String,
        /// Line number where the error occurred
        line: usize,
    },

    /// Malformed template syntax
    MalformedSyntax {
        /// Error message
        message: String,
        /// Line number where the error occurred
        line: usize,
    },

    /// Sequence printed directly (must be iterated or joined)
    SequenceInOutput {
        /// The key that resolved to a sequence
        key: String,
    },

    /// Mapping printed directly (must use nested keys)
    MappingInOutput {
        /// The key that resolved to a mapping
        key: String,
    },

    /// `for` over a scalar value
    NotIterable {
        /// The key that resolved to a scalar
        key: String,
        /// Line number of the `for` tag
        line: usize,
    },

    /// Filter name not registered with the engine
    UnknownFilter {
        /// Filter name
        name: String,
        /// Line number where the filter was applied
        line: usize,
    },

    /// A filter rejected its input
    FilterFailed {
        /// Filter name
        name: String,
        /// Message returned by the filter
        message: String,
        /// Line number where the filter was applied
        line: usize,
    },

    /// An included template could not be loaded
    IncludeFailed {
        /// Path as written in the include tag
        path: String,
        /// Why loading failed
        reason: String,
        /// Line number of the include tag
        line: usize,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedKey { key, line } => {
                write!(f, "Undefined key '{}' at line {}", key, line)
            }
            TemplateError::MalformedSyntax { message, line } => {
                write!(f, "Malformed syntax at line {}: {}", line, message)
            }
            TemplateError::SequenceInOutput { key } => {
                write!(
                    f,
                    "Sequence '{}' cannot be printed directly. \
                     Iterate it with a for block or use the join filter",
                    key
                )
            }
            TemplateError::MappingInOutput { key } => {
                write!(
                    f,
                    "Mapping '{}' cannot be printed directly. Use nested keys like {}.field",
                    key, key
                )
            }
            TemplateError::NotIterable { key, line } => {
                write!(
                    f,
                    "Value '{}' at line {} is not a sequence or mapping and cannot be iterated",
                    key, line
                )
            }
            TemplateError::UnknownFilter { name, line } => {
                write!(f, "Unknown filter '{}' at line {}", name, line)
            }
            TemplateError::FilterFailed {
                name,
                message,
                line,
            } => {
                write!(f, "Filter '{}' failed at line {}: {}", name, line, message)
            }
            TemplateError::IncludeFailed { path, reason, line } => {
                write!(
                    f,
                    "Cannot include '{}' at line {}: {}",
                    path, line, reason
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}
