use std::path::PathBuf;
use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum ResumakeError {
    // Input errors
    #[error("MISSING_FILE: {role} file '{}' not found", .path.display())]
    MissingFile { role: &'static str, path: PathBuf },

    #[error("DATA_PARSE_ERROR: failed to parse '{}': {reason}", .path.display())]
    DataParse { path: PathBuf, reason: String },

    // Template errors
    #[error("TEMPLATE_ERROR: {0}")]
    Template(#[from] TemplateError),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Engine errors
    #[error("ENGINE_NOT_FOUND: '{program}' is not an executable path and was not found in PATH")]
    EngineNotFound { program: String },

    #[error("ENGINE_EXEC_FAILED: {0}")]
    EngineExecFailed(String),

    #[error(
        "COMPILE_FAILED: pass {pass} exited with code {exit_code}{}",
        format_diagnostic(.diagnostic)
    )]
    CompilePassFailed {
        pass: u8,
        exit_code: i32,
        diagnostic: String,
    },

    #[error("ARTIFACT_MISSING: engine did not produce '{}'", .path.display())]
    ArtifactMissing { path: PathBuf },

    #[error("COMPILE_CLEANUP_FAILED: '{}': {source}", .path.display())]
    CompileCleanupFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Watch errors
    #[error("WATCH_FAILED: {0}")]
    WatchFailed(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

fn format_diagnostic(diagnostic: &str) -> String {
    if diagnostic.is_empty() {
        String::new()
    } else {
        format!("\n{}", diagnostic)
    }
}

impl ResumakeError {
    /// True for every failure of the compile step, from engine lookup to
    /// artifact rename and aux cleanup
    pub fn is_compilation_failure(&self) -> bool {
        matches!(
            self,
            ResumakeError::EngineNotFound { .. }
                | ResumakeError::EngineExecFailed(_)
                | ResumakeError::CompilePassFailed { .. }
                | ResumakeError::ArtifactMissing { .. }
                | ResumakeError::CompileCleanupFailed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ResumakeError>;
