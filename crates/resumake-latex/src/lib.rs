//! LaTeX engine resolution and document compilation for resumake.
//!
//! # Architecture
//!
//! - [`resolve`]: find the engine binary (literal path or `PATH` lookup)
//! - [`exec`]: run a command and capture its output, behind the
//!   [`CommandRunner`] trait
//! - [`compile`]: the two-pass compile, artifact rename and aux cleanup
//!
//! # Compile Flow
//!
//! ```text
//! compile_document()
//!     ↓
//! 1. pass 1: <engine> <args> resume.tex   (cwd = document dir)
//!     ↓ (exit 0)
//! 2. pass 2: same command
//!     ↓ (exit 0)
//! 3. rename resume.pdf → Resume.pdf
//!     ↓
//! 4. remove resume.aux, resume.out, ...
//! ```
//!
//! A non-zero exit stops the flow at that pass with
//! `ResumakeError::CompilePassFailed`.
//!
//! # Example
//!
//! ```no_run
//! use resumake_core::config::EngineConfig;
//! use resumake_latex::{compile_document, CompileOptions, SystemRunner};
//! use std::path::PathBuf;
//!
//! # fn main() -> resumake_core::Result<()> {
//! let options = CompileOptions {
//!     document: PathBuf::from("resume.tex"),
//!     artifact_name: "Resume".to_string(),
//!     engine: EngineConfig::default(),
//! };
//!
//! let outcome = compile_document(&options, &SystemRunner)?;
//! println!("PDF: {}", outcome.artifact.display());
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod compile;
pub mod exec;
pub mod resolve;

// Re-export commonly used types
pub use compile::{
    COMPILE_PASSES, CompileOptions, CompileOutcome, compile_document, extract_diagnostic,
};
pub use exec::{CommandRunner, ExecResult, SystemRunner};
pub use resolve::resolve_engine;

// Type alias for convenience
pub type Result<T> = resumake_core::Result<T>;
