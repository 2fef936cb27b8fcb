// Core modules
pub mod backup;
pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod template;

// Re-export commonly used types
pub use error::{Result, ResumakeError};
