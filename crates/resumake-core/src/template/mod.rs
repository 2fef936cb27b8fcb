//! Template module - LaTeX-safe text substitution
//!
//! Renders a LaTeX template against the resume data mapping. The delimiters
//! are chosen so that a template is still ordinary LaTeX between tags.
//!
//! ## Syntax
//!
//! - Output: `<< basics.name >>`, nested keys with dots, list items by index
//!   (`<< jobs.0.title >>`)
//! - Filters: `<< basics.name | latex_escape >>`, `<< skills | join(", ") >>`
//! - Loops: `<BLOCK> for job in jobs </BLOCK> ... <BLOCK> endfor </BLOCK>`,
//!   with an optional `else` branch for empty lists and `loop.index`,
//!   `loop.first`, `loop.last` inside the body
//! - Conditionals: `<BLOCK> if x </BLOCK>`, `elif`, `else`, `endif`; `not x`
//! - Includes: `<BLOCK> include "header.tex" </BLOCK>`, relative to the
//!   including template
//! - Comments: `<# ... #>`
//!
//! Text outside tags is copied byte for byte, except that one newline at
//! the very end of a template is dropped. Nothing is escaped unless a filter
//! does it.

pub mod engine;
pub mod error;
pub mod syntax;

pub use engine::{
    coerce_text, expect_text, render, Filter, FilterRegistry, TemplateContext, TemplateEngine,
};
pub use error::TemplateError;
pub use syntax::Syntax;
