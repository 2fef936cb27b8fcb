//! Tests for template engine
//!
//! Organized by concern: tokenizing, plain output, blocks, filters,
//! includes and errors.

use super::*;

// Test helper functions
mod helpers;


mod render_filters;

// Error and edge case tests
mod errors;
