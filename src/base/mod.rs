//! Foundation types for the analysis toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Span`] - Line/column positions for AST nodes
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - Domain constants (root namespace, schema file layout)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
