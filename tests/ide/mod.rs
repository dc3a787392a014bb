//! Editor adapter tests
//!
//! Tests for:
//! - Completion of module paths, methods and table values
//! - Hover documentation and resolved types
//! - Signature help and the active parameter

pub mod tests_completion;
pub mod tests_hover;
pub mod tests_signature_help;
