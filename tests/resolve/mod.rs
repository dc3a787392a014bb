//! Backward resolver tests
//!
//! Tests for:
//! - Constructor calls, method chains and aliases
//! - Block scoping (`if` clauses, `do` blocks, callbacks)
//! - Table fields selected by key or position
//! - Limits and unresolvable inputs

pub mod tests_find_declaration;
pub mod tests_tables;
