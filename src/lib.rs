//! # hs-analysis
//!
//! Backward type inference for Hammerspoon Lua scripts: given a variable at a
//! line, work out which `hs.*` module it holds, then answer completion, hover
//! and signature questions from the module documentation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → AnalysisHost/Analysis, completion, hover, signature help
//!   ↓
//! resolve   → Backward resolver (declaration queries over a snapshot)
//!   ↓
//! docs      → Declaration store (module schemas, keyword list)
//!   ↓
//! syntax    → Source repair, immutable parsed snapshots
//!   ↓
//! parser    → Logos lexer, recursive-descent Lua 5.3 parser, typed AST
//!   ↓
//! base      → Primitives (Position, Span, LineIndex, constants)
//! ```
//!
//! `config` sits beside the stack and only feeds paths and limits into `ide`.

// ============================================================================
// MODULES (dependency order: base → parser → syntax → docs → resolve → ide)
// ============================================================================

/// Foundation types: Position, Span, LineIndex
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Syntax: source repair and parsed snapshots
pub mod syntax;

/// Declaration store: `hs.*` module schemas and reserved words
pub mod docs;

/// Backward resolver: which module a variable holds
pub mod resolve;

/// IDE features: completion, hover, signature help
pub mod ide;

/// Analysis configuration: docs directory, keyword list, resolver limits
pub mod config;

// Re-export foundation types
pub use base::{LineIndex, Position, Span, TextRange, TextSize};

// Re-export the main entry points
pub use config::{AnalysisConfig, ConfigError};
pub use docs::{DocStore, DocsError, Keywords};
pub use ide::{Analysis, AnalysisHost};
pub use resolve::{Declaration, ResolveLimits, find_declaration};
pub use syntax::{Snapshot, build_snapshot};
