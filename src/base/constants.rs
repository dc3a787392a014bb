//! Domain constants shared across layers.

/// Root identifier of the automation API namespace.
pub const ROOT_NAMESPACE: &str = "hs";

/// Separator between module path segments.
pub const MODULE_SEPARATOR: char = '.';

/// Extension of the per-module schema documents.
pub const SCHEMA_EXTENSION: &str = "json";

/// Directory holding the per-module schema documents.
pub const DOCS_DIR: &str = "resources/hs_docs";

/// Default cap on nested resolutions started by a single query.
pub const DEFAULT_MAX_RESOLVE_DEPTH: usize = 64;
