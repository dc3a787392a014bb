//! Resolution errors.

use thiserror::Error;

/// Reasons a resolution was abandoned.
///
/// Never surfaced to callers of the query entry points; they log it and
/// report the symbol as unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Too many nested resolutions for one query.
    #[error("resolution of `{name}` exceeded the depth limit of {max_depth}")]
    DepthExceeded { name: String, max_depth: usize },

    /// A symbol's resolution depends on itself.
    #[error("cyclic resolution of `{name}` at line {line}")]
    Cycle { name: String, line: usize },
}

impl ResolveError {
    pub fn depth_exceeded(name: impl Into<String>, max_depth: usize) -> Self {
        Self::DepthExceeded {
            name: name.into(),
            max_depth,
        }
    }

    pub fn cycle(name: impl Into<String>, line: usize) -> Self {
        Self::Cycle {
            name: name.into(),
            line,
        }
    }
}
