//! Error types for loading declaration documents.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the explicit loaders of the declaration store.
///
/// Lookups never return these; an unreadable module is treated as unknown.
#[derive(Debug, Error)]
pub enum DocsError {
    /// IO error while reading a schema or keyword file.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON document.
    #[error("JSON error in {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Module path that cannot name a schema document.
    #[error("Invalid module path: {0:?}")]
    InvalidModulePath(String),
}

impl DocsError {
    /// Create an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON error for the document called `name`.
    pub fn json(name: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            name: name.into(),
            source,
        }
    }

    /// Create an invalid module path error.
    pub fn invalid_module_path(path: impl Into<String>) -> Self {
        Self::InvalidModulePath(path.into())
    }
}
