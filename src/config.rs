//! Analysis configuration.
//!
//! ```json
//! {
//!   "docs_dir": "resources/hs_docs",
//!   "keywords_file": "resources/lua_keywords.json",
//!   "max_resolve_depth": 64
//! }
//! ```
//!
//! Every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::base::constants::{DEFAULT_MAX_RESOLVE_DEPTH, DOCS_DIR};
use crate::resolve::ResolveLimits;

/// Errors reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory of `<module>.json` schema documents
    pub docs_dir: PathBuf,
    /// Reserved-word document; the embedded list is used when unset
    pub keywords_file: Option<PathBuf>,
    /// Cap on nested resolutions per query
    pub max_resolve_depth: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from(DOCS_DIR),
            keywords_file: None,
            max_resolve_depth: DEFAULT_MAX_RESOLVE_DEPTH,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Default configuration with the docs directory located on disk
    pub fn discover() -> Self {
        Self {
            docs_dir: discover_docs_dir(),
            ..Self::default()
        }
    }

    pub fn limits(&self) -> ResolveLimits {
        ResolveLimits {
            max_depth: self.max_resolve_depth,
        }
    }
}

/// Find the schema directory: next to the executable, then in the crate
/// directory, then relative to the working directory.
fn discover_docs_dir() -> PathBuf {
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        let next_to_exe = exe_dir.join(DOCS_DIR);
        if next_to_exe.is_dir() {
            return next_to_exe;
        }
    }

    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let in_manifest = PathBuf::from(manifest_dir).join(DOCS_DIR);
        if in_manifest.is_dir() {
            return in_manifest;
        }
    }

    PathBuf::from(DOCS_DIR)
}
