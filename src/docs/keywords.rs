//! Reserved words of the scripting language.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::Deserialize;

use super::error::DocsError;

/// Lua 5.3 reserved words shipped with the crate
const EMBEDDED: &str = include_str!("../../resources/lua_keywords.json");

#[derive(Debug, Deserialize)]
struct KeywordDocument {
    keywords: Vec<String>,
}

/// Words that never name a variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    words: FxHashSet<String>,
}

impl Keywords {
    /// Parse a `{ "keywords": [...] }` document
    pub fn from_json(json: &str) -> Result<Self, DocsError> {
        let document: KeywordDocument =
            serde_json::from_str(json).map_err(|e| DocsError::json("keywords", e))?;
        Ok(Self {
            words: document.keywords.into_iter().collect(),
        })
    }

    /// Load a keyword document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DocsError::io(path, e))?;
        Self::from_json(&json)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Keywords {
    /// The embedded reserved-word list
    fn default() -> Self {
        Self::from_json(EMBEDDED).unwrap_or_else(|error| {
            tracing::warn!(%error, "embedded keyword list is unreadable");
            Self {
                words: FxHashSet::default(),
            }
        })
    }
}
