//! AnalysisHost and Analysis: state management for the editor adapters.
//!
//! The `AnalysisHost` owns the installed snapshot and the declaration store,
//! and hands out `Analysis` values for querying. An `Analysis` pins one
//! snapshot, so every query made through it sees the same tree.
//!
//! ## Usage
//!
//! ```ignore
//! let host = AnalysisHost::from_config(&AnalysisConfig::discover())?;
//!
//! // Apply document changes
//! host.update_snapshot(text);
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let items = analysis.completions(line_text, line, column);
//! ```

use std::sync::Arc;

use crate::config::AnalysisConfig;
use crate::docs::{DocStore, DocsError, Keywords};
use crate::parser::SyntaxError;
use crate::resolve::{self, Declaration, ResolveLimits};
use crate::syntax::{Snapshot, SnapshotCell};

use super::{CompletionItem, HoverResult, SignatureHelp};

/// Owns all shared state for the adapter layer.
///
/// Apply changes via `update_snapshot()`, then get a consistent view via
/// `analysis()`.
#[derive(Debug)]
pub struct AnalysisHost {
    snapshots: SnapshotCell,
    store: Arc<DocStore>,
    keywords: Arc<Keywords>,
    limits: ResolveLimits,
}

impl AnalysisHost {
    /// Create a host over `store` with the embedded keyword list.
    pub fn new(store: DocStore) -> Self {
        Self {
            snapshots: SnapshotCell::new(),
            store: Arc::new(store),
            keywords: Arc::new(Keywords::default()),
            limits: ResolveLimits::default(),
        }
    }

    /// Create a host from configuration, opening the docs directory.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, DocsError> {
        let store = DocStore::open(&config.docs_dir)?;
        let keywords = match &config.keywords_file {
            Some(path) => Keywords::load(path)?,
            None => Keywords::default(),
        };
        Ok(Self::new(store)
            .with_keywords(keywords)
            .with_limits(config.limits()))
    }

    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = Arc::new(keywords);
        self
    }

    pub fn with_limits(mut self, limits: ResolveLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Re-parse the document.
    ///
    /// On a syntax error the previous snapshot stays installed and the error
    /// is returned.
    pub fn update_snapshot(&self, text: &str) -> Result<Arc<Snapshot>, SyntaxError> {
        self.snapshots.update(text)
    }

    /// Get an analysis pinned to the installed snapshot.
    pub fn analysis(&self) -> Analysis {
        Analysis {
            snapshot: self.snapshots.get(),
            store: Arc::clone(&self.store),
            keywords: Arc::clone(&self.keywords),
            limits: self.limits,
        }
    }

    pub fn store(&self) -> &DocStore {
        &self.store
    }
}

/// A read-only view of one snapshot plus the declaration store.
#[derive(Debug, Clone)]
pub struct Analysis {
    snapshot: Arc<Snapshot>,
    store: Arc<DocStore>,
    keywords: Arc<Keywords>,
    limits: ResolveLimits,
}

impl Analysis {
    /// Module path (or opaque return type) held by a variable.
    pub fn find_declaration(&self, declaration: &Declaration) -> Option<String> {
        resolve::find_declaration(
            &self.snapshot,
            &self.store,
            &self.keywords,
            declaration,
            self.limits,
        )
    }

    /// Completion items for the cursor at `column` of `line_text`.
    pub fn completions(&self, line_text: &str, line: usize, column: usize) -> Vec<CompletionItem> {
        super::completions(self, line_text, line, column)
    }

    /// Hover information for the word at `column` of `line_text`.
    pub fn hover(&self, line_text: &str, line: usize, column: usize) -> Option<HoverResult> {
        super::hover(self, line_text, line, column)
    }

    /// Signature of the call being typed at `column` of `line_text`.
    pub fn signature_help(
        &self,
        line_text: &str,
        line: usize,
        column: usize,
    ) -> Option<SignatureHelp> {
        super::signature_help(self, line_text, line, column)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn store(&self) -> &DocStore {
        &self.store
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }
}
