//! Parsed snapshots of the active document.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::prepare::prepare_source;
use crate::parser::{Chunk, SyntaxError, parse};

/// An immutable parse of one version of the document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    chunk: Chunk,
    version: u64,
}

impl Snapshot {
    /// The snapshot installed before the first successful parse
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Repair and parse `text` into a snapshot tagged with `version`
pub fn build_snapshot(text: &str, version: u64) -> Result<Snapshot, SyntaxError> {
    let prepared = prepare_source(text);
    let chunk = parse(&prepared)?;
    Ok(Snapshot { chunk, version })
}

/// The currently installed snapshot.
///
/// Writers parse outside the lock and only swap the pointer; readers clone the
/// `Arc`, so a query started before an update keeps a consistent tree.
#[derive(Debug, Default)]
pub struct SnapshotCell {
    current: RwLock<Arc<Snapshot>>,
    /// Serializes updates so versions are installed in order
    update_lock: Mutex<u64>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// The installed snapshot
    pub fn get(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }

    /// Rebuild from `text`.
    ///
    /// On a syntax error the previous snapshot stays installed and the error is
    /// returned for the caller to report.
    pub fn update(&self, text: &str) -> Result<Arc<Snapshot>, SyntaxError> {
        let mut last_version = self.update_lock.lock();
        let version = *last_version + 1;

        match build_snapshot(text, version) {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *self.current.write() = Arc::clone(&snapshot);
                *last_version = version;
                tracing::debug!(version, "installed new snapshot");
                Ok(snapshot)
            }
            Err(error) => {
                tracing::warn!(%error, "failed to parse document, keeping previous snapshot");
                Err(error)
            }
        }
    }
}
