//! Syntax snapshots: source repair plus the parsed tree of the active document.

mod prepare;
mod snapshot;

pub use prepare::prepare_source;
pub use snapshot::{Snapshot, SnapshotCell, build_snapshot};
