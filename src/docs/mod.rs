//! Declaration store: per-module member schemas and the reserved-word list.
//!
//! Schema documents are named after their module (`hs.application.json`) and
//! map member names to their kind, documentation, definition and parameters.

mod error;
mod keywords;
mod schema;
mod store;

pub use error::DocsError;
pub use keywords::Keywords;
pub use schema::{MemberEntry, MemberKind, ModuleSchema, parse_return};
pub use store::{DocStore, MemberSummary, SignatureInfo, normalize_module_path};
