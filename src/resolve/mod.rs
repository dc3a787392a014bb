//! Backward resolver: what module does a variable hold at a given line?

mod context;
mod declaration;
mod error;
mod resolver;

pub use context::{QueryContext, ResolveLimits};
pub use declaration::{CallTarget, Declaration};
pub use error::ResolveError;
pub use resolver::Resolver;

use crate::docs::{DocStore, Keywords};
use crate::syntax::Snapshot;

/// Resolve `declaration` against `snapshot`.
///
/// Reserved words are never variables. A failed resolution is logged and
/// reported as unknown.
pub fn find_declaration(
    snapshot: &Snapshot,
    store: &DocStore,
    keywords: &Keywords,
    declaration: &Declaration,
    limits: ResolveLimits,
) -> Option<String> {
    if keywords.contains(&declaration.name) {
        tracing::trace!(name = %declaration.name, "skipping reserved word");
        return None;
    }

    let resolver = Resolver::new(snapshot.chunk(), store).with_limits(limits);
    match resolver.resolve(declaration) {
        Ok(resolved) => resolved,
        Err(error) => {
            tracing::warn!(%error, name = %declaration.name, "resolution abandoned");
            None
        }
    }
}
