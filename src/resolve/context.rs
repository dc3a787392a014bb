//! Per-query bookkeeping.

use rustc_hash::FxHashSet;

use super::declaration::Declaration;
use super::error::ResolveError;
use crate::base::Position;
use crate::base::constants::DEFAULT_MAX_RESOLVE_DEPTH;

/// Bounds applied to every query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveLimits {
    /// Maximum number of nested resolutions in flight
    pub max_depth: usize,
}

impl Default for ResolveLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_RESOLVE_DEPTH,
        }
    }
}

/// A declaration together with the position it is looked up from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ActiveQuery {
    declaration: Declaration,
    cutoff: Position,
}

/// State of one top-level query, threaded through every nested resolution.
///
/// Only the resolutions currently on the stack are tracked, so a symbol that
/// is resolved twice in sequence is fine while one that depends on itself is
/// reported as a cycle.
#[derive(Debug)]
pub struct QueryContext {
    limits: ResolveLimits,
    active: FxHashSet<ActiveQuery>,
    stack: Vec<ActiveQuery>,
}

impl QueryContext {
    pub fn new(limits: ResolveLimits) -> Self {
        Self {
            limits,
            active: FxHashSet::default(),
            stack: Vec::new(),
        }
    }

    /// Number of resolutions in flight
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(super) fn enter(
        &mut self,
        declaration: &Declaration,
        cutoff: Position,
    ) -> Result<(), ResolveError> {
        if self.stack.len() >= self.limits.max_depth {
            return Err(ResolveError::depth_exceeded(
                &declaration.name,
                self.limits.max_depth,
            ));
        }
        let query = ActiveQuery {
            declaration: declaration.clone(),
            cutoff,
        };
        if !self.active.insert(query.clone()) {
            return Err(ResolveError::cycle(&declaration.name, declaration.line));
        }
        self.stack.push(query);
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        if let Some(query) = self.stack.pop() {
            self.active.remove(&query);
        }
    }
}
