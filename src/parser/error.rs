//! Syntax error type

use thiserror::Error;

use crate::base::Position;

/// A syntax error with location and message.
///
/// The parser is fail-fast: the first error aborts the parse, the same way
/// the Lua reference compiler reports only the first problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}:{}: {message}", .position.line + 1, .position.column + 1)]
pub struct SyntaxError {
    pub message: String,
    pub position: Position,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}
