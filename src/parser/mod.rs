//! Lua 5.3 parser
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → typed AST (Chunk / Statement / Expression), each node with a Span
//! ```
//!
//! The parser is fail-fast and returns the first [`SyntaxError`] it meets.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod error;
mod lexer;
mod syntax_kind;

pub use ast::*;
pub use error::SyntaxError;
pub use lexer::{Lexer, Token, tokenize};
pub use parser::parse;
pub use syntax_kind::SyntaxKind;
