//! IDE features: high-level APIs for editor requests.
//!
//! Each adapter takes the text of the cursor line plus its position, matches
//! the text before the cursor against a small set of line patterns, and asks
//! the resolver and the declaration store for the rest.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No editor types**: Uses our own types, converted at the editor boundary
//!
//! ## Usage
//!
//! ```ignore
//! use hsls::ide::AnalysisHost;
//!
//! let host = AnalysisHost::new(store);
//! host.update_snapshot("local app = hs.application()\nlocal window = app:");
//!
//! let analysis = host.analysis();
//! let items = analysis.completions("local window = app:", 1, 19);
//! ```

/// Declare a lazily compiled line pattern.
macro_rules! line_pattern {
    ($name:ident, $re:literal) => {
        static $name: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
            regex::Regex::new($re).expect(concat!(stringify!($name), " pattern is valid"))
        });
    };
}

mod analysis;
mod completion;
mod hover;
mod signature_help;
pub mod text_utils;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{CompletionItem, CompletionKind, completions};
pub use hover::{HoverResult, hover};
pub use signature_help::{ParameterInfo, SignatureHelp, signature_help};
pub use text_utils::{table_depth_level, word_at};
