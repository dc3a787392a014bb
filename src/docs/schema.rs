//! Schema of the per-module declaration documents.
//!
//! Each document maps member names to entries like:
//!
//! ```json
//! {
//!   "mainWindow": {
//!     "type": "Method",
//!     "doc": "Returns the main window of the given app, or nil",
//!     "def": "hs.application:mainWindow() -> hs.window object or nil",
//!     "parameters": []
//!   }
//! }
//! ```

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;

use super::error::DocsError;

/// Kind of a module member, as written in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum MemberKind {
    Variable,
    Function,
    Method,
    Module,
    Field,
    Constant,
    Constructor,
    /// Any kind this crate does not know about (`Deprecated`, `Command`, ...)
    #[serde(other)]
    Other,
}

impl MemberKind {
    pub fn is_method(self) -> bool {
        self == Self::Method
    }
}

/// One member of a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    pub kind: MemberKind,
    pub doc: String,
    /// Signature text, e.g. `hs.window:setSize(size) -> hs.window object`
    pub def: String,
    /// Raw parameter lines of the form `* name - description`
    pub parameters: Vec<String>,
}

/// On-disk shape; `type` is optional here so a single bad entry can be skipped
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    kind: Option<MemberKind>,
    #[serde(default)]
    doc: String,
    #[serde(default)]
    def: String,
    #[serde(default)]
    parameters: Vec<String>,
}

/// All members of one module, in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleSchema {
    path: String,
    members: IndexMap<String, MemberEntry>,
}

impl ModuleSchema {
    /// Parse the JSON document for the module at `path`.
    ///
    /// Entries without a `type` or with an unexpected shape are skipped.
    pub fn from_json(path: &str, json: &str) -> Result<Self, DocsError> {
        let raw: IndexMap<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| DocsError::json(path, e))?;

        let mut members = IndexMap::with_capacity(raw.len());
        for (name, value) in raw {
            match serde_json::from_value::<RawEntry>(value) {
                Ok(RawEntry {
                    kind: Some(kind),
                    doc,
                    def,
                    parameters,
                }) => {
                    members.insert(
                        name,
                        MemberEntry {
                            kind,
                            doc,
                            def,
                            parameters,
                        },
                    );
                }
                Ok(_) => {
                    tracing::warn!(module = path, member = %name, "skipping member without a type");
                }
                Err(error) => {
                    tracing::warn!(module = path, member = %name, %error, "skipping malformed member");
                }
            }
        }

        Ok(Self {
            path: path.to_string(),
            members,
        })
    }

    /// Module path without a trailing separator
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self, member: &str) -> Option<&MemberEntry> {
        self.members.get(member)
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, &MemberEntry)> {
        self.members.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

static MODULE_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(hs(?:\.\w+)+).+\bobject\b").expect("module object pattern is valid")
});

/// Return type named by a signature definition.
///
/// Takes the text after the first `->`. When it names an `hs.*` path followed
/// by the word `object`, that path is returned; otherwise the trimmed text is
/// returned as is (`string or nil`). `None` when the definition has no arrow.
pub fn parse_return(def: &str) -> Option<String> {
    let (_, rhs) = def.split_once("->")?;
    match MODULE_OBJECT.captures(rhs) {
        Some(captures) => Some(captures[1].to_string()),
        None => Some(rhs.trim().to_string()),
    }
}
