//! Declaration store: cached, lazily loaded module schemas.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

use super::error::DocsError;
use super::schema::{MemberEntry, MemberKind, ModuleSchema, parse_return};
use crate::base::constants::{MODULE_SEPARATOR, SCHEMA_EXTENSION};

/// A member as listed for completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSummary {
    pub name: String,
    pub kind: MemberKind,
    pub doc: String,
}

/// Data needed to render a signature
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureInfo {
    pub doc: String,
    pub def: String,
    pub parameters: Vec<String>,
}

/// Where schema documents come from
#[derive(Debug)]
enum DocSource {
    /// `<module>.json` files in a directory
    Directory(PathBuf),
    /// JSON text keyed by normalized module path
    Memory(FxHashMap<String, String>),
}

/// Knowledge base of every `hs.*` module member.
///
/// A module is read and parsed the first time it is referenced and cached for
/// the lifetime of the store, including modules that turned out not to exist.
/// Concurrent first loads are serialized so each document is parsed once.
#[derive(Debug)]
pub struct DocStore {
    source: DocSource,
    cache: RwLock<FxHashMap<String, Option<Arc<ModuleSchema>>>>,
    load_lock: Mutex<()>,
}

impl DocStore {
    /// Open a directory of schema documents.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, DocsError> {
        let dir = dir.into();
        fs::read_dir(&dir).map_err(|e| DocsError::io(&dir, e))?;
        tracing::debug!(path = %dir.display(), "opened declaration store");
        Ok(Self::with_source(DocSource::Directory(dir)))
    }

    /// Build a store from in-memory `(module path, JSON)` documents.
    pub fn from_documents<I, K, V>(documents: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let documents = documents
            .into_iter()
            .map(|(path, json)| (normalize_module_path(path.as_ref()).to_string(), json.into()))
            .collect();
        Self::with_source(DocSource::Memory(documents))
    }

    fn with_source(source: DocSource) -> Self {
        Self {
            source,
            cache: RwLock::new(FxHashMap::default()),
            load_lock: Mutex::new(()),
        }
    }

    // =========================================================================
    // Module access
    // =========================================================================

    /// Every module path with a schema document, sorted
    pub fn list_modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = match &self.source {
            DocSource::Directory(dir) => match fs::read_dir(dir) {
                Ok(entries) => entries
                    .filter_map(Result::ok)
                    .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
                    .filter_map(|entry| {
                        let path = entry.path();
                        if path.extension()? != SCHEMA_EXTENSION {
                            return None;
                        }
                        path.file_stem()?.to_str().map(str::to_string)
                    })
                    .collect(),
                Err(error) => {
                    tracing::warn!(path = %dir.display(), %error, "failed to list modules");
                    Vec::new()
                }
            },
            DocSource::Memory(documents) => documents.keys().cloned().collect(),
        };
        modules.sort();
        modules
    }

    /// Schema of the module at `path` (trailing separator optional)
    pub fn module(&self, path: &str) -> Option<Arc<ModuleSchema>> {
        let key = normalize_module_path(path);
        if let Some(cached) = self.cache.read().get(key) {
            return cached.clone();
        }

        let _guard = self.load_lock.lock();
        // Another reader may have loaded it while we waited
        if let Some(cached) = self.cache.read().get(key) {
            return cached.clone();
        }

        let loaded = match self.load(key) {
            Ok(schema) => schema.map(Arc::new),
            Err(error) => {
                tracing::warn!(module = key, %error, "failed to load module schema");
                None
            }
        };
        self.cache.write().insert(key.to_string(), loaded.clone());
        loaded
    }

    fn load(&self, key: &str) -> Result<Option<ModuleSchema>, DocsError> {
        validate_module_path(key)?;
        let json = match &self.source {
            DocSource::Directory(dir) => {
                let file = dir.join(format!("{key}.{SCHEMA_EXTENSION}"));
                if !file.is_file() {
                    tracing::trace!(module = key, "no schema document");
                    return Ok(None);
                }
                fs::read_to_string(&file).map_err(|e| DocsError::io(&file, e))?
            }
            DocSource::Memory(documents) => match documents.get(key) {
                Some(json) => json.clone(),
                None => return Ok(None),
            },
        };
        tracing::debug!(module = key, "loading module schema");
        ModuleSchema::from_json(key, &json).map(Some)
    }

    /// A single member entry
    pub fn member(&self, module: &str, member: &str) -> Option<MemberEntry> {
        self.module(module)?.get(member).cloned()
    }

    // =========================================================================
    // Derived lookups
    // =========================================================================

    /// Members of `module` in document order: only methods when
    /// `methods_only`, every other kind otherwise
    pub fn lookup_members(&self, module: &str, methods_only: bool) -> Option<Vec<MemberSummary>> {
        let schema = self.module(module)?;
        let members = schema
            .members()
            .filter(|(_, entry)| entry.kind.is_method() == methods_only)
            .map(|(name, entry)| MemberSummary {
                name: name.to_string(),
                kind: entry.kind,
                doc: entry.doc.clone(),
            })
            .collect();
        Some(members)
    }

    /// Module path of the value produced by `module.member`.
    ///
    /// Constructors produce their own module. Anything else is read from the
    /// return type of its definition, which may be an opaque type such as
    /// `string or nil`.
    pub fn resolve_constructor(&self, module: &str, member: &str) -> Option<String> {
        let schema = self.module(module)?;
        let entry = schema.get(member)?;
        if entry.kind == MemberKind::Constructor {
            return Some(schema.path().to_string());
        }
        if entry.def.is_empty() {
            return None;
        }
        parse_return(&entry.def)
    }

    /// One-line documentation of a member
    pub fn documentation(&self, module: &str, member: &str) -> Option<String> {
        let entry = self.member(module, member)?;
        (!entry.doc.is_empty()).then_some(entry.doc)
    }

    /// Documentation, definition and parameter lines of a member
    pub fn signature_info(&self, module: &str, member: &str) -> Option<SignatureInfo> {
        let entry = self.member(module, member)?;
        Some(SignatureInfo {
            doc: entry.doc,
            def: entry.def,
            parameters: entry.parameters,
        })
    }
}

/// Strip trailing separators: `hs.application.` → `hs.application`
pub fn normalize_module_path(path: &str) -> &str {
    path.trim().trim_end_matches(MODULE_SEPARATOR)
}

fn validate_module_path(path: &str) -> Result<(), DocsError> {
    let valid = !path.is_empty()
        && path.split(MODULE_SEPARATOR).all(|segment| {
            !segment.is_empty() && segment.chars().all(|c| c.is_alphanumeric() || c == '_')
        });
    if valid {
        Ok(())
    } else {
        Err(DocsError::invalid_module_path(path))
    }
}
