//! Resolution queries.

/// "What was `name` bound to as of `line`?"
///
/// Optionally narrowed to one slot of a table literal the name was assigned
/// from: `tab.foo.bar` is `name = "tab"`, `table_key = "bar"`, depth 2;
/// `tab[1][2]` is `table_index = 2`, depth 2.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub name: String,
    /// 0-indexed editor line; statements starting on this line are visible
    pub line: usize,
    pub table_key: Option<String>,
    /// 1-based positional slot
    pub table_index: Option<usize>,
    pub table_depth_level: Option<usize>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            table_key: None,
            table_index: None,
            table_depth_level: None,
        }
    }

    pub fn with_table_key(mut self, key: impl Into<String>) -> Self {
        self.table_key = Some(key.into());
        self
    }

    pub fn with_table_index(mut self, index: usize) -> Self {
        self.table_index = Some(index);
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.table_depth_level = Some(depth);
        self
    }

    /// Requested table depth; unset and zero both mean the outermost table
    pub fn requested_depth(&self) -> usize {
        match self.table_depth_level {
            Some(depth) if depth > 0 => depth,
            _ => 1,
        }
    }

    /// Whether the query looks inside a table literal
    pub fn is_table_query(&self) -> bool {
        self.table_key.is_some() || self.table_index.is_some()
    }
}

/// A member called on a module: `hs.application` + `mainWindow`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallTarget {
    /// Module path of the receiver
    pub base: String,
    /// Name of the called member
    pub identifier: String,
}
