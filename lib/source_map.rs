//! Nested source map index keyed by dot-delimited paths.

use indexmap::IndexMap;
use serde::Serialize;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Tree of source map paths.
///
/// `insert("device.ionic", "ionic.map")` produces `{ "device": { "ionic": "ionic.map" } }`.
/// Keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SourceMapTree {
    entries: IndexMap<String, SourceMapNode>,
}

/// A node in the [`SourceMapTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SourceMapNode {
    /// Path of a source map file.
    Leaf(String),
    /// Nested keys.
    Branch(SourceMapTree),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl SourceMapTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` at the dot-delimited `key`.
    ///
    /// The last write at a key wins. Writing below an existing leaf replaces
    /// the leaf with a branch. Returns the node previously stored at `key`.
    ///
    /// Keys with an empty segment (`""`, `"a..b"`, `".a"`) are skipped with a
    /// warning.
    pub fn insert(&mut self, key: &str, path: impl Into<String>) -> Option<SourceMapNode> {
        let segments: Vec<&str> = key.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            let path = path.into();
            tracing::warn!(key, path = %path, "source map key has an empty segment, skipped");
            return None;
        }
        insert_at(&mut self.entries, &segments, path.into())
    }

    /// Look up the node stored at the dot-delimited `key`.
    pub fn get(&self, key: &str) -> Option<&SourceMapNode> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut node = self.entries.get(first)?;
        for segment in segments {
            match node {
                SourceMapNode::Branch(tree) => node = tree.entries.get(segment)?,
                SourceMapNode::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    /// Look up the path stored at the dot-delimited `key`, if it is a leaf.
    pub fn path(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            SourceMapNode::Leaf(path) => Some(path),
            SourceMapNode::Branch(_) => None,
        }
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn insert_at(
    entries: &mut IndexMap<String, SourceMapNode>,
    segments: &[&str],
    path: String,
) -> Option<SourceMapNode> {
    match segments {
        [] => None,
        [leaf] => entries.insert(leaf.to_string(), SourceMapNode::Leaf(path)),
        [head, rest @ ..] => {
            let node = entries
                .entry(head.to_string())
                .or_insert_with(|| SourceMapNode::Branch(SourceMapTree::default()));

            if let SourceMapNode::Leaf(replaced) = node {
                tracing::debug!(key = *head, replaced = %replaced, "source map leaf replaced by branch");
                *node = SourceMapNode::Branch(SourceMapTree::default());
            }

            match node {
                SourceMapNode::Branch(tree) => insert_at(&mut tree.entries, rest, path),
                SourceMapNode::Leaf(_) => None,
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
