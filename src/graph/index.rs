//! Path index builder: an exhaustive path → (kind, preview) mapping.
//!
//! Unlike the graph builder this walk has no node or depth cap: the index is
//! the ground truth for search. Memory and time grow with the size of the
//! document, so hosts with untrusted input should guard the input size.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::classify::{classify, preview};
use crate::path::JsonPath;
use crate::types::{IndexEntry, NodeKind};

/// Default preview cap for index entries.
pub const DEFAULT_INDEX_PREVIEW_MAX_LEN: usize = 200;

// ---------------------------------------------------------------------------
// PathIndex
// ---------------------------------------------------------------------------

/// Every reachable location of a document, in depth-first pre-order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PathIndex {
    entries: Vec<IndexEntry>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl PathIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a node id (`root` for the root).
    pub fn get(&self, path: &str) -> Option<&IndexEntry> {
        self.positions.get(path).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.positions.contains_key(path)
    }

    /// Entries in traversal order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    /// Entries of one kind, in traversal order.
    pub fn of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    fn insert(&mut self, entry: IndexEntry) {
        if self.positions.contains_key(&entry.path) {
            return;
        }
        self.positions.insert(entry.path.clone(), self.entries.len());
        self.entries.push(entry);
    }
}

impl<'a> IntoIterator for &'a PathIndex {
    type Item = &'a IndexEntry;
    type IntoIter = std::slice::Iter<'a, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build the index with the default preview cap.
pub fn build_index(value: &Value) -> PathIndex {
    build_index_with(value, DEFAULT_INDEX_PREVIEW_MAX_LEN)
}

/// Build the index, truncating string previews to `preview_max_len` chars.
///
/// Walks with an explicit stack so deep documents cannot overflow the call
/// stack. Children are pushed in reverse so entries come out in the same
/// order a recursive pre-order walk would produce.
pub fn build_index_with(value: &Value, preview_max_len: usize) -> PathIndex {
    let mut index = PathIndex::default();
    let mut stack: Vec<(JsonPath, &Value)> = vec![(JsonPath::root(), value)];

    while let Some((path, value)) = stack.pop() {
        index.insert(IndexEntry {
            path: path.node_id().to_string(),
            kind: classify(value),
            preview: preview(value, preview_max_len),
        });

        match value {
            Value::Object(map) => {
                for (key, child) in map.iter().rev() {
                    stack.push((path.child_key(key), child));
                }
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate().rev() {
                    stack.push((path.child_index(i), child));
                }
            }
            _ => {}
        }
    }

    tracing::debug!(entries = index.len(), "built path index");
    index
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn paths(index: &PathIndex) -> Vec<&str> {
        index.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn indexes_every_location_in_preorder() {
        let index = build_index(&json!({"a": 1, "b": [2, 3]}));
        assert_eq!(paths(&index), vec!["root", "a", "b", "b[0]", "b[1]"]);
        assert_eq!(index.get("root").unwrap().kind, NodeKind::Object);
        assert_eq!(index.get("b").unwrap().preview, "[2]");
        assert_eq!(index.get("b[0]").unwrap().preview, "2");
    }

    #[test]
    fn preserves_object_insertion_order() {
        let value: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let index = build_index(&value);
        assert_eq!(paths(&index), vec!["root", "zeta", "alpha", "mid"]);
    }

    #[test]
    fn depth_first_visits_subtree_before_sibling() {
        let index = build_index(&json!({"a": {"x": {"y": 1}}, "b": 2}));
        assert_eq!(paths(&index), vec!["root", "a", "a.x", "a.x.y", "b"]);
    }

    #[test]
    fn scalar_document_has_single_root_entry() {
        let index = build_index(&json!("hello"));
        assert_eq!(index.len(), 1);
        let root = index.get("root").unwrap();
        assert_eq!(root.kind, NodeKind::String);
        assert_eq!(root.preview, "hello");
    }

    #[test]
    fn root_level_array_paths() {
        let index = build_index(&json!([[1], {"k": null}]));
        assert_eq!(paths(&index), vec!["root", "[0]", "[0][0]", "[1]", "[1].k"]);
        assert_eq!(index.get("[1].k").unwrap().kind, NodeKind::Null);
    }

    #[test]
    fn has_no_depth_cap() {
        let mut value = json!(0);
        for _ in 0..1_000 {
            value = json!([value]);
        }
        let index = build_index(&value);
        assert_eq!(index.len(), 1_001);
    }

    #[test]
    fn preview_cap_applies_to_strings() {
        let long = "y".repeat(500);
        let index = build_index(&json!({ "s": long }));
        assert_eq!(
            index.get("s").unwrap().preview.chars().count(),
            DEFAULT_INDEX_PREVIEW_MAX_LEN
        );
        let short = build_index_with(&json!({ "s": "abcdef" }), 4);
        assert_eq!(short.get("s").unwrap().preview, "abc…");
    }

    #[test]
    fn top_level_root_key_does_not_shadow_root() {
        let index = build_index(&json!({"root": 1}));
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("root").unwrap().kind, NodeKind::Object);
        assert_eq!(index.get(r#"["root"]"#).unwrap().kind, NodeKind::Number);
    }

    #[test]
    fn of_kind_filters_in_traversal_order() {
        let index = build_index(&json!({"a": "x", "b": [1, "y"], "c": {"d": "z"}}));
        let strings: Vec<&str> = index
            .of_kind(NodeKind::String)
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(strings, vec!["a", "b[1]", "c.d"]);
        assert_eq!(index.of_kind(NodeKind::Null).count(), 0);
    }

    #[test]
    fn serializes_as_entry_list() {
        let index = build_index(&json!([true]));
        let json = serde_json::to_value(&index).unwrap();
        assert_eq!(
            json,
            json!([
                {"path": "root", "kind": "array", "preview": "[1]"},
                {"path": "[0]", "kind": "boolean", "preview": "true"},
            ])
        );
    }
}
