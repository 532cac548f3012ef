//! Search over the path index.
//!
//! Matching is a plain case-insensitive substring test against both the
//! path and the preview of each entry. There is no ranking: the result is the
//! set of matching node ids, which feeds pruning and highlighting.

use std::collections::BTreeSet;

use crate::graph::index::PathIndex;
use crate::types::NodeKind;

/// Node ids of matching index entries, in sorted order.
pub type MatchSet = BTreeSet<String>;

/// Find every index entry whose path or preview contains `query`,
/// ignoring case. A blank query matches nothing.
pub fn search(index: &PathIndex, query: &str) -> MatchSet {
    if query.trim().is_empty() {
        return MatchSet::new();
    }

    let needle = query.to_lowercase();
    let matches: MatchSet = index
        .iter()
        .filter(|entry| {
            entry.path.to_lowercase().contains(&needle)
                || entry.preview.to_lowercase().contains(&needle)
        })
        .map(|entry| entry.path.clone())
        .collect();

    tracing::trace!(query, matches = matches.len(), "searched path index");
    matches
}

/// Drop matches whose index entry is not of `kind`.
pub fn retain_kind(index: &PathIndex, matches: &mut MatchSet, kind: NodeKind) {
    matches.retain(|id| index.get(id).is_some_and(|entry| entry.kind == kind));
}
