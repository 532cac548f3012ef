//! Branch pruning and highlighting for search results.
//!
//! Pruning keeps the matches, every ancestor on the way up to the root, and
//! one level of children below each match. Highlighting is visual only: it
//! marks matches and their descendants as emphasized and dims the rest.

use std::collections::{HashMap, HashSet};

use crate::graph::search::MatchSet;
use crate::path::{ancestor_ids, ROOT_ID};
use crate::types::{Emphasis, Graph, GraphEdge, GraphNode};

/// Reduce nodes and edges to matches, their ancestors and their direct
/// children. Node and edge order is preserved.
///
/// Matches come from the exhaustive index, so ids the bounded graph never
/// emitted are ignored.
pub fn prune(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    matches: &MatchSet,
) -> (Vec<GraphNode>, Vec<GraphEdge>) {
    let mut parents: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        parents
            .entry(edge.to.as_str())
            .or_default()
            .push(edge.from.as_str());
        children
            .entry(edge.from.as_str())
            .or_default()
            .push(edge.to.as_str());
    }

    let mut keep: HashSet<&str> = HashSet::new();
    for m in matches {
        let m = m.as_str();
        keep.insert(m);

        // Walk up; the visited check stops on cyclic edge lists.
        let mut frontier: Vec<&str> = vec![m];
        while let Some(id) = frontier.pop() {
            for &parent in parents.get(id).into_iter().flatten() {
                if keep.insert(parent) {
                    frontier.push(parent);
                }
            }
        }

        keep.extend(children.get(m).into_iter().flatten().copied());
    }

    let emitted: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    keep.retain(|id| emitted.contains(id));

    let kept_nodes: Vec<GraphNode> = nodes
        .iter()
        .filter(|n| keep.contains(n.id.as_str()))
        .cloned()
        .collect();
    let kept_edges: Vec<GraphEdge> = edges
        .iter()
        .filter(|e| keep.contains(e.from.as_str()) && keep.contains(e.to.as_str()))
        .cloned()
        .collect();

    tracing::debug!(
        matches = matches.len(),
        nodes = kept_nodes.len(),
        edges = kept_edges.len(),
        "pruned graph"
    );
    (kept_nodes, kept_edges)
}

/// [`prune`] over a whole graph, carrying the `truncated` flag over.
pub fn prune_graph(graph: &Graph, matches: &MatchSet) -> Graph {
    let (nodes, edges) = prune(&graph.nodes, &graph.edges, matches);
    Graph {
        nodes,
        edges,
        truncated: graph.truncated,
    }
}

/// Copy of `nodes` with emphasis set: matches and their descendants are
/// emphasized, everything else dimmed. An empty match set means no search is
/// active and every node is left at [`Emphasis::Normal`].
pub fn highlight(nodes: &[GraphNode], matches: &MatchSet) -> Vec<GraphNode> {
    nodes
        .iter()
        .map(|node| {
            let emphasis = if matches.is_empty() {
                Emphasis::Normal
            } else if is_within_match(&node.id, matches) {
                Emphasis::Emphasized
            } else {
                Emphasis::Dimmed
            };
            GraphNode {
                emphasis,
                ..node.clone()
            }
        })
        .collect()
}

fn is_within_match(id: &str, matches: &MatchSet) -> bool {
    matches.contains(id)
        || matches.contains(ROOT_ID)
        || ancestor_ids(id).into_iter().any(|a| matches.contains(a))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::build_graph;
    use crate::types::NodeKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn set(ids: &[&str]) -> MatchSet {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: id.to_string(),
            kind: NodeKind::Object,
            title: id.to_string(),
            value_node: false,
            style: NodeKind::Object.style(),
            emphasis: Emphasis::Normal,
        }
    }

    fn sample() -> Graph {
        build_graph(
            &json!({
                "meta": {"source": "sample", "count": 2},
                "items": [{"id": 1, "tags": ["a", "b"]}, {"id": 2}],
            }),
            1_000,
            8,
        )
    }

    #[test]
    fn keeps_matches_ancestors_and_direct_children() {
        let graph = sample();
        let pruned = prune_graph(&graph, &set(&["items[0]"]));
        assert_eq!(
            pruned.node_ids(),
            vec!["root", "items", "items[0]", "items[0].id", "items[0].tags"]
        );
        assert_eq!(pruned.edges.len(), 4);
        assert!(pruned
            .edges
            .iter()
            .all(|e| pruned.contains(&e.from) && pruned.contains(&e.to)));
    }

    #[test]
    fn leaf_match_keeps_its_value_node() {
        let graph = sample();
        let pruned = prune_graph(&graph, &set(&["meta.count"]));
        assert_eq!(
            pruned.node_ids(),
            vec!["root", "meta", "meta.count", "meta.count#value"]
        );
    }

    #[test]
    fn ids_missing_from_graph_are_ignored() {
        let graph = build_graph(&json!({"a": {"b": {"c": 1}}}), 100, 1);
        let pruned = prune_graph(&graph, &set(&["a.b.c"]));
        assert!(pruned.nodes.is_empty());
        assert!(pruned.edges.is_empty());
    }

    #[test]
    fn empty_match_set_prunes_everything() {
        let pruned = prune_graph(&sample(), &MatchSet::new());
        assert!(pruned.nodes.is_empty());
    }

    #[test]
    fn carries_truncation_flag() {
        let graph = build_graph(&json!({"a": 1, "b": 2}), 2, 8);
        assert!(graph.truncated);
        assert!(prune_graph(&graph, &set(&["a"])).truncated);
    }

    #[test]
    fn multiple_parents_are_all_kept() {
        let nodes = vec![node("p1"), node("p2"), node("c"), node("x")];
        let edges = vec![
            GraphEdge::new("p1", "c"),
            GraphEdge::new("p2", "c"),
            GraphEdge::new("p1", "x"),
        ];
        let (kept, kept_edges) = prune(&nodes, &edges, &set(&["c"]));
        let ids: Vec<&str> = kept.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "c"]);
        assert_eq!(kept_edges.len(), 2);
    }

    #[test]
    fn cyclic_edges_terminate() {
        let nodes = vec![node("a"), node("b")];
        let edges = vec![GraphEdge::new("a", "b"), GraphEdge::new("b", "a")];
        let (kept, _) = prune(&nodes, &edges, &set(&["a"]));
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn highlight_emphasizes_matches_and_descendants() {
        let graph = sample();
        let nodes = highlight(&graph.nodes, &set(&["items[0]"]));
        let emphasis = |id: &str| nodes.iter().find(|n| n.id == id).unwrap().emphasis;

        assert_eq!(emphasis("items[0]"), Emphasis::Emphasized);
        assert_eq!(emphasis("items[0].tags[1]"), Emphasis::Emphasized);
        assert_eq!(emphasis("items[0].id#value"), Emphasis::Emphasized);
        assert_eq!(emphasis("items"), Emphasis::Dimmed);
        assert_eq!(emphasis("items[1]"), Emphasis::Dimmed);
        assert_eq!(emphasis("root"), Emphasis::Dimmed);
        assert_eq!(nodes.len(), graph.nodes.len());
    }

    #[test]
    fn highlight_field_descendants() {
        let graph = sample();
        let nodes = highlight(&graph.nodes, &set(&["meta"]));
        let emphasized: Vec<&str> = nodes
            .iter()
            .filter(|n| n.emphasis == Emphasis::Emphasized)
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(
            emphasized,
            vec![
                "meta",
                "meta.source",
                "meta.source#value",
                "meta.count",
                "meta.count#value"
            ]
        );
    }

    #[test]
    fn highlight_prefix_sibling_is_not_a_descendant() {
        let nodes = vec![node("item"), node("items"), node("item.x")];
        let out = highlight(&nodes, &set(&["item"]));
        let states: Vec<Emphasis> = out.iter().map(|n| n.emphasis).collect();
        assert_eq!(
            states,
            vec![Emphasis::Emphasized, Emphasis::Dimmed, Emphasis::Emphasized]
        );
    }

    #[test]
    fn root_match_emphasizes_everything() {
        let graph = sample();
        let nodes = highlight(&graph.nodes, &set(&["root"]));
        assert!(nodes.iter().all(|n| n.emphasis == Emphasis::Emphasized));
    }

    #[test]
    fn no_matches_leaves_nodes_normal() {
        let graph = sample();
        let nodes = highlight(&graph.nodes, &MatchSet::new());
        assert!(nodes.iter().all(|n| n.emphasis == Emphasis::Normal));
    }
}
