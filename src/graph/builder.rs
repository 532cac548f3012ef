//! Graph builder: bounded breadth-first walk from a JSON value to nodes and
//! edges.
//!
//! The walk is budgeted two ways: `max_nodes` caps the number of emitted
//! nodes and `max_depth` cuts subtrees off silently. When the node budget
//! declines anything the result is flagged `truncated`. Node ids are paths,
//! so each location is emitted at most once (first seen wins).

use std::collections::{HashSet, VecDeque};

use serde_json::Value;

use crate::classify::{classify, preview};
use crate::config::schema::GraphConfig;
use crate::path::JsonPath;
use crate::types::{Emphasis, Graph, GraphEdge, GraphNode, NodeKind};

// ---------------------------------------------------------------------------
// Queue item
// ---------------------------------------------------------------------------

/// A location waiting to be emitted, with the id of the node that found it.
struct Pending<'a> {
    path: JsonPath,
    value: &'a Value,
    depth: usize,
    parent: Option<String>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build a graph with default label settings.
pub fn build_graph(value: &Value, max_nodes: usize, max_depth: usize) -> Graph {
    build_graph_with(
        value,
        &GraphConfig {
            max_nodes,
            max_depth,
            ..GraphConfig::default()
        },
    )
}

/// Build a graph with explicit configuration.
///
/// Nodes come out in breadth-first order with children in document order.
/// Every leaf within the depth limit gets one synthetic value node, emitted
/// right after the leaf itself. An edge is recorded when its child node is
/// emitted, so every edge connects two emitted nodes.
pub fn build_graph_with(value: &Value, config: &GraphConfig) -> Graph {
    let mut graph = Graph::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<Pending<'_>> = VecDeque::new();
    queue.push_back(Pending {
        path: JsonPath::root(),
        value,
        depth: 0,
        parent: None,
    });

    while let Some(item) = queue.pop_front() {
        if graph.nodes.len() >= config.max_nodes {
            graph.truncated = true;
            break;
        }

        let id = item.path.node_id().to_string();
        if !seen.insert(id.clone()) {
            continue;
        }

        let kind = classify(item.value);
        graph.nodes.push(structural_node(&item.path, item.value, kind));
        if let Some(parent) = item.parent {
            graph.edges.push(GraphEdge::new(parent, id.clone()));
        }

        if item.depth >= config.max_depth {
            continue;
        }

        match item.value {
            Value::Object(map) => {
                for (key, child) in map {
                    if !has_room(&graph, &queue, config.max_nodes) {
                        graph.truncated = true;
                        break;
                    }
                    queue.push_back(Pending {
                        path: item.path.child_key(key),
                        value: child,
                        depth: item.depth + 1,
                        parent: Some(id.clone()),
                    });
                }
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    if !has_room(&graph, &queue, config.max_nodes) {
                        graph.truncated = true;
                        break;
                    }
                    queue.push_back(Pending {
                        path: item.path.child_index(i),
                        value: child,
                        depth: item.depth + 1,
                        parent: Some(id.clone()),
                    });
                }
            }
            _ => {
                if graph.nodes.len() >= config.max_nodes {
                    graph.truncated = true;
                    continue;
                }
                let value_id = item.path.value_node_id();
                if seen.insert(value_id.clone()) {
                    graph
                        .nodes
                        .push(value_node(&item.path, item.value, kind, config));
                    graph.edges.push(GraphEdge::new(id, value_id));
                }
            }
        }
    }

    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        truncated = graph.truncated,
        "built graph"
    );
    graph
}

/// Every queued item emits at least one node, so once the queue covers the
/// remaining budget nothing enqueued later could ever be emitted. Declining
/// it up front keeps the queue at most `max_nodes` long on very wide inputs.
fn has_room(graph: &Graph, queue: &VecDeque<Pending<'_>>, max_nodes: usize) -> bool {
    graph.nodes.len() + queue.len() < max_nodes
}

// ---------------------------------------------------------------------------
// Node construction
// ---------------------------------------------------------------------------

fn structural_node(path: &JsonPath, value: &Value, kind: NodeKind) -> GraphNode {
    let name = path.label_segment();
    let label = match value {
        Value::Object(_) => format!("{name} {{}}"),
        Value::Array(items) => format!("{name} [{}]", items.len()),
        _ => name,
    };
    GraphNode {
        id: path.node_id().to_string(),
        label,
        kind,
        title: format!("{} ({})", path.node_id(), kind),
        value_node: false,
        style: kind.style(),
        emphasis: Emphasis::Normal,
    }
}

fn value_node(path: &JsonPath, value: &Value, kind: NodeKind, config: &GraphConfig) -> GraphNode {
    let label = if config.show_value_previews {
        preview(value, config.preview_max_len)
    } else {
        kind.as_str().to_string()
    };
    GraphNode {
        id: path.value_node_id(),
        label,
        kind,
        title: format!("{} ({} value)", path.node_id(), kind),
        value_node: true,
        style: kind.value_style(),
        emphasis: Emphasis::Normal,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
