//! Exploration pipeline: index and graph from one value, then search,
//! pruning and highlighting driven by a query.
//!
//! The graph and the index are built independently over the same value; the
//! graph builder never consults the index.

use std::time::Instant;

use serde::Serialize;
use serde_json::Value;

use crate::config::JsonScopeConfig;
use crate::graph::{build_graph_with, build_index_with, highlight, prune_graph, search};
use crate::graph::{MatchSet, PathIndex};
use crate::observability::BuildStats;
use crate::types::Graph;

/// Everything a renderer needs for one document and query.
#[derive(Debug, Clone, Serialize)]
pub struct Exploration {
    pub graph: Graph,
    pub index: PathIndex,
    pub matches: MatchSet,
    pub stats: BuildStats,
}

/// Build index and graph for `value`, then apply `query`.
///
/// A blank query means no search is active: the graph comes back whole and
/// un-highlighted. Otherwise the graph is pruned and/or highlighted according
/// to `config.search`.
pub fn explore(value: &Value, query: &str, config: &JsonScopeConfig) -> Exploration {
    let started = Instant::now();

    let index = build_index_with(value, config.index.preview_max_len);
    let mut graph = build_graph_with(value, &config.graph_config());
    let structural_nodes = graph.nodes.iter().filter(|n| !n.value_node).count();

    let active = !query.trim().is_empty();
    let matches = search(&index, query);
    if active && config.search.prune_to_matches {
        graph = prune_graph(&graph, &matches);
    }
    if active && config.search.highlight {
        graph.nodes = highlight(&graph.nodes, &matches);
    }

    let stats = BuildStats {
        graph_nodes: graph.nodes.len(),
        graph_edges: graph.edges.len(),
        index_entries: index.len(),
        matches: matches.len(),
        truncated: graph.truncated,
        duration_ms: 0,
    }
    .with_duration(started.elapsed());

    tracing::debug!(
        nodes = stats.graph_nodes,
        entries = stats.index_entries,
        matches = stats.matches,
        coverage = stats.coverage(structural_nodes),
        "exploration built"
    );
    if graph.truncated {
        tracing::info!(
            max_nodes = config.graph_config().max_nodes,
            "graph truncated to the node budget"
        );
    }

    Exploration {
        graph,
        index,
        matches,
        stats,
    }
}
