//! Graph layer: bounded graph builder, exhaustive path index, search and
//! pruning.

pub mod builder;
pub mod index;
pub mod prune;
pub mod search;

pub use builder::{build_graph, build_graph_with};
pub use index::{build_index, build_index_with, PathIndex};
pub use prune::{highlight, prune, prune_graph};
pub use search::{retain_kind, search, MatchSet};
