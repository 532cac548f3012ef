//! jsonscope: bounded graph views and searchable path indexes for arbitrary
//! JSON documents.
//!
//! Given a parsed JSON value, builds a deduplicated node/edge graph capped by
//! a node budget and a depth limit, an exhaustive path index for search, and
//! the pruning and highlighting used to focus the graph on search results.
//! Everything in the core is a pure, synchronous function of its inputs.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod explore;
pub mod graph;
pub mod observability;
pub mod path;
pub mod types;

pub use error::{JsonScopeError, Result};
pub use explore::{explore, Exploration};
