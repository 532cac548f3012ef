//! Structured logging and build statistics.
//!
//! This module provides:
//! - [`init_logging`]: One-time structured logging setup with `RUST_LOG` support
//! - [`BuildStats`]: Sizes and timing of one exploration build

use std::time::Duration;

use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// Defaults to `jsonscope=info` when `RUST_LOG` is not set. Logs go to
/// stderr so JSON written to stdout stays clean. Call once at program
/// startup; subsequent calls are silently ignored.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jsonscope=info"));

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Sizes and timing of one exploration build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildStats {
    pub graph_nodes: usize,
    pub graph_edges: usize,
    pub index_entries: usize,
    pub matches: usize,
    pub truncated: bool,
    pub duration_ms: u64,
}

impl BuildStats {
    pub fn with_duration(mut self, elapsed: Duration) -> Self {
        self.duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Share of indexed locations that made it into the graph as structural
    /// nodes. Value nodes are not counted; 1.0 for an empty index.
    pub fn coverage(&self, structural_nodes: usize) -> f64 {
        if self.index_entries == 0 {
            return 1.0;
        }
        structural_nodes as f64 / self.index_entries as f64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_does_not_panic() {
        init_logging();
        // Second call should also not panic (try_init ignores re-init).
        init_logging();
    }

    #[test]
    fn build_stats_serializes_flat() {
        let stats = BuildStats {
            graph_nodes: 8,
            graph_edges: 7,
            index_entries: 5,
            matches: 2,
            truncated: false,
            duration_ms: 0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["graph_nodes"], 8);
        assert_eq!(json["index_entries"], 5);
        assert_eq!(json["truncated"], false);
        assert_eq!(json["duration_ms"], 0);
    }

    #[test]
    fn with_duration_records_millis() {
        let stats = BuildStats::default().with_duration(Duration::from_millis(1_250));
        assert_eq!(stats.duration_ms, 1_250);
    }

    #[test]
    fn coverage_of_empty_index_is_full() {
        assert_eq!(BuildStats::default().coverage(0), 1.0);
    }

    #[test]
    fn coverage_ratio() {
        let stats = BuildStats {
            index_entries: 10,
            ..BuildStats::default()
        };
        assert!((stats.coverage(4) - 0.4).abs() < f64::EPSILON);
    }
}
