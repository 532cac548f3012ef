//! Configuration data structures for jsonscope.
//!
//! A config names a preset and optionally overrides individual graph limits.
//! Loaded from YAML or JSON text, then adjusted by environment variables and
//! CLI flags, in that order.

use serde::{Deserialize, Serialize};

use super::preset::get_preset;
use crate::error::{JsonScopeError, Result};
use crate::graph::index::DEFAULT_INDEX_PREVIEW_MAX_LEN;

/// Environment variable overriding `graph.max_nodes`.
pub const ENV_MAX_NODES: &str = "JSONSCOPE_MAX_NODES";

/// Environment variable overriding `graph.max_depth`.
pub const ENV_MAX_DEPTH: &str = "JSONSCOPE_MAX_DEPTH";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonScopeConfig {
    /// Config format version (currently "1.0").
    #[serde(default = "default_version")]
    pub version: String,

    /// Preset supplying the base graph limits.
    #[serde(default)]
    pub preset: PresetName,

    /// Per-field overrides on top of the preset.
    #[serde(default)]
    pub graph: GraphOverrides,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for JsonScopeConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            preset: PresetName::default(),
            graph: GraphOverrides::default(),
            index: IndexConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl JsonScopeConfig {
    /// Parse from YAML text. Missing fields take their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from JSON text. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Effective graph limits: the preset's values with overrides applied.
    pub fn graph_config(&self) -> GraphConfig {
        let base = get_preset(&self.preset).graph;
        GraphConfig {
            max_nodes: self.graph.max_nodes.unwrap_or(base.max_nodes),
            max_depth: self.graph.max_depth.unwrap_or(base.max_depth),
            preview_max_len: self.graph.preview_max_len.unwrap_or(base.preview_max_len),
            show_value_previews: self
                .graph
                .show_value_previews
                .unwrap_or(base.show_value_previews),
        }
    }

    /// Reject values that would make the output useless.
    pub fn validate(&self) -> Result<()> {
        let graph = self.graph_config();
        if graph.max_nodes == 0 {
            return Err(JsonScopeError::Config("graph.max_nodes must be > 0".into()));
        }
        if graph.preview_max_len == 0 {
            return Err(JsonScopeError::Config(
                "graph.preview_max_len must be > 0".into(),
            ));
        }
        if self.index.preview_max_len == 0 {
            return Err(JsonScopeError::Config(
                "index.preview_max_len must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Apply `JSONSCOPE_MAX_NODES` / `JSONSCOPE_MAX_DEPTH` from the process
    /// environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_MAX_NODES) {
            self.graph.max_nodes = Some(parse_limit(ENV_MAX_NODES, &raw)?);
        }
        if let Some(raw) = lookup(ENV_MAX_DEPTH) {
            self.graph.max_depth = Some(parse_limit(ENV_MAX_DEPTH, &raw)?);
        }
        self.validate()
    }
}

fn parse_limit(name: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| JsonScopeError::Config(format!("{name} must be a non-negative integer, got {raw:?}")))
}

// ---------------------------------------------------------------------------
// PresetName
// ---------------------------------------------------------------------------

/// Named bundles of graph limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    /// Small, shallow graphs for quick looks.
    Compact,
    /// Defaults suited to most documents.
    #[default]
    Balanced,
    /// Large, deep graphs for thorough exploration.
    Full,
}

impl PresetName {
    /// Parse from a loose string (case-insensitive, surrounding space ignored).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "small" => Some(Self::Compact),
            "balanced" | "default" => Some(Self::Balanced),
            "full" | "large" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Balanced => "balanced",
            Self::Full => "full",
        }
    }
}

impl std::fmt::Display for PresetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GraphConfig / GraphOverrides
// ---------------------------------------------------------------------------

/// Resolved limits and label settings for one graph build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Node budget; reaching it marks the graph truncated.
    pub max_nodes: usize,
    /// Depth cutoff; nothing below it is emitted.
    pub max_depth: usize,
    /// Character cap for value previews in labels.
    pub preview_max_len: usize,
    /// Show value previews in value-node labels instead of kind names.
    pub show_value_previews: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        get_preset(&PresetName::Balanced).graph
    }
}

/// Optional per-field overrides of the preset's [`GraphConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_max_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_value_previews: Option<bool>,
}

// ---------------------------------------------------------------------------
// IndexConfig / SearchConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Character cap for index previews.
    #[serde(default = "default_index_preview_max_len")]
    pub preview_max_len: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            preview_max_len: default_index_preview_max_len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Reduce the graph to matches, ancestors and direct children.
    #[serde(default)]
    pub prune_to_matches: bool,

    /// Emphasize matches and dim the rest.
    #[serde(default = "default_true")]
    pub highlight: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            prune_to_matches: false,
            highlight: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_version() -> String {
    "1.0".to_string()
}

fn default_index_preview_max_len() -> usize {
    DEFAULT_INDEX_PREVIEW_MAX_LEN
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
