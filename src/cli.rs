//! Command-line surface for the `jsonscope` binary.
//!
//! The binary is a thin host around the library: it reads and parses JSON
//! text, resolves configuration (file, then environment, then flags) and
//! prints results as JSON on stdout.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use serde_json::Value;

use crate::config::{JsonScopeConfig, PresetName};
use crate::error::Result;
use crate::types::NodeKind;

#[derive(Parser)]
#[command(
    name = "jsonscope",
    version,
    about = "Explore JSON documents as bounded graphs",
    after_help = r#"Examples:
  jsonscope graph data.json --max-nodes 500
  jsonscope graph data.json --query vitamin --prune
  cat data.json | jsonscope index
  jsonscope search data.json magnesium
  jsonscope index data.json --kind string
"#
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the bounded graph, optionally focused on a query.
    Graph {
        /// JSON file to read; stdin when omitted or `-`.
        input: Option<PathBuf>,
        #[command(flatten)]
        config: ConfigArgs,
        /// Search query used for highlighting and pruning.
        #[arg(long, short)]
        query: Option<String>,
        /// Keep only matches, their ancestors and direct children.
        #[arg(long)]
        prune: bool,
        /// Leave emphasis untouched even when a query is given.
        #[arg(long)]
        no_highlight: bool,
    },
    /// Print the exhaustive path index.
    Index {
        /// JSON file to read; stdin when omitted or `-`.
        input: Option<PathBuf>,
        /// Only list entries of this kind.
        #[arg(long, value_parser = parse_kind)]
        kind: Option<NodeKind>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the ids of index entries matching a query.
    Search {
        /// JSON file to read; `-` for stdin.
        input: PathBuf,
        /// Case-insensitive substring to look for in paths and previews.
        query: String,
        /// Only report matches of this kind.
        #[arg(long, value_parser = parse_kind)]
        kind: Option<NodeKind>,
        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Flags shared by every subcommand.
#[derive(ClapArgs, Debug, Default)]
pub struct ConfigArgs {
    /// YAML or JSON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Preset: compact, balanced or full.
    #[arg(long, value_parser = parse_preset)]
    pub preset: Option<PresetName>,
    /// Node budget for the graph.
    #[arg(long)]
    pub max_nodes: Option<usize>,
    /// Depth cutoff for the graph.
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Character cap for value previews in graph labels.
    #[arg(long)]
    pub preview_max_len: Option<usize>,
    /// Label value nodes with their kind instead of a preview.
    #[arg(long)]
    pub hide_values: bool,
}

fn parse_preset(s: &str) -> std::result::Result<PresetName, String> {
    PresetName::from_str_loose(s)
        .ok_or_else(|| format!("unknown preset {s:?} (expected compact, balanced or full)"))
}

fn parse_kind(s: &str) -> std::result::Result<NodeKind, String> {
    NodeKind::from_str_loose(s).ok_or_else(|| {
        format!("unknown kind {s:?} (expected object, array, string, number, boolean or null)")
    })
}

/// Resolve configuration: config file, then environment, then flags.
pub fn load_config(args: &ConfigArgs) -> Result<JsonScopeConfig> {
    let mut config = match &args.config {
        Some(path) => parse_config_file(path)?,
        None => JsonScopeConfig::default(),
    };
    config.apply_env_overrides()?;

    if let Some(preset) = args.preset {
        config.preset = preset;
    }
    if let Some(n) = args.max_nodes {
        config.graph.max_nodes = Some(n);
    }
    if let Some(d) = args.max_depth {
        config.graph.max_depth = Some(d);
    }
    if let Some(len) = args.preview_max_len {
        config.graph.preview_max_len = Some(len);
    }
    if args.hide_values {
        config.graph.show_value_previews = Some(false);
    }
    config.validate()?;

    tracing::debug!(preset = %config.preset, graph = ?config.graph_config(), "resolved config");
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<JsonScopeConfig> {
    let text = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => JsonScopeConfig::from_json_str(&text),
        _ => JsonScopeConfig::from_yaml_str(&text),
    }
}

/// Read and parse a JSON document from a file, or stdin for `None` / `-`.
pub fn read_input(input: Option<&Path>) -> Result<Value> {
    let text = match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_document(&text)
}

/// Parse JSON text into a value.
pub fn parse_document(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}
