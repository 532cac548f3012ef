use std::process::ExitCode;

use clap::Parser;
use jsonscope::cli::{self, Command};
use jsonscope::graph::{build_index_with, retain_kind, search};
use jsonscope::observability::init_logging;
use jsonscope::{explore, Result};

fn main() -> ExitCode {
    init_logging();
    let args = cli::Args::parse();

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Graph {
            input,
            config,
            query,
            prune,
            no_highlight,
        } => {
            let mut config = cli::load_config(&config)?;
            if prune {
                config.search.prune_to_matches = true;
            }
            if no_highlight {
                config.search.highlight = false;
            }
            let value = cli::read_input(input.as_deref())?;
            let out = explore(&value, query.as_deref().unwrap_or(""), &config);
            let body = serde_json::json!({
                "nodes": out.graph.nodes,
                "edges": out.graph.edges,
                "truncated": out.graph.truncated,
                "matches": out.matches,
                "stats": out.stats,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Command::Index {
            input,
            kind,
            config,
        } => {
            let config = cli::load_config(&config)?;
            let value = cli::read_input(input.as_deref())?;
            let index = build_index_with(&value, config.index.preview_max_len);
            let body = match kind {
                Some(kind) => {
                    serde_json::to_string_pretty(&index.of_kind(kind).collect::<Vec<_>>())?
                }
                None => serde_json::to_string_pretty(&index)?,
            };
            println!("{body}");
        }
        Command::Search {
            input,
            query,
            kind,
            config,
        } => {
            let config = cli::load_config(&config)?;
            let value = cli::read_input(Some(&input))?;
            let index = build_index_with(&value, config.index.preview_max_len);
            let mut matches = search(&index, &query);
            if let Some(kind) = kind {
                retain_kind(&index, &mut matches, kind);
            }
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
    }
    Ok(())
}
