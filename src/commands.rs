//! CLI command handlers.
//!
//! Every handler loads a manifest, builds and evaluates the graph, and
//! renders its answer into a `String`; `main` owns the printing.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::Path;

use anyhow::{Context, Result, bail};
use itertools::Itertools;
use levelgraph_core::{Graph, GraphError, export};
use serde_json::json;
use tracing::info;

use crate::cli::{Commands, OutputFormat, Strategy};
use crate::manifest::Manifest;

/// Execute a CLI command and return what should be printed.
///
/// # Errors
///
/// Returns any manifest, evaluation or traversal failure with context.
pub fn execute_command(command: &Commands) -> Result<String> {
    match command {
        Commands::Levels { file, format } => cmd_levels(file, *format),
        Commands::Run {
            file,
            strategy,
            from,
        } => cmd_run(file, *strategy, from.as_deref()),
        Commands::Dot { file } => cmd_dot(file),
        Commands::Dump { file } => cmd_dump(file),
    }
}

fn load(file: &Path) -> Result<Manifest> {
    Manifest::load(file).with_context(|| format!("cannot load {}", file.display()))
}

fn load_evaluated(file: &Path) -> Result<Graph> {
    let mut graph = load(file)?
        .build()
        .with_context(|| format!("invalid graph in {}", file.display()))?;
    graph
        .evaluate()
        .with_context(|| format!("cannot evaluate {}", file.display()))?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph evaluated"
    );
    Ok(graph)
}

fn cmd_levels(file: &Path, format: OutputFormat) -> Result<String> {
    let graph = load_evaluated(file)?;
    let levels = graph.levels()?;

    let rendered = match format {
        OutputFormat::Text => levels
            .iter()
            .enumerate()
            .map(|(level, names)| format!("{level}: {}", names.iter().join(", ")))
            .join("\n"),
        OutputFormat::Json => {
            let value = json!({
                "levels": levels,
                "start_nodes": graph.start_nodes()?,
            });
            serde_json::to_string_pretty(&value)?
        }
    };
    Ok(rendered)
}

fn cmd_run(file: &Path, strategy: Strategy, from: Option<&str>) -> Result<String> {
    let graph = load_evaluated(file)?;
    let mut order = Vec::new();
    let mut record = |name: &str| {
        order.push(name.to_string());
        Ok::<(), GraphError>(())
    };

    match (strategy, from) {
        (Strategy::Compile, None) => graph.compile_run(&mut record)?,
        (Strategy::Compile, Some(start)) => {
            bail!("the compile strategy walks every node and takes no start node, got --from {start}")
        }
        (Strategy::Set, Some(start)) => graph.set_run(start, &mut record)?,
        (Strategy::Reverse, Some(start)) => graph.reverse_run(start, &mut record)?,
        (Strategy::Set | Strategy::Reverse, None) => {
            bail!("the {strategy:?} strategy needs a start node: pass --from <NAME>")
        }
    }

    Ok(order.join("\n"))
}

fn cmd_dot(file: &Path) -> Result<String> {
    let manifest = load(file)?;
    let styles = manifest.style_rules()?;
    let graph = manifest
        .build()
        .with_context(|| format!("invalid graph in {}", file.display()))?;
    Ok(export::dot(&graph, &styles))
}

fn cmd_dump(file: &Path) -> Result<String> {
    let graph = load(file)?
        .build()
        .with_context(|| format!("invalid graph in {}", file.display()))?;
    Ok(serde_json::to_string_pretty(&export::dump(&graph))?)
}
