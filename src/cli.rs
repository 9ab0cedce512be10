//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// levelgraph - level-ordered DAG evaluation
#[derive(Parser, Debug)]
#[command(name = "levelgraph")]
#[command(version)]
#[command(about = "Evaluate a graph description into longest-path levels and walk it")]
#[command(
    long_about = "levelgraph reads a graph description (TOML, or JSON by extension), rejects cycles, assigns every node its longest-path level, and prints levels, traversal orders, a graphviz description or a plain dump."
)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every level and the nodes on it
    Levels {
        /// Graph description file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print node names in the order a traversal visits them
    Run {
        /// Graph description file
        file: PathBuf,

        /// Traversal strategy
        #[arg(short, long, value_enum, default_value_t = Strategy::Compile)]
        strategy: Strategy,

        /// Start node (required for set and reverse)
        #[arg(long)]
        from: Option<String>,
    },

    /// Print a graphviz digraph with the file's style rules applied
    Dot {
        /// Graph description file
        file: PathBuf,
    },

    /// Print node names and edges as JSON
    Dump {
        /// Graph description file
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Level order, every node once
    Compile,
    /// Depth-first through children
    Set,
    /// Depth-first through parents
    Reverse,
}
