//! # levelgraph
//!
//! Loads a graph description, evaluates it, and prints the requested view.
//!
//! ## Logging
//!
//! Logs go to stderr through `tracing`. `RUST_LOG` takes precedence; without
//! it the filter is `warn`, or `debug` with `--verbose`.

#![forbid(unsafe_code)]
#![forbid(clippy::unwrap_used)]
#![forbid(clippy::panic)]
#![deny(clippy::expect_used)]

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use levelgraph::cli::Cli;
use levelgraph::commands::execute_command;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    debug!(command = ?cli.command, "dispatching");
    let output = execute_command(&cli.command)?;
    println!("{output}");
    Ok(())
}

/// Initialize tracing subscriber with environment filter.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
