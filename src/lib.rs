#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # levelgraph
//!
//! Command-line front end for `levelgraph-core`: graph description files,
//! the `levelgraph` binary's commands, and a re-export of the engine.

pub use levelgraph_core;

pub mod cli;
pub mod commands;
pub mod manifest;
