//! # levelgraph-core
//!
//! A directed acyclic graph engine over named nodes. It keeps a dense
//! adjacency matrix, derives a longest-path **level** for every node, rejects
//! cycles, and runs three traversal strategies over the result:
//!
//! - [`Graph::compile_run`]: bulk scan in level order.
//! - [`Graph::set_run`]: depth-first from a node through its children.
//! - [`Graph::reverse_run`]: depth-first from a node through its parents.
//!
//! Levels are derived on demand by [`Graph::evaluate`]; every structural
//! mutation makes the derived state stale until the next evaluation.
//!
//! ```
//! use levelgraph_core::{Graph, GraphError};
//!
//! let mut graph = Graph::new();
//! for name in ["a", "b", "c"] {
//!     graph.add(name)?;
//! }
//! graph.link("a", "b")?;
//! graph.link("b", "c")?;
//! graph.evaluate()?;
//!
//! let mut seen = String::new();
//! graph.set_run("a", |name| {
//!     seen.push_str(name);
//!     Ok::<(), GraphError>(())
//! })?;
//! assert_eq!(seen, "abc");
//! # Ok::<(), GraphError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod result;

pub use config::{DEFAULT_MAX_WALK_DEPTH, GraphConfig};
pub use error::GraphError;
pub use export::{GraphDump, StyleRules};
pub use graph::{Graph, Node};
pub use result::GraphResult;
