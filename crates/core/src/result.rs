//! Result type for graph operations.

use crate::error::GraphError;

/// The standard Result type for graph operations.
///
/// Every mutation, evaluation and lookup returns this type.
///
/// # Examples
///
/// ```
/// use levelgraph_core::{Graph, GraphResult};
///
/// fn chain() -> GraphResult<Graph> {
///     let mut graph = Graph::new();
///     graph.add("a")?;
///     graph.add("b")?;
///     graph.link("a", "b")?;
///     graph.evaluate()?;
///     Ok(graph)
/// }
///
/// assert!(chain().is_ok());
/// ```
pub type GraphResult<T> = std::result::Result<T, GraphError>;
