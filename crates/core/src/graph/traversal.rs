//! Traversal strategies over an evaluated graph.
//!
//! Each strategy calls `visit` once per visited node name and stops at the
//! first error, returning it unchanged. Engine failures (`NotEvaluated`,
//! `NodeNotFound`) reach the caller through `E: From<GraphError>`.
//!
//! `set_run` and `reverse_run` walk edges, not nodes: a node reachable
//! through two visited parents is visited twice. Callers needing
//! exactly-once semantics deduplicate in `visit`.

use super::Graph;
use crate::GraphError;

impl Graph {
    /// Visit every node in level order, lowest level first.
    ///
    /// A node is visited only after every node on a lower level. Nodes on
    /// the same level are visited in name order. Edges are not followed, so
    /// a parent is not necessarily visited right before its children.
    ///
    /// # Errors
    ///
    /// Returns `NotEvaluated` (converted into `E`) if the graph changed
    /// since the last evaluation, or the first error returned by `visit`.
    ///
    /// # Examples
    ///
    /// ```
    /// use levelgraph_core::{Graph, GraphError};
    ///
    /// let mut graph = Graph::new();
    /// for name in ["a", "b", "c"] {
    ///     graph.add(name)?;
    /// }
    /// graph.link("b", "a")?;
    /// graph.link("a", "c")?;
    /// graph.evaluate()?;
    ///
    /// let mut order = String::new();
    /// graph.compile_run(|name| {
    ///     order.push_str(name);
    ///     Ok::<(), GraphError>(())
    /// })?;
    /// assert_eq!(order, "bac");
    /// # Ok::<(), GraphError>(())
    /// ```
    pub fn compile_run<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<(), E>,
        E: From<GraphError>,
    {
        for name in self.levels()?.iter().flatten() {
            visit(name.as_str())?;
        }
        Ok(())
    }

    /// Visit `name`, then recursively every direct child of each visited
    /// node.
    ///
    /// Parents outside the walk may be visited after their children, and
    /// a node under several visited parents is visited once per parent.
    ///
    /// # Errors
    ///
    /// Returns `NotEvaluated` or `NodeNotFound` (converted into `E`), or
    /// the first error returned by `visit`.
    pub fn set_run<E, F>(&self, name: &str, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<(), E>,
        E: From<GraphError>,
    {
        self.ensure_evaluated()?;
        self.descend(name, &mut visit)
    }

    /// Visit `name`, then recursively every direct predecessor, read from
    /// the current edges.
    ///
    /// # Errors
    ///
    /// Returns `NotEvaluated` or `NodeNotFound` (converted into `E`), or
    /// the first error returned by `visit`.
    pub fn reverse_run<E, F>(&self, name: &str, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<(), E>,
        E: From<GraphError>,
    {
        self.ensure_evaluated()?;
        self.ascend(name, &mut visit)
    }

    fn descend<E, F>(&self, name: &str, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<(), E>,
        E: From<GraphError>,
    {
        let node = self
            .nodes
            .get(name)
            .ok_or_else(|| GraphError::node_not_found(name))?;
        visit(name)?;
        for child in &node.children {
            self.descend(child, visit)?;
        }
        Ok(())
    }

    fn ascend<E, F>(&self, name: &str, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<(), E>,
        E: From<GraphError>,
    {
        let slot = self.slot_of(name)?;
        visit(name)?;
        for parent in self.predecessor_names(slot) {
            self.ascend(parent, visit)?;
        }
        Ok(())
    }
}
