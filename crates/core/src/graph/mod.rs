//! # Level Graph
//!
//! A mutable directed graph over named nodes, stored as a dense adjacency
//! matrix. Each node owns a slot (its row and column in the matrix); slots
//! stay a contiguous `0..node_count` permutation across removals.
//!
//! Derived data (levels, children, descendants) is produced by
//! [`Graph::evaluate`] and cached until the next structural mutation. While
//! the cache is stale, traversals and level queries fail with
//! [`GraphError::NotEvaluated`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{GraphConfig, GraphError, GraphResult};

mod evaluate;
mod store;
mod traversal;

/// Read handle for a single graph member.
///
/// Returned by value from [`Graph::nodes`], so holding one never exposes
/// the graph's internal state to mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    slot: usize,
    level: Option<usize>,
    children: BTreeSet<String>,
    descendants: BTreeSet<String>,
}

impl Node {
    const fn new(slot: usize) -> Self {
        Self {
            slot,
            level: None,
            children: BTreeSet::new(),
            descendants: BTreeSet::new(),
        }
    }

    /// Longest-path level assigned by the last evaluation that saw this
    /// node, `None` if it was added afterwards.
    #[must_use]
    pub const fn level(&self) -> Option<usize> {
        self.level
    }

    /// Whether the last evaluation placed this node in level 0.
    #[must_use]
    pub fn is_start(&self) -> bool {
        self.level == Some(0)
    }

    /// Direct successors at evaluation time.
    #[must_use]
    pub const fn children(&self) -> &BTreeSet<String> {
        &self.children
    }

    /// Every node reachable by following edges forward, at evaluation time.
    #[must_use]
    pub const fn descendants(&self) -> &BTreeSet<String> {
        &self.descendants
    }
}

/// Directed graph with cached longest-path levels.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add` | \(O(n)\) | Grows every row by one column |
/// | `remove` | \(O(n^2)\) worst case | Drops a row and a column, compacts slots |
/// | `link` / `unlink` | \(O(1)\) | Single matrix cell |
/// | `evaluate` | \(O(n^3 \cdot d)\) | One matrix product per walk length `d` |
/// | `set_run` / `reverse_run` | proportional to walks visited | May revisit nodes |
#[derive(Debug, Clone)]
pub struct Graph {
    config: GraphConfig,
    nodes: HashMap<String, Node>,
    /// Slot -> name. Inverse of `Node::slot`.
    slots: Vec<String>,
    adjacency: Vec<Vec<bool>>,
    levels: Vec<BTreeSet<String>>,
    evaluated: bool,
}

impl Graph {
    /// Create an empty graph with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use levelgraph_core::Graph;
    ///
    /// let graph = Graph::new();
    /// assert_eq!(graph.node_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(GraphConfig::default())
    }

    /// Create an empty graph with a caller-supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn with_config(config: GraphConfig) -> GraphResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: GraphConfig) -> Self {
        Self {
            config,
            nodes: HashMap::new(),
            slots: Vec::new(),
            adjacency: Vec::new(),
            levels: Vec::new(),
            // An empty graph has nothing to derive.
            evaluated: true,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GraphConfig {
        &self.config
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .iter()
            .map(|row| row.iter().filter(|&&edge| edge).count())
            .sum()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Copy of every node keyed by name.
    #[must_use]
    pub fn nodes(&self) -> BTreeMap<String, Node> {
        self.nodes
            .iter()
            .map(|(name, node)| (name.clone(), node.clone()))
            .collect()
    }

    /// Node names in slot order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(String::as_str)
    }

    /// Every edge as `(from, to)`, ordered by source slot then target slot.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.adjacency.iter().zip(&self.slots).flat_map(move |(row, from)| {
            row.iter()
                .zip(&self.slots)
                .filter(|(edge, _)| **edge)
                .map(move |(_, to)| (from.as_str(), to.as_str()))
        })
    }

    /// Whether an edge `from -> to` exists.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` naming whichever endpoint is missing.
    pub fn has_edge(&self, from: &str, to: &str) -> GraphResult<bool> {
        let from_slot = self.slot_of(from)?;
        let to_slot = self.slot_of(to)?;
        Ok(self.cell(from_slot, to_slot))
    }

    /// Direct successors of `name`, read from the current edge set.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if `name` is absent.
    pub fn successors(&self, name: &str) -> GraphResult<Vec<&str>> {
        let slot = self.slot_of(name)?;
        Ok(self
            .adjacency
            .get(slot)
            .into_iter()
            .flat_map(|row| row.iter().zip(&self.slots))
            .filter(|(edge, _)| **edge)
            .map(|(_, child)| child.as_str())
            .collect())
    }

    /// Direct predecessors of `name`, read from the current edge set.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if `name` is absent.
    pub fn predecessors(&self, name: &str) -> GraphResult<Vec<&str>> {
        let slot = self.slot_of(name)?;
        Ok(self.predecessor_names(slot))
    }

    /// Whether cached levels and children reflect the current edge set.
    #[must_use]
    pub const fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Level groups from the last evaluation; index is the level.
    ///
    /// # Errors
    ///
    /// Returns `NotEvaluated` if the graph changed since the last evaluation.
    pub fn levels(&self) -> GraphResult<&[BTreeSet<String>]> {
        self.ensure_evaluated()?;
        Ok(&self.levels)
    }

    /// Names of the nodes placed at level 0 by the last evaluation.
    ///
    /// # Errors
    ///
    /// Returns `NotEvaluated` if the graph changed since the last evaluation.
    pub fn start_nodes(&self) -> GraphResult<BTreeSet<String>> {
        Ok(self.levels()?.first().cloned().unwrap_or_default())
    }

    fn ensure_evaluated(&self) -> GraphResult<()> {
        if self.evaluated {
            Ok(())
        } else {
            Err(GraphError::NotEvaluated)
        }
    }

    fn slot_of(&self, name: &str) -> GraphResult<usize> {
        self.nodes
            .get(name)
            .map(|node| node.slot)
            .ok_or_else(|| GraphError::node_not_found(name))
    }

    fn cell(&self, row: usize, col: usize) -> bool {
        self.adjacency
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    fn predecessor_names(&self, slot: usize) -> Vec<&str> {
        self.adjacency
            .iter()
            .zip(&self.slots)
            .filter(|(row, _)| row.get(slot).copied().unwrap_or(false))
            .map(|(_, parent)| parent.as_str())
            .collect()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn chain() -> Graph {
        let mut graph = Graph::new();
        for name in ["a", "b", "c"] {
            graph.add(name).unwrap();
        }
        graph.link("a", "b").unwrap();
        graph.link("b", "c").unwrap();
        graph
    }

    #[test]
    fn test_new_graph_is_empty_and_evaluated() {
        let graph = Graph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_evaluated());
        assert!(graph.start_nodes().unwrap().is_empty());
    }

    #[test]
    fn test_with_config_rejects_zero_depth() {
        let result = Graph::with_config(GraphConfig::with_max_walk_depth(0));
        assert!(matches!(result, Err(GraphError::InvalidConfig { .. })));
    }

    #[test]
    fn test_edges_follow_slot_order() {
        let graph = chain();
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![("a", "b"), ("b", "c")]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_successors_and_predecessors() {
        let graph = chain();
        assert_eq!(graph.successors("b").unwrap(), vec!["c"]);
        assert_eq!(graph.predecessors("b").unwrap(), vec!["a"]);
        assert!(graph.predecessors("a").unwrap().is_empty());
        assert_eq!(
            graph.successors("zz"),
            Err(GraphError::node_not_found("zz"))
        );
    }

    #[test]
    fn test_nodes_returns_a_copy() {
        let mut graph = chain();
        graph.evaluate().unwrap();
        let mut copy = graph.nodes();
        copy.remove("a");
        assert_eq!(copy.len(), 2);
        assert_eq!(graph.node_count(), 3);
        assert!(graph.contains("a"));
    }

    #[test]
    fn test_has_edge_reports_missing_endpoint() {
        let graph = chain();
        assert!(graph.has_edge("a", "b").unwrap());
        assert!(!graph.has_edge("b", "a").unwrap());
        assert_eq!(
            graph.has_edge("a", "nope"),
            Err(GraphError::node_not_found("nope"))
        );
    }
}
