//! Structural mutation: nodes, edges, and slot bookkeeping.
//!
//! Every mutation that changes the edge or node set marks the graph stale.

use tracing::debug;

use super::{Graph, Node};
use crate::{GraphError, GraphResult};

impl Graph {
    /// Add a node with no edges.
    ///
    /// The node takes the next free slot; the adjacency matrix grows by one
    /// row and one column.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateNode` if `name` already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use levelgraph_core::{Graph, GraphError};
    ///
    /// let mut graph = Graph::new();
    /// assert!(graph.add("a").is_ok());
    /// assert_eq!(graph.add("a"), Err(GraphError::duplicate_node("a")));
    /// ```
    pub fn add(&mut self, name: impl Into<String>) -> GraphResult<()> {
        let name = name.into();
        if self.nodes.contains_key(&name) {
            return Err(GraphError::duplicate_node(name));
        }

        let slot = self.slots.len();
        for row in &mut self.adjacency {
            row.push(false);
        }
        self.adjacency.push(vec![false; slot.saturating_add(1)]);
        self.slots.push(name.clone());
        debug!(node = %name, slot, "added node");
        self.nodes.insert(name, Node::new(slot));
        self.mark_stale();

        Ok(())
    }

    /// Rename a node, keeping its slot and edges.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if `old` is absent, or `NodeAlreadyExists` if
    /// `new` is already taken.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> GraphResult<()> {
        let new = new.into();
        if !self.nodes.contains_key(old) {
            return Err(GraphError::node_not_found(old));
        }
        if self.nodes.contains_key(&new) {
            return Err(GraphError::node_already_exists(new));
        }

        let node = self
            .nodes
            .remove(old)
            .ok_or_else(|| GraphError::node_not_found(old))?;
        if let Some(entry) = self.slots.get_mut(node.slot) {
            entry.clone_from(&new);
        }
        debug!(from = %old, to = %new, slot = node.slot, "renamed node");
        self.nodes.insert(new, node);
        self.mark_stale();

        Ok(())
    }

    /// Remove a node and every edge touching it.
    ///
    /// Slots above the removed one shift down by one so slots remain a
    /// contiguous `0..node_count` range.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if `name` is absent.
    pub fn remove(&mut self, name: &str) -> GraphResult<()> {
        let node = self
            .nodes
            .remove(name)
            .ok_or_else(|| GraphError::node_not_found(name))?;
        let slot = node.slot;

        if slot < self.slots.len() {
            self.slots.remove(slot);
            self.adjacency.remove(slot);
        }
        for row in &mut self.adjacency {
            if slot < row.len() {
                row.remove(slot);
            }
        }

        // Compact: re-derive every shifted node's slot from its new position.
        for (position, shifted) in self.slots.iter().enumerate().skip(slot) {
            if let Some(entry) = self.nodes.get_mut(shifted) {
                entry.slot = position;
            }
        }

        if let Some(group) = node.level.and_then(|level| self.levels.get_mut(level)) {
            group.remove(name);
        }

        debug!(node = %name, slot, remaining = self.slots.len(), "removed node");
        self.mark_stale();

        Ok(())
    }

    /// Add the edge `from -> to`. Linking an existing edge is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` naming the missing endpoint, or `SelfLoop` if
    /// `from == to`.
    pub fn link(&mut self, from: &str, to: &str) -> GraphResult<()> {
        let from_slot = self.slot_of(from)?;
        let to_slot = self.slot_of(to)?;
        if from_slot == to_slot {
            return Err(GraphError::self_loop(from));
        }

        if self.set_cell(from_slot, to_slot, true) {
            debug!(%from, %to, "linked");
            self.mark_stale();
        }
        Ok(())
    }

    /// Remove the edge `from -> to`. Unlinking a missing edge is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` naming the missing endpoint.
    pub fn unlink(&mut self, from: &str, to: &str) -> GraphResult<()> {
        let from_slot = self.slot_of(from)?;
        let to_slot = self.slot_of(to)?;

        if self.set_cell(from_slot, to_slot, false) {
            debug!(%from, %to, "unlinked");
            self.mark_stale();
        }
        Ok(())
    }

    /// Returns whether the cell changed.
    fn set_cell(&mut self, row: usize, col: usize, value: bool) -> bool {
        self.adjacency
            .get_mut(row)
            .and_then(|cells| cells.get_mut(col))
            .is_some_and(|cell| std::mem::replace(cell, value) != value)
    }

    fn mark_stale(&mut self) {
        self.evaluated = false;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn graph_of(names: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut graph = Graph::new();
        for name in names {
            graph.add(*name).unwrap();
        }
        for (from, to) in edges {
            graph.link(from, to).unwrap();
        }
        graph
    }

    /// Slots must be a permutation of `0..n` that agrees with `slots`.
    fn assert_slots_consistent(graph: &Graph) {
        let n = graph.node_count();
        assert_eq!(graph.nodes.len(), n);
        assert_eq!(graph.adjacency.len(), n);
        for row in &graph.adjacency {
            assert_eq!(row.len(), n);
        }
        for (slot, name) in graph.slots.iter().enumerate() {
            assert_eq!(graph.nodes.get(name).unwrap().slot, slot);
        }
    }

    #[test]
    fn test_add_grows_matrix() {
        let graph = graph_of(&["a", "b", "c"], &[]);
        assert_eq!(graph.node_count(), 3);
        assert_slots_consistent(&graph);
    }

    #[test]
    fn test_add_marks_stale() {
        let mut graph = Graph::new();
        graph.add("a").unwrap();
        assert!(!graph.is_evaluated());
    }

    #[test]
    fn test_rename_keeps_edges() {
        let mut graph = graph_of(&["a", "b"], &[("a", "b")]);
        graph.rename("a", "z").unwrap();
        assert!(!graph.contains("a"));
        assert!(graph.has_edge("z", "b").unwrap());
        assert_slots_consistent(&graph);
    }

    #[test]
    fn test_rename_errors() {
        let mut graph = graph_of(&["a", "b"], &[]);
        assert_eq!(
            graph.rename("x", "y"),
            Err(GraphError::node_not_found("x"))
        );
        assert_eq!(
            graph.rename("a", "b"),
            Err(GraphError::node_already_exists("b"))
        );
    }

    #[test]
    fn test_remove_compacts_slots_and_keeps_edges() {
        let mut graph = graph_of(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("c", "d"), ("b", "d")],
        );
        graph.remove("b").unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_slots_consistent(&graph);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![("a", "c"), ("c", "d")]);
    }

    #[test]
    fn test_remove_then_link_uses_new_slots() {
        let mut graph = graph_of(&["a", "b", "c"], &[("b", "c")]);
        graph.remove("a").unwrap();
        graph.add("e").unwrap();
        graph.link("c", "e").unwrap();

        assert_slots_consistent(&graph);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![("b", "c"), ("c", "e")]);
    }

    #[test]
    fn test_remove_missing_node() {
        let mut graph = graph_of(&["a"], &[]);
        assert_eq!(graph.remove("b"), Err(GraphError::node_not_found("b")));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_link_names_missing_endpoint() {
        let mut graph = graph_of(&["a"], &[]);
        let err = graph.link("b", "a").unwrap_err();
        assert_eq!(err.to_string(), "the node b does not exist");
        let err = graph.link("a", "b").unwrap_err();
        assert_eq!(err.to_string(), "the node b does not exist");
    }

    #[test]
    fn test_link_rejects_self_loop() {
        let mut graph = graph_of(&["a"], &[]);
        assert_eq!(graph.link("a", "a"), Err(GraphError::self_loop("a")));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_relink_and_reunlink_keep_evaluation() {
        let mut graph = graph_of(&["a", "b"], &[("a", "b")]);
        graph.evaluate().unwrap();

        graph.link("a", "b").unwrap();
        assert!(graph.is_evaluated());
        assert_eq!(graph.edge_count(), 1);

        graph.unlink("b", "a").unwrap();
        assert!(graph.is_evaluated());
        assert_eq!(graph.edge_count(), 1);
    }
}
