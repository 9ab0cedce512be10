//! Level evaluation by iterated matrix powers.
//!
//! Entry `(i, j)` of `A^k` counts the walks of length `k` from slot `i` to
//! slot `j`. A non-zero diagonal entry in any power means a directed cycle.
//! In an acyclic graph the powers reach the zero matrix; the largest `k`
//! for which column `j` of `A^k` is non-zero is the longest path ending at
//! `j`, which becomes its level. Nodes no walk reaches sit at level 0.
//!
//! Everything is computed into fresh buffers and committed only once the
//! whole evaluation has succeeded, so a failed run leaves the previous
//! cache untouched.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::Graph;
use crate::{GraphError, GraphResult};

impl Graph {
    /// Derive levels, children and descendants from the current edge set.
    ///
    /// # Errors
    ///
    /// Returns `CyclicGraph` if the edges contain a directed cycle, or
    /// `MaxWalkDepthExceeded` if walks longer than the configured cap exist.
    /// Either way the previously cached state is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use levelgraph_core::Graph;
    ///
    /// let mut graph = Graph::new();
    /// for name in ["a", "b", "c", "d"] {
    ///     graph.add(name).unwrap();
    /// }
    /// graph.link("a", "b").unwrap();
    /// graph.link("b", "c").unwrap();
    /// graph.link("d", "c").unwrap();
    /// graph.evaluate().unwrap();
    ///
    /// assert_eq!(graph.node("c").and_then(|n| n.level()), Some(2));
    /// assert_eq!(graph.start_nodes().unwrap().len(), 2);
    /// ```
    pub fn evaluate(&mut self) -> GraphResult<()> {
        let levels = match longest_walks(&self.adjacency, self.config.max_walk_depth) {
            Ok(levels) => levels,
            Err(WalkFailure::Cycle(slot)) => {
                let node = self.slots.get(slot).cloned().unwrap_or_default();
                return Err(GraphError::cyclic(node));
            }
            Err(WalkFailure::TooDeep(depth)) => {
                return Err(GraphError::MaxWalkDepthExceeded { depth });
            }
        };
        let closures = descendant_closures(&self.adjacency);

        self.commit(&levels, &closures);
        debug!(
            nodes = self.slots.len(),
            depth = self.levels.len(),
            "evaluated graph"
        );
        Ok(())
    }

    fn commit(&mut self, levels: &[usize], closures: &[BTreeSet<usize>]) {
        let depth = levels.iter().max().map_or(0, |deepest| deepest.saturating_add(1));
        let mut groups = vec![BTreeSet::new(); depth];

        for (slot, name) in self.slots.iter().enumerate() {
            let level = levels.get(slot).copied().unwrap_or(0);
            let children = self
                .adjacency
                .get(slot)
                .into_iter()
                .flat_map(|row| row.iter().zip(&self.slots))
                .filter(|(edge, _)| **edge)
                .map(|(_, child)| child.clone())
                .collect();
            let descendants = closures
                .get(slot)
                .into_iter()
                .flatten()
                .filter_map(|&reached| self.slots.get(reached).cloned())
                .collect();

            if let Some(node) = self.nodes.get_mut(name) {
                node.level = Some(level);
                node.children = children;
                node.descendants = descendants;
            }
            if let Some(group) = groups.get_mut(level) {
                group.insert(name.clone());
            }
        }

        self.levels = groups;
        self.evaluated = true;
    }
}

#[derive(Debug, PartialEq, Eq)]
enum WalkFailure {
    /// Slot found on the diagonal of some power.
    Cycle(usize),
    TooDeep(usize),
}

/// Square matrix of walk counts between slots.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WalkMatrix {
    cells: Vec<Vec<u64>>,
}

impl WalkMatrix {
    fn from_adjacency(adjacency: &[Vec<bool>]) -> Self {
        let cells = adjacency
            .iter()
            .map(|row| row.iter().map(|&edge| u64::from(edge)).collect())
            .collect();
        Self { cells }
    }

    /// `self * A`: extend every walk by one edge. Counts saturate.
    fn extend(&self, adjacency: &[Vec<bool>]) -> Self {
        let width = adjacency.len();
        let cells = self
            .cells
            .iter()
            .map(|row| {
                let mut next = vec![0u64; width];
                for (&walks, edges) in row.iter().zip(adjacency) {
                    if walks == 0 {
                        continue;
                    }
                    for (cell, &edge) in next.iter_mut().zip(edges) {
                        if edge {
                            *cell = cell.saturating_add(walks);
                        }
                    }
                }
                next
            })
            .collect();
        Self { cells }
    }

    fn is_zero(&self) -> bool {
        self.cells.iter().flatten().all(|&walks| walks == 0)
    }

    fn cyclic_slot(&self) -> Option<usize> {
        self.cells
            .iter()
            .enumerate()
            .find(|(slot, row)| row.get(*slot).is_some_and(|&walks| walks > 0))
            .map(|(slot, _)| slot)
    }

    /// Columns with at least one non-zero entry.
    fn reached(&self) -> Vec<bool> {
        let mut reached = vec![false; self.cells.len()];
        for row in &self.cells {
            for (hit, &walks) in reached.iter_mut().zip(row) {
                *hit |= walks > 0;
            }
        }
        reached
    }
}

/// Level of every slot: the longest walk ending there.
fn longest_walks(adjacency: &[Vec<bool>], max_depth: usize) -> Result<Vec<usize>, WalkFailure> {
    let mut levels = vec![0usize; adjacency.len()];
    let mut walks = WalkMatrix::from_adjacency(adjacency);
    let mut length = 1usize;

    loop {
        if let Some(slot) = walks.cyclic_slot() {
            return Err(WalkFailure::Cycle(slot));
        }
        if walks.is_zero() {
            break;
        }
        if length >= max_depth {
            return Err(WalkFailure::TooDeep(max_depth));
        }

        // Powers ascend, so the last write is the longest walk.
        for (level, hit) in levels.iter_mut().zip(walks.reached()) {
            if hit {
                *level = length;
            }
        }
        trace!(length, "walks remain");

        walks = walks.extend(adjacency);
        length = length.saturating_add(1);
    }

    Ok(levels)
}

/// Transitive forward closure of every slot. The adjacency must be acyclic.
///
/// Iterative post-order walk; a slot's closure is built once and reused by
/// every ancestor that reaches it.
fn descendant_closures(adjacency: &[Vec<bool>]) -> Vec<BTreeSet<usize>> {
    let mut closed: Vec<Option<BTreeSet<usize>>> = vec![None; adjacency.len()];

    for root in 0..adjacency.len() {
        let mut stack = vec![(root, false)];
        while let Some((slot, expanded)) = stack.pop() {
            if closed.get(slot).is_some_and(Option::is_some) {
                continue;
            }
            let children = successor_slots(adjacency, slot);

            if expanded {
                let mut closure = BTreeSet::new();
                for child in children {
                    closure.insert(child);
                    if let Some(Some(below)) = closed.get(child) {
                        closure.extend(below.iter().copied());
                    }
                }
                if let Some(entry) = closed.get_mut(slot) {
                    *entry = Some(closure);
                }
            } else {
                stack.push((slot, true));
                stack.extend(
                    children
                        .into_iter()
                        .filter(|&child| closed.get(child).is_some_and(Option::is_none))
                        .map(|child| (child, false)),
                );
            }
        }
    }

    closed.into_iter().map(Option::unwrap_or_default).collect()
}

fn successor_slots(adjacency: &[Vec<bool>], slot: usize) -> Vec<usize> {
    adjacency
        .get(slot)
        .into_iter()
        .flat_map(|row| row.iter().enumerate())
        .filter(|(_, edge)| **edge)
        .map(|(child, _)| child)
        .collect()
}
