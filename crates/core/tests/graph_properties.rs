//! Graph Property-Based Tests
//!
//! Random graphs checked against invariants that must always hold, with
//! petgraph as the cycle-detection oracle.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::{BTreeSet, HashMap};

use levelgraph_core::{Graph, GraphError};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use proptest::prelude::*;

const MAX_NODES: usize = 10;

fn node_name(i: usize) -> String {
    format!("n{i}")
}

/// Edges between distinct slots, any direction.
fn any_edges() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1..=MAX_NODES).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..(n * 2))
            .prop_map(|pairs| pairs.into_iter().filter(|(a, b)| a != b).collect::<Vec<_>>());
        (Just(n), edges)
    })
}

/// Edges that only point from lower to higher slots, so never cyclic.
fn acyclic_edges() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    any_edges().prop_map(|(n, edges)| {
        let forward: Vec<_> = edges
            .into_iter()
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect();
        (n, forward)
    })
}

fn build(n: usize, edges: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::new();
    for i in 0..n {
        graph.add(node_name(i)).unwrap();
    }
    for &(a, b) in edges {
        graph.link(&node_name(a), &node_name(b)).unwrap();
    }
    graph
}

fn petgraph_of(n: usize, edges: &[(usize, usize)]) -> DiGraph<(), ()> {
    let mut oracle = DiGraph::new();
    let indices: Vec<_> = (0..n).map(|_| oracle.add_node(())).collect();
    for &(a, b) in edges {
        oracle.update_edge(indices[a], indices[b], ());
    }
    oracle
}

proptest! {
    /// Property: evaluation fails with CyclicGraph exactly when a cycle exists
    #[test]
    fn prop_cycle_detection_matches_oracle((n, edges) in any_edges()) {
        let mut graph = build(n, &edges);
        let cyclic = is_cyclic_directed(&petgraph_of(n, &edges));

        match graph.evaluate() {
            Ok(()) => prop_assert!(!cyclic, "missed a cycle in {:?}", edges),
            Err(GraphError::CyclicGraph { .. }) => prop_assert!(cyclic, "false cycle in {:?}", edges),
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    /// Property: every edge strictly increases the level
    #[test]
    fn prop_level_monotonicity((n, edges) in acyclic_edges()) {
        let mut graph = build(n, &edges);
        graph.evaluate().unwrap();
        let nodes = graph.nodes();

        for (from, to) in graph.edges() {
            prop_assert!(nodes[from].level() < nodes[to].level());
        }
    }

    /// Property: a node's level is one more than its deepest parent
    #[test]
    fn prop_level_is_longest_path((n, edges) in acyclic_edges()) {
        let mut graph = build(n, &edges);
        graph.evaluate().unwrap();
        let nodes = graph.nodes();

        for name in graph.node_names() {
            let parents = graph.predecessors(name).unwrap();
            let expected = parents
                .iter()
                .filter_map(|parent| nodes[*parent].level())
                .max()
                .map_or(0, |deepest| deepest + 1);
            prop_assert_eq!(nodes[name].level(), Some(expected));
        }
    }

    /// Property: start nodes are exactly the zero in-degree nodes
    #[test]
    fn prop_start_nodes_have_no_parents((n, edges) in acyclic_edges()) {
        let mut graph = build(n, &edges);
        graph.evaluate().unwrap();

        let expected: BTreeSet<String> = graph
            .node_names()
            .filter(|name| graph.predecessors(name).unwrap().is_empty())
            .map(str::to_string)
            .collect();
        prop_assert_eq!(graph.start_nodes().unwrap(), expected);
    }

    /// Property: compile_run visits every node once, parents before children
    #[test]
    fn prop_compile_run_orders_edges((n, edges) in acyclic_edges()) {
        let mut graph = build(n, &edges);
        graph.evaluate().unwrap();

        let mut position: HashMap<String, usize> = HashMap::new();
        graph.compile_run(|name| {
            let next = position.len();
            position.insert(name.to_string(), next);
            Ok::<(), GraphError>(())
        }).unwrap();

        prop_assert_eq!(position.len(), n);
        for (from, to) in graph.edges() {
            prop_assert!(position[from] < position[to]);
        }
    }

    /// Property: set_run visits exactly the node and its descendants
    #[test]
    fn prop_set_run_covers_descendants((n, edges) in acyclic_edges(), pick in 0..MAX_NODES) {
        let mut graph = build(n, &edges);
        graph.evaluate().unwrap();
        let start = node_name(pick % n);

        let mut seen = BTreeSet::new();
        graph.set_run(&start, |name| {
            seen.insert(name.to_string());
            Ok::<(), GraphError>(())
        }).unwrap();

        let mut expected = graph.node(&start).unwrap().descendants().clone();
        expected.insert(start);
        prop_assert_eq!(seen, expected);
    }

    /// Property: removing a node keeps the others' edges and levels coherent
    #[test]
    fn prop_remove_keeps_remaining_edges((n, edges) in acyclic_edges(), pick in 0..MAX_NODES) {
        let mut graph = build(n, &edges);
        let victim = node_name(pick % n);
        graph.remove(&victim).unwrap();

        let expected: BTreeSet<(String, String)> = edges
            .iter()
            .map(|&(a, b)| (node_name(a), node_name(b)))
            .filter(|(a, b)| *a != victim && *b != victim)
            .collect();
        let actual: BTreeSet<(String, String)> = graph
            .edges()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();

        prop_assert_eq!(graph.node_count(), n - 1);
        prop_assert_eq!(actual, expected);
        prop_assert!(graph.evaluate().is_ok());
    }
}
