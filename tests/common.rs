//! Common test utilities for the algoviz test suite.
//!
//! Generators for random graphs, game trees, point clouds and baskets, all
//! driven by a caller-owned seeded rng so failures replay exactly.

#![allow(dead_code)]

use std::{fs, path::PathBuf};

use algoviz::{
    game_tree::{GameTree, NodeKind, NodeSpec},
    identifiers::NodeId,
    point::Point,
    search::{Edge, Graph},
};
use rand::{Rng, rngs::StdRng};
use tempfile::TempDir;

/// Generate a directed graph with integer edge costs.
///
/// # Arguments
///
/// * `nodes` - Number of nodes, named `N0`, `N1`, ...
/// * `density` - Probability that any ordered pair is joined by an edge
/// * `rng` - Random number generator
///
/// # Returns
///
/// A graph with at most one edge per ordered pair and costs in `1..=9`
pub fn random_graph(nodes: usize, density: f64, rng: &mut StdRng) -> Graph {
    let names: Vec<NodeId> = (0..nodes).map(|i| NodeId::new(format!("N{i}"))).collect();
    let mut edges = Vec::new();
    for from in &names {
        for to in &names {
            if from != to && rng.random_bool(density) {
                let cost = rng.random_range(1..=9) as f64;
                edges.push(Edge::new(from.clone(), to.clone(), cost));
            }
        }
    }
    Graph::new(names, edges).expect("generated graph should be valid")
}

/// Reference shortest-path cost by Bellman-Ford relaxation.
///
/// # Returns
///
/// `None` when `goal` is unreachable from `start`
pub fn shortest_cost(graph: &Graph, start: &str, goal: &str) -> Option<f64> {
    let mut dist: Vec<(NodeId, f64)> = graph
        .nodes()
        .iter()
        .map(|n| (n.clone(), if n == &start { 0.0 } else { f64::INFINITY }))
        .collect();
    for _ in 0..graph.nodes().len() {
        for edge in graph.edges() {
            let from = dist
                .iter()
                .find(|(n, _)| n == &edge.from)
                .map(|(_, d)| *d)
                .unwrap_or(f64::INFINITY);
            if let Some(slot) = dist.iter_mut().find(|(n, _)| n == &edge.to) {
                if from + edge.cost < slot.1 {
                    slot.1 = from + edge.cost;
                }
            }
        }
    }
    dist.into_iter()
        .find(|(n, _)| n == &goal)
        .map(|(_, d)| d)
        .filter(|d| d.is_finite())
}

/// Sum of edge costs along `path`, taking the cheapest edge per hop.
pub fn path_cost(graph: &Graph, path: &[NodeId]) -> Option<f64> {
    path.windows(2)
        .map(|hop| {
            graph
                .neighbors(hop[0].as_str())
                .filter(|edge| edge.to == hop[1])
                .map(|edge| edge.cost)
                .reduce(f64::min)
        })
        .sum()
}

/// Generate a random alternating MAX/MIN game tree.
///
/// # Arguments
///
/// * `max_depth` - Depth at which every node becomes a leaf
/// * `max_branching` - Upper bound on children per internal node
/// * `rng` - Random number generator
///
/// # Returns
///
/// Node specifications in depth-first order, root first
pub fn random_game_specs(max_depth: usize, max_branching: usize, rng: &mut StdRng) -> Vec<NodeSpec> {
    let mut specs = Vec::new();
    let mut counter = 0;
    grow_specs(0, None, max_depth, max_branching, &mut counter, &mut specs, rng);
    specs
}

fn grow_specs(
    depth: usize,
    parent: Option<&str>,
    max_depth: usize,
    max_branching: usize,
    counter: &mut usize,
    specs: &mut Vec<NodeSpec>,
    rng: &mut StdRng,
) {
    let id = format!("n{counter}");
    *counter += 1;
    let leaf = depth == max_depth || (depth > 0 && rng.random_bool(0.25));
    if leaf {
        let value = rng.random_range(-20..=20) as f64;
        specs.push(NodeSpec::new(id.as_str(), NodeKind::Leaf(value), parent));
        return;
    }
    let kind = if depth % 2 == 0 { NodeKind::Max } else { NodeKind::Min };
    specs.push(NodeSpec::new(id.as_str(), kind, parent));
    for _ in 0..rng.random_range(1..=max_branching) {
        grow_specs(depth + 1, Some(id.as_str()), max_depth, max_branching, counter, specs, rng);
    }
}

/// Build a random game tree; see [`random_game_specs`].
pub fn random_game_tree(max_depth: usize, max_branching: usize, rng: &mut StdRng) -> GameTree {
    GameTree::build(random_game_specs(max_depth, max_branching, rng))
        .expect("generated tree should be valid")
}

/// Uniformly scattered points in a square.
pub fn random_points(count: usize, extent: f64, rng: &mut StdRng) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new(rng.random_range(0.0..extent), rng.random_range(0.0..extent)))
        .collect()
}

/// Random baskets drawn from `pool`; every basket holds at least one item.
pub fn random_transactions(pool: &[&str], count: usize, rng: &mut StdRng) -> Vec<Vec<String>> {
    (0..count)
        .map(|_| {
            let mut basket: Vec<String> = pool
                .iter()
                .filter(|_| rng.random_bool(0.5))
                .map(|item| item.to_string())
                .collect();
            if basket.is_empty() {
                basket.push(pool[rng.random_range(0..pool.len())].to_string());
            }
            basket
        })
        .collect()
}

/// Write `contents` to `name` inside `dir` and return the path.
pub fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write test input");
    path
}
