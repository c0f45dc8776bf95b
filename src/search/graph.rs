//! Directed weighted graphs and heuristic tables for the search engines

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, identifiers::NodeId};

/// Directed edge with a non-negative traversal cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: f64,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, cost: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            cost,
        }
    }
}

/// Validated graph: unique node names, edges between declared nodes only.
///
/// Outgoing edges are kept in declaration order, which is the order the
/// search engines expand them in.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
    outgoing: HashMap<NodeId, Vec<usize>>,
}

impl Graph {
    /// Build a graph, rejecting duplicate nodes, dangling edge endpoints and
    /// negative or non-finite costs.
    ///
    /// # Examples
    ///
    /// ```
    /// use algoviz::search::{Edge, Graph};
    ///
    /// let graph = Graph::new(
    ///     vec!["A".into(), "B".into()],
    ///     vec![Edge::new("A", "B", 1.0)],
    /// )?;
    /// assert_eq!(graph.neighbors("A").count(), 1);
    /// assert_eq!(graph.neighbors("B").count(), 0);
    /// # Ok::<(), algoviz::Error>(())
    /// ```
    pub fn new(nodes: Vec<NodeId>, edges: Vec<Edge>) -> Result<Self> {
        let mut seen = HashSet::new();
        for node in &nodes {
            if !seen.insert(node.as_str()) {
                return Err(Error::DuplicateNode {
                    node: node.to_string(),
                });
            }
        }

        let mut outgoing: HashMap<NodeId, Vec<usize>> =
            nodes.iter().map(|n| (n.clone(), Vec::new())).collect();

        for (idx, edge) in edges.iter().enumerate() {
            if !seen.contains(edge.from.as_str()) {
                return Err(Error::unknown_node_in(
                    edge.from.as_str(),
                    format!("edge {} -> {}", edge.from, edge.to),
                ));
            }
            if !seen.contains(edge.to.as_str()) {
                return Err(Error::unknown_node_in(
                    edge.to.as_str(),
                    format!("edge {} -> {}", edge.from, edge.to),
                ));
            }
            if !edge.cost.is_finite() || edge.cost < 0.0 {
                return Err(Error::InvalidCost {
                    from: edge.from.to_string(),
                    to: edge.to.to_string(),
                    cost: edge.cost,
                });
            }
            if let Some(list) = outgoing.get_mut(edge.from.as_str()) {
                list.push(idx);
            }
        }

        Ok(Self {
            nodes,
            edges,
            outgoing,
        })
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains(&self, node: &str) -> bool {
        self.outgoing.contains_key(node)
    }

    /// Outgoing edges of `node` in declaration order.
    pub fn neighbors<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.outgoing
            .get(node)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.edges[idx])
    }
}

/// Estimated remaining cost per node; absent nodes estimate 0.
///
/// Admissibility is not checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Heuristic {
    values: HashMap<NodeId, f64>,
}

impl Heuristic {
    /// The all-zero heuristic.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build from `(node, estimate)` pairs. Later entries overwrite earlier ones.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, f64)>,
    {
        let mut values = HashMap::new();
        for (node, value) in entries {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidHeuristic {
                    node: node.into_inner(),
                    value,
                });
            }
            values.insert(node, value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, node: &str) -> f64 {
        self.values.get(node).copied().unwrap_or(0.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.values.keys()
    }

    pub fn is_zero(&self) -> bool {
        self.values.values().all(|&v| v == 0.0)
    }
}
