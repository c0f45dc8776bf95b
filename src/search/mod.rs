//! Best-first graph search: Uniform Cost, Greedy Best-First and A*
//!
//! All three share one skeleton. A frontier starts with the start node; the
//! entry with the smallest key is selected and closed; reaching the goal ends
//! the search; otherwise every outgoing edge to a node that is not closed is
//! relaxed. The strategy decides the key and whether a cheaper rediscovery
//! replaces a frontier entry.
//!
//! # Example
//!
//! ```
//! use algoviz::search::{self, Edge, Graph, Heuristic, SearchProblem, SearchStrategy};
//!
//! let graph = Graph::new(
//!     vec!["A".into(), "B".into(), "C".into(), "D".into()],
//!     vec![
//!         Edge::new("A", "B", 1.0),
//!         Edge::new("A", "C", 4.0),
//!         Edge::new("B", "C", 2.0),
//!         Edge::new("B", "D", 5.0),
//!         Edge::new("C", "D", 1.0),
//!     ],
//! )?;
//! let problem = SearchProblem::new(graph, Heuristic::zero(), "A", "D")?;
//!
//! let run = search::run(&problem, SearchStrategy::AStar);
//! let outcome = run.result?;
//! assert_eq!(outcome.cost(), Some(4.0));
//! # Ok::<(), algoviz::Error>(())
//! ```

mod frontier;
mod graph;
mod strategy;

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

pub use frontier::{Frontier, FrontierEntry};
pub use graph::{Edge, Graph, Heuristic};
pub use strategy::SearchStrategy;

use crate::{
    Error, Result,
    identifiers::{NodeId, format_path},
    trace::{Run, Trace},
    utils::format_cost,
};

/// A graph, a heuristic and the endpoints to connect.
#[derive(Debug, Clone)]
pub struct SearchProblem {
    pub graph: Graph,
    pub heuristic: Heuristic,
    pub start: NodeId,
    pub goal: NodeId,
}

impl SearchProblem {
    /// Validate that start, goal and every heuristic entry name declared nodes.
    pub fn new(
        graph: Graph,
        heuristic: Heuristic,
        start: impl Into<NodeId>,
        goal: impl Into<NodeId>,
    ) -> Result<Self> {
        let start = start.into();
        let goal = goal.into();
        if !graph.contains(start.as_str()) {
            return Err(Error::unknown_node_in(start.as_str(), "start"));
        }
        if !graph.contains(goal.as_str()) {
            return Err(Error::unknown_node_in(goal.as_str(), "goal"));
        }
        if let Some(node) = heuristic.nodes().find(|n| !graph.contains(n.as_str())) {
            return Err(Error::unknown_node_in(node.as_str(), "heuristic"));
        }
        Ok(Self {
            graph,
            heuristic,
            start,
            goal,
        })
    }
}

/// Successful search result.
#[derive(Debug, Clone, Serialize)]
pub struct PathFound {
    pub path: Vec<NodeId>,
    /// Accumulated edge cost of `path`
    pub cost: f64,
    /// Number of frontier selections, the goal selection included
    pub expansions: usize,
    /// Nodes closed before the goal was selected, in closing order
    pub closed: Vec<NodeId>,
    /// Trace length when the goal was reached
    pub steps: usize,
}

/// Result of a search: a path, or a distinct not-found outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(PathFound),
    NotFound {
        expansions: usize,
        closed: Vec<NodeId>,
    },
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&[NodeId]> {
        match self {
            SearchOutcome::Found(found) => Some(&found.path),
            SearchOutcome::NotFound { .. } => None,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        match self {
            SearchOutcome::Found(found) => Some(found.cost),
            SearchOutcome::NotFound { .. } => None,
        }
    }

    pub fn expansions(&self) -> usize {
        match self {
            SearchOutcome::Found(found) => found.expansions,
            SearchOutcome::NotFound { expansions, .. } => *expansions,
        }
    }
}

/// Run `strategy` on `problem` with a fresh trace.
pub fn run(problem: &SearchProblem, strategy: SearchStrategy) -> Run<SearchOutcome> {
    Trace::new().run(|trace| solve(problem, strategy, trace))
}

/// Run `strategy` on `problem`, recording steps into `trace`.
pub fn solve(
    problem: &SearchProblem,
    strategy: SearchStrategy,
    trace: &mut Trace,
) -> Result<SearchOutcome> {
    let SearchProblem {
        graph,
        heuristic,
        start,
        goal,
    } = problem;

    trace.info(format!(
        "{}: start at {start}, goal {goal}",
        strategy.name()
    ));
    trace.info(format!("Formula: {}", strategy.formula()));

    let mut frontier = Frontier::new();
    let start_h = heuristic.get(start.as_str());
    frontier.push(FrontierEntry {
        node: start.clone(),
        path: vec![start.clone()],
        g: 0.0,
        h: start_h,
        key: strategy.key(0.0, start_h),
    });

    let mut closed: Vec<NodeId> = Vec::new();
    let mut closed_set: HashSet<NodeId> = HashSet::new();
    let mut expansions = 0;

    trace.info(format!("Open: [{start}], Closed: []"));

    while let Some(current) = frontier.pop_min() {
        expansions += 1;
        debug!(node = %current.node, g = current.g, h = current.h, key = current.key, "selected");
        trace.info(describe_selection(strategy, &current));

        if current.node == *goal {
            trace.success(format!(
                "Goal reached! Path: {}, cost: {}",
                format_path(&current.path),
                format_cost(current.g)
            ));
            return Ok(SearchOutcome::Found(PathFound {
                path: current.path,
                cost: current.g,
                expansions,
                closed,
                steps: trace.len(),
            }));
        }

        closed_set.insert(current.node.clone());
        closed.push(current.node.clone());

        let mut added = Vec::new();
        for edge in graph.neighbors(current.node.as_str()) {
            if closed_set.contains(edge.to.as_str()) {
                continue;
            }

            let g = current.g + edge.cost;
            let h = heuristic.get(edge.to.as_str());
            let mut path = current.path.clone();
            path.push(edge.to.clone());
            let candidate = FrontierEntry {
                node: edge.to.clone(),
                path,
                g,
                h,
                key: strategy.key(g, h),
            };

            match frontier.position(edge.to.as_str()) {
                None => {
                    added.push(describe_entry(strategy, &candidate));
                    frontier.push(candidate);
                }
                Some(idx) if strategy.updates_frontier() => {
                    let better = frontier.get(idx).is_some_and(|existing| g < existing.g);
                    if better {
                        trace.info(format!(
                            "Update {} via {}: {} (cheaper)",
                            candidate.node,
                            current.node,
                            describe_entry(strategy, &candidate)
                        ));
                        frontier.replace(idx, candidate);
                    }
                }
                Some(_) => {}
            }
        }

        if !added.is_empty() {
            trace.info(format!("Add to Open: {}", added.join(", ")));
        }

        trace.highlight(format!(
            "Open: [{}], Closed: [{}]",
            frontier
                .iter()
                .map(|e| format!("{}({})", e.node, format_cost(e.key)))
                .collect::<Vec<_>>()
                .join(", "),
            closed
                .iter()
                .map(NodeId::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    debug!(expansions, "frontier exhausted");
    trace.error(format!("No path found from {start} to {goal}"));
    Ok(SearchOutcome::NotFound { expansions, closed })
}

fn describe_selection(strategy: SearchStrategy, entry: &FrontierEntry) -> String {
    match strategy {
        SearchStrategy::UniformCost => {
            format!("Select {} with g={}", entry.node, format_cost(entry.g))
        }
        SearchStrategy::Greedy => format!(
            "Select {} with h={} (actual cost {})",
            entry.node,
            format_cost(entry.h),
            format_cost(entry.g)
        ),
        SearchStrategy::AStar => format!(
            "Select {} with f={} (g={}, h={})",
            entry.node,
            format_cost(entry.key),
            format_cost(entry.g),
            format_cost(entry.h)
        ),
    }
}

fn describe_entry(strategy: SearchStrategy, entry: &FrontierEntry) -> String {
    match strategy {
        SearchStrategy::UniformCost => format!("{}(g={})", entry.node, format_cost(entry.g)),
        SearchStrategy::Greedy => format!("{}(h={})", entry.node, format_cost(entry.h)),
        SearchStrategy::AStar => format!(
            "{}(f={} = g={} + h={})",
            entry.node,
            format_cost(entry.key),
            format_cost(entry.g),
            format_cost(entry.h)
        ),
    }
}
