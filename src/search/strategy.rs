//! Frontier ordering policies

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Which best-first search to run. The variants differ only in the frontier
/// key and in whether a cheaper rediscovery may update a frontier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// f(n) = g(n)
    UniformCost,
    /// f(n) = h(n); cost-so-far is tracked but never orders the frontier
    Greedy,
    /// f(n) = g(n) + h(n)
    AStar,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 3] = [
        SearchStrategy::UniformCost,
        SearchStrategy::Greedy,
        SearchStrategy::AStar,
    ];

    /// Frontier key for a node reached at cost `g` with estimate `h`.
    pub fn key(self, g: f64, h: f64) -> f64 {
        match self {
            SearchStrategy::UniformCost => g,
            SearchStrategy::Greedy => h,
            SearchStrategy::AStar => g + h,
        }
    }

    /// Whether a cheaper path to a node already on the frontier replaces it.
    /// Greedy keeps the first-seen entry.
    pub fn updates_frontier(self) -> bool {
        !matches!(self, SearchStrategy::Greedy)
    }

    pub fn name(self) -> &'static str {
        match self {
            SearchStrategy::UniformCost => "Uniform Cost Search",
            SearchStrategy::Greedy => "Greedy Best-First Search",
            SearchStrategy::AStar => "A* Search",
        }
    }

    pub fn formula(self) -> &'static str {
        match self {
            SearchStrategy::UniformCost => "f(n) = g(n) (cost so far only)",
            SearchStrategy::Greedy => "f(n) = h(n) (heuristic only)",
            SearchStrategy::AStar => "f(n) = g(n) + h(n)",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SearchStrategy::UniformCost => "ucs",
            SearchStrategy::Greedy => "greedy",
            SearchStrategy::AStar => "astar",
        };
        f.write_str(label)
    }
}

impl FromStr for SearchStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ucs" | "uniform-cost" | "uniform" => Ok(SearchStrategy::UniformCost),
            "greedy" | "gbfs" | "best-first" => Ok(SearchStrategy::Greedy),
            "astar" | "a*" | "a-star" => Ok(SearchStrategy::AStar),
            other => Err(Error::InvalidConfiguration {
                message: format!("unknown search strategy '{other}' (expected ucs, greedy or astar)"),
            }),
        }
    }
}
