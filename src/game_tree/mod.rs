//! Adversarial game-tree evaluation: Minimax and Alpha-Beta
//!
//! Both algorithms walk the tree depth-first, children in declaration order.
//! Alpha-Beta additionally carries a search window and skips the remaining
//! children of a node once its running value falls outside the window.

mod tree;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use tree::{GameNode, GameTree, NodeKind, NodeSpec};

use crate::{
    Error, Result,
    identifiers::NodeId,
    trace::{Run, Trace},
    utils::{format_bound, format_value},
};

/// Game-tree algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameAlgorithm {
    Minimax,
    AlphaBeta,
}

impl GameAlgorithm {
    pub fn prunes(self) -> bool {
        matches!(self, GameAlgorithm::AlphaBeta)
    }

    pub fn name(self) -> &'static str {
        match self {
            GameAlgorithm::Minimax => "Minimax",
            GameAlgorithm::AlphaBeta => "Alpha-Beta Pruning",
        }
    }
}

impl fmt::Display for GameAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameAlgorithm::Minimax => f.write_str("minimax"),
            GameAlgorithm::AlphaBeta => f.write_str("alpha-beta"),
        }
    }
}

impl FromStr for GameAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(GameAlgorithm::Minimax),
            "alpha-beta" | "alphabeta" | "ab" => Ok(GameAlgorithm::AlphaBeta),
            other => Err(Error::InvalidConfiguration {
                message: format!("unknown game algorithm '{other}' (expected minimax or alpha-beta)"),
            }),
        }
    }
}

/// Value computed for one evaluated node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeValue {
    pub node: NodeId,
    pub value: f64,
}

/// Result of evaluating a game tree.
#[derive(Debug, Clone, Serialize)]
pub struct GameOutcome {
    pub algorithm: GameAlgorithm,
    pub root: NodeId,
    /// Backed-up value at the root
    pub value: f64,
    /// First root child whose value equals the root value
    pub best_move: Option<NodeId>,
    /// Children skipped by a cut, in cut order; empty for Minimax
    pub pruned: Vec<NodeId>,
    /// Nodes actually evaluated
    pub visited: usize,
    /// Nodes in the whole tree
    pub total: usize,
    /// Values of evaluated nodes in completion order
    pub values: Vec<NodeValue>,
}

impl GameOutcome {
    /// Nodes never evaluated because an ancestor subtree was cut.
    pub fn skipped(&self) -> usize {
        self.total - self.visited
    }

    pub fn value_of(&self, node: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|v| v.node == node)
            .map(|v| v.value)
    }
}

/// Evaluate a tree, collecting a fresh trace.
pub fn run(tree: &GameTree, algorithm: GameAlgorithm) -> Run<GameOutcome> {
    Trace::new().run(|trace| solve(tree, algorithm, trace))
}

/// Evaluate a tree, recording every step into `trace`.
///
/// # Examples
///
/// ```
/// use algoviz::game_tree::{self, GameAlgorithm, GameTree, NodeKind, NodeSpec};
/// use algoviz::trace::Trace;
///
/// let tree = GameTree::build(vec![
///     NodeSpec::new("A", NodeKind::Max, None),
///     NodeSpec::new("B", NodeKind::Min, Some("A")),
///     NodeSpec::new("C", NodeKind::Min, Some("A")),
///     NodeSpec::new("L1", NodeKind::Leaf(3.0), Some("B")),
///     NodeSpec::new("L2", NodeKind::Leaf(5.0), Some("B")),
///     NodeSpec::new("L3", NodeKind::Leaf(2.0), Some("C")),
///     NodeSpec::new("L4", NodeKind::Leaf(9.0), Some("C")),
/// ])?;
///
/// let mut trace = Trace::new();
/// let outcome = game_tree::solve(&tree, GameAlgorithm::AlphaBeta, &mut trace)?;
/// assert_eq!(outcome.value, 3.0);
/// assert_eq!(outcome.pruned, vec![algoviz::NodeId::from("L4")]);
/// # Ok::<(), algoviz::Error>(())
/// ```
pub fn solve(tree: &GameTree, algorithm: GameAlgorithm, trace: &mut Trace) -> Result<GameOutcome> {
    debug!(%algorithm, nodes = tree.len(), "evaluating game tree");
    trace.info(format!(
        "Starting {} at root {} ({} nodes)",
        algorithm.name(),
        tree.root_id(),
        tree.len()
    ));

    let mut walk = Walk {
        tree,
        pruning: algorithm.prunes(),
        trace: &mut *trace,
        visited: 0,
        pruned: Vec::new(),
        values: Vec::new(),
    };
    let value = walk.evaluate(tree.root(), f64::NEG_INFINITY, f64::INFINITY);
    let Walk {
        visited,
        pruned,
        values,
        ..
    } = walk;

    let root = tree.node(tree.root());
    let best_move = root
        .children
        .iter()
        .map(|&child| &tree.node(child).id)
        .find(|id| {
            values
                .iter()
                .any(|v| &v.node == *id && v.value == value)
        })
        .cloned();

    match &best_move {
        Some(best) => trace.success(format!(
            "Root {} value = {}, best move: {}",
            root.id,
            format_value(value),
            best
        )),
        None => trace.success(format!("Root {} value = {}", root.id, format_value(value))),
    };
    if algorithm.prunes() {
        trace.success(format!(
            "Visited {} of {} nodes, pruned {} branch(es)",
            visited,
            tree.len(),
            pruned.len()
        ));
    }
    debug!(value, visited, pruned = pruned.len(), "game tree evaluated");

    Ok(GameOutcome {
        algorithm,
        root: root.id.clone(),
        value,
        best_move,
        pruned,
        visited,
        total: tree.len(),
        values,
    })
}

/// Minimax and Alpha-Beta side by side on the same tree.
#[derive(Debug)]
pub struct Comparison {
    pub minimax: Run<GameOutcome>,
    pub alpha_beta: Run<GameOutcome>,
}

impl Comparison {
    /// Evaluations saved by pruning, if both runs succeeded.
    pub fn nodes_saved(&self) -> Option<usize> {
        let minimax = self.minimax.result.as_ref().ok()?;
        let alpha_beta = self.alpha_beta.result.as_ref().ok()?;
        Some(minimax.visited.saturating_sub(alpha_beta.visited))
    }
}

pub fn compare(tree: &GameTree) -> Comparison {
    compare_with(tree, |_| Trace::new())
}

/// Run Minimax then Alpha-Beta, each into the trace `make_trace` returns
/// for it.
pub fn compare_with(tree: &GameTree, mut make_trace: impl FnMut(GameAlgorithm) -> Trace) -> Comparison {
    let mut evaluate = |algorithm: GameAlgorithm| make_trace(algorithm).run(|trace| solve(tree, algorithm, trace));
    Comparison {
        minimax: evaluate(GameAlgorithm::Minimax),
        alpha_beta: evaluate(GameAlgorithm::AlphaBeta),
    }
}

/// Depth-first walk state shared by both algorithms.
struct Walk<'a, 't> {
    tree: &'a GameTree,
    pruning: bool,
    trace: &'t mut Trace,
    visited: usize,
    pruned: Vec<NodeId>,
    values: Vec<NodeValue>,
}

impl Walk<'_, '_> {
    fn evaluate(&mut self, idx: usize, mut alpha: f64, mut beta: f64) -> f64 {
        let tree = self.tree;
        let node = tree.node(idx);
        self.visited += 1;

        let maximizing = match node.kind {
            NodeKind::Leaf(value) => {
                self.trace
                    .info(format!("Leaf {} has value {}", node.id, format_value(value)));
                self.record(&node.id, value);
                return value;
            }
            NodeKind::Max => true,
            NodeKind::Min => false,
        };

        if self.pruning {
            self.trace.highlight(format!(
                "Visit {} ({}) with α = {}, β = {}",
                node.id,
                node.kind,
                format_bound(alpha),
                format_bound(beta)
            ));
        } else {
            self.trace
                .highlight(format!("Visit {} ({})", node.id, node.kind));
        }

        let mut value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for (pos, &child) in node.children.iter().enumerate() {
            let child_value = self.evaluate(child, alpha, beta);
            let improves = if maximizing {
                child_value > value
            } else {
                child_value < value
            };
            if improves {
                let op = if maximizing { "max" } else { "min" };
                self.trace.info(format!(
                    "{} {}: value = {}({}, {}) = {}",
                    node.kind,
                    node.id,
                    op,
                    format_bound(value),
                    format_value(child_value),
                    format_value(child_value)
                ));
                value = child_value;
            }

            if !self.pruning {
                continue;
            }
            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
            self.trace.info(format!(
                "After {}: α = {}, β = {} at {}",
                tree.node(child).id,
                format_bound(alpha),
                format_bound(beta),
                node.id
            ));

            let cut = if maximizing { value >= beta } else { value <= alpha };
            let rest = &node.children[pos + 1..];
            if cut && !rest.is_empty() {
                let skipped: Vec<NodeId> = rest.iter().map(|&c| tree.node(c).id.clone()).collect();
                let names: Vec<&str> = skipped.iter().map(NodeId::as_str).collect();
                self.trace.success(format!(
                    "Prune at {}: {} {} {}, skipping {}",
                    node.id,
                    format_value(value),
                    if maximizing { "≥ β =" } else { "≤ α =" },
                    format_bound(if maximizing { beta } else { alpha }),
                    names.join(", ")
                ));
                self.pruned.extend(skipped);
                break;
            }
        }

        self.trace.info(format!(
            "{} {} returns {}",
            node.kind,
            node.id,
            format_value(value)
        ));
        self.record(&node.id, value);
        value
    }

    fn record(&mut self, node: &NodeId, value: f64) {
        self.values.push(NodeValue {
            node: node.clone(),
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic_tree() -> GameTree {
        // Standard three-ply textbook example
        let specs = vec![
            NodeSpec::new("A", NodeKind::Max, None),
            NodeSpec::new("B", NodeKind::Min, Some("A")),
            NodeSpec::new("C", NodeKind::Min, Some("A")),
            NodeSpec::new("D", NodeKind::Min, Some("A")),
            NodeSpec::new("B1", NodeKind::Leaf(3.0), Some("B")),
            NodeSpec::new("B2", NodeKind::Leaf(12.0), Some("B")),
            NodeSpec::new("B3", NodeKind::Leaf(8.0), Some("B")),
            NodeSpec::new("C1", NodeKind::Leaf(2.0), Some("C")),
            NodeSpec::new("C2", NodeKind::Leaf(4.0), Some("C")),
            NodeSpec::new("C3", NodeKind::Leaf(6.0), Some("C")),
            NodeSpec::new("D1", NodeKind::Leaf(14.0), Some("D")),
            NodeSpec::new("D2", NodeKind::Leaf(5.0), Some("D")),
            NodeSpec::new("D3", NodeKind::Leaf(2.0), Some("D")),
        ];
        GameTree::build(specs).unwrap()
    }

    #[test]
    fn minimax_visits_every_node() {
        let tree = classic_tree();
        let outcome = run(&tree, GameAlgorithm::Minimax).result.unwrap();
        assert_eq!(outcome.value, 3.0);
        assert_eq!(outcome.visited, tree.len());
        assert!(outcome.pruned.is_empty());
        assert_eq!(outcome.best_move, Some(NodeId::from("B")));
        assert_eq!(outcome.value_of("C"), Some(2.0));
        assert_eq!(outcome.value_of("D"), Some(2.0));
    }

    #[test]
    fn alpha_beta_cuts_after_first_low_child() {
        let tree = classic_tree();
        let outcome = run(&tree, GameAlgorithm::AlphaBeta).result.unwrap();
        assert_eq!(outcome.value, 3.0);
        assert_eq!(outcome.pruned, vec![NodeId::from("C2"), NodeId::from("C3")]);
        assert_eq!(outcome.visited, tree.len() - 2);
        assert_eq!(outcome.skipped(), 2);
    }

    #[test]
    fn single_leaf_root() {
        let tree = GameTree::build(vec![NodeSpec::new("R", NodeKind::Leaf(7.0), None)]).unwrap();
        for algorithm in [GameAlgorithm::Minimax, GameAlgorithm::AlphaBeta] {
            let run = run(&tree, algorithm);
            let outcome = run.result.unwrap();
            assert_eq!(outcome.value, 7.0);
            assert_eq!(outcome.visited, 1);
            assert_eq!(outcome.best_move, None);
        }
    }

    #[test]
    fn minimax_trace_does_not_mention_bounds() {
        let tree = classic_tree();
        let run = run(&tree, GameAlgorithm::Minimax);
        assert!(run.trace.iter().all(|e| !e.message.contains('α')));
    }

    #[test]
    fn pruning_is_reported_as_success() {
        let tree = classic_tree();
        let run = run(&tree, GameAlgorithm::AlphaBeta);
        let prune = run
            .trace
            .iter()
            .find(|e| e.message.starts_with("Prune at C"))
            .unwrap();
        assert_eq!(prune.level, crate::trace::TraceLevel::Success);
        assert!(prune.message.ends_with("skipping C2, C3"));
    }

    #[test]
    fn comparison_counts_saved_nodes() {
        let comparison = compare(&classic_tree());
        assert_eq!(comparison.nodes_saved(), Some(2));
    }

    #[test]
    fn comparison_asks_for_one_trace_per_algorithm() {
        let mut requested = Vec::new();
        let comparison = compare_with(&classic_tree(), |algorithm| {
            requested.push(algorithm);
            Trace::new()
        });
        assert_eq!(requested, [GameAlgorithm::Minimax, GameAlgorithm::AlphaBeta]);
        assert_eq!(comparison.minimax.result.unwrap().algorithm, GameAlgorithm::Minimax);
        assert_eq!(comparison.alpha_beta.result.unwrap().algorithm, GameAlgorithm::AlphaBeta);
    }

    #[test]
    fn algorithm_names_parse() {
        assert_eq!("ab".parse::<GameAlgorithm>().unwrap(), GameAlgorithm::AlphaBeta);
        assert_eq!("Minimax".parse::<GameAlgorithm>().unwrap(), GameAlgorithm::Minimax);
        assert!("expectimax".parse::<GameAlgorithm>().is_err());
    }
}
