//! Step-traced implementations of classical AI algorithms
//!
//! This crate provides:
//! - Best-first graph search: Uniform Cost, Greedy Best-First and A*
//! - Game-tree evaluation with Minimax and Alpha-Beta pruning
//! - ID3 decision trees, categorical Naïve Bayes and linear regression
//! - K-Means clustering and Apriori association-rule mining
//! - Inheritance over semantic networks
//!
//! Every engine records a numbered [`trace::Trace`] of what it did, and
//! returns a plain result value alongside it.

pub mod cli;
pub mod clustering;
pub mod error;
pub mod game_tree;
pub mod identifiers;
pub mod input;
pub mod learning;
pub mod mining;
pub mod point;
pub mod ports;
pub mod search;
pub mod semantic;
pub mod trace;
pub mod utils;

pub use error::{Error, Result};
pub use identifiers::NodeId;
pub use point::Point;
pub use trace::{Run, Trace, TraceEntry, TraceLevel};
