//! CLI infrastructure for the algorithm visualizer
//!
//! Each subcommand reads plain-text inputs, streams the numbered step trace
//! and prints a summary of the result.

pub mod commands;
pub mod config;
pub mod output;
