//! Subcommands, one per algorithm family

use std::path::Path;

use anyhow::Result;

use crate::{
    input::{parse_query, read_input},
    learning::Query,
};

pub mod apriori;
pub mod decision_tree;
pub mod game;
pub mod kmeans;
pub mod naive_bayes;
pub mod regression;
pub mod search;
pub mod semantic;

/// Merge a query file with inline `feature=value` assignments; inline wins.
pub(crate) fn load_query(path: Option<&Path>, assignments: &[String]) -> Result<Query> {
    let mut query = match path {
        Some(path) => parse_query(&read_input(path)?)?,
        None => Query::new(),
    };
    let inline = parse_query(&assignments.join("\n"))?;
    for (feature, value) in inline.iter() {
        query.insert(feature, value);
    }
    Ok(query)
}
