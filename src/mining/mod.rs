//! Frequent-itemset and association-rule mining.

pub mod apriori;

pub use apriori::{AprioriConfig, AprioriOutcome, AssociationRule, Itemset};
