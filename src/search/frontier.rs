//! Priority frontier shared by the best-first search strategies

use serde::{Deserialize, Serialize};

use crate::identifiers::NodeId;

/// A discovered, not yet finalized node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontierEntry {
    pub node: NodeId,
    /// Nodes from the start up to and including `node`
    pub path: Vec<NodeId>,
    /// Accumulated cost from the start
    pub g: f64,
    /// Heuristic estimate for `node`
    pub h: f64,
    /// Ordering key chosen by the strategy
    pub key: f64,
}

/// Min-priority collection with arrival-order tie breaking.
///
/// Entries are kept in insertion order and selection scans for the smallest
/// key, taking the earliest entry on ties. Replacing an entry keeps its slot,
/// so a decrease-key does not lose the entry's seniority. Inputs are small,
/// the linear scan keeps the tie rule obvious.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    entries: Vec<FrontierEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: FrontierEntry) {
        self.entries.push(entry);
    }

    /// Remove and return the entry with the smallest key.
    pub fn pop_min(&mut self) -> Option<FrontierEntry> {
        let mut best: Option<usize> = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            match best {
                Some(b) if entry.key >= self.entries[b].key => {}
                _ => best = Some(idx),
            }
        }
        best.map(|idx| self.entries.remove(idx))
    }

    /// Slot of the entry for `node`, if it is on the frontier.
    pub fn position(&self, node: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.node.as_str() == node)
    }

    pub fn get(&self, idx: usize) -> Option<&FrontierEntry> {
        self.entries.get(idx)
    }

    /// Overwrite the entry in `idx`, keeping its position.
    pub fn replace(&mut self, idx: usize, entry: FrontierEntry) {
        if let Some(slot) = self.entries.get_mut(idx) {
            *slot = entry;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
