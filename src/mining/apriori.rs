//! Apriori frequent itemsets and association rules
//!
//! Level k candidates are unions of two frequent (k-1)-itemsets that grow by
//! exactly one item. A candidate with an infrequent (k-1)-subset is dropped
//! before its support is counted.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    trace::{Run, Trace},
};

/// Thresholds as fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AprioriConfig {
    pub min_support: f64,
    pub min_confidence: f64,
}

impl AprioriConfig {
    pub fn new(min_support: f64, min_confidence: f64) -> Self {
        Self {
            min_support,
            min_confidence,
        }
    }

    /// Thresholds given as percentages, e.g. `40.0` for 40%.
    pub fn from_percent(min_support: f64, min_confidence: f64) -> Self {
        Self::new(min_support / 100.0, min_confidence / 100.0)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("min_support", self.min_support),
            ("min_confidence", self.min_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be between 0 and 1, got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for AprioriConfig {
    fn default() -> Self {
        Self::new(0.5, 0.7)
    }
}

/// A frequent itemset with its absolute and relative support.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itemset {
    /// Items in first-seen item order
    pub items: Vec<String>,
    pub count: usize,
    pub support: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationRule {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

impl std::fmt::Display for AssociationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}} → {{{}}}",
            self.antecedent.join(", "),
            self.consequent.join(", ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AprioriOutcome {
    pub transactions: usize,
    /// Distinct items in first-seen order
    pub items: Vec<String>,
    /// Frequent itemsets, level by level
    pub frequent: Vec<Itemset>,
    /// Sorted by descending confidence; equal confidences keep discovery order
    pub rules: Vec<AssociationRule>,
}

impl AprioriOutcome {
    /// Support of a frequent itemset, item order ignored.
    pub fn support_of(&self, items: &[&str]) -> Option<f64> {
        self.frequent
            .iter()
            .find(|set| {
                set.items.len() == items.len()
                    && items.iter().all(|i| set.items.iter().any(|s| s == i))
            })
            .map(|set| set.support)
    }
}

/// Item ids sorted ascending.
type Key = Vec<usize>;

struct Baskets {
    items: Vec<String>,
    transactions: Vec<HashSet<usize>>,
}

impl Baskets {
    fn new(transactions: &[Vec<String>]) -> Self {
        let mut items: Vec<String> = Vec::new();
        let mut ids: HashMap<String, usize> = HashMap::new();
        let transactions = transactions
            .iter()
            .map(|basket| {
                basket
                    .iter()
                    .map(|item| item.trim())
                    .filter(|item| !item.is_empty())
                    .map(|item| {
                        *ids.entry(item.to_string()).or_insert_with(|| {
                            items.push(item.to_string());
                            items.len() - 1
                        })
                    })
                    .collect::<HashSet<usize>>()
            })
            .collect();
        Self {
            items,
            transactions,
        }
    }

    fn count(&self, key: &[usize]) -> usize {
        self.transactions
            .iter()
            .filter(|basket| key.iter().all(|item| basket.contains(item)))
            .count()
    }

    fn names(&self, key: &[usize]) -> Vec<String> {
        key.iter().map(|&id| self.items[id].clone()).collect()
    }

    fn label(&self, key: &[usize]) -> String {
        format!("{{{}}}", self.names(key).join(", "))
    }
}

pub fn run(transactions: &[Vec<String>], config: &AprioriConfig) -> Run<AprioriOutcome> {
    Trace::new().run(|trace| solve(transactions, config, trace))
}

/// Mine frequent itemsets and rules from `transactions`.
///
/// # Examples
///
/// ```
/// use algoviz::{mining::{AprioriConfig, apriori}, trace::Trace};
///
/// let baskets: Vec<Vec<String>> = vec![
///     vec!["bread".into(), "milk".into()],
///     vec!["bread".into(), "butter".into()],
///     vec!["bread".into(), "milk".into(), "butter".into()],
/// ];
/// let outcome = apriori::solve(&baskets, &AprioriConfig::new(0.6, 0.6), &mut Trace::new())?;
/// assert_eq!(outcome.support_of(&["bread"]), Some(1.0));
/// assert_eq!(outcome.rules[0].to_string(), "{milk} → {bread}");
/// # Ok::<(), algoviz::Error>(())
/// ```
pub fn solve(transactions: &[Vec<String>], config: &AprioriConfig, trace: &mut Trace) -> Result<AprioriOutcome> {
    config.validate()?;
    if transactions.is_empty() {
        return Err(Error::EmptyDataset);
    }
    let baskets = Baskets::new(transactions);
    let total = transactions.len();
    trace.info(format!("Starting Apriori with {total} transactions"));
    trace.info(format!(
        "Min support = {:.0}%, min confidence = {:.0}%",
        config.min_support * 100.0,
        config.min_confidence * 100.0
    ));
    trace.info(format!(
        "Found {} items: {}",
        baskets.items.len(),
        baskets.items.join(", ")
    ));

    let support = |count: usize| count as f64 / total as f64;
    let mut counts: HashMap<Key, usize> = HashMap::new();
    let mut frequent: Vec<Key> = Vec::new();
    let mut candidates: Vec<Key> = (0..baskets.items.len()).map(|id| vec![id]).collect();
    let mut size = 1;

    while !candidates.is_empty() {
        trace.highlight(format!("Frequent {size}-itemsets"));
        let mut level = Vec::new();
        for key in candidates {
            let count = baskets.count(&key);
            let s = support(count);
            // Zero-count itemsets never qualify, even with a zero threshold
            if count > 0 && s >= config.min_support {
                trace.info(format!("{}: support = {:.1}% ✓", baskets.label(&key), s * 100.0));
                counts.insert(key.clone(), count);
                level.push(key);
            } else {
                trace.info(format!(
                    "{}: support = {:.1}% ✗ (removed)",
                    baskets.label(&key),
                    s * 100.0
                ));
            }
        }
        trace.info(format!("Found {} frequent {size}-itemset(s)", level.len()));
        debug!(size, frequent = level.len(), "apriori level");

        candidates = next_candidates(&level, &counts, &baskets, trace);
        frequent.extend(level);
        size += 1;
    }
    trace.success(format!("{} frequent itemset(s) in total", frequent.len()));

    trace.highlight("Association rules");
    let mut rules = Vec::new();
    for key in frequent.iter().filter(|key| key.len() >= 2) {
        let itemset_count = counts.get(key).copied().unwrap_or_else(|| baskets.count(key));
        let n = key.len();
        for mask in 1..(1u64 << n) - 1 {
            let (antecedent, consequent): (Key, Key) =
                (0..n).map(|bit| (bit, key[bit])).fold((Vec::new(), Vec::new()), |(mut a, mut c), (bit, id)| {
                    if mask & (1 << bit) != 0 {
                        a.push(id);
                    } else {
                        c.push(id);
                    }
                    (a, c)
                });
            let antecedent_count = counts
                .get(&antecedent)
                .copied()
                .unwrap_or_else(|| baskets.count(&antecedent));
            let consequent_count = counts
                .get(&consequent)
                .copied()
                .unwrap_or_else(|| baskets.count(&consequent));
            if antecedent_count == 0 || consequent_count == 0 {
                continue;
            }
            let confidence = itemset_count as f64 / antecedent_count as f64;
            if confidence < config.min_confidence {
                continue;
            }
            let lift = confidence / support(consequent_count);
            let rule = AssociationRule {
                antecedent: baskets.names(&antecedent),
                consequent: baskets.names(&consequent),
                support: support(itemset_count),
                confidence,
                lift,
            };
            trace.info(format!(
                "{rule}: confidence = {:.1}%, lift = {lift:.2} ✓",
                confidence * 100.0
            ));
            rules.push(rule);
        }
    }
    rules.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    trace.success(format!("Found {} association rule(s)", rules.len()));

    let frequent = frequent
        .iter()
        .map(|key| {
            let count = counts.get(key).copied().unwrap_or_default();
            Itemset {
                items: baskets.names(key),
                count,
                support: support(count),
            }
        })
        .collect();

    Ok(AprioriOutcome {
        transactions: total,
        items: baskets.items,
        frequent,
        rules,
    })
}

/// Join frequent itemsets of one level into candidates one item larger,
/// dropping any candidate with an infrequent subset.
fn next_candidates(
    level: &[Key],
    counts: &HashMap<Key, usize>,
    baskets: &Baskets,
    trace: &mut Trace,
) -> Vec<Key> {
    let Some(size) = level.first().map(Vec::len) else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for (i, a) in level.iter().enumerate() {
        for b in &level[i + 1..] {
            let mut union: Key = a.iter().chain(b).copied().collect();
            union.sort_unstable();
            union.dedup();
            if union.len() != size + 1 || !seen.insert(union.clone()) {
                continue;
            }
            let infrequent = (0..union.len()).find_map(|skip| {
                let subset: Key = union
                    .iter()
                    .enumerate()
                    .filter(|&(idx, _)| idx != skip)
                    .map(|(_, &id)| id)
                    .collect();
                (!counts.contains_key(&subset)).then_some(subset)
            });
            match infrequent {
                Some(subset) => {
                    trace.info(format!(
                        "Prune candidate {}: subset {} is not frequent",
                        baskets.label(&union),
                        baskets.label(&subset)
                    ));
                }
                None => candidates.push(union),
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baskets(raw: &[&str]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|line| line.split(',').map(|s| s.trim().to_string()).collect())
            .collect()
    }

    fn groceries() -> Vec<Vec<String>> {
        baskets(&[
            "Milk, Bread, Butter",
            "Bread, Butter",
            "Milk, Bread",
            "Milk, Butter",
            "Bread, Butter, Jam",
        ])
    }

    #[test]
    fn counts_supports_and_keeps_first_seen_items() {
        let outcome = run(&groceries(), &AprioriConfig::new(0.4, 0.6)).result.unwrap();
        assert_eq!(outcome.items, ["Milk", "Bread", "Butter", "Jam"]);
        assert_eq!(outcome.support_of(&["Bread"]), Some(0.8));
        assert_eq!(outcome.support_of(&["Butter", "Bread"]), Some(0.6));
        assert_eq!(outcome.support_of(&["Jam"]), None);
        let pair = outcome
            .frequent
            .iter()
            .find(|s| s.items == ["Bread", "Butter"])
            .unwrap();
        assert_eq!(pair.count, 3);
    }

    #[test]
    fn rules_respect_confidence_and_order() {
        let outcome = run(&groceries(), &AprioriConfig::new(0.4, 0.6)).result.unwrap();
        assert!(!outcome.rules.is_empty());
        assert!(outcome.rules.iter().all(|r| r.confidence >= 0.6));
        assert!(outcome.rules.windows(2).all(|w| w[0].confidence >= w[1].confidence));
        let rule = outcome
            .rules
            .iter()
            .find(|r| r.antecedent == ["Butter"] && r.consequent == ["Bread"])
            .unwrap();
        assert!((rule.confidence - 0.75).abs() < 1e-12);
        assert!((rule.lift - 0.75 / 0.8).abs() < 1e-12);
    }

    #[test]
    fn infrequent_subset_prunes_candidate() {
        // {a,b} and {a,c} are frequent but {b,c} is not
        let data = baskets(&["a, b", "a, b", "a, c", "a, c", "b, c"]);
        let run = run(&data, &AprioriConfig::new(0.4, 0.0));
        let outcome = run.result.unwrap();
        assert_eq!(outcome.support_of(&["b", "c"]), None);
        assert!(outcome.frequent.iter().all(|s| s.items.len() <= 2));
        assert!(run.trace.iter().all(|e| e.message != "Frequent 3-itemsets"));
    }

    #[test]
    fn downward_closure_is_traced() {
        let data = baskets(&["a, b, c", "a, b", "a, c", "b, d"]);
        let run = run(&data, &AprioriConfig::new(0.5, 0.0));
        assert!(run.result.is_ok());
        assert!(
            run.trace
                .iter()
                .any(|e| e.message == "Prune candidate {a, b, c}: subset {b, c} is not frequent")
        );
    }

    #[test]
    fn duplicate_items_count_once() {
        let data = baskets(&["x, x", "y"]);
        let outcome = run(&data, &AprioriConfig::new(0.5, 0.5)).result.unwrap();
        assert_eq!(outcome.support_of(&["x"]), Some(0.5));
    }

    #[test]
    fn zero_support_threshold_ignores_absent_itemsets() {
        let data = baskets(&["a", "b", "c"]);
        let run = run(&data, &AprioriConfig::new(0.0, 0.5));
        let outcome = run.result.unwrap();
        assert_eq!(outcome.frequent.len(), 3);
        assert!(outcome.frequent.iter().all(|s| s.count > 0));
        assert_eq!(outcome.support_of(&["a", "b"]), None);
        assert!(outcome.rules.is_empty());
        assert!(run.trace.iter().any(|e| e.message == "{a, b}: support = 0.0% ✗ (removed)"));
    }

    #[test]
    fn zero_support_threshold_keeps_rules_finite() {
        let data = baskets(&["a, b", "a, b", "c", "a, c"]);
        let outcome = run(&data, &AprioriConfig::new(0.0, 0.5)).result.unwrap();
        assert!(!outcome.rules.is_empty());
        assert!(
            outcome
                .rules
                .iter()
                .all(|r| r.confidence.is_finite() && r.lift.is_finite() && r.confidence >= 0.5)
        );
        assert_eq!(outcome.support_of(&["a", "b", "c"]), None);
    }

    #[test]
    fn rejects_bad_thresholds_and_empty_input() {
        assert!(run(&groceries(), &AprioriConfig::new(1.5, 0.5)).result.is_err());
        assert!(matches!(
            run(&[], &AprioriConfig::default()).result,
            Err(Error::EmptyDataset)
        ));
    }
}
