//! ID3 decision trees
//!
//! The builder picks, at every node, the remaining feature with the highest
//! information gain and partitions the rows by that feature's observed values.

use serde::Serialize;
use tracing::debug;

use super::dataset::{Dataset, Query, Row, class_counts};
use crate::{
    Result,
    trace::{Run, Trace},
    utils::entropy_from_counts,
};

/// Class reported when a query leaves the tree.
pub const UNKNOWN_CLASS: &str = "Unknown";

/// A node of a learned tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DecisionNode {
    Leaf {
        class: String,
        samples: usize,
    },
    Split {
        feature: String,
        samples: usize,
        /// Branches in first-seen value order
        branches: Vec<Branch>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub value: String,
    pub node: DecisionNode,
}

impl DecisionNode {
    pub fn samples(&self) -> usize {
        match self {
            DecisionNode::Leaf { samples, .. } | DecisionNode::Split { samples, .. } => *samples,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, DecisionNode::Leaf { .. })
    }

    /// Longest root-to-leaf edge count.
    pub fn depth(&self) -> usize {
        match self {
            DecisionNode::Leaf { .. } => 0,
            DecisionNode::Split { branches, .. } => {
                1 + branches.iter().map(|b| b.node.depth()).max().unwrap_or(0)
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            DecisionNode::Leaf { .. } => 1,
            DecisionNode::Split { branches, .. } => branches.iter().map(|b| b.node.leaf_count()).sum(),
        }
    }

    fn child(&self, value: &str) -> Option<&DecisionNode> {
        match self {
            DecisionNode::Leaf { .. } => None,
            DecisionNode::Split { branches, .. } => {
                branches.iter().find(|b| b.value == value).map(|b| &b.node)
            }
        }
    }
}

/// One `feature=value` test taken while classifying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureTest {
    pub feature: String,
    /// `None` when the query did not mention the feature
    pub value: Option<String>,
}

/// Classification of a query against a tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Prediction {
    Class { class: String, path: Vec<FeatureTest> },
    /// The query reached a value with no branch, or omitted a split feature
    Unknown { path: Vec<FeatureTest> },
}

impl Prediction {
    /// Predicted class, or `"Unknown"`.
    pub fn label(&self) -> &str {
        match self {
            Prediction::Class { class, .. } => class,
            Prediction::Unknown { .. } => UNKNOWN_CLASS,
        }
    }

    pub fn path(&self) -> &[FeatureTest] {
        match self {
            Prediction::Class { path, .. } | Prediction::Unknown { path } => path,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Prediction::Class { .. })
    }
}

/// A learned tree together with the schema it was trained on.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionTree {
    pub class_label: String,
    pub root: DecisionNode,
}

impl DecisionTree {
    /// Learn a tree from `dataset`, tracing every gain computation.
    pub fn build(dataset: &Dataset, trace: &mut Trace) -> Self {
        trace.info(format!(
            "Building decision tree from {} samples, features: {}, class: {}",
            dataset.len(),
            dataset.features().join(", "),
            dataset.class_label()
        ));
        let rows: Vec<&Row> = dataset.rows().iter().collect();
        let features: Vec<usize> = (0..dataset.features().len()).collect();
        let root = grow(dataset, &rows, &features, trace);
        debug!(depth = root.depth(), leaves = root.leaf_count(), "decision tree built");
        trace.success(format!(
            "Decision tree complete: depth {}, {} leaves",
            root.depth(),
            root.leaf_count()
        ));
        Self {
            class_label: dataset.class_label().to_string(),
            root,
        }
    }

    /// Walk the tree with `query`. Missing branches yield `Unknown`.
    pub fn predict(&self, query: &Query, trace: &mut Trace) -> Prediction {
        trace.highlight(format!("Predict for {query}"));
        let mut path = Vec::new();
        let mut node = &self.root;
        loop {
            let feature = match node {
                DecisionNode::Leaf { class, .. } => {
                    trace.success(format!("Prediction: {} = {}", self.class_label, class));
                    return Prediction::Class {
                        class: class.clone(),
                        path,
                    };
                }
                DecisionNode::Split { feature, .. } => feature,
            };

            let Some(value) = query.get(feature) else {
                trace.info(format!("Test {feature}: query has no value"));
                path.push(FeatureTest {
                    feature: feature.clone(),
                    value: None,
                });
                trace.error(format!("No value for {feature}; prediction {UNKNOWN_CLASS}"));
                return Prediction::Unknown { path };
            };

            trace.info(format!("Test {feature} = {value}"));
            path.push(FeatureTest {
                feature: feature.clone(),
                value: Some(value.to_string()),
            });
            match node.child(value) {
                Some(child) => node = child,
                None => {
                    trace.error(format!(
                        "Value {value} of {feature} was not seen in training; prediction {UNKNOWN_CLASS}"
                    ));
                    return Prediction::Unknown { path };
                }
            }
        }
    }
}

/// Entropy in bits of the class distribution of `rows`.
pub fn entropy(rows: &[&Row]) -> f64 {
    entropy_from_counts(class_counts(rows.iter().copied()).into_iter().map(|(_, c)| c))
}

/// Information gain of partitioning `rows` by the feature at `feature`.
///
/// # Examples
///
/// ```
/// use algoviz::learning::{Dataset, decision_tree::information_gain};
///
/// let data = Dataset::new(
///     vec!["Wind".into(), "Play".into()],
///     vec![
///         vec!["Weak".into(), "Yes".into()],
///         vec!["Strong".into(), "No".into()],
///     ],
/// )?;
/// let rows: Vec<_> = data.rows().iter().collect();
/// assert!((information_gain(&rows, 0) - 1.0).abs() < 1e-12);
/// # Ok::<(), algoviz::Error>(())
/// ```
pub fn information_gain(rows: &[&Row], feature: usize) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let total = rows.len() as f64;
    let weighted: f64 = partition(rows, feature)
        .iter()
        .map(|(_, subset)| subset.len() as f64 / total * entropy(subset))
        .sum();
    // clamp rounding residue
    (entropy(rows) - weighted).max(0.0)
}

/// Rows grouped by the value of `feature`, groups in first-seen order.
fn partition<'a>(rows: &[&'a Row], feature: usize) -> Vec<(String, Vec<&'a Row>)> {
    let mut groups: Vec<(String, Vec<&'a Row>)> = Vec::new();
    for &row in rows {
        let value = row.value(feature);
        match groups.iter_mut().find(|(v, _)| v == value) {
            Some((_, group)) => group.push(row),
            None => groups.push((value.to_string(), vec![row])),
        }
    }
    groups
}

fn grow(dataset: &Dataset, rows: &[&Row], features: &[usize], trace: &mut Trace) -> DecisionNode {
    let counts = class_counts(rows.iter().copied());
    if let [(class, _)] = counts.as_slice() {
        trace.info(format!("All {} samples are {}; leaf {}", rows.len(), class, class));
        return DecisionNode::Leaf {
            class: class.clone(),
            samples: rows.len(),
        };
    }

    if features.is_empty() {
        let mut majority: Option<&(String, usize)> = None;
        for entry in &counts {
            if majority.is_none_or(|best| entry.1 > best.1) {
                majority = Some(entry);
            }
        }
        let class = majority.map(|(c, _)| c.clone()).unwrap_or_default();
        trace.info(format!("No features left; majority class {class}"));
        return DecisionNode::Leaf {
            class,
            samples: rows.len(),
        };
    }

    let names: Vec<&str> = features
        .iter()
        .map(|&f| dataset.features()[f].as_str())
        .collect();
    trace.info(format!(
        "Computing information gain over {} samples for: {}",
        rows.len(),
        names.join(", ")
    ));

    let mut chosen = features[0];
    let mut gain = f64::NEG_INFINITY;
    for &feature in features {
        let candidate = information_gain(rows, feature);
        trace.info(format!("IG({}) = {:.4}", dataset.features()[feature], candidate));
        if candidate > gain {
            gain = candidate;
            chosen = feature;
        }
    }
    let feature_name = dataset.features()[chosen].clone();
    trace.highlight(format!("Split on {feature_name} (IG = {gain:.4})"));

    let remaining: Vec<usize> = features.iter().copied().filter(|&f| f != chosen).collect();
    let branches = partition(rows, chosen)
        .into_iter()
        .map(|(value, subset)| {
            trace.info(format!("Branch {feature_name} = {value} ({} samples)", subset.len()));
            Branch {
                node: grow(dataset, &subset, &remaining, trace),
                value,
            }
        })
        .collect();

    DecisionNode::Split {
        feature: feature_name,
        samples: rows.len(),
        branches,
    }
}

/// Learned tree plus the optional prediction.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionTreeOutcome {
    pub tree: DecisionTree,
    pub prediction: Option<Prediction>,
}

/// Build a tree and, when a query is given, classify it.
pub fn solve(dataset: &Dataset, query: Option<&Query>, trace: &mut Trace) -> Result<DecisionTreeOutcome> {
    let tree = DecisionTree::build(dataset, trace);
    let prediction = query.map(|q| tree.predict(q, trace));
    Ok(DecisionTreeOutcome { tree, prediction })
}

pub fn run(dataset: &Dataset, query: Option<&Query>) -> Run<DecisionTreeOutcome> {
    Trace::new().run(|trace| solve(dataset, query, trace))
}
