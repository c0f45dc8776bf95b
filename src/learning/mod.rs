//! Supervised learners over small tables: ID3 decision trees, Naïve Bayes
//! and least-squares regression.

pub mod dataset;
pub mod decision_tree;
pub mod naive_bayes;
pub mod regression;

pub use dataset::{Dataset, Query, Row};
pub use decision_tree::{DecisionNode, DecisionTree, Prediction};
pub use naive_bayes::{NaiveBayesConfig, NaiveBayesModel, NaiveBayesPrediction};
pub use regression::{RegressionModel, RegressionOutcome};
