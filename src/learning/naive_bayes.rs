//! Categorical Naïve Bayes
//!
//! Priors and per-class conditional frequencies are counted from the
//! training table. A feature value never seen with a class contributes the
//! configured smoothing constant instead of zero.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dataset::{Dataset, Query, class_counts, tally};
use crate::{
    Error, Result,
    trace::{Run, Trace},
    utils::{argmax_first, normalize_weights},
};

/// Probability substituted for unseen (feature = value | class) pairs.
pub const DEFAULT_SMOOTHING: f64 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesConfig {
    pub smoothing: f64,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

impl NaiveBayesConfig {
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("smoothing must be in (0, 1], got {}", self.smoothing),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassPrior {
    pub class: String,
    pub count: usize,
    pub probability: f64,
}

/// P(feature = value | class) as counted in training.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditional {
    pub feature: String,
    pub value: String,
    pub class: String,
    pub count: usize,
    pub class_count: usize,
    pub probability: f64,
}

/// Frequencies learned from a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct NaiveBayesModel {
    pub features: Vec<String>,
    pub priors: Vec<ClassPrior>,
    /// Every feature × observed value × class, features in header order
    pub conditionals: Vec<Conditional>,
}

impl NaiveBayesModel {
    pub fn train(dataset: &Dataset, trace: &mut Trace) -> Self {
        let total = dataset.len();
        trace.info(format!(
            "Training data: {} samples, {} features ({}), class: {}",
            total,
            dataset.features().len(),
            dataset.features().join(", "),
            dataset.class_label()
        ));

        trace.highlight("Prior probabilities P(class):");
        let priors: Vec<ClassPrior> = class_counts(dataset.rows())
            .into_iter()
            .map(|(class, count)| {
                let probability = count as f64 / total as f64;
                trace.info(format!("P({class}) = {count}/{total} = {probability:.4}"));
                ClassPrior {
                    class,
                    count,
                    probability,
                }
            })
            .collect();

        trace.highlight("Conditional probabilities P(feature = value | class):");
        let mut conditionals = Vec::new();
        for (feature_idx, feature) in dataset.features().iter().enumerate() {
            let values = tally(dataset.rows().iter().map(|r| r.value(feature_idx)));
            for (value, _) in &values {
                for prior in &priors {
                    let count = dataset
                        .rows()
                        .iter()
                        .filter(|r| r.class == prior.class && r.value(feature_idx) == value)
                        .count();
                    conditionals.push(Conditional {
                        feature: feature.clone(),
                        value: value.clone(),
                        class: prior.class.clone(),
                        count,
                        class_count: prior.count,
                        probability: count as f64 / prior.count as f64,
                    });
                }
            }
            trace.info(format!(
                "{}: {} value(s) × {} class(es)",
                feature,
                values.len(),
                priors.len()
            ));
        }

        Self {
            features: dataset.features().to_vec(),
            priors,
            conditionals,
        }
    }

    /// Counted P(feature = value | class); `None` for combinations never observed.
    pub fn conditional(&self, feature: &str, value: &str, class: &str) -> Option<&Conditional> {
        self.conditionals
            .iter()
            .find(|c| c.feature == feature && c.value == value && c.class == class && c.count > 0)
    }

    /// Score and classify `query`.
    pub fn predict(
        &self,
        query: &Query,
        config: &NaiveBayesConfig,
        trace: &mut Trace,
    ) -> Result<NaiveBayesPrediction> {
        config.validate()?;
        if let Some((feature, _)) = query.iter().find(|(f, _)| !self.features.iter().any(|k| k == f)) {
            return Err(Error::UnknownFeature {
                feature: feature.to_string(),
            });
        }

        trace.highlight(format!("Predict for {query}"));
        let mut scores = Vec::with_capacity(self.priors.len());
        for prior in &self.priors {
            trace.info(format!("Class {}: P({}) = {:.4}", prior.class, prior.class, prior.probability));
            let mut score = prior.probability;
            let mut factors = Vec::with_capacity(query.len());
            for (feature, value) in query.iter() {
                let (probability, smoothed) = match self.conditional(feature, value, &prior.class) {
                    Some(c) => (c.probability, false),
                    None => (config.smoothing, true),
                };
                trace.info(format!(
                    "P({feature}={value}|{}) = {probability:.4}{}",
                    prior.class,
                    if smoothed { " (unseen, smoothed)" } else { "" }
                ));
                score *= probability;
                factors.push(Likelihood {
                    feature: feature.to_string(),
                    value: value.to_string(),
                    probability,
                    smoothed,
                });
            }
            trace.info(format!("Score({}) ∝ {score:.4e}", prior.class));
            scores.push(ClassScore {
                class: prior.class.clone(),
                prior: prior.probability,
                likelihoods: factors,
                score,
                probability: 0.0,
            });
        }

        let normalized = normalize_weights(scores.iter().map(|s| s.score)).ok_or(Error::DegenerateScores)?;
        for (score, probability) in scores.iter_mut().zip(normalized) {
            score.probability = probability;
        }
        let best = argmax_first(scores.iter().map(|s| s.score)).ok_or(Error::EmptyDataset)?;
        let predicted = scores[best].class.clone();
        debug!(class = %predicted, probability = scores[best].probability, "naive bayes prediction");
        trace.success(format!(
            "Prediction: {} ({:.2}%)",
            predicted,
            scores[best].probability * 100.0
        ));

        Ok(NaiveBayesPrediction { scores, predicted })
    }
}

/// One factor of a class score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Likelihood {
    pub feature: String,
    pub value: String,
    pub probability: f64,
    pub smoothed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassScore {
    pub class: String,
    pub prior: f64,
    pub likelihoods: Vec<Likelihood>,
    /// Unnormalized prior × likelihoods
    pub score: f64,
    /// Score share across all classes
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaiveBayesPrediction {
    /// One entry per class, in first-seen class order
    pub scores: Vec<ClassScore>,
    pub predicted: String,
}

impl NaiveBayesPrediction {
    pub fn probability_of(&self, class: &str) -> Option<f64> {
        self.scores.iter().find(|s| s.class == class).map(|s| s.probability)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NaiveBayesOutcome {
    pub model: NaiveBayesModel,
    pub prediction: NaiveBayesPrediction,
}

/// Train on `dataset` and classify `query`.
pub fn solve(
    dataset: &Dataset,
    query: &Query,
    config: &NaiveBayesConfig,
    trace: &mut Trace,
) -> Result<NaiveBayesOutcome> {
    let model = NaiveBayesModel::train(dataset, trace);
    let prediction = model.predict(query, config, trace)?;
    Ok(NaiveBayesOutcome { model, prediction })
}

pub fn run(dataset: &Dataset, query: &Query, config: &NaiveBayesConfig) -> Run<NaiveBayesOutcome> {
    Trace::new().run(|trace| solve(dataset, query, config, trace))
}
