//! Unsupervised partitioning of planar points.

pub mod kmeans;

pub use kmeans::{Iteration, KMeansConfig, KMeansOutcome};
