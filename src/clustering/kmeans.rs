//! K-Means clustering (Lloyd's algorithm)

use rand::{Rng, SeedableRng, rngs::StdRng, seq::index};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    point::Point,
    trace::{Run, Trace},
};

/// Centroid movement below which a centroid counts as settled.
pub const DEFAULT_EPSILON: f64 = 0.001;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Configuration for a K-Means run.
///
/// # Examples
///
/// ```
/// use algoviz::clustering::KMeansConfig;
///
/// let config = KMeansConfig::new(3).with_max_iterations(20).with_seed(42);
/// assert!(config.validate(10).is_ok());
/// assert!(config.validate(2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,
    pub max_iterations: usize,
    pub epsilon: f64,
    /// Seed for centroid initialization; `None` draws a fresh seed
    pub seed: Option<u64>,
}

impl KMeansConfig {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            epsilon: DEFAULT_EPSILON,
            seed: None,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration against a data set of `points` points.
    pub fn validate(&self, points: usize) -> Result<()> {
        if self.k == 0 || self.k > points {
            return Err(Error::InvalidClusterCount { k: self.k, points });
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_iterations must be at least 1".to_string(),
            });
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("epsilon must be finite and non-negative, got {}", self.epsilon),
            });
        }
        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        }
    }
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Snapshot after one assign/update round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Iteration {
    /// 1-based
    pub number: usize,
    /// Centroids after the update step
    pub centroids: Vec<Point>,
    /// Point indices per cluster from the assignment step
    pub clusters: Vec<Vec<usize>>,
    /// Assignment scored against the updated centroids
    pub wcss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KMeansOutcome {
    pub initial_centroids: Vec<Point>,
    pub centroids: Vec<Point>,
    pub clusters: Vec<Vec<usize>>,
    /// Cluster index of each point
    pub assignments: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
    pub wcss: f64,
    pub history: Vec<Iteration>,
}

impl KMeansOutcome {
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }
}

/// Cluster with a fresh trace.
pub fn run(points: &[Point], config: &KMeansConfig) -> Run<KMeansOutcome> {
    Trace::new().run(|trace| solve(points, config, trace))
}

/// Cluster `points`, seeding from the configured seed.
pub fn solve(points: &[Point], config: &KMeansConfig, trace: &mut Trace) -> Result<KMeansOutcome> {
    let mut rng = config.rng();
    solve_with_rng(points, config, &mut rng, trace)
}

/// Cluster `points` drawing the initial centroids from `rng`.
pub fn solve_with_rng<R: Rng + ?Sized>(
    points: &[Point],
    config: &KMeansConfig,
    rng: &mut R,
    trace: &mut Trace,
) -> Result<KMeansOutcome> {
    config.validate(points.len())?;
    let k = config.k;
    trace.info(format!("Starting K-Means with {} points, K = {}", points.len(), k));

    let mut centroids: Vec<Point> = index::sample(rng, points.len(), k)
        .into_iter()
        .map(|idx| points[idx])
        .collect();
    let initial_centroids = centroids.clone();
    trace.info(format!("Initial centroids: {}", describe(&centroids)));

    let mut history = Vec::new();
    let mut assignments = vec![0; points.len()];
    let mut converged = false;

    while history.len() < config.max_iterations && !converged {
        let number = history.len() + 1;
        trace.highlight(format!("Iteration {number}"));

        assignments = assign(points, &centroids);
        let clusters = group(&assignments, k);
        let sizes: Vec<String> = clusters
            .iter()
            .enumerate()
            .map(|(i, c)| format!("C{}: {} point(s)", i + 1, c.len()))
            .collect();
        trace.info(format!("Assign points: {}", sizes.join(", ")));

        let mut moved = false;
        let updated: Vec<Point> = clusters
            .iter()
            .zip(&centroids)
            .map(|(members, &old)| {
                if members.is_empty() {
                    return old;
                }
                let n = members.len() as f64;
                let (sx, sy) = members
                    .iter()
                    .fold((0.0, 0.0), |(sx, sy), &i| (sx + points[i].x, sy + points[i].y));
                let centroid = Point::new(sx / n, sy / n);
                if centroid.distance(old) > config.epsilon {
                    moved = true;
                }
                centroid
            })
            .collect();
        trace.info(format!("Update centroids: {}", describe(&updated)));

        let wcss = wcss(points, &assignments, &updated);
        trace.info(format!("WCSS = {wcss:.4}"));
        debug!(iteration = number, wcss, moved, "k-means iteration");

        centroids = updated;
        history.push(Iteration {
            number,
            centroids: centroids.clone(),
            clusters,
            wcss,
        });

        if !moved {
            converged = true;
            trace.success("Converged: no centroid moved");
        }
    }

    if !converged {
        trace.info(format!(
            "Stopped after {} iteration(s) without converging",
            history.len()
        ));
    }

    let clusters = group(&assignments, k);
    let wcss = wcss(points, &assignments, &centroids);
    trace.success(format!(
        "Done in {} iteration(s), WCSS = {:.4}",
        history.len(),
        wcss
    ));

    Ok(KMeansOutcome {
        initial_centroids,
        centroids,
        clusters,
        assignments,
        iterations: history.len(),
        converged,
        wcss,
        history,
    })
}

/// Nearest centroid per point; the first centroid wins ties.
fn assign(points: &[Point], centroids: &[Point]) -> Vec<usize> {
    points
        .iter()
        .map(|&p| {
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (idx, &c) in centroids.iter().enumerate() {
                let dist = p.squared_distance(c);
                if dist < best_dist {
                    best_dist = dist;
                    best = idx;
                }
            }
            best
        })
        .collect()
}

fn group(assignments: &[usize], k: usize) -> Vec<Vec<usize>> {
    let mut clusters = vec![Vec::new(); k];
    for (point, &cluster) in assignments.iter().enumerate() {
        clusters[cluster].push(point);
    }
    clusters
}

/// Within-cluster sum of squared distances.
pub fn wcss(points: &[Point], assignments: &[usize], centroids: &[Point]) -> f64 {
    points
        .iter()
        .zip(assignments)
        .map(|(&p, &c)| p.squared_distance(centroids[c]))
        .sum()
}

fn describe(centroids: &[Point]) -> String {
    centroids
        .iter()
        .enumerate()
        .map(|(i, c)| format!("C{}{}", i + 1, c))
        .collect::<Vec<_>>()
        .join(", ")
}
