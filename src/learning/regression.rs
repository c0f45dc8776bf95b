//! Simple least-squares linear regression
//!
//! Fits `ŷ = a + b·x` with
//! `b = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²` and `a = ȳ - b·x̄`.

use serde::Serialize;
use statrs::statistics::Statistics;
use tracing::debug;

use crate::{
    Error, Result,
    point::Point,
    trace::{Run, Trace},
};

/// Fitted line and goodness of fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionModel {
    pub mean_x: f64,
    pub mean_y: f64,
    /// Σ(x - x̄)(y - ȳ)
    pub numerator: f64,
    /// Σ(x - x̄)²
    pub denominator: f64,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl RegressionModel {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// `Ŷ = a + bX` with two decimals.
    pub fn equation(&self) -> String {
        format!("Ŷ = {:.2} + {:.2}X", self.intercept, self.slope)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionOutcome {
    pub model: RegressionModel,
    /// `(x, ŷ)` when a query was given
    pub prediction: Option<(f64, f64)>,
}

/// Fit a line through `points` and optionally predict at `query`.
///
/// # Examples
///
/// ```
/// use algoviz::{learning::regression, point::Point, trace::Trace};
///
/// let points = [Point::new(1.0, 2.0), Point::new(2.0, 4.0), Point::new(3.0, 6.0)];
/// let outcome = regression::solve(&points, Some(4.0), &mut Trace::new())?;
/// assert!((outcome.model.slope - 2.0).abs() < 1e-12);
/// assert_eq!(outcome.prediction.map(|(_, y)| y.round()), Some(8.0));
/// # Ok::<(), algoviz::Error>(())
/// ```
pub fn solve(points: &[Point], query: Option<f64>, trace: &mut Trace) -> Result<RegressionOutcome> {
    if points.len() < 2 {
        return Err(Error::InsufficientData {
            required: 2,
            got: points.len(),
        });
    }
    let n = points.len();
    trace.info(format!("Data: {n} points (x, y)"));

    let mean_x = points.iter().map(|p| p.x).mean();
    let mean_y = points.iter().map(|p| p.y).mean();
    trace.info(format!("Means: x̄ = {mean_x:.2}, ȳ = {mean_y:.2}"));

    trace.highlight("Slope b:");
    let (numerator, denominator) = points.iter().fold((0.0, 0.0), |(num, den), p| {
        let dx = p.x - mean_x;
        (num + dx * (p.y - mean_y), den + dx * dx)
    });
    if denominator == 0.0 {
        return Err(Error::ZeroVariance);
    }
    let slope = numerator / denominator;
    trace.info(format!(
        "b = Σ[(x - x̄)(y - ȳ)] / Σ[(x - x̄)²] = {numerator:.2} / {denominator:.2} = {slope:.4}"
    ));

    trace.highlight("Intercept a:");
    let intercept = mean_y - slope * mean_x;
    trace.info(format!(
        "a = ȳ - b × x̄ = {mean_y:.2} - {slope:.4} × {mean_x:.2} = {intercept:.4}"
    ));

    let (ss_res, ss_tot) = points.iter().fold((0.0, 0.0), |(res, tot), p| {
        let fitted = intercept + slope * p.x;
        (res + (p.y - fitted).powi(2), tot + (p.y - mean_y).powi(2))
    });
    let r_squared = if ss_tot == 0.0 { 1.0 } else { 1.0 - ss_res / ss_tot };

    let model = RegressionModel {
        mean_x,
        mean_y,
        numerator,
        denominator,
        slope,
        intercept,
        r_squared,
    };
    trace.success(format!("Regression line: {}", model.equation()));

    let prediction = query.map(|x| {
        let y = model.predict(x);
        trace.highlight(format!("Predict for x = {x}:"));
        trace.success(format!(
            "Ŷ = {:.2} + {:.2} × {x} = {y:.2}",
            model.intercept, model.slope
        ));
        (x, y)
    });

    trace.info(format!(
        "R² = {:.4} ({:.2}%)",
        model.r_squared,
        model.r_squared * 100.0
    ));
    debug!(slope, intercept, r_squared, "regression fitted");

    Ok(RegressionOutcome { model, prediction })
}

pub fn run(points: &[Point], query: Option<f64>) -> Run<RegressionOutcome> {
    Trace::new().run(|trace| solve(points, query, trace))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn perfect_line() {
        let outcome = run(&points(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]), Some(4.0))
            .result
            .unwrap();
        let model = &outcome.model;
        assert!((model.slope - 2.0).abs() < 1e-12);
        assert!(model.intercept.abs() < 1e-12);
        assert!((model.r_squared - 1.0).abs() < 1e-12);
        let (_, y) = outcome.prediction.unwrap();
        assert!((y - 8.0).abs() < 1e-12);
    }

    #[test]
    fn noisy_fit_has_partial_r_squared() {
        let model = run(&points(&[(1.0, 1.0), (2.0, 3.0), (3.0, 2.0), (4.0, 4.0)]), None)
            .result
            .unwrap()
            .model;
        // x̄ = 2.5, ȳ = 2.5, Sxy = 4, Sxx = 5, SS_res = 1.8, SS_tot = 5
        assert!((model.slope - 0.8).abs() < 1e-12);
        assert!((model.intercept - 0.5).abs() < 1e-12);
        assert!((model.r_squared - 0.64).abs() < 1e-12);
    }

    #[test]
    fn needs_two_points() {
        let run = run(&points(&[(1.0, 1.0)]), None);
        assert!(matches!(run.result, Err(Error::InsufficientData { required: 2, got: 1 })));
        assert_eq!(run.trace.len(), 1);
    }

    #[test]
    fn vertical_data_has_zero_variance() {
        let run = run(&points(&[(2.0, 1.0), (2.0, 5.0)]), None);
        assert!(matches!(run.result, Err(Error::ZeroVariance)));
    }

    #[test]
    fn flat_data_reports_full_fit() {
        let model = run(&points(&[(1.0, 3.0), (2.0, 3.0), (5.0, 3.0)]), None)
            .result
            .unwrap()
            .model;
        assert_eq!(model.slope, 0.0);
        assert_eq!(model.r_squared, 1.0);
    }
}
