//! The rational curve `y(n) = 1/3 + a / (n + b)`.
//!
//! The curve has a single pole at `n = -b` and approaches the asymptote
//! `y = 1/3` from above when `a > 0` (the shape of the intersection
//! probability as the polygon tends to a circle).

use crate::domain::{ASYMPTOTE, RationalCurve};
use crate::error::AnalysisError;

/// Distance from the pole below which evaluation is rejected.
pub const POLE_EPS: f64 = 1e-12;

impl RationalCurve {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Location of the pole (`n = -b`).
    pub fn pole(&self) -> f64 {
        -self.b
    }

    /// Evaluate `y(n)`.
    pub fn evaluate(&self, n: f64) -> Result<f64, AnalysisError> {
        let denom = n + self.b;
        if denom.abs() < POLE_EPS {
            return Err(AnalysisError::Domain { n, pole: self.pole() });
        }
        Ok(ASYMPTOTE + self.a / denom)
    }

    /// Evaluate `y(n)` pointwise; fails on the first `n` that hits the pole.
    pub fn evaluate_many(&self, ns: &[f64]) -> Result<Vec<f64>, AnalysisError> {
        ns.iter().map(|&n| self.evaluate(n)).collect()
    }

    /// Sample `(n, y(n))` pairs over `[n_min, n_max]` (inclusive, evenly spaced).
    pub fn sample(&self, n_min: f64, n_max: f64, points: usize) -> Result<Vec<(f64, f64)>, AnalysisError> {
        let ns = linspace(n_min, n_max, points);
        let ys = self.evaluate_many(&ns)?;
        Ok(ns.into_iter().zip(ys).collect())
    }
}

/// `points` evenly spaced values from `start` to `end` (both inclusive).
///
/// `points < 2` yields just `start`.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    if points < 2 {
        return vec![start];
    }
    let step = (end - start) / (points as f64 - 1.0);
    (0..points)
        .map(|i| if i + 1 == points { end } else { start + step * i as f64 })
        .collect()
}
