//! Two-point rational fit.
//!
//! Given anchors `(n1, y1)` and `(n2, y2)`, find the unique `(a, b)` such that
//! `y = 1/3 + a/(n + b)` passes through both. With `d_i = y_i - 1/3` the system
//!
//! ```text
//! a = d1 (n1 + b)
//! a = d2 (n2 + b)
//! ```
//!
//! collapses to one linear equation in `b`:
//!
//! ```text
//! b = (d2 n2 - d1 n1) / (d1 - d2)
//! a = d1 (n1 + b)
//! ```

use log::{debug, info};

use crate::domain::{ASYMPTOTE, Anchors, RationalCurve, Sample};
use crate::error::AnalysisError;

/// Tolerance for the degeneracy checks (`y == 1/3`, `n1 == n2`, `y1 == y2`).
const DEGENERATE_EPS: f64 = 1e-12;

/// Default number of evaluation points across the plotting range.
pub const DEFAULT_GRID_POINTS: usize = 500;

/// Output of a full two-point fit over a dataset.
#[derive(Debug, Clone)]
pub struct TwoPointFit {
    pub anchors: Anchors,
    pub curve: RationalCurve,
    /// Plotting range `[n_min, n_max]`.
    pub n_range: (f64, f64),
    /// `(n, y(n))` evaluated across `n_range`.
    pub grid: Vec<(f64, f64)>,
}

/// Solve for the curve through two anchors.
///
/// The anchors are ordered by `n` before solving, so swapping the arguments
/// yields bit-identical parameters.
pub fn solve_two_point(first: Sample, second: Sample) -> Result<RationalCurve, AnalysisError> {
    for s in [first, second] {
        if !(s.n.is_finite() && s.probability.is_finite()) {
            return Err(AnalysisError::degenerate(format!(
                "non-finite anchor ({}, {})",
                s.n, s.probability
            )));
        }
    }

    let (lo, hi) = if first.n <= second.n { (first, second) } else { (second, first) };

    if (hi.n - lo.n).abs() <= DEGENERATE_EPS {
        return Err(AnalysisError::degenerate(format!(
            "both anchors have n = {}; the system is singular",
            lo.n
        )));
    }

    let d_lo = lo.probability - ASYMPTOTE;
    let d_hi = hi.probability - ASYMPTOTE;
    for (s, d) in [(lo, d_lo), (hi, d_hi)] {
        if d.abs() <= DEGENERATE_EPS {
            return Err(AnalysisError::degenerate(format!(
                "anchor at n = {} sits on the asymptote y = 1/3",
                s.n
            )));
        }
    }

    let denom = d_lo - d_hi;
    if denom.abs() <= DEGENERATE_EPS {
        return Err(AnalysisError::degenerate(format!(
            "anchors share the probability {}; no curve of this family passes through both",
            lo.probability
        )));
    }

    let b = (d_hi * hi.n - d_lo * lo.n) / denom;
    let a = d_lo * (lo.n + b);

    if !(a.is_finite() && b.is_finite()) {
        return Err(AnalysisError::degenerate(format!(
            "solution is not finite (a = {a}, b = {b})"
        )));
    }

    debug!("two-point solve: d_lo={d_lo:e} d_hi={d_hi:e} -> a={a} b={b}");
    Ok(RationalCurve { a, b })
}

/// Pick the fit anchors: the first two rows, in input order.
pub fn select_anchors(samples: &[Sample]) -> Result<Anchors, AnalysisError> {
    match samples {
        [first, second, ..] => Ok(Anchors {
            first: *first,
            second: *second,
        }),
        _ => Err(AnalysisError::input(
            None,
            format!("need at least two rows to fit, got {}", samples.len()),
        )),
    }
}

/// Plotting range: from the smaller anchor `n` to the largest `n` in the data.
pub fn plotting_range(anchors: &Anchors, samples: &[Sample]) -> (f64, f64) {
    let start = anchors.first.n.min(anchors.second.n);
    let end = samples.iter().map(|s| s.n).fold(f64::NEG_INFINITY, f64::max);
    if end.is_finite() && end > start {
        (start, end)
    } else {
        (start, anchors.first.n.max(anchors.second.n))
    }
}

/// Fit the curve through the first two samples and evaluate it across the data.
pub fn fit_samples(samples: &[Sample], grid_points: usize) -> Result<TwoPointFit, AnalysisError> {
    let anchors = select_anchors(samples)?;
    if samples.len() > 2 {
        debug!(
            "using rows 1-2 as anchors; {} further rows only set the plotting range",
            samples.len() - 2
        );
    }

    let curve = solve_two_point(anchors.first, anchors.second)?;
    let n_range = plotting_range(&anchors, samples);
    let grid = curve.sample(n_range.0, n_range.1, grid_points.max(2))?;

    info!(
        "fitted y = 1/3 + {:.8}/(n + {:.8}) through n = {} and n = {}",
        curve.a, curve.b, anchors.first.n, anchors.second.n
    );

    Ok(TwoPointFit {
        anchors,
        curve,
        n_range,
        grid,
    })
}
