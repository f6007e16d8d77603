//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting and plotting
//! - exported to JSON/CSV
//! - reloaded later for evaluation

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Horizontal asymptote of the intersection probability as `n → ∞`.
pub const ASYMPTOTE: f64 = 1.0 / 3.0;

/// One observed `(n, probability)` data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Number of polygon sides.
    pub n: f64,
    pub probability: f64,
}

impl Sample {
    pub fn new(n: f64, probability: f64) -> Self {
        Self { n, probability }
    }
}

/// One row of the confidence-band input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandRow {
    pub n: f64,
    pub probability: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// The two samples a fitted curve is forced through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchors {
    pub first: Sample,
    pub second: Sample,
}

/// Solved parameters of `y = 1/3 + a/(n + b)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RationalCurve {
    pub a: f64,
    pub b: f64,
}

/// Summary stats about the samples that were read.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub n_min: f64,
    pub n_max: f64,
    pub p_min: f64,
    pub p_max: f64,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub anchors: Anchors,
    pub curve: RationalCurve,
    /// Human-readable decimal form of the equation.
    pub equation: String,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub n: Vec<f64>,
    pub y: Vec<f64>,
}

/// One simulated `n` (what `simulate` writes and `band` reads back).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationRow {
    pub n: usize,
    pub iterations: u64,
    pub hits: u64,
    pub probability: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// Configuration of a `pgon fit` run.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub csv_path: PathBuf,
    /// Where the fitted-curve PNG goes.
    pub output: PathBuf,
    /// Number of evaluation points across the plotting range.
    pub grid_points: usize,
    /// Chart size in pixels.
    pub image_width: u32,
    pub image_height: u32,

    /// Render an ASCII preview in the terminal.
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_curve: Option<PathBuf>,
}

/// Configuration of a `pgon band` run.
#[derive(Debug, Clone)]
pub struct BandConfig {
    pub csv_path: PathBuf,
    pub png_output: PathBuf,
    pub svg_output: PathBuf,
    /// Scales the distance from `probability` to each CI bound (for visibility).
    pub error_multiplier: f64,
    /// Iteration count quoted in the chart's info box.
    pub iterations: u64,
    pub image_width: u32,
    pub image_height: u32,
}

/// Configuration of a `pgon eval` run.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub curve_path: PathBuf,
    pub n_values: Vec<f64>,
}

/// Configuration of a `pgon simulate` run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub n_min: usize,
    pub n_max: usize,
    /// Trials per `n`.
    pub iterations: u64,
    pub seed: u64,
    pub output: PathBuf,
}
