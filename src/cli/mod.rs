//! Command-line parsing for the polygon intersection analysis tools.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/plotting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::fit::DEFAULT_GRID_POINTS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "pgon",
    version,
    about = "Chord-intersection probability in regular polygons: simulate, fit, and plot"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit y = 1/3 + a/(n+b) through the first two rows, print the equation, and plot it.
    Fit(FitArgs),
    /// Plot the full probability series with its confidence band (PNG + SVG).
    Band(BandArgs),
    /// Evaluate a previously exported curve JSON at given n values.
    Eval(EvalArgs),
    /// Run the Monte Carlo simulation and write the results CSV.
    Simulate(SimulateArgs),
}

/// Options for `pgon fit`.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Results CSV with `n` and `probability` columns.
    #[arg(long, value_name = "CSV", default_value = "polygon_intersection_results.csv")]
    pub input: PathBuf,

    /// Output PNG for the fitted curve.
    #[arg(short, long, default_value = "exact_equation.png")]
    pub output: PathBuf,

    /// Number of points used to draw the curve.
    #[arg(long, default_value_t = DEFAULT_GRID_POINTS)]
    pub grid_points: usize,

    /// Image width (pixels).
    #[arg(long, default_value_t = 3000)]
    pub image_width: u32,

    /// Image height (pixels).
    #[arg(long, default_value_t = 1800)]
    pub image_height: u32,

    /// Also render an ASCII preview in the terminal.
    #[arg(long)]
    pub plot: bool,

    /// ASCII plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the fitted curve (parameters + grid) to JSON.
    #[arg(long = "export-curve", value_name = "JSON")]
    pub export_curve: Option<PathBuf>,
}

/// Options for `pgon band`.
#[derive(Debug, Parser, Clone)]
pub struct BandArgs {
    /// Results CSV with `n`, `probability`, `ci_lower`, `ci_upper` columns.
    #[arg(long, value_name = "CSV", default_value = "polygon_intersection_results.csv")]
    pub input: PathBuf,

    /// Output PNG.
    #[arg(long, default_value = "polygon_intersection_probability.png")]
    pub png: PathBuf,

    /// Output SVG.
    #[arg(long, default_value = "polygon_intersection_probability.svg")]
    pub svg: PathBuf,

    /// Scale the confidence interval around each point (for visibility).
    #[arg(long, default_value_t = 1.0)]
    pub error_multiplier: f64,

    /// Iteration count quoted in the chart's info box.
    #[arg(long, default_value_t = 1_000_000_000)]
    pub iterations: u64,

    /// Image width (pixels).
    #[arg(long, default_value_t = 3600)]
    pub image_width: u32,

    /// Image height (pixels).
    #[arg(long, default_value_t = 2100)]
    pub image_height: u32,
}

/// Options for `pgon eval`.
#[derive(Debug, Parser, Clone)]
pub struct EvalArgs {
    /// Curve JSON file produced by `pgon fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Side count(s) to evaluate at (repeatable).
    #[arg(short = 'n', long = "n", required = true, num_args = 1.., allow_negative_numbers = true)]
    pub n: Vec<f64>,
}

/// Options for `pgon simulate`.
#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    /// Smallest side count.
    #[arg(long, default_value_t = 3)]
    pub n_min: usize,

    /// Largest side count.
    #[arg(long, default_value_t = 50)]
    pub n_max: usize,

    /// Trials per side count.
    #[arg(short, long, default_value_t = 1_000_000)]
    pub iterations: u64,

    /// Random seed (runs are reproducible for a given seed).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV.
    #[arg(short, long, default_value = "polygon_intersection_results.csv")]
    pub output: PathBuf,
}
