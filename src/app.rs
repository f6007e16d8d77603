//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the two-point fit and prints the equation
//! - renders charts
//! - runs the simulation that produces the input table

use clap::Parser;
use log::info;

use crate::cli::{BandArgs, Command, EvalArgs, FitArgs, SimulateArgs};
use crate::domain::{BandConfig, EvalConfig, FitConfig, SimConfig};
use crate::error::AppError;
use crate::io::staging::StagedOutputs;

pub mod pipeline;

/// Entry point for the `pgon` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(&fit_config_from_args(&args)),
        Command::Band(args) => handle_band(&band_config_from_args(&args)),
        Command::Eval(args) => handle_eval(&eval_config_from_args(&args)),
        Command::Simulate(args) => handle_simulate(&sim_config_from_args(&args)),
    }
}

fn handle_fit(config: &FitConfig) -> Result<(), AppError> {
    let run = pipeline::run_fit(config)?;

    print!("{}", crate::report::format_fit_summary(&run.ingest.stats, &run.fit, config));
    print!("{}", crate::report::format_equations(&run.fit.curve));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.fit,
            &run.ingest.samples,
            config.plot_width,
            config.plot_height,
        );
        println!("\n{plot}");
    }

    let mut outputs = StagedOutputs::new();

    let chart = crate::plot::FitChart::from_fit(&run.fit);
    let png = outputs.stage(&config.output)?;
    crate::plot::render_fit_png(&chart, &png, (config.image_width, config.image_height))?;

    if let Some(path) = &config.export_curve {
        let json = outputs.stage(path)?;
        crate::io::curve::write_curve_json(&json, &run.fit)?;
    }

    outputs.commit()
}

fn handle_band(config: &BandConfig) -> Result<(), AppError> {
    if !(config.error_multiplier.is_finite() && config.error_multiplier >= 0.0) {
        return Err(AppError::new(
            2,
            format!("--error-multiplier must be a non-negative number, got {}.", config.error_multiplier),
        ));
    }

    let rows = crate::io::ingest::load_band_rows(&config.csv_path)?;
    print!("{}", crate::report::format_band_summary(&rows, config));

    let chart = crate::plot::BandChart::new(&rows, config.error_multiplier, config.iterations);
    let size = (config.image_width, config.image_height);
    let mut outputs = StagedOutputs::new();
    let png = outputs.stage(&config.png_output)?;
    crate::plot::render_band_png(&chart, &png, size)?;
    let svg = outputs.stage(&config.svg_output)?;
    crate::plot::render_band_svg(&chart, &svg, size)?;

    outputs.commit()
}

fn handle_eval(config: &EvalConfig) -> Result<(), AppError> {
    let file = crate::io::curve::read_curve_json(&config.curve_path)?;
    info!(
        "evaluating curve from '{}' ({}, generated {})",
        config.curve_path.display(),
        file.tool,
        file.generated_at
    );

    let ys = file.curve.evaluate_many(&config.n_values)?;
    let points: Vec<(f64, f64)> = config.n_values.iter().copied().zip(ys).collect();

    print!("{}", crate::report::format_eval_table(&file.curve, &points));
    Ok(())
}

fn handle_simulate(config: &SimConfig) -> Result<(), AppError> {
    let rows = crate::sim::run_simulation(config)?;
    crate::io::export::write_simulation_csv(&config.output, &rows)?;

    print!("{}", crate::report::format_simulation_table(&rows));
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        csv_path: args.input.clone(),
        output: args.output.clone(),
        grid_points: args.grid_points,
        image_width: args.image_width,
        image_height: args.image_height,
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_curve: args.export_curve.clone(),
    }
}

pub fn band_config_from_args(args: &BandArgs) -> BandConfig {
    BandConfig {
        csv_path: args.input.clone(),
        png_output: args.png.clone(),
        svg_output: args.svg.clone(),
        error_multiplier: args.error_multiplier,
        iterations: args.iterations,
        image_width: args.image_width,
        image_height: args.image_height,
    }
}

pub fn eval_config_from_args(args: &EvalArgs) -> EvalConfig {
    EvalConfig {
        curve_path: args.curve.clone(),
        n_values: args.n.clone(),
    }
}

pub fn sim_config_from_args(args: &SimulateArgs) -> SimConfig {
    SimConfig {
        n_min: args.n_min,
        n_max: args.n_max,
        iterations: args.iterations,
        seed: args.seed,
        output: args.output.clone(),
    }
}
