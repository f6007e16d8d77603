//! Shared "fit pipeline" logic.
//!
//! CSV ingest -> anchor selection -> closed-form solve -> grid sampling
//!
//! The handlers in `app` then focus on presentation (printing, charts, exports).

use crate::domain::FitConfig;
use crate::error::AppError;
use crate::fit::{TwoPointFit, fit_samples};
use crate::io::ingest::{IngestedSamples, load_samples};

/// All computed outputs of a single `pgon fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedSamples,
    pub fit: TwoPointFit,
}

/// Execute the fitting pipeline and return the computed outputs.
///
/// Nothing is written to disk here.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = load_samples(&config.csv_path)?;
    let fit = fit_samples(&ingest.samples, config.grid_points)?;

    Ok(RunOutput { ingest, fit })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(csv_path: std::path::PathBuf) -> FitConfig {
        FitConfig {
            csv_path,
            output: "unused.png".into(),
            grid_points: 50,
            image_width: 300,
            image_height: 200,
            plot: false,
            plot_width: 40,
            plot_height: 10,
            export_curve: None,
        }
    }

    #[test]
    fn runs_from_a_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, "n,probability\n4,0.5\n10,0.4\n20,0.37\n").unwrap();

        let run = run_fit(&config_for(path)).unwrap();
        assert_eq!(run.ingest.stats.n_rows, 3);
        assert!((run.fit.curve.a - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(run.fit.n_range, (4.0, 20.0));
        assert_eq!(run.fit.grid.len(), 50);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_fit(&config_for(dir.path().join("absent.csv"))).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
