//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a fitted curve:
//! - the anchors and the solved `(a, b)`
//! - the decimal-form equation
//! - a precomputed grid for quick plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;
use log::debug;

use crate::domain::{CurveFile, CurveGrid};
use crate::error::AppError;
use crate::fit::TwoPointFit;
use crate::report::format_equation_decimal;

/// Build the serialisable form of a fit.
pub fn curve_file_from_fit(fit: &TwoPointFit) -> CurveFile {
    let (n, y) = fit.grid.iter().copied().unzip();
    CurveFile {
        tool: "pgon".to_string(),
        generated_at: Utc::now(),
        anchors: fit.anchors,
        curve: fit.curve,
        equation: format_equation_decimal(&fit.curve),
        grid: CurveGrid { n, y },
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, fit: &TwoPointFit) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &curve_file_from_fit(fit))
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    debug!("wrote curve JSON to '{}'", path.display());
    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sample;
    use crate::fit::fit_samples;

    #[test]
    fn curve_file_carries_parameters_and_grid() {
        let fit = fit_samples(&[Sample::new(4.0, 0.5), Sample::new(10.0, 0.4)], 7).unwrap();
        let file = curve_file_from_fit(&fit);

        assert_eq!(file.tool, "pgon");
        assert_eq!(file.curve, fit.curve);
        assert_eq!(file.grid.n.len(), 7);
        assert_eq!(file.grid.y.len(), 7);
        assert_eq!(file.grid.n[0], 4.0);
        assert!(file.equation.starts_with("y = 1/3 + 0.66666667/(n + "));

        let json = serde_json::to_string(&file).unwrap();
        let back: CurveFile = serde_json::from_str(&json).unwrap();
        assert!((back.curve.a - file.curve.a).abs() < 1e-12);
        assert!((back.curve.b - file.curve.b).abs() < 1e-12);
        assert_eq!(back.anchors, file.anchors);
    }
}
