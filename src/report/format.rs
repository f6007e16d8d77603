//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

use crate::domain::{BandConfig, BandRow, DatasetStats, FitConfig, RationalCurve, SimulationRow};
use crate::fit::TwoPointFit;

/// Equation with `a` and `b` at full (shortest round-trip) precision.
pub fn format_equation_exact(curve: &RationalCurve) -> String {
    format!("y = 1/3 + ({})/(n + ({}))", curve.a, curve.b)
}

/// Equation with `a` and `b` rounded to 8 decimals.
pub fn format_equation_decimal(curve: &RationalCurve) -> String {
    format!("y = 1/3 + {:.8}/(n + {:.8})", curve.a, curve.b)
}

/// Short equation used in chart legends.
pub fn format_equation_legend(curve: &RationalCurve) -> String {
    format!("Exact: y = 1/3 + {:.4}/(n + {:.4})", curve.a, curve.b)
}

/// The two equation lines printed by `pgon fit`.
pub fn format_equations(curve: &RationalCurve) -> String {
    format!(
        "Exact equation: {}\nDecimal form: {}\n",
        format_equation_exact(curve),
        format_equation_decimal(curve)
    )
}

/// Run summary for `pgon fit` (dataset + anchors + outputs).
pub fn format_fit_summary(stats: &DatasetStats, fit: &TwoPointFit, config: &FitConfig) -> String {
    let mut out = String::new();

    out.push_str("=== pgon - Two-Point Rational Fit ===\n");
    out.push_str(&format!("Input: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Rows: {} | n=[{}, {}] | p=[{:.6}, {:.6}]\n",
        stats.n_rows, stats.n_min, stats.n_max, stats.p_min, stats.p_max
    ));
    out.push_str(&format!(
        "Anchors: ({}, {}) and ({}, {})\n",
        fit.anchors.first.n, fit.anchors.first.probability, fit.anchors.second.n, fit.anchors.second.probability
    ));
    out.push_str(&format!(
        "Plot range: n=[{}, {}] ({} points)\n",
        fit.n_range.0,
        fit.n_range.1,
        fit.grid.len()
    ));
    out.push_str(&format!("Chart: {}\n", config.output.display()));
    if let Some(path) = &config.export_curve {
        out.push_str(&format!("Curve JSON: {}\n", path.display()));
    }
    out.push('\n');

    out
}

/// Run summary for `pgon band`.
pub fn format_band_summary(rows: &[BandRow], config: &BandConfig) -> String {
    let n_min = rows.iter().map(|r| r.n).fold(f64::INFINITY, f64::min);
    let n_max = rows.iter().map(|r| r.n).fold(f64::NEG_INFINITY, f64::max);

    let mut out = String::new();
    out.push_str("=== pgon - Confidence Band ===\n");
    out.push_str(&format!("Input: {}\n", config.csv_path.display()));
    out.push_str(&format!("Rows: {} | n=[{n_min}, {n_max}]\n", rows.len()));
    out.push_str(&format!("Error multiplier: x{}\n", config.error_multiplier));
    out.push_str(&format!("Raster: {}\n", config.png_output.display()));
    out.push_str(&format!("Vector: {}\n", config.svg_output.display()));
    out
}

/// `n` / `y(n)` table for `pgon eval`.
pub fn format_eval_table(curve: &RationalCurve, points: &[(f64, f64)]) -> String {
    let mut out = String::new();
    out.push_str(&format_equation_decimal(curve));
    out.push_str("\n\n");
    out.push_str(&format!("{:>12} {:>14}\n", "n", "y(n)"));
    out.push_str(&format!("{:-<12} {:-<14}\n", "", ""));
    for &(n, y) in points {
        out.push_str(&format!("{n:>12} {y:>14.10}\n"));
    }
    out
}

/// Per-`n` results table for `pgon simulate`.
pub fn format_simulation_table(rows: &[SimulationRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>5} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
        "n", "iterations", "hits", "probability", "ci_lower", "ci_upper"
    ));
    out.push_str(&format!(
        "{:-<5} {:-<12} {:-<12} {:-<12} {:-<12} {:-<12}\n",
        "", "", "", "", "", ""
    ));
    for r in rows {
        out.push_str(&format!(
            "{:>5} {:>12} {:>12} {:>12.8} {:>12.8} {:>12.8}\n",
            r.n, r.iterations, r.hits, r.probability, r.ci_lower, r.ci_upper
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equation_forms() {
        let curve = RationalCurve::new(0.125, -1.5);
        assert_eq!(format_equation_exact(&curve), "y = 1/3 + (0.125)/(n + (-1.5))");
        assert_eq!(format_equation_decimal(&curve), "y = 1/3 + 0.12500000/(n + -1.50000000)");
        assert_eq!(format_equation_legend(&curve), "Exact: y = 1/3 + 0.1250/(n + -1.5000)");
        assert_eq!(
            format_equations(&curve),
            "Exact equation: y = 1/3 + (0.125)/(n + (-1.5))\nDecimal form: y = 1/3 + 0.12500000/(n + -1.50000000)\n"
        );
    }

    #[test]
    fn eval_table_lists_each_point() {
        let curve = RationalCurve::new(2.0, 0.0);
        let table = format_eval_table(&curve, &[(3.0, 1.0), (6.0, 2.0 / 3.0)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], format!("{:>12} {:>14.10}", 3.0, 1.0));
    }

    #[test]
    fn simulation_table_has_header_and_rows() {
        let rows = [SimulationRow {
            n: 4,
            iterations: 10,
            hits: 3,
            probability: 0.3,
            ci_lower: 0.1,
            ci_upper: 0.6,
        }];
        let table = format_simulation_table(&rows);
        assert_eq!(table.lines().count(), 3);
        assert!(table.lines().nth(2).unwrap().trim_start().starts_with("4 "));
    }
}
