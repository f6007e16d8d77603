//! Export simulation results to CSV.
//!
//! The column layout is exactly what `pgon fit` and `pgon band` read back, so a
//! simulation run can be fed straight into the analysis commands.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::domain::SimulationRow;
use crate::error::AppError;

pub const SIMULATION_HEADER: &str = "n,iterations,hits,probability,ci_lower,ci_upper";

/// Write simulation rows to a CSV file.
pub fn write_simulation_csv(path: &Path, rows: &[SimulationRow]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create results CSV '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);

    write_simulation_rows(&mut writer, rows)
        .map_err(|e| AppError::new(2, format!("Failed to write results CSV: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush results CSV: {e}")))?;

    info!("wrote {} rows to '{}'", rows.len(), path.display());
    Ok(())
}

fn write_simulation_rows<W: Write>(out: &mut W, rows: &[SimulationRow]) -> std::io::Result<()> {
    writeln!(out, "{SIMULATION_HEADER}")?;
    for r in rows {
        writeln!(
            out,
            "{},{},{},{:.10},{:.10},{:.10}",
            r.n, r.iterations, r.hits, r.probability, r.ci_lower, r.ci_upper
        )?;
    }
    Ok(())
}
