//! CSV ingest.
//!
//! Turns a results table (as written by `pgon simulate`, or exported from a
//! spreadsheet) into `Sample`s for fitting or `BandRow`s for band charts.
//!
//! Rules:
//! - header names are matched case-insensitively (a leading BOM is ignored)
//! - required columns: `n`, `probability` (+ `ci_lower`, `ci_upper` for bands)
//! - any unparseable or non-finite value aborts the run with its line number
//! - no range checks on the values themselves

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{debug, info};

use crate::domain::{BandRow, DatasetStats, Sample};
use crate::error::{AnalysisError, AppError};

const FIT_COLUMNS: [&str; 2] = ["n", "probability"];
const BAND_COLUMNS: [&str; 4] = ["n", "probability", "ci_lower", "ci_upper"];

/// Ingest output for the fit pipeline.
#[derive(Debug, Clone)]
pub struct IngestedSamples {
    pub samples: Vec<Sample>,
    pub stats: DatasetStats,
}

/// Load `(n, probability)` samples from a CSV file.
pub fn load_samples(path: &Path) -> Result<IngestedSamples, AppError> {
    let file = open_csv(path)?;
    let samples = read_samples(file)?;
    let stats = compute_stats(&samples)
        .ok_or_else(|| AppError::new(3, "No valid samples in input."))?;
    info!(
        "read {} samples from '{}' (n in [{}, {}])",
        stats.n_rows,
        path.display(),
        stats.n_min,
        stats.n_max
    );
    Ok(IngestedSamples { samples, stats })
}

/// Load band rows (`n, probability, ci_lower, ci_upper`) from a CSV file.
pub fn load_band_rows(path: &Path) -> Result<Vec<BandRow>, AppError> {
    let file = open_csv(path)?;
    let rows = read_band_rows(file)?;
    info!("read {} band rows from '{}'", rows.len(), path.display());
    Ok(rows)
}

/// Parse samples from any reader. At least two rows are required.
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<Sample>, AnalysisError> {
    let samples = read_rows(reader, &FIT_COLUMNS, |values| Sample::new(values[0], values[1]))?;
    ensure_two_rows(samples.len())?;
    Ok(samples)
}

/// Parse band rows from any reader. At least two rows are required.
pub fn read_band_rows<R: Read>(reader: R) -> Result<Vec<BandRow>, AnalysisError> {
    let rows = read_rows(reader, &BAND_COLUMNS, |values| BandRow {
        n: values[0],
        probability: values[1],
        ci_lower: values[2],
        ci_upper: values[3],
    })?;
    ensure_two_rows(rows.len())?;
    Ok(rows)
}

fn open_csv(path: &Path) -> Result<File, AppError> {
    File::open(path).map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))
}

fn ensure_two_rows(count: usize) -> Result<(), AnalysisError> {
    if count < 2 {
        return Err(AnalysisError::input(
            None,
            format!("expected at least two data rows, found {count}"),
        ));
    }
    Ok(())
}

/// Read every record, pull the named numeric columns (in order), and build `T`.
fn read_rows<R, T, F>(reader: R, columns: &[&str], build: F) -> Result<Vec<T>, AnalysisError>
where
    R: Read,
    F: Fn(&[f64]) -> T,
{
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AnalysisError::input(Some(1), format!("failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let indices = columns
        .iter()
        .map(|&name| {
            header_map
                .get(name)
                .copied()
                .ok_or_else(|| AnalysisError::input(Some(1), format!("missing required column `{name}`")))
        })
        .collect::<Result<Vec<usize>, _>>()?;

    let mut out = Vec::new();
    let mut values = vec![0.0; columns.len()];

    for (idx, result) in reader.records().enumerate() {
        // +2: one for the header row, one for 1-based line numbers.
        let line = idx + 2;
        let record = result.map_err(|e| AnalysisError::input(Some(line), format!("CSV parse error: {e}")))?;

        for (slot, (&col, &name)) in values.iter_mut().zip(indices.iter().zip(columns)) {
            *slot = parse_f64(&record, col, name).map_err(|msg| AnalysisError::input(Some(line), msg))?;
        }
        out.push(build(&values));
    }

    debug!("parsed {} rows with columns {:?}", out.len(), columns);
    Ok(out)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_f64(record: &StringRecord, idx: usize, name: &str) -> Result<f64, String> {
    let raw = record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing value for `{name}`"))?;
    let v = raw
        .parse::<f64>()
        .map_err(|_| format!("invalid number '{raw}' in `{name}`"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("non-finite value '{raw}' in `{name}`"))
    }
}

/// Ranges of `n` and `probability` over the samples.
pub fn compute_stats(samples: &[Sample]) -> Option<DatasetStats> {
    let mut n_min = f64::INFINITY;
    let mut n_max = f64::NEG_INFINITY;
    let mut p_min = f64::INFINITY;
    let mut p_max = f64::NEG_INFINITY;

    for s in samples {
        n_min = n_min.min(s.n);
        n_max = n_max.max(s.n);
        p_min = p_min.min(s.probability);
        p_max = p_max.max(s.probability);
    }

    if !n_min.is_finite() || !n_max.is_finite() || !p_min.is_finite() || !p_max.is_finite() {
        return None;
    }

    Some(DatasetStats {
        n_rows: samples.len(),
        n_min,
        n_max,
        p_min,
        p_max,
    })
}
