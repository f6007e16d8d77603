//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observations (`Sample`, `BandRow`, `SimulationRow`)
//! - fit outputs (`Anchors`, `RationalCurve`, `CurveFile`)
//! - per-command configuration (`FitConfig`, `BandConfig`, `EvalConfig`, `SimConfig`)

pub mod types;

pub use types::*;
