//! `polygon-curves` library crate.
//!
//! The binary (`pgon`) is a thin wrapper around this library so the fit,
//! charts and simulation are testable without spawning processes.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod sim;
