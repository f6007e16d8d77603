//! Curve fitting.
//!
//! Responsibilities:
//!
//! - choose the anchor samples
//! - solve the two-point rational system in closed form
//! - evaluate the fitted curve across the plotting range

pub mod two_point;

pub use two_point::*;
