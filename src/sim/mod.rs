//! Monte Carlo simulation that produces the input table.
//!
//! - `polygon`: regular polygon construction and segment geometry
//! - `monte_carlo`: random chords, parallel trial counting, Wilson intervals

pub mod monte_carlo;
pub mod polygon;

pub use monte_carlo::*;
pub use polygon::*;
