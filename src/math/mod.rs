//! Mathematical utilities: the rational curve and evenly spaced grids.

pub mod rational;

pub use rational::*;
