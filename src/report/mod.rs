//! Reporting utilities: equation text and terminal tables.

pub mod format;

pub use format::*;
