//! Input/output helpers.
//!
//! - CSV ingest (`ingest`)
//! - simulation result export (`export`)
//! - curve JSON read/write (`curve`)
//! - all-or-nothing output files (`staging`)

pub mod curve;
pub mod export;
pub mod ingest;
pub mod staging;

pub use curve::*;
pub use export::*;
pub use ingest::*;
pub use staging::*;
