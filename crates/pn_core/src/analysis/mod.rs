//! # Analysis Module
//!
//! Degree-distribution extraction and power-law fitting for a finished
//! player network.
//!
//! - `degree` - Weighted degrees and cumulative distribution series
//! - `power_law` - Discrete/continuous power-law fit (alpha, xmin)

pub mod degree;
pub mod power_law;

pub use degree::*;
pub use power_law::*;
