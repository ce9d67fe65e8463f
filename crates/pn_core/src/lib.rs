//! # pn_core - Player Interaction Network Engine
//!
//! Builds a weighted undirected graph of American-football players from
//! play-by-play event rows and analyzes its weighted degree
//! distribution.
//!
//! ## Features
//! - Deterministic single-pass network construction (same rows, same
//!   order = same graph)
//! - Configurable condition pairs and event value table
//! - Degree-distribution extraction and power-law fitting
//!
//! The CSV pipeline and CLI around this library live in the
//! `network_builder` crate.

pub mod analysis;
pub mod config;
pub mod error;
pub mod events;
pub mod network;

pub use analysis::{
    cumulative_distribution, fit_power_law, pdf_series, weighted_degrees, DegreeBin, PdfPoint,
    PowerLawFit,
};
pub use config::{EventPair, NetworkConfig, WeightTable, DEFAULT_WEIGHT_SCALE};
pub use error::{ConfigError, FitError};
pub use events::{condition_met, Event, EventValue, PlayerPlayRow, RosterEntry};
pub use network::{build_network, NodeAttributes, PlayerNetwork};
