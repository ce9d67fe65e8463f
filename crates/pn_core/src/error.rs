use crate::events::Event;
use thiserror::Error;

/// Errors raised while deriving configuration tables.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Both events of a configured pair have value 0, so the pair weight
    /// `k / (value(a) + value(b))` is undefined.
    #[error("event value sum is zero for condition pair ({first}, {second})")]
    ZeroValueSum { first: Event, second: Event },
}

/// Errors raised by the power-law fitter.
#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    /// Fewer usable samples than the minimum tail size.
    #[error("not enough samples to fit a power law: {0} usable values")]
    InsufficientData(usize),

    /// Input contained NaN or infinite values.
    #[error("samples must be finite")]
    NonFiniteSample,
}
