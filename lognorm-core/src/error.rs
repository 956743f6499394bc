//! Error types for lognorm-core.

use thiserror::Error;

/// Result type alias for lognorm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for lognorm operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A configuration parameter lies outside its valid range.
    #[error("invalid {name}: {value} (expected {min} to {max})")]
    InvalidParameter {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Distribution parameters rejected by the sampling or density backend.
    #[error("distribution error: {0}")]
    Distribution(String),

    /// The pooled sample set is empty.
    #[error("cannot analyze an empty sample set")]
    EmptySample,
}

impl From<rand_distr::NormalError> for Error {
    fn from(err: rand_distr::NormalError) -> Self {
        Self::Distribution(err.to_string())
    }
}

impl From<statrs::StatsError> for Error {
    fn from(err: statrs::StatsError) -> Self {
        Self::Distribution(err.to_string())
    }
}
