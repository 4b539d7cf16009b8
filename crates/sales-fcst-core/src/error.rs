//! Error types for sales forecasting.

use thiserror::Error;

/// Result type for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Error types for smoothing, data preparation and forecasting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Empty series: at least one observation is required")]
    EmptySeries,

    #[error("Invalid parameter '{param}' = '{value}': {reason}")]
    InvalidParameter {
        param: String,
        value: String,
        reason: String,
    },

    #[error("Invalid horizon {0}: must be at least 1")]
    InvalidHorizon(usize),

    #[error("Invalid data at index {index}: {reason}")]
    InvalidData { index: usize, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),
}

impl ForecastError {
    /// Shorthand for an out-of-range alpha.
    pub(crate) fn invalid_alpha(alpha: f64) -> Self {
        ForecastError::InvalidParameter {
            param: "alpha".into(),
            value: alpha.to_string(),
            reason: "must satisfy 0 < alpha <= 1".into(),
        }
    }

    /// Convert to an error code for FFI.
    pub fn to_code(&self) -> i32 {
        match self {
            ForecastError::EmptySeries => 2,
            ForecastError::InvalidParameter { .. } => 3,
            ForecastError::InvalidHorizon(_) => 4,
            ForecastError::InvalidData { .. } => 5,
            ForecastError::InvalidInput(_) => 6,
            ForecastError::InsufficientData { .. } => 7,
            ForecastError::InvalidFrequency(_) => 8,
        }
    }
}
