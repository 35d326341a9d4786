//! Error types for Streetlight

use thiserror::Error;

/// Errors that can occur while building or querying street models
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid street attribute {name}: {value} (must be > 0)")]
    InvalidAttribute { name: &'static str, value: f64 },

    #[error("Street has no busy peak hours configured")]
    EmptyPeakHours,

    #[error("Peak hour {0} is outside the [0, 24) range")]
    PeakHourOutOfRange(f64),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown street: {0}")]
    UnknownStreet(String),
}
