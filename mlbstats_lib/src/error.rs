//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding CSV, I/O, serialization, and input validation failures.
#[derive(Debug)]
pub enum MlbStatsError {
    /// An error from the underlying API client.
    Api(mlbstats_api::Error),
    /// Reading or writing a reference CSV failed.
    Csv(csv::Error),
    /// Filesystem access failed.
    Io(std::io::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// The response or reference data did not contain what the call needs.
    MissingData(String),
}

impl fmt::Display for MlbStatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Csv(e) => write!(f, "CSV error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::MissingData(msg) => write!(f, "Missing data: {}", msg),
        }
    }
}

impl std::error::Error for MlbStatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<mlbstats_api::Error> for MlbStatsError {
    fn from(e: mlbstats_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<csv::Error> for MlbStatsError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<std::io::Error> for MlbStatsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for MlbStatsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
