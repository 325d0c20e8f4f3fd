//! Error types for the efficiency analysis store

use crate::cli::types::AnalysisId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Database unavailable at {location}")]
    ConnectionUnavailable { location: String },

    #[error("No analysis record with id {id}")]
    NotFound { id: AnalysisId },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chart rendering failed: {message}")]
    Chart { message: String },

    #[error("Invalid value {value:?} for {var}")]
    InvalidConfig { var: String, value: String },
}

impl AnalysisError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for AnalysisError {
    fn from(err: rusqlite::Error) -> Self {
        AnalysisError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<std::num::ParseIntError> for AnalysisError {
    fn from(err: std::num::ParseIntError) -> Self {
        AnalysisError::invalid_input(format!("not an integer: {err}"))
    }
}

impl From<std::num::ParseFloatError> for AnalysisError {
    fn from(err: std::num::ParseFloatError) -> Self {
        AnalysisError::invalid_input(format!("not a number: {err}"))
    }
}

impl From<chrono::ParseError> for AnalysisError {
    fn from(err: chrono::ParseError) -> Self {
        AnalysisError::invalid_input(format!("expected a YYYY-MM-DD date: {err}"))
    }
}
