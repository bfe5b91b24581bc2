//! Error types for the cohort builder.
//!
//! Every variant except the ones raised by payer classification is fatal:
//! the run aborts and `main` exits non-zero.

use thiserror::Error;

/// Top-level error returned by library operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing or invalid credential, output path or CLI value
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Data quality error: {0}")]
    DataQuality(#[from] DataQualityError),

    /// A stage needed a column the combined table does not have
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures talking to the remote query service. Never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Upstream values the pipeline cannot interpret.
#[derive(Debug, Error, PartialEq)]
pub enum DataQualityError {
    #[error("unsupported discharge year '{0}'")]
    UnsupportedYear(String),

    #[error("non-numeric value '{value}' in column '{column}'")]
    NonNumeric { column: String, value: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
