//! Error types for the refresh and aggregation core.

use thiserror::Error;

/// Generic copy used when a failure carries no readable detail
pub const GENERIC_ERROR_DETAIL: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolderaError {
    /// Listing auction results failed
    #[error("Failed to fetch auction results: {0}")]
    FetchFailed(String),
    /// Submitting the refresh job failed (authorization failures included)
    #[error("Failed to refresh results: {0}")]
    SubmitFailed(String),
    /// Checking the refresh job status failed
    #[error("Failed to check task status: {0}")]
    PollFailed(String),
    /// A record carried values outside the expected domain
    #[error("Invalid aggregation input: {0}")]
    AggregationInputInvalid(String),
    #[error("Invalid transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    /// The orchestration context was torn down while the operation was in flight
    #[error("Refresh cancelled")]
    Cancelled,
}

impl SolderaError {
    pub fn fetch_failed(detail: impl Into<String>) -> Self {
        Self::FetchFailed(non_empty_detail(detail.into()))
    }

    pub fn submit_failed(detail: impl Into<String>) -> Self {
        Self::SubmitFailed(non_empty_detail(detail.into()))
    }

    pub fn poll_failed(detail: impl Into<String>) -> Self {
        Self::PollFailed(non_empty_detail(detail.into()))
    }
}

fn non_empty_detail(detail: String) -> String {
    if detail.trim().is_empty() {
        GENERIC_ERROR_DETAIL.to_string()
    } else {
        detail
    }
}

impl From<config::ConfigError> for SolderaError {
    fn from(error: config::ConfigError) -> Self {
        SolderaError::ConfigurationError(error.to_string())
    }
}

pub type SolderaResult<T> = std::result::Result<T, SolderaError>;
