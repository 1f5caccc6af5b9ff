//! Error taxonomy for fetch and extraction operations
//!
//! Extraction-level misses are recoverable: they degrade to absent
//! fields or skipped records. Fetch-level failures are reported upward
//! as an absent result for that one entity; the batch continues.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ScrapeError {
    #[error("timed out after {seconds}s waiting for '{marker}' at {url}")]
    FetchTimeout {
        url: String,
        marker: String,
        seconds: u64,
    },

    #[error("HTTP request failed with status {status}: {url}")]
    FetchFailed { status: u16, url: String },

    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("browser session error: {message}")]
    Browser { message: String },

    #[error("expected element '{field}' not found in document")]
    ExtractionMiss { field: String },

    #[error("invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("not found upstream: {entity}")]
    NotFound { entity: String },
}

impl ScrapeError {
    pub fn extraction_miss(field: &str) -> Self {
        Self::ExtractionMiss {
            field: field.to_string(),
        }
    }

    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the batch should carry on with the next entity after
    /// hitting this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::FetchTimeout { .. } => true,
            Self::FetchFailed { status, .. } => *status < 500,
            Self::Network { .. } => true,
            Self::Browser { .. } => true,
            Self::ExtractionMiss { .. } => true,
            Self::NotFound { .. } => true,
            Self::InvalidSelector { .. } => false,
        }
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
