use chrono::NaiveDate;
use thiserror::Error;

/// Terminal outcome of one upstream request. Nothing is retried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeedError {
    /// Network failure or non-2xx response
    #[error("request to {endpoint} failed{}: {message}", status_suffix(.status))]
    Transport {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    /// Body does not match the expected schema
    #[error("response from {endpoint} failed validation: {message}")]
    Validation { endpoint: String, message: String },

    /// Rejected before any request was sent
    #[error("invalid date range {start}..={end}: {reason}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
        reason: String,
    },
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

impl FeedError {
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        FeedError::Transport {
            endpoint: endpoint.into(),
            status: None,
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FeedError::Transport { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, FeedError::Validation { .. })
    }
}
