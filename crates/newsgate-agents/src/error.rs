use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{service} error: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    #[error("Request to {service} timed out after {seconds} seconds.")]
    Timeout { service: &'static str, seconds: u64 },

    #[error("Model response parse error: {0}")]
    Parse(String),

    #[error("Webhook dispatch error: {0}")]
    Dispatch(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RelayError {
    /// Map a reqwest failure, keeping timeouts distinct from other transport errors.
    /// The request URL is dropped from the message.
    pub(crate) fn from_transport(
        service: &'static str,
        timeout: Duration,
        err: reqwest::Error,
    ) -> Self {
        if err.is_timeout() {
            RelayError::Timeout {
                service,
                seconds: timeout.as_secs(),
            }
        } else {
            RelayError::Upstream {
                service,
                message: format!("request failed: {}", err.without_url()),
            }
        }
    }

    pub(crate) fn bad_status(
        service: &'static str,
        status: reqwest::StatusCode,
        body: &str,
    ) -> Self {
        RelayError::Upstream {
            service,
            message: format!("HTTP {status}: {body}"),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RelayError::Timeout { .. })
    }
}
