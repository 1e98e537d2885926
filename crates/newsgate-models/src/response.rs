use serde::{Deserialize, Serialize};

/// JSON body returned by the trigger endpoint.
///
/// Serialized with a `status` tag of `"success"` or `"error"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RelayResponse {
    Success {
        message: String,
        news_headlines: Vec<String>,
        news_summary: String,
        gpt_explanation: String,
    },
    Error {
        message: String,
    },
}

impl RelayResponse {
    pub fn error(message: impl Into<String>) -> Self {
        RelayResponse::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RelayResponse::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            RelayResponse::Success { message, .. } | RelayResponse::Error { message } => message,
        }
    }
}
