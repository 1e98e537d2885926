use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use crate::error::RelayError;

/// Fires a downstream webhook. Never fails: returns whether the hook accepted.
#[async_trait]
pub trait WebhookDispatcher: Send + Sync {
    async fn dispatch(&self, url: &str) -> bool;
}

/// POSTs an empty body and treats exactly HTTP 200 as success.
pub struct HttpDispatcher {
    client: Client,
    timeout: Duration,
}

impl HttpDispatcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    async fn try_dispatch(&self, url: &str) -> Result<(), RelayError> {
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RelayError::Dispatch(format!(
                        "request timed out after {} seconds",
                        self.timeout.as_secs()
                    ))
                } else {
                    RelayError::Dispatch(format!("request failed: {e}"))
                }
            })?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(RelayError::Dispatch(format!("webhook returned HTTP {status}"))),
        }
    }
}

#[async_trait]
impl WebhookDispatcher for HttpDispatcher {
    async fn dispatch(&self, url: &str) -> bool {
        match self.try_dispatch(url).await {
            Ok(()) => {
                info!(url = %url, "Webhook triggered");
                true
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Webhook dispatch failed");
                false
            }
        }
    }
}
