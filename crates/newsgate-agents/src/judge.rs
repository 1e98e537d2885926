use std::time::Duration;

use async_trait::async_trait;
use newsgate_models::config::JudgmentConfig;
use newsgate_models::Credential;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RelayError;

const SERVICE: &str = "OpenAI API";

/// A language model that answers a single prompt with raw text. Mockable for testing.
#[async_trait]
pub trait JudgmentModel: Send + Sync {
    async fn ask(&self, prompt: &str) -> Result<String, RelayError>;
}

/// Settings for one chat-completion call.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::from(&JudgmentConfig::default())
    }
}

impl From<&JudgmentConfig> for ChatConfig {
    fn from(config: &JudgmentConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion client for an OpenAI-compatible endpoint.
pub struct OpenAiJudge {
    client: Client,
    credential: Credential,
    config: ChatConfig,
}

impl OpenAiJudge {
    pub fn new(credential: Credential, config: ChatConfig) -> Self {
        Self {
            client: Client::new(),
            credential,
            config,
        }
    }
}

#[async_trait]
impl JudgmentModel for OpenAiJudge {
    async fn ask(&self, prompt: &str) -> Result<String, RelayError> {
        debug!(model = %self.config.model, "Calling chat completion endpoint");

        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(self.credential.expose())
            .json(&request)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| RelayError::from_transport(SERVICE, self.config.timeout, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::from_transport(SERVICE, self.config.timeout, e))?;

        if !status.is_success() {
            warn!(%status, body = %body, "Chat completion request failed");
            return Err(RelayError::bad_status(SERVICE, status, &body));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| RelayError::Upstream {
                service: SERVICE,
                message: "response contained no choices".to_string(),
            })?;

        Ok(content.trim().to_string())
    }
}
