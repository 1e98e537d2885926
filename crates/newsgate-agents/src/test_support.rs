//! Scripted collaborators for driving a [`Relay`](crate::Relay) without network access.
//!
//! `MockModel` and `RecordingDispatcher` record what they were asked so tests
//! can assert on the prompt that reached the model and on which webhook fired.

use std::sync::Mutex;

use async_trait::async_trait;
use newsgate_models::{Destinations, NewsDigest, NewsItem};

use crate::dispatcher::WebhookDispatcher;
use crate::error::RelayError;
use crate::judge::JudgmentModel;
use crate::news::NewsSource;

pub const TRADE_URL: &str = "https://hooks.test/trade";
pub const NO_TRADE_URL: &str = "https://hooks.test/no-trade";

pub fn destinations() -> Destinations {
    Destinations {
        trade: TRADE_URL.to_string(),
        no_trade: NO_TRADE_URL.to_string(),
    }
}

/// News source returning a fixed digest or a fixed upstream error.
pub struct MockNews {
    result: Result<NewsDigest, (u16, String)>,
}

impl MockNews {
    pub fn with_headlines(titles: &[&str]) -> Self {
        let items: Vec<NewsItem> = titles
            .iter()
            .map(|t| NewsItem {
                title: t.to_string(),
                description: Some(format!("Details on {t}")),
                published_at: None,
            })
            .collect();
        Self {
            result: Ok(NewsDigest::from_items(&items)),
        }
    }

    pub fn empty() -> Self {
        Self {
            result: Ok(NewsDigest::empty()),
        }
    }

    /// Fail as if the provider answered with `status` and `body`.
    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            result: Err((status, body.to_string())),
        }
    }
}

#[async_trait]
impl NewsSource for MockNews {
    async fn fetch_recent_news(&self) -> Result<NewsDigest, RelayError> {
        match &self.result {
            Ok(digest) => Ok(digest.clone()),
            Err((status, body)) => Err(RelayError::Upstream {
                service: "News API",
                message: format!("HTTP {status}: {body}"),
            }),
        }
    }
}

/// News source that panics, for exercising the outer error boundary.
pub struct PanickingNews;

#[async_trait]
impl NewsSource for PanickingNews {
    async fn fetch_recent_news(&self) -> Result<NewsDigest, RelayError> {
        panic!("news source exploded");
    }
}

enum ModelBehavior {
    Reply(String),
    Timeout,
    Fail(String),
}

/// Model returning canned text and recording every prompt it receives.
pub struct MockModel {
    behavior: ModelBehavior,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    fn with_behavior(behavior: ModelBehavior) -> Self {
        Self {
            behavior,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(raw: &str) -> Self {
        Self::with_behavior(ModelBehavior::Reply(raw.to_string()))
    }

    pub fn timing_out() -> Self {
        Self::with_behavior(ModelBehavior::Timeout)
    }

    pub fn failing(message: &str) -> Self {
        Self::with_behavior(ModelBehavior::Fail(message.to_string()))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl JudgmentModel for MockModel {
    async fn ask(&self, prompt: &str) -> Result<String, RelayError> {
        self.prompts
            .lock()
            .expect("mock lock poisoned")
            .push(prompt.to_string());

        match &self.behavior {
            ModelBehavior::Reply(raw) => Ok(raw.clone()),
            ModelBehavior::Timeout => Err(RelayError::Timeout {
                service: "OpenAI API",
                seconds: 10,
            }),
            ModelBehavior::Fail(message) => Err(RelayError::Upstream {
                service: "OpenAI API",
                message: message.clone(),
            }),
        }
    }
}

/// Dispatcher that records target URLs and answers with a fixed result.
pub struct RecordingDispatcher {
    accept: bool,
    calls: Mutex<Vec<String>>,
}

impl RecordingDispatcher {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl WebhookDispatcher for RecordingDispatcher {
    async fn dispatch(&self, url: &str) -> bool {
        self.calls
            .lock()
            .expect("mock lock poisoned")
            .push(url.to_string());
        self.accept
    }
}
