//! newsgate - news-driven trade / no-trade webhook relay
//!
//! On each request the relay pulls the latest headlines, asks a language
//! model whether they will move the tracked index, and fires one of two
//! downstream webhooks.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use newsgate::models::RelayConfig;
//! use newsgate::secrets::Secrets;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = RelayConfig::default();
//! let secrets = Secrets::load(&config.secrets)?;
//! let relay = std::sync::Arc::new(newsgate::build_relay(&config, &secrets)?);
//! let payload = relay.respond().await;
//! println!("{}", serde_json::to_string(&payload)?);
//! # Ok(())
//! # }
//! ```

pub use newsgate_agents as agents;
pub use newsgate_models as models;

pub mod secrets;
pub mod server;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use newsgate_agents::{
    ChatConfig, HttpDispatcher, JudgmentModel, NewsApiClient, NewsSource, OpenAiJudge,
    PromptConfig, Relay, RelayError, WebhookDispatcher,
};
use newsgate_models::config::RelayConfig;
use tracing::info;

use crate::secrets::Secrets;

/// Read a TOML config file.
pub fn load_config(path: impl AsRef<Path>) -> Result<RelayConfig, anyhow::Error> {
    let path = path.as_ref();
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&config_str).with_context(|| "Failed to parse config")
}

/// Wire the HTTP clients into a relay.
pub fn build_relay(config: &RelayConfig, secrets: &Secrets) -> Result<Relay, RelayError> {
    validate_route(&config.server.route)?;

    let news: Arc<dyn NewsSource> = Arc::new(NewsApiClient::new(
        secrets.news_api_key.clone(),
        config.news.clone(),
    ));
    let model: Arc<dyn JudgmentModel> = Arc::new(OpenAiJudge::new(
        secrets.model_api_key.clone(),
        ChatConfig::from(&config.judgment),
    ));
    let dispatcher: Arc<dyn WebhookDispatcher> = Arc::new(HttpDispatcher::new(
        Duration::from_secs(config.webhooks.timeout_seconds),
    ));

    Ok(Relay::new(
        news,
        model,
        dispatcher,
        secrets.destinations.clone(),
        PromptConfig::from(&config.judgment),
    ))
}

/// Reject trigger routes the router cannot register.
fn validate_route(route: &str) -> Result<(), RelayError> {
    let problem = if !route.starts_with('/') {
        Some("must start with '/'")
    } else if route == server::HEALTH_ROUTE {
        Some("collides with the health endpoint")
    } else if route.contains(['{', '}', '*', ':']) {
        Some("must be a literal path without '{', '}', '*' or ':'")
    } else {
        None
    };

    match problem {
        Some(problem) => Err(RelayError::Configuration(format!(
            "server.route {problem}: {route}"
        ))),
        None => Ok(()),
    }
}

/// Bind `addr` and serve the relay until the process receives Ctrl+C.
pub async fn serve(relay: Arc<Relay>, addr: &str, route: &str) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, route, "newsgate listening");

    axum::serve(listener, server::router(relay, route))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await
        .context("Server error")
}
