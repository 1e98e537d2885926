use serde::{Deserialize, Serialize};

/// Top-level configuration for newsgate.
///
/// Every section has defaults, so an empty TOML file is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RelayConfig {
    pub server: ServerConfig,
    pub news: NewsConfig,
    pub judgment: JudgmentConfig,
    pub webhooks: WebhookConfig,
    pub secrets: SecretsConfig,
}

/// Inbound HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:5000`.
    pub bind: String,
    /// Path of the trigger endpoint.
    pub route: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            route: "/trigger".to_string(),
        }
    }
}

/// News provider settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NewsConfig {
    pub endpoint: String,
    /// ISO-639-1 language filter.
    pub language: String,
    /// Number of articles to request. Clamped to 1..=5.
    pub page_size: u8,
    /// Optional search query; some provider endpoints require one.
    pub query: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://newsapi.org/v2/everything".to_string(),
            language: "en".to_string(),
            page_size: MAX_NEWS_PAGE_SIZE,
            query: Some("\"S&P 500\" OR \"Federal Reserve\" OR economy".to_string()),
            timeout_seconds: 10,
        }
    }
}

pub const MAX_NEWS_PAGE_SIZE: u8 = 5;

impl NewsConfig {
    pub fn effective_page_size(&self) -> u8 {
        self.page_size.clamp(1, MAX_NEWS_PAGE_SIZE)
    }
}

/// Language-model settings, including what the prompt asks about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JudgmentConfig {
    pub endpoint: String,
    pub model: String,
    /// Output cap for the completion.
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    /// Market index the model is asked about.
    pub index: String,
    /// Move size, in basis points, that counts as an impact.
    pub threshold_bps: f64,
}

impl Default for JudgmentConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4".to_string(),
            max_tokens: 150,
            timeout_seconds: 10,
            index: "SPX".to_string(),
            threshold_bps: 1.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WebhookConfig {
    pub timeout_seconds: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self { timeout_seconds: 10 }
    }
}

/// Where credentials and webhook URLs are read from at startup.
///
/// Environment variables take precedence over these files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SecretsConfig {
    pub model_api_key_file: Option<String>,
    pub news_api_key_file: Option<String>,
    pub trade_url_file: Option<String>,
    pub no_trade_url_file: Option<String>,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            model_api_key_file: Some("/etc/secrets/IndicatorKey.txt".to_string()),
            news_api_key_file: Some("/etc/secrets/NewsKey.txt".to_string()),
            trade_url_file: Some("/etc/secrets/TradeUrl.txt".to_string()),
            no_trade_url_file: Some("/etc/secrets/NoTradeUrl.txt".to_string()),
        }
    }
}
