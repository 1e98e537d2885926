pub mod config;
pub mod judgment;
pub mod news;
pub mod response;
pub mod signal;

pub use config::{
    JudgmentConfig, NewsConfig, RelayConfig, SecretsConfig, ServerConfig, WebhookConfig,
};
pub use judgment::{Confidence, Impact, JudgmentResult, FALLBACK_EXPLANATION};
pub use news::{NewsDigest, NewsItem, NO_NEWS_SUMMARY};
pub use response::RelayResponse;
pub use signal::{Credential, Destinations, DispatchOutcome, Signal};
