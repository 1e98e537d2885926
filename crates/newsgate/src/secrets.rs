use std::path::Path;

use newsgate_agents::RelayError;
use newsgate_models::config::SecretsConfig;
use newsgate_models::{Credential, Destinations};

pub const MODEL_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";
pub const TRADE_URL_ENV: &str = "TRADE_WEBHOOK_URL";
pub const NO_TRADE_URL_ENV: &str = "NO_TRADE_WEBHOOK_URL";

/// Credentials and webhook URLs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub model_api_key: Credential,
    pub news_api_key: Credential,
    pub destinations: Destinations,
}

impl Secrets {
    /// Resolve every secret from the process environment, falling back to files.
    pub fn load(config: &SecretsConfig) -> Result<Self, RelayError> {
        Self::load_with(config, |name| std::env::var(name).ok())
    }

    /// Same as [`Secrets::load`] with an injectable environment lookup.
    pub fn load_with(
        config: &SecretsConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, RelayError> {
        let resolve = |var: &str, file: &Option<String>| resolve_secret(&env, var, file.as_deref());

        Ok(Self {
            model_api_key: Credential::new(resolve(MODEL_API_KEY_ENV, &config.model_api_key_file)?),
            news_api_key: Credential::new(resolve(NEWS_API_KEY_ENV, &config.news_api_key_file)?),
            destinations: Destinations {
                trade: resolve(TRADE_URL_ENV, &config.trade_url_file)?,
                no_trade: resolve(NO_TRADE_URL_ENV, &config.no_trade_url_file)?,
            },
        })
    }
}

fn resolve_secret(
    env: &impl Fn(&str) -> Option<String>,
    var: &str,
    file: Option<&str>,
) -> Result<String, RelayError> {
    if let Some(value) = env(var).map(|v| v.trim().to_string()) {
        if !value.is_empty() {
            return Ok(value);
        }
    }

    let Some(path) = file else {
        return Err(RelayError::Configuration(format!(
            "{var} is not set and no secret file is configured"
        )));
    };

    let value = read_secret_file(Path::new(path))?;
    if value.is_empty() {
        return Err(RelayError::Configuration(format!(
            "Secret file {path} is empty"
        )));
    }
    Ok(value)
}

fn read_secret_file(path: &Path) -> Result<String, RelayError> {
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            RelayError::Configuration(format!(
                "Failed to read secret file {}: {e}",
                path.display()
            ))
        })
}
