use std::fmt;

use serde::{Deserialize, Serialize};

/// The two downstream webhooks. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Destinations {
    pub trade: String,
    pub no_trade: String,
}

impl Destinations {
    pub fn url_for(&self, signal: Signal) -> &str {
        match signal {
            Signal::Trade => &self.trade,
            Signal::NoTrade => &self.no_trade,
        }
    }
}

/// Which webhook a request fires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Market looks stable; let the downstream bot trade.
    Trade,
    /// Volatility expected; pause trading.
    NoTrade,
}

impl Signal {
    /// Human-readable status for the response payload.
    pub fn status_message(self, dispatched: bool) -> &'static str {
        match (self, dispatched) {
            (Signal::Trade, true) => "Market conditions are stable; trading triggered.",
            (Signal::Trade, false) => "Failed to trigger trading.",
            (Signal::NoTrade, true) => "High volatility detected; trading paused.",
            (Signal::NoTrade, false) => "Failed to trigger no-trade.",
        }
    }
}

/// Result of firing one webhook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub success: bool,
    pub target_url: String,
}

/// API credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
