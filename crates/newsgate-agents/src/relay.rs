use std::sync::Arc;
use std::time::Instant;

use newsgate_models::{
    Destinations, DispatchOutcome, JudgmentResult, NewsDigest, RelayResponse, Signal,
};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::dispatcher::WebhookDispatcher;
use crate::error::RelayError;
use crate::judge::JudgmentModel;
use crate::news::NewsSource;
use crate::parser::parse_judgment;
use crate::policy::signal_for;
use crate::prompts::{impact_prompt, PromptConfig};

/// Message returned when the pipeline dies without a typed error.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error while processing the request.";

/// Everything one relay invocation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayReport {
    pub digest: NewsDigest,
    pub judgment: JudgmentResult,
    pub signal: Signal,
    pub dispatch: DispatchOutcome,
    pub message: String,
}

impl RelayReport {
    pub fn into_response(self) -> RelayResponse {
        RelayResponse::Success {
            message: self.message,
            news_headlines: self.digest.headlines,
            news_summary: self.digest.summary,
            gpt_explanation: self.judgment.explanation,
        }
    }
}

/// Runs news → model → policy → webhook for one request.
///
/// Holds only immutable collaborators, so one instance is shared by all requests.
pub struct Relay {
    news: Arc<dyn NewsSource>,
    model: Arc<dyn JudgmentModel>,
    dispatcher: Arc<dyn WebhookDispatcher>,
    destinations: Destinations,
    prompt: PromptConfig,
}

impl Relay {
    pub fn new(
        news: Arc<dyn NewsSource>,
        model: Arc<dyn JudgmentModel>,
        dispatcher: Arc<dyn WebhookDispatcher>,
        destinations: Destinations,
        prompt: PromptConfig,
    ) -> Self {
        Self {
            news,
            model,
            dispatcher,
            destinations,
            prompt,
        }
    }

    pub fn destinations(&self) -> &Destinations {
        &self.destinations
    }

    /// Run the pipeline once. News and model failures abort; parse and
    /// dispatch failures are absorbed into the report.
    pub async fn run(&self) -> Result<RelayReport, RelayError> {
        let start = Instant::now();

        // 1. Latest news
        let digest = self.news.fetch_recent_news().await?;
        info!(headlines = digest.headlines.len(), "News fetched");

        // 2. Ask the model and decode its answer
        let prompt = impact_prompt(&digest.summary, &self.prompt);
        let raw = self.model.ask(&prompt).await?;
        let judgment = parse_judgment(&raw);
        info!(
            impact = ?judgment.impact,
            confidence = ?judgment.confidence,
            "Model judgment received"
        );

        // 3. Decide
        let signal = signal_for(&judgment);

        // 4. Fire exactly one webhook
        let target_url = self.destinations.url_for(signal).to_string();
        let success = self.dispatcher.dispatch(&target_url).await;
        let message = signal.status_message(success).to_string();

        info!(
            trade = matches!(signal, Signal::Trade),
            dispatched = success,
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Relay complete"
        );

        Ok(RelayReport {
            digest,
            judgment,
            signal,
            dispatch: DispatchOutcome {
                success,
                target_url,
            },
            message,
        })
    }

    /// Run the pipeline on its own task and always produce a payload.
    ///
    /// A panic inside the pipeline is caught here and reported as a generic error.
    pub async fn respond(self: &Arc<Self>) -> RelayResponse {
        let request_id = Uuid::new_v4();
        let relay = Arc::clone(self);
        let span = info_span!("relay", %request_id);

        let handle = tokio::spawn(async move { relay.run().await }.instrument(span));

        match handle.await {
            Ok(Ok(report)) => report.into_response(),
            Ok(Err(e)) => {
                error!(%request_id, error = %e, "Relay failed");
                RelayResponse::error(e.to_string())
            }
            Err(e) => {
                error!(%request_id, error = %e, "Relay task panicked");
                RelayResponse::error(INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}
