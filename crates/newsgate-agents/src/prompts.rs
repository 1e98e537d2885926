use newsgate_models::config::JudgmentConfig;

/// What the impact question is about.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptConfig {
    /// Market index, e.g. "SPX".
    pub index: String,
    pub threshold_bps: f64,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self::from(&JudgmentConfig::default())
    }
}

impl From<&JudgmentConfig> for PromptConfig {
    fn from(config: &JudgmentConfig) -> Self {
        Self {
            index: config.index.clone(),
            threshold_bps: config.threshold_bps,
        }
    }
}

/// Schema example the model must answer with.
fn response_schema() -> String {
    let example = serde_json::json!({
        "impact": "Yes | No",
        "confidence": "High | Low",
        "explanation": "<one or two sentences>"
    });
    serde_json::to_string_pretty(&example).unwrap_or_default()
}

/// Build the impact-analysis prompt for the given news summary.
pub fn impact_prompt(news_summary: &str, config: &PromptConfig) -> String {
    format!(
        "Based on historical data and your best judgment, will any of these events \
         affect the price of {index} by more than {threshold} basis points today?\n\n\
         ## NEWS\n\n\
         {news_summary}\n\n\
         ## ANSWER FORMAT\n\n\
         Answer \"Yes\" only if a move of that size is likely. Set confidence to \"High\" \
         only when the evidence is strong and specific; otherwise use \"Low\".\n\n\
         You MUST respond with ONLY a JSON object matching this schema, with no \
         markdown and no other text:\n\
         {schema}",
        index = config.index,
        threshold = config.threshold_bps,
        schema = response_schema(),
    )
}
