use newsgate_models::{Confidence, Impact, JudgmentResult};
use serde::Deserialize;
use tracing::warn;

use crate::error::RelayError;

/// Wire shape of the model's JSON answer. Every field is optional so that
/// partially filled answers still decode.
#[derive(Debug, Deserialize)]
struct RawJudgment {
    impact: Option<String>,
    confidence: Option<String>,
    explanation: Option<String>,
}

impl From<RawJudgment> for JudgmentResult {
    fn from(raw: RawJudgment) -> Self {
        JudgmentResult {
            impact: raw
                .impact
                .as_deref()
                .map(Impact::from_label)
                .unwrap_or(Impact::Unknown),
            confidence: raw.confidence.as_deref().map(Confidence::from_label),
            explanation: raw.explanation.unwrap_or_default().trim().to_string(),
        }
    }
}

/// Strip markdown code fences and a leading `json` language marker.
///
/// Handles:
/// - Clean JSON: `{"impact": "No"}`
/// - Fenced: ```` ```json\n{"impact": "No"}\n``` ````
/// - Fence without language, or `JSON`/`Json` markers
pub fn sanitize(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text = text.trim_start();
    if text.get(..4).is_some_and(|m| m.eq_ignore_ascii_case("json")) {
        text = &text[4..];
    }

    text.trim()
}

/// Decode a judgment, returning a parse error instead of falling back.
pub fn try_parse_judgment(raw: &str) -> Result<JudgmentResult, RelayError> {
    let cleaned = sanitize(raw);

    let first_err = match serde_json::from_str::<RawJudgment>(cleaned) {
        Ok(parsed) => return Ok(parsed.into()),
        Err(e) => e,
    };

    // Prose around the object, e.g. "Here is my answer: {...}"
    if let Some(object) = extract_first_object(raw) {
        if let Ok(parsed) = serde_json::from_str::<RawJudgment>(object) {
            return Ok(parsed.into());
        }
    }

    Err(RelayError::Parse(format!(
        "{first_err} (length={})",
        raw.len()
    )))
}

/// Parse the model's reply into a judgment. Never fails: malformed replies
/// become [`JudgmentResult::fallback`] and are logged.
pub fn parse_judgment(raw: &str) -> JudgmentResult {
    match try_parse_judgment(raw) {
        Ok(result) => result,
        Err(e) => {
            warn!(raw = %raw, error = %e, "Failed to parse model response; using fallback judgment");
            JudgmentResult::fallback()
        }
    }
}

/// Locate the JSON object inside a reply that wraps it in prose, e.g.
/// `Here is my analysis: {...} Let me know if...`. Braces inside string
/// literals are ignored and a stray `}` before the object is skipped.
fn extract_first_object(text: &str) -> Option<&str> {
    let mut depth = 0;
    let mut start = None;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' if !in_string && depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return start.map(|s| &text[s..=i]);
                }
            }
            _ => {}
        }
    }

    None
}
