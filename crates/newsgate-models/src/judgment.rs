use serde::{Deserialize, Serialize};

/// Explanation carried by the fallback judgment.
pub const FALLBACK_EXPLANATION: &str = "Unable to parse model response due to formatting issues.";

/// Whether the news is expected to move the tracked index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Impact {
    Yes,
    No,
    Unknown,
}

impl Impact {
    /// Case-insensitive mapping of the model's label. Anything unrecognized is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "yes" => Impact::Yes,
            "no" => Impact::No,
            _ => Impact::Unknown,
        }
    }
}

/// The model's self-reported certainty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Confidence {
    High,
    Low,
    Unknown,
}

impl Confidence {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Confidence::High,
            "low" => Confidence::Low,
            _ => Confidence::Unknown,
        }
    }
}

/// Structured market-impact judgment extracted from the model's reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JudgmentResult {
    pub impact: Impact,
    /// `None` when the model did not state a confidence at all.
    pub confidence: Option<Confidence>,
    pub explanation: String,
}

impl JudgmentResult {
    /// The safe default used when the reply cannot be decoded.
    pub fn fallback() -> Self {
        Self {
            impact: Impact::Unknown,
            confidence: None,
            explanation: FALLBACK_EXPLANATION.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_labels_are_case_insensitive() {
        assert_eq!(Impact::from_label("YES"), Impact::Yes);
        assert_eq!(Impact::from_label(" no "), Impact::No);
        assert_eq!(Impact::from_label("maybe"), Impact::Unknown);
        assert_eq!(Impact::from_label(""), Impact::Unknown);
    }

    #[test]
    fn confidence_labels_are_case_insensitive() {
        assert_eq!(Confidence::from_label("High"), Confidence::High);
        assert_eq!(Confidence::from_label("LOW"), Confidence::Low);
        assert_eq!(Confidence::from_label("medium"), Confidence::Unknown);
    }

    #[test]
    fn fallback_shape() {
        let fallback = JudgmentResult::fallback();
        assert_eq!(fallback.impact, Impact::Unknown);
        assert_eq!(fallback.confidence, None);
        assert_eq!(
            fallback.explanation,
            "Unable to parse model response due to formatting issues."
        );
        assert!(fallback.is_fallback());
    }

    #[test]
    fn impact_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Impact::Yes).unwrap(), "\"Yes\"");
        assert_eq!(
            serde_json::to_string(&Confidence::Unknown).unwrap(),
            "\"Unknown\""
        );
    }
}
