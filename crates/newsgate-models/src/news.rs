use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary used when the news provider returns no articles.
pub const NO_NEWS_SUMMARY: &str = "No breaking news available.";

/// A single news article as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl NewsItem {
    /// One bullet line for the prompt summary.
    pub fn summary_line(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(desc) if !desc.is_empty() => format!("- {}: {}", self.title, desc),
            _ => format!("- {}", self.title),
        }
    }
}

/// Headlines plus a prompt-ready summary of the latest news.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsDigest {
    pub headlines: Vec<String>,
    pub summary: String,
}

impl NewsDigest {
    /// Build a digest from items in provider order.
    ///
    /// An empty slice yields no headlines and [`NO_NEWS_SUMMARY`].
    pub fn from_items(items: &[NewsItem]) -> Self {
        if items.is_empty() {
            return Self::empty();
        }

        Self {
            headlines: items.iter().map(|i| i.title.clone()).collect(),
            summary: items
                .iter()
                .map(NewsItem::summary_line)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn empty() -> Self {
        Self {
            headlines: Vec::new(),
            summary: NO_NEWS_SUMMARY.to_string(),
        }
    }
}
