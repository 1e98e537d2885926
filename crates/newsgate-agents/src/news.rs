use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsgate_models::config::NewsConfig;
use newsgate_models::{Credential, NewsDigest, NewsItem};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::RelayError;

const SERVICE: &str = "News API";
const API_KEY_HEADER: &str = "X-Api-Key";

/// Source of the latest headlines. Mockable for testing.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_recent_news(&self) -> Result<NewsDigest, RelayError>;
}

#[derive(Deserialize)]
struct ArticlesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    title: Option<String>,
    description: Option<String>,
    published_at: Option<String>,
}

impl Article {
    fn into_item(self) -> Option<NewsItem> {
        let title = self.title.map(|t| t.trim().to_string())?;
        if title.is_empty() {
            return None;
        }
        Some(NewsItem {
            title,
            description: self.description,
            published_at: self
                .published_at
                .as_deref()
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|ts| ts.with_timezone(&Utc)),
        })
    }
}

/// Client for a NewsAPI-style `articles` endpoint.
pub struct NewsApiClient {
    client: Client,
    credential: Credential,
    config: NewsConfig,
}

impl NewsApiClient {
    pub fn new(credential: Credential, config: NewsConfig) -> Self {
        Self {
            client: Client::new(),
            credential,
            config,
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("language", self.config.language.clone()),
            ("sortBy", "publishedAt".to_string()),
            ("pageSize", self.config.effective_page_size().to_string()),
        ];
        if let Some(q) = self.config.query.as_deref().filter(|q| !q.trim().is_empty()) {
            params.push(("q", q.to_string()));
        }
        params
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch_recent_news(&self) -> Result<NewsDigest, RelayError> {
        debug!(endpoint = %self.config.endpoint, "Fetching latest news");

        let response = self
            .client
            .get(&self.config.endpoint)
            .header(API_KEY_HEADER, self.credential.expose())
            .query(&self.query_params())
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| RelayError::from_transport(SERVICE, self.timeout(), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::from_transport(SERVICE, self.timeout(), e))?;

        if !status.is_success() {
            warn!(%status, body = %body, "News request failed");
            return Err(RelayError::bad_status(SERVICE, status, &body));
        }

        let parsed: ArticlesResponse = serde_json::from_str(&body)?;
        let items: Vec<NewsItem> = parsed
            .articles
            .into_iter()
            .filter_map(Article::into_item)
            .take(usize::from(self.config.effective_page_size()))
            .collect();

        debug!(count = items.len(), "News fetched");
        Ok(NewsDigest::from_items(&items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(config: NewsConfig) -> NewsApiClient {
        NewsApiClient::new(Credential::new("news-key"), config)
    }

    #[test]
    fn query_params_include_recency_and_language() {
        let params = client(NewsConfig::default()).query_params();
        assert!(!params.iter().any(|(_, v)| v == "news-key"));
        assert!(params.contains(&("language", "en".to_string())));
        assert!(params.contains(&("sortBy", "publishedAt".to_string())));
        assert!(params.contains(&("pageSize", "5".to_string())));
        assert!(params.iter().any(|(k, _)| *k == "q"));
    }

    #[test]
    fn blank_query_is_omitted() {
        let config = NewsConfig {
            query: Some("  ".to_string()),
            page_size: 9,
            ..NewsConfig::default()
        };
        let params = client(config).query_params();
        assert!(!params.iter().any(|(k, _)| *k == "q"));
        assert!(params.contains(&("pageSize", "5".to_string())));
    }

    #[test]
    fn articles_without_title_are_skipped() {
        let body = r#"{
            "status": "ok",
            "totalResults": 3,
            "articles": [
                {"title": "Fed holds rates", "description": "No change", "publishedAt": "2024-09-18T18:00:00Z"},
                {"title": null, "description": "orphan"},
                {"title": "Oil slides", "description": null}
            ]
        }"#;
        let parsed: ArticlesResponse = serde_json::from_str(body).unwrap();
        let items: Vec<NewsItem> = parsed
            .articles
            .into_iter()
            .filter_map(Article::into_item)
            .collect();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Fed holds rates");
        assert!(items[0].published_at.is_some());
        assert_eq!(items[1].description, None);
    }

    #[test]
    fn missing_articles_field_is_empty() {
        let parsed: ArticlesResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(parsed.articles.is_empty());
    }
}
