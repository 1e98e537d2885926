//! The full app served on an ephemeral port, with every outbound service
//! replaced by a `mockito` server.

use std::sync::Arc;

use mockito::{Matcher, Mock, ServerGuard};
use newsgate::secrets::Secrets;
use newsgate_models::{Credential, Destinations, RelayConfig, RelayResponse};
use serde_json::json;

struct Upstreams {
    news: ServerGuard,
    model: ServerGuard,
    hooks: ServerGuard,
}

impl Upstreams {
    async fn start() -> Self {
        Self {
            news: mockito::Server::new_async().await,
            model: mockito::Server::new_async().await,
            hooks: mockito::Server::new_async().await,
        }
    }

    fn config(&self) -> RelayConfig {
        let mut config = RelayConfig::default();
        config.news.endpoint = format!("{}/v2/everything", self.news.url());
        config.news.timeout_seconds = 2;
        config.judgment.endpoint = format!("{}/v1/chat/completions", self.model.url());
        config.judgment.timeout_seconds = 2;
        config.webhooks.timeout_seconds = 2;
        config
    }

    fn secrets(&self) -> Secrets {
        Secrets {
            model_api_key: Credential::new("sk-test"),
            news_api_key: Credential::new("news-test"),
            destinations: Destinations {
                trade: format!("{}/hook/trade", self.hooks.url()),
                no_trade: format!("{}/hook/no-trade", self.hooks.url()),
            },
        }
    }

    async fn hook(&mut self, path: &str, hits: usize) -> Mock {
        self.hooks
            .mock("POST", path)
            .with_status(200)
            .expect(hits)
            .create_async()
            .await
    }

    async fn model_reply(&mut self, content: &str) -> Mock {
        self.model
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_body(json!({"choices": [{"message": {"content": content}}]}).to_string())
            .create_async()
            .await
    }
}

/// Serve the app and return its base URL.
async fn spawn_app(upstreams: &Upstreams) -> String {
    let config = upstreams.config();
    let relay = Arc::new(newsgate::build_relay(&config, &upstreams.secrets()).unwrap());
    let app = newsgate::server::router(relay, &config.server.route);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn news_outage_returns_500_and_fires_no_webhook() {
    let mut up = Upstreams::start().await;
    let _news = up
        .news
        .mock("GET", "/v2/everything")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;
    let model = up
        .model
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;
    let trade = up.hook("/hook/trade", 0).await;
    let no_trade = up.hook("/hook/no-trade", 0).await;

    let base = spawn_app(&up).await;
    let response = reqwest::get(format!("{base}/trigger")).await.unwrap();

    assert_eq!(response.status(), 500);
    let body: RelayResponse = response.json().await.unwrap();
    match body {
        RelayResponse::Error { message } => assert!(message.contains("503")),
        other => panic!("expected error payload, got {other:?}"),
    }

    model.assert_async().await;
    trade.assert_async().await;
    no_trade.assert_async().await;
}

#[tokio::test]
async fn high_confidence_impact_fires_no_trade_hook() {
    let mut up = Upstreams::start().await;
    let _news = up
        .news
        .mock("GET", "/v2/everything")
        .match_header("x-api-key", "news-test")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({"articles": [{"title": "Fed announces surprise hike", "description": "Markets react"}]})
                .to_string(),
        )
        .create_async()
        .await;
    let _model = up
        .model_reply(r#"{"impact":"Yes","confidence":"High","explanation":"Rate hike announced"}"#)
        .await;
    let trade = up.hook("/hook/trade", 0).await;
    let no_trade = up.hook("/hook/no-trade", 1).await;

    let base = spawn_app(&up).await;
    let response = reqwest::Client::new()
        .post(format!("{base}/trigger"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "High volatility detected; trading paused.");
    assert_eq!(body["news_headlines"], json!(["Fed announces surprise hike"]));
    assert_eq!(
        body["news_summary"],
        "- Fed announces surprise hike: Markets react"
    );
    assert_eq!(body["gpt_explanation"], "Rate hike announced");

    trade.assert_async().await;
    no_trade.assert_async().await;
}

#[tokio::test]
async fn empty_news_and_fenced_reply_fire_trade_hook() {
    let mut up = Upstreams::start().await;
    let _news = up
        .news
        .mock("GET", "/v2/everything")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"ok","articles":[]}"#)
        .create_async()
        .await;
    let _model = up
        .model_reply("```json\n{\"impact\": \"no\", \"explanation\": \"Quiet tape\"}\n```")
        .await;
    let trade = up.hook("/hook/trade", 1).await;
    let no_trade = up.hook("/hook/no-trade", 0).await;

    let base = spawn_app(&up).await;
    let response = reqwest::get(format!("{base}/trigger")).await.unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Market conditions are stable; trading triggered.");
    assert_eq!(body["news_headlines"], json!([]));
    assert_eq!(body["news_summary"], "No breaking news available.");
    assert_eq!(body["gpt_explanation"], "Quiet tape");

    trade.assert_async().await;
    no_trade.assert_async().await;
}

#[tokio::test]
async fn rejected_webhook_is_reported_in_message_not_status() {
    let mut up = Upstreams::start().await;
    let _news = up
        .news
        .mock("GET", "/v2/everything")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"articles":[{"title":"Calm session"}]}"#)
        .create_async()
        .await;
    let _model = up
        .model_reply(r#"{"impact":"No","confidence":"High","explanation":"Nothing notable"}"#)
        .await;
    let _trade = up
        .hooks
        .mock("POST", "/hook/trade")
        .with_status(500)
        .create_async()
        .await;

    let base = spawn_app(&up).await;
    let response = reqwest::get(format!("{base}/trigger")).await.unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Failed to trigger trading.");
}

#[tokio::test]
async fn health_reports_ok() {
    let up = Upstreams::start().await;
    let base = spawn_app(&up).await;

    let body: serde_json::Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
