use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use newsgate_agents::Relay;
use newsgate_models::RelayResponse;
use serde::Serialize;
use tower_http::trace::TraceLayer;

pub const HEALTH_ROUTE: &str = "/health";

/// Liveness payload for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Pairs a relay payload with its HTTP status: 200 for success, 500 for error.
pub struct RelayReply(pub RelayResponse);

impl IntoResponse for RelayReply {
    fn into_response(self) -> Response {
        let status = if self.0.is_success() {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(self.0)).into_response()
    }
}

/// Build the application router. The trigger route accepts GET and POST.
pub fn router(relay: Arc<Relay>, route: &str) -> Router {
    Router::new()
        .route(route, get(trigger).post(trigger))
        .route(HEALTH_ROUTE, get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(relay)
}

async fn trigger(State(relay): State<Arc<Relay>>) -> RelayReply {
    RelayReply(relay.respond().await)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_payload_maps_to_500() {
        let response = RelayReply(RelayResponse::error("news down")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn success_payload_maps_to_200() {
        let response = RelayReply(RelayResponse::Success {
            message: "ok".to_string(),
            news_headlines: vec![],
            news_summary: "No breaking news available.".to_string(),
            gpt_explanation: String::new(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
