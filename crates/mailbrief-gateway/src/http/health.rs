use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;

/// Short git commit hash embedded at compile time by build.rs.
pub const GIT_SHA: &str = env!("MAILBRIEF_GIT_SHA");

/// GET /health — liveness probe, returns server metadata.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "commit": GIT_SHA,
        "webhook_client": state.webhook.name(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::app::tests::{router_with, send, FakeWebhook};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn reports_ok_without_calling_webhook() {
        let fake = FakeWebhook::failing();
        let calls = fake.calls.clone();

        let (status, body) = send(router_with(fake), "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["webhook_client"], json!("fake"));
        assert!(calls.lock().unwrap().is_empty());
    }
}
