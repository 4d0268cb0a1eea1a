use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{WebhookClient, WebhookError, WebhookRequest};

/// reqwest-backed webhook client. The inner client is reused across calls;
/// no timeout is configured, so a stalled webhook stalls the caller.
pub struct HttpWebhookClient {
    client: reqwest::Client,
}

impl HttpWebhookClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn send(&self, url: &str, request: &WebhookRequest) -> Result<Value, WebhookError> {
        let parsed = Url::parse(url).map_err(|e| WebhookError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let builder = match request {
            WebhookRequest::Get => self.client.get(parsed),
            WebhookRequest::Post(body) => self
                .client
                .post(parsed)
                .header("content-type", "application/json")
                .json(body),
        };

        let resp = builder.send().await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(WebhookError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        decode_body(&text)
    }
}

impl Default for HttpWebhookClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookClient for HttpWebhookClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn call(&self, url: &str, request: WebhookRequest) -> Result<Value, WebhookError> {
        let method = request.method();
        debug!(method, url, "calling webhook");

        match self.send(url, &request).await {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(method, url, error = %e, "webhook call failed");
                Err(e)
            }
        }
    }
}

/// Empty 2xx bodies are common for fire-and-forget workflows; treat them as
/// JSON null instead of a parse failure.
fn decode_body(text: &str) -> Result<Value, WebhookError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| WebhookError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn decode_empty_body_is_null() {
        assert_eq!(decode_body("").unwrap(), Value::Null);
        assert_eq!(decode_body("  \n").unwrap(), Value::Null);
    }

    #[test]
    fn decode_garbage_is_parse_error() {
        assert!(matches!(decode_body("<html>"), Err(WebhookError::Parse(_))));
    }

    #[tokio::test]
    async fn placeholder_url_fails_at_call_time() {
        let client = HttpWebhookClient::new();
        let err = client
            .call("YOUR_N8N_WEBHOOK_URL_HERE", WebhookRequest::Get)
            .await
            .unwrap_err();
        assert!(matches!(err, WebhookError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn get_returns_body_unmodified() {
        let base = serve(Router::new().route(
            "/list",
            get(|| async { Json(json!([{"id": "1", "extra": {"kept": true}}])) }),
        ))
        .await;

        let value = HttpWebhookClient::new()
            .call(&format!("{base}/list"), WebhookRequest::Get)
            .await
            .unwrap();
        assert_eq!(value, json!([{"id": "1", "extra": {"kept": true}}]));
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let base = serve(Router::new().route(
            "/echo",
            post(|Json(body): Json<Value>| async move { Json(json!({"received": body})) }),
        ))
        .await;

        let value = HttpWebhookClient::new()
            .call(
                &format!("{base}/echo"),
                WebhookRequest::Post(json!({"message": "hi"})),
            )
            .await
            .unwrap();
        assert_eq!(value["received"]["message"], "hi");
    }

    #[tokio::test]
    async fn non_2xx_is_status_error() {
        let base = serve(Router::new().route(
            "/broken",
            get(|| async { (StatusCode::BAD_GATEWAY, "workflow crashed") }),
        ))
        .await;

        let err = HttpWebhookClient::new()
            .call(&format!("{base}/broken"), WebhookRequest::Get)
            .await
            .unwrap_err();
        match err {
            WebhookError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "workflow crashed");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
