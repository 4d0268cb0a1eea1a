use async_trait::async_trait;
use serde_json::Value;

/// One outbound call. Only POST carries a body.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookRequest {
    Get,
    Post(Value),
}

impl WebhookRequest {
    pub fn method(&self) -> &'static str {
        match self {
            WebhookRequest::Get => "GET",
            WebhookRequest::Post(_) => "POST",
        }
    }
}

/// Anything that can deliver a request to an automation webhook and hand
/// back its JSON response untouched.
#[async_trait]
pub trait WebhookClient: Send + Sync {
    fn name(&self) -> &str;

    /// Issue exactly one request. No retries; the first failure is final.
    async fn call(&self, url: &str, request: WebhookRequest) -> Result<Value, WebhookError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("invalid webhook URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed JSON from webhook: {0}")]
    Parse(String),
}
