//! Message submission — POST /submit (alias: POST /api/submit-message)
//!
//! Request:  `{"message": "..."}`
//! Response: `{"success": true, "data": <webhook response>}`
//! Error:    `{"error": "..."}`
//!
//! The webhook receives `{"message": "...", "timestamp": "<RFC 3339>"}`.

use axum::{body::Bytes, extract::State, Json};
use mailbrief_core::{
    error::{MailbriefError, Result},
    summary::MESSAGE_REQUIRED,
    OutboundMessage,
};
use mailbrief_webhook::WebhookRequest;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use super::{error_reply, ApiError};
use crate::app::AppState;

pub const SUBMIT_FAILED: &str = "Failed to process message";

/// POST /submit — validate, stamp, and forward one message to the webhook.
///
/// Blank input is rejected with 400 before any network call.
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> std::result::Result<Json<Value>, ApiError> {
    let data = relay_message(&state, &body).await.map_err(error_reply)?;
    Ok(Json(json!({"success": true, "data": data})))
}

async fn relay_message(state: &AppState, body: &[u8]) -> Result<Value> {
    let message = extract_message(body)?;
    let outbound = OutboundMessage::new(&message)?;
    let payload = serde_json::to_value(&outbound)?;

    let data = state
        .webhook
        .call(&state.config.webhook.submit_url, WebhookRequest::Post(payload))
        .await
        .map_err(|e| MailbriefError::upstream(SUBMIT_FAILED, e))?;

    info!(bytes = message.len(), "message forwarded to webhook");
    Ok(data)
}

/// Pull a string `message` out of a JSON object body. Anything else counts
/// as a missing message.
fn extract_message(body: &[u8]) -> Result<String> {
    let required = || MailbriefError::Validation(MESSAGE_REQUIRED.to_string());

    let value: Value = serde_json::from_slice(body).map_err(|_| required())?;
    value["message"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(required)
}
