use axum::{extract::State, Json};
use mailbrief_core::{error::MailbriefError, normalize, Summary};
use mailbrief_webhook::WebhookRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::{error_reply, ApiError};
use crate::app::AppState;

pub const FETCH_FAILED: &str = "Failed to fetch summaries";

#[derive(Debug, Serialize, Deserialize)]
pub struct SummariesReply {
    pub summaries: Vec<Summary>,
}

/// GET /summaries — pull the latest batch from the webhook and normalize it.
///
/// Always answers with an array; a single object upstream becomes a
/// one-element list.
pub async fn summaries_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SummariesReply>, ApiError> {
    let raw = state
        .webhook
        .call(&state.config.webhook.summaries_url, WebhookRequest::Get)
        .await
        .map_err(|e| error_reply(MailbriefError::upstream(FETCH_FAILED, e)))?;

    let summaries = normalize(raw);
    info!(count = summaries.len(), "summaries fetched");
    Ok(Json(SummariesReply { summaries }))
}
