use axum::{
    routing::{get, post},
    Router,
};
use mailbrief_core::config::MailbriefConfig;
use mailbrief_webhook::WebhookClient;
use std::sync::Arc;

use crate::http::{health, method_not_allowed, submit, summaries, ui};

/// Shared state — passed as Arc<AppState> to all Axum handlers.
///
/// Read-only after startup: requests share nothing mutable.
pub struct AppState {
    pub config: MailbriefConfig,
    pub webhook: Box<dyn WebhookClient>,
}

impl AppState {
    pub fn new(config: MailbriefConfig, webhook: Box<dyn WebhookClient>) -> Self {
        Self { config, webhook }
    }
}

/// Assemble the full Axum router.
///
/// `/api/submit-message` and `/api/get-summaries` are kept as aliases for
/// pages written against the old paths. HEAD is refused explicitly on the
/// summaries routes, since `get` would otherwise answer it with a real fetch.
pub fn build_router(state: Arc<AppState>) -> Router {
    let submit_route = || post(submit::submit_handler).fallback(method_not_allowed);
    let summaries_route = || {
        get(summaries::summaries_handler)
            .head(method_not_allowed)
            .fallback(method_not_allowed)
    };

    Router::new()
        .route("/", get(ui::ui_handler))
        .route("/health", get(health::health_handler))
        .route("/submit", submit_route())
        .route("/api/submit-message", submit_route())
        .route("/summaries", summaries_route())
        .route("/api/get-summaries", summaries_route())
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
