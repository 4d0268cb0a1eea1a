pub mod health;
pub mod submit;
pub mod summaries;
pub mod ui;

use axum::{http::StatusCode, Json};
use mailbrief_core::error::MailbriefError;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

pub type ApiError = (StatusCode, Json<Value>);

/// Map an error to its status and `{ "error": ... }` body.
///
/// Upstream detail is logged here and never leaves the process.
pub fn error_reply(err: MailbriefError) -> ApiError {
    if err.is_client_error() {
        debug!(code = err.code(), error = %err, "request rejected");
    }

    let status = match &err {
        MailbriefError::Validation(_) => StatusCode::BAD_REQUEST,
        MailbriefError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        MailbriefError::Upstream { public, detail } => {
            warn!(code = err.code(), detail = %detail, "{public}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        MailbriefError::Config(_) | MailbriefError::Serialization(_) => {
            error!(code = err.code(), error = %err, "internal error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "internal error"})),
            );
        }
    };

    (status, Json(json!({"error": err.to_string()})))
}

/// Fallback for any verb a route does not accept.
pub async fn method_not_allowed() -> ApiError {
    error_reply(MailbriefError::MethodNotAllowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_message() {
        let (status, Json(body)) =
            error_reply(MailbriefError::Validation("Message is required".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Message is required"}));

        let (status, Json(body)) = error_reply(MailbriefError::MethodNotAllowed);
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"error": "Method not allowed"}));
    }

    #[test]
    fn server_errors_are_generic() {
        let (status, Json(body)) =
            error_reply(MailbriefError::upstream("Failed to fetch summaries", "dns failure"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to fetch summaries"}));

        let (status, Json(body)) = error_reply(MailbriefError::Config("bad toml".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "internal error"}));
    }
}
