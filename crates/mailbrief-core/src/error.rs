use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailbriefError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad or missing input. Never reaches the network.
    #[error("{0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Network, status, or decoding failure talking to the webhook.
    /// The display form is the generic message shown to callers; the
    /// underlying detail lives in `detail` and is only logged.
    #[error("{public}")]
    Upstream { public: &'static str, detail: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MailbriefError {
    pub fn upstream(public: &'static str, detail: impl ToString) -> Self {
        MailbriefError::Upstream {
            public,
            detail: detail.to_string(),
        }
    }

    /// Short error code string, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            MailbriefError::Config(_) => "CONFIG_ERROR",
            MailbriefError::Validation(_) => "VALIDATION_ERROR",
            MailbriefError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            MailbriefError::Upstream { .. } => "UPSTREAM_ERROR",
            MailbriefError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// True when the failure was caused by the caller, not by us or the webhook.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MailbriefError::Validation(_) | MailbriefError::MethodNotAllowed
        )
    }
}

pub type Result<T> = std::result::Result<T, MailbriefError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_display_hides_detail() {
        let err = MailbriefError::upstream("Failed to fetch summaries", "connection refused");
        assert_eq!(err.to_string(), "Failed to fetch summaries");
        assert_eq!(err.code(), "UPSTREAM_ERROR");
        assert!(!err.is_client_error());
    }

    #[test]
    fn validation_is_client_error() {
        let err = MailbriefError::Validation("Message is required".into());
        assert_eq!(err.to_string(), "Message is required");
        assert!(err.is_client_error());
        assert!(MailbriefError::MethodNotAllowed.is_client_error());
    }
}
