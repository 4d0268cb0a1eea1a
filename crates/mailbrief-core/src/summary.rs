use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A normalized email summary — the only record the UI ever sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub id: String,
    /// Email subject (or message body when the webhook sends no subject).
    pub message: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

/// Body POSTed to the submit webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub message: String,
    pub timestamp: String,
}

impl OutboundMessage {
    /// Build an outbound message stamped with the current time.
    ///
    /// Rejects empty and whitespace-only input.
    pub fn new(message: &str) -> crate::error::Result<Self> {
        Self::at(message, Utc::now())
    }

    pub fn at(message: &str, now: DateTime<Utc>) -> crate::error::Result<Self> {
        if message.trim().is_empty() {
            return Err(crate::error::MailbriefError::Validation(
                MESSAGE_REQUIRED.to_string(),
            ));
        }
        Ok(Self {
            message: message.to_string(),
            timestamp: iso_timestamp(now),
        })
    }
}

pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Millisecond-precision UTC timestamp with a `Z` suffix,
/// e.g. `2024-01-01T00:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
