//! Reshapes whatever the summaries webhook returns into `Summary` records.
//!
//! The automation workflow behind the webhook is not consistent about its
//! response shape: sometimes a bare object, sometimes an array, and field
//! names drift (`subject` vs `message`). Decoding is permissive: unknown or
//! malformed fields fall back to defaults rather than failing the request.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::summary::{iso_timestamp, Summary};

/// Upstream payload, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// A single summary object.
    Single(Map<String, Value>),
    /// An array of summary objects (elements are not checked here).
    Sequence(Vec<Value>),
    /// `null`, a string, a number or a bool at the top level.
    Malformed(Value),
}

impl RawPayload {
    pub fn decode(raw: Value) -> Self {
        match raw {
            Value::Array(items) => RawPayload::Sequence(items),
            Value::Object(map) => RawPayload::Single(map),
            other => RawPayload::Malformed(other),
        }
    }

    /// Elements to normalize, in upstream order.
    fn into_items(self) -> Vec<Value> {
        match self {
            RawPayload::Sequence(items) => items,
            RawPayload::Single(map) => vec![Value::Object(map)],
            RawPayload::Malformed(value) => {
                if !value.is_null() {
                    warn!(payload = %value, "summaries webhook returned a non-object payload");
                }
                Vec::new()
            }
        }
    }
}

impl From<Value> for RawPayload {
    fn from(raw: Value) -> Self {
        RawPayload::decode(raw)
    }
}

/// Normalize against the current wall clock.
pub fn normalize(raw: impl Into<RawPayload>) -> Vec<Summary> {
    normalize_at(raw, Utc::now())
}

/// Normalize using `now` for every time-based fallback.
pub fn normalize_at(raw: impl Into<RawPayload>, now: DateTime<Utc>) -> Vec<Summary> {
    let payload: RawPayload = raw.into();
    let summaries: Vec<Summary> = payload
        .into_items()
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_item(item, index, now))
        .collect();

    debug!(count = summaries.len(), "normalized webhook payload");
    summaries
}

fn normalize_item(item: &Value, index: usize, now: DateTime<Utc>) -> Summary {
    let fallback_id = || format!("{}-{}", now.timestamp_millis(), index);

    Summary {
        id: text_field(item, "id").unwrap_or_else(fallback_id),
        message: text_field(item, "subject")
            .or_else(|| text_field(item, "message"))
            .unwrap_or_default(),
        summary: text_field(item, "summary").unwrap_or_default(),
        sender: text_field(item, "sender"),
        timestamp: text_field(item, "timestamp").unwrap_or_else(|| iso_timestamp(now)),
    }
}

/// A field counts as present when it is a non-empty string, a number or a
/// bool. Numbers and bools are coerced to their JSON text.
fn text_field(item: &Value, key: &str) -> Option<String> {
    match &item[key] {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
