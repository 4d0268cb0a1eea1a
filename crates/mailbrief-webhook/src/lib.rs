//! Outbound calls to the automation webhook.

pub mod client;
pub mod http;

pub use client::{WebhookClient, WebhookError, WebhookRequest};
pub use http::HttpWebhookClient;
