//! Terminal counterpart of the web page: the same submit/refresh state
//! machine, driven from the CLI against a running gateway.
//!
//! Each action kind owns a single in-flight slot. Starting a call bumps the
//! slot's generation; when a call returns, its result is applied only if its
//! generation is still current, so the most recently started call wins and
//! stale responses are dropped.

use async_trait::async_trait;
use mailbrief_core::Summary;
use serde_json::{json, Value};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::http::summaries::SummariesReply;

/// The two gateway operations the dashboard needs.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn submit(&self, message: &str) -> anyhow::Result<Value>;
    async fn fetch(&self) -> anyhow::Result<Vec<Summary>>;
}

/// Talks to a gateway over HTTP.
pub struct GatewayBackend {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DashboardBackend for GatewayBackend {
    async fn submit(&self, message: &str) -> anyhow::Result<Value> {
        let resp = self
            .client
            .post(format!("{}/submit", self.base_url))
            .json(&json!({ "message": message }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            // error bodies are best effort, the status alone is enough
            let body: Value = resp.json().await.unwrap_or(Value::Null);
            let reason = body["error"].as_str().unwrap_or("request failed");
            anyhow::bail!("{reason} ({status})");
        }
        let body: Value = resp.json().await?;
        Ok(body["data"].clone())
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Summary>> {
        let reply: SummariesReply = self
            .client
            .get(format!("{}/summaries", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(reply.summaries)
    }
}

/// Observable state, cloned out by `snapshot`.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub summaries: Vec<Summary>,
    pub submitting: bool,
    pub fetching: bool,
    pub draft: String,
    /// Last user-visible failure from `submit`.
    pub alert: Option<String>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
}

impl Slot {
    fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn is_current(&self, token: u64) -> bool {
        self.generation == token
    }
}

#[derive(Debug, Default)]
struct Inner {
    view: DashboardView,
    submit: Slot,
    fetch: Slot,
}

pub struct Dashboard<B> {
    backend: B,
    inner: Mutex<Inner>,
}

impl<B: DashboardBackend> Dashboard<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Initial load, mirrors the page fetching on mount.
    pub async fn mount(&self) {
        self.refresh().await;
    }

    pub fn snapshot(&self) -> DashboardView {
        self.lock().view.clone()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.lock().view.draft = text.into();
    }

    /// Replace the list with a fresh batch. Failures leave it unchanged.
    pub async fn refresh(&self) {
        let token = {
            let mut inner = self.lock();
            inner.view.fetching = true;
            inner.fetch.begin()
        };

        let result = self.backend.fetch().await;

        let mut inner = self.lock();
        if !inner.fetch.is_current(token) {
            debug!(token, "dropping stale fetch result");
            return;
        }
        inner.view.fetching = false;
        match result {
            Ok(summaries) => inner.view.summaries = summaries,
            Err(e) => warn!(error = %e, "error fetching summaries"),
        }
    }

    /// Send the current draft. On success the draft is cleared and the list
    /// refreshed; on failure an alert is raised and the draft kept.
    pub async fn submit(&self) -> Result<(), String> {
        let (token, message) = {
            let mut inner = self.lock();
            inner.view.submitting = true;
            inner.view.alert = None;
            (inner.submit.begin(), inner.view.draft.clone())
        };

        let result = self.backend.submit(&message).await;

        {
            let mut inner = self.lock();
            if !inner.submit.is_current(token) {
                debug!(token, "dropping stale submit result");
                return Ok(());
            }
            inner.view.submitting = false;
            if let Err(e) = &result {
                let alert = format!("Failed to send message: {e}");
                inner.view.alert = Some(alert.clone());
                return Err(alert);
            }
            inner.view.draft.clear();
        }

        self.refresh().await;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // state is plain data, a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Plain-text card rendering for the terminal.
pub fn render(summaries: &[Summary]) -> String {
    if summaries.is_empty() {
        return "Your email summaries will appear here.\n".to_string();
    }

    let mut out = String::new();
    for s in summaries {
        let initial = s
            .sender
            .as_deref()
            .and_then(|name| name.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string());
        let date = chrono::DateTime::parse_from_rfc3339(&s.timestamp)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| s.timestamp.clone());

        out.push_str(&format!(
            "[{initial}] {sender}  {date}\n    Subject: {subject}\n    Summary: {summary}\n\n",
            sender = s.sender.as_deref().unwrap_or(""),
            subject = s.message,
            summary = s.summary,
        ));
    }
    out
}
