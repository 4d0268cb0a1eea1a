use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_CONFIG_FILE: &str = "mailbrief.toml";

// Placeholders used when no webhook is configured. They are not valid URLs,
// so the first outbound call fails instead of startup.
pub const SUBMIT_URL_PLACEHOLDER: &str = "YOUR_N8N_WEBHOOK_URL_HERE";
pub const SUMMARIES_URL_PLACEHOLDER: &str = "YOUR_N8N_GET_SUMMARIES_WEBHOOK_URL_HERE";

/// Top-level config (mailbrief.toml + MAILBRIEF_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailbriefConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// Upstream automation webhooks, one per endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Receives `{ message, timestamp }` on every submit.
    /// Legacy env override: N8N_WEBHOOK_URL.
    #[serde(default = "default_submit_url")]
    pub submit_url: String,
    /// Returns one summary object or an array of them.
    /// Legacy env override: N8N_GET_SUMMARIES_WEBHOOK.
    #[serde(default = "default_summaries_url")]
    pub summaries_url: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            submit_url: default_submit_url(),
            summaries_url: default_summaries_url(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_submit_url() -> String {
    SUBMIT_URL_PLACEHOLDER.to_string()
}
fn default_summaries_url() -> String {
    SUMMARIES_URL_PLACEHOLDER.to_string()
}

impl MailbriefConfig {
    /// Load config from a TOML file with env var overrides.
    ///
    /// Precedence, lowest first:
    ///   1. built-in defaults
    ///   2. explicit path, else ./mailbrief.toml (missing file is skipped)
    ///   3. MAILBRIEF_* env vars, `__` separates sections
    ///   4. N8N_WEBHOOK_URL / N8N_GET_SUMMARIES_WEBHOOK
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        Self::figment(path)
            .extract()
            .map_err(|e| crate::error::MailbriefError::Config(e.to_string()))
    }

    fn figment(path: &str) -> Figment {
        Figment::from(Serialized::defaults(MailbriefConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("MAILBRIEF_").ignore(&["CONFIG"]).split("__"))
            .merge(
                Env::raw()
                    .only(&["N8N_WEBHOOK_URL"])
                    .map(|_| "webhook.submit_url".into()),
            )
            .merge(
                Env::raw()
                    .only(&["N8N_GET_SUMMARIES_WEBHOOK"])
                    .map(|_| "webhook.summaries_url".into()),
            )
    }

    /// Socket address string the gateway binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.gateway.bind, self.gateway.port)
    }
}
