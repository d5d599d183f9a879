use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_STORAGE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CHAT_WEBHOOK_URL: &str = "http://127.0.0.1:5678/webhook/chat";
pub const DEFAULT_STATE_DIR: &str = ".mofy";

/// Runtime configuration for the console.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base of the admin REST API, without trailing slash.
    pub api_base_url: String,
    /// Host that serves `/storage/<path>` image files.
    pub storage_base_url: String,
    pub chat_webhook_url: String,
    /// Directory holding the local store file.
    pub state_dir: PathBuf,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            storage_base_url: DEFAULT_STORAGE_URL.to_string(),
            chat_webhook_url: DEFAULT_CHAT_WEBHOOK_URL.to_string(),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            request_timeout: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: url_var("MOFY_API_URL", DEFAULT_API_URL),
            storage_base_url: url_var("MOFY_STORAGE_URL", DEFAULT_STORAGE_URL),
            chat_webhook_url: std::env::var("MOFY_CHAT_WEBHOOK_URL")
                .unwrap_or_else(|_| DEFAULT_CHAT_WEBHOOK_URL.to_string()),
            state_dir: std::env::var("MOFY_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_DIR)),
            request_timeout: parse_timeout_secs("MOFY_HTTP_TIMEOUT_SECS"),
        }
    }

    /// Same configuration pointed at another API base (used by tests and
    /// the `--api-url` flag).
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build an HTTP client honouring the configured timeout.
    pub fn http_client(&self) -> reqwest::Client {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {e}");
            reqwest::Client::new()
        })
    }
}

fn url_var(env_var: &str, default: &str) -> String {
    std::env::var(env_var)
        .unwrap_or_else(|_| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

fn parse_timeout_secs(env_var: &str) -> Option<Duration> {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
