use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Greeting every conversation starts with.
pub const GREETING: &str =
    "Halo! 👋 Saya Mofy AI Assistant. Ada yang bisa saya bantu tentang layanan website atau AI kami?";

/// Shown when the webhook answers without any text.
pub const EMPTY_REPLY: &str = "Maaf, terjadi kesalahan. Silakan coba lagi.";

/// Shown when the webhook cannot be reached.
pub const OFFLINE_REPLY: &str =
    "Maaf, koneksi ke server terputus. Silakan coba lagi atau hubungi kami via WhatsApp.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One line of the conversation. Bot content may contain markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
        }
    }

    pub fn greeting() -> Self {
        Self::bot(GREETING)
    }
}

// ── Webhook wire format ──

/// Body posted to the chat webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Webhook answer; different flows fill either `message` or `response`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}

impl ChatReply {
    /// The reply text, if any non-blank field is present.
    pub fn text(&self) -> Option<&str> {
        [&self.message, &self.response]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
    }
}
