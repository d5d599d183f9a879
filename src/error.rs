use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::store::StoreError;

/// Message shown for any transport-level failure.
pub const NETWORK_MESSAGE: &str = "Gagal terhubung ke server. Cek koneksi internet Anda.";

pub type Result<T> = std::result::Result<T, ClientError>;

/// Every failure an admin operation can surface.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    #[error("Gagal terhubung ke server. Cek koneksi internet Anda.")]
    Network(#[source] reqwest::Error),

    #[error("{}", .0.display_message())]
    Backend(BackendError),

    #[error("{0}")]
    NotFound(String),

    #[error("Sesi login tidak ditemukan atau sudah kedaluwarsa")]
    Unauthenticated,

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Local storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e)
        }
    }
}

/// A non-success response from the backend, with Laravel-style field errors
/// (`{"message": "...", "errors": {"field": ["..."]}}`) when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    pub status: u16,
    pub message: Option<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Option<serde_json::Map<String, serde_json::Value>>,
}

impl BackendError {
    /// Build from a status code and whatever body the server sent back.
    /// Bodies that are not JSON are ignored.
    pub fn from_body(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        let field_errors = parsed
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|(field, value)| (field, flatten_messages(value)))
            .collect();

        Self {
            status,
            message: parsed.message.or(parsed.error),
            field_errors,
        }
    }

    /// Single user-facing line (or block) for this error.
    pub fn display_message(&self) -> String {
        if !self.field_errors.is_empty() {
            let lines: Vec<String> = self
                .field_errors
                .iter()
                .map(|(field, msgs)| format!("{field}: {}", msgs.join(", ")))
                .collect();
            return format!("Validasi gagal:\n{}", lines.join("\n"));
        }

        match &self.message {
            Some(m) if !m.trim().is_empty() => m.clone(),
            _ => format!("Error: {}", self.status),
        }
    }
}

fn flatten_messages(value: serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|v| match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        serde_json::Value::String(s) => vec![s],
        serde_json::Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}
