//! Operation boundaries of the admin pages.
//!
//! Every submit/delete/upload handler catches its errors here and turns
//! them into a [`Notice`] (the toast the user sees), so no failure escapes
//! to the caller. Loading flags are always reset before a handler returns.

pub mod auth;
pub mod images;
pub mod portfolio;
pub mod services;
pub mod settings;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Sukses".to_string(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }

    /// Toast for a failed operation. Client-side validation failures get
    /// their own title.
    pub fn from_error(error: &ClientError) -> Self {
        match error {
            ClientError::Validation(msg) => Self {
                kind: NoticeKind::Error,
                title: "Validasi Gagal".to_string(),
                description: msg.clone(),
            },
            other => Self::error(other.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Where the view should go after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigate {
    PortfolioList,
    Back,
}

/// Toast plus optional navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Notice,
    pub navigate: Option<Navigate>,
}

impl Outcome {
    pub fn stay(notice: Notice) -> Self {
        Self {
            notice,
            navigate: None,
        }
    }

    pub fn go(notice: Notice, to: Navigate) -> Self {
        Self {
            notice,
            navigate: Some(to),
        }
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
