use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// A service ("layanan") offered on the public site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: u64,
    pub title: String,
    #[serde(rename = "deskripsi", default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Body of `POST /admin/layanan` and `PUT /admin/layanan/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInput {
    pub title: String,
    #[serde(rename = "deskripsi")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ServiceInput {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ClientError::validation("Judul layanan tidak boleh kosong"));
        }
        if self.description.trim().is_empty() {
            return Err(ClientError::validation("Deskripsi tidak boleh kosong"));
        }
        Ok(())
    }
}

impl From<&Service> for ServiceInput {
    fn from(s: &Service) -> Self {
        Self {
            title: s.title.clone(),
            description: s.description.clone(),
            icon: s.icon.clone().filter(|i| !i.trim().is_empty()),
        }
    }
}
