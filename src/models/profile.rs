use serde::{Deserialize, Serialize};

/// Company settings shown in the public footer and contact section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: u64,
    #[serde(default)]
    pub site_title: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email_contact: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    /// LinkedIn handle; the backend column is named `li`.
    #[serde(default)]
    pub li: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
}

impl CompanyProfile {
    pub const FIELDS: [&'static str; 6] = [
        "site_title",
        "address",
        "email_contact",
        "instagram",
        "li",
        "facebook",
    ];

    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "site_title" => self.site_title.as_deref(),
            "address" => self.address.as_deref(),
            "email_contact" => self.email_contact.as_deref(),
            "instagram" => self.instagram.as_deref(),
            "li" => self.li.as_deref(),
            "facebook" => self.facebook.as_deref(),
            _ => None,
        }
    }

    /// Set a field by its wire name. Returns `false` for unknown names.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "site_title" => &mut self.site_title,
            "address" => &mut self.address,
            "email_contact" => &mut self.email_contact,
            "instagram" => &mut self.instagram,
            "li" => &mut self.li,
            "facebook" => &mut self.facebook,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }
}
