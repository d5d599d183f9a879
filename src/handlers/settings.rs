use crate::api::ApiClient;
use crate::api::profile::{get_profile, update_profile};
use crate::handlers::Notice;
use crate::models::profile::CompanyProfile;

/// Company settings form.
#[derive(Debug, Default)]
pub struct SettingsPage {
    pub profile: Option<CompanyProfile>,
    saving: bool,
}

impl SettingsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub async fn load(&mut self, api: &ApiClient) -> Option<Notice> {
        match get_profile(api).await {
            Ok(profile) => {
                self.profile = Some(profile);
                None
            }
            Err(e) => Some(Notice::from_error(&e)),
        }
    }

    pub async fn save(&mut self, api: &ApiClient) -> Notice {
        let Some(profile) = &self.profile else {
            return Notice::error("Settings belum dimuat");
        };
        self.saving = true;
        let result = update_profile(api, profile).await;
        self.saving = false;
        match result {
            Ok(()) => Notice::success("Settings berhasil disimpan"),
            Err(e) => Notice::error(format!("Gagal menyimpan settings: {e}")),
        }
    }
}
