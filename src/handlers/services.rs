use tracing::{info, warn};

use crate::api::ApiClient;
use crate::api::services::{delete_service, get_all_services, insert_service, update_service};
use crate::error::Result;
use crate::handlers::{Confirm, Notice};
use crate::models::service::{Service, ServiceInput};

pub const DELETE_SERVICE_PROMPT: &str = "Hapus layanan ini?";

/// Services list with a single add/edit form.
#[derive(Debug, Default)]
pub struct ServicesPage {
    list: Vec<Service>,
    pub form: ServiceInput,
    editing: Option<u64>,
    loading: bool,
}

impl ServicesPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[Service] {
        &self.list
    }

    pub fn editing(&self) -> Option<u64> {
        self.editing
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn load(&mut self, api: &ApiClient) -> Option<Notice> {
        self.loading = true;
        let result = get_all_services(api).await;
        self.loading = false;
        match result {
            Ok(list) => {
                self.list = list;
                None
            }
            Err(e) => Some(Notice::from_error(&e)),
        }
    }

    /// Put an existing service into the form.
    pub fn edit(&mut self, service: &Service) {
        self.form = ServiceInput::from(service);
        self.editing = Some(service.id);
    }

    pub fn cancel_edit(&mut self) {
        self.form = ServiceInput::default();
        self.editing = None;
    }

    /// Create or update depending on edit mode, then reset the form and
    /// reload the list.
    pub async fn submit(&mut self, api: &ApiClient) -> Notice {
        self.loading = true;
        let result = self.try_submit(api).await;
        self.loading = false;
        match result {
            Ok(notice) => notice,
            Err(e) => Notice::from_error(&e),
        }
    }

    async fn try_submit(&mut self, api: &ApiClient) -> Result<Notice> {
        self.form.validate()?;
        let notice = match self.editing {
            Some(id) => {
                update_service(api, id, &self.form).await?;
                info!("Service {id} updated");
                Notice::success("Layanan berhasil diupdate")
            }
            None => {
                insert_service(api, &self.form).await?;
                info!("Service '{}' created", self.form.title);
                Notice::success("Layanan berhasil ditambahkan")
            }
        };
        self.cancel_edit();
        self.refresh(api).await;
        Ok(notice)
    }

    /// Re-read the list after a completed write. A failure here only
    /// leaves the list stale; the write itself went through.
    async fn refresh(&mut self, api: &ApiClient) {
        match get_all_services(api).await {
            Ok(list) => self.list = list,
            Err(e) => warn!("Services changed but refresh failed: {e}"),
        }
    }

    /// Delete after confirmation; `None` when declined.
    pub async fn delete<C: Confirm>(
        &mut self,
        api: &ApiClient,
        id: u64,
        confirm: &C,
    ) -> Option<Notice> {
        if !confirm.confirm(DELETE_SERVICE_PROMPT) {
            return None;
        }
        self.loading = true;
        let result = delete_service(api, id).await;
        if result.is_ok() {
            info!("Service {id} deleted");
            self.list.retain(|s| s.id != id);
            self.refresh(api).await;
        }
        self.loading = false;
        Some(match result {
            Ok(()) => Notice::success("Layanan berhasil dihapus"),
            Err(e) => Notice::from_error(&e),
        })
    }
}
