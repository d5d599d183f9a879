use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::PortfolioBackend;
use crate::api::portfolio::find_portfolio;
use crate::error::{ClientError, Result};
use crate::handlers::images::ImagesPage;
use crate::handlers::{Confirm, Navigate, Notice, Outcome};
use crate::media::resolve_image_url;
use crate::models::portfolio::{PackageTier, PortfolioEntry};
use crate::portfolio::form::{FormMode, PortfolioForm};
use crate::portfolio::reorder::ImageReorder;
use crate::portfolio::uploader::ImageUploader;
use crate::portfolio::workflow::EditWorkflow;

pub const DELETE_PORTFOLIO_PROMPT: &str = "Yakin ingin menghapus portofolio ini?";

/// Card data for the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub id: u64,
    pub title: String,
    pub package_tier: Option<PackageTier>,
    pub project_date: Option<NaiveDate>,
    pub image_count: usize,
    pub cover_url: Option<String>,
}

// ── List ──

/// All portfolio entries, with delete.
#[derive(Debug, Default)]
pub struct PortfolioListPage {
    items: Vec<PortfolioEntry>,
    loading: bool,
    error: Option<String>,
}

impl PortfolioListPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PortfolioEntry] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch the full list. Returns a notice only on failure.
    pub async fn load<B: PortfolioBackend>(&mut self, backend: &B) -> Option<Notice> {
        self.loading = true;
        self.error = None;
        let result = backend.list_portfolios().await;
        self.loading = false;

        match result {
            Ok(items) => {
                self.items = items;
                None
            }
            Err(e) => {
                let notice = Notice::from_error(&e);
                self.error = Some(notice.description.clone());
                Some(notice)
            }
        }
    }

    /// Delete an entry after confirmation. The entry leaves the local list
    /// only once the backend has confirmed the delete. Returns `None` when
    /// the user declined.
    pub async fn delete<B: PortfolioBackend, C: Confirm>(
        &mut self,
        backend: &B,
        id: u64,
        confirm: &C,
    ) -> Option<Notice> {
        if !confirm.confirm(DELETE_PORTFOLIO_PROMPT) {
            return None;
        }

        self.loading = true;
        self.error = None;
        let result = backend.delete_portfolio(id).await;
        self.loading = false;

        Some(match result {
            Ok(()) => {
                self.items.retain(|p| p.id != id);
                Notice::success("Portofolio berhasil dihapus")
            }
            Err(e) => {
                warn!("Delete of portfolio {id} failed: {e}");
                let notice = Notice::from_error(&e);
                self.error = Some(notice.description.clone());
                notice
            }
        })
    }

    pub fn summaries(&self, storage_base: &str) -> Vec<PortfolioSummary> {
        self.items
            .iter()
            .map(|p| PortfolioSummary {
                id: p.id,
                title: p.title.clone(),
                package_tier: p.package_tier,
                project_date: p.project_date,
                image_count: p.images.len(),
                cover_url: p
                    .cover()
                    .map(|img| resolve_image_url(storage_base, &img.storage_path)),
            })
            .collect()
    }
}

// ── Create ──

/// New entry: text fields and images go out in one multipart request.
#[derive(Debug, Default)]
pub struct CreatePortfolioPage {
    pub form: PortfolioForm,
    pub uploader: ImageUploader,
    loading: bool,
    error: Option<String>,
}

impl CreatePortfolioPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate, then submit. Validation failures never reach the backend.
    /// Success navigates to the list.
    pub async fn submit<B: PortfolioBackend>(&mut self, backend: &B) -> Outcome {
        self.error = None;
        let valid = match self.form.validate(FormMode::Create, self.uploader.len()) {
            Ok(valid) => valid,
            Err(e) => {
                self.error = Some(e.to_string());
                return Outcome::stay(Notice::from_error(&e));
            }
        };

        self.loading = true;
        let payload = valid.to_create_payload(self.uploader.files());
        let result = backend.create_portfolio(payload).await;
        self.loading = false;

        match result {
            Ok(()) => {
                info!("Created portfolio '{}'", valid.title);
                self.uploader.clear();
                Outcome::go(
                    Notice::success("Portofolio berhasil dibuat"),
                    Navigate::PortfolioList,
                )
            }
            Err(e) => {
                let notice = Notice::from_error(&e);
                self.error = Some(notice.description.clone());
                Outcome::stay(notice)
            }
        }
    }
}

// ── Edit ──

/// Existing entry: the text save, image upload and order save are
/// separate requests, optionally driven together by [`EditWorkflow`].
#[derive(Debug)]
pub struct EditPortfolioPage {
    id: u64,
    pub form: PortfolioForm,
    pub images: ImagesPage,
    workflow: EditWorkflow,
    loading: bool,
    error: Option<String>,
}

impl EditPortfolioPage {
    pub fn new(entry: &PortfolioEntry) -> Self {
        Self {
            id: entry.id,
            form: PortfolioForm::from_entry(entry),
            images: ImagesPage::new(entry),
            workflow: EditWorkflow::new(entry.id),
            loading: false,
            error: None,
        }
    }

    /// Open the editor. A missing entry yields the "back" outcome.
    pub async fn load<B: PortfolioBackend>(
        backend: &B,
        id: u64,
    ) -> std::result::Result<Self, Outcome> {
        match find_portfolio(backend, id).await {
            Ok(entry) => Ok(Self::new(&entry)),
            Err(e) => {
                warn!("Cannot edit portfolio {id}: {e}");
                Err(Outcome::go(Notice::from_error(&e), Navigate::Back))
            }
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn workflow(&self) -> &EditWorkflow {
        &self.workflow
    }

    fn fail(&mut self, e: &ClientError) -> Notice {
        let notice = Notice::from_error(e);
        self.error = Some(notice.description.clone());
        notice
    }

    /// Save the text fields only, then re-read the entry.
    pub async fn save_info<B: PortfolioBackend>(&mut self, backend: &B) -> Notice {
        self.loading = true;
        self.error = None;
        let result = self.try_save_info(backend).await;
        self.loading = false;

        match result {
            Ok(notice) => notice,
            Err(e) => self.fail(&e),
        }
    }

    async fn try_save_info<B: PortfolioBackend>(&mut self, backend: &B) -> Result<Notice> {
        let valid = self.form.validate(FormMode::Edit, 0)?;
        backend.update_portfolio(self.id, valid.to_payload()).await?;

        match find_portfolio(backend, self.id).await {
            Ok(entry) => self.form = PortfolioForm::from_entry(&entry),
            Err(e) => warn!("Portfolio {} saved but refresh failed: {e}", self.id),
        }
        Ok(Notice::success("Info portofolio berhasil diupdate"))
    }

    /// Run (or resume) info save, image upload and order save in sequence.
    pub async fn save_all<B: PortfolioBackend>(&mut self, backend: &B) -> Notice {
        self.loading = true;
        self.error = None;
        let result = self
            .workflow
            .run(
                backend,
                &self.form,
                &mut self.images.uploader,
                &mut self.images.reorder,
            )
            .await;
        self.loading = false;

        match result {
            Ok(()) => {
                if let Err(e) = self.reload(backend).await {
                    warn!("Portfolio {} saved but refresh failed: {e}", self.id);
                }
                Notice::success("Portofolio berhasil disimpan")
            }
            Err(failure) => {
                let notice = Notice::error(failure.to_string());
                self.error = Some(notice.description.clone());
                notice
            }
        }
    }

    /// Replace local state with a fresh copy from the backend and start
    /// a new workflow. Queued uploads are kept.
    pub async fn reload<B: PortfolioBackend>(&mut self, backend: &B) -> Result<()> {
        let entry = find_portfolio(backend, self.id).await?;
        self.form = PortfolioForm::from_entry(&entry);
        self.images.reorder = ImageReorder::new(entry.id, entry.images);
        self.workflow.reset();
        Ok(())
    }
}
