use tracing::warn;

use crate::api::PortfolioBackend;
use crate::api::portfolio::find_portfolio;
use crate::error::{ClientError, Result};
use crate::handlers::{Confirm, Navigate, Notice, Outcome};
use crate::models::portfolio::PortfolioEntry;
use crate::portfolio::reorder::ImageReorder;
use crate::portfolio::uploader::ImageUploader;

pub const DELETE_IMAGE_PROMPT: &str = "Yakin ingin menghapus gambar ini?";

/// Image management of one portfolio entry: persisted images (ordered),
/// the upload queue, and per-image delete.
#[derive(Debug)]
pub struct ImagesPage {
    portfolio_id: u64,
    pub reorder: ImageReorder,
    pub uploader: ImageUploader,
    loading: bool,
    error: Option<String>,
}

impl ImagesPage {
    pub fn new(entry: &PortfolioEntry) -> Self {
        Self {
            portfolio_id: entry.id,
            reorder: ImageReorder::new(entry.id, entry.images.clone()),
            uploader: ImageUploader::new(),
            loading: false,
            error: None,
        }
    }

    /// Open the page for `id`. A missing entry sends the user back.
    pub async fn load<B: PortfolioBackend>(backend: &B, id: u64) -> std::result::Result<Self, Outcome> {
        match find_portfolio(backend, id).await {
            Ok(entry) => Ok(Self::new(&entry)),
            Err(e) => Err(Outcome::go(Notice::from_error(&e), Navigate::Back)),
        }
    }

    pub fn portfolio_id(&self) -> u64 {
        self.portfolio_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn finish(&mut self, result: Result<Notice>) -> Notice {
        self.loading = false;
        match result {
            Ok(notice) => notice,
            Err(e) => {
                let notice = Notice::from_error(&e);
                self.error = Some(notice.description.clone());
                notice
            }
        }
    }

    /// Re-read the persisted images from the backend. Unsaved local
    /// ordering is discarded.
    pub async fn refresh<B: PortfolioBackend>(&mut self, backend: &B) -> Result<()> {
        let entry = find_portfolio(backend, self.portfolio_id).await?;
        self.reorder = ImageReorder::new(entry.id, entry.images);
        Ok(())
    }

    /// Upload every queued file. The queue is emptied only on success.
    pub async fn upload<B: PortfolioBackend>(&mut self, backend: &B) -> Notice {
        self.loading = true;
        self.error = None;
        let result = self.try_upload(backend).await;
        self.finish(result)
    }

    async fn try_upload<B: PortfolioBackend>(&mut self, backend: &B) -> Result<Notice> {
        if self.uploader.is_empty() {
            return Err(ClientError::validation(
                "Pilih minimal 1 gambar untuk diupload",
            ));
        }

        let count = self.uploader.len();
        backend
            .upload_images(self.portfolio_id, self.uploader.files())
            .await?;
        self.uploader.clear();

        if let Err(e) = self.refresh(backend).await {
            warn!("Images uploaded but refresh failed: {e}");
        }
        Ok(Notice::success(format!("{count} gambar berhasil diupload")))
    }

    /// Delete one persisted image after confirmation. Returns `None` when
    /// the user declined (no request is made).
    pub async fn delete_image<B: PortfolioBackend, C: Confirm>(
        &mut self,
        backend: &B,
        image_id: u64,
        confirm: &C,
    ) -> Option<Notice> {
        if !confirm.confirm(DELETE_IMAGE_PROMPT) {
            return None;
        }

        self.loading = true;
        self.error = None;
        let result = match backend.delete_image(image_id).await {
            Ok(()) => {
                self.reorder.remove_image(image_id);
                Ok(Notice::success("Gambar berhasil dihapus"))
            }
            Err(e) => Err(e),
        };
        Some(self.finish(result))
    }

    /// Send the current order in one request. On failure the local order
    /// is kept as-is.
    pub async fn save_order<B: PortfolioBackend>(&mut self, backend: &B) -> Notice {
        self.loading = true;
        self.error = None;
        let request = self.reorder.order_request();
        let result = match backend.reorder_images(&request).await {
            Ok(()) => {
                self.reorder.mark_saved();
                Ok(Notice::success("Urutan gambar berhasil disimpan"))
            }
            Err(e) => Err(e),
        };
        self.finish(result)
    }
}
