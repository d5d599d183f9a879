use reqwest::Method;
use serde::de::IgnoredAny;
use std::future::Future;
use tracing::{info, warn};

use crate::api::{ApiClient, FormPayload};
use crate::error::{ClientError, Result};
use crate::models::portfolio::{PortfolioEntry, ReorderRequest};
use crate::portfolio::uploader::LocalFile;

/// Portfolio endpoints the admin pages depend on.
///
/// [`ApiClient`] is the production implementation; tests substitute
/// in-memory backends.
pub trait PortfolioBackend {
    /// GET /admin/portofolio
    fn list_portfolios(&self) -> impl Future<Output = Result<Vec<PortfolioEntry>>> + Send;

    /// POST /admin/portofolio (multipart)
    fn create_portfolio(&self, payload: FormPayload) -> impl Future<Output = Result<()>> + Send;

    /// POST /admin/portofolio/{id} with `_method=PUT` (multipart)
    fn update_portfolio(
        &self,
        id: u64,
        payload: FormPayload,
    ) -> impl Future<Output = Result<()>> + Send;

    /// POST /admin/portofolio/{id}/images (multipart `images[]`)
    fn upload_images(
        &self,
        id: u64,
        files: Vec<LocalFile>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// DELETE /admin/portofolio/image/{image_id}
    fn delete_image(&self, image_id: u64) -> impl Future<Output = Result<()>> + Send;

    /// POST /admin/portofolio/image/reorder
    fn reorder_images(&self, request: &ReorderRequest)
    -> impl Future<Output = Result<()>> + Send;

    /// DELETE /admin/portofolio/{id}
    fn delete_portfolio(&self, id: u64) -> impl Future<Output = Result<()>> + Send;
}

/// Fetch the full list and pick one entry out of it.
pub async fn find_portfolio<B: PortfolioBackend>(backend: &B, id: u64) -> Result<PortfolioEntry> {
    backend
        .list_portfolios()
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ClientError::NotFound("Portofolio tidak ditemukan".to_string()))
}

/// Multipart body for an image upload.
pub fn images_payload(files: Vec<LocalFile>) -> FormPayload {
    FormPayload::new().files("images[]", files)
}

impl PortfolioBackend for ApiClient {
    async fn list_portfolios(&self) -> Result<Vec<PortfolioEntry>> {
        self.get("/admin/portofolio").await
    }

    async fn create_portfolio(&self, payload: FormPayload) -> Result<()> {
        let _: IgnoredAny = self.post_multipart("/admin/portofolio", payload).await?;
        info!("Portfolio created");
        Ok(())
    }

    async fn update_portfolio(&self, id: u64, payload: FormPayload) -> Result<()> {
        let payload = payload.text("_method", "PUT");
        let _: IgnoredAny = self
            .post_multipart(&format!("/admin/portofolio/{id}"), payload)
            .await?;
        info!("Portfolio {id} updated");
        Ok(())
    }

    async fn upload_images(&self, id: u64, files: Vec<LocalFile>) -> Result<()> {
        let count = files.len();
        let primary = self
            .post_multipart::<IgnoredAny>(
                &format!("/admin/portofolio/{id}/images"),
                images_payload(files.clone()),
            )
            .await;

        match primary {
            Ok(_) => {}
            // Older backends expose the upload under a different route.
            Err(e) if e.is_not_found() => {
                warn!("Image route missing for portfolio {id}, trying upload-images");
                let _: IgnoredAny = self
                    .post_multipart(
                        &format!("/admin/portofolio/{id}/upload-images"),
                        images_payload(files),
                    )
                    .await?;
            }
            Err(e) => return Err(e),
        }

        info!("Uploaded {count} image(s) to portfolio {id}");
        Ok(())
    }

    async fn delete_image(&self, image_id: u64) -> Result<()> {
        self.execute(Method::DELETE, &format!("/admin/portofolio/image/{image_id}"))
            .await?;
        info!("Image {image_id} deleted");
        Ok(())
    }

    async fn reorder_images(&self, request: &ReorderRequest) -> Result<()> {
        let _: IgnoredAny = self
            .post_json("/admin/portofolio/image/reorder", request)
            .await?;
        info!(
            "Saved order of {} image(s) for portfolio {}",
            request.orders.len(),
            request.portofolio_id
        );
        Ok(())
    }

    async fn delete_portfolio(&self, id: u64) -> Result<()> {
        self.execute(Method::DELETE, &format!("/admin/portofolio/{id}"))
            .await?;
        info!("Portfolio {id} deleted");
        Ok(())
    }
}

/// GET /portofolio, the public showcase list (no auth required).
pub async fn get_public_portfolios(api: &ApiClient) -> Result<Vec<PortfolioEntry>> {
    api.get("/portofolio").await
}
