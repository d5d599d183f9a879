use reqwest::Method;
use serde::de::IgnoredAny;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::service::{Service, ServiceInput};

/// GET /admin/layanan
pub async fn get_all_services(api: &ApiClient) -> Result<Vec<Service>> {
    api.get("/admin/layanan").await
}

/// POST /admin/layanan
pub async fn insert_service(api: &ApiClient, input: &ServiceInput) -> Result<()> {
    let _: IgnoredAny = api.post_json("/admin/layanan", input).await?;
    Ok(())
}

/// PUT /admin/layanan/{id}
pub async fn update_service(api: &ApiClient, id: u64, input: &ServiceInput) -> Result<()> {
    let _: IgnoredAny = api
        .send_json(Method::PUT, &format!("/admin/layanan/{id}"), input)
        .await?;
    Ok(())
}

/// DELETE /admin/layanan/{id}
pub async fn delete_service(api: &ApiClient, id: u64) -> Result<()> {
    api.execute(Method::DELETE, &format!("/admin/layanan/{id}"))
        .await
}
