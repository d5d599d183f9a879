use reqwest::Method;
use serde::de::IgnoredAny;

use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::models::profile::CompanyProfile;

/// GET /admin/profile. The backend returns a list; the first row is the
/// company profile.
pub async fn get_profile(api: &ApiClient) -> Result<CompanyProfile> {
    let rows: Vec<CompanyProfile> = api.get("/admin/profile").await?;
    rows.into_iter()
        .next()
        .ok_or_else(|| ClientError::NotFound("Profil perusahaan belum dibuat".to_string()))
}

/// PUT /admin/profile/{id}
pub async fn update_profile(api: &ApiClient, profile: &CompanyProfile) -> Result<()> {
    let _: IgnoredAny = api
        .send_json(
            Method::PUT,
            &format!("/admin/profile/{}", profile.id),
            profile,
        )
        .await?;
    Ok(())
}
