use crate::api::ApiClient;
use crate::error::Result;
use crate::models::auth::{LoginRequest, LoginResponse};

/// POST /login: exchange credentials for a bearer token.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<LoginResponse> {
    let body = LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    api.post_json("/login", &body).await
}
