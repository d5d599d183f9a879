use tracing::info;

use crate::api::ApiClient;
use crate::api::auth::login as login_request;
use crate::error::{ClientError, Result};
use crate::handlers::Notice;
use crate::models::auth::AdminUser;

/// POST /login, then keep the token in the session.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<Option<AdminUser>> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ClientError::validation("Email dan password wajib diisi"));
    }
    let response = login_request(api, email, password).await?;
    api.session().sign_in(&response.token)?;
    info!("Signed in as {}", email.trim());
    Ok(response.user)
}

/// Login wrapped as a page action: failures become a toast.
pub async fn submit_login(api: &ApiClient, email: &str, password: &str) -> Notice {
    match login(api, email, password).await {
        Ok(_) => Notice::success("Login berhasil"),
        Err(ClientError::Unauthenticated) => Notice::error("Login gagal"),
        Err(e) => Notice::from_error(&e),
    }
}

pub fn logout(api: &ApiClient) -> Notice {
    match api.session().sign_out() {
        Ok(()) => Notice::success("Logout berhasil"),
        Err(e) => Notice::from_error(&ClientError::from(e)),
    }
}
