pub mod auth;
pub mod multipart;
pub mod portfolio;
pub mod profile;
pub mod services;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::auth::AuthSession;
use crate::config::AppConfig;
use crate::error::{BackendError, ClientError, Result};
use crate::models::Payload;

pub use multipart::FormPayload;
pub use portfolio::PortfolioBackend;

/// Thin HTTP wrapper shared by every admin operation.
///
/// Attaches the bearer token from the injected [`AuthSession`] and turns
/// every response into either a typed value or a [`ClientError`].
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: AuthSession,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: AuthSession) -> Self {
        Self::with_http(config.http_client(), &config.api_base_url, session)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str, session: AuthSession) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {path}");
        let response = self.request(Method::GET, path).send().await?;
        decode(response).await
    }

    pub async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!("{method} {path}");
        let response = self.request(method, path).json(body).send().await?;
        decode(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: FormPayload,
    ) -> Result<T> {
        debug!("POST {path} (multipart, {} files)", payload.file_count());
        let form = payload.into_form()?;
        let response = self.request(Method::POST, path).multipart(form).send().await?;
        decode(response).await
    }

    /// Issue a request whose success body is irrelevant.
    pub async fn execute(&self, method: Method, path: &str) -> Result<()> {
        debug!("{method} {path}");
        let response = self.request(method, path).send().await?;
        expect_success(response).await
    }
}

/// Map a non-success status to the matching error.
async fn error_for(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let backend = BackendError::from_body(status.as_u16(), &body);
    warn!("Backend answered {status}: {}", backend.display_message());

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthenticated,
        StatusCode::NOT_FOUND => ClientError::NotFound(
            backend
                .message
                .unwrap_or_else(|| "Data tidak ditemukan".to_string()),
        ),
        _ => ClientError::Backend(backend),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_for(response).await);
    }

    let body = response.text().await?;
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str::<Payload<T>>(body)
        .map(Payload::into_inner)
        .map_err(|e| ClientError::Decode(e.to_string()))
}

async fn expect_success(response: Response) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_for(response).await)
    }
}
