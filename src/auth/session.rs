use chrono::Utc;
use tracing::{debug, info};

use crate::auth::jwt::inspect_token;
use crate::store::{LocalStore, StoreError, keys};

/// The admin's login state, backed by the `token` key of the local store.
///
/// Created once at startup and handed to every component that talks to
/// the backend. Nothing else reads the token key directly.
#[derive(Clone, Debug)]
pub struct AuthSession {
    store: LocalStore,
}

impl AuthSession {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Current bearer token, if one is stored and not known to be expired.
    pub fn token(&self) -> Option<String> {
        let token = self.store.get_raw(keys::TOKEN)?;
        if token.trim().is_empty() {
            return None;
        }

        if let Some(claims) = inspect_token(&token) {
            let now = Utc::now().timestamp().max(0) as u64;
            if claims.is_expired_at(now) {
                debug!("Stored token expired at {:?}", claims.exp);
                return None;
            }
        }

        Some(token)
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_in(&self, token: &str) -> Result<(), StoreError> {
        self.store.set_raw(keys::TOKEN, token)?;
        info!("Admin token stored");
        Ok(())
    }

    /// Explicit teardown: forget the token.
    pub fn sign_out(&self) -> Result<(), StoreError> {
        self.store.remove(keys::TOKEN)?;
        info!("Admin token cleared");
        Ok(())
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }
}
