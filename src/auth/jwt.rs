use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Claims the console cares about when the backend hands out a JWT.
///
/// Laravel Sanctum tokens (`"1|abc..."`) are opaque and never decode into
/// this; only JWT-style tokens do.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin user id).
    pub sub: Option<String>,
    /// Token expiration (Unix timestamp).
    pub exp: Option<u64>,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<u64>,
    pub email: Option<String>,
}

impl Claims {
    /// `true` once `exp` lies at or before `now` (Unix seconds). Tokens
    /// without `exp` never expire client-side.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }
}

/// Read the claims of a JWT without verifying its signature.
///
/// The console never holds the signing secret; this is only used to drop
/// tokens that are certainly expired. Returns `None` for anything that is
/// not a decodable JWT.
pub fn inspect_token(token: &str) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}
