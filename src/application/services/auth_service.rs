//! Session issuance and caller identity resolution.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Caller;
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LEN: usize = 48;

/// Service for bearer-token sessions.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService<R: SessionRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: SessionRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - session repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when sessions were issued
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Starts a session for `user_id` and returns the raw bearer token.
    ///
    /// The raw token is returned exactly once; only its hash is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn issue_session(&self, user_id: Uuid) -> Result<String, AppError> {
        let token = generate_token();
        self.repository
            .create(user_id, &self.hash_token(&token))
            .await?;

        tracing::debug!(user_id = %user_id, "Session issued");

        Ok(token)
    }

    /// Resolves a raw bearer token to the caller behind it.
    ///
    /// Entitlements are read from the current user record, so changes made by
    /// an administrator apply to existing sessions immediately. On success the
    /// session's `last_used_at` timestamp is refreshed on a best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn resolve_caller(&self, token: &str) -> Result<Caller, AppError> {
        let token_hash = self.hash_token(token);

        let user = self
            .repository
            .find_user_by_token(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Invalid or revoked token"}),
                )
            })?;

        if let Err(e) = self.repository.touch(&token_hash).await {
            tracing::warn!(error = %e, "Failed to update session last_used_at");
        }

        Ok(Caller::from(&user))
    }

    /// Revokes the session identified by a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the session is unknown or already revoked.
    pub async fn revoke_session(&self, token: &str) -> Result<(), AppError> {
        if !self.repository.revoke(&self.hash_token(token)).await? {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        }

        Ok(())
    }
}

/// Generates a cryptographically random session token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
/// - Entropy: ~286 bits
fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..TOKEN_CHARSET.len());
            TOKEN_CHARSET[idx] as char
        })
        .collect()
}
