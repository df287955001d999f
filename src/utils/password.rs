//! Password hashing utilities.
//!
//! bcrypt is CPU-bound, so both helpers run on the blocking thread pool.

use crate::error::AppError;
use serde_json::json;

/// bcrypt only considers the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes a password with bcrypt at the default cost.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails or the worker thread panics.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| hashing_failed("Password hashing task failed", e))?
        .map_err(|e| hashing_failed("Password hashing failed", e))
}

/// Verifies a password against a stored bcrypt hash.
///
/// A malformed stored hash verifies as `false` rather than erroring, so a
/// corrupt row reads as a failed login.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the worker thread panics.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .map_err(|e| hashing_failed("Password verification task failed", e))
}

fn hashing_failed(message: &'static str, e: impl std::fmt::Display) -> AppError {
    tracing::error!(error = %e, "{}", message);
    AppError::internal(message, json!({}))
}
