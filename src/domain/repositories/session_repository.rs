//! Repository trait for login sessions.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for bearer-token sessions.
///
/// Only keyed hashes of session tokens are stored; raw tokens never reach the
/// database.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_session.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the hash already exists.
    /// Returns [`AppError::Storage`] on database errors.
    async fn create(&self, user_id: Uuid, token_hash: &str) -> Result<(), AppError>;

    /// Returns the user behind a live (non-revoked) session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_user_by_token(&self, token_hash: &str) -> Result<Option<User>, AppError>;

    /// Updates the `last_used_at` timestamp of a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn touch(&self, token_hash: &str) -> Result<(), AppError>;

    /// Revokes a live session.
    ///
    /// Returns `Ok(false)` if the session was unknown or already revoked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn revoke(&self, token_hash: &str) -> Result<bool, AppError>;
}
