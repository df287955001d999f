//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for user accounts and entitlements.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user with a freshly generated identifier and no entitlements.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is taken.
    /// Returns [`AppError::Storage`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Lists all users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Sets the entitlement flags of a user.
    ///
    /// Only administrative tooling calls this; the link registry never does.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Storage`] on database errors.
    async fn set_entitlements(&self, id: Uuid, is_pro: bool, is_admin: bool)
    -> Result<User, AppError>;
}
