//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for link records.
///
/// Each method is one access pattern; the store's query language never leaks
/// past this trait.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its short identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_id(&self, link_id: &str) -> Result<Option<Link>, AppError>;

    /// Inserts a new link, enforcing the owner's quota atomically.
    ///
    /// The owner's existing links are counted and the new row inserted inside a
    /// single transaction that holds a lock on the owner, so concurrent creations
    /// by the same owner are serialized. `quota: None` means unlimited.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthorized`] if the owner does not exist
    /// - [`AppError::QuotaExceeded`] if the owner already has `quota` links
    /// - [`AppError::Conflict`] if the link identifier is already taken
    /// - [`AppError::Storage`] on other database errors
    async fn create(&self, new_link: NewLink, quota: Option<i64>) -> Result<Link, AppError>;

    /// Atomically increments the visit count and refreshes `last_accessed_on`.
    ///
    /// `last_accessed_on` is stamped by the store once the row lock is held, so
    /// it always carries the time of the visit that produced the returned count.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with the updated record
    /// - `Ok(None)` if no link has this identifier (nothing is written)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn record_visit(&self, link_id: &str) -> Result<Option<Link>, AppError>;

    /// Permanently removes a link.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete(&self, link_id: &str) -> Result<bool, AppError>;

    /// Counts links owned by a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn count_by_owner(&self, owner_id: Uuid) -> Result<i64, AppError>;

    /// Lists links owned by a user in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Link>, AppError>;
}
