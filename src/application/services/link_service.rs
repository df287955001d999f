//! Link registry: creation, lookup, visit accounting, deletion and listing.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::error::AppError;
use crate::utils::link_id::{derive_link_id, is_well_formed};

/// Maximum number of links a user without `is_pro` or `is_admin` may own.
pub const FREE_TIER_LINK_LIMIT: i64 = 5;

/// Service owning every rule about link records.
///
/// Identity is always passed in explicitly (`requester_id`,
/// `requester_is_admin`); the service holds no per-request state.
pub struct LinkService<L: LinkRepository, U: UserRepository> {
    link_repository: Arc<L>,
    user_repository: Arc<U>,
    anonymous_listing: bool,
}

impl<L: LinkRepository, U: UserRepository> LinkService<L, U> {
    /// Creates a new link service. Anonymous listing is allowed by default.
    pub fn new(link_repository: Arc<L>, user_repository: Arc<U>) -> Self {
        Self {
            link_repository,
            user_repository,
            anonymous_listing: true,
        }
    }

    /// Controls whether unauthenticated requesters may list any owner's links.
    pub fn with_anonymous_listing(mut self, allowed: bool) -> Self {
        self.anonymous_listing = allowed;
        self
    }

    /// Shortens `original_url` on behalf of `owner_id`.
    ///
    /// The identifier is derived from `(original_url, owner_id)`, so submitting
    /// the same URL twice as the same owner yields the same identifier and the
    /// second attempt fails with a conflict.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is empty or blank
    /// - [`AppError::Unauthorized`] if the owner does not exist
    /// - [`AppError::QuotaExceeded`] if a non-privileged owner already has
    ///   [`FREE_TIER_LINK_LIMIT`] links
    /// - [`AppError::Conflict`] if the derived identifier is already taken
    /// - [`AppError::Storage`] on database errors
    pub async fn create_link(
        &self,
        original_url: String,
        owner_id: Uuid,
    ) -> Result<Link, AppError> {
        if original_url.trim().is_empty() {
            return Err(AppError::bad_request(
                "Original URL must not be empty",
                json!({ "field": "original_url" }),
            ));
        }

        let owner = self
            .user_repository
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Owner does not exist", json!({ "owner_id": owner_id }))
            })?;

        let link_id = derive_link_id(&original_url, &owner.id.to_string());
        let quota = (!owner.is_privileged()).then_some(FREE_TIER_LINK_LIMIT);

        let new_link = NewLink {
            link_id: link_id.clone(),
            original_url,
            owner_id: owner.id,
        };

        match self.link_repository.create(new_link, quota).await {
            Ok(link) => {
                tracing::info!(link_id = %link.link_id, owner_id = %owner.id, "Link created");
                Ok(link)
            }
            Err(e @ AppError::QuotaExceeded { .. }) => {
                tracing::warn!(owner_id = %owner.id, "Link quota exceeded");
                Err(e)
            }
            Err(AppError::Conflict { .. }) => {
                tracing::warn!(
                    link_id = %link_id,
                    owner_id = %owner.id,
                    "Link identifier already in use"
                );
                Err(AppError::conflict(
                    "Link identifier already in use",
                    json!({ "link_id": link_id }),
                ))
            }
            Err(e) => Err(e),
        }
    }

    /// Retrieves a link by identifier. No side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this identifier.
    pub async fn get_link(&self, link_id: &str) -> Result<Link, AppError> {
        if !is_well_formed(link_id) {
            return Err(link_not_found(link_id));
        }

        self.link_repository
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| link_not_found(link_id))
    }

    /// Retrieves a link on behalf of its owner.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthorized`] if there is no requester
    /// - [`AppError::NotFound`] if no link has this identifier
    /// - [`AppError::Forbidden`] if the requester does not own the link
    pub async fn get_owned_link(
        &self,
        link_id: &str,
        requester_id: Option<Uuid>,
    ) -> Result<Link, AppError> {
        let requester_id = requester_id.ok_or_else(missing_identity)?;

        let link = self.get_link(link_id).await?;

        if !link.is_owned_by(requester_id) {
            return Err(AppError::forbidden(
                "Link belongs to another user",
                json!({ "link_id": link_id }),
            ));
        }

        Ok(link)
    }

    /// Resolves a short identifier and records the visit.
    ///
    /// The increment is applied and persisted by a single atomic store update
    /// before the URL is returned; concurrent resolutions never lose a count.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link has this identifier (nothing is written)
    /// - [`AppError::Storage`] if the visit could not be persisted
    pub async fn resolve_and_record_visit(&self, link_id: &str) -> Result<String, AppError> {
        if !is_well_formed(link_id) {
            return Err(link_not_found(link_id));
        }

        let link = self
            .link_repository
            .record_visit(link_id)
            .await?
            .ok_or_else(|| link_not_found(link_id))?;

        tracing::debug!(link_id, visit_count = link.visit_count, "Visit recorded");

        Ok(link.original_url)
    }

    /// Permanently deletes a link.
    ///
    /// Allowed for admins and for the link's owner.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthorized`] if there is no requester and the caller is not admin
    /// - [`AppError::NotFound`] if no link has this identifier
    /// - [`AppError::Forbidden`] if the requester is neither owner nor admin
    pub async fn delete_link(
        &self,
        link_id: &str,
        requester_id: Option<Uuid>,
        requester_is_admin: bool,
    ) -> Result<(), AppError> {
        self.delete_scoped(link_id, None, requester_id, requester_is_admin)
            .await
    }

    /// Deletes a link addressed through its owner.
    ///
    /// Same rules as [`Self::delete_link`]; a link owned by someone other than
    /// `owner_id` is reported as not found.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthorized`] if there is no requester and the caller is not admin
    /// - [`AppError::NotFound`] if `owner_id` has no link with this identifier
    /// - [`AppError::Forbidden`] if the requester is neither owner nor admin
    pub async fn delete_owner_link(
        &self,
        owner_id: Uuid,
        link_id: &str,
        requester_id: Option<Uuid>,
        requester_is_admin: bool,
    ) -> Result<(), AppError> {
        self.delete_scoped(link_id, Some(owner_id), requester_id, requester_is_admin)
            .await
    }

    async fn delete_scoped(
        &self,
        link_id: &str,
        expected_owner: Option<Uuid>,
        requester_id: Option<Uuid>,
        requester_is_admin: bool,
    ) -> Result<(), AppError> {
        if requester_id.is_none() && !requester_is_admin {
            return Err(missing_identity());
        }

        let link = self.get_link(link_id).await?;

        if expected_owner.is_some_and(|owner| !link.is_owned_by(owner)) {
            return Err(link_not_found(link_id));
        }

        let is_owner = requester_id.is_some_and(|id| link.is_owned_by(id));
        if !requester_is_admin && !is_owner {
            return Err(AppError::forbidden(
                "Not allowed to delete this link",
                json!({ "link_id": link_id }),
            ));
        }

        if !self.link_repository.delete(link_id).await? {
            return Err(link_not_found(link_id));
        }

        tracing::info!(
            link_id,
            owner_id = %link.owner_id,
            by_admin = requester_is_admin && !is_owner,
            "Link deleted"
        );

        Ok(())
    }

    /// Lists the links of `owner_id`, oldest first.
    ///
    /// Authorization:
    /// - an admin or the owner may always list
    /// - another authenticated user is refused
    /// - an unauthenticated requester may list any owner's links unless
    ///   anonymous listing has been disabled
    ///
    /// # Errors
    ///
    /// - [`AppError::Forbidden`] if an authenticated non-admin lists someone else
    /// - [`AppError::Unauthorized`] if anonymous listing is disabled and there is no requester
    pub async fn list_links_for_owner(
        &self,
        owner_id: Uuid,
        requester_id: Option<Uuid>,
        requester_is_admin: bool,
    ) -> Result<Vec<Link>, AppError> {
        match requester_id {
            None if !requester_is_admin && !self.anonymous_listing => {
                return Err(missing_identity());
            }
            None => {
                tracing::debug!(owner_id = %owner_id, "Anonymous link listing");
            }
            Some(id) if !requester_is_admin && id != owner_id => {
                return Err(AppError::forbidden(
                    "Not allowed to list another user's links",
                    json!({ "owner_id": owner_id }),
                ));
            }
            Some(_) => {}
        }

        self.link_repository.list_by_owner(owner_id).await
    }

    /// Counts the links owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn count_links_for_owner(&self, owner_id: Uuid) -> Result<i64, AppError> {
        self.link_repository.count_by_owner(owner_id).await
    }

    /// Constructs the public short URL for a link identifier.
    pub fn get_short_url(&self, base_url: &str, link_id: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), link_id)
    }
}

fn link_not_found(link_id: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "link_id": link_id }))
}

fn missing_identity() -> AppError {
    AppError::unauthorized(
        "Unauthorized",
        json!({ "reason": "Authentication required" }),
    )
}
