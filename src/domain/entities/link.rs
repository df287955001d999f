//! Link entity representing a shortened URL owned by a user.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A shortened URL with its visit accounting.
///
/// `visit_count` and `last_accessed_on` change only through
/// [`crate::domain::repositories::LinkRepository::record_visit`]; the owner is
/// fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub link_id: String,
    pub original_url: String,
    pub visit_count: i64,
    pub last_accessed_on: Option<DateTime<Utc>>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if `user_id` owns this link.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub link_id: String,
    pub original_url: String,
    pub owner_id: Uuid,
}
