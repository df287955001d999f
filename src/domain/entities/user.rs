//! User entity and entitlement helpers.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered user.
///
/// `password_hash` is owned by the authentication side of the service; the
/// link registry only reads the identity and entitlement flags.
#[derive(Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub is_pro: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Privileged users are exempt from the free-tier link cap.
    pub fn is_privileged(&self) -> bool {
        self.is_pro || self.is_admin
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("is_pro", &self.is_pro)
            .field("is_admin", &self.is_admin)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Input data for registering a user. New users carry no entitlements.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}
