//! Resolved identity of the party making a request.

use uuid::Uuid;

use crate::domain::entities::User;

/// An authenticated caller, resolved once per request by
/// [`crate::api::middleware::auth`] and handed explicitly to services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Uuid,
    pub is_admin: bool,
    /// Informational. The link quota is decided from the owner row read at
    /// creation time, never from this snapshot.
    pub is_pro: bool,
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            is_admin: user.is_admin,
            is_pro: user.is_pro,
        }
    }
}
