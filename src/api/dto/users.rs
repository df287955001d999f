//! DTOs for user and session endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::User;

/// Credentials for `POST /api/users` and `POST /api/users/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// A user together with a freshly issued session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub username: String,
    pub is_pro: bool,
    pub is_admin: bool,
    pub token: String,
}

impl SessionResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            is_pro: user.is_pro,
            is_admin: user.is_admin,
            token,
        }
    }
}
