//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::Link;

/// Request body for `POST /api/links`.
///
/// The URL is stored exactly as given; only emptiness is rejected.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub original_url: String,
}

/// Response for a newly created link.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedLinkResponse {
    pub link_id: String,
    pub original_url: String,
    pub short_url: String,
}

/// Full JSON representation of a link.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub link_id: String,
    pub original_url: String,
    pub short_url: String,
    pub owner_id: Uuid,
    pub visit_count: i64,
    pub last_accessed_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            link_id: link.link_id,
            original_url: link.original_url,
            short_url,
            owner_id: link.owner_id,
            visit_count: link.visit_count,
            last_accessed_on: link.last_accessed_on,
            created_at: link.created_at,
        }
    }
}
