//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str =
    "link_id, original_url, visit_count, last_accessed_on, owner_id, created_at";

#[derive(FromRow)]
struct LinkRow {
    link_id: String,
    original_url: String,
    visit_count: i64,
    last_accessed_on: Option<DateTime<Utc>>,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            link_id: row.link_id,
            original_url: row.original_url,
            visit_count: row.visit_count,
            last_accessed_on: row.last_accessed_on,
            owner_id: row.owner_id,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for link records.
///
/// Quota checks and visit increments run as single statements or inside one
/// transaction, so concurrent requests never lose updates.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_id(&self, link_id: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE link_id = $1"
        ))
        .bind(link_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn create(&self, new_link: NewLink, quota: Option<i64>) -> Result<Link, AppError> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent creations for the same owner until commit.
        let owner: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
                .bind(new_link.owner_id)
                .fetch_optional(&mut *tx)
                .await?;

        if owner.is_none() {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Owner does not exist" }),
            ));
        }

        if let Some(limit) = quota {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE owner_id = $1")
                .bind(new_link.owner_id)
                .fetch_one(&mut *tx)
                .await?;

            if count >= limit {
                return Err(AppError::quota_exceeded(
                    "Link quota exceeded",
                    json!({ "limit": limit, "current": count }),
                ));
            }
        }

        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "INSERT INTO links (link_id, original_url, owner_id) \
             VALUES ($1, $2, $3) \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(&new_link.link_id)
        .bind(&new_link.original_url)
        .bind(new_link.owner_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn record_visit(&self, link_id: &str) -> Result<Option<Link>, AppError> {
        // clock_timestamp() is evaluated after the row lock, not at statement start.
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "UPDATE links \
             SET visit_count = visit_count + 1, \
                 last_accessed_on = clock_timestamp() \
             WHERE link_id = $1 \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(link_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn delete(&self, link_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE link_id = $1")
            .bind(link_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_owner(&self, owner_id: Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE owner_id = $1 \
             ORDER BY created_at, link_id"
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }
}
