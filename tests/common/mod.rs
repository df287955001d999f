#![allow(dead_code)]

use axum::{Router, middleware};
use link_registry::api::middleware::auth;
use link_registry::api::routes::api_routes;
use link_registry::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_BASE_URL: &str = "http://s.example.com";

pub async fn create_test_user(
    pool: &PgPool,
    username: &str,
    is_pro: bool,
    is_admin: bool,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO users (id, username, password_hash, is_pro, is_admin)
         VALUES ($1, $2, 'not-a-real-hash', $3, $4)
         RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(is_pro)
    .bind(is_admin)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_link(pool: &PgPool, link_id: &str, url: &str, owner_id: Uuid) {
    sqlx::query("INSERT INTO links (link_id, original_url, owner_id) VALUES ($1, $2, $3)")
        .bind(link_id)
        .bind(url)
        .bind(owner_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn visit_count(pool: &PgPool, link_id: &str) -> i64 {
    sqlx::query_scalar("SELECT visit_count FROM links WHERE link_id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn link_count(pool: &PgPool, owner_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_listing(pool, true)
}

pub fn create_test_state_with_listing(pool: PgPool, anonymous_listing: bool) -> AppState {
    AppState::new(
        Arc::new(pool),
        TEST_BASE_URL.to_string(),
        "test-signing-secret".to_string(),
        anonymous_listing,
    )
}

/// Opens a session for `user_id` and returns the raw bearer token.
pub async fn issue_token(state: &AppState, user_id: Uuid) -> String {
    state.auth_service.issue_session(user_id).await.unwrap()
}

/// `/api` routes behind caller resolution, without rate limiting.
pub fn api_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api",
            api_routes().route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        )
        .with_state(state)
}
