mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use link_registry::api::dto::links::{CreatedLinkResponse, LinkResponse};
use link_registry::utils::link_id::derive_link_id;
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

struct Fixture {
    server: TestServer,
    pool: PgPool,
    user_id: Uuid,
    token: String,
}

async fn setup(pool: PgPool, username: &str, is_pro: bool, is_admin: bool) -> Fixture {
    let state = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, username, is_pro, is_admin).await;
    let token = common::issue_token(&state, user_id).await;

    Fixture {
        server: TestServer::new(common::api_app(state.clone())).unwrap(),
        pool,
        user_id,
        token,
    }
}

// ─── POST /api/links ─────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_link_success(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;

    let response = fx
        .server
        .post("/api/links")
        .authorization_bearer(&fx.token)
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: CreatedLinkResponse = response.json();
    let expected_id = derive_link_id("https://example.com/a", &fx.user_id.to_string());
    assert_eq!(body.link_id, expected_id);
    assert_eq!(body.original_url, "https://example.com/a");
    assert_eq!(
        body.short_url,
        format!("{}/{}", common::TEST_BASE_URL, expected_id)
    );
}

#[sqlx::test]
async fn test_create_link_anonymous(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;

    let response = fx
        .server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[sqlx::test]
async fn test_create_link_invalid_token(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;

    let response = fx
        .server
        .post("/api/links")
        .authorization_bearer("not-a-session")
        .json(&json!({ "original_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[sqlx::test]
async fn test_create_link_empty_url(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;

    for payload in [json!({}), json!({ "original_url": "" }), json!({ "original_url": "  " })] {
        let response = fx
            .server
            .post("/api/links")
            .authorization_bearer(&fx.token)
            .json(&payload)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "validation_error");
    }

    assert_eq!(common::link_count(&fx.pool, fx.user_id).await, 0);
}

#[sqlx::test]
async fn test_create_link_resubmission_conflicts(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    let payload = json!({ "original_url": "https://example.com/same" });

    fx.server
        .post("/api/links")
        .authorization_bearer(&fx.token)
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);

    let response = fx
        .server
        .post("/api/links")
        .authorization_bearer(&fx.token)
        .json(&payload)
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(common::link_count(&fx.pool, fx.user_id).await, 1);
}

#[sqlx::test]
async fn test_create_link_free_quota(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;

    for i in 0..5 {
        fx.server
            .post("/api/links")
            .authorization_bearer(&fx.token)
            .json(&json!({ "original_url": format!("https://example.com/{i}") }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = fx
        .server
        .post("/api/links")
        .authorization_bearer(&fx.token)
        .json(&json!({ "original_url": "https://example.com/sixth" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "quota_exceeded");
    assert_eq!(common::link_count(&fx.pool, fx.user_id).await, 5);
}

#[sqlx::test]
async fn test_create_link_pro_unlimited(pool: PgPool) {
    let fx = setup(pool, "pro", true, false).await;

    for i in 0..7 {
        fx.server
            .post("/api/links")
            .authorization_bearer(&fx.token)
            .json(&json!({ "original_url": format!("https://example.com/{i}") }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    assert_eq!(common::link_count(&fx.pool, fx.user_id).await, 7);
}

// ─── GET /api/links/{link_id} ────────────────────────────────────────────────

#[sqlx::test]
async fn test_get_link_owner(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    common::create_test_link(&fx.pool, "own000001", "https://example.com", fx.user_id).await;

    let response = fx
        .server
        .get("/api/links/own000001")
        .authorization_bearer(&fx.token)
        .await;

    response.assert_status_ok();
    let body: LinkResponse = response.json();
    assert_eq!(body.link_id, "own000001");
    assert_eq!(body.owner_id, fx.user_id);
    assert_eq!(body.visit_count, 0);
    assert!(body.last_accessed_on.is_none());
}

#[sqlx::test]
async fn test_get_link_other_owner_forbidden(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    let bob = common::create_test_user(&fx.pool, "bob", false, false).await;
    common::create_test_link(&fx.pool, "bob000001", "https://example.com", bob).await;

    fx.server
        .get("/api/links/bob000001")
        .authorization_bearer(&fx.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[sqlx::test]
async fn test_get_link_anonymous(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    common::create_test_link(&fx.pool, "own000001", "https://example.com", fx.user_id).await;

    fx.server
        .get("/api/links/own000001")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_get_link_not_found(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;

    fx.server
        .get("/api/links/missing01")
        .authorization_bearer(&fx.token)
        .await
        .assert_status_not_found();
}

// ─── DELETE /api/links/{link_id} ─────────────────────────────────────────────

#[sqlx::test]
async fn test_delete_link_owner(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    common::create_test_link(&fx.pool, "del000001", "https://example.com", fx.user_id).await;

    fx.server
        .delete("/api/links/del000001")
        .authorization_bearer(&fx.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // Second delete returns 404
    fx.server
        .delete("/api/links/del000001")
        .authorization_bearer(&fx.token)
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_delete_link_admin_may_delete_any(pool: PgPool) {
    let fx = setup(pool, "root", false, true).await;
    let bob = common::create_test_user(&fx.pool, "bob", false, false).await;
    common::create_test_link(&fx.pool, "bob000001", "https://example.com", bob).await;

    fx.server
        .delete("/api/links/bob000001")
        .authorization_bearer(&fx.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(common::link_count(&fx.pool, bob).await, 0);
}

#[sqlx::test]
async fn test_delete_link_non_owner_forbidden(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    let bob = common::create_test_user(&fx.pool, "bob", false, false).await;
    common::create_test_link(&fx.pool, "bob000001", "https://example.com", bob).await;

    fx.server
        .delete("/api/links/bob000001")
        .authorization_bearer(&fx.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert_eq!(common::link_count(&fx.pool, bob).await, 1);
}

#[sqlx::test]
async fn test_delete_link_anonymous(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    common::create_test_link(&fx.pool, "del000001", "https://example.com", fx.user_id).await;

    fx.server
        .delete("/api/links/del000001")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(common::link_count(&fx.pool, fx.user_id).await, 1);
}

#[sqlx::test]
async fn test_delete_frees_quota(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    for i in 0..5 {
        common::create_test_link(
            &fx.pool,
            &format!("full0000{i}"),
            "https://example.com",
            fx.user_id,
        )
        .await;
    }

    fx.server
        .delete("/api/links/full00000")
        .authorization_bearer(&fx.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    fx.server
        .post("/api/links")
        .authorization_bearer(&fx.token)
        .json(&json!({ "original_url": "https://example.com/again" }))
        .await
        .assert_status(StatusCode::CREATED);
}

// ─── DELETE /api/users/{user_id}/links/{link_id} ─────────────────────────────

#[sqlx::test]
async fn test_delete_owner_link(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    common::create_test_link(&fx.pool, "del000001", "https://example.com", fx.user_id).await;

    fx.server
        .delete(&format!("/api/users/{}/links/del000001", fx.user_id))
        .authorization_bearer(&fx.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(common::link_count(&fx.pool, fx.user_id).await, 0);
}

#[sqlx::test]
async fn test_delete_owner_link_wrong_owner_not_found(pool: PgPool) {
    let fx = setup(pool, "root", false, true).await;
    let bob = common::create_test_user(&fx.pool, "bob", false, false).await;
    common::create_test_link(&fx.pool, "bob000001", "https://example.com", bob).await;

    fx.server
        .delete(&format!("/api/users/{}/links/bob000001", fx.user_id))
        .authorization_bearer(&fx.token)
        .await
        .assert_status_not_found();

    assert_eq!(common::link_count(&fx.pool, bob).await, 1);
}

#[sqlx::test]
async fn test_delete_owner_link_non_owner_forbidden(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    let bob = common::create_test_user(&fx.pool, "bob", false, false).await;
    common::create_test_link(&fx.pool, "bob000001", "https://example.com", bob).await;

    fx.server
        .delete(&format!("/api/users/{bob}/links/bob000001"))
        .authorization_bearer(&fx.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert_eq!(common::link_count(&fx.pool, bob).await, 1);
}

// ─── GET /api/users/{user_id}/links ──────────────────────────────────────────

#[sqlx::test]
async fn test_list_own_links(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    common::create_test_link(&fx.pool, "list00001", "https://a.example", fx.user_id).await;
    common::create_test_link(&fx.pool, "list00002", "https://b.example", fx.user_id).await;

    let response = fx
        .server
        .get(&format!("/api/users/{}/links", fx.user_id))
        .authorization_bearer(&fx.token)
        .await;

    response.assert_status_ok();
    let body: Vec<LinkResponse> = response.json();
    assert_eq!(body.len(), 2);
    assert!(body.iter().all(|l| l.owner_id == fx.user_id));
}

#[sqlx::test]
async fn test_list_other_user_forbidden(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    let bob = common::create_test_user(&fx.pool, "bob", false, false).await;

    fx.server
        .get(&format!("/api/users/{}/links", bob))
        .authorization_bearer(&fx.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[sqlx::test]
async fn test_list_admin_sees_anyone(pool: PgPool) {
    let fx = setup(pool, "root", false, true).await;
    let bob = common::create_test_user(&fx.pool, "bob", false, false).await;
    common::create_test_link(&fx.pool, "bob000001", "https://example.com", bob).await;

    let response = fx
        .server
        .get(&format!("/api/users/{}/links", bob))
        .authorization_bearer(&fx.token)
        .await;

    response.assert_status_ok();
    let body: Vec<LinkResponse> = response.json();
    assert_eq!(body.len(), 1);
}

#[sqlx::test]
async fn test_list_anonymous_allowed_by_default(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;
    common::create_test_link(&fx.pool, "list00001", "https://a.example", fx.user_id).await;

    let response = fx
        .server
        .get(&format!("/api/users/{}/links", fx.user_id))
        .await;

    response.assert_status_ok();
    let body: Vec<LinkResponse> = response.json();
    assert_eq!(body.len(), 1);
}

#[sqlx::test]
async fn test_list_anonymous_when_disabled(pool: PgPool) {
    let state = common::create_test_state_with_listing(pool.clone(), false);
    let owner = common::create_test_user(&pool, "alice", false, false).await;
    let server = TestServer::new(common::api_app(state)).unwrap();

    server
        .get(&format!("/api/users/{}/links", owner))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_list_invalid_user_id(pool: PgPool) {
    let fx = setup(pool, "alice", false, false).await;

    let response = fx
        .server
        .get("/api/users/not-a-uuid/links")
        .authorization_bearer(&fx.token)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
