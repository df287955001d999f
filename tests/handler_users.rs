mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use link_registry::api::dto::users::SessionResponse;
use serde_json::{Value, json};
use sqlx::PgPool;

fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    TestServer::new(common::api_app(state)).unwrap()
}

async fn register(server: &TestServer, username: &str, password: &str) -> SessionResponse {
    let response = server
        .post("/api/users")
        .json(&json!({ "username": username, "password": password }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[sqlx::test]
async fn test_register_success(pool: PgPool) {
    let server = make_server(pool);

    let body = register(&server, "alice", "correct horse").await;

    assert_eq!(body.username, "alice");
    assert!(!body.is_pro);
    assert!(!body.is_admin);
    assert_eq!(body.token.len(), 48);
}

#[sqlx::test]
async fn test_register_token_authenticates(pool: PgPool) {
    let server = make_server(pool);
    let session = register(&server, "alice", "pw").await;

    server
        .post("/api/links")
        .authorization_bearer(&session.token)
        .json(&json!({ "original_url": "https://example.com" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[sqlx::test]
async fn test_register_duplicate_username(pool: PgPool) {
    let server = make_server(pool);
    register(&server, "alice", "pw").await;

    let response = server
        .post("/api/users")
        .json(&json!({ "username": "alice", "password": "other" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "conflict");
}

#[sqlx::test]
async fn test_register_missing_fields(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/api/users")
        .json(&json!({ "username": "alice" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[sqlx::test]
async fn test_login_success(pool: PgPool) {
    let server = make_server(pool);
    let registered = register(&server, "alice", "s3cret").await;

    let response = server
        .post("/api/users/login")
        .json(&json!({ "username": "alice", "password": "s3cret" }))
        .await;

    response.assert_status_ok();
    let body: SessionResponse = response.json();
    assert_eq!(body.user_id, registered.user_id);
    assert_ne!(body.token, registered.token);
}

#[sqlx::test]
async fn test_login_wrong_password(pool: PgPool) {
    let server = make_server(pool);
    register(&server, "alice", "s3cret").await;

    let response = server
        .post("/api/users/login")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_login_unknown_user(pool: PgPool) {
    let server = make_server(pool);

    server
        .post("/api/users/login")
        .json(&json!({ "username": "ghost", "password": "pw" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_logout_revokes_token(pool: PgPool) {
    let server = make_server(pool);
    let session = register(&server, "alice", "pw").await;

    server
        .post("/api/users/logout")
        .authorization_bearer(&session.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // The token no longer resolves
    server
        .post("/api/links")
        .authorization_bearer(&session.token)
        .json(&json!({ "original_url": "https://example.com" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_logout_without_token(pool: PgPool) {
    let server = make_server(pool);

    server
        .post("/api/users/logout")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
