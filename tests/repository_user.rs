mod common;

use link_registry::domain::entities::NewUser;
use link_registry::domain::repositories::UserRepository;
use link_registry::error::AppError;
use link_registry::infrastructure::persistence::PgUserRepository;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password_hash: "$2b$04$placeholderplaceholderplaceholderplaceholde".to_string(),
    }
}

#[sqlx::test]
async fn test_create_user_defaults(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create(new_user("alice")).await.unwrap();

    assert_eq!(user.username, "alice");
    assert!(!user.is_pro);
    assert!(!user.is_admin);
    assert!(!user.is_privileged());
}

#[sqlx::test]
async fn test_create_duplicate_username(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create(new_user("alice")).await.unwrap();
    let result = repo.create(new_user("alice")).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_find_by_id_and_username(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let created = repo.create(new_user("bob")).await.unwrap();

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "bob");

    let by_name = repo.find_by_username("bob").await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    assert!(repo.find_by_username("nobody").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_list_users(pool: PgPool) {
    common::create_test_user(&pool, "first", false, false).await;
    common::create_test_user(&pool, "second", true, false).await;

    let repo = PgUserRepository::new(Arc::new(pool));
    let users = repo.list().await.unwrap();

    assert_eq!(users.len(), 2);
}

#[sqlx::test]
async fn test_set_entitlements(pool: PgPool) {
    let id = common::create_test_user(&pool, "carol", false, false).await;
    let repo = PgUserRepository::new(Arc::new(pool));

    let updated = repo.set_entitlements(id, true, false).await.unwrap();
    assert!(updated.is_pro);
    assert!(!updated.is_admin);
    assert!(updated.is_privileged());

    let updated = repo.set_entitlements(id, false, true).await.unwrap();
    assert!(!updated.is_pro);
    assert!(updated.is_admin);
}

#[sqlx::test]
async fn test_set_entitlements_unknown_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let result = repo.set_entitlements(Uuid::new_v4(), true, true).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
}
