//! Integration tests for the session and item flows
//!
//! These tests run against a live PostgreSQL instance and are skipped
//! when no `DATABASE_URL` is provided. Each test provisions its own
//! users, sessions, and tokens, so they can run against a shared
//! database without cleanup.

use common::database::{DatabaseConfig, ensure_schema, init_pool};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use tracker::error::{TrackerError, is_unique_violation};
use tracker::guard::require_active_session;
use tracker::models::{NewItem, NewSession, NewUser};
use tracker::repositories::{ItemRepository, SessionRepository, UserRepository};
use tracker::summary::summarize;

async fn test_pool() -> Option<PgPool> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set, skipping integration test");
        return None;
    }

    let config = DatabaseConfig::from_env().expect("database config");
    let pool = init_pool(&config).await.expect("database pool");
    ensure_schema(&pool).await.expect("schema bootstrap");
    Some(pool)
}

fn unique_username() -> String {
    format!("user_{}", Uuid::new_v4().simple())
}

async fn register_and_login(pool: &PgPool) -> (Uuid, String) {
    let users = UserRepository::new(pool.clone());
    let sessions = SessionRepository::new(pool.clone());

    let user = users
        .create(&NewUser {
            username: unique_username(),
            password: "pw1".to_string(),
        })
        .await
        .expect("user creation");

    let session = sessions
        .create(&NewSession {
            user_id: user.id,
            token: Uuid::new_v4().to_string(),
        })
        .await
        .expect("session creation");

    (user.id, session.token)
}

#[tokio::test]
async fn test_guard_rejects_unknown_token() {
    let Some(pool) = test_pool().await else { return };
    let sessions = SessionRepository::new(pool.clone());

    let result = require_active_session(&sessions, &Uuid::new_v4().to_string()).await;
    assert!(matches!(result, Err(TrackerError::Unauthorized)));
}

#[tokio::test]
async fn test_login_issues_fresh_tokens_per_session() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool.clone());
    let sessions = SessionRepository::new(pool.clone());

    let user = users
        .create(&NewUser {
            username: unique_username(),
            password: "pw1".to_string(),
        })
        .await
        .expect("user creation");

    // Two logins yield two distinct, concurrently-active sessions
    let first = sessions
        .create(&NewSession {
            user_id: user.id,
            token: Uuid::new_v4().to_string(),
        })
        .await
        .expect("first session");
    let second = sessions
        .create(&NewSession {
            user_id: user.id,
            token: Uuid::new_v4().to_string(),
        })
        .await
        .expect("second session");

    assert_ne!(first.token, second.token);

    let guarded = require_active_session(&sessions, &first.token).await;
    assert!(guarded.is_ok());
    let guarded = require_active_session(&sessions, &second.token).await;
    assert!(guarded.is_ok());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool.clone());

    let username = unique_username();
    let user = users
        .create(&NewUser {
            username: username.clone(),
            password: "pw1".to_string(),
        })
        .await
        .expect("user creation");

    // Correct password verifies
    assert!(
        users
            .verify_password(&user, "pw1")
            .await
            .expect("verification")
    );

    // Wrong password and unknown user both end in "no authenticated user"
    assert!(
        !users
            .verify_password(&user, "wrong")
            .await
            .expect("verification")
    );
    let missing = users
        .find_by_username(&unique_username())
        .await
        .expect("lookup");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let Some(pool) = test_pool().await else { return };
    let sessions = SessionRepository::new(pool.clone());

    let (_, token) = register_and_login(&pool).await;

    // First logout deactivates the session
    assert!(sessions.deactivate(&token).await.expect("first logout"));
    let result = require_active_session(&sessions, &token).await;
    assert!(matches!(result, Err(TrackerError::Unauthorized)));

    // Second logout is a no-op, not an error
    assert!(!sessions.deactivate(&token).await.expect("second logout"));
    let result = require_active_session(&sessions, &token).await;
    assert!(matches!(result, Err(TrackerError::Unauthorized)));
}

#[tokio::test]
async fn test_duplicate_username_is_a_unique_violation() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool.clone());

    let username = unique_username();
    users
        .create(&NewUser {
            username: username.clone(),
            password: "pw1".to_string(),
        })
        .await
        .expect("first registration");

    let err = users
        .create(&NewUser {
            username,
            password: "pw2".to_string(),
        })
        .await
        .expect_err("duplicate registration must fail");

    assert!(is_unique_violation(&err));
}

#[tokio::test]
async fn test_summary_of_coffee_and_tea() {
    let Some(pool) = test_pool().await else { return };
    let items = ItemRepository::new(pool.clone());

    let (_, token) = register_and_login(&pool).await;

    // Nothing added yet: (0, 0), no error
    let empty = summarize(&items, &token).await.expect("empty summary");
    assert_eq!(empty.total, Decimal::ZERO);
    assert_eq!(empty.count, 0);

    for (name, value) in [("coffee", "3.50"), ("tea", "2.25")] {
        items
            .add(&NewItem {
                name: name.to_string(),
                value: value.parse().unwrap(),
                token: token.clone(),
            })
            .await
            .expect("item insert");
    }

    let summary = summarize(&items, &token).await.expect("summary");
    assert_eq!(summary.total, "5.75".parse::<Decimal>().unwrap());
    assert_eq!(summary.count, 2);
}

#[tokio::test]
async fn test_delete_misses_are_not_fatal() {
    let Some(pool) = test_pool().await else { return };
    let items = ItemRepository::new(pool.clone());

    let (_, token) = register_and_login(&pool).await;

    // Unknown id deletes nothing
    let deleted = items
        .delete(Uuid::new_v4(), &token)
        .await
        .expect("delete of unknown id");
    assert!(!deleted);

    // An item created under another token is out of reach
    let (_, other_token) = register_and_login(&pool).await;
    let foreign = items
        .add(&NewItem {
            name: "notebook".to_string(),
            value: "9.99".parse().unwrap(),
            token: other_token,
        })
        .await
        .expect("item insert");

    let deleted = items
        .delete(foreign.id, &token)
        .await
        .expect("scoped delete");
    assert!(!deleted);

    // The owner can delete it
    let deleted = items
        .delete(foreign.id, &foreign.token)
        .await
        .expect("owner delete");
    assert!(deleted);
}

#[tokio::test]
async fn test_display_lists_items_across_tokens() {
    let Some(pool) = test_pool().await else { return };
    let items = ItemRepository::new(pool.clone());

    let (_, first_token) = register_and_login(&pool).await;
    let (_, second_token) = register_and_login(&pool).await;

    let first = items
        .add(&NewItem {
            name: "coffee".to_string(),
            value: "3.50".parse().unwrap(),
            token: first_token,
        })
        .await
        .expect("item insert");
    let second = items
        .add(&NewItem {
            name: "tea".to_string(),
            value: "2.25".parse().unwrap(),
            token: second_token,
        })
        .await
        .expect("item insert");

    // The display view is not scoped by token
    let all = items.list_all().await.expect("list all");
    assert!(all.iter().any(|item| item.id == first.id));
    assert!(all.iter().any(|item| item.id == second.id));
}
