//! Session repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{NewSession, Session};

/// Session repository
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new session with `active = true`
    pub async fn create(&self, new_session: &NewSession) -> Result<Session> {
        info!("Creating session for user: {}", new_session.user_id);

        let row = sqlx::query(
            r#"
            INSERT INTO sessions (user_id, token, active)
            VALUES ($1, $2, TRUE)
            RETURNING id, user_id, token, active, created_at
            "#,
        )
        .bind(new_session.user_id)
        .bind(&new_session.token)
        .fetch_one(&self.pool)
        .await?;

        let session = Session {
            id: row.get("id"),
            user_id: row.get("user_id"),
            token: row.get("token"),
            active: row.get("active"),
            created_at: row.get("created_at"),
        };

        Ok(session)
    }

    /// Find the session matching a token, provided it is still active
    pub async fn find_active_by_token(&self, token: &str) -> Result<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, token, active, created_at
            FROM sessions
            WHERE token = $1 AND active = TRUE
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let session = Session {
                    id: row.get("id"),
                    user_id: row.get("user_id"),
                    token: row.get("token"),
                    active: row.get("active"),
                    created_at: row.get("created_at"),
                };
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    /// Deactivate the session matching a token
    ///
    /// Idempotent: deactivating an already-inactive or unknown token is a
    /// no-op. Sessions are never deleted. Returns whether a row changed.
    pub async fn deactivate(&self, token: &str) -> Result<bool> {
        info!("Deactivating session");

        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET active = FALSE
            WHERE token = $1 AND active = TRUE
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
