//! Item repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{Item, NewItem};

/// Item repository
#[derive(Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new item
    ///
    /// No validation of name or value happens here: once the session guard
    /// has passed, an add succeeds unconditionally.
    pub async fn add(&self, new_item: &NewItem) -> Result<Item> {
        info!("Adding item: {}", new_item.name);

        let row = sqlx::query(
            r#"
            INSERT INTO items (name, value, token)
            VALUES ($1, $2, $3)
            RETURNING id, name, value, token, created_at
            "#,
        )
        .bind(&new_item.name)
        .bind(new_item.value)
        .bind(&new_item.token)
        .fetch_one(&self.pool)
        .await?;

        let item = Item {
            id: row.get("id"),
            name: row.get("name"),
            value: row.get("value"),
            token: row.get("token"),
            created_at: row.get("created_at"),
        };

        Ok(item)
    }

    /// Delete an item by id, scoped to the requester's token
    ///
    /// Returns whether a row was deleted. A miss (unknown id, or an item
    /// created under a different token) deletes nothing.
    pub async fn delete(&self, item_id: Uuid, token: &str) -> Result<bool> {
        info!("Deleting item: {}", item_id);

        let result = sqlx::query(
            r#"
            DELETE FROM items
            WHERE id = $1 AND token = $2
            "#,
        )
        .bind(item_id)
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get every item regardless of token, newest first
    ///
    /// Backs the display view, which shows the full store.
    pub async fn list_all(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, value, token, created_at
            FROM items
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|row| Item {
                id: row.get("id"),
                name: row.get("name"),
                value: row.get("value"),
                token: row.get("token"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(items)
    }

    /// Get the items created under a token, newest first
    pub async fn find_by_token(&self, token: &str) -> Result<Vec<Item>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, value, token, created_at
            FROM items
            WHERE token = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(token)
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|row| Item {
                id: row.get("id"),
                name: row.get("name"),
                value: row.get("value"),
                token: row.get("token"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(items)
    }
}
