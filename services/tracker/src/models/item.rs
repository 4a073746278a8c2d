//! Item model and related functionality

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Item entity
///
/// `token` holds the raw session-token value the item was created under.
/// It is not a foreign key: items outlive session deactivation and are
/// never cascade-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub value: Decimal,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

/// New item creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub value: Decimal,
    pub token: String,
}
