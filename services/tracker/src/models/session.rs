//! Session model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Session entity
///
/// A session is created at login with a freshly generated token and stays
/// in the store forever; logout only flips `active` to false. A user may
/// hold any number of concurrently-active sessions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// New session creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    pub user_id: Uuid,
    pub token: String,
}
