//! Session guard
//!
//! Every item read or mutation is scoped to a login session, so handlers
//! run the incoming token through this guard before touching the item
//! store. There is no TTL: a session stays valid until logout flips its
//! `active` flag.

use tracing::error;

use crate::{error::TrackerError, models::Session, repositories::SessionRepository};

/// Resolve a token to its active session, or fail with Unauthorized
///
/// A token with no matching session, or whose session has been
/// deactivated by logout, is rejected. Store failures map to an internal
/// error rather than leaking as Unauthorized.
pub async fn require_active_session(
    sessions: &SessionRepository,
    token: &str,
) -> Result<Session, TrackerError> {
    let session = sessions.find_active_by_token(token).await.map_err(|e| {
        error!("Failed to look up session: {}", e);
        TrackerError::InternalServerError
    })?;

    session.ok_or(TrackerError::Unauthorized)
}
