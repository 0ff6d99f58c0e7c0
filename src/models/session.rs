use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a user session.
///
/// Sessions live in Redis keyed by an opaque random id; the payload carries
/// enough of the profile to serve requests without a user lookup. Read-only
/// outside the session service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The ID of the user this session belongs to.
    pub user_id: Uuid,
    /// The user's email address at sign-in time.
    pub email: String,
    /// The user's stored display name, if any.
    pub name: Option<String>,
    /// The timestamp when the session was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the session expires.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// The display name derived for this session's profile.
    pub fn display_name(&self) -> String {
        crate::models::user::derive_display_name(self.name.as_deref(), &self.email)
    }
}
