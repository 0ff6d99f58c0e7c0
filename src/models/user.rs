use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Represents a user in the system.
#[derive(FromRow, Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: Uuid,
    /// The user's email address.
    pub email: String,
    /// The user's display name, if one was provided at sign-up.
    pub name: Option<String>,
    /// The user's hashed password.
    pub password: String,
    /// Whether the user is active.
    pub is_active: bool,
    /// The timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Derives a display name from optional profile metadata and an email
/// address: the stored name when present and non-blank, the local part of
/// the email otherwise, "Beekeeper" as a last resort.
pub fn derive_display_name(name: Option<&str>, email: &str) -> String {
    if let Some(name) = name {
        if !name.trim().is_empty() {
            return name.to_string();
        }
    }

    match email.split('@').next() {
        Some(local) if !local.is_empty() => local.to_string(),
        _ => "Beekeeper".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_profile_metadata() {
        assert_eq!(
            derive_display_name(Some("Maya"), "maya@apiary.example"),
            "Maya"
        );
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        assert_eq!(derive_display_name(None, "maya@apiary.example"), "maya");
        assert_eq!(derive_display_name(Some("   "), "maya@apiary.example"), "maya");
    }

    #[test]
    fn display_name_defaults_to_beekeeper() {
        assert_eq!(derive_display_name(None, ""), "Beekeeper");
        assert_eq!(derive_display_name(None, "@apiary.example"), "Beekeeper");
    }
}
