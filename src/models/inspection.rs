use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Represents a hive inspection record.
///
/// The store percentages are 0-100 estimates; `issues` is a free-form list
/// of observed problems.
#[derive(FromRow, Clone, Debug, Serialize)]
pub struct Inspection {
    /// The unique identifier for the inspection.
    pub id: Uuid,
    /// The ID of the user who owns the inspection.
    pub user_id: Uuid,
    /// The inspected hive.
    pub hive_id: Uuid,
    /// When the inspection took place.
    pub inspection_date: DateTime<Utc>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Brood pattern quality, 0-100.
    pub brood_pattern: Option<i32>,
    /// Honey stores, 0-100.
    pub honey_stores: Option<i32>,
    /// Pollen stores, 0-100.
    pub pollen_stores: Option<i32>,
    /// Whether the queen was sighted.
    pub queen_seen: Option<bool>,
    /// Observed issues.
    pub issues: Vec<String>,
    /// The timestamp when the record was created.
    pub created_at: DateTime<Utc>,
}
