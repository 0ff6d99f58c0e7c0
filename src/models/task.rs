use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Represents a beekeeping task.
#[derive(FromRow, Clone, Debug, Serialize)]
pub struct Task {
    /// The unique identifier for the task.
    pub id: Uuid,
    /// The ID of the user who owns the task.
    pub user_id: Uuid,
    /// The hive this task relates to, if any.
    pub hive_id: Option<Uuid>,
    /// What needs doing.
    pub description: String,
    /// When the task is due.
    pub due_date: DateTime<Utc>,
    /// Whether the task has been completed.
    pub completed: bool,
    /// The timestamp when the task was created.
    pub created_at: DateTime<Utc>,
}
