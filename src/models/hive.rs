use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The reported status of a hive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "hive_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HiveStatus {
    Healthy,
    Warning,
    Critical,
}

impl HiveStatus {
    /// Whether this status counts as an active alert on the dashboard.
    pub fn is_alert(self) -> bool {
        matches!(self, HiveStatus::Warning | HiveStatus::Critical)
    }
}

/// Represents a monitored hive.
///
/// Telemetry fields are nullable: a hive without sensors still appears on
/// the dashboard and scores conservatively.
#[derive(FromRow, Clone, Debug, Serialize)]
pub struct Hive {
    /// The unique identifier for the hive.
    pub id: Uuid,
    /// The ID of the user who owns the hive.
    pub user_id: Uuid,
    /// The hive's name.
    pub name: String,
    /// Where the hive is located.
    pub location: String,
    /// The reported status, if set.
    pub status: Option<HiveStatus>,
    /// Internal temperature in °C.
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Hive weight in kg.
    pub weight: Option<f64>,
    /// Bee activity in percent.
    pub activity: Option<f64>,
    /// The timestamp when the hive was registered.
    pub created_at: DateTime<Utc>,
}
