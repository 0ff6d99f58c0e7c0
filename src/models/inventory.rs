use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Represents an inventory item (equipment, treatments, feed, ...).
#[derive(FromRow, Clone, Debug, Serialize)]
pub struct InventoryItem {
    /// The unique identifier for the item.
    pub id: Uuid,
    /// The ID of the user who owns the item.
    pub user_id: Uuid,
    /// The item's name.
    pub name: String,
    /// The item's category.
    pub category: String,
    /// How many are on hand. Never negative.
    pub quantity: i32,
    /// The timestamp when the item was added.
    pub created_at: DateTime<Utc>,
}
