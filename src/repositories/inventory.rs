use crate::{
    error::{AppError, Result},
    models::inventory::InventoryItem,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Lists the user's inventory, newest first.
pub async fn list_items(db: &PgPool, user_id: Uuid) -> Result<Vec<InventoryItem>> {
    let items = sqlx::query_as::<_, InventoryItem>(
        r#"
        SELECT id, user_id, name, category, quantity, created_at
        FROM inventory
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(items)
}

/// Creates a new inventory item.
pub async fn create_item(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
    category: &str,
    quantity: i32,
) -> Result<InventoryItem> {
    let item = sqlx::query_as::<_, InventoryItem>(
        r#"
        INSERT INTO inventory (user_id, name, category, quantity)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, name, category, quantity, created_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(category)
    .bind(quantity)
    .fetch_one(db)
    .await?;

    Ok(item)
}

/// Updates an inventory item, scoped to its owner.
pub async fn update_item(
    db: &PgPool,
    item_id: Uuid,
    user_id: Uuid,
    name: Option<&str>,
    category: Option<&str>,
    quantity: Option<i32>,
) -> Result<InventoryItem> {
    let item = sqlx::query_as::<_, InventoryItem>(
        r#"
        UPDATE inventory
        SET name = COALESCE($3, name),
            category = COALESCE($4, category),
            quantity = COALESCE($5, quantity)
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, name, category, quantity, created_at
        "#,
    )
    .bind(item_id)
    .bind(user_id)
    .bind(name)
    .bind(category)
    .bind(quantity)
    .fetch_optional(db)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(item)
}

/// Deletes an inventory item, scoped to its owner.
pub async fn delete_item(db: &PgPool, item_id: Uuid, user_id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM inventory WHERE id = $1 AND user_id = $2")
        .bind(item_id)
        .bind(user_id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}
