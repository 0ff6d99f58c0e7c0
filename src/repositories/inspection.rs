use crate::{
    error::{AppError, Result},
    models::inspection::Inspection,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Lists the user's inspections, most recent first.
pub async fn list_inspections(db: &PgPool, user_id: Uuid) -> Result<Vec<Inspection>> {
    let inspections = sqlx::query_as::<_, Inspection>(
        r#"
        SELECT id, user_id, hive_id, inspection_date, notes, brood_pattern,
               honey_stores, pollen_stores, queen_seen, issues, created_at
        FROM inspections
        WHERE user_id = $1
        ORDER BY inspection_date DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(inspections)
}

/// Creates a new inspection record.
///
/// The referenced hive must belong to the same user; the check runs before
/// the insert so a foreign hive id reads as a validation error, not a
/// constraint failure.
#[allow(clippy::too_many_arguments)]
pub async fn create_inspection(
    db: &PgPool,
    user_id: Uuid,
    hive_id: Uuid,
    inspection_date: DateTime<Utc>,
    notes: Option<&str>,
    brood_pattern: Option<i32>,
    honey_stores: Option<i32>,
    pollen_stores: Option<i32>,
    queen_seen: Option<bool>,
    issues: &[String],
) -> Result<Inspection> {
    if !crate::repositories::hive::hive_exists(db, hive_id, user_id).await? {
        return Err(AppError::Validation("Hive not found".to_string()));
    }

    let inspection = sqlx::query_as::<_, Inspection>(
        r#"
        INSERT INTO inspections
            (user_id, hive_id, inspection_date, notes, brood_pattern,
             honey_stores, pollen_stores, queen_seen, issues)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, user_id, hive_id, inspection_date, notes, brood_pattern,
                  honey_stores, pollen_stores, queen_seen, issues, created_at
        "#,
    )
    .bind(user_id)
    .bind(hive_id)
    .bind(inspection_date)
    .bind(notes)
    .bind(brood_pattern)
    .bind(honey_stores)
    .bind(pollen_stores)
    .bind(queen_seen)
    .bind(issues)
    .fetch_one(db)
    .await?;

    Ok(inspection)
}

/// Updates an inspection, scoped to its owner. Optional observations are
/// overwritten as given, absent meaning NULL; `issues` replaces the stored
/// set when provided.
#[allow(clippy::too_many_arguments)]
pub async fn update_inspection(
    db: &PgPool,
    inspection_id: Uuid,
    user_id: Uuid,
    hive_id: Option<Uuid>,
    inspection_date: Option<DateTime<Utc>>,
    notes: Option<&str>,
    brood_pattern: Option<i32>,
    honey_stores: Option<i32>,
    pollen_stores: Option<i32>,
    queen_seen: Option<bool>,
    issues: Option<&[String]>,
) -> Result<Inspection> {
    if let Some(hive_id) = hive_id {
        if !crate::repositories::hive::hive_exists(db, hive_id, user_id).await? {
            return Err(AppError::Validation("Hive not found".to_string()));
        }
    }

    let inspection = sqlx::query_as::<_, Inspection>(
        r#"
        UPDATE inspections
        SET hive_id = COALESCE($3, hive_id),
            inspection_date = COALESCE($4, inspection_date),
            notes = $5,
            brood_pattern = $6,
            honey_stores = $7,
            pollen_stores = $8,
            queen_seen = $9,
            issues = COALESCE($10, issues)
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, hive_id, inspection_date, notes, brood_pattern,
                  honey_stores, pollen_stores, queen_seen, issues, created_at
        "#,
    )
    .bind(inspection_id)
    .bind(user_id)
    .bind(hive_id)
    .bind(inspection_date)
    .bind(notes)
    .bind(brood_pattern)
    .bind(honey_stores)
    .bind(pollen_stores)
    .bind(queen_seen)
    .bind(issues)
    .fetch_optional(db)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(inspection)
}

/// Deletes an inspection, scoped to its owner.
pub async fn delete_inspection(db: &PgPool, inspection_id: Uuid, user_id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM inspections WHERE id = $1 AND user_id = $2")
        .bind(inspection_id)
        .bind(user_id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}
