use crate::{
    error::{AppError, Result},
    models::hive::{Hive, HiveStatus},
};
use sqlx::PgPool;
use uuid::Uuid;

/// Lists the user's hives, newest first.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `user_id` - The ID of the owning user.
///
/// # Returns
///
/// A `Result` containing the user's hives ordered by creation time,
/// descending. The dashboard relies on this ordering.
pub async fn list_hives(db: &PgPool, user_id: Uuid) -> Result<Vec<Hive>> {
    let hives = sqlx::query_as::<_, Hive>(
        r#"
        SELECT id, user_id, name, location, status, temperature, humidity, weight, activity, created_at
        FROM hives
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(hives)
}

/// Creates a new hive. Absent telemetry is stored as NULL.
#[allow(clippy::too_many_arguments)]
pub async fn create_hive(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
    location: &str,
    status: Option<HiveStatus>,
    temperature: Option<f64>,
    humidity: Option<f64>,
    weight: Option<f64>,
    activity: Option<f64>,
) -> Result<Hive> {
    let hive = sqlx::query_as::<_, Hive>(
        r#"
        INSERT INTO hives (user_id, name, location, status, temperature, humidity, weight, activity)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, user_id, name, location, status, temperature, humidity, weight, activity, created_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(location)
    .bind(status)
    .bind(temperature)
    .bind(humidity)
    .bind(weight)
    .bind(activity)
    .fetch_one(db)
    .await?;

    Ok(hive)
}

/// Updates a hive, scoped to its owner.
///
/// Required fields keep their current value when absent; status and
/// telemetry are overwritten as given, absent meaning NULL. A request for a
/// hive the user does not own matches zero rows and reads as not found.
#[allow(clippy::too_many_arguments)]
pub async fn update_hive(
    db: &PgPool,
    hive_id: Uuid,
    user_id: Uuid,
    name: Option<&str>,
    location: Option<&str>,
    status: Option<HiveStatus>,
    temperature: Option<f64>,
    humidity: Option<f64>,
    weight: Option<f64>,
    activity: Option<f64>,
) -> Result<Hive> {
    let hive = sqlx::query_as::<_, Hive>(
        r#"
        UPDATE hives
        SET name = COALESCE($3, name),
            location = COALESCE($4, location),
            status = $5,
            temperature = $6,
            humidity = $7,
            weight = $8,
            activity = $9
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, name, location, status, temperature, humidity, weight, activity, created_at
        "#,
    )
    .bind(hive_id)
    .bind(user_id)
    .bind(name)
    .bind(location)
    .bind(status)
    .bind(temperature)
    .bind(humidity)
    .bind(weight)
    .bind(activity)
    .fetch_optional(db)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(hive)
}

/// Deletes a hive, scoped to its owner.
pub async fn delete_hive(db: &PgPool, hive_id: Uuid, user_id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM hives WHERE id = $1 AND user_id = $2")
        .bind(hive_id)
        .bind(user_id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

/// Checks that a hive exists and belongs to the user.
pub async fn hive_exists(db: &PgPool, hive_id: Uuid, user_id: Uuid) -> Result<bool> {
    let found: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM hives WHERE id = $1 AND user_id = $2")
            .bind(hive_id)
            .bind(user_id)
            .fetch_optional(db)
            .await?;

    Ok(found.is_some())
}
