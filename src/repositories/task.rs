use crate::{
    error::{AppError, Result},
    models::task::Task,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Lists the user's tasks, soonest due first.
pub async fn list_tasks(db: &PgPool, user_id: Uuid) -> Result<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, user_id, hive_id, description, due_date, completed, created_at
        FROM tasks
        WHERE user_id = $1
        ORDER BY due_date ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(tasks)
}

/// Lists the user's incomplete tasks, soonest due first, up to `limit`.
///
/// The dashboard's "upcoming tasks" panel depends on this ordering and
/// limit.
pub async fn upcoming_tasks(db: &PgPool, user_id: Uuid, limit: i64) -> Result<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, user_id, hive_id, description, due_date, completed, created_at
        FROM tasks
        WHERE user_id = $1 AND completed = false
        ORDER BY due_date ASC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await?;

    Ok(tasks)
}

/// Creates a new task.
pub async fn create_task(
    db: &PgPool,
    user_id: Uuid,
    description: &str,
    due_date: DateTime<Utc>,
    hive_id: Option<Uuid>,
) -> Result<Task> {
    let task = sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (user_id, description, due_date, hive_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, hive_id, description, due_date, completed, created_at
        "#,
    )
    .bind(user_id)
    .bind(description)
    .bind(due_date)
    .bind(hive_id)
    .fetch_one(db)
    .await?;

    Ok(task)
}

/// Updates a task, scoped to its owner. The hive link is overwritten as
/// given, absent meaning NULL.
pub async fn update_task(
    db: &PgPool,
    task_id: Uuid,
    user_id: Uuid,
    description: Option<&str>,
    due_date: Option<DateTime<Utc>>,
    hive_id: Option<Uuid>,
    completed: Option<bool>,
) -> Result<Task> {
    let task = sqlx::query_as::<_, Task>(
        r#"
        UPDATE tasks
        SET description = COALESCE($3, description),
            due_date = COALESCE($4, due_date),
            hive_id = $5,
            completed = COALESCE($6, completed)
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, hive_id, description, due_date, completed, created_at
        "#,
    )
    .bind(task_id)
    .bind(user_id)
    .bind(description)
    .bind(due_date)
    .bind(hive_id)
    .bind(completed)
    .fetch_optional(db)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(task)
}

/// Marks a task as completed, scoped to its owner.
pub async fn complete_task(db: &PgPool, task_id: Uuid, user_id: Uuid) -> Result<Task> {
    let task = sqlx::query_as::<_, Task>(
        r#"
        UPDATE tasks
        SET completed = true
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, hive_id, description, due_date, completed, created_at
        "#,
    )
    .bind(task_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(task)
}

/// Deletes a task, scoped to its owner.
pub async fn delete_task(db: &PgPool, task_id: Uuid, user_id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(user_id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}
