use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::Result,
    models::session::Session,
    repositories::task as task_repo,
    state::AppState,
    validation::entities::validate_label,
};

/// The request payload for creating a task.
#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub hive_id: Option<Uuid>,
}

/// The request payload for updating a task. The hive link is replaced as
/// given, absent meaning unlinked.
#[derive(Deserialize)]
pub struct UpdateTaskRequest {
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub hive_id: Option<Uuid>,
    pub completed: Option<bool>,
}

/// Lists the user's tasks, soonest due first.
#[axum::debug_handler]
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Response> {
    let tasks = task_repo::list_tasks(&state.db, session.user_id).await?;
    Ok(Json(tasks).into_response())
}

/// Creates a new task for the user.
#[axum::debug_handler]
pub async fn create_task(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Response> {
    validate_label("Task description", &req.description, 1)?;

    let task = task_repo::create_task(
        &state.db,
        session.user_id,
        req.description.trim(),
        req.due_date,
        req.hive_id,
    )
    .await?;

    tracing::info!("✅ Task created: {} for user {}", task.id, session.user_id);

    Ok((StatusCode::CREATED, Json(task)).into_response())
}

/// Updates one of the user's tasks.
#[axum::debug_handler]
pub async fn update_task(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Response> {
    if let Some(description) = req.description.as_deref() {
        validate_label("Task description", description, 1)?;
    }

    let task = task_repo::update_task(
        &state.db,
        task_id,
        session.user_id,
        req.description.as_deref().map(str::trim),
        req.due_date,
        req.hive_id,
        req.completed,
    )
    .await?;

    Ok(Json(task).into_response())
}

/// Marks one of the user's tasks as complete.
#[axum::debug_handler]
pub async fn complete_task(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(task_id): Path<Uuid>,
) -> Result<Response> {
    let task = task_repo::complete_task(&state.db, task_id, session.user_id).await?;
    Ok(Json(task).into_response())
}

/// Deletes one of the user's tasks.
#[axum::debug_handler]
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(task_id): Path<Uuid>,
) -> Result<Response> {
    task_repo::delete_task(&state.db, task_id, session.user_id).await?;
    Ok((StatusCode::OK, r#"{"message":"Task deleted successfully"}"#).into_response())
}
