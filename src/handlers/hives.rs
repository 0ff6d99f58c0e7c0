use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{hive::HiveStatus, session::Session},
    repositories::hive as hive_repo,
    state::AppState,
    validation::entities::{validate_label, validate_percent},
};

/// The request payload for creating a hive.
#[derive(Deserialize)]
pub struct CreateHiveRequest {
    pub name: String,
    pub location: String,
    pub status: Option<HiveStatus>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub weight: Option<f64>,
    pub activity: Option<f64>,
}

/// The request payload for updating a hive. Name and location keep their
/// stored values when absent; status and telemetry are replaced as given.
#[derive(Deserialize)]
pub struct UpdateHiveRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub status: Option<HiveStatus>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub weight: Option<f64>,
    pub activity: Option<f64>,
}

fn validate_telemetry(humidity: Option<f64>, activity: Option<f64>) -> Result<()> {
    validate_percent("Humidity", humidity)?;
    validate_percent("Activity", activity)?;
    Ok(())
}

/// Lists the user's hives, newest first.
#[axum::debug_handler]
pub async fn list_hives(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Response> {
    let hives = hive_repo::list_hives(&state.db, session.user_id).await?;
    Ok(Json(hives).into_response())
}

/// Creates a new hive for the user.
#[axum::debug_handler]
pub async fn create_hive(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<CreateHiveRequest>,
) -> Result<Response> {
    validate_label("Name", &req.name, 2)?;
    validate_label("Location", &req.location, 2)?;
    validate_telemetry(req.humidity, req.activity)?;

    let hive = hive_repo::create_hive(
        &state.db,
        session.user_id,
        req.name.trim(),
        req.location.trim(),
        req.status,
        req.temperature,
        req.humidity,
        req.weight,
        req.activity,
    )
    .await?;

    tracing::info!("✅ Hive created: {} for user {}", hive.id, session.user_id);

    Ok((StatusCode::CREATED, Json(hive)).into_response())
}

/// Updates one of the user's hives.
#[axum::debug_handler]
pub async fn update_hive(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(hive_id): Path<Uuid>,
    Json(req): Json<UpdateHiveRequest>,
) -> Result<Response> {
    if let Some(name) = req.name.as_deref() {
        validate_label("Name", name, 2)?;
    }
    if let Some(location) = req.location.as_deref() {
        validate_label("Location", location, 2)?;
    }
    validate_telemetry(req.humidity, req.activity)?;

    let hive = hive_repo::update_hive(
        &state.db,
        hive_id,
        session.user_id,
        req.name.as_deref().map(str::trim),
        req.location.as_deref().map(str::trim),
        req.status,
        req.temperature,
        req.humidity,
        req.weight,
        req.activity,
    )
    .await?;

    Ok(Json(hive).into_response())
}

/// Deletes one of the user's hives.
#[axum::debug_handler]
pub async fn delete_hive(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(hive_id): Path<Uuid>,
) -> Result<Response> {
    hive_repo::delete_hive(&state.db, hive_id, session.user_id).await?;
    Ok((StatusCode::OK, r#"{"message":"Hive deleted successfully"}"#).into_response())
}
