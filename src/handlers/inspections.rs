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
    repositories::inspection as inspection_repo,
    state::AppState,
    validation::entities::validate_rating,
};

/// The request payload for creating an inspection.
#[derive(Deserialize)]
pub struct CreateInspectionRequest {
    pub hive_id: Uuid,
    pub inspection_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub brood_pattern: Option<i32>,
    pub honey_stores: Option<i32>,
    pub pollen_stores: Option<i32>,
    pub queen_seen: Option<bool>,
    #[serde(default)]
    pub issues: Vec<String>,
}

/// The request payload for updating an inspection. Optional observations
/// are replaced as given; `issues` replaces the stored set when provided.
#[derive(Deserialize)]
pub struct UpdateInspectionRequest {
    pub hive_id: Option<Uuid>,
    pub inspection_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub brood_pattern: Option<i32>,
    pub honey_stores: Option<i32>,
    pub pollen_stores: Option<i32>,
    pub queen_seen: Option<bool>,
    pub issues: Option<Vec<String>>,
}

fn validate_stores(
    brood_pattern: Option<i32>,
    honey_stores: Option<i32>,
    pollen_stores: Option<i32>,
) -> Result<()> {
    validate_rating("Brood pattern", brood_pattern)?;
    validate_rating("Honey stores", honey_stores)?;
    validate_rating("Pollen stores", pollen_stores)?;
    Ok(())
}

/// Lists the user's inspections, most recent first.
#[axum::debug_handler]
pub async fn list_inspections(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Response> {
    let inspections = inspection_repo::list_inspections(&state.db, session.user_id).await?;
    Ok(Json(inspections).into_response())
}

/// Creates a new inspection record.
#[axum::debug_handler]
pub async fn create_inspection(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<CreateInspectionRequest>,
) -> Result<Response> {
    validate_stores(req.brood_pattern, req.honey_stores, req.pollen_stores)?;

    let inspection = inspection_repo::create_inspection(
        &state.db,
        session.user_id,
        req.hive_id,
        req.inspection_date,
        req.notes.as_deref(),
        req.brood_pattern,
        req.honey_stores,
        req.pollen_stores,
        req.queen_seen,
        &req.issues,
    )
    .await?;

    tracing::info!(
        "✅ Inspection created: {} for user {}",
        inspection.id,
        session.user_id
    );

    Ok((StatusCode::CREATED, Json(inspection)).into_response())
}

/// Updates one of the user's inspections.
#[axum::debug_handler]
pub async fn update_inspection(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(inspection_id): Path<Uuid>,
    Json(req): Json<UpdateInspectionRequest>,
) -> Result<Response> {
    validate_stores(req.brood_pattern, req.honey_stores, req.pollen_stores)?;

    let inspection = inspection_repo::update_inspection(
        &state.db,
        inspection_id,
        session.user_id,
        req.hive_id,
        req.inspection_date,
        req.notes.as_deref(),
        req.brood_pattern,
        req.honey_stores,
        req.pollen_stores,
        req.queen_seen,
        req.issues.as_deref(),
    )
    .await?;

    Ok(Json(inspection).into_response())
}

/// Deletes one of the user's inspections.
#[axum::debug_handler]
pub async fn delete_inspection(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(inspection_id): Path<Uuid>,
) -> Result<Response> {
    inspection_repo::delete_inspection(&state.db, inspection_id, session.user_id).await?;
    Ok((
        StatusCode::OK,
        r#"{"message":"Inspection deleted successfully"}"#,
    )
        .into_response())
}
