use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::session::Session,
    repositories::inventory as inventory_repo,
    state::AppState,
    validation::entities::validate_label,
};

/// The request payload for creating an inventory item.
#[derive(Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub quantity: i32,
}

/// The request payload for updating an inventory item.
#[derive(Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i32>,
}

fn validate_quantity(quantity: Option<i32>) -> Result<()> {
    if let Some(q) = quantity {
        if q < 0 {
            return Err(AppError::Validation(
                "Quantity cannot be negative".to_string(),
            ));
        }
    }
    Ok(())
}

/// Lists the user's inventory, newest first.
#[axum::debug_handler]
pub async fn list_items(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Response> {
    let items = inventory_repo::list_items(&state.db, session.user_id).await?;
    Ok(Json(items).into_response())
}

/// Creates a new inventory item.
#[axum::debug_handler]
pub async fn create_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<CreateItemRequest>,
) -> Result<Response> {
    validate_label("Name", &req.name, 1)?;
    validate_label("Category", &req.category, 1)?;
    validate_quantity(Some(req.quantity))?;

    let item = inventory_repo::create_item(
        &state.db,
        session.user_id,
        req.name.trim(),
        req.category.trim(),
        req.quantity,
    )
    .await?;

    tracing::info!("✅ Inventory item created: {} for user {}", item.id, session.user_id);

    Ok((StatusCode::CREATED, Json(item)).into_response())
}

/// Updates one of the user's inventory items.
#[axum::debug_handler]
pub async fn update_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<Uuid>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Response> {
    if let Some(name) = req.name.as_deref() {
        validate_label("Name", name, 1)?;
    }
    if let Some(category) = req.category.as_deref() {
        validate_label("Category", category, 1)?;
    }
    validate_quantity(req.quantity)?;

    let item = inventory_repo::update_item(
        &state.db,
        item_id,
        session.user_id,
        req.name.as_deref().map(str::trim),
        req.category.as_deref().map(str::trim),
        req.quantity,
    )
    .await?;

    Ok(Json(item).into_response())
}

/// Deletes one of the user's inventory items.
#[axum::debug_handler]
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<Uuid>,
) -> Result<Response> {
    inventory_repo::delete_item(&state.db, item_id, session.user_id).await?;
    Ok((StatusCode::OK, r#"{"message":"Item deleted successfully"}"#).into_response())
}
