use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    services::weather::{self, WeatherReport},
    state::AppState,
};

/// The coordinates for a weather lookup.
#[derive(Deserialize)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Returns the current weather for the given coordinates via the upstream
/// weather service.
#[axum::debug_handler]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherReport>> {
    if !(-90.0..=90.0).contains(&query.lat) || !(-180.0..=180.0).contains(&query.lon) {
        return Err(AppError::Validation(
            "Coordinates are out of range".to_string(),
        ));
    }

    let report = weather::current(&state, query.lat, query.lon).await?;
    Ok(Json(report))
}
