use axum::{Extension, Json, extract::State};

use crate::{
    error::Result,
    models::session::Session,
    services::dashboard::{self, DashboardSummary},
    state::AppState,
};

/// Returns the dashboard aggregate for the current user: hive list with
/// health scores, totals, alert count, and upcoming tasks.
#[axum::debug_handler]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<DashboardSummary>> {
    let summary = dashboard::summary(&state, session.user_id).await?;
    Ok(Json(summary))
}
