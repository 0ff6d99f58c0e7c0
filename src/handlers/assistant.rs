use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    models::session::Session,
    repositories::hive as hive_repo,
    services::insights,
    state::AppState,
};

/// The request payload for the canned FAQ responder.
#[derive(Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

/// The request payload for the chat-completion proxy.
#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// The insight collection returned for the dashboard analysis widget.
#[derive(Serialize)]
pub struct InsightsResponse {
    pub insights: Vec<insights::Insight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Answers a beekeeping question from the canned response pools.
///
/// Public endpoint; mirrors the FAQ function contract:
/// `{question}` in, `{response}` or `{error}` out.
#[axum::debug_handler]
pub async fn ask(Json(req): Json<AskRequest>) -> Result<Response> {
    if req.question.trim().is_empty() {
        return Err(AppError::Validation("Question is required".to_string()));
    }

    let category = insights::determine_category(&req.question);
    tracing::debug!("Received question, classified as {}", category);
    let response = insights::canned_answer_in(category);

    let body = sonic_rs::to_string(&sonic_rs::json!({
        "response": response
    }))
    .map_err(|e| AppError::Internal(format!("Response serialization failed: {}", e)))?;

    Ok((StatusCode::OK, body).into_response())
}

/// Forwards a free-text message to the chat-completion upstream.
///
/// Upstream failures surface as 502 with the upstream's message; they
/// never panic or poison state.
#[axum::debug_handler]
pub async fn chat(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<ChatRequest>,
) -> Result<Response> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }

    tracing::debug!("💬 Chat message from user {}", session.user_id);
    let reply = insights::complete(&state, &req.message).await?;

    let body = sonic_rs::to_string(&sonic_rs::json!({
        "reply": reply
    }))
    .map_err(|e| AppError::Internal(format!("Response serialization failed: {}", e)))?;

    Ok((StatusCode::OK, body).into_response())
}

/// Generates AI insights over the user's hive telemetry.
///
/// Completion failures resolve to an empty insight collection plus a
/// user-visible message rather than an error status.
#[axum::debug_handler]
pub async fn generate_insights(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<InsightsResponse>> {
    let hives = hive_repo::list_hives(&state.db, session.user_id).await?;

    if hives.is_empty() {
        return Ok(Json(InsightsResponse {
            insights: Vec::new(),
            message: Some("Add hives to get AI insights about your apiary".to_string()),
        }));
    }

    let prompt = insights::telemetry_prompt(&hives);

    match insights::produce_insights(&state, &prompt).await {
        Ok(insights) => Ok(Json(InsightsResponse {
            insights,
            message: None,
        })),
        Err(e) => {
            tracing::warn!("Failed to fetch AI insights: {}", e);
            Ok(Json(InsightsResponse {
                insights: Vec::new(),
                message: Some(format!("Failed to fetch AI insights: {}", e)),
            }))
        }
    }
}
