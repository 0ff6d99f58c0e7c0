use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_cookies::Cookies;
use uuid::Uuid;

use crate::{error::AppError, services::sessions, state::AppState};

/// Extracts the session token from the request cookies.
///
/// # Arguments
///
/// * `cookies` - The request cookies.
///
/// # Returns
///
/// An `Option` containing the session ID if found.
fn extract_session_token(cookies: &Cookies) -> Option<Uuid> {
    cookies
        .get(sessions::SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// A middleware that requires a valid session to be present.
///
/// Rejects with 401 before any handler work runs, so unauthenticated
/// requests never reach the database.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    tracing::debug!("🔐 Checking authentication...");

    let Some(session_id) = extract_session_token(&cookies) else {
        tracing::debug!("❌ No session_id cookie found");
        return AppError::NotAuthenticated.into_response();
    };

    let session = match sessions::fetch_session(&state, session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            tracing::debug!("❌ No live session for id {}", session_id);
            return AppError::NotAuthenticated.into_response();
        }
        Err(e) => return e.into_response(),
    };

    tracing::debug!("✅ User authenticated: {}", session.user_id);

    request.extensions_mut().insert(session);

    next.run(request).await
}
