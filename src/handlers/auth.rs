use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_cookies::cookie::time::Duration;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use crate::{
    models::session::Session,
    services::{auth as auth_service, sessions},
    state::AppState,
    validation::auth::*,
};

/// The request payload for user registration.
#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

/// The request payload for user login.
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The profile payload returned for authenticated users.
#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<&Session> for ProfileResponse {
    fn from(session: &Session) -> Self {
        ProfileResponse {
            id: session.user_id,
            email: session.email.clone(),
            name: session.display_name(),
        }
    }
}

/// Creates a secure cookie with the given name, value, and max age.
fn create_secure_cookie(name: String, value: String, max_age_days: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);

    let is_production =
        std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()) == "production";

    cookie.set_http_only(true);

    if is_production {
        cookie.set_secure(true);
    }

    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::seconds(max_age_days * 86400));
    cookie.set_path("/");

    cookie
}

/// Handles user registration. Opens a session immediately on success.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<RegisterRequest>,
) -> crate::error::Result<Response> {
    tracing::info!("📝 Register attempt for: {}", payload.email);
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;

    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from);

    let user =
        auth_service::create_user(&state.db, payload.email, name, payload.password).await?;

    tracing::info!("✅ User registered: {}", user.id);

    let (session_id, session) = sessions::create_session(&state, &user).await?;

    let session_cookie = create_secure_cookie(
        sessions::SESSION_COOKIE.to_string(),
        session_id.to_string(),
        state.config.session_duration_days,
    );
    cookies.add(session_cookie);
    tracing::info!("✅ Session cookie added for user: {}", user.id);

    Ok((StatusCode::CREATED, Json(ProfileResponse::from(&session))).into_response())
}

/// Handles user login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> crate::error::Result<Response> {
    tracing::info!("🔐 Login attempt for: {}", payload.email);
    validate_email(&payload.email)?;

    let user =
        auth_service::authenticate_user(&state.db, payload.email, payload.password).await?;

    let (session_id, session) = sessions::create_session(&state, &user).await?;

    let session_cookie = create_secure_cookie(
        sessions::SESSION_COOKIE.to_string(),
        session_id.to_string(),
        state.config.session_duration_days,
    );
    cookies.add(session_cookie);

    tracing::info!("✅ User logged in: {}", user.id);

    Ok((StatusCode::OK, Json(ProfileResponse::from(&session))).into_response())
}

/// Handles user logout.
///
/// The Redis delete is best-effort; the cookie is cleared and the request
/// succeeds regardless, so local state never outlives a sign-out.
#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    cookies: Cookies,
) -> Response {
    tracing::info!("👋 Logout for user: {}", session.user_id);

    if let Some(cookie) = cookies.get(sessions::SESSION_COOKIE) {
        if let Ok(session_id) = Uuid::parse_str(cookie.value()) {
            sessions::destroy_session(&state, session_id).await;
        }
    }

    let mut session_cookie = Cookie::new(sessions::SESSION_COOKIE, "");
    session_cookie.set_max_age(Duration::seconds(0));
    session_cookie.set_path("/");
    cookies.remove(session_cookie);

    tracing::info!("✅ User logged out: {}", session.user_id);

    let body = sonic_rs::to_string(&sonic_rs::json!({
        "success": true,
        "message": "Logout successful"
    }))
    .unwrap_or_default();

    (StatusCode::OK, body).into_response()
}

/// Returns the profile for the current session.
#[axum::debug_handler]
pub async fn me(Extension(session): Extension<Session>) -> Json<ProfileResponse> {
    Json(ProfileResponse::from(&session))
}
