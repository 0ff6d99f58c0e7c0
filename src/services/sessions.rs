use crate::error::{AppError, Result};
use crate::models::session::Session;
use crate::models::user::User;
use crate::state::AppState;
use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

/// The name of the session cookie.
pub const SESSION_COOKIE: &str = "session_id";

fn session_key(session_id: Uuid) -> String {
    format!("session:{}", session_id)
}

/// Creates a session for the user and persists it in Redis with a TTL
/// matching the configured session duration.
///
/// # Returns
///
/// A `Result` containing the new session id and its payload.
pub async fn create_session(state: &AppState, user: &User) -> Result<(Uuid, Session)> {
    let session_id = Uuid::new_v4();

    let session = Session {
        user_id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        created_at: Utc::now(),
        expires_at: Utc::now() + chrono::Duration::days(state.config.session_duration_days),
    };

    let session_json = sonic_rs::to_string(&session)
        .map_err(|e| AppError::Internal(format!("Session serialization failed: {}", e)))?;

    let expiration_seconds: u64 = (state.config.session_duration_days * 86400) as u64;
    let mut redis = state.redis.clone();
    let _: () = redis
        .set_ex(session_key(session_id), &session_json, expiration_seconds)
        .await
        .map_err(|e| {
            tracing::error!("❌ Redis set_ex failed: {}", e);
            AppError::Redis(e)
        })?;

    tracing::info!("✅ Session saved to Redis: session:{}", session_id);

    Ok((session_id, session))
}

/// Resolves a session id to its payload.
///
/// Expiry is enforced twice: Redis drops the key via TTL, and a surviving
/// payload past `expires_at` is deleted here and treated as absent.
pub async fn fetch_session(state: &AppState, session_id: Uuid) -> Result<Option<Session>> {
    let mut redis = state.redis.clone();

    let session_json: Option<String> = redis.get(session_key(session_id)).await?;
    let Some(session_json) = session_json else {
        return Ok(None);
    };

    let session: Session = sonic_rs::from_str(&session_json)
        .map_err(|e| AppError::Internal(format!("Invalid session JSON: {}", e)))?;

    if Utc::now() > session.expires_at {
        tracing::warn!("❌ Session expired for user: {}", session.user_id);
        let _: () = redis.del(session_key(session_id)).await.unwrap_or(());
        return Ok(None);
    }

    Ok(Some(session))
}

/// Destroys a session. Best-effort: Redis failures are logged and
/// swallowed so sign-out always succeeds locally.
pub async fn destroy_session(state: &AppState, session_id: Uuid) {
    let mut redis = state.redis.clone();
    if let Err(e) = redis.del::<_, ()>(session_key(session_id)).await {
        tracing::warn!("Failed to delete session from Redis: {}", e);
    }
}
