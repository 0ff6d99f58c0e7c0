use crate::{
    error::{AppError, Result},
    models::user::User,
};
use sqlx::PgPool;

/// Creates a new user row.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `email` - The user's email address.
/// * `name` - The user's display name, if provided.
/// * `password_hash` - The argon2id hash of the user's password.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub async fn create_user(
    db: &PgPool,
    email: &str,
    name: Option<&str>,
    password_hash: &str,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, name, password)
        VALUES ($1, $2, $3)
        RETURNING id, email, name, password, is_active, created_at, updated_at
        "#,
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .fetch_one(db)
    .await
    .map_err(|e| match e.as_database_error() {
        Some(dbe) if dbe.is_unique_violation() => {
            AppError::Validation("An account with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    Ok(user)
}

/// Finds an active user by email.
pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, name, password, is_active, created_at, updated_at
        FROM users
        WHERE email = $1 AND is_active = true
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(user)
}

