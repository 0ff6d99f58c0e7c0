use anyhow::{Context, Result};
use std::env;

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The URL of the PostgreSQL database.
    pub database_url: String,
    /// The URL of the Redis server.
    pub redis_url: String,
    /// The address the HTTP server binds to.
    pub bind_addr: String,
    /// The duration of a session in days.
    pub session_duration_days: i64,
    /// The chat-completion endpoint.
    pub completion_url: String,
    /// The model requested from the completion endpoint.
    pub completion_model: String,
    /// The bearer token for the completion endpoint. When unset, the
    /// assistant's AI features report an upstream error instead of failing
    /// at startup.
    pub completion_api_key: Option<String>,
    /// The referer URL sent with completion requests.
    pub app_url: String,
    /// The current-weather endpoint.
    pub weather_url: String,
    /// The API key for the weather endpoint. When unset, the weather proxy
    /// reports an upstream error instead of failing at startup.
    pub weather_api_key: Option<String>,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            session_duration_days: env::var("SESSION_DURATION_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .context("Invalid SESSION_DURATION_DAYS")?,
            completion_url: env::var("COMPLETION_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1/chat/completions".to_string()),
            completion_model: env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| "google/gemma-3-27b-it:free".to_string()),
            completion_api_key: env::var("COMPLETION_API_KEY").ok(),
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            weather_url: env::var("WEATHER_URL").unwrap_or_else(|_| {
                "https://api.openweathermap.org/data/2.5/weather".to_string()
            }),
            weather_api_key: env::var("WEATHER_API_KEY").ok(),
        })
    }
}
