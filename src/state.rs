use crate::config::Config;
use crate::error::Result;
use redis::aio::ConnectionManager;
use sqlx::PgPool;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: PgPool,
    /// The Redis connection manager (sessions + rate limiting).
    pub redis: ConnectionManager,
    /// The outbound HTTP client for the chat-completion upstream.
    pub http: reqwest::Client,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = crate::db::create_pool(&config.database_url).await?;
        tracing::info!("✅ PostgreSQL pool initialized");

        crate::db::run_migrations(&db).await?;
        tracing::info!("✅ Database migrations applied");

        let redis_client = redis::Client::open(config.redis_url.as_str())?;
        let redis = ConnectionManager::new(redis_client).await?;
        tracing::info!("✅ Redis Connection Manager initialized (pooled)");

        let http = reqwest::Client::new();

        Ok(AppState {
            db,
            redis,
            http,
            config: config.clone(),
        })
    }
}
