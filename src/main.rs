use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

use http::{Method, header};
use std::net::SocketAddr;
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod state;

mod models {
    pub mod hive;
    pub mod inspection;
    pub mod inventory;
    pub mod session;
    pub mod task;
    pub mod user;
}

mod repositories {
    pub mod hive;
    pub mod inspection;
    pub mod inventory;
    pub mod task;
    pub mod user;
}

mod services {
    pub mod auth;
    pub mod dashboard;
    pub mod insights;
    pub mod sessions;
    pub mod weather;
}

mod handlers {
    pub mod assistant;
    pub mod auth;
    pub mod dashboard;
    pub mod hives;
    pub mod inspections;
    pub mod inventory;
    pub mod tasks;
    pub mod weather;
}

mod middleware_layer {
    pub mod auth;
    pub mod rate_limit;
}

mod validation {
    pub mod auth;
    pub mod entities;
}

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config).await?;
    tracing::info!("✅ AppState initialized");

    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:3000".parse().unwrap(),
            "http://localhost:8080".parse().unwrap(),
            "http://127.0.0.1:3000".parse().unwrap(),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT, header::COOKIE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(86400));

    let register_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::rate_limit::rate_limit_register,
        ))
        .with_state(state.clone());

    let login_routes = Router::new()
        .route("/api/auth/login", post(handlers::auth::login))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::rate_limit::rate_limit_login,
        ))
        .with_state(state.clone());

    // The canned FAQ responder is public, like the hosted function it
    // replaces.
    let public_routes = Router::new()
        .route("/api/assistant/ask", post(handlers::assistant::ask))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/api/hives", get(handlers::hives::list_hives))
        .route("/api/hives", post(handlers::hives::create_hive))
        .route("/api/hives/{hive_id}", put(handlers::hives::update_hive))
        .route("/api/hives/{hive_id}", delete(handlers::hives::delete_hive))
        .route("/api/tasks", get(handlers::tasks::list_tasks))
        .route("/api/tasks", post(handlers::tasks::create_task))
        .route("/api/tasks/{task_id}", put(handlers::tasks::update_task))
        .route("/api/tasks/{task_id}", delete(handlers::tasks::delete_task))
        .route(
            "/api/tasks/{task_id}/complete",
            post(handlers::tasks::complete_task),
        )
        .route("/api/inspections", get(handlers::inspections::list_inspections))
        .route("/api/inspections", post(handlers::inspections::create_inspection))
        .route(
            "/api/inspections/{inspection_id}",
            put(handlers::inspections::update_inspection),
        )
        .route(
            "/api/inspections/{inspection_id}",
            delete(handlers::inspections::delete_inspection),
        )
        .route("/api/inventory", get(handlers::inventory::list_items))
        .route("/api/inventory", post(handlers::inventory::create_item))
        .route("/api/inventory/{item_id}", put(handlers::inventory::update_item))
        .route("/api/inventory/{item_id}", delete(handlers::inventory::delete_item))
        .route("/api/weather", get(handlers::weather::get_weather))
        .route("/api/assistant/chat", post(handlers::assistant::chat))
        .route(
            "/api/assistant/insights",
            post(handlers::assistant::generate_insights),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    let app = Router::new()
        .merge(register_routes)
        .merge(login_routes)
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
        .layer(cors);

    let addr: SocketAddr = state.config.bind_addr.parse()?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
