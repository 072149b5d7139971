//! Careers Page Builder Backend
//!
//! A multi-tenant REST backend with SQLite persistence, cookie sessions and
//! in-memory draft staging for the careers page editor.

mod api;
mod auth;
mod careers;
mod config;
mod db;
mod drafts;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::SessionKeys;
use config::Config;
use db::Repository;
use drafts::DraftStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
    pub sessions: Arc<SessionKeys>,
    pub drafts: Arc<DraftStore>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Careers Page Builder Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    let sessions = match &config.auth_secret {
        Some(secret) => SessionKeys::new(secret.as_bytes()),
        None => {
            tracing::warn!(
                "No session secret configured (CAREERS_AUTH_SECRET). Using a random one; sessions end on restart!"
            );
            SessionKeys::ephemeral()
        }
    };

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;

    // Create application state
    let state = AppState {
        repo: Arc::new(Repository::new(pool)),
        config: Arc::new(config.clone()),
        sessions: Arc::new(sessions),
        drafts: Arc::new(DraftStore::new()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Auth
        .route("/auth/signup", post(api::signup))
        .route("/auth/login", post(api::login))
        .route("/auth/logout", post(api::logout))
        .route("/auth/me", get(api::me))
        // Jobs
        .route(
            "/companies/{slug}/jobs",
            get(api::list_jobs).post(api::create_job),
        )
        .route(
            "/companies/{slug}/jobs/{job_id}",
            patch(api::update_job).delete(api::delete_job),
        )
        // Sections
        .route(
            "/companies/{slug}/sections",
            get(api::list_sections).post(api::create_section),
        )
        .route(
            "/companies/{slug}/sections/{section_id}",
            patch(api::update_section).delete(api::delete_section),
        )
        // Theme
        .route(
            "/companies/{slug}/theme",
            get(api::get_theme).patch(api::update_theme),
        )
        // Drafts and preview
        .route(
            "/companies/{slug}/draft",
            get(api::get_draft)
                .put(api::put_draft)
                .delete(api::delete_draft),
        )
        .route("/companies/{slug}/preview", get(api::preview_careers))
        // Public careers page
        .route("/careers/{slug}", get(api::public_careers));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
