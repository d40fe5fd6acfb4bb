//! Quiz Backend
//!
//! A REST backend for team quizzes with SQLite persistence and a per-document access policy.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod policy;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use db::Repository;
use policy::Policy;
use store::DocumentStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting Quiz Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Admin principals configured: {}", config.admin_ids.len());

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (QUIZ_API_PSK). Gateway authentication is disabled!");
    }

    let pool = db::init_database(&config.db_path).await?;
    let store = Arc::new(DocumentStore::new(Repository::new(pool), Policy::new()));

    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    let api_routes = Router::new()
        // User permissions
        .route("/userPermissions", get(api::list_user_permissions))
        .route(
            "/userPermissions/{owner_id}",
            get(api::get_user_permission)
                .put(api::put_user_permission)
                .delete(api::delete_user_permission),
        )
        // Quizzes
        .route("/quizzes", get(api::list_quizzes).post(api::create_quiz))
        .route("/quizzes/{id}", get(api::get_quiz).put(api::update_quiz))
        .route("/quizzes/{id}/join-form", get(api::get_join_form))
        .route(
            "/quizzes/{id}/teams",
            get(api::list_teams).post(api::create_team),
        )
        .route("/quizSecrets/{quiz_id}", get(api::get_quiz_secret))
        // Teams
        .route("/teams/{id}", get(api::get_team))
        .route("/teams/{id}/join", post(api::join_team))
        .route("/playerTeams", get(api::list_player_teams))
        .route("/playerTeams/{id}", get(api::get_player_team))
        // Walls
        .route("/wallInProgress", post(api::create_wall))
        .route("/wallInProgress/{id}", get(api::get_wall))
        .route(
            "/wallInProgress/{id}/selectedTexts",
            put(api::update_wall_selections),
        )
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
