//! Game Catalog Backend
//!
//! REST backend for browsing and administering a catalog of embedded browser
//! games, persisted as a single JSON document.

mod api;
mod config;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use store::Storage;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Storage>,
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

    tracing::info!("Starting Game Catalog Backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    // One store for the whole process
    let store = Arc::new(Storage::open(config.data_path.clone()).await);
    tracing::info!("Data file: {:?}", store.path());

    let state = AppState { store };

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
        // Games
        .route("/games", get(api::list_games).post(api::create_game))
        .route(
            "/games/{id}",
            get(api::get_game)
                .put(api::update_game)
                .delete(api::delete_game),
        )
        .route("/games/{id}/play", post(api::play_game))
        // Stats
        .route("/stats", get(api::get_stats).put(api::update_stats))
        .route("/stats/daily-reset", post(api::reset_daily_stats))
        .route("/stats/{kind}", post(api::increment_stats))
        .method_not_allowed_fallback(api::method_not_allowed);

    // Health check
    let health_routes = Router::new()
        .route("/health", get(health_check))
        .method_not_allowed_fallback(api::method_not_allowed);

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .fallback(api::route_not_found)
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
