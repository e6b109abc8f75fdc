//! gVote Backend
//!
//! Aggregates election data from the Google Civic Information API, FVAP and
//! WeVote, caches it in SQLite and serves it as JSON to the gVote front end.

mod api;
mod ballot;
mod clients;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clients::{
    CivicApiClient, DeadlinesApiClient, HttpCivicClient, HttpDeadlinesClient, HttpWeVoteClient,
    WeVoteApiClient,
};
use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub civic: Arc<dyn CivicApiClient>,
    pub deadlines: Arc<dyn DeadlinesApiClient>,
    /// Present only when WeVote credentials are configured
    pub wevote: Option<Arc<dyn WeVoteApiClient>>,
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

    tracing::info!("Starting gVote Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.civic_api_key.is_none() {
        tracing::warn!("No Civic API key configured (GVOTE_CIVIC_API_KEY). Civic requests will fail!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Outbound clients share one connection pool
    let http = clients::build_http_client(config.http_timeout)?;

    let civic: Arc<dyn CivicApiClient> = Arc::new(HttpCivicClient::new(
        http.clone(),
        &config.civic_base_url,
        config.civic_api_key.clone().unwrap_or_default(),
    ));
    let deadlines: Arc<dyn DeadlinesApiClient> =
        Arc::new(HttpDeadlinesClient::new(http.clone(), &config.fvap_base_url));
    let wevote = match &config.wevote {
        Some(credentials) => {
            let client: Arc<dyn WeVoteApiClient> = Arc::new(HttpWeVoteClient::new(
                http.clone(),
                &config.wevote_base_url,
                &credentials.token,
                &credentials.voter_device_id,
            ));
            Some(client)
        }
        None => {
            tracing::info!("WeVote credentials not configured; platform descriptions disabled");
            None
        }
    };

    // Create application state
    let state = AppState {
        repo,
        civic,
        deadlines,
        wevote,
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

    Router::new()
        .route(
            "/election",
            get(api::list_elections).put(api::refresh_elections),
        )
        .route("/contests", get(api::get_contests))
        .route("/deadlines", get(api::get_deadlines))
        .route("/polling-stations", get(api::get_polling_stations))
        .route("/info-cards", get(api::get_info_cards))
        .route("/health", get(health_check))
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
