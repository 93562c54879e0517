mod config;
mod db;
mod errors;
mod export;
mod flows;
mod history;
mod llm_client;
mod markdown;
mod places;
mod routes;
mod state;
mod validation;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::export::PageGeometry;
use crate::history::HistoryFeed;
use crate::llm_client::LlmClient;
use crate::places::PlacesClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Places search degrades to empty results without a key
    let places = PlacesClient::new(
        config.google_maps_api_key.clone(),
        config.places_api_url.clone(),
    );
    if !places.is_enabled() {
        warn!("GOOGLE_MAPS_API_KEY not set; local opportunities will always be empty");
    }

    let page_geometry = PageGeometry::default();
    anyhow::ensure!(page_geometry.is_usable(), "PDF page geometry leaves no room for content");
    info!(
        "PDF page geometry: {}x{} mm",
        page_geometry.width_mm, page_geometry.height_mm
    );

    // Build app state
    let state = AppState {
        db,
        llm: Arc::new(llm),
        places,
        page_geometry,
        history_feed: HistoryFeed::new(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
