use std::sync::Arc;

use sqlx::PgPool;

use crate::export::PageGeometry;
use crate::history::HistoryFeed;
use crate::llm_client::CompletionBackend;
use crate::places::PlacesClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Model backend for every prompt flow. Default: `LlmClient`.
    pub llm: Arc<dyn CompletionBackend>,
    pub places: PlacesClient,
    /// Page geometry for PDF export: A4 in millimetres.
    pub page_geometry: PageGeometry,
    pub history_feed: HistoryFeed,
}
