pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::flows::handlers as flows;
use crate::history::handlers as history;
use crate::places::handlers as places;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Prompt flows
        .route("/api/v1/flows/tailor", post(flows::handle_tailor))
        .route("/api/v1/flows/match-score", post(flows::handle_match_score))
        .route("/api/v1/flows/create-resume", post(flows::handle_create_resume))
        .route(
            "/api/v1/flows/recommend-careers",
            post(flows::handle_recommend_careers),
        )
        .route(
            "/api/v1/flows/development-plan",
            post(flows::handle_development_plan),
        )
        .route("/api/v1/flows/interview", post(flows::handle_interview_turn))
        .route(
            "/api/v1/flows/interview/summary",
            post(flows::handle_interview_summary),
        )
        .route(
            "/api/v1/flows/local-opportunities",
            post(places::handle_local_opportunities),
        )
        // History
        .route("/api/v1/history", get(history::handle_get_history))
        .route("/api/v1/history/stream", get(history::handle_history_stream))
        .route(
            "/api/v1/prompts",
            get(history::handle_list_prompts).post(history::handle_save_prompt),
        )
        // Rendering and export
        .route("/api/v1/render/preview", post(export::handle_preview))
        .route("/api/v1/export/pdf", post(export::handle_export_pdf))
        .route("/api/v1/export/docx", post(export::handle_export_docx))
        .with_state(state)
}
