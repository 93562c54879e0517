//! Axum route handlers for preview rendering and document export.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::export::docx::{build_docx, DocxDocument};
use crate::export::pdf::{layout_pdf, PdfPlan};
use crate::export::ExportDocument;
use crate::markdown::render::{render_html, render_nodes, DisplayNode};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub markdown: String,
    #[serde(default)]
    pub document: ExportDocument,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub markdown: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub nodes: Vec<DisplayNode>,
    pub html: String,
}

/// POST /api/v1/render/preview
pub async fn handle_preview(Json(req): Json<PreviewRequest>) -> Json<PreviewResponse> {
    Json(PreviewResponse {
        nodes: render_nodes(&req.markdown),
        html: render_html(&req.markdown),
    })
}

/// POST /api/v1/export/pdf
///
/// Layout is CPU-bound; it runs on the blocking pool so the executor stays free.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Json<PdfPlan>, AppError> {
    let geometry = state.page_geometry.clone();
    let plan = tokio::task::spawn_blocking(move || {
        layout_pdf(&req.markdown, &geometry, req.document)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF layout: {e}")))?;

    tracing::debug!(
        pages = plan.page_count,
        draws = plan.draws().count(),
        "PDF plan built"
    );
    Ok(Json(plan))
}

/// POST /api/v1/export/docx
pub async fn handle_export_docx(Json(req): Json<ExportRequest>) -> Json<DocxDocument> {
    Json(build_docx(&req.markdown, req.document))
}
