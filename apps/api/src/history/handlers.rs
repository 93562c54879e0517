//! Axum route handlers for history and prompt versions.

use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use super::feed::refresh_ticks;
use super::prompt_versions::{
    list_prompt_versions, save_prompt_version, NewPromptVersion, PromptVersionRow,
};
use super::store::recent_history;
use super::HistoryRecord;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub records: Vec<HistoryRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePromptRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub version: NewPromptVersion,
}

#[derive(Debug, Serialize)]
pub struct PromptVersionsResponse {
    pub versions: Vec<PromptVersionRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/history?userId=
pub async fn handle_get_history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let records = recent_history(&state.db, query.user_id).await?;
    Ok(Json(HistoryResponse { records }))
}

/// GET /api/v1/history/stream?userId=
///
/// Emits a `snapshot` event with the capped history on connect and again after
/// every append for this user.
pub async fn handle_history_stream(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let user_id = query.user_id;
    let rx = state.history_feed.subscribe();
    let db = state.db.clone();
    debug!(%user_id, "History stream opened");

    let events = refresh_ticks(rx, user_id).then(move |()| {
        let db = db.clone();
        async move { Ok::<_, Infallible>(snapshot_event(&db, user_id).await) }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

async fn snapshot_event(db: &PgPool, user_id: Uuid) -> Event {
    let records = match recent_history(db, user_id).await {
        Ok(records) => records,
        Err(e) => {
            warn!(%user_id, "History snapshot failed: {e}");
            return Event::default().event("error").data("history unavailable");
        }
    };
    Event::default()
        .event("snapshot")
        .json_data(&records)
        .unwrap_or_else(|e| Event::default().event("error").data(e.to_string()))
}

/// POST /api/v1/prompts
pub async fn handle_save_prompt(
    State(state): State<AppState>,
    Json(request): Json<SavePromptRequest>,
) -> Result<Json<PromptVersionRow>, AppError> {
    let row = save_prompt_version(&state.db, request.user_id, &request.version).await?;
    Ok(Json(row))
}

/// GET /api/v1/prompts?userId=
pub async fn handle_list_prompts(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<PromptVersionsResponse>, AppError> {
    let versions = list_prompt_versions(&state.db, query.user_id).await?;
    Ok(Json(PromptVersionsResponse { versions }))
}
