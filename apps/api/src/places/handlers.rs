use axum::{extract::State, Json};

use super::{LocalOpportunitiesInput, LocalOpportunitiesOutput};
use crate::flows::FlowRequest;
use crate::state::AppState;

/// POST /api/v1/flows/local-opportunities
///
/// Only a body that fails to deserialize is rejected. Any other problem
/// degrades to an empty list. Results are not saved to history.
pub async fn handle_local_opportunities(
    State(state): State<AppState>,
    Json(request): Json<FlowRequest<LocalOpportunitiesInput>>,
) -> Json<LocalOpportunitiesOutput> {
    Json(state.places.find_local_opportunities(&request.input).await)
}
