//! Axum route handlers for the Research API.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub company: String,
    pub brief: String,
}

/// GET /api/v1/research/:company
///
/// Always succeeds: research degrades internally to a disclaimer string.
pub async fn handle_research(
    State(state): State<AppState>,
    Path(company): Path<String>,
) -> Json<ResearchResponse> {
    let brief = state.researcher.research(&company).await;
    Json(ResearchResponse { company, brief })
}
