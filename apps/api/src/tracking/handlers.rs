//! Axum route handlers for the Tracking API.
//!
//! Store failures are reported as `{saved/updated: false}` or empty listings,
//! not as HTTP errors. An unconfigured tracker behaves like a failing one.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tracking::{
    compute_summary, ApplicationRecord, ApplicationStatus, NewApplication, TrackerSummary,
};

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub updated: bool,
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub notes: String,
}

/// POST /api/v1/applications
pub async fn handle_add(
    State(state): State<AppState>,
    Json(new): Json<NewApplication>,
) -> Result<Json<SaveResponse>, AppError> {
    if new.company.trim().is_empty() || new.position.trim().is_empty() {
        return Err(AppError::Validation(
            "company and position are required".to_string(),
        ));
    }

    let saved = match &state.tracker {
        Some(tracker) => tracker.add_application(new).await,
        None => {
            warn!("tracking store not configured; application not saved");
            false
        }
    };

    Ok(Json(SaveResponse { saved }))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Json<UpdateResponse> {
    let updated = match &state.tracker {
        Some(tracker) => {
            tracker
                .update_status(&record_id, request.status, &request.notes)
                .await
        }
        None => false,
    };
    Json(UpdateResponse { updated })
}

/// GET /api/v1/applications[?status=...]
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<ApplicationRecord>> {
    let records = match (&state.tracker, params.status) {
        (Some(tracker), Some(status)) => tracker.list_by_status(status).await,
        (Some(tracker), None) => tracker.list_all().await,
        (None, _) => Vec::new(),
    };
    Json(records)
}

/// GET /api/v1/applications/followups
pub async fn handle_followups(State(state): State<AppState>) -> Json<Vec<ApplicationRecord>> {
    let records = match &state.tracker {
        Some(tracker) => tracker.list_needing_followup().await,
        None => Vec::new(),
    };
    Json(records)
}

/// GET /api/v1/applications/summary
pub async fn handle_summary(State(state): State<AppState>) -> Json<TrackerSummary> {
    let summary = match &state.tracker {
        Some(tracker) => tracker.summary().await,
        None => compute_summary(&[], chrono::Utc::now().date_naive()),
    };
    Json(summary)
}

/// GET /api/v1/applications/test
///
/// Store connectivity self-test, independent of any write.
pub async fn handle_test(State(state): State<AppState>) -> Json<TestResponse> {
    let ok = match &state.tracker {
        Some(tracker) => tracker.test_connection().await,
        None => false,
    };
    Json(TestResponse { ok })
}
