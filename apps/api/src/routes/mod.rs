pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::mail::handlers as mail;
use crate::research::handlers as research;
use crate::state::AppState;
use crate::tracking::handlers as tracking;

/// Resume uploads and attachments may exceed Axum's 2 MB default.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis and generation
        .route("/api/v1/analyze", post(generation::handle_analyze))
        .route("/api/v1/cover-letter", post(generation::handle_cover_letter))
        .route(
            "/api/v1/cover-letter/download",
            post(generation::handle_download),
        )
        .route(
            "/api/v1/cover-letter/customize",
            post(generation::handle_customize),
        )
        // Company research
        .route("/api/v1/research/:company", get(research::handle_research))
        // Mail
        .route("/api/v1/mail/send", post(mail::handle_send))
        .route("/api/v1/mail/test", get(mail::handle_test))
        // Application tracking
        .route(
            "/api/v1/applications",
            post(tracking::handle_add).get(tracking::handle_list),
        )
        .route(
            "/api/v1/applications/followups",
            get(tracking::handle_followups),
        )
        .route(
            "/api/v1/applications/summary",
            get(tracking::handle_summary),
        )
        .route("/api/v1/applications/test", get(tracking::handle_test))
        .route(
            "/api/v1/applications/:id/status",
            patch(tracking::handle_update_status),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
