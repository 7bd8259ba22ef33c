use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::mail::Mailer;
use crate::research::CompanyResearcher;
use crate::tracking::ApplicationTracker;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every component owns its own long-lived client, constructed once at
/// startup. Mail and tracking are `None` when their capability group was not
/// configured; the researcher is always present and resolves its search
/// availability internally.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub researcher: Arc<CompanyResearcher>,
    pub mailer: Option<Arc<Mailer>>,
    pub tracker: Option<Arc<ApplicationTracker>>,
}
