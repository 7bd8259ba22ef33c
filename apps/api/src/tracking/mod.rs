//! Application tracking — remote Airtable-backed store for job applications.
//!
//! All failures stay inside this boundary: mutations report success as a
//! boolean, list operations degrade to empty results. The summary is computed
//! locally from a full listing.

pub mod handlers;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Duration, NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

const AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";
pub const DEFAULT_TABLE_NAME: &str = "Job Applications";

/// Follow-up defaults to this many days after the application date.
const FOLLOW_UP_DAYS: i64 = 7;
/// An application counts as recent for this many days in the summary.
const RECENT_WINDOW_DAYS: i64 = 7;

/// Store endpoint and credential, resolved from configuration at startup.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub api_key: String,
    pub base_id: String,
    pub table_name: String,
}

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store error (status {status}): {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    #[serde(rename = "Interview Scheduled")]
    InterviewScheduled,
    Rejected,
    Offer,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::InterviewScheduled => "Interview Scheduled",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Offer => "Offer",
        };
        f.write_str(label)
    }
}

/// One application record's fields, keyed by the store's column names.
/// Every field is always present; strings default to empty when the store
/// omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationFields {
    #[serde(rename = "Company", default)]
    pub company: String,
    #[serde(rename = "Position", default)]
    pub position: String,
    #[serde(rename = "Status", default = "default_status")]
    pub status: ApplicationStatus,
    #[serde(rename = "Application Date", default)]
    pub application_date: Option<NaiveDate>,
    #[serde(rename = "Job Description URL", default)]
    pub job_description_url: String,
    #[serde(rename = "Notes", default)]
    pub notes: String,
    #[serde(rename = "Salary Range", default)]
    pub salary_range: String,
    #[serde(rename = "Contact Person", default)]
    pub contact_person: String,
    #[serde(rename = "Follow-up Date", default)]
    pub follow_up_date: Option<NaiveDate>,
}

fn default_status() -> ApplicationStatus {
    ApplicationStatus::Applied
}

/// A stored record: store-assigned identifier plus fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: String,
    pub fields: ApplicationFields,
}

#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<ApplicationRecord>,
    offset: Option<String>,
}

/// Insert payload accepted from the HTTP surface. Optional members are
/// defaulted on insert: status Applied, application date today, follow-up
/// date a week after the application date.
#[derive(Debug, Clone, Deserialize)]
pub struct NewApplication {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    pub application_date: Option<NaiveDate>,
    #[serde(default)]
    pub job_description_url: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
}

impl NewApplication {
    fn into_fields(self, today: NaiveDate) -> ApplicationFields {
        let application_date = self.application_date.unwrap_or(today);
        let follow_up_date = self
            .follow_up_date
            .unwrap_or(application_date + Duration::days(FOLLOW_UP_DAYS));

        ApplicationFields {
            company: self.company,
            position: self.position,
            status: self.status.unwrap_or(ApplicationStatus::Applied),
            application_date: Some(application_date),
            job_description_url: self.job_description_url,
            notes: self.notes,
            salary_range: self.salary_range,
            contact_person: self.contact_person,
            follow_up_date: Some(follow_up_date),
        }
    }
}

/// Aggregate view over all tracked applications.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerSummary {
    pub total_applications: usize,
    pub status_breakdown: BTreeMap<String, usize>,
    pub companies_applied_to: Vec<String>,
    pub recent_applications: usize,
}

pub struct ApplicationTracker {
    http: Client,
    config: TrackerConfig,
}

impl ApplicationTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Records a new application. Returns false on any failure.
    pub async fn add_application(&self, new: NewApplication) -> bool {
        let fields = new.into_fields(Utc::now().date_naive());
        match self.insert(&fields).await {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to record application: {e}");
                false
            }
        }
    }

    /// Updates status (and optionally notes) of an existing record.
    pub async fn update_status(
        &self,
        record_id: &str,
        status: ApplicationStatus,
        notes: &str,
    ) -> bool {
        match self.patch_record(record_id, status, notes).await {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to update application {record_id}: {e}");
                false
            }
        }
    }

    async fn patch_record(
        &self,
        record_id: &str,
        status: ApplicationStatus,
        notes: &str,
    ) -> Result<(), TrackingError> {
        let mut fields = json!({ "Status": status });
        if !notes.is_empty() {
            fields["Notes"] = json!(notes);
        }

        let response = self
            .http
            .patch(format!("{}/{record_id}", self.table_url()))
            .bearer_auth(&self.config.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    /// All records, in store order. Empty on failure.
    pub async fn list_all(&self) -> Vec<ApplicationRecord> {
        self.fetch_filtered(None).await
    }

    /// Records with the given status.
    pub async fn list_by_status(&self, status: ApplicationStatus) -> Vec<ApplicationRecord> {
        self.fetch_filtered(Some(status_formula(status))).await
    }

    /// Records whose follow-up date is today or earlier.
    pub async fn list_needing_followup(&self) -> Vec<ApplicationRecord> {
        let today = Utc::now().date_naive();
        self.fetch_filtered(Some(followup_formula(today))).await
    }

    /// Aggregates a summary over all records.
    pub async fn summary(&self) -> TrackerSummary {
        compute_summary(&self.list_all().await, Utc::now().date_naive())
    }

    /// Store connectivity self-test.
    pub async fn test_connection(&self) -> bool {
        let result = self
            .http
            .get(self.table_url())
            .bearer_auth(&self.config.api_key)
            .query(&[("maxRecords", "1")])
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("tracking store connection test failed: {e}");
                false
            }
        }
    }

    async fn insert(&self, fields: &ApplicationFields) -> Result<(), TrackingError> {
        let response = self
            .http
            .post(self.table_url())
            .bearer_auth(&self.config.api_key)
            .json(&json!({ "records": [{ "fields": fields }] }))
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    async fn fetch_filtered(&self, formula: Option<String>) -> Vec<ApplicationRecord> {
        match self.fetch_pages(formula.as_deref()).await {
            Ok(records) => records,
            Err(e) => {
                warn!("failed to list applications: {e}");
                Vec::new()
            }
        }
    }

    /// Follows the store's pagination offsets until the listing is complete.
    async fn fetch_pages(
        &self,
        formula: Option<&str>,
    ) -> Result<Vec<ApplicationRecord>, TrackingError> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(self.table_url())
                .bearer_auth(&self.config.api_key);
            if let Some(formula) = formula {
                request = request.query(&[("filterByFormula", formula)]);
            }
            if let Some(offset) = &offset {
                request = request.query(&[("offset", offset.as_str())]);
            }

            let response = request.send().await?;
            let body = check_status(response).await?;
            let page: RecordPage = serde_json::from_str(&body).map_err(|e| TrackingError::Api {
                status: 200,
                body: format!("malformed record page: {e}"),
            })?;

            records.extend(page.records);
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(records)
    }

    fn table_url(&self) -> String {
        format!(
            "{AIRTABLE_API_URL}/{}/{}",
            self.config.base_id,
            self.config.table_name.replace(' ', "%20")
        )
    }
}

async fn check_status(response: reqwest::Response) -> Result<String, TrackingError> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if status.is_success() {
        Ok(body)
    } else {
        Err(TrackingError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

fn status_formula(status: ApplicationStatus) -> String {
    format!("{{Status}} = '{status}'")
}

fn followup_formula(today: NaiveDate) -> String {
    format!("{{Follow-up Date}} <= '{}'", today.format("%Y-%m-%d"))
}

/// Computes the aggregate summary: total, status histogram, distinct companies
/// (first-seen order), and applications dated within the recent window.
pub fn compute_summary(records: &[ApplicationRecord], today: NaiveDate) -> TrackerSummary {
    let mut status_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    let mut companies: Vec<String> = Vec::new();
    let mut recent = 0usize;

    for record in records {
        *status_breakdown
            .entry(record.fields.status.to_string())
            .or_insert(0) += 1;

        let company = &record.fields.company;
        if !company.is_empty() && !companies.contains(company) {
            companies.push(company.clone());
        }

        if let Some(date) = record.fields.application_date {
            if (today - date).num_days() <= RECENT_WINDOW_DAYS {
                recent += 1;
            }
        }
    }

    TrackerSummary {
        total_applications: records.len(),
        status_breakdown,
        companies_applied_to: companies,
        recent_applications: recent,
    }
}
