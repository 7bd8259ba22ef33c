//! Axum route handlers for the Mail API.
//!
//! Mail failures are reported as `{sent: false}` / `{ok: false}`, not as HTTP
//! errors — only a malformed request is an error.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;
use crate::mail::{ApplicationEmail, MailAttachment};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub sent: bool,
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub ok: bool,
}

/// POST /api/v1/mail/send
///
/// Multipart form: recipient, subject, cover_letter, applicant_name, position,
/// company_name, plus any number of `attachment` file fields.
pub async fn handle_send(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SendResponse>, AppError> {
    let mut email = ApplicationEmail {
        recipient: String::new(),
        subject: String::new(),
        cover_letter: String::new(),
        applicant_name: String::new(),
        position: String::new(),
        company_name: String::new(),
        attachments: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "recipient" => email.recipient = read_text(field).await?,
            "subject" => email.subject = read_text(field).await?,
            "cover_letter" => email.cover_letter = read_text(field).await?,
            "applicant_name" => email.applicant_name = read_text(field).await?,
            "position" => email.position = read_text(field).await?,
            "company_name" => email.company_name = read_text(field).await?,
            "attachment" => {
                let file_name = field.file_name().unwrap_or("attachment").to_string();
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("invalid attachment: {e}")))?
                    .to_vec();
                email.attachments.push(MailAttachment { file_name, content });
            }
            other => {
                warn!("ignoring unknown mail field: {other}");
            }
        }
    }

    if email.recipient.trim().is_empty() {
        return Err(AppError::Validation("recipient cannot be empty".to_string()));
    }

    let sent = match &state.mailer {
        Some(mailer) => mailer.send_application(email).await,
        None => {
            warn!("mail transport not configured; refusing to send");
            false
        }
    };

    Ok(Json(SendResponse { sent }))
}

/// GET /api/v1/mail/test
///
/// Credential self-test, independent of sending.
pub async fn handle_test(State(state): State<AppState>) -> Json<TestResponse> {
    let ok = match &state.mailer {
        Some(mailer) => mailer.test_connection().await,
        None => false,
    };
    Json(TestResponse { ok })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart field: {e}")))
}
