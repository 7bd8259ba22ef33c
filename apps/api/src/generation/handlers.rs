//! Axum route handlers for the Generation API: the upload surface (multipart
//! resume + job description) and the cover letter download surface.

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::generation::analyzer::analyze_match;
use crate::generation::composer::{compose_cover_letter, customize_for_company};
use crate::resume::sections::{segment, ResumeSections};
use crate::resume::skills::extract_skills;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub match_analysis: String,
    pub sections: ResumeSections,
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
    pub company_brief: String,
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub cover_letter: String,
    #[serde(default)]
    pub job_title: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomizeRequest {
    pub cover_letter: String,
    #[serde(default)]
    pub company_brief: String,
}

#[derive(Debug, Serialize)]
pub struct CustomizeResponse {
    pub cover_letter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart form
// ────────────────────────────────────────────────────────────────────────────

struct UploadedResume {
    file_name: String,
    data: Vec<u8>,
}

#[derive(Default)]
struct ApplicationForm {
    resume: Option<UploadedResume>,
    job_description: String,
    company_name: String,
    job_title: String,
    research: bool,
}

async fn read_application_form(mut multipart: Multipart) -> Result<ApplicationForm, AppError> {
    let mut form = ApplicationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("invalid resume upload: {e}")))?
                    .to_vec();
                form.resume = Some(UploadedResume { file_name, data });
            }
            "job_description" => form.job_description = read_text(field).await?,
            "company_name" => form.company_name = read_text(field).await?,
            "job_title" => form.job_title = read_text(field).await?,
            "research" => {
                let value = read_text(field).await?;
                form.research = matches!(value.as_str(), "true" | "1" | "yes");
            }
            other => debug!("ignoring unknown form field: {other}"),
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart field: {e}")))
}

fn require_inputs(form: &ApplicationForm) -> Result<&UploadedResume, AppError> {
    let resume = form
        .resume
        .as_ref()
        .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
    if form.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    Ok(resume)
}

/// Download name for a generated letter: job title lowercased, spaces to
/// underscores.
pub fn download_file_name(job_title: &str) -> String {
    let slug = job_title.trim().to_lowercase().replace(' ', "_");
    if slug.is_empty() {
        "cover_letter.txt".to_string()
    } else {
        format!("cover_letter_{slug}.txt")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Extracts the resume, segments it, collects skills, and runs the match
/// analysis. Sections and skills are informational side outputs.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = read_application_form(multipart).await?;
    let resume = require_inputs(&form)?;

    let resume_text = extract_text(&resume.file_name, &resume.data)?;
    info!(
        "extracted {} chars from {}",
        resume_text.len(),
        resume.file_name
    );

    let sections = segment(&resume_text);
    let skills = extract_skills(&resume_text);
    let match_analysis = analyze_match(&state.llm, &resume_text, &form.job_description).await?;

    Ok(Json(AnalyzeResponse {
        match_analysis,
        sections,
        skills,
    }))
}

/// POST /api/v1/cover-letter
///
/// Full pipeline: extract → optional company research → bullet selection →
/// composition. Research is an optional side input and never blocks the flow.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let form = read_application_form(multipart).await?;
    let resume = require_inputs(&form)?;

    let resume_text = extract_text(&resume.file_name, &resume.data)?;

    let company_brief = if form.research && !form.company_name.trim().is_empty() {
        state.researcher.research(&form.company_name).await
    } else {
        String::new()
    };

    let company_name = if form.company_name.trim().is_empty() {
        "the company".to_string()
    } else {
        form.company_name.clone()
    };

    let cover_letter = compose_cover_letter(
        &state.llm,
        &resume_text,
        &form.job_description,
        &company_name,
        &company_brief,
    )
    .await?;

    Ok(Json(CoverLetterResponse {
        cover_letter,
        company_brief,
        file_name: download_file_name(&form.job_title),
    }))
}

/// POST /api/v1/cover-letter/download
///
/// Emits the letter as a plain-text file named by job title.
pub async fn handle_download(Json(request): Json<DownloadRequest>) -> impl IntoResponse {
    let file_name = download_file_name(&request.job_title);
    (
        [
            (
                header::CONTENT_TYPE,
                "text/plain; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        request.cover_letter,
    )
}

/// POST /api/v1/cover-letter/customize
///
/// One more generation pass splicing company specifics into an existing letter.
pub async fn handle_customize(
    State(state): State<AppState>,
    Json(request): Json<CustomizeRequest>,
) -> Result<Json<CustomizeResponse>, AppError> {
    if request.cover_letter.trim().is_empty() {
        return Err(AppError::Validation(
            "cover_letter cannot be empty".to_string(),
        ));
    }

    let cover_letter =
        customize_for_company(&state.llm, &request.cover_letter, &request.company_brief).await?;

    Ok(Json(CustomizeResponse { cover_letter }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_name_lowercases_and_underscores() {
        assert_eq!(
            download_file_name("Software Engineer"),
            "cover_letter_software_engineer.txt"
        );
    }

    #[test]
    fn test_download_name_for_empty_title() {
        assert_eq!(download_file_name(""), "cover_letter.txt");
        assert_eq!(download_file_name("   "), "cover_letter.txt");
    }

    #[test]
    fn test_download_name_single_word() {
        assert_eq!(download_file_name("Analyst"), "cover_letter_analyst.txt");
    }
}
