//! Cover Letter Composer — two-step generation: select relevant bullets first,
//! then compose the letter anchored to them. Anchoring the final prompt to
//! pre-selected evidence keeps which accomplishments surface deterministic
//! instead of leaving it to the model's reading of the whole resume.
//!
//! Post-processing guarantees the returned letter always carries a header (or
//! salutation) and a closing, regardless of what the model produced.

use tracing::info;

use crate::errors::AppError;
use crate::generation::bullets::select_bullets;
use crate::generation::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM, CUSTOMIZE_PROMPT_TEMPLATE, CUSTOMIZE_SYSTEM,
};
use crate::llm_client::LlmClient;

/// At most this many selected bullets feed the composition prompt.
const MAX_BULLETS: usize = 5;

/// Closing phrases recognized (case-insensitively) in a generated letter.
const CLOSING_PHRASES: [&str; 3] = ["sincerely", "best regards", "thank you"];

/// Header block prepended when the model omits one.
const PLACEHOLDER_HEADER: &str = "[Your Name]\n[Your Address]\n[Your Email]\n[Your Phone Number]\n[Date]\n\n[Hiring Manager's Name]\n[Company Name]\n[Company Address]\n\n";

/// Closing block appended when the model omits one.
const FALLBACK_CLOSING: &str = "\n\nSincerely,\n[Your Name]";

/// Composes a tailored cover letter. `company_brief` may be empty; an empty
/// bullet selection is tolerated (the prompt simply carries no achievements).
pub async fn compose_cover_letter(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
    company_name: &str,
    company_brief: &str,
) -> Result<String, AppError> {
    let bullets = select_bullets(llm, resume_text, job_description).await?;
    info!("selected {} relevant bullets for composition", bullets.len());

    let bullets_text = bullets
        .iter()
        .take(MAX_BULLETS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");

    let company_context = if company_brief.is_empty() {
        String::new()
    } else {
        format!("\n\nCOMPANY RESEARCH:\n{company_brief}")
    };

    let prompt = COVER_LETTER_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{company_name}", company_name)
        .replace("{company_context}", &company_context)
        .replace("{bullets}", &bullets_text)
        .replace("{resume_text}", resume_text);

    let raw = llm
        .call(COVER_LETTER_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Generation(format!("cover letter composition failed: {e}")))?;

    Ok(format_cover_letter(&raw))
}

/// Splices 1-2 company-specific sentences into an existing letter.
/// Returns the letter unchanged when no brief is available. The four-paragraph
/// limit lives in the prompt only — it is advisory, not verified here.
pub async fn customize_for_company(
    llm: &LlmClient,
    cover_letter: &str,
    company_brief: &str,
) -> Result<String, AppError> {
    if company_brief.trim().is_empty() {
        return Ok(cover_letter.to_string());
    }

    let prompt = CUSTOMIZE_PROMPT_TEMPLATE
        .replace("{cover_letter}", cover_letter)
        .replace("{company_brief}", company_brief);

    llm.call(CUSTOMIZE_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Generation(format!("cover letter customization failed: {e}")))
}

/// Enforces the letter post-conditions: a recognizable header or salutation at
/// the start, and a closing phrase somewhere in the body.
pub fn format_cover_letter(raw: &str) -> String {
    let mut letter = raw.trim().to_string();

    if !letter.starts_with("[Your Name]") && !letter.starts_with("Dear") {
        letter = format!("{PLACEHOLDER_HEADER}{letter}");
    }

    let lowered = letter.to_lowercase();
    if !CLOSING_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        letter.push_str(FALLBACK_CLOSING);
    }

    letter.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_letter_passes_through_untouched() {
        let raw = "Dear Hiring Manager,\n\nI am excited to apply.\n\nSincerely,\nJane";
        assert_eq!(format_cover_letter(raw), raw);
    }

    #[test]
    fn test_missing_header_gets_the_placeholder_block() {
        let formatted = format_cover_letter("I am excited to apply.\n\nSincerely,\nJane");
        assert!(formatted.starts_with("[Your Name]"));
        assert!(formatted.contains("[Hiring Manager's Name]"));
    }

    #[test]
    fn test_missing_closing_gets_the_fallback_block() {
        let formatted = format_cover_letter("Dear Hiring Manager,\n\nI am excited to apply.");
        assert!(formatted.ends_with("Sincerely,\n[Your Name]"));
    }

    #[test]
    fn test_empty_response_still_satisfies_both_postconditions() {
        let formatted = format_cover_letter("");
        assert!(formatted.starts_with("[Your Name]"));
        let lowered = formatted.to_lowercase();
        assert!(CLOSING_PHRASES.iter().any(|p| lowered.contains(p)));
    }

    #[test]
    fn test_closing_detection_is_case_insensitive() {
        let raw = "Dear Team,\n\nBody.\n\nBEST REGARDS,\nJane";
        let formatted = format_cover_letter(raw);
        assert!(!formatted.contains("[Your Name]"));
    }

    #[test]
    fn test_thank_you_counts_as_a_closing() {
        let raw = "Dear Team,\n\nThank you for your consideration.";
        let formatted = format_cover_letter(raw);
        assert!(!formatted.ends_with("Sincerely,\n[Your Name]"));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let raw = "\n\n  Dear Team,\n\nBody.\n\nSincerely,\nJane\n\n";
        let formatted = format_cover_letter(raw);
        assert!(formatted.starts_with("Dear Team,"));
        assert!(formatted.ends_with("Jane"));
    }
}
