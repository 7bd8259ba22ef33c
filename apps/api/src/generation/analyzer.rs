//! Match Analyzer — scores a resume against a job description via one LLM call.
//!
//! The response is free-form prose returned to the caller unmodified; no
//! structure is imposed beyond what the instruction asks for.

use crate::errors::AppError;
use crate::generation::prompts::{MATCH_ANALYSIS_PROMPT_TEMPLATE, MATCH_ANALYSIS_SYSTEM};
use crate::llm_client::LlmClient;

/// Analyzes how well `resume_text` matches `job_description`.
/// Single attempt — a failed call surfaces to the triggering action.
pub async fn analyze_match(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
) -> Result<String, AppError> {
    let prompt = build_analysis_prompt(resume_text, job_description);
    llm.call(MATCH_ANALYSIS_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Generation(format!("match analysis failed: {e}")))
}

fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    MATCH_ANALYSIS_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_embeds_both_texts_verbatim() {
        let prompt = build_analysis_prompt("10 years of Rust", "Rust engineer wanted");
        assert!(prompt.contains("RESUME:\n10 years of Rust"));
        assert!(prompt.contains("JOB DESCRIPTION:\nRust engineer wanted"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_analysis_system_names_the_expected_structure() {
        assert!(MATCH_ANALYSIS_SYSTEM.contains("Match percentage"));
        assert!(MATCH_ANALYSIS_SYSTEM.contains("Top 5"));
        assert!(MATCH_ANALYSIS_SYSTEM.contains("Top 3"));
    }
}
