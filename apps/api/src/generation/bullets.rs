//! Bullet Selector — asks the LLM for the resume bullets most relevant to a
//! job description, then keeps only properly bullet-marked response lines.

use crate::errors::AppError;
use crate::generation::prompts::{BULLET_SELECTION_PROMPT_TEMPLATE, BULLET_SELECTION_SYSTEM};
use crate::llm_client::LlmClient;

/// Characters accepted as a leading bullet marker.
const BULLET_MARKERS: [char; 3] = ['\u{2022}', '-', '*'];

/// Selects the most relevant resume bullets for `job_description`.
/// A response with no bullet-marked lines yields an empty list, not an error —
/// the composer tolerates it.
pub async fn select_bullets(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
) -> Result<Vec<String>, AppError> {
    let prompt = BULLET_SELECTION_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description);

    let response = llm
        .call(BULLET_SELECTION_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Generation(format!("bullet selection failed: {e}")))?;

    Ok(parse_bullets(&response))
}

/// Keeps the trimmed lines whose first character is a bullet marker, in order
/// of appearance. No de-duplication.
pub fn parse_bullets(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(BULLET_MARKERS))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_bullet_marked_lines_in_order() {
        let response = "\u{2022} Led X\nrandom prose\n- Built Y";
        assert_eq!(parse_bullets(response), vec!["\u{2022} Led X", "- Built Y"]);
    }

    #[test]
    fn test_asterisk_marker_is_accepted() {
        assert_eq!(parse_bullets("* Shipped Z"), vec!["* Shipped Z"]);
    }

    #[test]
    fn test_leading_whitespace_is_trimmed_before_the_marker_check() {
        assert_eq!(parse_bullets("   - Indented bullet  "), vec!["- Indented bullet"]);
    }

    #[test]
    fn test_response_with_no_bullets_yields_empty_list() {
        assert!(parse_bullets("I could not find any relevant experience.").is_empty());
        assert!(parse_bullets("").is_empty());
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let response = "- Led X\n- Led X";
        assert_eq!(parse_bullets(response), vec!["- Led X", "- Led X"]);
    }

    #[test]
    fn test_marker_must_be_the_first_character() {
        assert!(parse_bullets("Led X - and more").is_empty());
    }
}
