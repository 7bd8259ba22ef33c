//! Skill Extractor — fixed-vocabulary substring matching over resume text.
//!
//! Matching is raw substring containment, not tokenized: "java" matches inside
//! "javascript", so both may appear. Kept intentionally — callers treat the
//! result as informational keyword hints, not authoritative claims.

/// Canonical skill vocabulary, matched case-insensitively in this order.
pub const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "javascript",
    "react",
    "node.js",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "git",
    "html",
    "css",
    "machine learning",
    "data science",
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
    "api",
    "rest",
    "graphql",
    "agile",
    "scrum",
    "ci/cd",
    "devops",
    "linux",
    "project management",
    "leadership",
    "communication",
    "problem solving",
];

/// Returns the title-cased vocabulary entries found in `text`, preserving
/// vocabulary order. Distinct by construction — each entry is tested once.
pub fn extract_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| haystack.contains(*skill))
        .map(|skill| title_case(skill))
        .collect()
}

/// Uppercases the first letter of every alphabetic run, lowercases the rest:
/// "machine learning" → "Machine Learning", "node.js" → "Node.Js".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(ch);
            prev_alphabetic = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_no_skills() {
        assert!(extract_skills("").is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let skills = extract_skills("Extensive PYTHON and Docker work");
        assert_eq!(skills, vec!["Python", "Docker"]);
    }

    #[test]
    fn test_output_preserves_vocabulary_order() {
        // Text order is reversed relative to the vocabulary.
        let skills = extract_skills("kubernetes then docker then python");
        assert_eq!(skills, vec!["Python", "Docker", "Kubernetes"]);
    }

    #[test]
    fn test_no_duplicates_for_repeated_mentions() {
        let skills = extract_skills("rust python python python");
        assert_eq!(skills, vec!["Python"]);
    }

    #[test]
    fn test_javascript_also_matches_java_substring() {
        // Known substring-matching behavior: "java" is contained in "javascript".
        let skills = extract_skills("5 years of JavaScript");
        assert_eq!(skills, vec!["Java", "Javascript"]);
    }

    #[test]
    fn test_multi_word_skills_title_case_each_word() {
        let skills = extract_skills("strong machine learning background");
        assert_eq!(skills, vec!["Machine Learning"]);
    }

    #[test]
    fn test_title_case_restarts_after_punctuation() {
        assert_eq!(title_case("node.js"), "Node.Js");
        assert_eq!(title_case("ci/cd"), "Ci/Cd");
    }
}
