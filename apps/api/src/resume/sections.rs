//! Section Segmenter — partitions extracted resume text into labeled sections.
//!
//! Pure keyword heuristic: a short line mentioning a section keyword opens that
//! section; following lines accumulate under it. Ambiguous or keyword-free
//! resumes legitimately leave sections empty — that is not an error.

use serde::Serialize;

/// A header line must be shorter than this (after trimming) to count as one.
/// Longer lines mentioning a keyword are treated as body text.
const MAX_HEADER_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
}

/// Fixed match order. When a header line mentions keywords of more than one
/// section, the first section in this order wins.
const SECTION_ORDER: [SectionKind; 6] = [
    SectionKind::Contact,
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Projects,
];

impl SectionKind {
    fn keywords(self) -> &'static [&'static str] {
        match self {
            SectionKind::Contact => &["contact", "phone", "email", "address"],
            SectionKind::Summary => &["summary", "objective", "profile", "about"],
            SectionKind::Experience => &["experience", "employment", "work history", "professional"],
            SectionKind::Education => &["education", "degree", "university", "college", "school"],
            SectionKind::Skills => &["skills", "technical", "competencies", "technologies"],
            SectionKind::Projects => &["projects", "portfolio", "achievements"],
        }
    }
}

/// The six resume sections. Every field is always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResumeSections {
    pub contact: String,
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub projects: String,
}

impl ResumeSections {
    fn set(&mut self, kind: SectionKind, content: String) {
        match kind {
            SectionKind::Contact => self.contact = content,
            SectionKind::Summary => self.summary = content,
            SectionKind::Experience => self.experience = content,
            SectionKind::Education => self.education = content,
            SectionKind::Skills => self.skills = content,
            SectionKind::Projects => self.projects = content,
        }
    }
}

/// Segments resume text into sections in a single line-by-line pass.
///
/// A new header flushes the accumulated buffer into the previously active
/// section (overwriting any earlier content for that section). Blank lines are
/// dropped; lines before the first header are ignored.
pub fn segment(text: &str) -> ResumeSections {
    let mut sections = ResumeSections::default();
    let mut current: Option<SectionKind> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        let lowered = line.trim().to_lowercase();

        if let Some(kind) = match_header(&lowered) {
            if let Some(previous) = current {
                if !buffer.is_empty() {
                    sections.set(previous, buffer.join("\n"));
                }
            }
            current = Some(kind);
            buffer.clear();
        } else if current.is_some() && !line.trim().is_empty() {
            buffer.push(line);
        }
    }

    if let Some(previous) = current {
        if !buffer.is_empty() {
            sections.set(previous, buffer.join("\n"));
        }
    }

    sections
}

fn match_header(lowered: &str) -> Option<SectionKind> {
    if lowered.chars().count() >= MAX_HEADER_CHARS {
        return None;
    }
    SECTION_ORDER
        .into_iter()
        .find(|kind| kind.keywords().iter().any(|kw| lowered.contains(kw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_line_experience_resume() {
        let sections = segment("Experience\nBuilt a thing");
        assert_eq!(sections.experience, "Built a thing");
        assert_eq!(sections.contact, "");
        assert_eq!(sections.summary, "");
        assert_eq!(sections.education, "");
        assert_eq!(sections.skills, "");
        assert_eq!(sections.projects, "");
    }

    #[test]
    fn test_keyword_free_input_leaves_every_section_empty() {
        let sections = segment("just some text\nwith no recognizable headers at all");
        assert_eq!(sections, ResumeSections::default());
    }

    #[test]
    fn test_empty_input_is_total() {
        assert_eq!(segment(""), ResumeSections::default());
    }

    #[test]
    fn test_multiple_sections_accumulate_separately() {
        let text = "Education\nMIT, BSc 2019\nSkills\nRust\nPython";
        let sections = segment(text);
        assert_eq!(sections.education, "MIT, BSc 2019");
        assert_eq!(sections.skills, "Rust\nPython");
    }

    #[test]
    fn test_blank_lines_are_dropped_from_section_bodies() {
        let text = "Experience\nShipped v1\n\n\nShipped v2";
        let sections = segment(text);
        assert_eq!(sections.experience, "Shipped v1\nShipped v2");
    }

    #[test]
    fn test_long_line_mentioning_keyword_is_body_not_header() {
        let text = "Experience\nGained broad professional experience across many production systems and teams";
        let sections = segment(text);
        assert!(sections.experience.starts_with("Gained broad"));
    }

    #[test]
    fn test_ambiguous_header_resolves_to_first_section_in_order() {
        // "professional skills" mentions both an experience keyword
        // ("professional") and a skills keyword ("skills") — experience wins.
        let sections = segment("Professional Skills\nRust");
        assert_eq!(sections.experience, "Rust");
        assert_eq!(sections.skills, "");
    }

    #[test]
    fn test_repeated_header_overwrites_earlier_content() {
        let text = "Experience\nOld job\nExperience\nNew job";
        let sections = segment(text);
        assert_eq!(sections.experience, "New job");
    }

    #[test]
    fn test_lines_before_first_header_are_ignored() {
        let text = "Jane Doe\nSan Francisco\nSummary\nEngineer who ships";
        let sections = segment(text);
        assert_eq!(sections.summary, "Engineer who ships");
        assert_eq!(sections.contact, "");
    }

    #[test]
    fn test_body_lines_keep_original_casing() {
        let sections = segment("Skills\nRuST and PyThOn");
        assert_eq!(sections.skills, "RuST and PyThOn");
    }
}
