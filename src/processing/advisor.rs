//! Suitability verdicts and improvement suggestions for a role

use crate::processing::matcher::match_score;
use crate::registry::RoleSkillRegistry;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUITABILITY_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suitability {
    pub suitable: bool,
    pub score: f64,
    /// Skill tokens of the role missing from the document
    pub missing: Vec<String>,
}

/// Score `document` against the role's space-joined skills and compare with `threshold`.
///
/// Unknown roles behave like roles without skills: score 0.0, nothing
/// missing, suitable only for a threshold of 0.
pub fn is_suitable(
    document: &str,
    role: &str,
    registry: &RoleSkillRegistry,
    threshold: f64,
) -> Suitability {
    let skills_text = registry.skills_or_empty(role).join(" ");
    let result = match_score(document, &skills_text);

    Suitability {
        suitable: result.score >= threshold,
        score: result.score,
        missing: result.missing,
    }
}

/// Role skills not contained in `document`, in registry order.
///
/// Containment is a case-insensitive substring test on the whole skill
/// phrase, so "deep learning" needs both words adjacent.
pub fn improvement_suggestions(
    document: &str,
    role: &str,
    registry: &RoleSkillRegistry,
) -> Vec<String> {
    let haystack = document.to_lowercase();
    registry
        .skills_or_empty(role)
        .iter()
        .filter(|skill| !haystack.contains(&skill.to_lowercase()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> RoleSkillRegistry {
        RoleSkillRegistry::from_pairs(vec![
            ("X", vec!["Python", "SQL"]),
            ("ML", vec!["Deep Learning", "PyTorch", "Statistics"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_worked_example() {
        let doc = "I use Python daily";
        let verdict = is_suitable(doc, "X", &registry(), DEFAULT_SUITABILITY_THRESHOLD);
        assert!(verdict.suitable);
        assert_eq!(verdict.score, 50.0);
        assert_eq!(verdict.missing, vec!["sql"]);

        assert_eq!(improvement_suggestions(doc, "X", &registry()), vec!["SQL"]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let verdict = is_suitable("python", "X", &registry(), 50.0);
        assert!(verdict.suitable);
        let verdict = is_suitable("python", "X", &registry(), 50.01);
        assert!(!verdict.suitable);
    }

    #[test]
    fn test_zero_threshold_is_always_suitable() {
        assert!(is_suitable("", "X", &registry(), 0.0).suitable);
        assert!(is_suitable("", "Nobody", &registry(), 0.0).suitable);
    }

    #[test]
    fn test_unknown_role() {
        let verdict = is_suitable("Python SQL", "Nobody", &registry(), DEFAULT_SUITABILITY_THRESHOLD);
        assert!(!verdict.suitable);
        assert_eq!(verdict.score, 0.0);
        assert!(verdict.missing.is_empty());
        assert!(improvement_suggestions("Python SQL", "Nobody", &registry()).is_empty());
    }

    #[test]
    fn test_multi_word_skills_need_the_whole_phrase() {
        let doc = "Deep dives into learning theory with PyTorch";
        let suggestions = improvement_suggestions(doc, "ML", &registry());
        assert_eq!(suggestions, vec!["Deep Learning", "Statistics"]);

        // the scorer tokenizes the same skills and finds "deep" and "learning" separately
        let verdict = is_suitable(doc, "ML", &registry(), DEFAULT_SUITABILITY_THRESHOLD);
        assert_eq!(verdict.score, 75.0);
        assert_eq!(verdict.missing, vec!["statistics"]);
    }

    #[test]
    fn test_suggestions_are_an_ordered_subsequence() {
        let registry = RoleSkillRegistry::builtin();
        let skills = registry.skills("Data Scientist").unwrap();
        let suggestions = improvement_suggestions("pandas and seaborn, some sql", "Data Scientist", &registry);

        let mut cursor = skills.iter();
        for suggestion in &suggestions {
            assert!(cursor.any(|skill| skill == suggestion), "{} out of order", suggestion);
        }
        assert_eq!(suggestions.len(), skills.len() - 3);
    }

    #[test]
    fn test_no_suggestions_when_everything_is_present() {
        let doc = "python, sql";
        assert!(improvement_suggestions(doc, "X", &registry()).is_empty());
    }
}
