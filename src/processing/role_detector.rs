//! Detect which registry role a job description is written for

use crate::error::{Result, ResumeAnalyzerError};
use crate::registry::RoleSkillRegistry;
use aho_corasick::{AhoCorasick, MatchKind};

/// Finds the first registry role whose name occurs in a job description.
///
/// "First" means registry order, not position in the text: when both
/// "Data Scientist" and "Data Analyst" occur, whichever the registry lists
/// first wins.
pub struct RoleDetector {
    matcher: AhoCorasick,
    roles: Vec<String>,
}

impl RoleDetector {
    pub fn new(registry: &RoleSkillRegistry) -> Result<Self> {
        let roles: Vec<String> = registry.role_names().map(str::to_string).collect();
        let patterns: Vec<String> = roles.iter().map(|r| r.to_lowercase()).collect();

        // Standard semantics so overlapping names are all reported
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| ResumeAnalyzerError::Processing(format!("Failed to build role detector: {}", e)))?;

        Ok(Self { matcher, roles })
    }

    pub fn detect(&self, job_description: &str) -> Option<&str> {
        let text = job_description.to_lowercase();
        self.matcher
            .find_overlapping_iter(&text)
            .map(|mat| mat.pattern().as_usize())
            .min()
            .map(|idx| self.roles[idx].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_role_case_insensitively() {
        let detector = RoleDetector::new(&RoleSkillRegistry::builtin()).unwrap();
        let jd = "We are hiring a DEVOPS ENGINEER to own our pipelines.";
        assert_eq!(detector.detect(jd), Some("DevOps Engineer"));
    }

    #[test]
    fn test_registry_order_beats_text_position() {
        let registry = RoleSkillRegistry::from_pairs(vec![
            ("Data Scientist", vec!["Python"]),
            ("Data Analyst", vec!["Excel"]),
        ])
        .unwrap();
        let detector = RoleDetector::new(&registry).unwrap();
        let jd = "Data Analyst wanted; Data Scientist experience is a plus";
        assert_eq!(detector.detect(jd), Some("Data Scientist"));
    }

    #[test]
    fn test_nested_role_names() {
        // "Data Engineer" sits inside "Cloud Data Engineer" and is listed first
        let registry = RoleSkillRegistry::from_pairs(vec![
            ("Data Engineer", vec!["Spark"]),
            ("Cloud Data Engineer", vec!["BigQuery"]),
        ])
        .unwrap();
        let detector = RoleDetector::new(&registry).unwrap();
        assert_eq!(detector.detect("Senior Cloud Data Engineer"), Some("Data Engineer"));
    }

    #[test]
    fn test_no_role_named() {
        let detector = RoleDetector::new(&RoleSkillRegistry::builtin()).unwrap();
        assert_eq!(detector.detect("Looking for a great teammate"), None);
    }

    #[test]
    fn test_empty_registry_detects_nothing() {
        let detector = RoleDetector::new(&RoleSkillRegistry::default()).unwrap();
        assert_eq!(detector.detect("Data Scientist"), None);
    }
}
