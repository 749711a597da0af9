//! Word-boundary skill detection for display
//!
//! Unlike the scorer and advisor, which accept a skill anywhere inside the
//! text, these helpers only accept whole-word occurrences: "Java" is not
//! present in "JavaScript".

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillPresence {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

fn skill_pattern(skill: &str) -> Option<Regex> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(skill)))
        .case_insensitive(true)
        .build()
        .map_err(|e| log::warn!("Skipping skill '{}': {}", skill, e))
        .ok()
}

/// Partition `skills` into whole-word hits and misses, keeping their order
pub fn split_present_missing(document: &str, skills: &[String]) -> SkillPresence {
    let mut presence = SkillPresence::default();
    for skill in skills {
        let found = skill_pattern(skill)
            .map(|re| re.is_match(document))
            .unwrap_or(false);
        if found {
            presence.present.push(skill.clone());
        } else {
            presence.missing.push(skill.clone());
        }
    }
    presence
}

/// Replace every whole-word occurrence of each skill with `decorate(skill)`.
///
/// Skills are applied one after another, so a later skill can match inside
/// the decoration of an earlier one when the decoration contains it.
pub fn highlight_skills<F>(document: &str, skills: &[String], decorate: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut highlighted = document.to_string();
    for skill in skills {
        if let Some(re) = skill_pattern(skill) {
            let replacement = decorate(skill);
            highlighted = re
                .replace_all(&highlighted, regex::NoExpand(&replacement))
                .into_owned();
        }
    }
    highlighted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_word_boundaries_differ_from_substrings() {
        let presence = split_present_missing("JavaScript and Rust", &skills(&["Java", "rust"]));
        assert_eq!(presence.present, vec!["rust"]);
        assert_eq!(presence.missing, vec!["Java"]);
    }

    #[test]
    fn test_multi_word_and_punctuated_skills() {
        let doc = "Built REST API services on Node.js with CI/CD pipelines";
        let presence = split_present_missing(doc, &skills(&["REST API", "Node.js", "CI/CD", "Docker"]));
        assert_eq!(presence.present, vec!["REST API", "Node.js", "CI/CD"]);
        assert_eq!(presence.missing, vec!["Docker"]);
    }

    #[test]
    fn test_highlight_wraps_every_occurrence() {
        let doc = "python here, Python there, pythonic nowhere";
        let out = highlight_skills(doc, &skills(&["Python"]), |s| format!("**{}**", s));
        assert_eq!(out, "**Python** here, **Python** there, pythonic nowhere");
    }

    #[test]
    fn test_highlight_replacement_is_literal() {
        let out = highlight_skills("cost in sql", &skills(&["SQL"]), |_| "$1".to_string());
        assert_eq!(out, "cost in $1");
    }
}
