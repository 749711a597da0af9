//! Keyword overlap scoring between a document and a reference text
//!
//! The reference text (a job description or a joined skill list) is split
//! into lower-cased tokens; each token counts as found when it appears
//! anywhere inside the lower-cased document. The result is the percentage
//! of tokens found plus the distinct tokens that were not.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tokens of this many characters or fewer are ignored
pub const MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Percentage in `0.0..=100.0`, unrounded
    pub score: f64,
    /// Distinct reference tokens absent from the document, sorted
    pub missing: Vec<String>,
}

impl MatchResult {
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            missing: Vec::new(),
        }
    }
}

/// Unicode whitespace plus the ASCII file/group/record/unit separators
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Lower-cased whitespace tokens of `reference` longer than [`MIN_TOKEN_CHARS`].
/// Duplicates are kept.
pub fn reference_tokens(reference: &str) -> Vec<String> {
    reference
        .to_lowercase()
        .split(is_separator)
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Score `document` against `reference`.
///
/// Swapping the arguments changes the result: only the reference is
/// tokenized, the document is searched as one string.
pub fn match_score(document: &str, reference: &str) -> MatchResult {
    let tokens = reference_tokens(reference);
    if tokens.is_empty() {
        return MatchResult::empty();
    }

    let haystack = document.to_lowercase();
    let mut found = 0usize;
    let mut missing = BTreeSet::new();

    for token in &tokens {
        if haystack.contains(token.as_str()) {
            found += 1;
        } else {
            missing.insert(token.clone());
        }
    }

    MatchResult {
        score: found as f64 / tokens.len() as f64 * 100.0,
        missing: missing.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_tokens_are_dropped() {
        let tokens = reference_tokens("We need an ML engineer to do AI");
        assert_eq!(tokens, vec!["need", "engineer"]);
    }

    #[test]
    fn test_control_separators_split_tokens() {
        let tokens = reference_tokens("python\u{1c}docker\u{1f}rust\u{85}sql\u{a0}java");
        assert_eq!(tokens, vec!["python", "docker", "rust", "sql", "java"]);
        assert!(reference_tokens("\u{1d}\u{1e}").is_empty());
    }

    #[test]
    fn test_empty_reference_scores_zero() {
        assert_eq!(match_score("anything at all", ""), MatchResult::empty());
        assert_eq!(match_score("anything at all", "   \n\t "), MatchResult::empty());
        assert_eq!(match_score("anything at all", "a an to of ML"), MatchResult::empty());
    }

    #[test]
    fn test_full_match_scores_hundred() {
        let result = match_score("Senior Rust developer, Tokio and Serde", "rust TOKIO serde");
        assert_eq!(result.score, 100.0);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_substring_containment_not_word_match() {
        // "java" is found inside "javascript"
        let result = match_score("javascript", "java");
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_partial_match_and_missing_set() {
        let result = match_score("I use Python daily", "Python SQL Docker");
        assert!((result.score - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.missing, vec!["docker", "sql"]);
    }

    #[test]
    fn test_duplicates_weight_the_score() {
        // 3 of 4 tokens found; the missing set lists "docker" once
        let result = match_score("python", "python python python docker");
        assert_eq!(result.score, 75.0);
        assert_eq!(result.missing, vec!["docker"]);

        let result = match_score("python", "python docker docker docker");
        assert_eq!(result.score, 25.0);
        assert_eq!(result.missing, vec!["docker"]);
    }

    #[test]
    fn test_empty_document_misses_everything() {
        let result = match_score("", "Kubernetes Terraform AWS");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.missing, vec!["aws", "kubernetes", "terraform"]);
    }

    #[test]
    fn test_direction_matters() {
        let forward = match_score("rust developer", "rust");
        let backward = match_score("rust", "rust developer");
        assert_eq!(forward.score, 100.0);
        assert_eq!(backward.score, 50.0);
    }

    #[test]
    fn test_score_stays_in_bounds() {
        let cases = [
            ("", "x"),
            ("abc", "abc abc"),
            ("Ünïcode TEXT", "ünïcode text missing"),
            ("  ", "one two three four"),
        ];
        for (document, reference) in cases {
            let score = match_score(document, reference).score;
            assert!((0.0..=100.0).contains(&score), "{} out of bounds", score);
        }
    }
}
