//! Role ranking for a single document

use crate::processing::matcher::match_score;
use crate::registry::RoleSkillRegistry;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleScore {
    pub role: String,
    pub score: f64,
}

/// Top [`DEFAULT_SUGGESTION_LIMIT`] roles by share of skills found in the document
pub fn suggest_roles(document: &str, registry: &RoleSkillRegistry) -> Vec<RoleScore> {
    suggest_roles_with_limit(document, registry, DEFAULT_SUGGESTION_LIMIT)
}

/// Roles whose skills appear as case-insensitive substrings of `document`.
///
/// Each role scores `matched / skills * 100`, rounded to two decimals.
/// Roles without a single matching skill are left out. Ties keep registry
/// order.
pub fn suggest_roles_with_limit(
    document: &str,
    registry: &RoleSkillRegistry,
    limit: usize,
) -> Vec<RoleScore> {
    let haystack = document.to_lowercase();

    let mut scored: Vec<RoleScore> = registry
        .iter()
        .filter_map(|entry| {
            let matched = entry
                .skills
                .iter()
                .filter(|skill| haystack.contains(&skill.to_lowercase()))
                .count();
            if matched == 0 {
                return None;
            }
            let pct = matched as f64 / entry.skills.len().max(1) as f64 * 100.0;
            Some(RoleScore {
                role: entry.name.clone(),
                score: round2(pct),
            })
        })
        .collect();

    sort_descending(&mut scored);
    scored.truncate(limit);
    scored
}

/// Every role scored with [`match_score`] against its space-joined skill list,
/// best first. Zero scores are kept.
pub fn rank_all_roles(document: &str, registry: &RoleSkillRegistry) -> Vec<RoleScore> {
    let mut scored: Vec<RoleScore> = registry
        .iter()
        .map(|entry| RoleScore {
            role: entry.name.clone(),
            score: match_score(document, &entry.skills.join(" ")).score,
        })
        .collect();

    sort_descending(&mut scored);
    scored
}

// stable, so equal scores stay in registry order
fn sort_descending(scores: &mut [RoleScore]) {
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
}

// decimal formatting resolves exact ties to the even digit: 3.125 -> 3.12
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
