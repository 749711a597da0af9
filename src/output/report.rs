//! Report structures produced by the screening pipeline

use crate::config::ScreeningMode;
use crate::processing::advisor::Suitability;
use crate::processing::highlight::SkillPresence;
use crate::processing::ranker::RoleScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Characters of the job description kept for previews
pub const JOB_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub metadata: ReportMetadata,
    pub job_preview: String,
    /// Every resume's job description score, in input order
    pub all_scores: Vec<ResumeScore>,
    /// Resumes that passed the minimum score, best first, at most `top_n`
    pub resumes: Vec<ResumeReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub mode: ScreeningMode,
    pub job_role: String,
    /// False when `job_role` is the configured fallback
    pub job_role_detected: bool,
    pub registry_roles: usize,
    pub min_score: f64,
    pub top_n: usize,
    pub suitability_threshold: f64,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeScore {
    pub file_name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeReport {
    pub file_name: String,
    pub job_score: f64,
    /// Verdict against the job role's skill list
    pub suitability: Suitability,
    /// Job description tokens absent from the resume
    pub missing_keywords: Vec<String>,
    /// Job role skills absent from the resume, registry order
    pub improvements: Vec<String>,
    /// Roles with at least one skill present, best first
    pub suggested_roles: Vec<RoleScore>,
    /// Every role scored against its skill text, best first
    pub role_ranking: Vec<RoleScore>,
    /// Whole-word presence of the job role's skills
    pub skills: SkillPresence,
}

impl ResumeReport {
    pub fn predicted_roles(&self, limit: usize) -> &[RoleScore] {
        &self.role_ranking[..limit.min(self.role_ranking.len())]
    }
}

/// Result of testing one document against an arbitrary role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleEvaluation {
    pub role: String,
    pub known_role: bool,
    pub suitability: Suitability,
    pub improvements: Vec<String>,
    pub skills: SkillPresence,
}

/// Leading `max_chars` characters, with "..." appended when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
