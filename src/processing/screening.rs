//! Batch screening of resumes against one job description
//!
//! Every resume is scored against the job description, the ones below the
//! minimum score are dropped, and the best `top_n` get a full report:
//! suitability for the job role, missing keywords, improvement suggestions
//! and role rankings. Resumes are independent, so both phases fan out to
//! blocking tasks sharing the registry through an `Arc`.

use crate::config::{AnalysisConfig, ScreeningMode};
use crate::error::Result;
use crate::output::report::{
    preview, ReportMetadata, ResumeReport, ResumeScore, RoleEvaluation, ScreeningReport,
    JOB_PREVIEW_CHARS,
};
use crate::processing::advisor::{improvement_suggestions, is_suitable};
use crate::processing::highlight::split_present_missing;
use crate::processing::matcher::match_score;
use crate::processing::ranker::{rank_all_roles, suggest_roles_with_limit};
use crate::processing::role_detector::RoleDetector;
use crate::registry::RoleSkillRegistry;
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

/// A resume after text extraction
#[derive(Debug, Clone)]
pub struct ExtractedResume {
    pub file_name: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ScreeningOptions {
    pub mode: ScreeningMode,
    pub top_n: usize,
    pub min_score: f64,
}

impl ScreeningOptions {
    pub fn from_config(analysis: &AnalysisConfig, mode: ScreeningMode) -> Self {
        Self {
            mode,
            top_n: analysis.top_n,
            min_score: analysis.min_score,
        }
    }
}

pub struct Screener {
    registry: Arc<RoleSkillRegistry>,
    detector: RoleDetector,
    settings: AnalysisConfig,
}

impl Screener {
    pub fn new(registry: Arc<RoleSkillRegistry>, settings: AnalysisConfig) -> Result<Self> {
        let detector = RoleDetector::new(&registry)?;
        Ok(Self {
            registry,
            detector,
            settings,
        })
    }

    /// Job role named in the description, or the mode's fallback role
    pub fn job_role(&self, job_text: &str, mode: ScreeningMode) -> (String, bool) {
        match self.detector.detect(job_text) {
            Some(role) => (role.to_string(), true),
            None => (self.settings.fallback_role(mode).to_string(), false),
        }
    }

    pub async fn screen(
        &self,
        job_text: &str,
        resumes: Vec<ExtractedResume>,
        options: ScreeningOptions,
    ) -> Result<ScreeningReport> {
        let started = Instant::now();
        let (job_role, job_role_detected) = self.job_role(job_text, options.mode);
        info!(
            "Screening {} resumes for '{}' ({})",
            resumes.len(),
            job_role,
            if job_role_detected { "detected" } else { "fallback" }
        );

        let job_text: Arc<str> = Arc::from(job_text);
        let resumes: Vec<Arc<ExtractedResume>> = resumes.into_iter().map(Arc::new).collect();

        // Phase 1: job description score for every resume
        let mut handles = Vec::with_capacity(resumes.len());
        for resume in &resumes {
            let resume = Arc::clone(resume);
            let job_text = Arc::clone(&job_text);
            handles.push(tokio::task::spawn_blocking(move || {
                match_score(&resume.text, &job_text).score
            }));
        }

        let mut all_scores = Vec::with_capacity(resumes.len());
        for (resume, handle) in resumes.iter().zip(handles) {
            let score = handle.await?;
            debug!("{}: {:.2}% against the job description", resume.file_name, score);
            all_scores.push(ResumeScore {
                file_name: resume.file_name.clone(),
                score,
            });
        }

        // Phase 2: filter, rank, and build details for the survivors
        let mut ranked: Vec<(usize, f64)> = all_scores
            .iter()
            .enumerate()
            .filter(|(_, s)| s.score >= options.min_score)
            .map(|(idx, s)| (idx, s.score))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(options.top_n);

        let mut handles = Vec::with_capacity(ranked.len());
        for (idx, score) in ranked {
            let resume = Arc::clone(&resumes[idx]);
            let job_text = Arc::clone(&job_text);
            let registry = Arc::clone(&self.registry);
            let job_role = job_role.clone();
            let threshold = self.settings.suitability_threshold;
            let suggestion_limit = self.settings.role_suggestion_limit;
            handles.push(tokio::task::spawn_blocking(move || {
                build_resume_report(
                    &resume,
                    score,
                    &job_text,
                    &job_role,
                    &registry,
                    threshold,
                    suggestion_limit,
                )
            }));
        }

        let mut reports = Vec::with_capacity(handles.len());
        for handle in handles {
            reports.push(handle.await?);
        }

        info!(
            "{} of {} resumes met the {:.0}% minimum",
            reports.len(),
            all_scores.len(),
            options.min_score
        );

        Ok(ScreeningReport {
            metadata: ReportMetadata {
                generated_at: chrono::Utc::now(),
                mode: options.mode,
                job_role,
                job_role_detected,
                registry_roles: self.registry.len(),
                min_score: options.min_score,
                top_n: options.top_n,
                suitability_threshold: self.settings.suitability_threshold,
                processing_time_ms: started.elapsed().as_millis() as u64,
            },
            job_preview: preview(&job_text, JOB_PREVIEW_CHARS),
            all_scores,
            resumes: reports,
        })
    }

    /// Test one document against any role, known to the registry or not
    pub fn evaluate_role(&self, document: &str, role: &str, threshold: f64) -> RoleEvaluation {
        let skills = self.registry.skills_or_empty(role);
        RoleEvaluation {
            role: role.to_string(),
            known_role: self.registry.contains(role),
            suitability: is_suitable(document, role, &self.registry, threshold),
            improvements: improvement_suggestions(document, role, &self.registry),
            skills: split_present_missing(document, skills),
        }
    }
}

fn build_resume_report(
    resume: &ExtractedResume,
    job_score: f64,
    job_text: &str,
    job_role: &str,
    registry: &RoleSkillRegistry,
    threshold: f64,
    suggestion_limit: usize,
) -> ResumeReport {
    let text = resume.text.as_str();
    ResumeReport {
        file_name: resume.file_name.clone(),
        job_score,
        suitability: is_suitable(text, job_role, registry, threshold),
        missing_keywords: match_score(text, job_text).missing,
        improvements: improvement_suggestions(text, job_role, registry),
        suggested_roles: suggest_roles_with_limit(text, registry, suggestion_limit),
        role_ranking: rank_all_roles(text, registry),
        skills: split_present_missing(text, registry.skills_or_empty(job_role)),
    }
}
