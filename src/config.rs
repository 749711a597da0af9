//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::advisor::DEFAULT_SUITABILITY_THRESHOLD;
use crate::processing::ranker::DEFAULT_SUGGESTION_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub registry: RegistryConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub suitability_threshold: f64,
    pub role_suggestion_limit: usize,
    pub top_n: usize,
    pub min_score: f64,
    pub student_fallback_role: String,
    pub recruiter_fallback_role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// TOML role table; the built-in registry is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub missing_keyword_limit: usize,
    pub improvement_limit: usize,
    pub missing_skill_limit: usize,
    pub predicted_role_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
    Txt,
}

/// Who is screening: decides the fallback role when the job description names none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreeningMode {
    Student,
    Recruiter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                suitability_threshold: DEFAULT_SUITABILITY_THRESHOLD,
                role_suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
                top_n: 5,
                min_score: 30.0,
                student_fallback_role: "Machine Learning Engineer".to_string(),
                recruiter_fallback_role: "Software Engineer".to_string(),
            },
            registry: RegistryConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                missing_keyword_limit: 15,
                improvement_limit: 10,
                missing_skill_limit: 20,
                predicted_role_limit: 3,
            },
        }
    }
}

impl Config {
    /// Load `config_path`, writing defaults there on first use
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        if !(0.0..=100.0).contains(&analysis.suitability_threshold) {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "analysis.suitability_threshold must be within 0..=100, got {}",
                analysis.suitability_threshold
            )));
        }
        if !(0.0..=100.0).contains(&analysis.min_score) {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "analysis.min_score must be within 0..=100, got {}",
                analysis.min_score
            )));
        }
        if analysis.top_n == 0 {
            return Err(ResumeAnalyzerError::Configuration(
                "analysis.top_n must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl AnalysisConfig {
    /// Role assumed when a job description names no registry role
    pub fn fallback_role(&self, mode: ScreeningMode) -> &str {
        match mode {
            ScreeningMode::Student => &self.student_fallback_role,
            ScreeningMode::Recruiter => &self.recruiter_fallback_role,
        }
    }
}
