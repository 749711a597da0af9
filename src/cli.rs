//! CLI interface for the resume analyzer

use crate::config::{OutputFormat, ScreeningMode};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Keyword-based resume screening against job descriptions and role skill tables")]
#[command(long_about = "Score resumes against a job description, suggest matching roles, and list the skills a resume is missing for a role")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a batch of resumes against a job description
    Screen {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files (PDF, TXT, MD)
        #[arg(short, long, num_args = 1.., required = true)]
        resumes: Vec<PathBuf>,

        /// Screening mode: student or recruiter
        #[arg(short, long, default_value = "student")]
        mode: String,

        /// Number of resumes to report
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Minimum job description match score (%)
        #[arg(long)]
        min_score: Option<f64>,

        /// Output format: console, json, csv, txt
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Role table (TOML) replacing the built-in registry
        #[arg(long)]
        registry: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// Role registry commands
    Roles {
        #[command(subcommand)]
        action: RoleAction,
    },

    /// Check a resume against a single role
    Check {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Role name as listed by `roles list`
        #[arg(long)]
        role: String,

        /// Suitability threshold (%)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Role table (TOML) replacing the built-in registry
        #[arg(long)]
        registry: Option<PathBuf>,

        /// Print the resume with the role's skills highlighted
        #[arg(long)]
        highlight: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum RoleAction {
    /// List roles and their skills
    List {
        /// Role table (TOML) replacing the built-in registry
        #[arg(long)]
        registry: Option<PathBuf>,
    },

    /// Suggest roles for a resume
    Suggest {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Role table (TOML) replacing the built-in registry
        #[arg(long)]
        registry: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "csv" => Ok(OutputFormat::Csv),
        "txt" | "text" => Ok(OutputFormat::Txt),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, csv, txt", format)),
    }
}

/// Parse screening mode
pub fn parse_mode(mode: &str) -> Result<ScreeningMode, String> {
    match mode.to_lowercase().as_str() {
        "student" => Ok(ScreeningMode::Student),
        "recruiter" => Ok(ScreeningMode::Recruiter),
        _ => Err(format!("Invalid mode: {}. Supported: student, recruiter", mode)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
