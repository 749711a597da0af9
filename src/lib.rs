//! Resume analyzer library
//!
//! Keyword scoring of resumes against job descriptions and a role to skill
//! registry: match scores, missing keywords, role suggestions, suitability
//! verdicts and improvement suggestions.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod registry;

pub use config::Config;
pub use error::{Result, ResumeAnalyzerError};
pub use registry::{RoleEntry, RoleSkillRegistry};
