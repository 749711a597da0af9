//! Resume analyzer: keyword-based resume screening

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction, RoleAction};
use resume_analyzer::config::Config;
use resume_analyzer::input::InputManager;
use resume_analyzer::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_analyzer::processing::highlight::highlight_skills;
use resume_analyzer::processing::ranker::suggest_roles_with_limit;
use resume_analyzer::processing::screening::{ExtractedResume, Screener, ScreeningOptions};
use resume_analyzer::{Result, ResumeAnalyzerError, RoleSkillRegistry};
use std::path::Path;
use std::process;
use std::sync::Arc;

const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];
const JOB_EXTENSIONS: &[&str] = &["txt", "md"];

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_registry(cli_path: Option<&Path>, config: &Config) -> Result<Arc<RoleSkillRegistry>> {
    let path = cli_path.or(config.registry.path.as_deref());
    let registry = RoleSkillRegistry::from_optional_path(path)?;
    if registry.is_empty() {
        warn!("Role registry is empty; role suggestions and suitability will be empty");
    }
    Ok(Arc::new(registry))
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Screen {
            job,
            resumes,
            mode,
            top_n,
            min_score,
            output,
            save,
            registry,
            detailed,
        } => {
            cli::validate_file_extension(&job, JOB_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;
            for resume in &resumes {
                cli::validate_file_extension(resume, RESUME_EXTENSIONS).map_err(|e| {
                    ResumeAnalyzerError::InvalidInput(format!("Resume file {}: {}", resume.display(), e))
                })?;
            }

            let mode = cli::parse_mode(&mode).map_err(ResumeAnalyzerError::InvalidInput)?;
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeAnalyzerError::InvalidInput)?,
                None => config.output.format,
            };

            let mut options = ScreeningOptions::from_config(&config.analysis, mode);
            if let Some(top_n) = top_n {
                options.top_n = top_n.max(1);
            }
            if let Some(min_score) = min_score {
                options.min_score = min_score;
            }

            let registry = load_registry(registry.as_deref(), &config)?;
            let screener = Screener::new(registry, config.analysis.clone())?;

            info!("Starting resume screening");
            let mut input_manager = InputManager::new();
            let job_text = input_manager.extract_text(&job).await?;

            let progress = ProgressBar::new(resumes.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .map_err(|e| ResumeAnalyzerError::OutputFormatting(e.to_string()))?
                    .progress_chars("=> "),
            );

            let mut extracted = Vec::with_capacity(resumes.len());
            for path in &resumes {
                progress.set_message(display_name(path));
                let text = input_manager.extract_text(path).await?;
                if text.trim().is_empty() {
                    warn!("No text extracted from {}", path.display());
                }
                extracted.push(ExtractedResume {
                    file_name: display_name(path),
                    text,
                });
                progress.inc(1);
            }
            progress.finish_and_clear();

            let report = screener.screen(&job_text, extracted, options).await?;

            let mut output_config = config.output.clone();
            output_config.detailed |= detailed;
            let generator = ReportGenerator::from_config(&output_config);
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&output_format, mode, true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Roles { action } => match action {
            RoleAction::List { registry } => {
                let registry = load_registry(registry.as_deref(), &config)?;
                println!("📚 {} roles\n", registry.len());
                for entry in registry.iter() {
                    println!("  • {}", entry.name);
                    println!("    {}", entry.skills.join(", "));
                }
            }

            RoleAction::Suggest { resume, registry } => {
                cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                    .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;
                let registry = load_registry(registry.as_deref(), &config)?;
                let text = InputManager::new().extract_text(&resume).await?;

                let roles = suggest_roles_with_limit(&text, &registry, config.analysis.role_suggestion_limit);
                if roles.is_empty() {
                    println!("⚠️  No role has a matching skill in {}", resume.display());
                } else {
                    println!("🔮 Suggested roles for {}:", resume.display());
                    for (i, role) in roles.iter().enumerate() {
                        println!("  {}. {} - {:.2}%", i + 1, role.role, role.score);
                    }
                }
            }
        },

        Commands::Check {
            resume,
            role,
            threshold,
            registry,
            highlight,
        } => {
            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;
            let registry = load_registry(registry.as_deref(), &config)?;
            let screener = Screener::new(registry, config.analysis.clone())?;
            let text = InputManager::new().extract_text(&resume).await?;

            let threshold = threshold.unwrap_or(config.analysis.suitability_threshold);
            let evaluation = screener.evaluate_role(&text, &role, threshold);

            let generator = ReportGenerator::from_config(&config.output);
            let console = generator.console();
            let highlighted = highlight.then(|| {
                highlight_skills(&text, &evaluation.skills.present, |skill| console.highlight(skill))
            });
            println!("{}", console.format_role_evaluation(&evaluation, highlighted.as_deref()));
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Suitability threshold: {:.1}%", config.analysis.suitability_threshold);
                println!("Role suggestions: {}", config.analysis.role_suggestion_limit);
                println!("Top N: {}", config.analysis.top_n);
                println!("Minimum score: {:.1}%", config.analysis.min_score);
                println!("Student fallback role: {}", config.analysis.student_fallback_role);
                println!("Recruiter fallback role: {}", config.analysis.recruiter_fallback_role);
                println!(
                    "Registry: {}",
                    config
                        .registry
                        .path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "built-in".to_string())
                );
                println!("Output format: {:?}", config.output.format);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
