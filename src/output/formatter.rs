//! Output formatters: console, JSON, CSV and plain-text summaries

use crate::config::{OutputConfig, OutputFormat, ScreeningMode};
use crate::error::{Result, ResumeAnalyzerError};
use crate::output::report::*;
use crate::processing::ranker::RoleScore;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// How many entries of each list make it into a report
#[derive(Debug, Clone, Copy)]
pub struct ListLimits {
    pub missing_keywords: usize,
    pub improvements: usize,
    pub missing_skills: usize,
    pub predicted_roles: usize,
}

impl ListLimits {
    pub fn from_config(output: &OutputConfig) -> Self {
        Self {
            missing_keywords: output.missing_keyword_limit,
            improvements: output.improvement_limit,
            missing_skills: output.missing_skill_limit,
            predicted_roles: output.predicted_role_limit,
        }
    }
}

impl Default for ListLimits {
    fn default() -> Self {
        Self {
            missing_keywords: 15,
            improvements: 10,
            missing_skills: 20,
            predicted_roles: 3,
        }
    }
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    limits: ListLimits,
}

/// JSON formatter for structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// CSV export, one row per reported resume
pub struct CsvFormatter {
    limits: ListLimits,
}

/// Plain-text summary, one block per reported resume
pub struct TxtFormatter {
    limits: ListLimits,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    csv_formatter: CsvFormatter,
    txt_formatter: TxtFormatter,
}

#[derive(Template)]
#[template(
    source = "{% for entry in entries %}{% if !loop.first %}\n\n{% endif %}Resume: {{ entry.file_name }}\nMatch Score: {{ entry.score }}%\nTop {{ role_limit }} Predicted Roles: {{ entry.predicted_roles }}\nMissing Keywords: {{ entry.missing_keywords }}\nImprovement Suggestions: {{ entry.improvements }}\nMissing Skills: {{ entry.missing_skills }}\n{{ rule }}{% endfor %}",
    ext = "txt"
)]
struct TxtSummaryTemplate {
    entries: Vec<SummaryRow>,
    role_limit: usize,
    rule: String,
}

/// One resume flattened into display strings, shared by CSV and TXT
struct SummaryRow {
    file_name: String,
    score: String,
    predicted_roles: String,
    missing_keywords: String,
    improvements: String,
    missing_skills: String,
}

impl SummaryRow {
    fn new(resume: &ResumeReport, limits: &ListLimits) -> Self {
        Self {
            file_name: resume.file_name.clone(),
            score: format!("{:.2}", resume.job_score),
            predicted_roles: role_names(resume.predicted_roles(limits.predicted_roles)),
            missing_keywords: join_limited(&resume.missing_keywords, limits.missing_keywords),
            improvements: join_limited(&resume.improvements, limits.improvements),
            missing_skills: join_limited(&resume.skills.missing, limits.missing_skills),
        }
    }
}

fn join_limited(items: &[String], limit: usize) -> String {
    items.iter().take(limit).map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn role_names(roles: &[RoleScore]) -> String {
    roles.iter().map(|r| r.role.as_str()).collect::<Vec<_>>().join(", ")
}

fn score_bar(score: f64) -> String {
    "█".repeat((score / 5.0).round().clamp(0.0, 20.0) as usize)
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool, limits: ListLimits) -> Self {
        Self { use_colors, detailed, limits }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_verdict(&self, suitable: bool) -> String {
        if suitable {
            self.colorize("Yes", Color::Green)
        } else {
            self.colorize("No", Color::Red)
        }
    }

    fn format_score(&self, score: f64) -> String {
        let color = match score {
            s if s >= 70.0 => Color::Green,
            s if s >= 40.0 => Color::Yellow,
            _ => Color::Red,
        };
        self.colorize(&format!("{:.2}%", score), color)
    }

    fn format_list(&self, items: &[String], limit: usize) -> String {
        if items.is_empty() {
            "—".to_string()
        } else {
            join_limited(items, limit)
        }
    }

    fn format_roles(&self, roles: &[RoleScore]) -> String {
        let mut output = String::new();
        for (i, role) in roles.iter().enumerate() {
            output.push_str(&format!("  {}. {} - {}\n", i + 1, role.role, self.format_score(role.score)));
        }
        output
    }

    fn format_resume(&self, resume: &ResumeReport, job_role: &str) -> String {
        let mut output = String::new();
        output.push_str(&self.format_header(&format!("📄 {}", resume.file_name), 2));
        output.push_str(&format!("🎯 JD Role Match: {}\n", job_role));
        output.push_str(&format!("  • Match Score: {}\n", self.format_score(resume.job_score)));
        output.push_str(&format!(
            "  • Suitable: {} ({:.2}% of role keywords)\n",
            self.format_verdict(resume.suitability.suitable),
            resume.suitability.score
        ));
        output.push_str(&format!(
            "  • Missing Keywords: {}\n",
            self.format_list(&resume.missing_keywords, self.limits.missing_keywords)
        ));
        output.push_str(&format!(
            "  • Improvement Suggestions: {}\n",
            self.format_list(&resume.improvements, self.limits.improvements)
        ));

        if !resume.suggested_roles.is_empty() {
            output.push_str("\n💡 Suggested Roles (skills found):\n");
            output.push_str(&self.format_roles(&resume.suggested_roles));
        }

        output.push_str(&format!("\n🔮 Top {} Predicted Roles:\n", self.limits.predicted_roles));
        output.push_str(&self.format_roles(resume.predicted_roles(self.limits.predicted_roles)));

        if self.detailed {
            output.push_str("\n✅ Present Skills: ");
            output.push_str(&self.format_list(&resume.skills.present, usize::MAX));
            output.push_str("\n❌ Missing Skills: ");
            output.push_str(&self.format_list(&resume.skills.missing, self.limits.missing_skills));
            output.push('\n');

            output.push_str("\n📈 Role Suitability Chart:\n");
            let width = resume.role_ranking.iter().map(|r| r.role.chars().count()).max().unwrap_or(0);
            for role in &resume.role_ranking {
                output.push_str(&format!(
                    "  {:<width$} {:>6.2}% {}\n",
                    role.role,
                    role.score,
                    self.colorize(&score_bar(role.score), Color::Cyan),
                    width = width
                ));
            }
        }

        output
    }

    fn format_overview(&self, report: &ScreeningReport) -> String {
        let mut output = self.format_header("🏆 Candidate Ranking", 2);
        for (i, resume) in report.resumes.iter().enumerate() {
            let top_roles = role_names(&resume.suggested_roles);
            output.push_str(&format!(
                "  {}. {} - {} | Suitable: {} | Top Roles: {}\n",
                i + 1,
                resume.file_name,
                self.format_score(resume.job_score),
                self.format_verdict(resume.suitability.suitable),
                if top_roles.is_empty() { "—".to_string() } else { top_roles }
            ));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();
        let metadata = &report.metadata;

        output.push_str(&self.format_header("📊 RESUME SCREENING", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            metadata.processing_time_ms
        ));
        let role_note = if metadata.job_role_detected { "detected" } else { "default" };
        output.push_str(&format!("Job role: {} ({})\n", metadata.job_role, role_note));
        output.push_str(&format!(
            "Showing top {} with match score ≥ {:.0}%\n",
            metadata.top_n, metadata.min_score
        ));

        if self.detailed {
            output.push_str(&self.format_header("🧠 Job Description Preview", 3));
            output.push_str(&report.job_preview);
            output.push('\n');
        }

        if report.resumes.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize("⚠️  No resumes meet the selected match score threshold.", Color::Yellow)
            ));
        } else {
            if metadata.mode == ScreeningMode::Recruiter {
                output.push_str(&self.format_overview(report));
            }
            for resume in &report.resumes {
                output.push_str(&self.format_resume(resume, &metadata.job_role));
            }
        }

        // recruiters compare the shortlist, students see every upload
        let chart: Vec<(&str, f64)> = match metadata.mode {
            ScreeningMode::Recruiter => report
                .resumes
                .iter()
                .map(|r| (r.file_name.as_str(), r.job_score))
                .collect(),
            ScreeningMode::Student => report
                .all_scores
                .iter()
                .map(|s| (s.file_name.as_str(), s.score))
                .collect(),
        };

        output.push_str(&self.format_header("📊 Match Score Comparison", 2));
        let width = chart.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
        for (file_name, score) in chart {
            output.push_str(&format!(
                "  {:<width$} {:>6.2}% {}\n",
                file_name,
                score,
                self.colorize(&score_bar(score), Color::Cyan),
                width = width
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl ConsoleFormatter {
    /// Render the result of testing a document against one role
    pub fn format_role_evaluation(&self, evaluation: &RoleEvaluation, highlighted: Option<&str>) -> String {
        let mut output = self.format_header(&format!("🧪 Results for Role: {}", evaluation.role), 2);
        if !evaluation.known_role {
            output.push_str(&self.colorize("⚠️  Role not found in the registry\n", Color::Yellow));
        }
        output.push_str(&format!("  • Match Score: {}\n", self.format_score(evaluation.suitability.score)));
        output.push_str(&format!("  • Suitable: {}\n", self.format_verdict(evaluation.suitability.suitable)));
        output.push_str(&format!(
            "  • Suggestions: {}\n",
            self.format_list(&evaluation.improvements, self.limits.improvements)
        ));
        output.push_str(&format!(
            "  • Missing Keywords: {}\n",
            self.format_list(&evaluation.suitability.missing, self.limits.missing_keywords)
        ));
        output.push_str(&format!(
            "  • Present Skills: {}\n",
            self.format_list(&evaluation.skills.present, usize::MAX)
        ));

        if let Some(text) = highlighted {
            output.push_str(&self.format_header("🧠 Highlighted Skills", 3));
            output.push_str(text);
            output.push('\n');
        }
        output
    }

    /// Decoration used when highlighting skills in resume text
    pub fn highlight(&self, skill: &str) -> String {
        if self.use_colors {
            skill.color(Color::Green).bold().to_string()
        } else {
            format!("[{}]", skill)
        }
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl CsvFormatter {
    pub fn new(limits: ListLimits) -> Self {
        Self { limits }
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record([
            "Resume".to_string(),
            "Match Score (%)".to_string(),
            format!("Top {} Predicted Roles", self.limits.predicted_roles),
            "Missing Keywords".to_string(),
            "Improvement Suggestions".to_string(),
            "Missing Skills".to_string(),
        ])?;

        for resume in &report.resumes {
            let row = SummaryRow::new(resume, &self.limits);
            wtr.write_record([
                &row.file_name,
                &row.score,
                &row.predicted_roles,
                &row.missing_keywords,
                &row.improvements,
                &row.missing_skills,
            ])?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| ResumeAnalyzerError::OutputFormatting(format!("Failed to flush CSV: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ResumeAnalyzerError::OutputFormatting(format!("CSV is not valid UTF-8: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

impl TxtFormatter {
    pub fn new(limits: ListLimits) -> Self {
        Self { limits }
    }
}

impl OutputFormatter for TxtFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let template = TxtSummaryTemplate {
            entries: report
                .resumes
                .iter()
                .map(|resume| SummaryRow::new(resume, &self.limits))
                .collect(),
            role_limit: self.limits.predicted_roles,
            rule: "-".repeat(50),
        };
        template
            .render()
            .map_err(|e| ResumeAnalyzerError::OutputFormatting(format!("Failed to render summary: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Txt
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, ListLimits::default())
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, limits: ListLimits) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed, limits),
            json_formatter: JsonFormatter::new(pretty_json),
            csv_formatter: CsvFormatter::new(limits),
            txt_formatter: TxtFormatter::new(limits),
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self::with_options(output.color_output, output.detailed, true, ListLimits::from_config(output))
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        let formatters: [&dyn OutputFormatter; 4] = [
            &self.console_formatter,
            &self.json_formatter,
            &self.csv_formatter,
            &self.txt_formatter,
        ];
        let formatter = formatters
            .into_iter()
            .find(|f| f.supports_format() == *format)
            .ok_or_else(|| ResumeAnalyzerError::OutputFormatting(format!("No formatter for {:?}", format)))?;
        formatter.format_report(report)
    }

    pub fn console(&self) -> &ConsoleFormatter {
        &self.console_formatter
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, mode: ScreeningMode, timestamp: bool) -> String {
    let base_name = match mode {
        ScreeningMode::Student => "resume_analysis",
        ScreeningMode::Recruiter => "recruiter_results",
    };

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console | OutputFormat::Txt => format!("{}{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}{}.json", base_name, timestamp_suffix),
        OutputFormat::Csv => format!("{}{}.csv", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::advisor::Suitability;
    use crate::processing::highlight::SkillPresence;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_report(mode: ScreeningMode) -> ScreeningReport {
        let resume = ResumeReport {
            file_name: "jane, doe.txt".to_string(),
            job_score: 66.666,
            suitability: Suitability {
                suitable: true,
                score: 50.0,
                missing: strings(&["sql"]),
            },
            missing_keywords: strings(&["docker", "kubernetes"]),
            improvements: strings(&["SQL"]),
            suggested_roles: vec![RoleScore { role: "Data Analyst".to_string(), score: 22.22 }],
            role_ranking: vec![
                RoleScore { role: "Data Scientist".to_string(), score: 40.0 },
                RoleScore { role: "Data Analyst".to_string(), score: 30.0 },
                RoleScore { role: "AI Researcher".to_string(), score: 10.0 },
                RoleScore { role: "QA Engineer".to_string(), score: 0.0 },
            ],
            skills: SkillPresence {
                present: strings(&["Python"]),
                missing: strings(&["SQL"]),
            },
        };

        ScreeningReport {
            metadata: ReportMetadata {
                generated_at: chrono::Utc::now(),
                mode,
                job_role: "Data Scientist".to_string(),
                job_role_detected: true,
                registry_roles: 28,
                min_score: 30.0,
                top_n: 5,
                suitability_threshold: 30.0,
                processing_time_ms: 3,
            },
            job_preview: "Data Scientist wanted".to_string(),
            all_scores: vec![
                ResumeScore { file_name: "jane, doe.txt".to_string(), score: 66.666 },
                ResumeScore { file_name: "other.txt".to_string(), score: 10.0 },
            ],
            resumes: vec![resume],
        }
    }

    #[test]
    fn test_csv_export() {
        let csv = CsvFormatter::new(ListLimits::default())
            .format_report(&sample_report(ScreeningMode::Student))
            .unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Resume,Match Score (%),Top 3 Predicted Roles,Missing Keywords,Improvement Suggestions,Missing Skills")
        );
        assert_eq!(
            lines.next(),
            Some("\"jane, doe.txt\",66.67,\"Data Scientist, Data Analyst, AI Researcher\",\"docker, kubernetes\",SQL,SQL")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_txt_summary() {
        let txt = TxtFormatter::new(ListLimits::default())
            .format_report(&sample_report(ScreeningMode::Student))
            .unwrap();
        let expected = format!(
            "Resume: jane, doe.txt\nMatch Score: 66.67%\nTop 3 Predicted Roles: Data Scientist, Data Analyst, AI Researcher\nMissing Keywords: docker, kubernetes\nImprovement Suggestions: SQL\nMissing Skills: SQL\n{}",
            "-".repeat(50)
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn test_limits_truncate_lists() {
        let limits = ListLimits {
            missing_keywords: 1,
            improvements: 0,
            missing_skills: 20,
            predicted_roles: 1,
        };
        let csv = CsvFormatter::new(limits)
            .format_report(&sample_report(ScreeningMode::Student))
            .unwrap();
        assert!(csv.contains("Top 1 Predicted Roles"));
        assert!(csv.contains(",Data Scientist,docker,,SQL"));
    }

    #[test]
    fn test_json_round_trips_scores() {
        let json = JsonFormatter::new(false)
            .format_report(&sample_report(ScreeningMode::Recruiter))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["job_role"], "Data Scientist");
        assert_eq!(value["resumes"][0]["suitability"]["suitable"], true);
        assert_eq!(value["all_scores"].as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_console_without_colors() {
        let formatter = ConsoleFormatter::new(false, true, ListLimits::default());
        let out = formatter.format_report(&sample_report(ScreeningMode::Recruiter)).unwrap();
        assert!(out.contains("Candidate Ranking"));
        assert!(out.contains("Match Score: 66.67%"));
        assert!(out.contains("Suitable: Yes"));
        assert!(out.contains("Role Suitability Chart"));
        assert!(!out.contains("\u{1b}["));
    }

    #[test]
    fn test_console_warns_on_empty_result() {
        let mut report = sample_report(ScreeningMode::Student);
        report.resumes.clear();
        let out = ConsoleFormatter::new(false, false, ListLimits::default())
            .format_report(&report)
            .unwrap();
        assert!(out.contains("No resumes meet the selected match score threshold"));
    }

    #[test]
    fn test_comparison_chart_per_mode() {
        let formatter = ConsoleFormatter::new(false, false, ListLimits::default());

        let student = formatter.format_report(&sample_report(ScreeningMode::Student)).unwrap();
        let chart = student.split("Match Score Comparison").nth(1).unwrap();
        assert!(chart.contains("jane, doe.txt"));
        assert!(chart.contains("other.txt"));

        let recruiter = formatter.format_report(&sample_report(ScreeningMode::Recruiter)).unwrap();
        let chart = recruiter.split("Match Score Comparison").nth(1).unwrap();
        assert!(chart.contains("jane, doe.txt"));
        assert!(!chart.contains("other.txt"));
    }

    #[test]
    fn test_generator_routes_each_format() {
        let generator = ReportGenerator::with_options(false, false, false, ListLimits::default());
        let report = sample_report(ScreeningMode::Student);

        let csv = generator.generate_report(&report, &OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("Resume,Match Score (%)"));
        let txt = generator.generate_report(&report, &OutputFormat::Txt).unwrap();
        assert!(txt.starts_with("Resume: jane, doe.txt"));
        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(json.starts_with('{'));
        let console = generator.generate_report(&report, &OutputFormat::Console).unwrap();
        assert!(console.contains("Match Score Comparison"));
    }

    #[test]
    fn test_suggested_filenames() {
        assert_eq!(suggest_filename(&OutputFormat::Csv, ScreeningMode::Student, false), "resume_analysis.csv");
        assert_eq!(suggest_filename(&OutputFormat::Txt, ScreeningMode::Recruiter, false), "recruiter_results.txt");
        assert!(suggest_filename(&OutputFormat::Json, ScreeningMode::Student, true).starts_with("resume_analysis_"));
    }
}
