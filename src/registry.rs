//! Role to skill registry
//!
//! An ordered, read-only table mapping each role name to the skills it
//! requires. Order is preserved from the source (built-in table or TOML
//! file) and drives display and tie-breaking, never scoring.

use crate::error::{Result, ResumeAnalyzerError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub name: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleSkillRegistry {
    roles: Vec<RoleEntry>,
}

impl RoleSkillRegistry {
    /// Build a registry from ordered entries. Role names must be unique.
    pub fn new(roles: Vec<RoleEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for role in &roles {
            if role.name.trim().is_empty() {
                return Err(ResumeAnalyzerError::Registry("Role name must not be empty".to_string()));
            }
            if !seen.insert(role.name.as_str()) {
                return Err(ResumeAnalyzerError::Registry(format!(
                    "Role '{}' is defined more than once",
                    role.name
                )));
            }
        }
        Ok(Self { roles })
    }

    /// Convenience constructor for inline tables
    pub fn from_pairs<R, S>(pairs: impl IntoIterator<Item = (R, Vec<S>)>) -> Result<Self>
    where
        R: Into<String>,
        S: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, skills)| RoleEntry {
                    name: name.into(),
                    skills: skills.into_iter().map(Into::into).collect(),
                })
                .collect(),
        )
    }

    /// Load a `[[roles]]` table from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let roles = read_roles_file(path)
            .map_err(|e| ResumeAnalyzerError::Registry(format!("{:#}", e)))?;
        let registry = Self::new(roles)?;
        log::info!("Loaded {} roles from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Registry from the given file, or the built-in table when none is set
    pub fn from_optional_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn skills(&self, role: &str) -> Option<&[String]> {
        self.roles
            .iter()
            .find(|entry| entry.name == role)
            .map(|entry| entry.skills.as_slice())
    }

    /// Skills of `role`, empty for unknown roles
    pub fn skills_or_empty(&self, role: &str) -> &[String] {
        self.skills(role).unwrap_or(&[])
    }

    pub fn contains(&self, role: &str) -> bool {
        self.skills(role).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleEntry> {
        self.roles.iter()
    }

    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// The default role table covering software, data, electronics,
    /// electrical, security, mechanical/civil and emerging tech roles
    pub fn builtin() -> Self {
        let table: &[(&str, &[&str])] = &[
            // AI / ML / Data Science
            ("Data Scientist", &["Python", "Pandas", "NumPy", "Scikit-learn", "Machine Learning", "Deep Learning", "Statistics", "Data Visualization", "SQL", "Matplotlib", "Seaborn"]),
            ("Machine Learning Engineer", &["Python", "TensorFlow", "PyTorch", "Scikit-learn", "ML Algorithms", "Model Deployment", "Data Preprocessing", "Keras", "CNN", "RNN"]),
            ("AI Researcher", &["Python", "Deep Learning", "Neural Networks", "NLP", "Computer Vision", "Research Papers", "TensorFlow", "PyTorch", "Algorithm Design"]),
            ("Data Analyst", &["Excel", "SQL", "Power BI", "Tableau", "Python", "Data Cleaning", "Visualization", "Statistics", "Dashboarding"]),
            // Full stack / software
            ("Full Stack Developer", &["HTML", "CSS", "JavaScript", "React", "Node.js", "Express.js", "SQL", "MongoDB", "REST API", "Bootstrap", "Responsive Design"]),
            ("Frontend Developer", &["HTML", "CSS", "JavaScript", "React", "Vue.js", "Bootstrap", "Responsive Design", "UI/UX", "AJAX"]),
            ("Backend Developer", &["Python", "Django", "Flask", "Node.js", "REST API", "Database", "SQL", "MongoDB", "Authentication", "APIs"]),
            ("Cloud Engineer", &["AWS", "Azure", "Google Cloud", "Docker", "Kubernetes", "Terraform", "CI/CD", "Cloud Security", "Serverless Architecture"]),
            // Electronics & communication
            ("Embedded Systems Engineer", &["C", "C++", "Microcontrollers", "Arduino", "Raspberry Pi", "Signal Processing", "PCB Design", "IoT", "Sensors"]),
            ("VLSI Engineer", &["Verilog", "VHDL", "FPGA", "Digital Design", "ASIC", "Timing Analysis", "Cadence", "Synopsys", "Logic Synthesis"]),
            ("Communication Engineer", &["Signals", "Telecommunication", "Modulation", "Networking", "MATLAB", "Wireless Systems", "RF Design", "Antenna Design"]),
            ("Electronics Engineer", &["Circuits", "Analog Electronics", "Digital Electronics", "PCB Design", "Microcontrollers", "MATLAB", "Oscilloscopes"]),
            // Electrical & electronics
            ("Electrical Engineer", &["Circuit Analysis", "Power Systems", "Electrical Machines", "MATLAB", "Control Systems", "Transformers", "Switchgear", "Protection Systems"]),
            ("Power Systems Engineer", &["Load Flow Analysis", "Power Transmission", "SCADA", "ETAP", "MATLAB", "Protection Systems", "Substation Design"]),
            ("Control Systems Engineer", &["PID", "MATLAB", "Simulink", "Automation", "PLC", "Sensors", "Feedback Systems", "Robotics Control"]),
            // Forensics / security
            ("Forensic Analyst", &["Digital Forensics", "Evidence Collection", "Cybersecurity", "Network Analysis", "Malware Analysis", "Python", "EnCase", "FTK", "Incident Response"]),
            ("Cybersecurity Analyst", &["Network Security", "Penetration Testing", "Firewalls", "Ethical Hacking", "SIEM", "Python", "Wireshark", "Vulnerability Assessment"]),
            ("Information Security Engineer", &["Cryptography", "Security Policies", "Risk Assessment", "Network Security", "Python", "IDS/IPS", "Firewall Configuration"]),
            // Mechanical / civil
            ("Mechanical Engineer", &["AutoCAD", "SolidWorks", "Thermodynamics", "Material Science", "MATLAB", "Design Engineering", "CFD", "Mechanics"]),
            ("Civil Engineer", &["AutoCAD", "Structural Analysis", "Revit", "Construction Management", "Surveying", "Material Testing", "Project Planning"]),
            // Miscellaneous
            ("Business Analyst", &["Requirements Gathering", "Data Analysis", "Excel", "Power BI", "SQL", "Communication", "Documentation", "Stakeholder Management"]),
            ("QA Engineer", &["Manual Testing", "Selenium", "Automation Testing", "Test Cases", "Bug Tracking", "JIRA", "Regression Testing"]),
            ("DevOps Engineer", &["CI/CD", "Docker", "Kubernetes", "AWS", "Azure", "Linux", "Terraform", "Jenkins", "Monitoring"]),
            ("Network Engineer", &["Routing", "Switching", "LAN/WAN", "TCP/IP", "Cisco", "Firewalls", "Network Troubleshooting"]),
            // Emerging tech
            ("Robotics Engineer", &["ROS", "Python", "C++", "Sensors", "Actuators", "Control Systems", "Arduino", "Simulation"]),
            ("IoT Engineer", &["IoT", "Arduino", "Raspberry Pi", "Sensors", "MQTT", "Embedded Systems", "C", "Python"]),
            ("Blockchain Developer", &["Solidity", "Ethereum", "Smart Contracts", "Web3.js", "Cryptography", "Decentralized Apps", "Python"]),
            ("Cloud Data Engineer", &["SQL", "Python", "ETL", "BigQuery", "AWS", "Data Pipelines", "Data Warehousing", "Spark"]),
        ];

        let roles = table
            .iter()
            .map(|(name, skills)| RoleEntry {
                name: name.to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        Self { roles }
    }
}

#[derive(Deserialize)]
struct RolesFile {
    #[serde(default)]
    roles: Vec<RoleEntry>,
}

fn read_roles_file(path: &Path) -> anyhow::Result<Vec<RoleEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read role table {}", path.display()))?;
    let file: RolesFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse role table {}", path.display()))?;
    Ok(file.roles)
}
