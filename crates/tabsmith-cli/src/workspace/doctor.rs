use std::path::Path;

use serde::Deserialize;
use tabsmith_core::SCHEMA_VERSION;

use super::settings::WorkspaceSettings;
use super::{WorkspacePaths, WorkspaceResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoctorLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct DoctorIssue {
    pub level: DoctorLevel,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    pub issues: Vec<DoctorIssue>,
}

impl DoctorReport {
    fn push(&mut self, level: DoctorLevel, message: impl Into<String>, hint: Option<String>) {
        self.issues.push(DoctorIssue {
            level,
            message: message.into(),
            hint,
        });
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.level == DoctorLevel::Error)
            .count()
    }
}

pub fn run_doctor(
    paths: &WorkspacePaths,
    settings: &WorkspaceSettings,
) -> WorkspaceResult<DoctorReport> {
    let mut report = DoctorReport::default();

    check_dir(&mut report, &paths.root, "workspace root");
    check_dir(&mut report, &paths.config_dir, "config");
    check_dir(&mut report, &paths.runs_dir, "runs");
    check_dir(&mut report, &paths.out_dir, "out");

    let base_url = settings.service.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        report.push(
            DoctorLevel::Error,
            format!("service base_url is not an http(s) url: '{base_url}'"),
            Some("set [service].base_url in settings.toml".to_string()),
        );
    }
    if settings.service.timeout_secs == 0 {
        report.push(
            DoctorLevel::Error,
            "service timeout_secs is 0",
            Some("generation can take minutes; use a few hundred seconds".to_string()),
        );
    }
    if let Some(out_dir) = &settings.export.out_dir
        && out_dir.is_file()
    {
        report.push(
            DoctorLevel::Error,
            format!("export out_dir is a file: {}", out_dir.display()),
            None,
        );
    }

    check_run_versions(&paths.runs_dir, &mut report)?;

    Ok(report)
}

fn check_dir(report: &mut DoctorReport, path: &Path, label: &str) {
    if !path.exists() {
        report.push(
            DoctorLevel::Error,
            format!("{label} directory missing"),
            Some("run `tabsmith init`".to_string()),
        );
    }
}

fn check_run_versions(root: &Path, report: &mut DoctorReport) -> WorkspaceResult<()> {
    if !root.exists() {
        return Ok(());
    }

    for entry in std::fs::read_dir(root)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let config_path = path.join("config.json");
        if !config_path.exists() {
            report.push(
                DoctorLevel::Warning,
                format!("run without config.json: {}", path.display()),
                Some("remove the directory if the run was interrupted".to_string()),
            );
            continue;
        }
        let content = std::fs::read_to_string(&config_path)?;
        let parsed: RunVersion = serde_json::from_str(&content)?;
        if parsed.schema_version != SCHEMA_VERSION {
            report.push(
                DoctorLevel::Warning,
                format!("schema version mismatch in {}", config_path.display()),
                Some("rerun the generation with the current schema format".to_string()),
            );
        }
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct RunVersion {
    schema_version: String,
}
