use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabsmith_core::{GenerationMode, GenerationResponse};
use tabsmith_export::Download;
use tabsmith_request::Payload;

use super::{RegistryError, RegistryResult};
use crate::workspace::{write_bytes_atomic, write_json_atomic};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub mode: GenerationMode,
    pub endpoint: String,
    pub schema_version: String,
    pub schema_file: PathBuf,
    pub runs_dir: PathBuf,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub mode: GenerationMode,
    pub endpoint: String,
    pub schema_version: String,
    pub schema_file: String,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub payload_path: PathBuf,
    pub response_path: PathBuf,
    pub logs_path: PathBuf,
}

/// Create `<runs_dir>/<timestamp>__run_<id>/` with its `config.json` and an
/// empty `logs.ndjson`.
pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.runs_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config_path = root.join("config.json");
    let logs_path = root.join("logs.ndjson");

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        mode: ctx.mode,
        endpoint: ctx.endpoint.clone(),
        schema_version: ctx.schema_version.clone(),
        schema_file: ctx.schema_file.display().to_string(),
        git: collect_git_info(),
    };

    write_json(&config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        payload_path: root.join("payload.json"),
        response_path: root.join("response.json"),
        logs_path,
        root,
    })
}

pub fn write_payload(paths: &RunPaths, payload: &Payload) -> RegistryResult<()> {
    write_json(&paths.payload_path, payload)
}

pub fn write_response(paths: &RunPaths, response: &GenerationResponse) -> RegistryResult<()> {
    write_json(&paths.response_path, response)
}

/// Store a download artifact next to the run files and return its path.
pub fn write_download(paths: &RunPaths, download: &Download) -> RegistryResult<PathBuf> {
    let path = paths.root.join(&download.filename);
    write_bytes_atomic(&path, &download.bytes)?;
    Ok(path)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    write_json_atomic(path, value).map_err(RegistryError::from)
}
