use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabsmith_client::ServiceOptions;

use super::atomic::write_bytes_atomic;
use super::{WorkspacePaths, WorkspaceResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Where `export` writes files; the workspace `out/` directory when unset.
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    pub service: ServiceOptions,
    pub export: ExportSettings,
}

impl WorkspaceSettings {
    pub fn export_dir(&self, paths: &WorkspacePaths) -> PathBuf {
        self.export
            .out_dir
            .clone()
            .unwrap_or_else(|| paths.out_dir.clone())
    }
}

pub fn load_or_create_settings(paths: &WorkspacePaths) -> WorkspaceResult<WorkspaceSettings> {
    let path = paths.settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        let settings: WorkspaceSettings = toml::from_str(&content)?;
        return Ok(settings);
    }

    let settings = WorkspaceSettings::default();
    save_settings(paths, &settings)?;
    Ok(settings)
}

pub fn save_settings(paths: &WorkspacePaths, settings: &WorkspaceSettings) -> WorkspaceResult<()> {
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(&paths.settings_path(), encoded.as_bytes())
}
