mod catalog;
mod export;
mod generate;
mod payload;
mod schema;

pub use catalog::{PreviewArgs, TypesArgs, run_preview, run_types};
pub use export::{ExportArgs, run_export};
pub use generate::{GenerateArgs, run_generate, run_health};
pub use payload::{BuildArgs, CheckPayloadArgs, run_build, run_check_payload};
pub use schema::{SchemaCommand, run_schema};

use std::path::Path;

use clap::ValueEnum;
use tabsmith_client::ServiceOptions;
use tabsmith_core::{GenerationMode, SchemaModel};
use tabsmith_request::ValidationReport;

use crate::workspace::{WorkspacePaths, WorkspaceSettings, load_or_create_settings, write_bytes_atomic};
use crate::{CliError, GlobalArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Single,
    Database,
    Natural,
}

impl From<ModeArg> for GenerationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Single => GenerationMode::Single,
            ModeArg::Database => GenerationMode::Database,
            ModeArg::Natural => GenerationMode::NaturalLanguage,
        }
    }
}

fn load_schema(path: &Path) -> Result<SchemaModel, CliError> {
    let content = std::fs::read_to_string(path)?;
    Ok(SchemaModel::from_json_str(&content)?)
}

fn save_schema(path: &Path, model: &SchemaModel) -> Result<(), CliError> {
    let content = model.to_json_string()?;
    write_bytes_atomic(path, content.as_bytes())?;
    Ok(())
}

/// Accept a table name, or an index when no table has that name.
fn resolve_table(model: &SchemaModel, table: &str) -> Result<usize, CliError> {
    if let Some(index) = model.table_index(table) {
        return Ok(index);
    }
    table
        .parse::<usize>()
        .map_err(|_| CliError::InvalidArgs(format!("no table named '{table}'")))
}

/// Workspace paths and settings, with command-line overrides applied.
fn load_workspace(global: &GlobalArgs) -> Result<(WorkspacePaths, WorkspaceSettings), CliError> {
    let paths = WorkspacePaths::new(global.workspace.clone());
    paths.ensure_dirs()?;
    let mut settings = load_or_create_settings(&paths)?;
    if let Some(url) = &global.service_url {
        settings.service.base_url = url.clone();
    }
    Ok((paths, settings))
}

fn service_options(global: &GlobalArgs) -> Result<ServiceOptions, CliError> {
    let (_, settings) = load_workspace(global)?;
    Ok(settings.service)
}

fn print_report(report: &ValidationReport) {
    for issue in &report.errors {
        eprintln!("error {} {}: {}", issue.code, issue.path, issue.message);
        if let Some(hint) = &issue.hint {
            eprintln!("  hint: {hint}");
        }
    }
    for issue in &report.warnings {
        eprintln!("warning {} {}: {}", issue.code, issue.path, issue.message);
        if let Some(hint) = &issue.hint {
            eprintln!("  hint: {hint}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_resolve_by_index_or_name() {
        let mut model = SchemaModel::default();
        model.database.tables[0].table_name = "customers".to_string();
        assert_eq!(resolve_table(&model, "0").unwrap(), 0);
        assert_eq!(resolve_table(&model, "customers").unwrap(), 0);
        assert!(matches!(
            resolve_table(&model, "orders"),
            Err(CliError::InvalidArgs(_))
        ));
    }

    #[test]
    fn numeric_table_names_win_over_indices() {
        let mut model = SchemaModel::default();
        model.add_table();
        model.database.tables[0].table_name = "sales".to_string();
        model.database.tables[1].table_name = "0".to_string();
        assert_eq!(resolve_table(&model, "0").unwrap(), 1);
        assert_eq!(resolve_table(&model, "1").unwrap(), 1);
        assert_eq!(resolve_table(&model, "sales").unwrap(), 0);
    }

    #[test]
    fn schema_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        let mut model = SchemaModel::default();
        model.description = "A bakery with orders".to_string();
        save_schema(&path, &model).unwrap();
        assert_eq!(load_schema(&path).unwrap(), model);
    }
}
