use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tabsmith_client::ResultStore;
use tabsmith_core::{GenerationResponse, Row};
use tabsmith_export::{Download, database_workbook, single_table_csv, table_csv, to_delimited_text};

use super::{ModeArg, load_workspace};
use crate::workspace::write_bytes_atomic;
use crate::{CliError, GlobalArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Saved response document, e.g. a run's response.json.
    file: PathBuf,
    /// Mode the response was generated with.
    #[arg(long, value_enum)]
    mode: ModeArg,
    #[arg(long, value_enum, default_value = "csv")]
    format: FormatArg,
    /// Table to export as CSV; the first table when omitted.
    #[arg(long, conflicts_with = "all_tables")]
    table: Option<String>,
    /// Export every table as its own CSV file.
    #[arg(long, default_value_t = false)]
    all_tables: bool,
    /// Print the CSV text instead of writing files.
    #[arg(long, default_value_t = false)]
    stdout: bool,
    /// Output directory; settings `[export].out_dir` or the workspace `out/` by default.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

pub fn run_export(global: &GlobalArgs, args: ExportArgs) -> Result<(), CliError> {
    let content = std::fs::read_to_string(&args.file)?;
    let mut store = ResultStore::new();
    store.absorb(GenerationResponse::decode_str(args.mode.into(), &content)?);

    if let Some(table) = &args.table
        && !store.select_table(table)
    {
        return Err(CliError::InvalidArgs(format!(
            "response has no table named '{table}'"
        )));
    }

    if args.stdout {
        let rows = shown_rows(&store).unwrap_or_default();
        println!("{}", to_delimited_text(rows)?);
        return Ok(());
    }

    let downloads: Vec<Download> = match (args.format, store.records()) {
        (FormatArg::Csv, Some(records)) => single_table_csv(records)?.into_iter().collect(),
        (FormatArg::Xlsx, Some(_)) => {
            return Err(CliError::InvalidArgs(
                "single-table results export to csv only".to_string(),
            ));
        }
        (FormatArg::Csv, None) if args.all_tables => table_downloads(&store)?,
        (FormatArg::Csv, None) => match (store.selected_table(), store.selected_rows()) {
            (Some(name), Some(rows)) => table_csv(name, rows)?.into_iter().collect(),
            _ => Vec::new(),
        },
        (FormatArg::Xlsx, None) => match store.database() {
            Some(result) => database_workbook(&result.tables)?.into_iter().collect(),
            None => Vec::new(),
        },
    };

    if downloads.is_empty() {
        println!("nothing to export");
        return Ok(());
    }

    let out_dir = match args.out_dir {
        Some(dir) => dir,
        None => {
            let (paths, settings) = load_workspace(global)?;
            settings.export_dir(&paths)
        }
    };
    for download in &downloads {
        let path = out_dir.join(&download.filename);
        write_bytes_atomic(&path, &download.bytes)?;
        tracing::info!(event = "export_written", path = %path.display(), bytes = download.bytes.len());
        println!("{}", path.display());
    }
    Ok(())
}

/// Every download a result offers: the single-table CSV, or one CSV per
/// table plus the workbook.
pub fn all_downloads(store: &ResultStore) -> Result<Vec<Download>, CliError> {
    if let Some(records) = store.records() {
        return Ok(single_table_csv(records)?.into_iter().collect());
    }
    let mut downloads = table_downloads(store)?;
    if let Some(result) = store.database() {
        downloads.extend(database_workbook(&result.tables)?);
    }
    Ok(downloads)
}

fn table_downloads(store: &ResultStore) -> Result<Vec<Download>, CliError> {
    let Some(result) = store.database() else {
        return Ok(Vec::new());
    };
    let mut downloads = Vec::new();
    for (name, rows) in &result.tables {
        downloads.extend(table_csv(name, rows)?);
    }
    Ok(downloads)
}

fn shown_rows(store: &ResultStore) -> Option<&[Row]> {
    store.records().or_else(|| store.selected_rows())
}
