mod commands;
mod registry;
mod workspace;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tabsmith_client::{ServiceError, SessionError};
use tabsmith_export::ExportError;
use tabsmith_request::RequestError;
use thiserror::Error;

use commands::{
    BuildArgs, CheckPayloadArgs, ExportArgs, GenerateArgs, PreviewArgs, SchemaCommand, TypesArgs,
};
use registry::init_stderr_logging;
use workspace::{WorkspacePaths, load_or_create_settings};

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("workspace error: {0}")]
    Workspace(#[from] workspace::WorkspaceError),
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("schema error: {0}")]
    Core(#[from] tabsmith_core::Error),
    #[error("payload error: {0}")]
    Request(#[from] RequestError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("doctor found {0} error(s)")]
    Doctor(usize),
    #[error("service unhealthy: {0}")]
    Unhealthy(String),
}

#[derive(Parser, Debug)]
#[command(name = "tabsmith", version, about = "Compose table schemas and generate test data")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct GlobalArgs {
    /// Workspace directory holding settings, runs and exports.
    #[arg(long, global = true, default_value = ".tabsmith")]
    pub(crate) workspace: PathBuf,
    /// Generation service base URL; overrides settings.toml.
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) service_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the workspace layout and default settings.
    Init,
    /// Check the workspace and settings for problems.
    Doctor,
    /// List known field types.
    Types(TypesArgs),
    /// Show a sample value for a field type.
    Preview(PreviewArgs),
    /// Create and edit schema documents.
    #[command(subcommand)]
    Schema(SchemaCommand),
    /// Build the request payload for a schema without sending it.
    Build(BuildArgs),
    /// Check a payload document against the payload JSON Schema.
    CheckPayload(CheckPayloadArgs),
    /// Send a schema to the generation service and record the run.
    Generate(GenerateArgs),
    /// Convert a saved response into CSV or XLSX files.
    Export(ExportArgs),
    /// Ask the generation service whether it is up.
    Health,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    // generate logs into its run directory instead
    if !matches!(cli.command, Command::Generate(_)) {
        init_stderr_logging()?;
    }

    match cli.command {
        Command::Init => run_init(&cli.global),
        Command::Doctor => run_doctor(&cli.global),
        Command::Types(args) => commands::run_types(args),
        Command::Preview(args) => commands::run_preview(args),
        Command::Schema(command) => commands::run_schema(command),
        Command::Build(args) => commands::run_build(args),
        Command::CheckPayload(args) => commands::run_check_payload(args),
        Command::Generate(args) => commands::run_generate(&cli.global, args).await,
        Command::Export(args) => commands::run_export(&cli.global, args),
        Command::Health => commands::run_health(&cli.global).await,
    }
}

fn run_init(global: &GlobalArgs) -> Result<(), CliError> {
    let paths = WorkspacePaths::new(global.workspace.clone());
    paths.ensure_dirs()?;
    load_or_create_settings(&paths)?;
    tracing::info!(event = "workspace_initialized", root = %paths.root.display());
    println!("workspace ready at {}", paths.root.display());
    println!("settings: {}", paths.settings_path().display());
    Ok(())
}

fn run_doctor(global: &GlobalArgs) -> Result<(), CliError> {
    let paths = WorkspacePaths::new(global.workspace.clone());
    let settings = if paths.settings_path().exists() {
        load_or_create_settings(&paths)?
    } else {
        workspace::WorkspaceSettings::default()
    };

    let report = workspace::run_doctor(&paths, &settings)?;
    for issue in &report.issues {
        let level = match issue.level {
            workspace::DoctorLevel::Error => "error",
            workspace::DoctorLevel::Warning => "warning",
        };
        println!("{level}: {}", issue.message);
        if let Some(hint) = &issue.hint {
            println!("  hint: {hint}");
        }
    }

    match report.error_count() {
        0 => {
            println!("workspace ok ({} warning(s))", report.issues.len());
            Ok(())
        }
        errors => Err(CliError::Doctor(errors)),
    }
}
