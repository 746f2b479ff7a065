use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tabsmith_catalog::TypeCatalog;
use tabsmith_client::{GenerationService, HttpGenerationService, RequestState, Session};
use tabsmith_core::SCHEMA_VERSION;
use tabsmith_request::lint_payload;
use uuid::Uuid;

use super::export::all_downloads;
use super::{ModeArg, load_schema, load_workspace, print_report, service_options};
use crate::registry::{
    RunContext, init_run_logging, start_run, write_download, write_payload, write_response,
};
use crate::{CliError, GlobalArgs};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Schema document.
    file: PathBuf,
    #[arg(long, value_enum)]
    mode: ModeArg,
}

pub async fn run_generate(global: &GlobalArgs, args: GenerateArgs) -> Result<(), CliError> {
    let (paths, settings) = load_workspace(global)?;
    let model = load_schema(&args.file)?;
    let mut session = Session::new(model);

    let pending = session.begin(args.mode.into())?;
    let lint = lint_payload(&pending.payload, TypeCatalog::builtin());
    print_report(&lint);

    let service = HttpGenerationService::new(settings.service)?;
    let endpoint = service.options().url_for(pending.payload.endpoint());

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        mode: pending.mode,
        endpoint: endpoint.clone(),
        schema_version: SCHEMA_VERSION.to_string(),
        schema_file: args.file.clone(),
        runs_dir: paths.runs_dir.clone(),
    };
    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        mode = pending.mode.as_str(),
        endpoint = %endpoint
    );
    for warning in &lint.warnings {
        tracing::warn!(event = "payload_warning", code = %warning.code, path = %warning.path);
    }

    write_payload(&run_paths, &pending.payload)?;
    tracing::info!(event = "payload_written", path = %run_paths.payload_path.display());

    let timer = Instant::now();
    let outcome = service.generate(&pending.payload).await;
    session.complete(pending.ticket, outcome)?;
    let duration_ms = timer.elapsed().as_millis();

    if let RequestState::Failed { message, .. } = session.state() {
        tracing::info!(event = "run_finished", status = "failure", duration_ms = duration_ms);
        eprintln!("run directory: {}", run_paths.root.display());
        return Err(CliError::Generation(message.clone()));
    }

    if let Some(response) = session.store().result() {
        write_response(&run_paths, response)?;
        tracing::info!(event = "response_written", path = %run_paths.response_path.display());
        println!("{} record(s) generated", response.total_records());
    }

    if let Some(result) = session.store().database() {
        if !result.generation_order.is_empty() {
            println!("generation order: {}", result.generation_order.join(" -> "));
        }
        for (table, rows) in &result.tables {
            match result.counts_by_table.get(table) {
                Some(counts) => println!(
                    "  {table}: {} rows ({} valid, {} invalid)",
                    rows.len(),
                    counts.valid,
                    counts.invalid
                ),
                None => println!("  {table}: {} rows", rows.len()),
            }
        }
    }

    for download in all_downloads(session.store())? {
        let path = write_download(&run_paths, &download)?;
        tracing::info!(event = "export_written", path = %path.display());
    }

    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);
    println!("run directory: {}", run_paths.root.display());
    Ok(())
}

pub async fn run_health(global: &GlobalArgs) -> Result<(), CliError> {
    let options = service_options(global)?;
    let url = options.health_url();
    let service = HttpGenerationService::new(options)?;
    let health = service.health().await?;

    println!("{url}: {}", health.status);
    for (key, value) in &health.details {
        println!("  {key}: {value}");
    }

    if health.is_healthy() {
        Ok(())
    } else {
        Err(CliError::Unhealthy(health.status))
    }
}
