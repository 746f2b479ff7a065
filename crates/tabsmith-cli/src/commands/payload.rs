use std::path::PathBuf;

use clap::Args;
use serde_json::Value;
use tabsmith_catalog::TypeCatalog;
use tabsmith_request::{Payload, build, lint_payload, validate_payload_json};

use super::{ModeArg, load_schema, print_report};
use crate::CliError;
use crate::workspace::write_json_atomic;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Schema document.
    file: PathBuf,
    #[arg(long, value_enum)]
    mode: ModeArg,
    /// Write the payload here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckPayloadArgs {
    /// Payload document, e.g. a run's payload.json.
    file: PathBuf,
}

pub fn run_build(args: BuildArgs) -> Result<(), CliError> {
    let model = load_schema(&args.file)?;
    let payload = build(args.mode.into(), &model);
    print_report(&lint_payload(&payload, TypeCatalog::builtin()));

    match args.out {
        Some(out) => {
            write_json_atomic(&out, &payload)?;
            println!("payload written to {}", out.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&payload)?),
    }
    Ok(())
}

pub fn run_check_payload(args: CheckPayloadArgs) -> Result<(), CliError> {
    let content = std::fs::read_to_string(&args.file)?;
    let document: Value = serde_json::from_str(&content)?;

    let report = validate_payload_json(&document)?;
    print_report(&report);
    if !report.is_ok() {
        return Err(CliError::Rejected(format!(
            "{} does not match the payload schema",
            args.file.display()
        )));
    }

    let payload: Payload = serde_json::from_value(document)?;
    print_report(&lint_payload(&payload, TypeCatalog::builtin()));
    println!("payload ok ({:?} endpoint)", payload.endpoint());
    Ok(())
}
