use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use tabsmith_catalog::TypeCatalog;
use tabsmith_core::{
    DatabaseProperty, FieldProperty, FieldScope, GenerationMode, ReferenceProperty, SchemaModel,
    SingleProperty, TableProperty, build_reference_graph, check_database, check_single,
};
use tabsmith_request::{build, check_description, lint_payload};

use super::{load_schema, print_report, resolve_table, save_schema};
use crate::CliError;

#[derive(Subcommand, Debug)]
pub enum SchemaCommand {
    /// Write a new schema document with default content.
    New {
        file: PathBuf,
        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the schema document with field previews.
    Show { file: PathBuf },
    /// Report advisory issues: duplicates, count mismatches, dangling references.
    Check { file: PathBuf },
    /// Print the generation order implied by manual references.
    Graph { file: PathBuf },
    AddField(ScopeArgs),
    RemoveField(FieldArgs),
    SetField(SetFieldArgs),
    /// Set a field type and fill example and rules from the catalog.
    ApplyType {
        #[command(flatten)]
        field: FieldArgs,
        type_id: String,
    },
    AddTable { file: PathBuf },
    RemoveTable { file: PathBuf, table: String },
    SetTable(SetTableArgs),
    /// Edit the single-table counts and rules.
    SetSingle(SetSingleArgs),
    /// Edit the database name and key-detection mode.
    SetDb(SetDbArgs),
    /// Add or clear the reference on a field (manual mode only).
    ToggleRef {
        file: PathBuf,
        table: String,
        field: usize,
    },
    /// Edit an existing reference (manual mode only).
    SetRef(SetRefArgs),
    /// Set the natural-language description.
    Describe { file: PathBuf, text: String },
}

#[derive(Args, Debug)]
pub struct ScopeArgs {
    file: PathBuf,
    /// Table index or name; the single-table fields when omitted.
    #[arg(long)]
    table: Option<String>,
}

#[derive(Args, Debug)]
pub struct FieldArgs {
    #[command(flatten)]
    scope: ScopeArgs,
    index: usize,
}

#[derive(Args, Debug)]
pub struct SetFieldArgs {
    #[command(flatten)]
    field: FieldArgs,
    #[arg(long)]
    name: Option<String>,
    #[arg(long = "type")]
    type_id: Option<String>,
    #[arg(long)]
    rules: Option<String>,
    #[arg(long)]
    example: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetTableArgs {
    file: PathBuf,
    table: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    total: Option<u64>,
    #[arg(long)]
    valid: Option<u64>,
    #[arg(long)]
    invalid: Option<u64>,
    #[arg(long)]
    context: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetSingleArgs {
    file: PathBuf,
    #[arg(long)]
    total: Option<u64>,
    #[arg(long)]
    valid: Option<u64>,
    #[arg(long)]
    invalid: Option<u64>,
    #[arg(long)]
    rules: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetDbArgs {
    file: PathBuf,
    #[arg(long)]
    name: Option<String>,
    /// `true`: the service detects keys; `false`: references are authoritative.
    #[arg(long)]
    intelligent: Option<bool>,
}

#[derive(Args, Debug)]
pub struct SetRefArgs {
    file: PathBuf,
    table: String,
    field: usize,
    #[arg(long)]
    target_table: Option<String>,
    #[arg(long)]
    target_field: Option<String>,
}

pub fn run_schema(command: SchemaCommand) -> Result<(), CliError> {
    match command {
        SchemaCommand::New { file, force } => {
            if file.exists() && !force {
                return Err(CliError::InvalidArgs(format!(
                    "{} already exists (use --force to overwrite)",
                    file.display()
                )));
            }
            save_schema(&file, &SchemaModel::default())?;
            println!("created {}", file.display());
            Ok(())
        }
        SchemaCommand::Show { file } => show(&load_schema(&file)?),
        SchemaCommand::Check { file } => check(&load_schema(&file)?),
        SchemaCommand::Graph { file } => graph(&load_schema(&file)?),
        SchemaCommand::AddField(scope) => edit(&scope.file, |model| {
            let scope = field_scope(model, &scope)?;
            Ok(model.add_field(scope))
        }),
        SchemaCommand::RemoveField(field) => edit(&field.scope.file, |model| {
            let scope = field_scope(model, &field.scope)?;
            Ok(model.remove_field(scope, field.index))
        }),
        SchemaCommand::SetField(args) => edit(&args.field.scope.file, |model| {
            let scope = field_scope(model, &args.field.scope)?;
            let properties = [
                args.name.clone().map(FieldProperty::Name),
                args.type_id.clone().map(FieldProperty::Type),
                args.rules.clone().map(FieldProperty::Rules),
                args.example.clone().map(FieldProperty::Example),
            ];
            apply_all(properties, |property| {
                model.set_field_property(scope, args.field.index, property)
            })
        }),
        SchemaCommand::ApplyType { field, type_id } => edit(&field.scope.file, |model| {
            let scope = field_scope(model, &field.scope)?;
            Ok(model.apply_catalog_type(scope, field.index, &type_id, TypeCatalog::builtin()))
        }),
        SchemaCommand::AddTable { file } => edit(&file, |model| {
            model.add_table();
            Ok(true)
        }),
        SchemaCommand::RemoveTable { file, table } => edit(&file, |model| {
            let index = resolve_table(model, &table)?;
            Ok(model.remove_table(index))
        }),
        SchemaCommand::SetTable(args) => edit(&args.file, |model| {
            let index = resolve_table(model, &args.table)?;
            let properties = [
                args.name.clone().map(TableProperty::Name),
                args.total.map(TableProperty::TotalCount),
                args.valid.map(TableProperty::ValidCount),
                args.invalid.map(TableProperty::InvalidCount),
                args.context.clone().map(TableProperty::AdditionalContext),
            ];
            apply_all(properties, |property| model.set_table_property(index, property))
        }),
        SchemaCommand::SetSingle(args) => edit(&args.file, |model| {
            let properties = [
                args.total.map(SingleProperty::TotalCount),
                args.valid.map(SingleProperty::ValidCount),
                args.invalid.map(SingleProperty::InvalidCount),
                args.rules.clone().map(SingleProperty::AdditionalRules),
            ];
            apply_all(properties, |property| {
                model.set_single_property(property);
                true
            })
        }),
        SchemaCommand::SetDb(args) => edit(&args.file, |model| {
            let properties = [
                args.name.clone().map(DatabaseProperty::Name),
                args.intelligent.map(DatabaseProperty::IntelligentMode),
            ];
            apply_all(properties, |property| {
                model.set_database_property(property);
                true
            })
        }),
        SchemaCommand::ToggleRef { file, table, field } => edit(&file, |model| {
            let index = resolve_table(model, &table)?;
            Ok(model.toggle_reference(index, field))
        }),
        SchemaCommand::SetRef(args) => edit(&args.file, |model| {
            let index = resolve_table(model, &args.table)?;
            let properties = [
                args.target_table.clone().map(ReferenceProperty::TargetTable),
                args.target_field.clone().map(ReferenceProperty::TargetField),
            ];
            apply_all(properties, |property| {
                model.set_reference_property(index, args.field, property)
            })
        }),
        SchemaCommand::Describe { file, text } => edit(&file, |model| {
            model.set_description(text.clone());
            Ok(true)
        }),
    }
}

/// Load, apply `change`, and save only when the change was accepted.
fn edit<F>(file: &Path, change: F) -> Result<(), CliError>
where
    F: FnOnce(&mut SchemaModel) -> Result<bool, CliError>,
{
    let mut model = load_schema(file)?;
    if !change(&mut model)? {
        return Err(CliError::Rejected(
            "index out of range, or the edit is not allowed in this mode".to_string(),
        ));
    }
    save_schema(file, &model)?;
    tracing::info!(event = "schema_updated", file = %file.display());
    Ok(())
}

/// Apply every given property; no properties at all is an argument error.
fn apply_all<P, const N: usize>(
    properties: [Option<P>; N],
    mut apply: impl FnMut(P) -> bool,
) -> Result<bool, CliError> {
    let mut any = false;
    for property in properties.into_iter().flatten() {
        any = true;
        if !apply(property) {
            return Ok(false);
        }
    }
    if any {
        Ok(true)
    } else {
        Err(CliError::InvalidArgs("nothing to change".to_string()))
    }
}

fn field_scope(model: &SchemaModel, scope: &ScopeArgs) -> Result<FieldScope, CliError> {
    match &scope.table {
        None => Ok(FieldScope::Single),
        Some(table) => Ok(FieldScope::Table(resolve_table(model, table)?)),
    }
}

fn show(model: &SchemaModel) -> Result<(), CliError> {
    println!(
        "single table ({} records, {} valid, {} invalid)",
        model.single.total_count, model.single.valid_count, model.single.invalid_count
    );
    for (idx, field) in model.single.fields.iter().enumerate() {
        println!("  [{idx}] {:<20} {:<16} {}", field.name, field.type_id, field.preview());
    }

    let mode = if model.database.use_intelligent_mode {
        "intelligent"
    } else {
        "manual"
    };
    println!("database '{}' ({mode} keys)", model.database.name);
    for (table_idx, table) in model.database.tables.iter().enumerate() {
        println!(
            "  [{table_idx}] {} ({} records, {} valid, {} invalid)",
            table.table_name, table.total_count, table.valid_count, table.invalid_count
        );
        for (idx, field) in table.fields.iter().enumerate() {
            let reference = field
                .reference
                .as_ref()
                .map(|r| format!(" -> {}.{}", r.target_table, r.target_field))
                .unwrap_or_default();
            println!(
                "      [{idx}] {:<20} {:<16} {}{reference}",
                field.name,
                field.type_id,
                field.preview()
            );
        }
    }

    if !model.description.is_empty() {
        println!("description: {}", model.description);
    }
    Ok(())
}

fn check(model: &SchemaModel) -> Result<(), CliError> {
    let mut issues = check_single(&model.single);
    issues.merge(check_database(&model.database));
    for issue in &issues.issues {
        eprintln!("warning {} {}: {}", issue.code, issue.path, issue.message);
    }

    let catalog = TypeCatalog::builtin();
    for mode in [GenerationMode::Single, GenerationMode::Database] {
        print_report(&lint_payload(&build(mode, model), catalog));
    }
    if !model.description.trim().is_empty() {
        print_report(&check_description(&model.description));
    }

    if issues.is_clean() {
        println!("schema ok");
    }
    Ok(())
}

fn graph(model: &SchemaModel) -> Result<(), CliError> {
    let report = build_reference_graph(&model.database);
    println!(
        "{} table(s), {} reference edge(s)",
        report.summary.tables, report.summary.edges
    );
    match (&report.order, &report.cycle) {
        (Some(order), _) => println!("order: {}", order.join(" -> ")),
        (None, Some(cycle)) => println!("cycle between: {}", cycle.join(", ")),
        (None, None) => {}
    }
    Ok(())
}
