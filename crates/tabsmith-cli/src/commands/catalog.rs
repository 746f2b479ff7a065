use clap::Args;
use tabsmith_catalog::{TypeCatalog, preview, preview_with_rng};

use crate::CliError;

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Only list types in this category (`All` lists everything).
    #[arg(long)]
    category: Option<String>,
    /// Case-insensitive text to look for in name, description and category.
    #[arg(long, default_value = "")]
    search: String,
    /// List categories with their type counts instead of types.
    #[arg(long, default_value_t = false)]
    categories: bool,
    /// Print descriptors as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Type identifier or display name.
    type_id: String,
    /// Number of samples to print.
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// Skip the catalog example and use the built-in generator.
    #[arg(long, default_value_t = false)]
    generated: bool,
}

pub fn run_types(args: TypesArgs) -> Result<(), CliError> {
    let catalog = TypeCatalog::builtin();

    if args.categories {
        for (category, count) in catalog.categories() {
            println!("{category:<16} {count}");
        }
        return Ok(());
    }

    let found = catalog.search(&args.search, args.category.as_deref());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    for descriptor in &found {
        println!(
            "{:<24} {:<14} {}",
            descriptor.id, descriptor.category, descriptor.example
        );
    }
    tracing::debug!(event = "types_listed", count = found.len());
    Ok(())
}

pub fn run_preview(args: PreviewArgs) -> Result<(), CliError> {
    let bare = TypeCatalog::default();
    let mut rng = rand::rng();
    for _ in 0..args.count.max(1) {
        let value = if args.generated {
            preview_with_rng(&bare, &args.type_id, &mut rng)
        } else {
            preview(&args.type_id)
        };
        println!("{value}");
    }
    Ok(())
}
