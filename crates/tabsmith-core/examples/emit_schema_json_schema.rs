use schemars::schema_for;
use tabsmith_core::SchemaModel;

fn main() {
    let schema = schema_for!(SchemaModel);
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
