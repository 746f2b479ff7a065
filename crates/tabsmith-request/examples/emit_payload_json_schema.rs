use tabsmith_request::payload_json_schema;

fn main() {
    let schema = payload_json_schema();
    let json = serde_json::to_string_pretty(&schema).expect("serialize payload json schema");
    println!("{json}");
}
