use serde_json::json;
use tabsmith_core::{FieldReference, FieldSpec, GenerationMode, SchemaModel, TableSpec};
use tabsmith_request::{Endpoint, Payload, build, validate_payload_json};

fn library_model() -> SchemaModel {
    let mut book_id = FieldSpec::named("book_id", "integer");
    book_id.reference = Some(FieldReference {
        target_table: "books".to_string(),
        target_field: "id".to_string(),
    });

    let mut model = SchemaModel::default();
    model.single.fields = vec![FieldSpec::named("id", "uuid"), FieldSpec::named("email", "email")];
    model.database.name = "library".to_string();
    model.database.use_intelligent_mode = false;
    model.database.tables = vec![
        TableSpec {
            table_name: "books".to_string(),
            fields: vec![FieldSpec::named("id", "integer"), FieldSpec::named("title", "string")],
            ..TableSpec::default()
        },
        TableSpec {
            table_name: "loans".to_string(),
            additional_context: "loans last two weeks".to_string(),
            fields: vec![FieldSpec::named("id", "integer"), book_id],
            ..TableSpec::default()
        },
    ];
    model.description = "A library with books, members and loans".to_string();
    model
}

#[test]
fn built_payloads_satisfy_the_payload_schema() {
    let model = library_model();
    for mode in [
        GenerationMode::Single,
        GenerationMode::Database,
        GenerationMode::NaturalLanguage,
    ] {
        let payload = serde_json::to_value(build(mode, &model)).expect("serialize payload");
        let report = validate_payload_json(&payload).expect("compile payload schema");
        assert!(report.errors.is_empty(), "{mode:?}: {:?}", report.errors);
    }
}

#[test]
fn malformed_documents_are_reported() {
    let report = validate_payload_json(&json!({"schema_fields": "id"})).expect("compile");
    assert!(!report.errors.is_empty());

    let report = validate_payload_json(&json!({"db_schema": {"db_name": "x"}})).expect("compile");
    assert!(!report.errors.is_empty());
}

#[test]
fn payload_kinds_map_to_endpoints() {
    let model = library_model();
    assert_eq!(build(GenerationMode::Single, &model).endpoint(), Endpoint::Generate);
    assert_eq!(
        build(GenerationMode::Database, &model).endpoint(),
        Endpoint::GenerateDatabase
    );
    assert_eq!(
        build(GenerationMode::NaturalLanguage, &model).endpoint(),
        Endpoint::GenerateFromText
    );
}

#[test]
fn saved_payload_round_trips_through_serde() {
    let payload = build(GenerationMode::Database, &library_model());
    let text = serde_json::to_string(&payload).expect("serialize");
    let decoded: Payload = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(decoded, payload);
    assert_eq!(decoded.mode(), GenerationMode::Database);
}
