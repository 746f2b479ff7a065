use tabsmith_core::{DatabaseSpec, FieldSpec, GenerationMode, SchemaModel, SingleTableSpec, TableSpec};

use crate::model::{
    DatabasePayload, DatabaseSchemaPayload, FieldPayload, NaturalLanguagePayload, Payload,
    ReferencePayload, SingleTablePayload, TablePayload,
};

/// Database name sent when the schema leaves it blank.
pub const DEFAULT_DATABASE_NAME: &str = "my_database";

/// Build the request payload for `mode` from the current schema state.
///
/// The result is a snapshot: later edits to `model` never reach it, and
/// building twice from the same model yields equal payloads.
pub fn build(mode: GenerationMode, model: &SchemaModel) -> Payload {
    match mode {
        GenerationMode::Single => Payload::Single(build_single(&model.single)),
        GenerationMode::Database => Payload::Database(build_database(&model.database)),
        GenerationMode::NaturalLanguage => {
            Payload::NaturalLanguage(build_natural_language(&model.description))
        }
    }
}

/// Single-table payload. Fields with a blank name are dropped; an empty field
/// list is forwarded as-is.
pub fn build_single(single: &SingleTableSpec) -> SingleTablePayload {
    SingleTablePayload {
        schema_fields: single
            .fields
            .iter()
            .filter(|field| field.has_name())
            .map(|field| field_payload(field, None))
            .collect(),
        num_records: single.total_count,
        correct_num_records: single.valid_count,
        wrong_num_records: single.invalid_count,
        additional_rules: non_empty(&single.additional_rules),
    }
}

/// Multi-table payload.
///
/// Blank tables are dropped with their fields, blank fields are dropped from
/// the tables that remain. References are sent only in manual mode and only
/// when they name a target table.
pub fn build_database(database: &DatabaseSpec) -> DatabasePayload {
    let db_name = if database.name.trim().is_empty() {
        DEFAULT_DATABASE_NAME.to_string()
    } else {
        database.name.clone()
    };

    DatabasePayload {
        db_schema: DatabaseSchemaPayload {
            db_name,
            use_intelligent_mode: database.use_intelligent_mode,
            tables: database
                .tables
                .iter()
                .filter(|table| table.has_name())
                .map(|table| table_payload(table, database.use_intelligent_mode))
                .collect(),
        },
    }
}

/// Natural-language payload. The text is sent untouched; callers check it
/// with [`crate::check_description`] first.
pub fn build_natural_language(description: &str) -> NaturalLanguagePayload {
    NaturalLanguagePayload {
        user_text: description.to_string(),
    }
}

fn table_payload(table: &TableSpec, intelligent: bool) -> TablePayload {
    TablePayload {
        table_name: table.table_name.clone(),
        num_records: table.total_count,
        correct_num_records: table.valid_count,
        wrong_num_records: table.invalid_count,
        additional_context: non_empty(&table.additional_context),
        fields: table
            .fields
            .iter()
            .filter(|field| field.has_name())
            .map(|field| {
                let references = if intelligent {
                    None
                } else {
                    field
                        .reference
                        .as_ref()
                        .filter(|reference| reference.is_complete())
                        .map(|reference| ReferencePayload {
                            table: reference.target_table.clone(),
                            field: reference.target_field.clone(),
                        })
                };
                field_payload(field, references)
            })
            .collect(),
    }
}

fn field_payload(field: &FieldSpec, references: Option<ReferencePayload>) -> FieldPayload {
    FieldPayload {
        name: field.name.clone(),
        type_id: field.type_id.clone(),
        rules: non_empty(&field.rules),
        example: non_empty(&field.example),
        references,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
