use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tabsmith_core::GenerationMode;

/// Service operation a payload is addressed to.
///
/// Concrete URLs are configuration; the builder only knows the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Generate,
    GenerateDatabase,
    GenerateFromText,
}

/// Request body for one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Payload {
    Single(SingleTablePayload),
    Database(DatabasePayload),
    NaturalLanguage(NaturalLanguagePayload),
}

impl Payload {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Payload::Single(_) => Endpoint::Generate,
            Payload::Database(_) => Endpoint::GenerateDatabase,
            Payload::NaturalLanguage(_) => Endpoint::GenerateFromText,
        }
    }

    /// Mode whose response shape answers this payload.
    pub fn mode(&self) -> GenerationMode {
        match self {
            Payload::Single(_) => GenerationMode::Single,
            Payload::Database(_) => GenerationMode::Database,
            Payload::NaturalLanguage(_) => GenerationMode::NaturalLanguage,
        }
    }
}

/// Single-table request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SingleTablePayload {
    pub schema_fields: Vec<FieldPayload>,
    pub num_records: u64,
    pub correct_num_records: u64,
    pub wrong_num_records: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_rules: Option<String>,
}

/// Multi-table request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DatabasePayload {
    pub db_schema: DatabaseSchemaPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DatabaseSchemaPayload {
    pub db_name: String,
    pub use_intelligent_mode: bool,
    pub tables: Vec<TablePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TablePayload {
    pub table_name: String,
    pub num_records: u64,
    pub correct_num_records: u64,
    pub wrong_num_records: u64,
    /// Context for the service's inference step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
    pub fields: Vec<FieldPayload>,
}

/// One column as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Manual-mode foreign key; absent whenever it must not be trusted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ReferencePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReferencePayload {
    pub table: String,
    pub field: String,
}

/// Natural-language request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NaturalLanguagePayload {
    pub user_text: String,
}
