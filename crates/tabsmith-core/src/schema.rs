use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Type identifier given to new fields.
pub const DEFAULT_FIELD_TYPE: &str = "string";

const DEFAULT_TOTAL_COUNT: u64 = 5;
const DEFAULT_VALID_COUNT: u64 = 5;
const DEFAULT_INVALID_COUNT: u64 = 0;

/// Editable schema state for every mode, persisted as one document.
///
/// The three mode states coexist; the mode is picked when a request is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SchemaModel {
    /// Contract version for this document format.
    pub schema_version: String,
    /// Single-table mode state.
    pub single: SingleTableSpec,
    /// Database (multi-table) mode state.
    pub database: DatabaseSpec,
    /// Free-text description for natural-language mode.
    pub description: String,
}

impl Default for SchemaModel {
    fn default() -> Self {
        Self {
            schema_version: crate::SCHEMA_VERSION.to_string(),
            single: SingleTableSpec::default(),
            database: DatabaseSpec::default(),
            description: String::new(),
        }
    }
}

impl SchemaModel {
    /// Decode a saved schema document, rejecting unknown contract versions.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let model: SchemaModel = serde_json::from_str(content)?;
        if model.schema_version != crate::SCHEMA_VERSION {
            return Err(Error::InvalidSchema(format!(
                "unsupported schema_version '{}' (expected '{}')",
                model.schema_version,
                crate::SCHEMA_VERSION
            )));
        }
        Ok(model)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }
}

/// Foreign-key annotation on a field, authoritative only in manual mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldReference {
    pub target_table: String,
    pub target_field: String,
}

impl Default for FieldReference {
    fn default() -> Self {
        Self {
            target_table: String::new(),
            target_field: "id".to_string(),
        }
    }
}

impl FieldReference {
    /// A reference with an empty target table counts as no reference.
    /// Whitespace is kept and sent as typed.
    pub fn is_complete(&self) -> bool {
        !self.target_table.is_empty()
    }
}

/// One column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FieldSpec {
    pub name: String,
    /// Type catalog identifier; unknown identifiers are kept as-is.
    #[serde(rename = "type")]
    pub type_id: String,
    /// Free-text constraint description.
    pub rules: String,
    /// Literal sample value; overrides the generated preview.
    pub example: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<FieldReference>,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            type_id: DEFAULT_FIELD_TYPE.to_string(),
            rules: String::new(),
            example: String::new(),
            reference: None,
        }
    }
}

impl FieldSpec {
    pub fn named(name: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: type_id.into(),
            ..Self::default()
        }
    }

    /// Blank names are dropped when a request is built.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// One table definition in database mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TableSpec {
    pub table_name: String,
    pub total_count: u64,
    pub valid_count: u64,
    pub invalid_count: u64,
    /// Extra context handed to the service's inference step.
    pub additional_context: String,
    /// Ordered; defines the column order of generated rows.
    pub fields: Vec<FieldSpec>,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self {
            table_name: String::new(),
            total_count: DEFAULT_TOTAL_COUNT,
            valid_count: DEFAULT_VALID_COUNT,
            invalid_count: DEFAULT_INVALID_COUNT,
            additional_context: String::new(),
            fields: vec![FieldSpec::default()],
        }
    }
}

impl TableSpec {
    pub fn has_name(&self) -> bool {
        !self.table_name.trim().is_empty()
    }
}

/// Single-table mode state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SingleTableSpec {
    pub fields: Vec<FieldSpec>,
    pub total_count: u64,
    pub valid_count: u64,
    pub invalid_count: u64,
    pub additional_rules: String,
}

impl Default for SingleTableSpec {
    fn default() -> Self {
        Self {
            fields: vec![FieldSpec::default()],
            total_count: DEFAULT_TOTAL_COUNT,
            valid_count: DEFAULT_VALID_COUNT,
            invalid_count: DEFAULT_INVALID_COUNT,
            additional_rules: String::new(),
        }
    }
}

/// Named collection of tables with optional manual references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DatabaseSpec {
    pub name: String,
    /// `true`: the service detects keys and stored references stay dormant.
    pub use_intelligent_mode: bool,
    pub tables: Vec<TableSpec>,
}

impl Default for DatabaseSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            use_intelligent_mode: true,
            tables: vec![TableSpec::default()],
        }
    }
}

impl DatabaseSpec {
    pub fn table(&self, name: &str) -> Option<&TableSpec> {
        self.tables.iter().find(|table| table.table_name == name)
    }
}
