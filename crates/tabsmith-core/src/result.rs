use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::GenerationMode;

/// One generated row; key order is preserved as received.
pub type Row = serde_json::Map<String, Value>;

/// Single-table response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(rename = "data")]
    pub records: Vec<Row>,
    #[serde(default)]
    pub count: u64,
}

/// Per-table valid/invalid breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableCounts {
    pub total: u64,
    pub valid: u64,
    pub invalid: u64,
}

/// Database and natural-language response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseResult {
    #[serde(rename = "db_name", alias = "database_name")]
    pub database_name: String,
    /// Dependency order the service used, for display only.
    pub generation_order: Vec<String>,
    /// Rows by table, in the order the service sent them.
    pub tables: IndexMap<String, Vec<Row>>,
    #[serde(rename = "counts")]
    pub counts_by_table: IndexMap<String, TableCounts>,
    pub total_records: u64,
    pub total_tables: u64,
}

impl DatabaseResult {
    pub fn first_table(&self) -> Option<&str> {
        self.tables.keys().next().map(String::as_str)
    }
}

/// Decoded success body of a generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationResponse {
    Single(GenerationResult),
    Database(DatabaseResult),
}

impl GenerationResponse {
    /// Decode a response body using the shape implied by the request mode.
    pub fn decode(mode: GenerationMode, body: Value) -> Result<Self> {
        if !body.is_object() {
            return Err(Error::InvalidResponse(format!(
                "expected a JSON object for {} mode",
                mode.as_str()
            )));
        }
        match mode {
            GenerationMode::Single => {
                if body.get("data").is_none() {
                    return Err(Error::InvalidResponse(
                        "single-table response is missing 'data'".to_string(),
                    ));
                }
                Ok(GenerationResponse::Single(serde_json::from_value(body)?))
            }
            GenerationMode::Database | GenerationMode::NaturalLanguage => {
                Ok(GenerationResponse::Database(serde_json::from_value(body)?))
            }
        }
    }

    pub fn decode_str(mode: GenerationMode, body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::decode(mode, value)
    }

    pub fn total_records(&self) -> u64 {
        match self {
            GenerationResponse::Single(result) => result.count,
            GenerationResponse::Database(result) => result.total_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn database_body_keeps_table_and_key_order() {
        let body = json!({
            "db_name": "school",
            "generation_order": ["students", "grades"],
            "tables": {
                "students": [{"zeta": 1, "alpha": "x", "is_valid": true}],
                "grades": [{"student_id": 1, "score": 9.5}]
            },
            "counts": {"students": {"total": 1, "valid": 1, "invalid": 0}},
            "total_records": 2,
            "total_tables": 2
        });

        let GenerationResponse::Database(result) =
            GenerationResponse::decode(GenerationMode::Database, body).expect("decode")
        else {
            panic!("expected database result");
        };
        assert_eq!(result.database_name, "school");
        assert_eq!(result.first_table(), Some("students"));
        let keys: Vec<&str> = result.tables["students"][0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "is_valid"]);
        assert_eq!(result.counts_by_table["students"].valid, 1);
        assert!(result.counts_by_table.get("grades").is_none());
    }

    #[test]
    fn single_body_requires_data() {
        let ok = GenerationResponse::decode(
            GenerationMode::Single,
            json!({"data": [{"id": 1}], "count": 1}),
        )
        .expect("decode");
        assert_eq!(ok.total_records(), 1);

        let err = GenerationResponse::decode(GenerationMode::Single, json!({"tables": {}}));
        assert!(matches!(err, Err(Error::InvalidResponse(_))));

        let err = GenerationResponse::decode(GenerationMode::NaturalLanguage, json!([1, 2]));
        assert!(matches!(err, Err(Error::InvalidResponse(_))));
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let body = json!({"data": [{"b": 2, "a": 1}], "count": 1});
        let response = GenerationResponse::decode(GenerationMode::Single, body.clone()).unwrap();
        assert_eq!(serde_json::to_value(&response).unwrap(), body);
    }
}
