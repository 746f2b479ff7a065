use jsonschema::JSONSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde_json::Value;

use crate::errors::{IssueSeverity, RequestError, ValidationIssue, ValidationReport};
use crate::model::Payload;

/// Emit the JSON Schema accepted for any request payload.
pub fn payload_json_schema() -> RootSchema {
    schema_for!(Payload)
}

/// Check a payload document against [`payload_json_schema`].
///
/// Each violation becomes an error issue located by its JSON pointer.
pub fn validate_payload_json(payload: &Value) -> Result<ValidationReport, RequestError> {
    let schema = serde_json::to_value(payload_json_schema())?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| RequestError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();
    if let Err(errors) = compiled.validate(payload) {
        for error in errors {
            let pointer = error.instance_path.to_string();
            let path = if pointer.is_empty() { "/".to_string() } else { pointer };
            report.push(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }
    Ok(report)
}
