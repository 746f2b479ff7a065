//! Request payloads for the generation service.
//!
//! `build` turns the editable schema model into the wire payload for one of
//! the three modes. Incomplete rows are filtered here and nowhere else.

pub mod build;
pub mod errors;
pub mod lint;
pub mod model;
pub mod schema;

pub use build::{DEFAULT_DATABASE_NAME, build, build_database, build_natural_language, build_single};
pub use errors::{IssueSeverity, RequestError, ValidationIssue, ValidationReport};
pub use lint::{MIN_DESCRIPTION_CHARS, check_description, lint_payload};
pub use model::{
    DatabasePayload, DatabaseSchemaPayload, Endpoint, FieldPayload, NaturalLanguagePayload,
    Payload, ReferencePayload, SingleTablePayload, TablePayload,
};
pub use schema::{payload_json_schema, validate_payload_json};
