//! Core contracts for tabsmith.
//!
//! This crate owns the editable schema model (single-table, database and
//! natural-language state), the advisory checks run over it, and the result
//! shapes returned by the generation service.

pub mod error;
pub mod graph;
pub mod model;
pub mod result;
pub mod schema;
pub mod validation;

pub use error::{Error, Result};
pub use graph::{ReferenceGraphReport, ReferenceGraphSummary, build_reference_graph};
pub use model::{
    DatabaseProperty, FieldProperty, FieldScope, GenerationMode, ReferenceProperty,
    SingleProperty, TableProperty,
};
pub use result::{DatabaseResult, GenerationResponse, GenerationResult, Row, TableCounts};
pub use schema::{
    DEFAULT_FIELD_TYPE, DatabaseSpec, FieldReference, FieldSpec, SchemaModel, SingleTableSpec,
    TableSpec,
};
pub use validation::{SchemaIssue, SchemaReport, check_database, check_single};

/// Version tag written into saved schema documents.
pub const SCHEMA_VERSION: &str = "0.1";
