use tabsmith_catalog::TypeCatalog;

use crate::errors::{IssueSeverity, ValidationIssue, ValidationReport};
use crate::model::{FieldPayload, Payload};

/// Descriptions shorter than this are refused by the generation service.
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// Report type identifiers the catalog does not know.
///
/// Unknown types are warnings only: the payload is sent unchanged so that
/// types the service added later keep working.
pub fn lint_payload(payload: &Payload, catalog: &TypeCatalog) -> ValidationReport {
    let mut report = ValidationReport::default();
    match payload {
        Payload::Single(single) => {
            lint_fields(&single.schema_fields, "/schema_fields", catalog, &mut report);
        }
        Payload::Database(database) => {
            for (idx, table) in database.db_schema.tables.iter().enumerate() {
                let path = format!("/db_schema/tables/{idx}/fields");
                lint_fields(&table.fields, &path, catalog, &mut report);
            }
        }
        Payload::NaturalLanguage(natural) => {
            report.merge(check_description(&natural.user_text));
        }
    }
    report
}

/// Precondition check for natural-language submissions.
pub fn check_description(text: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    let length = text.trim().chars().count();
    if length == 0 {
        report.push(ValidationIssue::new(
            IssueSeverity::Error,
            "empty_description",
            "/user_text",
            "description is empty",
            Some("describe the tables and data you need".to_string()),
        ));
    } else if length < MIN_DESCRIPTION_CHARS {
        report.push(ValidationIssue::new(
            IssueSeverity::Warning,
            "short_description",
            "/user_text",
            format!("description has {length} characters; the service expects at least {MIN_DESCRIPTION_CHARS}"),
            Some("mention the entities, their fields and how they relate".to_string()),
        ));
    }
    report
}

fn lint_fields(
    fields: &[FieldPayload],
    path: &str,
    catalog: &TypeCatalog,
    report: &mut ValidationReport,
) {
    for (idx, field) in fields.iter().enumerate() {
        if !catalog.is_known(&field.type_id) {
            report.push(ValidationIssue::new(
                IssueSeverity::Warning,
                "unknown_type",
                format!("{path}/{idx}/type"),
                format!("field '{}' uses unknown type '{}'", field.name, field.type_id),
                Some("the type is sent unchanged; run `tabsmith types` to list known ids".to_string()),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use tabsmith_core::{FieldSpec, GenerationMode, SchemaModel, TableSpec};

    use super::*;
    use crate::build::build;

    #[test]
    fn unknown_types_are_warnings() {
        let mut model = SchemaModel::default();
        model.database.tables = vec![TableSpec {
            table_name: "users".to_string(),
            fields: vec![
                FieldSpec::named("id", "uuid"),
                FieldSpec::named("vibe", "quantum_mood"),
            ],
            ..TableSpec::default()
        }];

        let payload = build(GenerationMode::Database, &model);
        let report = lint_payload(&payload, TypeCatalog::builtin());
        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].code, "unknown_type");
        assert_eq!(report.warnings[0].path, "/db_schema/tables/0/fields/1/type");
    }

    #[test]
    fn description_length_is_checked() {
        assert!(!check_description("   ").is_ok());

        let short = check_description("two tables");
        assert!(short.is_ok());
        assert_eq!(short.warnings[0].code, "short_description");

        let fine = check_description("Customers with orders and order items");
        assert!(fine.errors.is_empty() && fine.warnings.is_empty());
    }
}
