use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::schema::{DatabaseSpec, FieldSpec, SingleTableSpec};

/// Advisory finding about a schema. Never blocks a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIssue {
    pub code: String,
    /// JSON-pointer style location inside the schema document.
    pub path: String,
    pub message: String,
}

impl SchemaIssue {
    pub fn new(code: impl Into<String>, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    pub issues: Vec<SchemaIssue>,
}

impl SchemaReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn push(&mut self, issue: SchemaIssue) {
        self.issues.push(issue);
    }

    pub fn merge(&mut self, other: SchemaReport) {
        self.issues.extend(other.issues);
    }

    pub fn codes(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.code.as_str()).collect()
    }
}

/// Check the single-table state.
///
/// This checks:
/// - duplicate field names
/// - `valid + invalid != total`
pub fn check_single(single: &SingleTableSpec) -> SchemaReport {
    let mut report = SchemaReport::default();
    check_field_names(&single.fields, "/single", &mut report);
    check_counts(
        single.total_count,
        single.valid_count,
        single.invalid_count,
        "/single",
        &mut report,
    );
    report
}

/// Check the database state.
///
/// This checks:
/// - duplicate table names and duplicate field names per table
/// - count mismatches per table
/// - in manual mode, references that are incomplete or point to an unknown
///   table or field
///
/// Blank tables and fields are skipped; the request builder drops them anyway.
pub fn check_database(database: &DatabaseSpec) -> SchemaReport {
    let mut report = SchemaReport::default();

    let mut catalog: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (idx, table) in database.tables.iter().enumerate() {
        if !table.has_name() {
            continue;
        }
        let path = format!("/database/tables/{idx}");
        if catalog.contains_key(table.table_name.as_str()) {
            report.push(SchemaIssue::new(
                "duplicate_table_name",
                &path,
                format!("duplicate table name: {}", table.table_name),
            ));
            continue;
        }
        let columns = table
            .fields
            .iter()
            .filter(|field| field.has_name())
            .map(|field| field.name.as_str())
            .collect();
        catalog.insert(table.table_name.as_str(), columns);
    }

    for (idx, table) in database.tables.iter().enumerate() {
        if !table.has_name() {
            continue;
        }
        let path = format!("/database/tables/{idx}");
        check_field_names(&table.fields, &path, &mut report);
        check_counts(
            table.total_count,
            table.valid_count,
            table.invalid_count,
            &path,
            &mut report,
        );

        if database.use_intelligent_mode {
            continue;
        }

        for (field_idx, field) in table.fields.iter().enumerate() {
            if !field.has_name() {
                continue;
            }
            let Some(reference) = field.reference.as_ref() else {
                continue;
            };
            let field_path = format!("{path}/fields/{field_idx}/reference");
            if !reference.is_complete() {
                report.push(SchemaIssue::new(
                    "incomplete_reference",
                    &field_path,
                    format!(
                        "reference on {}.{} has no target table and will not be sent",
                        table.table_name, field.name
                    ),
                ));
                continue;
            }
            match catalog.get(reference.target_table.as_str()) {
                None => report.push(SchemaIssue::new(
                    "unknown_reference_table",
                    &field_path,
                    format!(
                        "{}.{} references unknown table: {}",
                        table.table_name, field.name, reference.target_table
                    ),
                )),
                Some(columns) if !columns.contains(reference.target_field.as_str()) => {
                    report.push(SchemaIssue::new(
                        "unknown_reference_field",
                        &field_path,
                        format!(
                            "{}.{} references unknown field: {}.{}",
                            table.table_name,
                            field.name,
                            reference.target_table,
                            reference.target_field
                        ),
                    ))
                }
                Some(_) => {}
            }
        }
    }

    report
}

fn check_field_names(fields: &[FieldSpec], path: &str, report: &mut SchemaReport) {
    let mut seen = BTreeSet::new();
    for (idx, field) in fields.iter().enumerate() {
        if field.has_name() && !seen.insert(field.name.as_str()) {
            report.push(SchemaIssue::new(
                "duplicate_field_name",
                format!("{path}/fields/{idx}"),
                format!("duplicate field name: {}", field.name),
            ));
        }
    }
}

fn check_counts(total: u64, valid: u64, invalid: u64, path: &str, report: &mut SchemaReport) {
    if valid.saturating_add(invalid) != total {
        report.push(SchemaIssue::new(
            "count_mismatch",
            path,
            format!("valid ({valid}) + invalid ({invalid}) does not equal total ({total})"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldReference, TableSpec};

    fn reference(table: &str, field: &str) -> Option<FieldReference> {
        Some(FieldReference {
            target_table: table.to_string(),
            target_field: field.to_string(),
        })
    }

    fn shop(intelligent: bool) -> DatabaseSpec {
        let mut customer_id = FieldSpec::named("customer_id", "integer");
        customer_id.reference = reference("customers", "id");
        let mut product_id = FieldSpec::named("product_id", "integer");
        product_id.reference = reference("products", "id");
        let mut coupon = FieldSpec::named("coupon", "string");
        coupon.reference = reference("customers", "coupon_code");
        let mut pending = FieldSpec::named("note_id", "integer");
        pending.reference = reference("", "id");

        DatabaseSpec {
            name: "shop".to_string(),
            use_intelligent_mode: intelligent,
            tables: vec![
                TableSpec {
                    table_name: "customers".to_string(),
                    fields: vec![FieldSpec::named("id", "integer")],
                    ..TableSpec::default()
                },
                TableSpec {
                    table_name: "orders".to_string(),
                    fields: vec![customer_id, product_id, coupon, pending],
                    ..TableSpec::default()
                },
            ],
        }
    }

    #[test]
    fn manual_mode_reports_dangling_references() {
        let report = check_database(&shop(false));
        assert_eq!(
            report.codes(),
            vec![
                "unknown_reference_table",
                "unknown_reference_field",
                "incomplete_reference"
            ]
        );
        assert_eq!(report.issues[0].path, "/database/tables/1/fields/1/reference");
    }

    #[test]
    fn intelligent_mode_ignores_references() {
        assert!(check_database(&shop(true)).is_clean());
    }

    #[test]
    fn duplicates_and_counts_are_flagged() {
        let mut db = shop(true);
        db.tables.push(TableSpec {
            table_name: "customers".to_string(),
            ..TableSpec::default()
        });
        db.tables[0].fields.push(FieldSpec::named("id", "uuid"));
        db.tables[0].total_count = 10;

        let report = check_database(&db);
        assert_eq!(
            report.codes(),
            vec!["duplicate_table_name", "duplicate_field_name", "count_mismatch"]
        );
    }

    #[test]
    fn single_table_checks() {
        let mut single = SingleTableSpec::default();
        assert!(check_single(&single).is_clean());
        single.fields = vec![FieldSpec::named("id", "integer"), FieldSpec::named("id", "uuid")];
        single.invalid_count = 2;
        assert_eq!(
            check_single(&single).codes(),
            vec!["duplicate_field_name", "count_mismatch"]
        );
    }
}
