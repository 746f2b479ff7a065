use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use rust_xlsxwriter::{Workbook, Worksheet};
use serde_json::Value;
use tabsmith_core::Row;

use crate::ExportError;

/// Longest sheet name the workbook format accepts.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Build an xlsx workbook with one sheet per table, in mapping order.
///
/// The header row is the union of row keys in first-appearance order.
/// Strings, numbers and booleans keep their cell type; null and missing values
/// leave the cell blank; nested values are written as JSON text.
pub fn to_multi_sheet(tables: &IndexMap<String, Vec<Row>>) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let names = sheet_names(tables.keys().map(String::as_str));

    for ((table, rows), sheet_name) in tables.iter().zip(names) {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;
        write_table(worksheet, table, rows)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Sheet names for the given table names, index-aligned with the input.
///
/// Names are cleaned of characters the format forbids, truncated to
/// [`MAX_SHEET_NAME_CHARS`], and made unique (case-insensitively) with a
/// `~N` suffix when truncation or cleaning makes two of them collide.
pub fn sheet_names<'a>(tables: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut names = Vec::new();

    for (idx, table) in tables.into_iter().enumerate() {
        let cleaned: String = table
            .chars()
            .map(|ch| if FORBIDDEN_SHEET_CHARS.contains(&ch) { '_' } else { ch })
            .collect();
        let base = clip_sheet_name(cleaned.trim(), MAX_SHEET_NAME_CHARS);
        let base = if base.is_empty() {
            format!("Sheet{}", idx + 1)
        } else {
            base
        };

        let mut candidate = base.clone();
        let mut suffix = 2_usize;
        while taken.contains(&candidate.to_lowercase()) {
            let tag = format!("~{suffix}");
            let keep = MAX_SHEET_NAME_CHARS.saturating_sub(tag.chars().count());
            candidate = format!("{}{tag}", clip_sheet_name(&base, keep));
            suffix += 1;
        }

        taken.insert(candidate.to_lowercase());
        names.push(candidate);
    }

    names
}

fn write_table(worksheet: &mut Worksheet, table: &str, rows: &[Row]) -> Result<(), ExportError> {
    let columns: IndexSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    for (col, header) in columns.iter().enumerate() {
        worksheet.write_string(0, column_index(table, col)?, *header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let row_idx = u32::try_from(idx + 1).map_err(|_| too_large(table, "too many rows"))?;
        for (col, header) in columns.iter().enumerate() {
            let col_idx = column_index(table, col)?;
            match row.get(*header) {
                None | Some(Value::Null) => {}
                Some(Value::String(text)) => {
                    worksheet.write_string(row_idx, col_idx, text)?;
                }
                Some(Value::Bool(flag)) => {
                    worksheet.write_boolean(row_idx, col_idx, *flag)?;
                }
                Some(Value::Number(number)) => match number.as_f64() {
                    Some(float) => {
                        worksheet.write_number(row_idx, col_idx, float)?;
                    }
                    None => {
                        worksheet.write_string(row_idx, col_idx, number.to_string())?;
                    }
                },
                Some(nested) => {
                    worksheet.write_string(row_idx, col_idx, nested.to_string())?;
                }
            }
        }
    }

    Ok(())
}

fn column_index(table: &str, col: usize) -> Result<u16, ExportError> {
    u16::try_from(col).map_err(|_| too_large(table, "too many columns"))
}

fn too_large(table: &str, reason: &str) -> ExportError {
    ExportError::TooLarge {
        table: table.to_string(),
        reason: reason.to_string(),
    }
}

/// Truncate to `max` characters; a name may not start or end with `'`.
fn clip_sheet_name(text: &str, max: usize) -> String {
    let truncated: String = text.trim_matches('\'').chars().take(max).collect();
    truncated.trim_matches('\'').to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn long_names_are_truncated_and_disambiguated() {
        let long_a = "customer_transaction_history_2023_q1";
        let long_b = "customer_transaction_history_2023_q2";
        let names = sheet_names([long_a, long_b, "orders"]);

        assert_eq!(names[0], "customer_transaction_history_20");
        assert_eq!(names[1], "customer_transaction_history_~2");
        assert_eq!(names[2], "orders");
        assert!(names.iter().all(|name| name.chars().count() <= MAX_SHEET_NAME_CHARS));
    }

    #[test]
    fn forbidden_and_blank_names_are_replaced() {
        let names = sheet_names(["a/b", "A_B", "  ", "x[1]"]);
        assert_eq!(names, vec!["a_b", "A_B~2", "Sheet3", "x_1_"]);
    }

    #[test]
    fn truncation_never_leaves_an_edge_apostrophe() {
        let table = format!("{}'bc", "a".repeat(30));
        let names = sheet_names([table.as_str(), table.as_str(), "'quoted'"]);
        assert_eq!(names[0], "a".repeat(30));
        assert_eq!(names[1], format!("{}~2", "a".repeat(29)));
        assert_eq!(names[2], "quoted");

        let mut tables = IndexMap::new();
        tables.insert(table, Vec::new());
        assert!(to_multi_sheet(&tables).is_ok());
    }

    #[test]
    fn workbook_bytes_are_a_zip_archive() {
        let mut tables = IndexMap::new();
        let students: Vec<Row> = serde_json::from_value(json!([
            {"id": 1, "name": "Ana", "enrolled": true},
            {"id": 2, "name": "Bo", "tags": ["x"], "note": null}
        ]))
        .unwrap();
        tables.insert("students".to_string(), students);
        tables.insert("grades".to_string(), Vec::new());

        let bytes = to_multi_sheet(&tables).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
