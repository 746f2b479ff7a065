use indexmap::IndexMap;
use tabsmith_core::Row;

use crate::ExportError;
use crate::delimited::to_delimited_text;
use crate::workbook::to_multi_sheet;

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const WORKBOOK_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SINGLE_TABLE_FILENAME: &str = "test-data.csv";
pub const WORKBOOK_FILENAME: &str = "database.xlsx";

/// Bytes ready for a download sink, with the suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// CSV download of a single-table result. `None` when there are no rows.
pub fn single_table_csv(rows: &[Row]) -> Result<Option<Download>, ExportError> {
    csv_download(SINGLE_TABLE_FILENAME.to_string(), rows)
}

/// CSV download of one table of a database result, named after the table.
pub fn table_csv(table: &str, rows: &[Row]) -> Result<Option<Download>, ExportError> {
    let stem: String = table
        .chars()
        .map(|ch| if matches!(ch, '/' | '\\') { '_' } else { ch })
        .collect();
    csv_download(format!("{stem}.csv"), rows)
}

/// Workbook download with every table. `None` when there are no tables.
pub fn database_workbook(
    tables: &IndexMap<String, Vec<Row>>,
) -> Result<Option<Download>, ExportError> {
    if tables.is_empty() {
        return Ok(None);
    }
    Ok(Some(Download {
        filename: WORKBOOK_FILENAME.to_string(),
        content_type: WORKBOOK_CONTENT_TYPE,
        bytes: to_multi_sheet(tables)?,
    }))
}

fn csv_download(filename: String, rows: &[Row]) -> Result<Option<Download>, ExportError> {
    if rows.is_empty() {
        return Ok(None);
    }
    Ok(Some(Download {
        filename,
        content_type: CSV_CONTENT_TYPE,
        bytes: to_delimited_text(rows)?.into_bytes(),
    }))
}
