//! Export engine: generated rows to delimited text and workbooks.
//!
//! Every function here is read-only over its input and can be called
//! repeatedly on the same result snapshot.

pub mod delimited;
pub mod download;
pub mod errors;
pub mod workbook;

pub use delimited::{from_delimited_text, to_delimited_text};
pub use download::{
    CSV_CONTENT_TYPE, Download, SINGLE_TABLE_FILENAME, WORKBOOK_CONTENT_TYPE, WORKBOOK_FILENAME,
    database_workbook, single_table_csv, table_csv,
};
pub use errors::ExportError;
pub use workbook::{MAX_SHEET_NAME_CHARS, sheet_names, to_multi_sheet};
