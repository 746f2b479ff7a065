use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use indexmap::IndexMap;
use serde_json::json;
use tabsmith_core::Row;
use tabsmith_export::database_workbook;

fn rows(value: serde_json::Value) -> Vec<Row> {
    serde_json::from_value(value).expect("rows")
}

fn text(value: &str) -> Data {
    Data::String(value.to_string())
}

#[test]
fn workbook_has_one_sheet_per_table_with_typed_cells() {
    let mut tables = IndexMap::new();
    tables.insert(
        "customer_transaction_history_2023_q1".to_string(),
        rows(json!([
            {"id": 1, "name": "Ana", "enrolled": true},
            {"id": 2, "tags": ["x"], "note": null, "name": "Bo"}
        ])),
    );
    tables.insert("customer_transaction_history_2023_q2".to_string(), Vec::new());
    tables.insert("grades".to_string(), rows(json!([{"student_id": 1, "score": 9.5}])));

    let download = database_workbook(&tables).unwrap().expect("workbook");
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(download.bytes)).expect("open workbook");

    assert_eq!(
        workbook.sheet_names(),
        vec![
            "customer_transaction_history_20".to_string(),
            "customer_transaction_history_~2".to_string(),
            "grades".to_string(),
        ]
    );

    let range = workbook
        .worksheet_range("customer_transaction_history_20")
        .expect("first sheet");
    let cells: Vec<Vec<Data>> = range.rows().map(<[Data]>::to_vec).collect();
    assert_eq!(
        cells,
        vec![
            vec![text("id"), text("name"), text("enrolled"), text("tags"), text("note")],
            vec![Data::Float(1.0), text("Ana"), Data::Bool(true), Data::Empty, Data::Empty],
            vec![Data::Float(2.0), text("Bo"), Data::Empty, text("[\"x\"]"), Data::Empty],
        ]
    );

    let grades = workbook.worksheet_range("grades").expect("grades sheet");
    let cells: Vec<Vec<Data>> = grades.rows().map(<[Data]>::to_vec).collect();
    assert_eq!(
        cells,
        vec![
            vec![text("student_id"), text("score")],
            vec![Data::Float(1.0), Data::Float(9.5)],
        ]
    );
}
