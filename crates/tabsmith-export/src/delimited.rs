use csv::ReaderBuilder;
use serde_json::Value;
use tabsmith_core::Row;

/// Render rows as comma-separated text.
///
/// The header is the key sequence of the first row; later rows are read in
/// that column order and missing keys become empty cells. Only text containing
/// a comma or a double quote is quoted (quotes doubled). Lines are joined with
/// `\n` without a trailing newline. No rows means an empty string.
pub fn to_delimited_text(rows: &[Row]) -> Result<String, crate::ExportError> {
    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&String> = first.keys().collect();

    // a lone empty cell stays an empty line, never `""`
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|header| quote_text(header))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|header| row.get(header.as_str()).map(render_value).unwrap_or_default())
            .collect();
        lines.push(cells.join(","));
    }
    Ok(lines.join("\n"))
}

/// Parse text produced by [`to_delimited_text`] back into rows.
///
/// Every cell comes back as a JSON string; short records are padded with
/// empty strings.
pub fn from_delimited_text(text: &str) -> Result<Vec<Row>, crate::ExportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let cell = record.get(idx).unwrap_or_default();
                (header.to_string(), Value::String(cell.to_string()))
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => quote_text(text),
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        nested => nested.to_string(),
    }
}

fn quote_text(text: &str) -> String {
    if text.contains(',') || text.contains('"') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rows(value: Value) -> Vec<Row> {
        serde_json::from_value(value).expect("rows")
    }

    #[test]
    fn empty_rows_give_empty_text() {
        assert_eq!(to_delimited_text(&[]).unwrap(), "");
    }

    #[test]
    fn header_follows_first_row_and_only_text_is_quoted() {
        let data = rows(json!([
            {"id": 1, "name": "Smith, John", "quote": "say \"hi\"", "active": true},
            {"id": 2.5, "name": "Ana", "quote": null, "extra": "ignored"},
            {"name": "no id"}
        ]));
        let text = to_delimited_text(&data).unwrap();
        assert_eq!(
            text,
            "id,name,quote,active\n\
             1,\"Smith, John\",\"say \"\"hi\"\"\",true\n\
             2.5,Ana,,\n\
             ,no id,,"
        );
    }

    #[test]
    fn nested_values_are_written_as_json() {
        let data = rows(json!([{"tags": ["a"], "meta": {"k": 1}}]));
        assert_eq!(to_delimited_text(&data).unwrap(), "tags,meta\n[\"a\"],{\"k\":1}");
    }

    #[test]
    fn quoted_text_round_trips() {
        let text = "name,note\n\"Smith, J\",\"he said \"\"ok\"\"\"\nplain,\"a,b,\"\"c\"\"\"";
        let parsed = from_delimited_text(text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["name"], json!("Smith, J"));
        assert_eq!(parsed[0]["note"], json!("he said \"ok\""));
        assert_eq!(to_delimited_text(&parsed).unwrap(), text);
    }

    #[test]
    fn single_column_blanks_stay_empty_lines() {
        let data = rows(json!([{"note": null}, {"note": ""}, {"note": "x"}]));
        assert_eq!(to_delimited_text(&data).unwrap(), "note\n\n\nx");
    }

    #[test]
    fn parsing_empty_text_gives_no_rows() {
        assert!(from_delimited_text("").unwrap().is_empty());
    }
}
