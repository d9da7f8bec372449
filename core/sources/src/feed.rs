//! FILENAME: core/sources/src/feed.rs
//! PURPOSE: Decodes the two JSON feeds into raw tables.
//! CONTEXT: The spreadsheet feed returns `{ "values": [[...], ...] }` with the
//! header block as its first rows. The database mirror returns
//! `{ "columns": [...], "rows": [[...], ...] }` with a single header row.

use serde::Deserialize;
use serde_json::Value;
use table::{CellValue, OrderedRow, RawTable};

#[derive(Debug, Deserialize)]
struct SheetValues {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SqlResult {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

/// Converts one JSON cell. Booleans and nested values become text.
pub fn json_to_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Number(n) => n.as_f64().map_or(CellValue::Empty, CellValue::Number),
        Value::String(s) => CellValue::Text(s),
        Value::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

fn decode_rows(rows: Vec<Vec<Value>>) -> Vec<OrderedRow> {
    rows.into_iter()
        .map(|row| row.into_iter().map(json_to_cell).collect())
        .collect()
}

/// Decodes a spreadsheet value-grid payload. The first `header_rows_count`
/// rows (at least one) become the header block.
pub fn decode_sheet_values(json: &str, header_rows_count: usize) -> Result<RawTable, crate::SourceError> {
    let payload: SheetValues = serde_json::from_str(json)?;
    Ok(RawTable::from_grid(decode_rows(payload.values), header_rows_count))
}

/// Decodes a SQL result-set payload. Column names form the single header row.
pub fn decode_sql_result(json: &str) -> Result<RawTable, crate::SourceError> {
    let payload: SqlResult = serde_json::from_str(json)?;
    if payload.columns.is_empty() && !payload.rows.is_empty() {
        return Err(crate::SourceError::InvalidFormat(
            "result set has rows but no columns".to_string(),
        ));
    }

    let header_rows = if payload.columns.is_empty() {
        Vec::new()
    } else {
        vec![payload.columns]
    };
    Ok(RawTable::new(header_rows, decode_rows(payload.rows)))
}
