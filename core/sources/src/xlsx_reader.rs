//! FILENAME: core/sources/src/xlsx_reader.rs
//! PURPOSE: Loads one worksheet of an .xlsx workbook as a source table.
//! CONTEXT: Used for file-backed sources and offline fixtures. The sheet is
//! read as a value grid and split into header block and data rows the same
//! way the spreadsheet feed is.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate, Timelike};
use table::{CellValue, OrderedRow, RawTable};

use crate::error::SourceError;

/// Loads `sheet_name` (or the first sheet) from the workbook at `path`.
pub fn load_xlsx_sheet(
    path: &Path,
    sheet_name: Option<&str>,
    header_rows_count: usize,
) -> Result<RawTable, SourceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    if sheet_names.is_empty() {
        return Err(SourceError::InvalidFormat(
            "Workbook contains no sheets".to_string(),
        ));
    }

    let target = match sheet_name {
        Some(name) => sheet_names
            .iter()
            .find(|candidate| candidate.as_str() == name)
            .cloned()
            .ok_or_else(|| SourceError::SheetNotFound(name.to_string()))?,
        None => sheet_names[0].clone(),
    };

    let range = workbook
        .worksheet_range(&target)
        .map_err(|e| SourceError::InvalidFormat(e.to_string()))?;

    // The used range may not start at column A; keep absolute column positions.
    let leading_columns = range.start().map_or(0, |(_, col)| col as usize);

    let grid: Vec<OrderedRow> = range
        .rows()
        .map(|row| {
            let mut cells = Vec::with_capacity(leading_columns + row.len());
            cells.resize(leading_columns, CellValue::Empty);
            cells.extend(row.iter().map(data_to_cell));
            cells
        })
        .collect();

    log::debug!(
        target: "SOURCE",
        "loaded sheet '{}' from {}: {} grid rows",
        target,
        path.display(),
        grid.len()
    );

    Ok(RawTable::from_grid(grid, header_rows_count))
}

fn data_to_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::Error(_) => CellValue::Empty,
        Data::DateTime(dt) if dt.is_datetime() => excel_serial_to_text(dt.as_f64())
            .map(CellValue::Text)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Converts an Excel serial date (1900 date system) to ISO text so date
/// columns sort chronologically on the category axis. Midnight values drop
/// the time part.
pub fn excel_serial_to_text(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    let moment = epoch.checked_add_signed(Duration::milliseconds(millis))?;

    if moment.num_seconds_from_midnight() == 0 {
        Some(moment.format("%Y-%m-%d").to_string())
    } else {
        Some(moment.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
