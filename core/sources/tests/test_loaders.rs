//! FILENAME: core/sources/tests/test_loaders.rs
//! Loader tests against real .xlsx files written to a temp directory.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use sources::{load_xlsx_sheet, SourceError, TableStore};
use table::{CellValue, DataSource};
use tempfile::TempDir;

fn write_lifts_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("lifts.xlsx");
    let mut workbook = Workbook::new();

    let summary = workbook.add_worksheet();
    summary.set_name("Summary").unwrap();
    summary.write_string(0, 0, "nothing here").unwrap();

    let data = workbook.add_worksheet();
    data.set_name("Lifts").unwrap();
    data.write_string(0, 0, "Город").unwrap();
    data.write_string(0, 1, "Лифты").unwrap();
    data.write_string(1, 0, "Ростов").unwrap();
    data.write_number(1, 1, 5.0).unwrap();
    data.write_string(2, 0, "Казань").unwrap();
    data.write_number(2, 1, 2.0).unwrap();
    data.write_string(3, 0, "Ростов").unwrap();
    data.write_number(3, 1, 3.0).unwrap();

    workbook.save(&path).unwrap();
    path
}

#[test]
fn test_load_named_sheet() {
    let dir = TempDir::new().unwrap();
    let path = write_lifts_workbook(dir.path());

    let table = load_xlsx_sheet(&path, Some("Lifts"), 1).unwrap();
    assert_eq!(table.header_rows, vec![vec!["Город".to_string(), "Лифты".to_string()]]);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows[0][0], CellValue::from("Ростов"));
    assert_eq!(table.rows[0][1], CellValue::Number(5.0));
}

#[test]
fn test_load_first_sheet_by_default() {
    let dir = TempDir::new().unwrap();
    let path = write_lifts_workbook(dir.path());

    let table = load_xlsx_sheet(&path, None, 1).unwrap();
    assert_eq!(table.header_rows, vec![vec!["nothing here".to_string()]]);
    assert!(table.is_empty());
}

#[test]
fn test_unknown_sheet() {
    let dir = TempDir::new().unwrap();
    let path = write_lifts_workbook(dir.path());

    match load_xlsx_sheet(&path, Some("Missing"), 1) {
        Err(SourceError::SheetNotFound(name)) => assert_eq!(name, "Missing"),
        other => panic!("expected SheetNotFound, got {:?}", other),
    }
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(load_xlsx_sheet(&dir.path().join("absent.xlsx"), None, 1).is_err());
}

#[test]
fn test_multi_row_header_sheet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sales.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 1, "Продажи").unwrap();
    sheet.write_string(1, 0, "Регион").unwrap();
    sheet.write_string(1, 1, "Сумма").unwrap();
    sheet.write_string(2, 0, "Юг").unwrap();
    sheet.write_number(2, 1, 10.5).unwrap();
    workbook.save(&path).unwrap();

    let table = load_xlsx_sheet(&path, None, 2).unwrap();
    assert_eq!(table.header_rows.len(), 2);
    assert_eq!(table.header_rows[0][1], "Продажи");
    assert_eq!(table.header_rows[1][0], "Регион");
    assert_eq!(table.rows[0][1], CellValue::Number(10.5));
}

#[test]
fn test_store_serves_loaded_sheet() {
    let dir = TempDir::new().unwrap();
    let path = write_lifts_workbook(dir.path());

    let store = TableStore::new();
    store.insert("lifts", load_xlsx_sheet(&path, Some("Lifts"), 1).unwrap(), 1);

    let table = store.table("lifts").unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(store.header_rows_count("lifts"), 1);
}

#[test]
fn test_date_cells_become_iso_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dates.xlsx");
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Дата").unwrap();
    sheet.write_string(0, 1, "Сумма").unwrap();

    let day = ExcelDateTime::from_ymd(2024, 1, 15).unwrap();
    sheet.write_datetime_with_format(1, 0, &day, &date_format).unwrap();
    sheet.write_number(1, 1, 7.0).unwrap();

    let moment = ExcelDateTime::from_ymd(2024, 3, 5).unwrap().and_hms(12, 30, 0).unwrap();
    sheet.write_datetime_with_format(2, 0, &moment, &datetime_format).unwrap();
    sheet.write_number(2, 1, 3.0).unwrap();
    workbook.save(&path).unwrap();

    let table = load_xlsx_sheet(&path, None, 1).unwrap();
    assert_eq!(table.rows[0][0], CellValue::from("2024-01-15"));
    assert_eq!(table.rows[1][0], CellValue::from("2024-03-05 12:30:00"));
    // Plain numbers stay numeric
    assert_eq!(table.rows[0][1], CellValue::Number(7.0));
}
