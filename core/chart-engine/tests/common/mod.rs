//! FILENAME: tests/common/mod.rs
//! Fixtures shared by the chart-engine integration tests.

#![allow(dead_code)]

use sources::TableStore;
use table::{CellValue, OrderedRow, RawTable};

/// Elevator counts by city, the canonical single-header table.
pub struct LiftsFixture;

impl LiftsFixture {
    pub fn headers() -> Vec<&'static str> {
        vec!["Город", "Кол-во лифтов"]
    }

    pub fn data() -> Vec<(&'static str, f64)> {
        vec![("Ростов", 5.0), ("Ростов", 3.0), ("Казань", 2.0)]
    }

    pub fn table() -> RawTable {
        let header = Self::headers().into_iter().map(String::from).collect();
        let rows = Self::data()
            .into_iter()
            .map(|(city, lifts)| vec![CellValue::from(city), CellValue::Number(lifts)])
            .collect();
        RawTable::new(vec![header], rows)
    }
}

/// Sales by region, product and year. Year cells are text, amounts mix
/// numbers and numeric strings the way spreadsheet feeds deliver them.
pub struct SalesFixture;

impl SalesFixture {
    pub fn headers() -> Vec<&'static str> {
        vec!["Region", "Product", "Year", "Amount"]
    }

    pub fn data() -> Vec<(&'static str, &'static str, &'static str, f64)> {
        vec![
            ("North", "Widget", "2023", 100.0),
            ("South", "Widget", "2021", 40.0),
            ("North", "Gadget", "2022", 60.0),
            ("East", "Gadget", "2023", 25.0),
            ("South", "Gadget", "2022", 80.0),
            ("West", "Widget", "2021", 10.0),
            ("North", "Widget", "2021", 30.0),
            ("East", "Widget", "2022", 5.0),
        ]
    }

    pub fn rows() -> Vec<OrderedRow> {
        Self::data()
            .into_iter()
            .enumerate()
            .map(|(i, (region, product, year, amount))| {
                // Every other amount arrives as text with a comma decimal
                let amount_cell = if i % 2 == 0 {
                    CellValue::Number(amount)
                } else {
                    CellValue::Text(format!("{},0", amount))
                };
                vec![
                    CellValue::from(region),
                    CellValue::from(product),
                    CellValue::from(year),
                    amount_cell,
                ]
            })
            .collect()
    }

    pub fn table() -> RawTable {
        let header = Self::headers().into_iter().map(String::from).collect();
        RawTable::new(vec![header], Self::rows())
    }

    pub fn total() -> f64 {
        Self::data().iter().map(|row| row.3).sum()
    }
}

/// A two-row header block where the top row labels a group of columns.
pub fn multi_header_table() -> RawTable {
    RawTable::new(
        vec![
            vec![String::new(), "Лифты".to_string(), "Лифты".to_string()],
            vec!["Город".to_string(), "Всего".to_string(), "Новые".to_string()],
        ],
        vec![
            vec![CellValue::from("Ростов"), CellValue::Number(5.0), CellValue::Number(1.0)],
            vec![CellValue::from("Казань"), CellValue::Number(2.0), CellValue::Number(2.0)],
            vec![CellValue::from("Ростов"), CellValue::Number(3.0), CellValue::Empty],
        ],
    )
}

/// A store holding every fixture under a stable key.
pub fn fixture_store() -> TableStore {
    let store = TableStore::new();
    store.insert("lifts", LiftsFixture::table(), 1);
    store.insert("sales", SalesFixture::table(), 1);
    store.insert("lifts-by-kind", multi_header_table(), 2);
    store
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
