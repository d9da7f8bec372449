//! FILENAME: core/sources/src/lib.rs
//! Source tables for the chart engine.
//!
//! Two feeds keep dashboards fresh: a spreadsheet API returning a value grid
//! with a header block on top, and a SQL aggregation endpoint returning a
//! column list plus rows. Both decode into `RawTable` snapshots held by a
//! `TableStore`, which implements the engine's `DataSource` contract.

mod error;
mod feed;
mod store;
mod xlsx_reader;

pub use error::SourceError;
pub use feed::{decode_sheet_values, decode_sql_result, json_to_cell};
pub use store::TableStore;
pub use xlsx_reader::{excel_serial_to_text, load_xlsx_sheet};
