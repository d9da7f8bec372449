//! FILENAME: core/table/src/lib.rs
//! PURPOSE: Shared tabular data model for the chart engine.
//! CONTEXT: Re-exports the cell model, raw tables, header reconciliation,
//! date-key parsing and compact number formatting used by other crates.

pub mod cell;
pub mod date;
pub mod header;
pub mod number_format;
pub mod source;
pub mod table;

// Re-export commonly used types at the crate root
pub use cell::{parse_number, CellValue, OrderedRow};
pub use date::parse_date_key;
pub use header::{merge_headers, ColumnIndex, MergedHeader};
pub use number_format::format_large_number;
pub use source::{DataSource, DEFAULT_HEADER_ROWS};
pub use table::RawTable;
