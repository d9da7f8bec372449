//! FILENAME: core/table/src/source.rs
//! PURPOSE: The contract between the engine and whatever keeps tables fresh.
//! CONTEXT: Implementations live outside the engine (see the `sources` crate).
//! Reads are synchronous against an already-materialized cache.

use std::sync::Arc;

use crate::table::RawTable;

/// Header rows count used when a source does not specify one.
pub const DEFAULT_HEADER_ROWS: usize = 1;

/// A keyed, read-only view over cached source tables.
pub trait DataSource {
    /// The current snapshot for `source_key`, or `None` while it is absent.
    fn table(&self, source_key: &str) -> Option<Arc<RawTable>>;

    /// How many leading rows of the table form its header block.
    fn header_rows_count(&self, source_key: &str) -> usize {
        let _ = source_key;
        DEFAULT_HEADER_ROWS
    }
}
