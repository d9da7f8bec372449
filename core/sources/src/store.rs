//! FILENAME: core/sources/src/store.rs
//! PURPOSE: Thread-safe cache of the latest snapshot per source key.
//! CONTEXT: Fetch/poll loops replace snapshots wholesale; widgets read them
//! through `DataSource`. Readers get an `Arc`, so a refresh never disturbs a
//! render already in progress.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;
use table::{DataSource, RawTable, DEFAULT_HEADER_ROWS};

use crate::error::SourceError;
use crate::feed::{decode_sheet_values, decode_sql_result};

#[derive(Debug, Clone)]
struct SourceEntry {
    table: Arc<RawTable>,
    header_rows_count: usize,
}

#[derive(Debug, Default)]
pub struct TableStore {
    entries: RwLock<FxHashMap<String, SourceEntry>>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written entry:
    // inserts and removals are single map operations.
    fn read(&self) -> RwLockReadGuard<'_, FxHashMap<String, SourceEntry>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FxHashMap<String, SourceEntry>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stores (or replaces) the snapshot for `key`.
    pub fn insert(&self, key: impl Into<String>, table: RawTable, header_rows_count: usize) {
        let key = key.into();
        log::debug!(
            target: "SOURCE",
            "storing source={} rows={} header_rows={}",
            key,
            table.row_count(),
            header_rows_count
        );
        self.write().insert(
            key,
            SourceEntry {
                table: Arc::new(table),
                header_rows_count: header_rows_count.max(1),
            },
        );
    }

    pub fn remove(&self, key: &str) -> Option<Arc<RawTable>> {
        self.write().remove(key).map(|entry| entry.table)
    }

    /// Source keys currently held, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Decodes a spreadsheet feed payload and stores it under `key`.
    /// On a decode failure the previous snapshot is kept.
    pub fn load_sheet_values(&self, key: &str, json: &str, header_rows_count: usize) -> Result<(), SourceError> {
        let table = decode_sheet_values(json, header_rows_count).map_err(|e| {
            log::warn!(target: "SOURCE", "sheet feed for source={} rejected: {}", key, e);
            e
        })?;
        self.insert(key, table, header_rows_count);
        Ok(())
    }

    /// Decodes a SQL result payload and stores it under `key`.
    /// On a decode failure the previous snapshot is kept.
    pub fn load_sql_result(&self, key: &str, json: &str) -> Result<(), SourceError> {
        let table = decode_sql_result(json).map_err(|e| {
            log::warn!(target: "SOURCE", "sql feed for source={} rejected: {}", key, e);
            e
        })?;
        self.insert(key, table, DEFAULT_HEADER_ROWS);
        Ok(())
    }
}

impl DataSource for TableStore {
    fn table(&self, source_key: &str) -> Option<Arc<RawTable>> {
        self.read().get(source_key).map(|entry| Arc::clone(&entry.table))
    }

    fn header_rows_count(&self, source_key: &str) -> usize {
        self.read()
            .get(source_key)
            .map_or(DEFAULT_HEADER_ROWS, |entry| entry.header_rows_count)
    }
}
