//! FILENAME: core/table/src/header.rs
//! PURPOSE: Flattens a multi-row header block into one label per column.
//! CONTEXT: Spreadsheet feeds often carry two or three header rows (a year
//! band above metric names, for example). Queries address columns by the
//! merged label, resolved once into a `ColumnIndex`.

use rustc_hash::FxHashMap;

/// Separator placed between distinct labels stacked in one column.
pub const HEADER_JOINER: &str = " + ";

/// Position of a column in every row of the table it was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnIndex(pub usize);

/// One non-empty label per column, plus a label lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedHeader {
    labels: Vec<String>,
    /// First column carrying each label.
    positions: FxHashMap<String, usize>,
}

impl MergedHeader {
    pub fn new(labels: Vec<String>) -> Self {
        let mut positions = FxHashMap::default();
        for (i, label) in labels.iter().enumerate() {
            positions.entry(label.clone()).or_insert(i);
        }
        MergedHeader { labels, positions }
    }

    /// Finds the first column with exactly this label.
    pub fn resolve(&self, label: &str) -> Option<ColumnIndex> {
        self.positions.get(label).copied().map(ColumnIndex)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, column: ColumnIndex) -> Option<&str> {
        self.labels.get(column.0).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Placeholder for a column that has no header text at all.
pub fn placeholder_label(column: usize) -> String {
    format!("Column {}", column + 1)
}

/// Merges the first `header_rows_count` header rows (at least one, at most
/// what is available) into a single label per column.
///
/// Width is taken from the first used header row. For each column the
/// trimmed, non-empty labels are collected top to bottom, deduplicated in
/// first-seen order and joined with `" + "`.
pub fn merge_headers(header_rows: &[Vec<String>], header_rows_count: usize) -> MergedHeader {
    let count = header_rows_count.max(1).min(header_rows.len());
    let used = &header_rows[..count];
    let width = used.first().map_or(0, Vec::len);

    let labels = (0..width)
        .map(|column| {
            let mut parts: Vec<&str> = Vec::with_capacity(count);
            for row in used {
                let Some(cell) = row.get(column) else { continue };
                let text = cell.trim();
                if !text.is_empty() && !parts.contains(&text) {
                    parts.push(text);
                }
            }

            if parts.is_empty() {
                placeholder_label(column)
            } else {
                parts.join(HEADER_JOINER)
            }
        })
        .collect();

    MergedHeader::new(labels)
}
