//! FILENAME: core/chart-engine/src/engine.rs
//! Chart Engine - Turns a raw table and a query into a reduced matrix.
//!
//! Algorithm:
//! 1. Merge the header block and resolve the query's columns
//! 2. Filter rows (resolvable predicates ANDed, blank group keys dropped)
//! 3. Bucket each row by (segment, x) and accumulate its value
//! 4. Order the x-domain (chronological when every key is a date)
//! 5. Hand the matrix to the projector for axis or slice output
//!
//! Nothing here fails. Missing columns or tables produce empty output.

use table::header::{ColumnIndex, MergedHeader};
use table::table::cell_at;
use table::{merge_headers, RawTable};

use crate::axis::axis_positions;
use crate::cache::{BucketCache, GroupKey, KeyId};
use crate::definition::{AggregationFn, AggregationQuery, ChartKind};
use crate::filter::RowFilter;
use crate::log_debug;
use crate::palette::Palette;
use crate::projector::{project_axis, project_slices};
use crate::view::ChartView;

/// Segment key used when the query has no segment column.
pub const IMPLICIT_SEGMENT: &str = "__all__";

// ============================================================================
// AGGREGATION RESULT
// ============================================================================

/// The reduced (segment × x) matrix for one query.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub buckets: BucketCache,

    /// X key ids in axis order.
    pub x_order: Vec<KeyId>,

    pub aggregation_fn: AggregationFn,

    /// Whether segments come from a real column (vs the implicit one).
    pub segmented: bool,

    /// Merged label of the value column, used to name an implicit series.
    pub value_label: String,
}

impl Aggregation {
    pub fn empty(aggregation_fn: AggregationFn) -> Self {
        Aggregation {
            buckets: BucketCache::new(),
            x_order: Vec::new(),
            aggregation_fn,
            segmented: false,
            value_label: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// X keys in axis order.
    pub fn x_domain(&self) -> Vec<String> {
        self.x_order
            .iter()
            .filter_map(|&id| self.buckets.x_keys.get(id))
            .map(str::to_string)
            .collect()
    }

    /// Segment keys in first-seen order.
    pub fn segment_keys(&self) -> &[String] {
        self.buckets.segments.keys()
    }

    /// Reduced value of one bucket; `None` when no row landed in it.
    pub fn get(&self, segment: &str, x: &str) -> Option<f64> {
        let segment = self.buckets.segments.id_of(segment)?;
        let x = self.buckets.x_keys.id_of(x)?;
        self.buckets
            .reduce(&GroupKey::new(segment, x), self.aggregation_fn)
    }

    /// Reduced value of one bucket, 0 when empty.
    pub fn value(&self, segment: KeyId, x: KeyId) -> f64 {
        self.buckets
            .reduce(&GroupKey::new(segment, x), self.aggregation_fn)
            .unwrap_or(0.0)
    }

    /// One segment's values aligned with `x_order`.
    ///
    /// With `cumulative` each value becomes the running total up to its x,
    /// restarting for every segment.
    pub fn segment_values(&self, segment: KeyId, cumulative: bool) -> Vec<f64> {
        let mut running = 0.0;
        self.x_order
            .iter()
            .map(|&x| {
                let value = self.value(segment, x);
                if cumulative {
                    running += value;
                    running
                } else {
                    value
                }
            })
            .collect()
    }

    /// One segment reduced over every x value pooled together.
    pub fn segment_total(&self, segment: KeyId) -> f64 {
        self.buckets
            .reduce(&GroupKey::segment_total(segment), self.aggregation_fn)
            .unwrap_or(0.0)
    }

    /// One x value reduced over every segment pooled together.
    pub fn x_total(&self, x: KeyId) -> f64 {
        self.buckets
            .reduce(&GroupKey::x_total(x), self.aggregation_fn)
            .unwrap_or(0.0)
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Resolved columns for one query.
struct QueryColumns {
    group: ColumnIndex,
    value: ColumnIndex,
    segment: Option<ColumnIndex>,
}

fn resolve_columns(header: &MergedHeader, query: &AggregationQuery) -> Option<QueryColumns> {
    let Some(group) = header.resolve(&query.group_column) else {
        log_debug!("AGG", "group column '{}' not in header", query.group_column);
        return None;
    };
    let Some(value) = header.resolve(&query.value_column) else {
        log_debug!("AGG", "value column '{}' not in header", query.value_column);
        return None;
    };

    let segment = if query.has_segment() {
        let resolved = header.resolve(&query.segment_column);
        if resolved.is_none() {
            log_debug!(
                "AGG",
                "segment column '{}' not in header, using a single segment",
                query.segment_column
            );
        }
        resolved
    } else {
        None
    };

    Some(QueryColumns { group, value, segment })
}

/// Filters, buckets and reduces `table` for `query`.
///
/// `header` must be the merged header of `table`. A group or value column
/// missing from the header yields an empty aggregation.
pub fn aggregate(table: &RawTable, header: &MergedHeader, query: &AggregationQuery) -> Aggregation {
    let mut result = Aggregation::empty(query.aggregation_fn);
    result.buckets.stats.total_rows = table.row_count();

    let Some(columns) = resolve_columns(header, query) else {
        return result;
    };
    result.segmented = columns.segment.is_some();
    result.value_label = header.label(columns.value).unwrap_or_default().to_string();

    let filter = RowFilter::compile(header, &query.filters);

    for row in &table.rows {
        let x_cell = cell_at(row, columns.group);
        if x_cell.is_blank() {
            continue;
        }
        if !filter.matches(row) {
            continue;
        }

        let x_key = x_cell.as_string();
        let segment_key = match columns.segment {
            Some(segment) => cell_at(row, segment).as_string(),
            None => IMPLICIT_SEGMENT.to_string(),
        };
        let value = cell_at(row, columns.value).as_number().unwrap_or(0.0);

        result.buckets.add(&segment_key, &x_key, value);
    }

    let positions = axis_positions(result.buckets.x_keys.keys());
    result.x_order = positions.into_iter().map(|i| i as KeyId).collect();

    log_debug!(
        "AGG",
        "aggregated rows={} bucketed={} segments={} x_keys={}",
        result.buckets.stats.total_rows,
        result.buckets.stats.bucketed_rows,
        result.buckets.segments.len(),
        result.buckets.x_keys.len()
    );

    result
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Calculates a chart view from a raw table and a query.
/// This is the main entry point for the calculation engine.
pub fn calculate_chart(
    table: &RawTable,
    header_rows_count: usize,
    query: &AggregationQuery,
    kind: ChartKind,
    palette: Palette,
) -> ChartView {
    if table.header_rows.is_empty() || table.is_empty() {
        return ChartView::empty(kind);
    }

    let header = merge_headers(&table.header_rows, header_rows_count);
    let aggregation = aggregate(table, &header, query);

    if kind.is_slice() {
        ChartView::Slices {
            slices: project_slices(&aggregation, palette),
        }
    } else {
        ChartView::Axis(project_axis(&aggregation, query.cumulative, palette))
    }
}
