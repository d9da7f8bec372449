//! FILENAME: core/chart-engine/src/filter.rs
//! PURPOSE: Row filtering for aggregation queries.
//! CONTEXT: Predicates name columns by merged header label. They are resolved
//! to column positions once per call; predicates whose column is absent from
//! this particular source are dropped so a shared config still renders.

use smallvec::SmallVec;
use table::header::{ColumnIndex, MergedHeader};
use table::table::cell_at;
use table::{parse_number, CellValue};

use crate::definition::{FilterOperator, FilterPredicate};
use crate::log_debug;

// ============================================================================
// COMPILED PREDICATES
// ============================================================================

/// A predicate with its column resolved and its operand pre-folded.
#[derive(Debug, Clone)]
struct CompiledPredicate {
    column: ColumnIndex,
    operator: FilterOperator,
    /// Lower-cased operand for the string operators.
    needle: String,
    /// Parsed operand for the numeric operators.
    number: Option<f64>,
}

impl CompiledPredicate {
    fn matches(&self, cell: &CellValue) -> bool {
        match self.operator {
            FilterOperator::Equals => cell.as_string().to_lowercase() == self.needle,
            FilterOperator::Contains => cell.as_string().to_lowercase().contains(&self.needle),
            FilterOperator::Greater => match (cell.as_number(), self.number) {
                (Some(lhs), Some(rhs)) => lhs > rhs,
                _ => false,
            },
            FilterOperator::Less => match (cell.as_number(), self.number) {
                (Some(lhs), Some(rhs)) => lhs < rhs,
                _ => false,
            },
        }
    }
}

// ============================================================================
// ROW FILTER
// ============================================================================

/// The conjunction of a query's resolvable predicates.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    predicates: SmallVec<[CompiledPredicate; 4]>,
}

impl RowFilter {
    /// Resolves predicates against the header. Unknown columns are skipped.
    pub fn compile(header: &MergedHeader, filters: &[FilterPredicate]) -> Self {
        let predicates = filters
            .iter()
            .filter_map(|filter| {
                let Some(column) = header.resolve(&filter.column) else {
                    log_debug!(
                        "FILTER",
                        "skipping filter id={} on unknown column '{}'",
                        filter.id,
                        filter.column
                    );
                    return None;
                };
                Some(CompiledPredicate {
                    column,
                    operator: filter.operator,
                    needle: filter.value.to_lowercase(),
                    number: parse_number(&filter.value),
                })
            })
            .collect();

        RowFilter { predicates }
    }

    /// True when the row satisfies every resolvable predicate.
    pub fn matches(&self, row: &[CellValue]) -> bool {
        self.predicates
            .iter()
            .all(|p| p.matches(cell_at(row, p.column)))
    }

    /// Number of predicates that resolved to a column.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Evaluates `filters` against a single row.
///
/// Prefer [`RowFilter::compile`] when testing many rows against one query.
pub fn row_passes_filters(
    row: &[CellValue],
    header: &MergedHeader,
    filters: &[FilterPredicate],
) -> bool {
    RowFilter::compile(header, filters).matches(row)
}
