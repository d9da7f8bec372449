//! FILENAME: core/chart-engine/src/definition.rs
//! Widget Definition - The serializable configuration.
//!
//! This module contains all the types needed to DESCRIBE a chart widget.
//! These structures are designed to be:
//! - Serializable (authored by the dashboard's filter builders and pickers)
//! - Pure values: two identical definitions always render identically
//! - Validated for shape only; unknown columns degrade at aggregation time

use serde::{Deserialize, Serialize};
use rustc_hash::FxHashSet;

use crate::error::DefinitionError;
use crate::log_warn;
use crate::palette::Palette;
use crate::ranking::OthersLabel;

// ============================================================================
// AGGREGATION
// ============================================================================

/// Reduction applied to each (segment, x) bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationFn {
    Sum,
    /// Row count, independent of the value column's magnitude.
    Count,
    Average,
    Min,
    Max,
}

impl Default for AggregationFn {
    fn default() -> Self {
        AggregationFn::Sum
    }
}

// ============================================================================
// FILTERS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// Case-insensitive exact match.
    Equals,
    /// Case-insensitive substring match.
    Contains,
    /// Numeric comparison; unparseable sides fail the row.
    Greater,
    Less,
}

/// One row predicate. A query ANDs all of its predicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPredicate {
    /// Opaque id, unique within a query.
    pub id: String,

    /// Merged header label. Predicates on unknown columns are skipped.
    pub column: String,

    pub operator: FilterOperator,

    pub value: String,
}

impl FilterPredicate {
    pub fn new(
        id: impl Into<String>,
        column: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        FilterPredicate {
            id: id.into(),
            column: column.into(),
            operator,
            value: value.into(),
        }
    }
}

// ============================================================================
// QUERY
// ============================================================================

/// Fully describes one engine invocation. No hidden state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationQuery {
    #[serde(default)]
    pub filters: Vec<FilterPredicate>,

    /// Column providing the x-axis (or slice) keys.
    pub group_column: String,

    /// Column providing the numbers to reduce.
    pub value_column: String,

    /// Optional series dimension. Empty means a single implicit segment.
    #[serde(default)]
    pub segment_column: String,

    #[serde(default)]
    pub aggregation_fn: AggregationFn,

    /// Replace each segment's values with a running total along the axis.
    #[serde(default)]
    pub cumulative: bool,
}

impl AggregationQuery {
    pub fn new(group_column: impl Into<String>, value_column: impl Into<String>) -> Self {
        AggregationQuery {
            filters: Vec::new(),
            group_column: group_column.into(),
            value_column: value_column.into(),
            segment_column: String::new(),
            aggregation_fn: AggregationFn::Sum,
            cumulative: false,
        }
    }

    pub fn with_segment(mut self, segment_column: impl Into<String>) -> Self {
        self.segment_column = segment_column.into();
        self
    }

    pub fn with_aggregation(mut self, aggregation_fn: AggregationFn) -> Self {
        self.aggregation_fn = aggregation_fn;
        self
    }

    pub fn with_filter(mut self, filter: FilterPredicate) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_cumulative(mut self, cumulative: bool) -> Self {
        self.cumulative = cumulative;
        self
    }

    /// Whether a segment column was requested at all.
    pub fn has_segment(&self) -> bool {
        !self.segment_column.trim().is_empty()
    }

    /// Shape checks only: column names present, filter ids unique.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.group_column.trim().is_empty() {
            return Err(DefinitionError::MissingColumn("group"));
        }
        if self.value_column.trim().is_empty() {
            return Err(DefinitionError::MissingColumn("value"));
        }

        let mut seen = FxHashSet::default();
        for filter in &self.filters {
            if !seen.insert(filter.id.as_str()) {
                return Err(DefinitionError::DuplicateFilterId(filter.id.clone()));
            }
        }
        Ok(())
    }
}

// ============================================================================
// WIDGETS
// ============================================================================

/// Chart family. Decides between axis output and slice output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Area,
    Pie,
    Donut,
}

impl ChartKind {
    /// Pie-style charts render flat name/value slices.
    pub fn is_slice(self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Donut)
    }
}

/// Collapse long slice lists into the leading items plus "Others".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopNConfig {
    pub limit: usize,

    #[serde(default)]
    pub others_label: OthersLabel,
}

/// One dashboard tile: where the data comes from and how to shape it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDefinition {
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Key of the table in the data source.
    pub source_key: String,

    pub chart_kind: ChartKind,

    pub query: AggregationQuery,

    #[serde(default)]
    pub palette: Palette,

    #[serde(default)]
    pub top_n: Option<TopNConfig>,
}

impl WidgetDefinition {
    pub fn new(
        id: impl Into<String>,
        source_key: impl Into<String>,
        chart_kind: ChartKind,
        query: AggregationQuery,
    ) -> Self {
        WidgetDefinition {
            id: id.into(),
            title: String::new(),
            source_key: source_key.into(),
            chart_kind,
            query,
            palette: Palette::Default,
            top_n: None,
        }
    }

    pub fn validate(&self) -> Result<(), DefinitionError> {
        self.query.validate()?;
        if let Some(top_n) = &self.top_n {
            if top_n.limit == 0 {
                return Err(DefinitionError::ZeroLimit(self.id.clone()));
            }
        }
        Ok(())
    }
}

/// The full set of widgets on a dashboard page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDefinition {
    #[serde(default)]
    pub widgets: Vec<WidgetDefinition>,
}

impl DashboardDefinition {
    /// Parses and validates a dashboard from JSON.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let dashboard: DashboardDefinition = serde_json::from_str(json).map_err(|e| {
            log_warn!("DEFINITION", "dashboard JSON rejected: {}", e);
            DefinitionError::from(e)
        })?;
        if let Err(e) = dashboard.validate() {
            log_warn!("DEFINITION", "dashboard definition rejected: {}", e);
            return Err(e);
        }
        Ok(dashboard)
    }

    pub fn validate(&self) -> Result<(), DefinitionError> {
        let mut seen = FxHashSet::default();
        for widget in &self.widgets {
            if !seen.insert(widget.id.as_str()) {
                return Err(DefinitionError::DuplicateWidgetId(widget.id.clone()));
            }
            widget.validate()?;
        }
        Ok(())
    }

    pub fn widget(&self, id: &str) -> Option<&WidgetDefinition> {
        self.widgets.iter().find(|w| w.id == id)
    }
}
