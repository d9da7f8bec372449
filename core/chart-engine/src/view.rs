//! FILENAME: core/chart-engine/src/view.rs
//! Chart View - Renderable output for chart option builders.
//!
//! Two shapes are produced:
//! - Axis mode (line/bar/area): an ordered x-domain plus one aligned value
//!   array per segment
//! - Slice mode (pie/donut): flat name/value pairs
//!
//! Colors are plain CSS hex strings; nothing here knows about the charting
//! library that eventually draws them.

use serde::{Deserialize, Serialize};

use crate::definition::ChartKind;

// ============================================================================
// AXIS MODE
// ============================================================================

/// One line/bar/area series, aligned 1:1 with `AxisView::x_domain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisView {
    pub x_domain: Vec<String>,
    pub series: Vec<Series>,
}

impl AxisView {
    pub fn is_empty(&self) -> bool {
        self.x_domain.is_empty() && self.series.is_empty()
    }

    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}

// ============================================================================
// SLICE MODE
// ============================================================================

/// One pie/donut slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlicePoint {
    pub name: String,
    pub value: f64,
    pub color: String,

    /// Set on the synthetic remainder bucket so renderers can mute it.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_others: bool,
}

impl SlicePoint {
    pub fn new(name: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        SlicePoint {
            name: name.into(),
            value,
            color: color.into(),
            is_others: false,
        }
    }
}

// ============================================================================
// RESULT
// ============================================================================

/// Output of one chart calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ChartView {
    Axis(AxisView),
    Slices { slices: Vec<SlicePoint> },
}

impl ChartView {
    /// An empty result of the shape `kind` expects.
    pub fn empty(kind: ChartKind) -> Self {
        if kind.is_slice() {
            ChartView::Slices { slices: Vec::new() }
        } else {
            ChartView::Axis(AxisView::default())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ChartView::Axis(axis) => axis.is_empty(),
            ChartView::Slices { slices } => slices.is_empty(),
        }
    }

    pub fn as_axis(&self) -> Option<&AxisView> {
        match self {
            ChartView::Axis(axis) => Some(axis),
            ChartView::Slices { .. } => None,
        }
    }

    pub fn as_slices(&self) -> Option<&[SlicePoint]> {
        match self {
            ChartView::Axis(_) => None,
            ChartView::Slices { slices } => Some(slices),
        }
    }
}

/// A rendered widget, ready for its chart option builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOutput {
    pub widget_id: String,
    pub title: String,
    pub chart_kind: ChartKind,
    pub view: ChartView,
    /// Data rows in the source table (0 when the table is absent).
    pub source_rows: usize,
    /// Rows that passed the filters and landed in a bucket.
    pub matched_rows: usize,
}
