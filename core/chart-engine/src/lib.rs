//! FILENAME: core/chart-engine/src/lib.rs
//! Declarative aggregation engine behind the dashboard chart widgets.
//!
//! This crate turns a raw table plus a small query object into ready-to-render
//! series or slices. It depends on `table` for the cell model and headers.
//!
//! Layers:
//! - `definition`: Serializable configuration (what a widget asks for)
//! - `filter`: Row predicates resolved against the merged header
//! - `cache`: Per-call buckets and accumulators (HOW we compute)
//! - `engine`: Grouping, reduction and axis ordering
//! - `projector` / `view`: Renderable output (WHAT we display)
//! - `ranking`: Top-N with an aggregated "Others" bucket
//! - `widget`: Renders widget definitions against a data source

pub mod logging;
pub mod error;
pub mod definition;
pub mod filter;
pub mod cache;
pub mod axis;
pub mod palette;
pub mod view;
pub mod engine;
pub mod projector;
pub mod ranking;
pub mod widget;

pub use definition::*;
pub use error::DefinitionError;
pub use filter::{row_passes_filters, RowFilter};
pub use axis::order_axis;
pub use palette::{palette_color, Palette, OTHERS_COLOR};
pub use view::*;
pub use engine::{aggregate, calculate_chart, Aggregation, IMPLICIT_SEGMENT};
pub use projector::{project_axis, project_slices};
pub use ranking::{
    reduce_slices, top_n_with_others, FoldRule, OthersLabel, RankedItem, SortKey, TopNOptions,
    Weight, OTHERS_NAME,
};
pub use widget::{render_dashboard, render_widget};
