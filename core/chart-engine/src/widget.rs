//! FILENAME: core/chart-engine/src/widget.rs
//! PURPOSE: Renders widget definitions against a data source.
//! CONTEXT: This is what dashboard tiles call. Each call reads the current
//! snapshot, recomputes from scratch and returns fresh output; nothing is
//! shared between calls, so many widgets may render from one table at once.

use table::{merge_headers, DataSource};

use crate::definition::{DashboardDefinition, WidgetDefinition};
use crate::engine::aggregate;
use crate::projector::{project_axis, project_slices};
use crate::ranking::reduce_slices;
use crate::view::{ChartView, WidgetOutput};
use crate::{log_debug, log_info};

/// Renders one widget. An absent or empty table renders as empty output.
pub fn render_widget(source: &dyn DataSource, widget: &WidgetDefinition) -> WidgetOutput {
    let mut output = WidgetOutput {
        widget_id: widget.id.clone(),
        title: widget.title.clone(),
        chart_kind: widget.chart_kind,
        view: ChartView::empty(widget.chart_kind),
        source_rows: 0,
        matched_rows: 0,
    };

    let Some(table) = source.table(&widget.source_key) else {
        log_debug!("WIDGET", "widget={} source '{}' not loaded", widget.id, widget.source_key);
        return output;
    };
    output.source_rows = table.row_count();
    if table.header_rows.is_empty() || table.is_empty() {
        return output;
    }

    let header = merge_headers(&table.header_rows, source.header_rows_count(&widget.source_key));
    let aggregation = aggregate(&table, &header, &widget.query);
    output.matched_rows = aggregation.buckets.stats.bucketed_rows;

    output.view = if widget.chart_kind.is_slice() {
        let mut slices = project_slices(&aggregation, widget.palette);
        if let Some(top_n) = &widget.top_n {
            slices = reduce_slices(slices, top_n.limit, top_n.others_label);
        }
        ChartView::Slices { slices }
    } else {
        ChartView::Axis(project_axis(&aggregation, widget.query.cumulative, widget.palette))
    };

    let items = match &output.view {
        ChartView::Axis(axis) => axis.series.len(),
        ChartView::Slices { slices } => slices.len(),
    };
    log_info!(
        "WIDGET",
        "rendered widget={} kind={:?} rows={} matched={} items={}",
        widget.id,
        widget.chart_kind,
        output.source_rows,
        output.matched_rows,
        items
    );
    output
}

/// Renders every widget of a dashboard, in definition order.
pub fn render_dashboard(source: &dyn DataSource, dashboard: &DashboardDefinition) -> Vec<WidgetOutput> {
    dashboard
        .widgets
        .iter()
        .map(|widget| render_widget(source, widget))
        .collect()
}
