//! FILENAME: core/chart-engine/src/projector.rs
//! PURPOSE: Reshapes an aggregation into axis series or pie slices.
//! CONTEXT: Series follow segment first-seen order; slices follow key
//! first-seen order and are not ranked (callers sort or apply Top-N).

use crate::definition::AggregationFn;
use crate::engine::Aggregation;
use crate::palette::{palette_color, Palette};
use crate::view::{AxisView, Series, SlicePoint};

/// Axis mode: one series per segment, aligned with the ordered x-domain.
///
/// Buckets with no rows read as 0. The implicit segment is named after the
/// value column.
pub fn project_axis(aggregation: &Aggregation, cumulative: bool, palette: Palette) -> AxisView {
    if aggregation.is_empty() {
        return AxisView::default();
    }

    let series = aggregation
        .buckets
        .segments
        .ids()
        .enumerate()
        .map(|(index, segment)| {
            let name = if aggregation.segmented {
                aggregation.buckets.segments.get(segment).unwrap_or_default().to_string()
            } else {
                aggregation.value_label.clone()
            };
            Series {
                name,
                values: aggregation.segment_values(segment, cumulative),
                color: palette_color(index, palette).to_string(),
            }
        })
        .collect();

    AxisView {
        x_domain: aggregation.x_domain(),
        series,
    }
}

/// Slice mode.
///
/// With a segment column there is one slice per segment, reduced over all of
/// its x values pooled. Without one there is one slice per x value.
/// Non-positive slices are dropped, except for `min` where zero and negative
/// minima are meaningful.
pub fn project_slices(aggregation: &Aggregation, palette: Palette) -> Vec<SlicePoint> {
    let buckets = &aggregation.buckets;

    let candidates: Vec<(&str, f64)> = if aggregation.segmented {
        buckets
            .segments
            .ids()
            .filter_map(|id| Some((buckets.segments.get(id)?, aggregation.segment_total(id))))
            .collect()
    } else {
        buckets
            .x_keys
            .ids()
            .filter_map(|id| Some((buckets.x_keys.get(id)?, aggregation.x_total(id))))
            .collect()
    };

    let keep_non_positive = aggregation.aggregation_fn == AggregationFn::Min;

    candidates
        .into_iter()
        .filter(|&(_, value)| keep_non_positive || value > 0.0)
        .enumerate()
        .map(|(index, (name, value))| SlicePoint::new(name, value, palette_color(index, palette)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::AggregationQuery;
    use crate::engine::aggregate;
    use table::{merge_headers, CellValue, RawTable};

    fn table() -> RawTable {
        RawTable::new(
            vec![vec!["Year".to_string(), "Region".to_string(), "Sales".to_string()]],
            vec![
                vec![CellValue::from("2022"), CellValue::from("North"), CellValue::Number(4.0)],
                vec![CellValue::from("2021"), CellValue::from("South"), CellValue::Number(-1.0)],
                vec![CellValue::from("2021"), CellValue::from("North"), CellValue::Number(2.0)],
                vec![CellValue::from("2023"), CellValue::from("South"), CellValue::Number(0.0)],
            ],
        )
    }

    fn run(query: &AggregationQuery) -> Aggregation {
        let t = table();
        let header = merge_headers(&t.header_rows, 1);
        aggregate(&t, &header, query)
    }

    #[test]
    fn test_axis_series_aligned_with_domain() {
        let agg = run(&AggregationQuery::new("Year", "Sales").with_segment("Region"));
        let axis = project_axis(&agg, false, Palette::Default);

        assert_eq!(axis.x_domain, vec!["2021", "2022", "2023"]);
        assert_eq!(axis.series.len(), 2);
        assert_eq!(axis.series[0].name, "North");
        assert_eq!(axis.series[0].values, vec![2.0, 4.0, 0.0]);
        assert_eq!(axis.series[1].name, "South");
        assert_eq!(axis.series[1].values, vec![-1.0, 0.0, 0.0]);
        assert_eq!(axis.series[0].color, palette_color(0, Palette::Default));
        assert_eq!(axis.series[1].color, palette_color(1, Palette::Default));
    }

    #[test]
    fn test_axis_implicit_series_named_after_value_column() {
        let agg = run(&AggregationQuery::new("Year", "Sales"));
        let axis = project_axis(&agg, true, Palette::Warm);
        assert_eq!(axis.series.len(), 1);
        assert_eq!(axis.series[0].name, "Sales");
        assert_eq!(axis.series[0].values, vec![1.0, 5.0, 5.0]);
    }

    #[test]
    fn test_slices_per_segment_pool_all_x() {
        let agg = run(&AggregationQuery::new("Year", "Sales").with_segment("Region"));
        let slices = project_slices(&agg, Palette::Default);
        // South totals -1 and is dropped
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].name, "North");
        assert_eq!(slices[0].value, 6.0);
    }

    #[test]
    fn test_slices_per_x_in_first_seen_order() {
        let agg = run(&AggregationQuery::new("Year", "Sales"));
        let slices = project_slices(&agg, Palette::Default);
        let names: Vec<&str> = slices.iter().map(|s| s.name.as_str()).collect();
        // 2023 sums to 0 and is dropped
        assert_eq!(names, vec!["2022", "2021"]);
        assert_eq!(slices[1].value, 1.0);
        assert_eq!(slices[1].color, palette_color(1, Palette::Default));
    }

    #[test]
    fn test_slices_keep_non_positive_for_min() {
        let agg = run(
            &AggregationQuery::new("Year", "Sales")
                .with_segment("Region")
                .with_aggregation(AggregationFn::Min),
        );
        let slices = project_slices(&agg, Palette::Default);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[1].name, "South");
        assert_eq!(slices[1].value, -1.0);
    }

    #[test]
    fn test_average_slices_pool_raw_values() {
        let agg = run(
            &AggregationQuery::new("Year", "Sales")
                .with_segment("Region")
                .with_aggregation(AggregationFn::Average),
        );
        let slices = project_slices(&agg, Palette::Default);
        assert_eq!(slices[0].name, "North");
        assert_eq!(slices[0].value, 3.0);
    }

    #[test]
    fn test_empty_aggregation() {
        let agg = run(&AggregationQuery::new("Missing", "Sales"));
        assert!(project_axis(&agg, false, Palette::Default).is_empty());
        assert!(project_slices(&agg, Palette::Default).is_empty());
    }
}
