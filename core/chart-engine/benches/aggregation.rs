//! FILENAME: core/chart-engine/benches/aggregation.rs
//! Aggregation throughput over synthetic sales tables.

use chart_engine::{
    calculate_chart, reduce_slices, AggregationFn, AggregationQuery, ChartKind, FilterOperator,
    FilterPredicate, OthersLabel, Palette,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use table::{CellValue, RawTable};

const REGIONS: [&str; 6] = ["North", "South", "East", "West", "Center", "Coast"];
const PRODUCTS: [&str; 4] = ["Widget", "Gadget", "Gizmo", "Doohickey"];

fn gen_table(n: usize) -> RawTable {
    let header = ["Date", "Region", "Product", "Amount"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let rows = (0..n)
        .map(|i| {
            let month = i % 36;
            let date = format!("{}-{:02}", 2022 + month / 12, month % 12 + 1);
            vec![
                CellValue::Text(date),
                CellValue::from(REGIONS[i % REGIONS.len()]),
                CellValue::from(PRODUCTS[(i / 7) % PRODUCTS.len()]),
                CellValue::Number((i % 997) as f64 * 1.5),
            ]
        })
        .collect();

    RawTable::new(vec![header], rows)
}

fn bench_axis(c: &mut Criterion) {
    let mut group = c.benchmark_group("axis");
    for &n in &[10_000usize, 100_000usize] {
        let table = gen_table(n);
        let query = AggregationQuery::new("Date", "Amount")
            .with_segment("Region")
            .with_cumulative(true);
        group.bench_with_input(BenchmarkId::from_parameter(n), &table, |b, table| {
            b.iter(|| black_box(calculate_chart(table, 1, &query, ChartKind::Line, Palette::Default)));
        });
    }
    group.finish();
}

fn bench_filtered_slices(c: &mut Criterion) {
    let mut group = c.benchmark_group("slices");
    for &n in &[10_000usize, 100_000usize] {
        let table = gen_table(n);
        let query = AggregationQuery::new("Region", "Amount")
            .with_aggregation(AggregationFn::Average)
            .with_filter(FilterPredicate::new("p", "Product", FilterOperator::Contains, "g"))
            .with_filter(FilterPredicate::new("a", "Amount", FilterOperator::Greater, "100"));
        group.bench_with_input(BenchmarkId::from_parameter(n), &table, |b, table| {
            b.iter(|| {
                let view = calculate_chart(table, 1, &query, ChartKind::Pie, Palette::Warm);
                let slices = view.as_slices().map(<[_]>::to_vec).unwrap_or_default();
                black_box(reduce_slices(slices, 3, OthersLabel::WithCount))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_axis, bench_filtered_slices);
criterion_main!(benches);
