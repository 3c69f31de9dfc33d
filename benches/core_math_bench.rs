use chart_viewport::api::{ChartViewport, ViewportConfig};
use chart_viewport::core::{AxisDependency, ChartData, EntrySet};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn sized_chart() -> ChartViewport {
    let mut chart = ChartViewport::new(ViewportConfig::default()).expect("viewport init");
    chart.set_chart_dimensions(1920.0, 1080.0);
    chart.set_content_margins(40.0, 20.0, 60.0, 30.0);
    chart.set_x_range(0.0, 10_000.0).expect("x range");
    chart
        .set_axis_range(AxisDependency::Left, 0.0, 2_500.0)
        .expect("y range");
    chart.zoom(3.0, 2.0, 960.0, 540.0);
    chart
}

fn bench_pixel_round_trip(c: &mut Criterion) {
    let chart = sized_chart();

    c.bench_function("pixel_round_trip", |b| {
        b.iter(|| {
            let px = chart
                .pixel_for_values(black_box(4_321.123), black_box(1_234.5), AxisDependency::Left)
                .expect("to pixel");
            let _ = chart
                .values_by_touch_point(px.x, px.y, AxisDependency::Left)
                .expect("from pixel");
        })
    });
}

fn bench_point_batch_10k(c: &mut Criterion) {
    let chart = sized_chart();
    let source: Vec<f64> = (0..10_000)
        .flat_map(|i| {
            let x = f64::from(i);
            [x, 1_000.0 + (x * 0.01).sin() * 500.0]
        })
        .collect();

    c.bench_function("point_values_to_pixel_10k", |b| {
        b.iter(|| {
            let mut pts = source.clone();
            chart
                .point_values_to_pixel(AxisDependency::Left, black_box(&mut pts))
                .expect("batch mapping");
            pts
        })
    });
}

fn bench_highlight_10k(c: &mut Criterion) {
    let mut chart = sized_chart();
    let points: Vec<(f64, f64)> = (0..10_000)
        .map(|i| {
            let x = f64::from(i);
            (x, 1_000.0 + (x * 0.01).cos() * 500.0)
        })
        .collect();
    let data = ChartData::new()
        .with_set("primary", EntrySet::from_xy(&points))
        .with_set("shifted", EntrySet::from_xy(&points[..5_000]));

    c.bench_function("highlight_at_pixel_10k", |b| {
        b.iter(|| chart.highlight_at_pixel(&data, black_box(812.0), black_box(433.0)))
    });
}

criterion_group!(
    benches,
    bench_pixel_round_trip,
    bench_point_batch_10k,
    bench_highlight_10k
);
criterion_main!(benches);
