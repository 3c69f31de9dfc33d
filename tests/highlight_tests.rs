use chart_viewport::api::{AxisConfig, ChartViewport, InvalidationLevel, InvalidationTopic, ViewportConfig};
use chart_viewport::core::{AxisDependency, ChartData, Entry, EntrySet, SeriesKind};
use chart_viewport::interaction::SelectionMetric;

fn chart(config: ViewportConfig) -> ChartViewport {
    let mut chart = ChartViewport::new(config).expect("viewport init");
    chart.set_chart_dimensions(500.0, 500.0);
    chart.set_x_range(0.0, 100.0).expect("x range");
    chart
        .set_axis_range(AxisDependency::Left, 0.0, 100.0)
        .expect("y range");
    chart
}

#[test]
fn nearest_candidate_within_threshold_wins() {
    let mut chart = chart(ViewportConfig::new().with_max_highlight_distance(10.0));
    let data = ChartData::new()
        .with_set("near", EntrySet::from_xy(&[(50.0, 50.0)]))
        .with_set("far", EntrySet::from_xy(&[(50.0, 50.4)]));

    let highlight = chart
        .highlight_at_pixel(&data, 250.0, 253.0)
        .expect("highlight within threshold");
    assert_eq!(highlight.data_set_index, 0);
    assert_eq!((highlight.x, highlight.y), (50.0, 50.0));
    assert_eq!((highlight.pixel_x, highlight.pixel_y), (250.0, 250.0));
    assert!((highlight.distance - 3.0).abs() <= 1e-9);
    assert_eq!(highlight.stack_index, None);
    assert_eq!(chart.highlighted(), Some(highlight));
}

#[test]
fn candidate_beyond_threshold_is_rejected() {
    let mut chart = chart(ViewportConfig::new().with_max_highlight_distance(10.0));
    let data = ChartData::new().with_set("only", EntrySet::from_xy(&[(50.0, 50.0)]));

    assert_eq!(chart.highlight_at_pixel(&data, 250.0, 300.0), None);
    assert_eq!(chart.highlighted(), None);
}

#[test]
fn distance_equal_to_threshold_is_rejected() {
    let mut chart = chart(ViewportConfig::new().with_max_highlight_distance(10.0));
    let data = ChartData::new().with_set("only", EntrySet::from_xy(&[(50.0, 50.0)]));

    assert_eq!(chart.highlight_at_pixel(&data, 250.0, 260.0), None);
    assert!(chart.highlight_at_pixel(&data, 250.0, 259.0).is_some());
}

#[test]
fn pointer_resolves_to_closest_x() {
    let mut chart = chart(ViewportConfig::default());
    let data = ChartData::new().with_set(
        "series",
        EntrySet::from_xy(&[(0.0, 10.0), (10.0, 20.0), (20.0, 30.0)]),
    );

    let highlight = chart
        .highlight_at_pixel(&data, 65.0, 400.0)
        .expect("highlight");
    assert_eq!(highlight.x, 10.0);
    assert_eq!(highlight.y, 20.0);
}

#[test]
fn disabled_sets_are_skipped() {
    let mut chart = chart(ViewportConfig::default());
    let data = ChartData::new()
        .with_set(
            "hidden",
            EntrySet::from_xy(&[(50.0, 50.0)]).with_highlight_enabled(false),
        )
        .with_set("shown", EntrySet::from_xy(&[(50.0, 40.0)]));

    let highlight = chart
        .highlight_at_pixel(&data, 250.0, 250.0)
        .expect("highlight");
    assert_eq!(highlight.data_set_index, 1);
}

#[test]
fn ties_follow_draw_order_unless_kind_is_prioritized() {
    let data = ChartData::new()
        .with_set(
            "line",
            EntrySet::from_xy(&[(50.0, 50.0)]).with_kind(SeriesKind::Line),
        )
        .with_set(
            "bar",
            EntrySet::from_xy(&[(50.0, 50.0)]).with_kind(SeriesKind::Bar),
        );

    let mut plain = chart(ViewportConfig::default());
    let highlight = plain
        .highlight_at_pixel(&data, 250.0, 240.0)
        .expect("highlight");
    assert_eq!(highlight.data_set_index, 0);

    let mut prioritized =
        chart(ViewportConfig::new().with_series_kind_priority(vec![SeriesKind::Bar]));
    let highlight = prioritized
        .highlight_at_pixel(&data, 250.0, 240.0)
        .expect("highlight");
    assert_eq!(highlight.data_set_index, 1);
}

#[test]
fn axis_with_vertically_closer_candidates_wins() {
    let config = ViewportConfig::new().with_right_axis(Some(AxisConfig::default()));
    let mut chart = chart(config);
    chart
        .set_axis_range(AxisDependency::Right, 0.0, 10.0)
        .expect("right axis");

    let data = ChartData::new()
        .with_set("left", EntrySet::from_xy(&[(50.0, 50.0)]))
        .with_set(
            "right",
            EntrySet::from_xy(&[(50.0, 2.0)]).with_axis(AxisDependency::Right),
        );

    let highlight = chart
        .highlight_at_pixel(&data, 250.0, 390.0)
        .expect("highlight");
    assert_eq!(highlight.data_set_index, 1);
    assert_eq!(highlight.axis, AxisDependency::Right);
    assert_eq!(highlight.pixel_y, 400.0);

    let highlight = chart
        .highlight_at_pixel(&data, 250.0, 260.0)
        .expect("highlight");
    assert_eq!(highlight.axis, AxisDependency::Left);
}

#[test]
fn along_x_metric_ignores_vertical_offset() {
    let config = ViewportConfig::new()
        .with_selection_metric(SelectionMetric::AlongX)
        .with_max_highlight_distance(10.0);
    let mut chart = chart(config);
    let data = ChartData::new().with_set(
        "bars",
        EntrySet::from_xy(&[(50.0, 90.0)]).with_kind(SeriesKind::Bar),
    );

    let highlight = chart
        .highlight_at_pixel(&data, 252.0, 480.0)
        .expect("column hit");
    assert!((highlight.distance - 2.0).abs() <= 1e-9);
}

#[test]
fn stacked_entry_resolves_touched_segment() {
    let mut chart = chart(ViewportConfig::default());
    let data = ChartData::new().with_set(
        "stack",
        EntrySet::new(vec![Entry::stacked(50.0, &[10.0, 20.0, 30.0])]).with_kind(SeriesKind::Bar),
    );

    let highlight = chart
        .highlight_at_pixel(&data, 250.0, 400.0)
        .expect("highlight");
    assert_eq!(highlight.stack_index, Some(1));
    assert_eq!(highlight.y, 60.0);
    assert_eq!(highlight.pixel_y, 350.0);
}

#[test]
fn highlight_changes_raise_cursor_invalidation() {
    let mut chart = chart(ViewportConfig::default());
    let data = ChartData::new().with_set("series", EntrySet::from_xy(&[(50.0, 50.0)]));
    chart.take_pending_invalidation();

    chart.highlight_at_pixel(&data, 250.0, 250.0);
    let pending = chart.take_pending_invalidation();
    assert_eq!(pending.level(), InvalidationLevel::Cursor);
    assert!(pending.has_topic(InvalidationTopic::Highlight));

    chart.highlight_at_pixel(&data, 251.0, 252.0);
    assert!(chart.take_pending_invalidation().is_none());

    chart.clear_highlight();
    assert_eq!(chart.highlighted(), None);
    assert_eq!(
        chart.take_pending_invalidation().level(),
        InvalidationLevel::Cursor
    );
}

#[test]
fn programmatic_highlight_targets_any_y() {
    let mut chart = chart(ViewportConfig::default());
    let data = ChartData::new()
        .with_set("a", EntrySet::from_xy(&[(50.0, 50.0)]))
        .with_set(
            "b",
            EntrySet::from_xy(&[(50.0, 5.0)]).with_axis(AxisDependency::Right),
        );

    let highlight = chart
        .highlight_value(&data, 50.0, 1, None)
        .expect("valid data set");
    assert!(highlight.y.is_nan());
    assert_eq!(highlight.axis, AxisDependency::Right);

    assert_eq!(chart.highlight_value(&data, 50.0, 7, None), None);
    assert_eq!(chart.highlighted(), None);
    assert_eq!(chart.highlight_value(&data, f64::NAN, 0, None), None);
}

#[test]
fn empty_data_highlights_nothing() {
    let mut chart = chart(ViewportConfig::default());
    assert_eq!(chart.highlight_at_pixel(&ChartData::new(), 250.0, 250.0), None);
}
