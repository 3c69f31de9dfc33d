use chart_viewport::api::{AxisConfig, ChartViewport, VIEWPORT_CONFIG_JSON_SCHEMA_V1, ViewportConfig};
use chart_viewport::core::{AxisOrientation, ScaleLimits, SeriesKind};
use chart_viewport::error::ChartError;
use chart_viewport::interaction::SelectionMetric;

fn tuned_config() -> ViewportConfig {
    ViewportConfig::new()
        .with_orientation(AxisOrientation::Horizontal)
        .with_right_axis(Some(AxisConfig::inverted(true)))
        .with_scale_limits(ScaleLimits {
            min_scale_x: 1.0,
            max_scale_x: 20.0,
            min_scale_y: 0.5,
            max_scale_y: 8.0,
        })
        .with_drag_offsets(12.0, 4.0)
        .with_min_margin(15.0)
        .with_max_highlight_distance(42.0)
        .with_selection_metric(SelectionMetric::AlongX)
        .with_series_kind_priority(vec![SeriesKind::Bar, SeriesKind::Line])
}

#[test]
fn config_json_round_trip() {
    let config = tuned_config();
    let json = config.to_json_pretty().expect("serialize");
    let parsed = ViewportConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn config_contract_round_trip() {
    let config = tuned_config();
    let json = config.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));

    let parsed = ViewportConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let parsed = ViewportConfig::from_json_str("{}").expect("parse");
    assert_eq!(parsed.orientation, AxisOrientation::Vertical);
    assert_eq!(parsed.left_axis, Some(AxisConfig::default()));
    assert_eq!(parsed.right_axis, None);
    assert_eq!(parsed.highlighter.max_highlight_distance, 500.0);
    assert_eq!(parsed.scale_limits.min_scale_x, 1.0);
    assert_eq!(parsed.drag_offsets.x, 0.0);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let payload = format!(
        r#"{{"schema_version": {}, "config": {{}}}}"#,
        VIEWPORT_CONFIG_JSON_SCHEMA_V1 + 1
    );
    let err = ViewportConfig::from_json_str(&payload).expect_err("unsupported version");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = ViewportConfig::from_json_str("{ not json").expect_err("malformed");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn parsed_config_is_validated() {
    let err = ViewportConfig::from_json_str(r#"{"left_axis": null}"#).expect_err("no axes");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = ViewportConfig::from_json_str(r#"{"highlighter": {"max_highlight_distance": -1.0}}"#)
        .expect_err("negative distance");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn viewport_rejects_invalid_config() {
    let err = ChartViewport::new(ViewportConfig::new().with_min_margin(f64::NAN))
        .expect_err("nan margin");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));

    let err = ChartViewport::new(ViewportConfig::new().with_drag_offsets(-1.0, 0.0))
        .expect_err("negative drag");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn viewport_applies_config_to_handler() {
    let mut chart = ChartViewport::new(tuned_config()).expect("viewport init");
    chart.set_chart_dimensions(400.0, 300.0);
    chart.set_content_margins(0.0, 0.0, 0.0, 0.0);

    let handler = chart.handler();
    assert_eq!(handler.min_margin(), 15.0);
    assert_eq!(handler.offset_left(), 15.0);
    assert_eq!(handler.drag_offsets().x, 12.0);
    assert_eq!(handler.scale_limits().max_scale_x, 20.0);
    assert_eq!(chart.highlighter_config().metric, SelectionMetric::AlongX);
    assert_eq!(chart.orientation(), AxisOrientation::Horizontal);
}
