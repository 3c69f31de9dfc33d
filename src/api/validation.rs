use crate::error::{ChartError, ChartResult};

use super::ViewportConfig;

pub(super) fn validate_viewport_config(config: &ViewportConfig) -> ChartResult<()> {
    if config.left_axis.is_none() && config.right_axis.is_none() {
        return Err(ChartError::InvalidData(
            "viewport needs at least one value axis".to_owned(),
        ));
    }

    if !config.min_margin.is_finite() || config.min_margin < 0.0 {
        return Err(ChartError::InvalidViewport {
            width: config.min_margin,
            height: config.min_margin,
        });
    }

    let limits = config.scale_limits;
    for (name, value) in [
        ("min_scale_x", limits.min_scale_x),
        ("max_scale_x", limits.max_scale_x),
        ("min_scale_y", limits.min_scale_y),
        ("max_scale_y", limits.max_scale_y),
    ] {
        validate_positive(name, value)?;
    }
    if limits.min_scale_x > limits.max_scale_x || limits.min_scale_y > limits.max_scale_y {
        return Err(ChartError::InvalidData(
            "minimum scale must not exceed maximum scale".to_owned(),
        ));
    }

    for (name, value) in [
        ("drag_offset_x", config.drag_offsets.x),
        ("drag_offset_y", config.drag_offsets.y),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{name} must be finite and >= 0"
            )));
        }
    }

    validate_positive(
        "max_highlight_distance",
        config.highlighter.max_highlight_distance,
    )
}

/// Range lengths handed to the visible-range setters.
pub(super) fn validate_visible_range(name: &str, value: f64) -> ChartResult<f64> {
    validate_positive(name, value)?;
    Ok(value)
}

fn validate_positive(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::api::ViewportConfig;
    use crate::core::ScaleLimits;
    use crate::error::ChartError;

    #[test]
    fn default_config_is_valid() {
        assert!(ViewportConfig::default().validate().is_ok());
    }

    #[test]
    fn config_without_axes_is_rejected() {
        let config = ViewportConfig::new().with_left_axis(None);
        assert!(matches!(config.validate(), Err(ChartError::InvalidData(_))));
    }

    #[test]
    fn non_finite_margin_is_rejected() {
        let config = ViewportConfig::new().with_min_margin(f64::INFINITY);
        assert!(matches!(
            config.validate(),
            Err(ChartError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn inverted_limits_are_rejected() {
        let config = ViewportConfig::new().with_scale_limits(ScaleLimits {
            min_scale_x: 4.0,
            max_scale_x: 2.0,
            ..ScaleLimits::default()
        });
        assert!(config.validate().is_err());
    }
}
