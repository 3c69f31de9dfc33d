use serde::{Deserialize, Serialize};

use crate::core::{AxisOrientation, DragOffsets, ScaleLimits, SeriesKind};
use crate::error::ChartResult;
use crate::interaction::{HighlighterConfig, SelectionMetric};

use super::validation::validate_viewport_config;

/// Per-axis setup for a left or right value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(default)]
    pub inverted: bool,
}

impl AxisConfig {
    #[must_use]
    pub const fn inverted(inverted: bool) -> Self {
        Self { inverted }
    }
}

/// Public viewport bootstrap configuration.
///
/// Serializable so hosts can keep chart setup next to their own settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default)]
    pub orientation: AxisOrientation,
    #[serde(default = "default_left_axis")]
    pub left_axis: Option<AxisConfig>,
    #[serde(default)]
    pub right_axis: Option<AxisConfig>,
    #[serde(default)]
    pub scale_limits: ScaleLimits,
    #[serde(default)]
    pub drag_offsets: DragOffsets,
    /// Lower bound applied to every content margin, in pixels.
    #[serde(default)]
    pub min_margin: f64,
    #[serde(default)]
    pub highlighter: HighlighterConfig,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            orientation: AxisOrientation::default(),
            left_axis: default_left_axis(),
            right_axis: None,
            scale_limits: ScaleLimits::default(),
            drag_offsets: DragOffsets::default(),
            min_margin: 0.0,
            highlighter: HighlighterConfig::default(),
        }
    }
}

impl ViewportConfig {
    /// Left axis only, vertical orientation, default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: AxisOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets (or removes, with `None`) the left value axis.
    #[must_use]
    pub fn with_left_axis(mut self, axis: Option<AxisConfig>) -> Self {
        self.left_axis = axis;
        self
    }

    /// Sets (or removes, with `None`) the right value axis.
    #[must_use]
    pub fn with_right_axis(mut self, axis: Option<AxisConfig>) -> Self {
        self.right_axis = axis;
        self
    }

    #[must_use]
    pub fn with_scale_limits(mut self, limits: ScaleLimits) -> Self {
        self.scale_limits = limits;
        self
    }

    #[must_use]
    pub fn with_drag_offsets(mut self, x: f64, y: f64) -> Self {
        self.drag_offsets = DragOffsets { x, y };
        self
    }

    #[must_use]
    pub fn with_min_margin(mut self, min_margin: f64) -> Self {
        self.min_margin = min_margin;
        self
    }

    #[must_use]
    pub fn with_max_highlight_distance(mut self, distance: f64) -> Self {
        self.highlighter.max_highlight_distance = distance;
        self
    }

    #[must_use]
    pub fn with_selection_metric(mut self, metric: SelectionMetric) -> Self {
        self.highlighter.metric = metric;
        self
    }

    #[must_use]
    pub fn with_series_kind_priority(mut self, priority: Vec<SeriesKind>) -> Self {
        self.highlighter.series_kind_priority = priority;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport_config(self)
    }
}

fn default_left_axis() -> Option<AxisConfig> {
    Some(AxisConfig::default())
}
