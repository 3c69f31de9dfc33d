use serde::{Deserialize, Serialize};

use crate::core::AxisDependency;

/// A selected value, in data space and in pixels.
///
/// `y` is NaN when the highlight targets every value at `x`. Pixel
/// coordinates are NaN for programmatic highlights that were never mapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub x: f64,
    pub y: f64,
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub data_set_index: usize,
    /// Index into the entry's stack values; `None` for plain entries.
    pub stack_index: Option<usize>,
    pub axis: AxisDependency,
    /// Pixel distance between the query and the resolved point.
    pub distance: f64,
}

impl Highlight {
    /// Programmatic highlight of every value at `x` in one data set.
    #[must_use]
    pub fn for_value(x: f64, data_set_index: usize, stack_index: Option<usize>) -> Self {
        Self {
            x,
            y: f64::NAN,
            pixel_x: f64::NAN,
            pixel_y: f64::NAN,
            data_set_index,
            stack_index,
            axis: AxisDependency::Left,
            distance: 0.0,
        }
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.stack_index.is_some()
    }

    /// True when both highlights select the same value, ignoring where it
    /// was drawn.
    #[must_use]
    pub fn same_selection(&self, other: &Self) -> bool {
        let same = |a: f64, b: f64| a == b || (a.is_nan() && b.is_nan());
        same(self.x, other.x)
            && same(self.y, other.y)
            && self.data_set_index == other.data_set_index
            && self.stack_index == other.stack_index
    }
}
