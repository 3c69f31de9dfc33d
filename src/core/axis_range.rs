use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Data range of one axis, as published by the axis owner.
///
/// The range is always strictly positive: a collapsed `[v, v]` input is
/// widened to `[v - 1, v + 1]` so the transform layer never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    min: f64,
    max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "axis range must be finite".to_owned(),
            ));
        }

        let (min, max) = (min.min(max), min.max(max));
        if min == max {
            return Ok(Self {
                min: min - 1.0,
                max: max + 1.0,
            });
        }

        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn range(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}
