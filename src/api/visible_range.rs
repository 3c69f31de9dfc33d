use crate::core::{AxisDependency, ViewportHandler};
use crate::error::ChartResult;

use super::ChartViewport;
use super::validation::validate_visible_range;

impl ChartViewport {
    /// Limits zooming out so that at most `max_x_range` data units are
    /// visible along x.
    pub fn set_visible_x_range_maximum(&mut self, max_x_range: f64) -> ChartResult<()> {
        let max_x_range = validate_visible_range("max_x_range", max_x_range)?;
        let scale = self.layout.x_range.range() / max_x_range;
        self.update_limits(|handler| handler.set_minimum_scale_x(scale));
        Ok(())
    }

    /// Limits zooming in so that at least `min_x_range` data units stay
    /// visible along x.
    pub fn set_visible_x_range_minimum(&mut self, min_x_range: f64) -> ChartResult<()> {
        let min_x_range = validate_visible_range("min_x_range", min_x_range)?;
        let scale = self.layout.x_range.range() / min_x_range;
        self.update_limits(|handler| handler.set_maximum_scale_x(scale));
        Ok(())
    }

    pub fn set_visible_y_range_maximum(
        &mut self,
        max_y_range: f64,
        axis: AxisDependency,
    ) -> ChartResult<()> {
        let max_y_range = validate_visible_range("max_y_range", max_y_range)?;
        let scale = self.axis_range(axis)?.range() / max_y_range;
        self.update_limits(|handler| handler.set_minimum_scale_y(scale));
        Ok(())
    }

    pub fn set_visible_y_range_minimum(
        &mut self,
        min_y_range: f64,
        axis: AxisDependency,
    ) -> ChartResult<()> {
        let min_y_range = validate_visible_range("min_y_range", min_y_range)?;
        let scale = self.axis_range(axis)?.range() / min_y_range;
        self.update_limits(|handler| handler.set_maximum_scale_y(scale));
        Ok(())
    }

    /// Smallest x value currently visible, never below the axis minimum.
    #[must_use]
    pub fn lowest_visible_x(&self) -> f64 {
        let content = self.layout.handler.content_rect();
        let min = self.layout.x_range.min();
        self.x_at_pixel(content.left, content.bottom)
            .map_or(min, |x| x.max(min))
    }

    /// Largest x value currently visible, never above the axis maximum.
    #[must_use]
    pub fn highest_visible_x(&self) -> f64 {
        let content = self.layout.handler.content_rect();
        let max = self.layout.x_range.max();
        self.x_at_pixel(content.right, content.top)
            .map_or(max, |x| x.min(max))
    }

    /// Number of x data units currently visible.
    #[must_use]
    pub fn visible_x_range(&self) -> f64 {
        (self.highest_visible_x() - self.lowest_visible_x()).abs()
    }

    fn x_at_pixel(&self, px: f64, py: f64) -> Option<f64> {
        let slot = self.layout.slot(self.layout.primary_axis())?;
        if !slot.transformer.is_prepared() {
            return None;
        }
        Some(
            slot.transformer
                .values_by_touch_point(&self.layout.handler, px, py)
                .x,
        )
    }

    fn update_limits(&mut self, apply: impl FnOnce(&mut ViewportHandler)) {
        let before = self.layout.handler.touch_matrix();
        apply(&mut self.layout.handler);
        self.note_touch_change(before);
    }
}
