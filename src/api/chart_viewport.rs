use tracing::debug;

use crate::animation::{JobReport, ViewportJobQueue};
use crate::core::{
    AxisDependency, AxisOrientation, AxisRange, DataPoint, Matrix, PixelPoint, Transformer,
    ViewportHandler,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{Highlight, Highlighter};

use super::{AxisConfig, AxisSlot, ChartLayout, Invalidation, ViewportConfig};

/// Main orchestration facade consumed by host applications.
///
/// `ChartViewport` owns the viewport handler, the x range and up to two
/// value axes, the job queue, the highlighter and the pending redraw
/// request. Hosts feed it sizes, gestures and clock ticks, then drain
/// [`ChartViewport::take_pending_invalidation`] to schedule repaints.
#[derive(Debug, Clone)]
pub struct ChartViewport {
    pub(super) layout: ChartLayout,
    pub(super) orientation: AxisOrientation,
    pub(super) jobs: ViewportJobQueue,
    pub(super) highlighter: Highlighter,
    pub(super) highlighted: Option<Highlight>,
    pub(super) pending: Invalidation,
}

impl ChartViewport {
    pub fn new(config: ViewportConfig) -> ChartResult<Self> {
        config.validate()?;

        let mut handler = ViewportHandler::new();
        handler.set_min_margin(config.min_margin);
        handler.set_scale_limits(config.scale_limits);
        handler.set_drag_offset_x(config.drag_offsets.x);
        handler.set_drag_offset_y(config.drag_offsets.y);

        let orientation = config.orientation;
        let slot = |axis: Option<AxisConfig>| {
            axis.map(|axis| AxisSlot::new(orientation, axis.inverted))
        };

        Ok(Self {
            layout: ChartLayout {
                handler,
                x_range: AxisRange::default(),
                left: slot(config.left_axis),
                right: slot(config.right_axis),
            },
            orientation,
            jobs: ViewportJobQueue::new(),
            highlighter: Highlighter::new(config.highlighter),
            highlighted: None,
            pending: Invalidation::none(),
        })
    }

    #[must_use]
    pub fn handler(&self) -> &ViewportHandler {
        &self.layout.handler
    }

    #[must_use]
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    #[must_use]
    pub fn has_axis(&self, axis: AxisDependency) -> bool {
        self.layout.slot(axis).is_some()
    }

    #[must_use]
    pub fn x_range(&self) -> AxisRange {
        self.layout.x_range
    }

    pub fn axis_range(&self, axis: AxisDependency) -> ChartResult<AxisRange> {
        Ok(self.slot(axis)?.range)
    }

    pub fn transformer(&self, axis: AxisDependency) -> ChartResult<&Transformer> {
        Ok(&self.slot(axis)?.transformer)
    }

    /// Sets the shared x range and re-prepares both axes.
    pub fn set_x_range(&mut self, min: f64, max: f64) -> ChartResult<()> {
        self.layout.x_range = AxisRange::new(min, max)?;
        self.relayout();
        Ok(())
    }

    pub fn set_axis_range(&mut self, axis: AxisDependency, min: f64, max: f64) -> ChartResult<()> {
        let range = AxisRange::new(min, max)?;
        self.slot_mut(axis)?.range = range;
        self.relayout();
        Ok(())
    }

    pub fn set_axis_inverted(&mut self, axis: AxisDependency, inverted: bool) -> ChartResult<()> {
        self.slot_mut(axis)?.transformer.set_inverted(inverted);
        self.relayout();
        Ok(())
    }

    /// Applies a new surface size.
    ///
    /// Implausible sizes are ignored and `false` is returned. Otherwise the
    /// transformers are re-prepared and any jobs queued while the chart had
    /// no size run in submission order.
    pub fn set_chart_dimensions(&mut self, width: f64, height: f64) -> bool {
        if !self.layout.handler.set_chart_dimensions(width, height) {
            return false;
        }
        self.relayout();
        true
    }

    /// Sets content margins, each raised to the configured minimum.
    pub fn set_content_margins(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        self.layout
            .handler
            .restrain_content_bounds(left, top, right, bottom);
        self.relayout();
    }

    /// Re-prepares transformers after an external change to ranges or
    /// content bounds.
    pub fn notify_layout_changed(&mut self) {
        self.relayout();
    }

    pub fn pixel_for_values(&self, x: f64, y: f64, axis: AxisDependency) -> ChartResult<PixelPoint> {
        Ok(self
            .transformer(axis)?
            .pixel_for_values(&self.layout.handler, x, y))
    }

    pub fn values_by_touch_point(
        &self,
        px: f64,
        py: f64,
        axis: AxisDependency,
    ) -> ChartResult<DataPoint> {
        Ok(self
            .transformer(axis)?
            .values_by_touch_point(&self.layout.handler, px, py))
    }

    /// Maps interleaved `[x, y, ...]` values to pixels in place.
    pub fn point_values_to_pixel(&self, axis: AxisDependency, pts: &mut [f64]) -> ChartResult<()> {
        self.transformer(axis)?
            .point_values_to_pixel(&self.layout.handler, pts);
        Ok(())
    }

    /// Maps interleaved pixel coordinates back to values in place.
    pub fn pixels_to_value(&self, axis: AxisDependency, pts: &mut [f64]) -> ChartResult<()> {
        self.transformer(axis)?
            .pixels_to_value(&self.layout.handler, pts);
        Ok(())
    }

    fn slot(&self, axis: AxisDependency) -> ChartResult<&AxisSlot> {
        self.layout
            .slot(axis)
            .ok_or(ChartError::AxisUnavailable { axis })
    }

    fn slot_mut(&mut self, axis: AxisDependency) -> ChartResult<&mut AxisSlot> {
        self.layout
            .slot_mut(axis)
            .ok_or(ChartError::AxisUnavailable { axis })
    }

    pub(super) fn require_axis(&self, axis: AxisDependency) -> ChartResult<()> {
        self.slot(axis).map(|_| ())
    }

    fn relayout(&mut self) {
        self.layout.prepare();
        self.invalidate(Invalidation::layout());
        let report = self.jobs.drain(&mut self.layout);
        self.absorb_job_report(report);
    }

    /// Publishes `candidate` through the handler's clamp and records a
    /// redraw when the transform actually moved.
    pub(super) fn publish(&mut self, candidate: Matrix) -> Matrix {
        let before = self.layout.handler.touch_matrix();
        let applied = self.layout.handler.refresh(candidate);
        self.note_touch_change(before);
        applied
    }

    pub(super) fn note_touch_change(&mut self, before: Matrix) {
        if self.layout.handler.touch_matrix() != before {
            self.invalidate(Invalidation::viewport());
        }
    }

    pub(super) fn absorb_job_report(&mut self, report: JobReport) {
        if report.viewport_changed() {
            self.invalidate(Invalidation::viewport());
        }
        if report.finished > 0 {
            debug!(finished = report.finished, "viewport animations finished");
            self.invalidate(Invalidation::viewport_settled());
        }
    }
}
