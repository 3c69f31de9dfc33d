use std::time::Duration;

use crate::animation::{Easing, JobReport, JobState, ViewAnchor, ViewportJob};
use crate::core::{AxisDependency, Matrix};
use crate::error::ChartResult;

use super::ChartViewport;

impl ChartViewport {
    /// Scales the current view by `(scale_x, scale_y)` around pixel
    /// `(pivot_x, pivot_y)`.
    pub fn zoom(&mut self, scale_x: f64, scale_y: f64, pivot_x: f64, pivot_y: f64) -> Matrix {
        let candidate = self
            .layout
            .handler
            .zoom(scale_x, scale_y, pivot_x, pivot_y);
        self.publish(candidate)
    }

    /// Zooms in one step around the content center.
    pub fn zoom_in(&mut self) -> Matrix {
        let center = self.layout.handler.content_center();
        let candidate = self.layout.handler.zoom_in(center.x, center.y);
        self.publish(candidate)
    }

    /// Zooms out one step around the content center.
    pub fn zoom_out(&mut self) -> Matrix {
        let center = self.layout.handler.content_center();
        let candidate = self.layout.handler.zoom_out(center.x, center.y);
        self.publish(candidate)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> Matrix {
        let candidate = self.layout.handler.translate(dx, dy);
        self.publish(candidate)
    }

    /// Publishes the unzoomed, unpanned transform.
    pub fn reset_zoom(&mut self) -> Matrix {
        let before = self.layout.handler.touch_matrix();
        let applied = self.layout.handler.reset_zoom();
        self.note_touch_change(before);
        applied
    }

    /// Same as [`ChartViewport::reset_zoom`], through the regular publish path.
    pub fn fit_screen(&mut self) -> Matrix {
        let candidate = self.layout.handler.fit_screen();
        self.publish(candidate)
    }

    /// Zooms by relative factors and centers the view on `(x, y)`.
    pub fn zoom_and_center(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        x: f64,
        y: f64,
        axis: AxisDependency,
    ) -> ChartResult<JobState> {
        self.submit(ViewportJob::ZoomAndCenter {
            scale_x,
            scale_y,
            x,
            y,
            axis,
        })
    }

    /// Scrolls so that `x` sits on the low-x content edge.
    pub fn move_view_to_x(&mut self, x: f64) -> ChartResult<JobState> {
        let axis = self.layout.primary_axis();
        self.submit(ViewportJob::MoveTo {
            x: Some(x),
            y: None,
            anchor: ViewAnchor::XStart,
            axis,
        })
    }

    /// Scrolls so that `x` sits on the low-x content edge and `y` is
    /// centered on the value axis.
    pub fn move_view_to(&mut self, x: f64, y: f64, axis: AxisDependency) -> ChartResult<JobState> {
        self.submit(ViewportJob::MoveTo {
            x: Some(x),
            y: Some(y),
            anchor: ViewAnchor::XStart,
            axis,
        })
    }

    pub fn center_view_to(&mut self, x: f64, y: f64, axis: AxisDependency) -> ChartResult<JobState> {
        self.submit(ViewportJob::MoveTo {
            x: Some(x),
            y: Some(y),
            anchor: ViewAnchor::Center,
            axis,
        })
    }

    pub fn move_view_to_animated(
        &mut self,
        x: f64,
        y: f64,
        axis: AxisDependency,
        duration: Duration,
        easing: Easing,
    ) -> ChartResult<JobState> {
        self.submit(ViewportJob::AnimatedMoveTo {
            x: Some(x),
            y: Some(y),
            anchor: ViewAnchor::XStart,
            axis,
            duration,
            easing,
        })
    }

    pub fn center_view_to_animated(
        &mut self,
        x: f64,
        y: f64,
        axis: AxisDependency,
        duration: Duration,
        easing: Easing,
    ) -> ChartResult<JobState> {
        self.submit(ViewportJob::AnimatedMoveTo {
            x: Some(x),
            y: Some(y),
            anchor: ViewAnchor::Center,
            axis,
            duration,
            easing,
        })
    }

    /// Animates from the current scale to `current * (scale_x, scale_y)`
    /// while centering on `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn zoom_and_center_animated(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        x: f64,
        y: f64,
        axis: AxisDependency,
        duration: Duration,
        easing: Easing,
    ) -> ChartResult<JobState> {
        self.submit(ViewportJob::AnimatedZoom {
            scale_x,
            scale_y,
            x,
            y,
            axis,
            duration,
            easing,
        })
    }

    /// Submits a prepared job. Runs it now when the chart has a size,
    /// queues it otherwise.
    pub fn submit(&mut self, job: ViewportJob) -> ChartResult<JobState> {
        self.require_axis(job.axis())?;
        let (state, report) = self.jobs.submit(job, &mut self.layout);
        self.absorb_job_report(report);
        Ok(state)
    }

    /// Advances running animations to host clock time `now`.
    pub fn tick_animations(&mut self, now: Duration) -> JobReport {
        let report = self.jobs.tick(now, &mut self.layout);
        self.absorb_job_report(report);
        report
    }

    /// Stops running animations where they are. Returns how many.
    pub fn cancel_animations(&mut self) -> usize {
        self.jobs.cancel_animations()
    }

    /// Drops jobs still waiting for a chart size. Returns how many.
    pub fn clear_pending_jobs(&mut self) -> usize {
        self.jobs.clear()
    }

    #[must_use]
    pub fn pending_job_count(&self) -> usize {
        self.jobs.pending_len()
    }

    #[must_use]
    pub fn has_running_animations(&self) -> bool {
        !self.jobs.running().is_empty()
    }
}
