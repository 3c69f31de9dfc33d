use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::animation::{AnimationStep, JobContext, RunningAnimation, ViewportJob};
use crate::core::AxisDependency;

/// Lifecycle of a submitted job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Waiting for valid chart dimensions.
    Queued,
    /// Animation clock started; driven by [`ViewportJobQueue::tick`].
    Running,
    /// Applied (or dropped) and disposed.
    Done,
}

/// What a queue operation did to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobReport {
    /// Immediate jobs applied.
    pub applied: usize,
    /// Animations whose clock was started.
    pub started: usize,
    /// Animations advanced without finishing.
    pub advanced: usize,
    /// Animations that reached phase 1 and need finalization.
    pub finished: usize,
}

impl JobReport {
    /// True when at least one refresh was published.
    #[must_use]
    pub fn viewport_changed(self) -> bool {
        self.applied + self.advanced + self.finished > 0
    }
}

/// Owner of the viewport state that jobs mutate.
pub trait JobTarget {
    fn has_chart_dimens(&self) -> bool;

    /// Borrows the handler and the transformer bound to `axis`, or `None`
    /// when the chart has no such axis.
    fn job_context(&mut self, axis: AxisDependency) -> Option<JobContext<'_>>;
}

/// FIFO of viewport jobs plus the set of running animations.
#[derive(Debug, Clone, Default)]
pub struct ViewportJobQueue {
    pending: VecDeque<ViewportJob>,
    running: Vec<RunningAnimation>,
}

impl ViewportJobQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `job` now when the target has dimensions, queues it otherwise.
    pub fn submit<T: JobTarget>(&mut self, job: ViewportJob, target: &mut T) -> (JobState, JobReport) {
        if !target.has_chart_dimens() {
            self.pending.push_back(job);
            debug!(pending = self.pending.len(), ?job, "viewport job queued");
            return (JobState::Queued, JobReport::default());
        }

        let mut report = self.drain(target);
        let state = self.execute(job, target, &mut report);
        (state, report)
    }

    /// Executes queued jobs in submission order once the target is ready.
    pub fn drain<T: JobTarget>(&mut self, target: &mut T) -> JobReport {
        let mut report = JobReport::default();
        if !target.has_chart_dimens() {
            return report;
        }

        while let Some(job) = self.pending.pop_front() {
            self.execute(job, target, &mut report);
        }
        report
    }

    fn execute<T: JobTarget>(
        &mut self,
        job: ViewportJob,
        target: &mut T,
        report: &mut JobReport,
    ) -> JobState {
        let Some(mut ctx) = target.job_context(job.axis()) else {
            warn!(axis = ?job.axis(), "dropping viewport job for missing axis");
            return JobState::Done;
        };

        if let Some(animation) = RunningAnimation::start(&job, &ctx) {
            trace!(?job, "viewport animation started");
            self.running.push(animation);
            report.started += 1;
            return JobState::Running;
        }

        job.apply(&mut ctx);
        report.applied += 1;
        JobState::Done
    }

    /// Advances every running animation to clock time `now`.
    pub fn tick<T: JobTarget>(&mut self, now: Duration, target: &mut T) -> JobReport {
        let mut report = JobReport::default();
        self.running.retain_mut(|animation| {
            let Some(mut ctx) = target.job_context(animation.axis()) else {
                warn!(axis = ?animation.axis(), "dropping animation for missing axis");
                return false;
            };
            match animation.tick(now, &mut ctx) {
                AnimationStep::Running { .. } => {
                    report.advanced += 1;
                    true
                }
                AnimationStep::Finished => {
                    report.finished += 1;
                    false
                }
            }
        });
        report
    }

    /// Drops all queued jobs that have not started. Returns how many.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Stops running animations where they are, without finalization.
    pub fn cancel_animations(&mut self) -> usize {
        let cancelled = self.running.len();
        if cancelled > 0 {
            debug!(cancelled, "viewport animations cancelled");
        }
        self.running.clear();
        cancelled
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn running(&self) -> &[RunningAnimation] {
        &self.running
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.running.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{JobContext, JobState, JobTarget, ViewportJobQueue};
    use crate::animation::{Easing, ViewAnchor, ViewportJob};
    use crate::core::{AxisDependency, AxisOrientation, AxisRange, Transformer, ViewportHandler};

    struct Target {
        handler: ViewportHandler,
        transformer: Transformer,
    }

    impl Target {
        fn r#unsized() -> Self {
            Self {
                handler: ViewportHandler::new(),
                transformer: Transformer::new(AxisOrientation::Vertical, false),
            }
        }

        fn layout(&mut self) {
            self.handler.set_chart_dimensions(100.0, 100.0);
            let range = AxisRange::new(0.0, 100.0).expect("valid range");
            self.transformer.prepare(range, range, &self.handler);
        }
    }

    impl JobTarget for Target {
        fn has_chart_dimens(&self) -> bool {
            self.handler.has_chart_dimens()
        }

        fn job_context(&mut self, axis: AxisDependency) -> Option<JobContext<'_>> {
            (axis == AxisDependency::Left).then(|| JobContext {
                handler: &mut self.handler,
                transformer: &self.transformer,
            })
        }
    }

    fn zoom_job() -> ViewportJob {
        ViewportJob::ZoomAndCenter {
            scale_x: 2.0,
            scale_y: 2.0,
            x: 50.0,
            y: 50.0,
            axis: AxisDependency::Left,
        }
    }

    #[test]
    fn jobs_wait_for_dimensions() {
        let mut target = Target::r#unsized();
        let mut queue = ViewportJobQueue::new();

        let (state, _) = queue.submit(zoom_job(), &mut target);
        assert_eq!(state, JobState::Queued);
        assert_eq!(queue.pending_len(), 1);
        assert_eq!(target.handler.scale_x(), 1.0);

        target.layout();
        let report = queue.drain(&mut target);
        assert_eq!(report.applied, 1);
        assert!(queue.is_idle());
        assert_eq!(target.handler.scale_x(), 2.0);
    }

    #[test]
    fn clear_drops_pending_without_side_effects() {
        let mut target = Target::r#unsized();
        let mut queue = ViewportJobQueue::new();
        queue.submit(zoom_job(), &mut target);
        queue.submit(zoom_job(), &mut target);

        assert_eq!(queue.clear(), 2);
        target.layout();
        assert_eq!(queue.drain(&mut target).applied, 0);
        assert_eq!(target.handler.scale_x(), 1.0);
    }

    #[test]
    fn missing_axis_job_is_dropped() {
        let mut target = Target::r#unsized();
        target.layout();
        let mut queue = ViewportJobQueue::new();
        let job = ViewportJob::MoveTo {
            x: Some(10.0),
            y: None,
            anchor: ViewAnchor::XStart,
            axis: AxisDependency::Right,
        };
        let (state, report) = queue.submit(job, &mut target);
        assert_eq!(state, JobState::Done);
        assert_eq!(report.applied, 0);
    }

    #[test]
    fn cancelled_animation_freezes_in_place() {
        let mut target = Target::r#unsized();
        target.layout();
        let mut queue = ViewportJobQueue::new();
        let job = ViewportJob::AnimatedZoom {
            scale_x: 4.0,
            scale_y: 1.0,
            x: 50.0,
            y: 50.0,
            axis: AxisDependency::Left,
            duration: Duration::from_millis(1000),
            easing: Easing::Linear,
        };

        let (state, _) = queue.submit(job, &mut target);
        assert_eq!(state, JobState::Running);
        queue.tick(Duration::from_millis(0), &mut target);
        queue.tick(Duration::from_millis(500), &mut target);
        let frozen = target.handler.scale_x();
        assert!((frozen - 2.5).abs() <= 1e-9);

        assert_eq!(queue.cancel_animations(), 1);
        let report = queue.tick(Duration::from_millis(1000), &mut target);
        assert_eq!(report.finished, 0);
        assert_eq!(target.handler.scale_x(), frozen);
    }
}
