use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::core::{
    AxisDependency, AxisOrientation, DataPoint, Matrix, PixelPoint, Rect, Transformer,
    ViewportHandler,
};

/// Where a job's target value ends up inside the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewAnchor {
    /// Target x on the low-x edge of the view, target y centered.
    XStart,
    /// Target centered on both axes.
    Center,
}

impl ViewAnchor {
    fn pixel(self, orientation: AxisOrientation, content: Rect) -> PixelPoint {
        let center = content.center();
        match (self, orientation) {
            (Self::Center, _) => center,
            (Self::XStart, AxisOrientation::Vertical) => PixelPoint::new(content.left, center.y),
            (Self::XStart, AxisOrientation::Horizontal) => PixelPoint::new(center.x, content.bottom),
        }
    }
}

/// A deferred or animated viewport change.
///
/// `None` coordinates keep the current position on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewportJob {
    MoveTo {
        x: Option<f64>,
        y: Option<f64>,
        anchor: ViewAnchor,
        axis: AxisDependency,
    },
    /// Zooms by relative factors and centers the view on `(x, y)`.
    ZoomAndCenter {
        scale_x: f64,
        scale_y: f64,
        x: f64,
        y: f64,
        axis: AxisDependency,
    },
    AnimatedMoveTo {
        x: Option<f64>,
        y: Option<f64>,
        anchor: ViewAnchor,
        axis: AxisDependency,
        duration: Duration,
        easing: Easing,
    },
    /// Animates from the current scale to `current * factor`, centering on
    /// `(x, y)`.
    AnimatedZoom {
        scale_x: f64,
        scale_y: f64,
        x: f64,
        y: f64,
        axis: AxisDependency,
        duration: Duration,
        easing: Easing,
    },
}

impl ViewportJob {
    #[must_use]
    pub fn axis(&self) -> AxisDependency {
        match *self {
            Self::MoveTo { axis, .. }
            | Self::ZoomAndCenter { axis, .. }
            | Self::AnimatedMoveTo { axis, .. }
            | Self::AnimatedZoom { axis, .. } => axis,
        }
    }

    #[must_use]
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::AnimatedMoveTo { .. } | Self::AnimatedZoom { .. })
    }

    /// Applies an immediate job in one `refresh`.
    ///
    /// Animated jobs are routed through [`RunningAnimation::start`] instead;
    /// calling this on one applies its final state without animating.
    pub fn apply(&self, ctx: &mut JobContext<'_>) -> Matrix {
        match *self {
            Self::MoveTo { x, y, anchor, .. } | Self::AnimatedMoveTo { x, y, anchor, .. } => {
                let anchor_px = ctx.anchor_pixel(anchor);
                let current = ctx.value_at(anchor_px);
                let target = DataPoint::new(x.unwrap_or(current.x), y.unwrap_or(current.y));
                let candidate = ctx.center_on(ctx.handler.touch_matrix(), target, anchor_px);
                ctx.handler.refresh(candidate)
            }
            Self::ZoomAndCenter {
                scale_x,
                scale_y,
                x,
                y,
                ..
            }
            | Self::AnimatedZoom {
                scale_x,
                scale_y,
                x,
                y,
                ..
            } => {
                let (target_x, target_y) = ctx.handler.clamp_scale(
                    ctx.handler.scale_x() * scale_x,
                    ctx.handler.scale_y() * scale_y,
                );
                let candidate = ctx.zoom_and_center(target_x, target_y, DataPoint::new(x, y));
                ctx.handler.refresh(candidate)
            }
        }
    }
}

/// Everything a job needs to mutate the viewport for its axis.
pub struct JobContext<'a> {
    pub handler: &'a mut ViewportHandler,
    pub transformer: &'a Transformer,
}

impl JobContext<'_> {
    fn anchor_pixel(&self, anchor: ViewAnchor) -> PixelPoint {
        anchor.pixel(self.transformer.orientation(), self.handler.content_rect())
    }

    fn value_at(&self, pixel: PixelPoint) -> DataPoint {
        self.transformer
            .values_by_touch_point(&*self.handler, pixel.x, pixel.y)
    }

    /// `touch` followed by the pan that moves `target` onto `anchor_px`.
    fn center_on(&self, touch: Matrix, target: DataPoint, anchor_px: PixelPoint) -> Matrix {
        let current = self
            .transformer
            .pixel_for_values_with(touch, target.x, target.y);
        let mut candidate = touch;
        candidate.post_translate(anchor_px.x - current.x, anchor_px.y - current.y);
        candidate
    }

    /// Fully composed candidate with absolute scale and `target` centered.
    fn zoom_and_center(&self, scale_x: f64, scale_y: f64, target: DataPoint) -> Matrix {
        let center = self.handler.content_center();
        let scaled = self
            .handler
            .set_zoom_around(scale_x, scale_y, center.x, center.y);
        self.center_on(scaled, target, center)
    }
}

/// Result of advancing a running animation by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStep {
    /// Phase advanced; the viewport was refreshed.
    Running { phase: f64 },
    /// Phase reached 1; the final state was applied.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Move {
        anchor: ViewAnchor,
        origin: DataPoint,
        target: DataPoint,
    },
    Zoom {
        origin_scale: (f64, f64),
        target_scale: (f64, f64),
        origin: DataPoint,
        target: DataPoint,
    },
}

/// An animated job that has started: origins are captured and the clock
/// is anchored by the first tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningAnimation {
    axis: AxisDependency,
    duration: Duration,
    easing: Easing,
    motion: Motion,
    started_at: Option<Duration>,
    phase: f64,
}

impl RunningAnimation {
    /// Captures the origin state of an animated job.
    ///
    /// Returns `None` for immediate jobs.
    pub fn start(job: &ViewportJob, ctx: &JobContext<'_>) -> Option<Self> {
        match *job {
            ViewportJob::AnimatedMoveTo {
                x,
                y,
                anchor,
                axis,
                duration,
                easing,
            } => {
                let origin = ctx.value_at(ctx.anchor_pixel(anchor));
                let target = DataPoint::new(x.unwrap_or(origin.x), y.unwrap_or(origin.y));
                Some(Self::new(
                    axis,
                    duration,
                    easing,
                    Motion::Move {
                        anchor,
                        origin,
                        target,
                    },
                ))
            }
            ViewportJob::AnimatedZoom {
                scale_x,
                scale_y,
                x,
                y,
                axis,
                duration,
                easing,
            } => {
                let origin_scale = (ctx.handler.scale_x(), ctx.handler.scale_y());
                let target_scale = ctx
                    .handler
                    .clamp_scale(origin_scale.0 * scale_x, origin_scale.1 * scale_y);
                let origin = ctx.value_at(ctx.handler.content_center());
                Some(Self::new(
                    axis,
                    duration,
                    easing,
                    Motion::Zoom {
                        origin_scale,
                        target_scale,
                        origin,
                        target: DataPoint::new(x, y),
                    },
                ))
            }
            ViewportJob::MoveTo { .. } | ViewportJob::ZoomAndCenter { .. } => None,
        }
    }

    fn new(axis: AxisDependency, duration: Duration, easing: Easing, motion: Motion) -> Self {
        Self {
            axis,
            duration,
            easing,
            motion,
            started_at: None,
            phase: 0.0,
        }
    }

    #[must_use]
    pub fn axis(&self) -> AxisDependency {
        self.axis
    }

    #[must_use]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Eased, monotonic phase at clock time `now`.
    fn phase_at(&mut self, now: Duration) -> f64 {
        let started_at = *self.started_at.get_or_insert(now);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            now.saturating_sub(started_at).as_secs_f64() / self.duration.as_secs_f64()
        };
        self.phase = self.phase.max(self.easing.ease(progress));
        self.phase
    }

    /// Advances to clock time `now`, publishing one composed candidate.
    pub fn tick(&mut self, now: Duration, ctx: &mut JobContext<'_>) -> AnimationStep {
        let phase = self.phase_at(now);
        let candidate = match self.motion {
            Motion::Move {
                anchor,
                origin,
                target,
            } => {
                let point = lerp_point(origin, target, phase);
                ctx.center_on(ctx.handler.touch_matrix(), point, ctx.anchor_pixel(anchor))
            }
            Motion::Zoom {
                origin_scale,
                target_scale,
                origin,
                target,
            } => {
                let scale_x = lerp(origin_scale.0, target_scale.0, phase);
                let scale_y = lerp(origin_scale.1, target_scale.1, phase);
                ctx.zoom_and_center(scale_x, scale_y, lerp_point(origin, target, phase))
            }
        };
        ctx.handler.refresh(candidate);

        if phase >= 1.0 {
            AnimationStep::Finished
        } else {
            AnimationStep::Running { phase }
        }
    }
}

fn lerp(from: f64, to: f64, phase: f64) -> f64 {
    from + (to - from) * phase
}

fn lerp_point(from: DataPoint, to: DataPoint, phase: f64) -> DataPoint {
    DataPoint::new(lerp(from.x, to.x, phase), lerp(from.y, to.y, phase))
}
