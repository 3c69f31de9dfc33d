use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{ChartDimensions, Matrix, PixelPoint, Rect};

/// Largest accepted chart edge, in pixels.
///
/// Host measurement passes occasionally report garbage sizes; anything at or
/// beyond this is treated as one of those and ignored.
pub const MAX_CHART_DIMENSION: f64 = 10_000.0;

/// Factor applied by [`ViewportHandler::zoom_in`]; `zoom_out` uses its inverse.
pub const ZOOM_STEP: f64 = 1.4;

/// Hard per-axis zoom limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleLimits {
    pub min_scale_x: f64,
    pub max_scale_x: f64,
    pub min_scale_y: f64,
    pub max_scale_y: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min_scale_x: 1.0,
            max_scale_x: f64::MAX,
            min_scale_y: 1.0,
            max_scale_y: f64::MAX,
        }
    }
}

/// How far, in pixels, the view may be dragged past the data extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragOffsets {
    pub x: f64,
    pub y: f64,
}

/// Authoritative pan/zoom state of one chart.
///
/// The touch matrix maps absolute content pixels to zoomed/panned pixels.
/// It is only ever written by [`ViewportHandler::refresh`], which projects a
/// candidate matrix into the valid scale and translation range.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportHandler {
    touch: Matrix,
    content: Rect,
    dimensions: ChartDimensions,
    limits: ScaleLimits,
    drag: DragOffsets,
    min_margin: f64,
}

impl Default for ViewportHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportHandler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            touch: Matrix::IDENTITY,
            content: Rect::default(),
            dimensions: ChartDimensions::default(),
            limits: ScaleLimits::default(),
            drag: DragOffsets::default(),
            min_margin: 0.0,
        }
    }

    /// Stores a new surface size and keeps the current margins.
    ///
    /// Returns `false` (leaving state untouched) for sizes that are
    /// non-finite, not positive, or at least [`MAX_CHART_DIMENSION`].
    pub fn set_chart_dimensions(&mut self, width: f64, height: f64) -> bool {
        let plausible = |v: f64| v.is_finite() && v > 0.0 && v < MAX_CHART_DIMENSION;
        if !plausible(width) || !plausible(height) {
            warn!(width, height, "ignoring implausible chart dimensions");
            return false;
        }

        let margins = (
            self.offset_left(),
            self.offset_top(),
            self.offset_right(),
            self.offset_bottom(),
        );
        self.dimensions = ChartDimensions::new(width, height);
        self.restrain_content_bounds(margins.0, margins.1, margins.2, margins.3);
        debug!(width, height, "chart dimensions set");
        true
    }

    /// Sets content bounds from margins, each raised to the minimum margin.
    pub fn restrain_content_bounds(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        let margin = |v: f64| if v.is_finite() { v.max(self.min_margin) } else { self.min_margin };
        let (width, height) = (self.dimensions.width, self.dimensions.height);

        let content_left = margin(left).min(width);
        let content_top = margin(top).min(height);
        let content_right = (width - margin(right)).max(content_left);
        let content_bottom = (height - margin(bottom)).max(content_top);
        self.content = Rect::new(content_left, content_top, content_right, content_bottom);

        if self.content.is_degenerate() {
            warn!(
                width,
                height,
                left,
                top,
                right,
                bottom,
                "content bounds collapsed to zero area"
            );
        }
        self.touch = self.limit_trans_and_scale(self.touch);
    }

    pub fn set_min_margin(&mut self, min_margin: f64) {
        self.min_margin = if min_margin.is_finite() {
            min_margin.max(0.0)
        } else {
            0.0
        };
    }

    #[must_use]
    pub fn min_margin(&self) -> f64 {
        self.min_margin
    }

    #[must_use]
    pub fn has_chart_dimens(&self) -> bool {
        self.dimensions.is_valid()
    }

    /// Candidate: current transform scaled by `(sx, sy)` around pixel `(px, py)`.
    #[must_use]
    pub fn zoom(&self, scale_x: f64, scale_y: f64, pivot_x: f64, pivot_y: f64) -> Matrix {
        let mut candidate = self.touch;
        candidate.post_scale_around(scale_x, scale_y, pivot_x, pivot_y);
        candidate
    }

    #[must_use]
    pub fn zoom_in(&self, pivot_x: f64, pivot_y: f64) -> Matrix {
        self.zoom(ZOOM_STEP, ZOOM_STEP, pivot_x, pivot_y)
    }

    #[must_use]
    pub fn zoom_out(&self, pivot_x: f64, pivot_y: f64) -> Matrix {
        self.zoom(1.0 / ZOOM_STEP, 1.0 / ZOOM_STEP, pivot_x, pivot_y)
    }

    /// Candidate with absolute scale `(sx, sy)` around the content origin.
    #[must_use]
    pub fn set_zoom(&self, scale_x: f64, scale_y: f64) -> Matrix {
        self.set_zoom_around(scale_x, scale_y, self.content.left, self.content.top)
    }

    /// Candidate with absolute scale `(sx, sy)`, keeping pixel `(px, py)` fixed.
    #[must_use]
    pub fn set_zoom_around(&self, scale_x: f64, scale_y: f64, pivot_x: f64, pivot_y: f64) -> Matrix {
        let factor = |target: f64, current: f64| {
            if current == 0.0 { 1.0 } else { target / current }
        };
        self.zoom(
            factor(scale_x, self.touch.scale_x),
            factor(scale_y, self.touch.scale_y),
            pivot_x,
            pivot_y,
        )
    }

    /// Candidate with the unzoomed, unpanned transform.
    #[must_use]
    pub fn fit_screen(&self) -> Matrix {
        Matrix::IDENTITY
    }

    /// Publishes the unzoomed transform (subject to scale limits).
    pub fn reset_zoom(&mut self) -> Matrix {
        self.refresh(self.fit_screen())
    }

    /// Candidate: current transform panned by a pixel delta.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Matrix {
        let mut candidate = self.touch;
        candidate.post_translate(dx, dy);
        candidate
    }

    /// Candidate that moves a transformed pixel to the content origin.
    #[must_use]
    pub fn center_view_port(&self, point: PixelPoint) -> Matrix {
        self.translate(self.content.left - point.x, self.content.top - point.y)
    }

    /// Clamps `candidate`, stores it as the touch transform and returns it.
    ///
    /// This is the only path that writes the touch transform.
    pub fn refresh(&mut self, candidate: Matrix) -> Matrix {
        self.touch = self.limit_trans_and_scale(candidate);
        trace!(
            scale_x = self.touch.scale_x,
            scale_y = self.touch.scale_y,
            trans_x = self.touch.trans_x,
            trans_y = self.touch.trans_y,
            "viewport refreshed"
        );
        self.touch
    }

    /// Projects a candidate into the valid range without publishing it.
    #[must_use]
    pub fn limit_trans_and_scale(&self, candidate: Matrix) -> Matrix {
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        let (scale_x, scale_y) = self.clamp_scale(candidate.scale_x, candidate.scale_y);

        let content = self.content;
        let trans_x = clamp_translation(
            finite_or(candidate.trans_x, 0.0),
            scale_x,
            content.left,
            content.right,
            self.drag.x,
        );
        let trans_y = clamp_translation(
            finite_or(candidate.trans_y, 0.0),
            scale_y,
            content.top,
            content.bottom,
            self.drag.y,
        );

        Matrix::scale_translate(scale_x, scale_y, trans_x, trans_y)
    }

    /// Scale pair projected into the configured limits.
    #[must_use]
    pub fn clamp_scale(&self, scale_x: f64, scale_y: f64) -> (f64, f64) {
        let limits = self.limits;
        let finite_or_one = |v: f64| if v.is_finite() { v } else { 1.0 };
        (
            finite_or_one(scale_x)
                .max(limits.min_scale_x)
                .min(limits.max_scale_x),
            finite_or_one(scale_y)
                .max(limits.min_scale_y)
                .min(limits.max_scale_y),
        )
    }

    #[must_use]
    pub fn touch_matrix(&self) -> Matrix {
        self.touch
    }

    #[must_use]
    pub fn scale_limits(&self) -> ScaleLimits {
        self.limits
    }

    /// Replaces all scale limits and re-clamps the current transform.
    pub fn set_scale_limits(&mut self, limits: ScaleLimits) {
        self.limits = sanitize_limits(limits);
        self.touch = self.limit_trans_and_scale(self.touch);
    }

    pub fn set_minimum_scale_x(&mut self, scale: f64) {
        let limits = ScaleLimits {
            min_scale_x: scale,
            ..self.limits
        };
        self.set_scale_limits(limits);
    }

    pub fn set_maximum_scale_x(&mut self, scale: f64) {
        let limits = ScaleLimits {
            max_scale_x: scale,
            ..self.limits
        };
        self.set_scale_limits(limits);
    }

    pub fn set_min_max_scale_x(&mut self, min: f64, max: f64) {
        let limits = ScaleLimits {
            min_scale_x: min,
            max_scale_x: max,
            ..self.limits
        };
        self.set_scale_limits(limits);
    }

    pub fn set_minimum_scale_y(&mut self, scale: f64) {
        let limits = ScaleLimits {
            min_scale_y: scale,
            ..self.limits
        };
        self.set_scale_limits(limits);
    }

    pub fn set_maximum_scale_y(&mut self, scale: f64) {
        let limits = ScaleLimits {
            max_scale_y: scale,
            ..self.limits
        };
        self.set_scale_limits(limits);
    }

    pub fn set_min_max_scale_y(&mut self, min: f64, max: f64) {
        let limits = ScaleLimits {
            min_scale_y: min,
            max_scale_y: max,
            ..self.limits
        };
        self.set_scale_limits(limits);
    }

    #[must_use]
    pub fn drag_offsets(&self) -> DragOffsets {
        self.drag
    }

    pub fn set_drag_offset_x(&mut self, offset: f64) {
        self.drag.x = sanitize_offset(offset);
        self.touch = self.limit_trans_and_scale(self.touch);
    }

    pub fn set_drag_offset_y(&mut self, offset: f64) {
        self.drag.y = sanitize_offset(offset);
        self.touch = self.limit_trans_and_scale(self.touch);
    }

    #[must_use]
    pub fn has_no_drag_offset(&self) -> bool {
        self.drag.x <= 0.0 && self.drag.y <= 0.0
    }

    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.touch.scale_x
    }

    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.touch.scale_y
    }

    #[must_use]
    pub fn trans_x(&self) -> f64 {
        self.touch.trans_x
    }

    #[must_use]
    pub fn trans_y(&self) -> f64 {
        self.touch.trans_y
    }

    #[must_use]
    pub fn is_fully_zoomed_out(&self) -> bool {
        self.is_fully_zoomed_out_x() && self.is_fully_zoomed_out_y()
    }

    #[must_use]
    pub fn is_fully_zoomed_out_x(&self) -> bool {
        self.touch.scale_x <= self.limits.min_scale_x
    }

    #[must_use]
    pub fn is_fully_zoomed_out_y(&self) -> bool {
        self.touch.scale_y <= self.limits.min_scale_y
    }

    #[must_use]
    pub fn can_zoom_out_more_x(&self) -> bool {
        self.touch.scale_x > self.limits.min_scale_x
    }

    #[must_use]
    pub fn can_zoom_in_more_x(&self) -> bool {
        self.touch.scale_x < self.limits.max_scale_x
    }

    #[must_use]
    pub fn can_zoom_out_more_y(&self) -> bool {
        self.touch.scale_y > self.limits.min_scale_y
    }

    #[must_use]
    pub fn can_zoom_in_more_y(&self) -> bool {
        self.touch.scale_y < self.limits.max_scale_y
    }

    #[must_use]
    pub fn is_in_bounds_left(&self, x: f64) -> bool {
        self.content.left <= x + 1.0
    }

    #[must_use]
    pub fn is_in_bounds_right(&self, x: f64) -> bool {
        self.content.right >= truncate_hundredths(x) - 1.0
    }

    #[must_use]
    pub fn is_in_bounds_top(&self, y: f64) -> bool {
        self.content.top <= y
    }

    #[must_use]
    pub fn is_in_bounds_bottom(&self, y: f64) -> bool {
        self.content.bottom >= truncate_hundredths(y)
    }

    #[must_use]
    pub fn is_in_bounds_x(&self, x: f64) -> bool {
        self.is_in_bounds_left(x) && self.is_in_bounds_right(x)
    }

    #[must_use]
    pub fn is_in_bounds_y(&self, y: f64) -> bool {
        self.is_in_bounds_top(y) && self.is_in_bounds_bottom(y)
    }

    #[must_use]
    pub fn is_in_bounds(&self, x: f64, y: f64) -> bool {
        self.is_in_bounds_x(x) && self.is_in_bounds_y(y)
    }

    #[must_use]
    pub fn content_rect(&self) -> Rect {
        self.content
    }

    #[must_use]
    pub fn content_center(&self) -> PixelPoint {
        self.content.center()
    }

    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.content.width()
    }

    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content.height()
    }

    #[must_use]
    pub fn chart_width(&self) -> f64 {
        self.dimensions.width
    }

    #[must_use]
    pub fn chart_height(&self) -> f64 {
        self.dimensions.height
    }

    #[must_use]
    pub fn offset_left(&self) -> f64 {
        self.content.left
    }

    #[must_use]
    pub fn offset_top(&self) -> f64 {
        self.content.top
    }

    #[must_use]
    pub fn offset_right(&self) -> f64 {
        (self.dimensions.width - self.content.right).max(0.0)
    }

    #[must_use]
    pub fn offset_bottom(&self) -> f64 {
        (self.dimensions.height - self.content.bottom).max(0.0)
    }
}

/// Clamps a translation so that the scaled extent `[lo, hi]` still covers
/// the content edges, allowing `drag` pixels of overscroll on either side.
fn clamp_translation(trans: f64, scale: f64, lo: f64, hi: f64, drag: f64) -> f64 {
    let min_trans = hi * (1.0 - scale) - drag;
    let max_trans = lo * (1.0 - scale) + drag;
    trans.max(min_trans).min(max_trans)
}

fn sanitize_limits(limits: ScaleLimits) -> ScaleLimits {
    let positive_or = |v: f64, fallback: f64| {
        if v.is_finite() && v > 0.0 { v } else { fallback }
    };
    let min_scale_x = positive_or(limits.min_scale_x, 1.0);
    let min_scale_y = positive_or(limits.min_scale_y, 1.0);
    ScaleLimits {
        min_scale_x,
        max_scale_x: positive_or(limits.max_scale_x, f64::MAX).max(min_scale_x),
        min_scale_y,
        max_scale_y: positive_or(limits.max_scale_y, f64::MAX).max(min_scale_y),
    }
}

fn sanitize_offset(offset: f64) -> f64 {
    if offset.is_finite() { offset.max(0.0) } else { 0.0 }
}

fn truncate_hundredths(v: f64) -> f64 {
    (v * 100.0).trunc() / 100.0
}
