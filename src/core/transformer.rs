use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{AxisRange, DataPoint, Matrix, PixelPoint, Rect, ViewportHandler};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

/// Batches at least this many coordinates are mapped in parallel when the
/// `parallel-projection` feature is enabled.
#[cfg(feature = "parallel-projection")]
const PARALLEL_MIN_COORDS: usize = 16_384;

/// Which pixel axis the data x-axis runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisOrientation {
    /// Data x runs left-to-right, data y bottom-to-top.
    #[default]
    Vertical,
    /// Rotated layout (horizontal bars): data x runs bottom-to-top and data y
    /// left-to-right.
    Horizontal,
}

/// Data-space to pixel-space mapping for one value axis.
///
/// A point goes through three transforms, always in this order:
/// 1. value normalization: axis range onto a content-sized rectangle,
/// 2. offset: onto the content origin, flipping y unless the axis is
///    inverted,
/// 3. the viewport's touch matrix (pan/zoom).
///
/// The first two are cached by [`Transformer::prepare`]; the touch matrix is
/// read from the handler on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformer {
    orientation: AxisOrientation,
    inverted: bool,
    value_matrix: Matrix,
    offset_matrix: Matrix,
    base: Matrix,
    prepared: bool,
}

impl Transformer {
    #[must_use]
    pub fn new(orientation: AxisOrientation, inverted: bool) -> Self {
        Self {
            orientation,
            inverted,
            value_matrix: Matrix::IDENTITY,
            offset_matrix: Matrix::IDENTITY,
            base: Matrix::IDENTITY,
            prepared: false,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Changes the inverted flag. Takes effect on the next `prepare`.
    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    /// False while the content bounds are degenerate; mappings are then the
    /// identity.
    #[must_use]
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Recomputes the value and offset matrices.
    ///
    /// Call whenever an axis range or the content bounds change.
    pub fn prepare(&mut self, x_range: AxisRange, y_range: AxisRange, handler: &ViewportHandler) {
        let content = handler.content_rect();
        if content.is_degenerate() {
            warn!(
                width = content.width(),
                height = content.height(),
                "content bounds are degenerate, mapping falls back to identity"
            );
            self.value_matrix = Matrix::IDENTITY;
            self.offset_matrix = Matrix::IDENTITY;
            self.base = Matrix::IDENTITY;
            self.prepared = false;
            return;
        }

        self.value_matrix = self.value_normalization(x_range, y_range, content);
        self.offset_matrix = self.offset(content);
        self.base = self.value_matrix.then(self.offset_matrix);
        self.prepared = true;
    }

    fn value_normalization(&self, x_range: AxisRange, y_range: AxisRange, content: Rect) -> Matrix {
        match self.orientation {
            AxisOrientation::Vertical => {
                let sx = content.width() / x_range.range();
                let sy = content.height() / y_range.range();
                Matrix::scale_translate(sx, sy, -x_range.min() * sx, -y_range.min() * sy)
            }
            AxisOrientation::Horizontal => {
                let sx = content.width() / y_range.range();
                let sy = content.height() / x_range.range();
                Matrix {
                    scale_x: 0.0,
                    skew_x: sx,
                    trans_x: -y_range.min() * sx,
                    skew_y: sy,
                    scale_y: 0.0,
                    trans_y: -x_range.min() * sy,
                }
            }
        }
    }

    fn offset(&self, content: Rect) -> Matrix {
        match (self.orientation, self.inverted) {
            (AxisOrientation::Vertical, false) => {
                Matrix::scale_translate(1.0, -1.0, content.left, content.bottom)
            }
            (AxisOrientation::Vertical, true) => {
                Matrix::scale_translate(1.0, 1.0, content.left, content.top)
            }
            (AxisOrientation::Horizontal, false) => {
                Matrix::scale_translate(1.0, -1.0, content.left, content.bottom)
            }
            (AxisOrientation::Horizontal, true) => {
                Matrix::scale_translate(-1.0, -1.0, content.right, content.bottom)
            }
        }
    }

    #[must_use]
    pub fn value_matrix(&self) -> Matrix {
        self.value_matrix
    }

    #[must_use]
    pub fn offset_matrix(&self) -> Matrix {
        self.offset_matrix
    }

    /// Effective value-to-pixel matrix for an arbitrary touch matrix.
    ///
    /// Used by viewport jobs to evaluate a candidate before it is published.
    #[must_use]
    pub fn value_to_pixel_matrix(&self, touch: Matrix) -> Matrix {
        if !self.prepared {
            return Matrix::IDENTITY;
        }
        self.base.then(touch)
    }

    #[must_use]
    pub fn pixel_to_value_matrix(&self, touch: Matrix) -> Matrix {
        self.value_to_pixel_matrix(touch)
            .invert()
            .unwrap_or(Matrix::IDENTITY)
    }

    /// Maps interleaved `[x, y, x, y, ...]` data values to pixels in place.
    pub fn point_values_to_pixel(&self, handler: &ViewportHandler, pts: &mut [f64]) {
        self.point_values_to_pixel_with(handler.touch_matrix(), pts);
    }

    pub fn point_values_to_pixel_with(&self, touch: Matrix, pts: &mut [f64]) {
        if !self.prepared {
            return;
        }
        map_points(&self.value_to_pixel_matrix(touch), pts);
    }

    /// Maps interleaved pixel coordinates back to data values in place.
    pub fn pixels_to_value(&self, handler: &ViewportHandler, pts: &mut [f64]) {
        self.pixels_to_value_with(handler.touch_matrix(), pts);
    }

    pub fn pixels_to_value_with(&self, touch: Matrix, pts: &mut [f64]) {
        if !self.prepared {
            return;
        }
        map_points(&self.pixel_to_value_matrix(touch), pts);
    }

    #[must_use]
    pub fn pixel_for_values(&self, handler: &ViewportHandler, x: f64, y: f64) -> PixelPoint {
        self.pixel_for_values_with(handler.touch_matrix(), x, y)
    }

    #[must_use]
    pub fn pixel_for_values_with(&self, touch: Matrix, x: f64, y: f64) -> PixelPoint {
        let mut pts = [x, y];
        self.point_values_to_pixel_with(touch, &mut pts);
        PixelPoint::new(pts[0], pts[1])
    }

    #[must_use]
    pub fn values_by_touch_point(&self, handler: &ViewportHandler, x: f64, y: f64) -> DataPoint {
        let mut pts = [x, y];
        self.pixels_to_value(handler, &mut pts);
        DataPoint::new(pts[0], pts[1])
    }

    /// Maps a data-space rectangle to a sorted pixel rectangle.
    #[must_use]
    pub fn rect_value_to_pixel(&self, handler: &ViewportHandler, rect: Rect) -> Rect {
        let mut pts = [rect.left, rect.top, rect.right, rect.bottom];
        self.point_values_to_pixel(handler, &mut pts);
        Rect::new(pts[0], pts[1], pts[2], pts[3]).sorted()
    }

    #[must_use]
    pub fn path_value_to_pixel(&self, handler: &ViewportHandler, path: &[DataPoint]) -> Vec<PixelPoint> {
        let mut pts: Vec<f64> = path.iter().flat_map(|p| [p.x, p.y]).collect();
        self.point_values_to_pixel(handler, &mut pts);
        pts.chunks_exact(2)
            .map(|pair| PixelPoint::new(pair[0], pair[1]))
            .collect()
    }
}

fn map_points(matrix: &Matrix, pts: &mut [f64]) {
    #[cfg(feature = "parallel-projection")]
    {
        if pts.len() >= PARALLEL_MIN_COORDS {
            pts.par_chunks_mut(4_096)
                .for_each(|chunk| matrix.map_points(chunk));
            return;
        }
    }

    matrix.map_points(pts);
}

#[cfg(test)]
mod tests {
    use super::{AxisOrientation, Transformer};
    use crate::core::{AxisRange, ViewportHandler};

    fn handler(width: f64, height: f64, margin: f64) -> ViewportHandler {
        let mut handler = ViewportHandler::new();
        handler.set_chart_dimensions(width, height);
        handler.restrain_content_bounds(margin, margin, margin, margin);
        handler
    }

    fn range(min: f64, max: f64) -> AxisRange {
        AxisRange::new(min, max).expect("valid range")
    }

    #[test]
    fn uninverted_axis_grows_upward() {
        let handler = handler(600.0, 400.0, 50.0);
        let mut t = Transformer::new(AxisOrientation::Vertical, false);
        t.prepare(range(0.0, 10.0), range(0.0, 100.0), &handler);

        let bottom_left = t.pixel_for_values(&handler, 0.0, 0.0);
        let top_right = t.pixel_for_values(&handler, 10.0, 100.0);
        assert_eq!((bottom_left.x, bottom_left.y), (50.0, 350.0));
        assert_eq!((top_right.x, top_right.y), (550.0, 50.0));
    }

    #[test]
    fn inverted_axis_grows_downward() {
        let handler = handler(600.0, 400.0, 50.0);
        let mut t = Transformer::new(AxisOrientation::Vertical, true);
        t.prepare(range(0.0, 10.0), range(0.0, 100.0), &handler);

        let p = t.pixel_for_values(&handler, 0.0, 0.0);
        assert_eq!((p.x, p.y), (50.0, 50.0));
        let p = t.pixel_for_values(&handler, 0.0, 100.0);
        assert_eq!(p.y, 350.0);
    }

    #[test]
    fn horizontal_orientation_swaps_axes() {
        let handler = handler(600.0, 400.0, 0.0);
        let mut t = Transformer::new(AxisOrientation::Horizontal, false);
        t.prepare(range(0.0, 4.0), range(0.0, 60.0), &handler);

        let p = t.pixel_for_values(&handler, 1.0, 30.0);
        assert!((p.x - 300.0).abs() <= 1e-9);
        assert!((p.y - 300.0).abs() <= 1e-9);

        let back = t.values_by_touch_point(&handler, p.x, p.y);
        assert!((back.x - 1.0).abs() <= 1e-9);
        assert!((back.y - 30.0).abs() <= 1e-9);
    }

    #[test]
    fn horizontal_inverted_flips_value_axis() {
        let handler = handler(600.0, 400.0, 0.0);
        let mut t = Transformer::new(AxisOrientation::Horizontal, true);
        t.prepare(range(0.0, 4.0), range(0.0, 60.0), &handler);

        let p = t.pixel_for_values(&handler, 0.0, 0.0);
        assert_eq!((p.x, p.y), (600.0, 400.0));
    }

    #[test]
    fn degenerate_content_maps_to_identity() {
        let handler = ViewportHandler::new();
        let mut t = Transformer::new(AxisOrientation::Vertical, false);
        t.prepare(range(0.0, 10.0), range(0.0, 10.0), &handler);

        assert!(!t.is_prepared());
        let mut pts = [3.0, 4.0];
        t.point_values_to_pixel(&handler, &mut pts);
        assert_eq!(pts, [3.0, 4.0]);
        t.pixels_to_value(&handler, &mut pts);
        assert_eq!(pts, [3.0, 4.0]);
    }

    #[test]
    fn batched_mapping_matches_scalar_mapping() {
        let handler = handler(800.0, 600.0, 20.0);
        let mut t = Transformer::new(AxisOrientation::Vertical, false);
        t.prepare(range(-3.0, 7.0), range(10.0, 90.0), &handler);

        let values = [(-3.0, 10.0), (0.25, 33.3), (6.9, 89.0), (2.0, 50.0)];
        let mut batch: Vec<f64> = values.iter().flat_map(|(x, y)| [*x, *y]).collect();
        t.point_values_to_pixel(&handler, &mut batch);

        for (idx, (x, y)) in values.iter().enumerate() {
            let p = t.pixel_for_values(&handler, *x, *y);
            assert_eq!(batch[idx * 2], p.x);
            assert_eq!(batch[idx * 2 + 1], p.y);
        }
    }
}
