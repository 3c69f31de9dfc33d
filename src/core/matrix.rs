use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;

/// 2D affine transform (the top two rows of a 3x3 matrix).
///
/// Points are column vectors, so `a.then(b)` maps a point through `a` first
/// and `b` second. Touch matrices only ever hold scale + translate; the
/// skew terms carry the axis swap of rotated (horizontal) layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub scale_x: f64,
    pub skew_x: f64,
    pub trans_x: f64,
    pub skew_y: f64,
    pub scale_y: f64,
    pub trans_y: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        skew_x: 0.0,
        trans_x: 0.0,
        skew_y: 0.0,
        scale_y: 1.0,
        trans_y: 0.0,
    };

    #[must_use]
    pub const fn scale_translate(scale_x: f64, scale_y: f64, trans_x: f64, trans_y: f64) -> Self {
        Self {
            scale_x,
            skew_x: 0.0,
            trans_x,
            skew_y: 0.0,
            scale_y,
            trans_y,
        }
    }

    #[must_use]
    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self::scale_translate(1.0, 1.0, dx, dy)
    }

    #[must_use]
    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self::scale_translate(sx, sy, 0.0, 0.0)
    }

    /// Scale around a pivot point.
    #[must_use]
    pub fn scaling_around(sx: f64, sy: f64, px: f64, py: f64) -> Self {
        Self::scale_translate(sx, sy, px - sx * px, py - sy * py)
    }

    /// Row-major 3x3 representation.
    #[must_use]
    pub fn values(self) -> [f64; 9] {
        [
            self.scale_x,
            self.skew_x,
            self.trans_x,
            self.skew_y,
            self.scale_y,
            self.trans_y,
            0.0,
            0.0,
            1.0,
        ]
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Returns the transform that applies `self` and then `next`.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        Self {
            scale_x: next.scale_x * self.scale_x + next.skew_x * self.skew_y,
            skew_x: next.scale_x * self.skew_x + next.skew_x * self.scale_y,
            trans_x: next.scale_x * self.trans_x + next.skew_x * self.trans_y + next.trans_x,
            skew_y: next.skew_y * self.scale_x + next.scale_y * self.skew_y,
            scale_y: next.skew_y * self.skew_x + next.scale_y * self.scale_y,
            trans_y: next.skew_y * self.trans_x + next.scale_y * self.trans_y + next.trans_y,
        }
    }

    /// `self = self.then(next)`.
    pub fn post_concat(&mut self, next: Self) {
        *self = self.then(next);
    }

    /// `self = prev.then(self)`.
    pub fn pre_concat(&mut self, prev: Self) {
        *self = prev.then(*self);
    }

    pub fn post_translate(&mut self, dx: f64, dy: f64) {
        self.post_concat(Self::translation(dx, dy));
    }

    pub fn post_scale(&mut self, sx: f64, sy: f64) {
        self.post_concat(Self::scaling(sx, sy));
    }

    pub fn post_scale_around(&mut self, sx: f64, sy: f64, px: f64, py: f64) {
        self.post_concat(Self::scaling_around(sx, sy, px, py));
    }

    #[must_use]
    pub fn determinant(self) -> f64 {
        self.scale_x * self.scale_y - self.skew_x * self.skew_y
    }

    /// Returns the inverse transform, or `None` when the matrix is singular.
    #[must_use]
    pub fn invert(self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Self {
            scale_x: self.scale_y * inv_det,
            skew_x: -self.skew_x * inv_det,
            trans_x: (self.skew_x * self.trans_y - self.trans_x * self.scale_y) * inv_det,
            skew_y: -self.skew_y * inv_det,
            scale_y: self.scale_x * inv_det,
            trans_y: (self.trans_x * self.skew_y - self.scale_x * self.trans_y) * inv_det,
        })
    }

    #[inline]
    #[must_use]
    pub fn map_xy(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.scale_x * x + self.skew_x * y + self.trans_x,
            self.skew_y * x + self.scale_y * y + self.trans_y,
        )
    }

    #[inline]
    #[must_use]
    pub fn map_point(&self, point: PixelPoint) -> PixelPoint {
        let (x, y) = self.map_xy(point.x, point.y);
        PixelPoint::new(x, y)
    }

    /// Maps interleaved `[x0, y0, x1, y1, ...]` coordinates in place.
    ///
    /// A trailing unpaired value is left untouched.
    pub fn map_points(&self, pts: &mut [f64]) {
        for pair in pts.chunks_exact_mut(2) {
            let (x, y) = self.map_xy(pair[0], pair[1]);
            pair[0] = x;
            pair[1] = y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Matrix;

    #[test]
    fn then_applies_left_operand_first() {
        let scale = Matrix::scaling(2.0, 3.0);
        let shift = Matrix::translation(10.0, -5.0);

        let (x, y) = scale.then(shift).map_xy(1.0, 1.0);
        assert_eq!((x, y), (12.0, -2.0));

        let (x, y) = shift.then(scale).map_xy(1.0, 1.0);
        assert_eq!((x, y), (22.0, -12.0));
    }

    #[test]
    fn scaling_around_keeps_pivot_fixed() {
        let m = Matrix::scaling_around(2.0, 0.5, 40.0, 80.0);
        assert_eq!(m.map_xy(40.0, 80.0), (40.0, 80.0));
        assert_eq!(m.map_xy(50.0, 100.0), (60.0, 90.0));
    }

    #[test]
    fn invert_round_trips_skewed_matrix() {
        let m = Matrix {
            scale_x: 2.0,
            skew_x: 0.5,
            trans_x: 3.0,
            skew_y: -0.25,
            scale_y: 1.5,
            trans_y: -7.0,
        };
        let inv = m.invert().expect("invertible");
        let (x, y) = m.map_xy(4.0, -9.0);
        let (rx, ry) = inv.map_xy(x, y);
        assert!((rx - 4.0).abs() <= 1e-12);
        assert!((ry + 9.0).abs() <= 1e-12);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Matrix::scaling(0.0, 1.0).invert().is_none());
    }

    #[test]
    fn map_points_ignores_trailing_value() {
        let mut pts = [1.0, 2.0, 3.0];
        Matrix::translation(1.0, 1.0).map_points(&mut pts);
        assert_eq!(pts, [2.0, 3.0, 3.0]);
    }
}
