// ============================================================================
// AFFINE TRANSFORMS — 3x3 homogeneous matrices for polygon manipulation
// ============================================================================

/// A 3x3 matrix over homogeneous 2D coordinates `[x, y, 1]ᵀ`.
///
/// The translate/rotate/scale constructors keep the bottom row `[0, 0, 1]`
/// (no perspective). Matrices are immutable once built; `then` composes
/// and `apply` maps point batches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    m: [[f64; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Translation by `(dx, dy)`.
    pub fn translate(dx: f64, dy: f64) -> Self {
        Mat3 {
            m: [[1.0, 0.0, dx], [0.0, 1.0, dy], [0.0, 0.0, 1.0]],
        }
    }

    /// Rotation by `angle` radians about the pivot `(cx, cy)`:
    /// `T(cx, cy) · R(angle) · T(-cx, -cy)` collapsed into one matrix.
    pub fn rotate(cx: f64, cy: f64, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Mat3 {
            m: [
                [c, -s, cx - c * cx + s * cy],
                [s, c, cy - s * cx - c * cy],
                [0.0, 0.0, 1.0],
            ],
        }
    }

    /// Uniform scaling by `k` about the pivot `(cx, cy)`:
    /// `T(cx, cy) · S(k, k) · T(-cx, -cy)` collapsed into one matrix.
    pub fn scale(cx: f64, cy: f64, k: f64) -> Self {
        Mat3 {
            m: [
                [k, 0.0, cx - k * cx],
                [0.0, k, cy - k * cy],
                [0.0, 0.0, 1.0],
            ],
        }
    }

    /// `self · rhs`: applying the result runs `rhs` first, then `self`.
    pub fn then(&self, rhs: &Mat3) -> Mat3 {
        let mut out = [[0.0f64; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[r][k] * rhs.m[k][c]).sum();
            }
        }
        Mat3 { m: out }
    }

    /// Transform a single point, dividing out the homogeneous component.
    /// `w` is 1 by construction for this matrix family; near-zero `w` is
    /// clamped to 1 to avoid a division blow-up.
    pub fn apply_point(&self, x: f64, y: f64) -> (f64, f64) {
        let vx = self.m[0][0] * x + self.m[0][1] * y + self.m[0][2];
        let vy = self.m[1][0] * x + self.m[1][1] * y + self.m[1][2];
        let mut vw = self.m[2][0] * x + self.m[2][1] * y + self.m[2][2];
        if vw.abs() < 1e-9 {
            vw = 1.0;
        }
        (vx / vw, vy / vw)
    }

    /// Transform a batch of points into a new list.
    pub fn apply(&self, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        points.iter().map(|&(x, y)| self.apply_point(x, y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn assert_points_close(a: &[(f64, f64)], b: &[(f64, f64)]) {
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(b) {
            assert!(
                (pa.0 - pb.0).abs() < 1e-6 && (pa.1 - pb.1).abs() < 1e-6,
                "{pa:?} != {pb:?}"
            );
        }
    }

    #[test]
    fn translate_moves_points() {
        let m = Mat3::translate(3.0, -4.5);
        assert_eq!(m.apply_point(1.0, 2.0), (4.0, -2.5));
    }

    #[test]
    fn rotate_quarter_turn_about_origin() {
        let m = Mat3::rotate(0.0, 0.0, FRAC_PI_2);
        let (x, y) = m.apply_point(1.0, 0.0);
        assert!((x - 0.0).abs() < EPS && (y - 1.0).abs() < EPS);
    }

    #[test]
    fn rotate_keeps_pivot_fixed() {
        let m = Mat3::rotate(10.0, 20.0, 1.234);
        let (x, y) = m.apply_point(10.0, 20.0);
        assert!((x - 10.0).abs() < EPS && (y - 20.0).abs() < EPS);
    }

    #[test]
    fn scale_about_pivot() {
        let m = Mat3::scale(2.0, 2.0, 2.0);
        assert_eq!(m.apply_point(3.0, 2.0), (4.0, 2.0));
        assert_eq!(m.apply_point(2.0, 2.0), (2.0, 2.0));
    }

    #[test]
    fn scale_round_trip() {
        let pts = vec![(1.0, 2.0), (-3.0, 4.0), (0.5, -0.25)];
        let k = 2.75;
        let fwd = Mat3::scale(5.0, -1.0, k);
        let back = Mat3::scale(5.0, -1.0, 1.0 / k);
        let restored = back.apply(&fwd.apply(&pts));
        assert_points_close(&restored, &pts);
    }

    #[test]
    fn rotation_round_trip() {
        let pts = vec![(7.0, 1.0), (-2.0, -9.0), (3.25, 0.0)];
        let fwd = Mat3::rotate(1.0, 2.0, 0.7);
        let back = Mat3::rotate(1.0, 2.0, -0.7);
        let restored = back.apply(&fwd.apply(&pts));
        assert_points_close(&restored, &pts);
    }

    #[test]
    fn composition_order_is_right_to_left() {
        // Rotate about origin, then translate.
        let m = Mat3::translate(10.0, 0.0).then(&Mat3::rotate(0.0, 0.0, PI));
        let (x, y) = m.apply_point(1.0, 0.0);
        assert!((x - 9.0).abs() < EPS && y.abs() < EPS);
    }

    #[test]
    fn bottom_row_stays_affine() {
        let m = Mat3::translate(2.0, 3.0)
            .then(&Mat3::rotate(4.0, 5.0, 0.3))
            .then(&Mat3::scale(-1.0, 0.0, 3.0));
        assert_eq!(m.m[2], [0.0, 0.0, 1.0]);
    }
}
