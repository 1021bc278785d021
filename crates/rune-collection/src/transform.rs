//! Affine transform carried by [`LayoutAttributes`](crate::LayoutAttributes).
//!
//! Cells are transformed around their own center, so a pure scale shrinks or
//! grows an item in place:
//!
//! ```ignore
//! attrs.transform = Transform2D::scale_uniform(0.5);
//! let on_screen = attrs.visible_frame();
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Row-major 2x3 affine matrix; the implicit third row is `[0, 0, 1]`.
///
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    pub fn scale_uniform(s: f64) -> Self {
        Self::scale(s, s)
    }

    /// `self * other`: the result maps a point through `other`, then `self`.
    pub fn then(&self, other: &Self) -> Self {
        let (tx, ty) = self.apply_point(other.tx, other.ty);
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            tx,
            ty,
        }
    }

    pub fn apply_point(&self, x: f64, y: f64) -> (f64, f64) {
        let Self { a, b, c, d, tx, ty } = *self;
        (a * x + c * y + tx, b * x + d * y + ty)
    }

    /// The same transform pivoting on `pivot` rather than the origin.
    pub fn about(&self, pivot: Point) -> Self {
        let (px, py) = (f64::from(pivot.x), f64::from(pivot.y));
        Self::translate(px, py)
            .then(self)
            .then(&Self::translate(-px, -py))
    }

    /// Bounding box of `frame` once transformed around its own center.
    pub fn apply_to_frame(&self, frame: Rect) -> Rect {
        let pivoted = self.about(frame.center());
        let xs = [frame.min_x(), frame.max_x()].map(f64::from);
        let ys = [frame.min_y(), frame.max_y()].map(f64::from);

        let mut lo = (f64::INFINITY, f64::INFINITY);
        let mut hi = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for x in xs {
            for y in ys {
                let (px, py) = pivoted.apply_point(x, y);
                lo = (lo.0.min(px), lo.1.min(py));
                hi = (hi.0.max(px), hi.1.max(py));
            }
        }
        Rect::new(
            lo.0 as f32,
            lo.1 as f32,
            (hi.0 - lo.0) as f32,
            (hi.1 - lo.1) as f32,
        )
    }

    /// Every component within `epsilon` of the identity matrix.
    pub fn is_identity(&self, epsilon: f64) -> bool {
        let id = Self::IDENTITY;
        [
            self.a - id.a,
            self.b - id.b,
            self.c - id.c,
            self.d - id.d,
            self.tx - id.tx,
            self.ty - id.ty,
        ]
        .iter()
        .all(|delta| delta.abs() < epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let t = Transform2D::default();
        assert!(t.is_identity(1e-12));
        assert_eq!(t.apply_point(3.0, -7.0), (3.0, -7.0));
        assert!(!Transform2D::scale_uniform(0.9).is_identity(1e-3));
    }

    #[test]
    fn test_then_applies_right_operand_first() {
        let shift = Transform2D::translate(10.0, 20.0);
        let double = Transform2D::scale_uniform(2.0);

        assert_eq!(shift.then(&double).apply_point(1.0, 1.0), (12.0, 22.0));
        assert_eq!(double.then(&shift).apply_point(1.0, 1.0), (22.0, 42.0));
    }

    #[test]
    fn test_about_keeps_pivot_fixed() {
        let t = Transform2D::scale_uniform(0.5).about(Point::new(50.0, 50.0));
        assert_eq!(t.apply_point(50.0, 50.0), (50.0, 50.0));
        assert_eq!(t.apply_point(0.0, 0.0), (25.0, 25.0));
    }

    #[test]
    fn test_apply_to_frame_scales_in_place() {
        let frame = Rect::new(0.0, 0.0, 100.0, 40.0);
        assert_eq!(
            Transform2D::scale_uniform(0.5).apply_to_frame(frame),
            Rect::new(25.0, 10.0, 50.0, 20.0)
        );
        assert_eq!(Transform2D::identity().apply_to_frame(frame), frame);
    }

    #[test]
    fn test_apply_to_frame_with_mirror_and_shift() {
        // Horizontal flip keeps the box; the translation moves it.
        let frame = Rect::new(10.0, 10.0, 20.0, 20.0);
        let t = Transform2D::translate(5.0, 0.0).then(&Transform2D::scale(-1.0, 1.0));
        assert_eq!(t.apply_to_frame(frame), Rect::new(15.0, 10.0, 20.0, 20.0));
    }
}
