//! Per-item layout attributes.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};
use crate::index_path::IndexPath;
use crate::transform::Transform2D;

/// Geometry and appearance of one cell: the bundle a layout produces for
/// the steady state and the resolver copies and mutates for transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutAttributes {
    /// Address of the item these attributes describe.
    pub index_path: IndexPath,
    /// Untransformed frame in the container's coordinate space.
    pub frame: Rect,
    /// Opacity in `0.0..=1.0`.
    pub alpha: f32,
    /// Transform applied around the frame's center.
    pub transform: Transform2D,
    /// Stacking order; higher draws on top.
    pub z_index: i32,
    pub hidden: bool,
}

impl LayoutAttributes {
    /// Fully opaque, untransformed attributes for `index_path` at `frame`.
    pub fn new(index_path: IndexPath, frame: Rect) -> Self {
        Self {
            index_path,
            frame,
            alpha: 1.0,
            transform: Transform2D::identity(),
            z_index: 0,
            hidden: false,
        }
    }

    pub fn center(&self) -> Point {
        self.frame.center()
    }

    /// Move the frame so it is centered on `center`, keeping its size.
    pub fn set_center(&mut self, center: Point) {
        self.frame.x = center.x - self.frame.w * 0.5;
        self.frame.y = center.y - self.frame.h * 0.5;
    }

    pub fn size(&self) -> Size {
        self.frame.size()
    }

    /// Resize the frame around its current center.
    pub fn set_size(&mut self, size: Size) {
        let center = self.center();
        self.frame.w = size.w;
        self.frame.h = size.h;
        self.set_center(center);
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_transform(mut self, transform: Transform2D) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// The frame as it appears on screen once `transform` is applied.
    pub fn visible_frame(&self) -> Rect {
        self.transform.apply_to_frame(self.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> LayoutAttributes {
        LayoutAttributes::new(IndexPath::new(0, 0), Rect::new(0.0, 0.0, 100.0, 50.0))
    }

    #[test]
    fn test_defaults() {
        let attrs = cell();
        assert_eq!(attrs.alpha, 1.0);
        assert!(attrs.transform.is_identity(1e-12));
        assert_eq!(attrs.z_index, 0);
        assert!(!attrs.hidden);
    }

    #[test]
    fn test_set_center_keeps_size() {
        let mut attrs = cell();
        attrs.set_center(Point::new(200.0, 200.0));
        assert_eq!(attrs.frame, Rect::new(150.0, 175.0, 100.0, 50.0));
    }

    #[test]
    fn test_set_size_keeps_center() {
        let mut attrs = cell();
        attrs.set_size(Size::new(20.0, 10.0));
        assert_eq!(attrs.center(), Point::new(50.0, 25.0));
        assert_eq!(attrs.frame, Rect::new(40.0, 20.0, 20.0, 10.0));
    }

    #[test]
    fn test_visible_frame_follows_transform() {
        let attrs = cell().with_transform(Transform2D::scale_uniform(0.5));
        assert_eq!(attrs.visible_frame(), Rect::new(25.0, 12.5, 50.0, 25.0));
        assert_eq!(cell().visible_frame(), cell().frame);
    }
}
