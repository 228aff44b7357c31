//! Axis-aligned bodies
//!
//! Every entity in the room is a rectangle. Position is the top-left corner in
//! pixels; the size is fixed when the body is built.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with a fixed size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    size: Vec2,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Body of the given size centered on `center`
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x;
    }

    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }

    /// Move so the center lands on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size / 2.0;
    }

    /// Strict overlap: bodies that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Distance between the two centers
    pub fn center_distance(&self, other: &Body) -> f32 {
        self.center().distance(other.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let body = Body::new(10.0, 20.0, 40.0, 30.0);
        assert_eq!(body.right(), 50.0);
        assert_eq!(body.bottom(), 50.0);
        assert_eq!(body.center(), Vec2::new(30.0, 35.0));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Body::new(0.0, 0.0, 50.0, 50.0);
        let b = Body::new(50.0, 0.0, 50.0, 50.0);
        assert!(!a.overlaps(&b));

        let c = Body::new(49.5, 10.0, 50.0, 50.0);
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_setters_keep_size() {
        let mut body = Body::new(0.0, 0.0, 40.0, 40.0);
        body.set_right(100.0);
        body.set_bottom(80.0);
        assert_eq!(body.pos, Vec2::new(60.0, 40.0));
        assert_eq!(body.width(), 40.0);
        assert_eq!(body.height(), 40.0);

        body.set_center(Vec2::new(25.0, 25.0));
        assert_eq!(body.pos, Vec2::new(5.0, 5.0));
    }
}
