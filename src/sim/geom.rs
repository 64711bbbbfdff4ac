//! Axis-aligned bounding boxes
//!
//! Every collision query in the simulation reduces to rectangle overlap,
//! so this is the one geometric primitive the rest of `sim` consumes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square rect of side `size` whose top-left corner sits at `pos`
    pub fn square_at(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict open-interval overlap test. Rectangles that merely share
    /// an edge or corner do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Whether this rect lies entirely inside `[0, bounds.x] x [0, bounds.y]`
    #[inline]
    pub fn within(&self, bounds: Vec2) -> bool {
        self.left() >= 0.0 && self.right() <= bounds.x && self.top() >= 0.0 && self.bottom() <= bounds.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));

        let far = Rect::new(100.0, 100.0, 10.0, 10.0);
        assert!(!a.overlaps(&far));
    }

    #[test]
    fn test_shared_edge_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right_neighbor = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below_neighbor = Rect::new(0.0, 10.0, 10.0, 10.0);
        let corner_neighbor = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right_neighbor));
        assert!(!a.overlaps(&below_neighbor));
        assert!(!a.overlaps(&corner_neighbor));
    }

    #[test]
    fn test_containment_is_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_within_bounds() {
        let bounds = Vec2::new(800.0, 600.0);
        assert!(Rect::new(0.0, 0.0, 40.0, 40.0).within(bounds));
        assert!(Rect::new(760.0, 560.0, 40.0, 40.0).within(bounds));
        assert!(!Rect::new(-0.1, 0.0, 40.0, 40.0).within(bounds));
        assert!(!Rect::new(761.0, 0.0, 40.0, 40.0).within(bounds));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (
            -500.0f32..500.0,
            -500.0f32..500.0,
            0.1f32..200.0,
            0.1f32..200.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn rect_never_overlaps_edge_neighbor(a in arb_rect()) {
            let shifted = Rect::new(a.right(), a.y, a.w, a.h);
            prop_assert!(!a.overlaps(&shifted));
        }

        #[test]
        fn rect_overlaps_itself(a in arb_rect()) {
            prop_assert!(a.overlaps(&a));
        }
    }
}
