//! Geometry primitives shared by every widget.
//!
//! Positions use the embedded-graphics [`Point`] type directly, aliased as
//! [`Vec2`]. [`Bounds`] is a signed axis-aligned rectangle expressed relative
//! to a widget's transform origin, so it may extend to the left of or above
//! that origin (buttons are centered on their transform).

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use serde::{Deserialize, Serialize};

/// 2D position or offset in pixels.
pub type Vec2 = Point;

/// Axis-aligned rectangle with inclusive `left`/`top` and exclusive
/// `right`/`bottom` edges.
///
/// A bounds with zero width and zero height is *empty*: it is the identity
/// of [`Bounds::add`], which lets containers start from `Bounds::empty()` and
/// accumulate their children without special-casing the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    /// Create bounds from a top-left corner and a size.
    pub const fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            right: left.saturating_add(span(width)),
            bottom: top.saturating_add(span(height)),
        }
    }

    /// Bounds that cover nothing.
    pub const fn empty() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Bounds of the given size centered on the origin.
    ///
    /// Odd sizes put the extra pixel on the right/bottom side.
    pub const fn centered(size: Size) -> Self {
        Self::new(
            -((size.width >> 1) as i32),
            -((size.height >> 1) as i32),
            size.width,
            size.height,
        )
    }

    pub const fn width(&self) -> u32 {
        unsigned(self.right.saturating_sub(self.left))
    }

    pub const fn height(&self) -> u32 {
        unsigned(self.bottom.saturating_sub(self.top))
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub const fn is_empty(&self) -> bool {
        self.width() == 0 && self.height() == 0
    }

    /// Extend this rectangle in place so it also covers `other`.
    ///
    /// Returns `self` so unions can be chained.
    pub fn add(&mut self, other: Bounds) -> &mut Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            *self = other;
            return self;
        }
        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.max(other.bottom);
        self
    }

    /// Return a copy shifted by `offset`. `self` is left untouched.
    pub fn translated(&self, offset: Vec2) -> Bounds {
        Bounds {
            left: self.left + offset.x,
            top: self.top + offset.y,
            right: self.right + offset.x,
            bottom: self.bottom + offset.y,
        }
    }

    /// Expand every edge outward by `amount` pixels.
    pub fn grow(&mut self, amount: i32) -> &mut Self {
        self.left -= amount;
        self.top -= amount;
        self.right += amount;
        self.bottom += amount;
        self
    }

    /// Convert to an embedded-graphics rectangle placed at `origin`.
    pub fn to_rectangle(&self, origin: Vec2) -> Rectangle {
        Rectangle::new(
            Point::new(origin.x + self.left, origin.y + self.top),
            self.size(),
        )
    }
}

/// Pixel length as a signed span, saturating at `i32::MAX`.
const fn span(len: u32) -> i32 {
    if len > i32::MAX as u32 {
        i32::MAX
    } else {
        len as i32
    }
}

const fn unsigned(len: i32) -> u32 {
    if len > 0 { len as u32 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_on_empty_yields_other() {
        let mut bounds = Bounds::empty();
        let other = Bounds::new(-3, 4, 10, 6);
        bounds.add(other);
        assert_eq!(bounds, other);
    }

    #[test]
    fn test_add_empty_is_noop() {
        let mut bounds = Bounds::new(1, 1, 4, 4);
        bounds.add(Bounds::empty());
        assert_eq!(bounds, Bounds::new(1, 1, 4, 4));
    }

    #[test]
    fn test_add_is_commutative_and_associative() {
        let a = Bounds::new(0, 0, 5, 5);
        let b = Bounds::new(-10, 2, 3, 20);
        let c = Bounds::new(7, -4, 2, 2);

        let mut abc = a;
        abc.add(b).add(c);
        let mut acb = a;
        acb.add(c).add(b);
        let mut cba = c;
        cba.add(b).add(a);

        assert_eq!(abc, acb);
        assert_eq!(abc, cba);
        assert_eq!(
            abc,
            Bounds {
                left: -10,
                top: -4,
                right: 9,
                bottom: 22,
            }
        );
    }

    #[test]
    fn test_translated_is_pure() {
        let bounds = Bounds::new(1, 2, 3, 4);
        let moved = bounds.translated(Point::new(10, -2));
        assert_eq!(bounds, Bounds::new(1, 2, 3, 4));
        assert_eq!(moved, Bounds::new(11, 0, 3, 4));
    }

    #[test]
    fn test_grow_is_symmetric() {
        let mut bounds = Bounds::new(0, 0, 10, 6);
        bounds.grow(2);
        assert_eq!(bounds, Bounds::new(-2, -2, 14, 10));
    }

    #[test]
    fn test_centered_odd_size() {
        let bounds = Bounds::centered(Size::new(15, 16));
        assert_eq!(bounds.left, -7);
        assert_eq!(bounds.right, 8);
        assert_eq!(bounds.top, -8);
        assert_eq!(bounds.bottom, 8);
    }

    #[test]
    fn test_huge_sizes_saturate() {
        let bounds = Bounds::new(10, 0, u32::MAX, 4);
        assert_eq!(bounds.right, i32::MAX);
        assert_eq!(bounds.width(), (i32::MAX - 10) as u32);
        assert_eq!(bounds.height(), 4);
    }

    #[test]
    fn test_to_rectangle() {
        let rect = Bounds::centered(Size::new(4, 4)).to_rectangle(Point::new(10, 10));
        assert_eq!(rect, Rectangle::new(Point::new(8, 8), Size::new(4, 4)));
    }
}
