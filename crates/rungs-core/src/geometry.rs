//! Geometric primitives for ladder layout.
//!
//! - [`Point`] - A 2D coordinate in document space
//! - [`Size`] - Width and height of a measured element
//! - [`Bounds`] - An axis-aligned rectangle
//!
//! # Coordinate System
//!
//! Rungs uses the SVG convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Node positions always refer to the top-left corner of the node.

/// A 2D point in document coordinates.
///
/// # Examples
///
/// ```
/// # use rungs_core::geometry::Point;
/// let port = Point::new(40.0, 20.0);
/// let moved = port.add_point(Point::new(8.0, -4.0));
/// assert_eq!(moved, Point::new(48.0, 16.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns a copy of this point with a different x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Returns a copy of this point with a different y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Component-wise addition
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Component-wise subtraction
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Returns `true` if either coordinate is NaN or infinite.
    ///
    /// Unmeasured elements report NaN sizes, so anything derived from them
    /// must be filtered before it reaches geometry code.
    pub fn is_degenerate(self) -> bool {
        !self.x.is_finite() || !self.y.is_finite()
    }
}

/// The measured dimensions of an element
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a copy with a different width
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Returns a copy with a different height
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Returns a new Size with the maximum width and height of both sizes
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// An axis-aligned rectangle stored as minimum and maximum coordinates.
///
/// # Examples
///
/// ```
/// # use rungs_core::geometry::{Bounds, Point, Size};
/// let content = Bounds::new_from_top_left(Point::new(50.0, 0.0), Size::new(900.0, 80.0));
/// assert_eq!(content.max_x(), 950.0);
/// assert_eq!(content.top_right(), Point::new(950.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate (left edge)
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate (top edge)
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate (right edge)
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate (bottom edge)
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner
    pub fn top_left(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the top-right corner
    pub fn top_right(self) -> Point {
        Point::new(self.max_x, self.min_y)
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns a copy resized to `width`, keeping the top-left corner fixed
    pub fn with_width(mut self, width: f32) -> Self {
        self.max_x = self.min_x + width;
        self
    }

    /// Returns a copy resized to `height`, keeping the top-left corner fixed
    pub fn with_height(mut self, height: f32) -> Self {
        self.max_y = self.min_y + height;
        self
    }

    /// Smallest bounds containing both `self` and `other`
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset, keeping its size.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rungs_core::geometry::{Bounds, Point, Size};
    /// let lane = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 80.0));
    /// let stacked = lane.translate(Point::new(0.0, 80.0));
    /// assert_eq!(stacked.min_y(), 80.0);
    /// assert_eq!(stacked.height(), 80.0);
    /// ```
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Returns `true` if the horizontal extents of both bounds share more
    /// than `tolerance` units.
    pub fn overlaps_horizontally(&self, other: &Self, tolerance: f32) -> bool {
        self.min_x.max(other.min_x) + tolerance < self.max_x.min(other.max_x)
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Translation keeps the size of the bounds.
    fn check_translate_preserves_size(bounds: Bounds, offset: Point) -> Result<(), TestCaseError> {
        let moved = bounds.translate(offset);

        prop_assert!(approx_eq!(f32, moved.width(), bounds.width(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, moved.height(), bounds.height(), epsilon = 0.001));
        Ok(())
    }

    /// Merged bounds should contain both inputs.
    fn check_merge_contains_both(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let merged = b1.merge(&b2);

        for b in [b1, b2] {
            prop_assert!(merged.min_x() <= b.min_x());
            prop_assert!(merged.min_y() <= b.min_y());
            prop_assert!(merged.max_x() >= b.max_x());
            prop_assert!(merged.max_y() >= b.max_y());
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn translate_preserves_size(bounds in bounds_strategy(), offset in point_strategy()) {
            check_translate_preserves_size(bounds, offset)?;
        }

        #[test]
        fn merge_contains_both(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_merge_contains_both(b1, b2)?;
        }
    }
}
