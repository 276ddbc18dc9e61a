//! Planar geometry primitives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in the XY plane of the work coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point2D {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin (0, 0)
    pub fn origin() -> Self {
        Self::default()
    }

    /// Return this point translated by `(dx, dy)`
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2D {
    pub min: Point2D,
    pub max: Point2D,
}

impl Bounds2D {
    /// Bounds of a circle
    pub fn from_circle(center: Point2D, radius: f64) -> Self {
        Self {
            min: center.offset(-radius, -radius),
            max: center.offset(radius, radius),
        }
    }

    /// Smallest bounds covering both `self` and `other`
    pub fn union(&self, other: &Bounds2D) -> Self {
        Self {
            min: Point2D::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2D::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Grow the bounds by `margin` on every side
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: self.min.offset(-margin, -margin),
            max: self.max.offset(margin, margin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_bounds_union() {
        let a = Bounds2D::from_circle(Point2D::origin(), 5.0);
        let b = Bounds2D::from_circle(Point2D::new(16.0, 0.0), 5.0);
        let u = a.union(&b);
        assert_eq!(u.min, Point2D::new(-5.0, -5.0));
        assert_eq!(u.max, Point2D::new(21.0, 5.0));
        assert_eq!(u.width(), 26.0);
        assert_eq!(u.height(), 10.0);
    }

    #[test]
    fn test_bounds_expanded() {
        let b = Bounds2D::from_circle(Point2D::new(1.0, 1.0), 1.0).expanded(2.0);
        assert_eq!(b.min, Point2D::new(-2.0, -2.0));
        assert_eq!(b.max, Point2D::new(4.0, 4.0));
    }
}
