use std::ops::{Add, Sub};

/// 2D vector with f32 coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Create a new vector
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a zero vector
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Replace negative or non-finite components by zero
    ///
    /// Collapsed nodes may report degenerate dimensions, which are laid out
    /// as if they had no extent at all.
    pub fn sanitized(self) -> Self {
        fn clean(v: f32) -> f32 {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                0.0
            }
        }

        Self {
            x: clean(self.x),
            y: clean(self.y),
        }
    }
}

/// 2D point with f32 coordinates, y grows upward
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, rhs: Vec2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    fn sub(self, rhs: Vec2) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_zeroes_degenerate_sizes() {
        let size = Vec2::new(-3.0, f32::NAN).sanitized();
        assert_eq!(size, Vec2::zero());

        let size = Vec2::new(f32::INFINITY, 12.5).sanitized();
        assert_eq!(size, Vec2::new(0.0, 12.5));
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(10.0, 5.0);
        let b = Point::new(4.0, -1.0);
        assert_eq!(a - b, Vec2::new(6.0, 6.0));
        assert_eq!(b + (a - b), a);
        assert_eq!(a - Vec2::new(10.0, 5.0), Point::zero());
    }
}
