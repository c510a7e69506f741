use std::f64::consts::SQRT_2;

use terraflow_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Octile distance: the length of the shortest 8-connected route when
/// diagonal steps cost √2.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (lo, hi) = (dx.min(dy) as f64, dx.max(dy) as f64);
    (hi - lo) + lo * SQRT_2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(0, 0);
        let b = Point::new(3, -1);
        assert_eq!(manhattan(a, b), 4);
        assert_eq!(chebyshev(a, b), 3);
        assert!((octile(a, b) - (2.0 + SQRT_2)).abs() < 1e-12);
        assert_eq!(octile(a, a), 0.0);
    }
}
