//! Clipping of lines, rays and segments against the clip rectangle.
//!
//! Everything funnels into [`clip_parametric`], a Liang–Barsky pass over the parametric
//! form `origin + t * dir` restricted to `t0 <= t <= t1`.

use crate::bounds::BoundingBox;
use crate::geometry::{Line, Point, EPSILON};

/// Clips `origin + t * dir` for `t` in `[t0, t1]` (either bound may be infinite) to the
/// closed rectangle.
///
/// Returns the entry and exit points in order of increasing `t`, snapped onto the
/// rectangle. A line parallel to a side is kept if it lies within the closed slab, so a
/// bisector running exactly along a side survives. Lines that only touch a corner come back
/// as a zero-length segment; it is up to the caller to drop those.
pub fn clip_parametric(
    origin: Point,
    dir: Point,
    t0: f64,
    t1: f64,
    bounds: &BoundingBox,
) -> Option<(Point, Point)> {
    let mut t0 = t0;
    let mut t1 = t1;

    let checks = [
        (-dir.x, origin.x - bounds.min[0]),
        (dir.x, bounds.max[0] - origin.x),
        (-dir.y, origin.y - bounds.min[1]),
        (dir.y, bounds.max[1] - origin.y),
    ];

    for (p, q) in checks {
        if p.abs() <= EPSILON {
            if q < -EPSILON {
                return None;
            }
            continue;
        }

        let r = q / p;
        if p < 0.0 {
            if r > t1 + EPSILON {
                return None;
            }
            if r > t0 {
                t0 = r;
            }
        } else {
            if r < t0 - EPSILON {
                return None;
            }
            if r < t1 {
                t1 = r;
            }
        }
    }

    if !t0.is_finite() || !t1.is_finite() {
        // Only reachable with a zero direction on an unbounded range.
        return None;
    }
    if t0 > t1 {
        t1 = t0;
    }

    let a = bounds.snap(origin + dir * t0);
    let b = bounds.snap(origin + dir * t1);
    Some((a, b))
}

/// Clips an infinite line.
pub fn clip_line(line: &Line, bounds: &BoundingBox) -> Option<(Point, Point)> {
    clip_parametric(line.origin, line.dir, f64::NEG_INFINITY, f64::INFINITY, bounds)
}

/// Clips the ray starting at `origin` heading along `dir`.
///
/// A ray that starts inside keeps its origin as the first endpoint.
pub fn clip_ray(origin: Point, dir: Point, bounds: &BoundingBox) -> Option<(Point, Point)> {
    clip_parametric(origin, dir, 0.0, f64::INFINITY, bounds)
}

/// Clips the segment from `a` to `b`, keeping its orientation.
pub fn clip_segment(a: Point, b: Point, bounds: &BoundingBox) -> Option<(Point, Point)> {
    clip_parametric(a, b - a, 0.0, 1.0, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::bisector;

    fn square() -> BoundingBox {
        BoundingBox::from_corners(0.0, 0.0, 1000.0, 1000.0)
    }

    #[test]
    fn test_clip_horizontal_line() {
        let line = bisector(Point::new(500.0, 700.0), Point::new(500.0, 300.0));
        let (a, b) = clip_line(&line, &square()).unwrap();
        assert!(a.approx_eq(Point::new(0.0, 500.0)));
        assert!(b.approx_eq(Point::new(1000.0, 500.0)));
    }

    #[test]
    fn test_clip_diagonal_through_corners() {
        let line = Line::new(Point::new(500.0, 500.0), Point::new(400.0, 400.0));
        let (a, b) = clip_line(&line, &square()).unwrap();
        assert_eq!(a, Point::new(0.0, 0.0));
        assert_eq!(b, Point::new(1000.0, 1000.0));
    }

    #[test]
    fn test_clip_line_missing() {
        let line = Line::new(Point::new(1500.0, 0.0), Point::new(1.0, 1.0));
        assert!(clip_line(&line, &square()).is_none());

        let line = Line::new(Point::new(0.0, 1200.0), Point::new(1.0, 0.0));
        assert!(clip_line(&line, &square()).is_none());
    }

    #[test]
    fn test_clip_corner_touch() {
        // x + y = 2000 only touches (1000, 1000).
        let line = Line::new(Point::new(1000.0, 1000.0), Point::new(1.0, -1.0));
        let (a, b) = clip_line(&line, &square()).unwrap();
        assert!(a.approx_eq(b));
        assert!(a.approx_eq(Point::new(1000.0, 1000.0)));
    }

    #[test]
    fn test_clip_line_on_side() {
        let line = Line::new(Point::new(300.0, 0.0), Point::new(-2.0, 0.0));
        let (a, b) = clip_line(&line, &square()).unwrap();
        assert!(a.approx_eq(Point::new(1000.0, 0.0)));
        assert!(b.approx_eq(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_clip_ray_inside() {
        let (a, b) = clip_ray(Point::new(500.0, 500.0), Point::new(0.0, 3.0), &square()).unwrap();
        assert_eq!(a, Point::new(500.0, 500.0));
        assert_eq!(b, Point::new(500.0, 1000.0));
    }

    #[test]
    fn test_clip_ray_outside() {
        // Starts outside and points away.
        assert!(clip_ray(Point::new(500.0, 1200.0), Point::new(0.0, 1.0), &square()).is_none());

        // Starts outside and enters.
        let (a, b) = clip_ray(Point::new(-500.0, 500.0), Point::new(1.0, 0.0), &square()).unwrap();
        assert_eq!(a, Point::new(0.0, 500.0));
        assert_eq!(b, Point::new(1000.0, 500.0));
    }

    #[test]
    fn test_clip_segment() {
        let (a, b) = clip_segment(Point::new(200.0, 200.0), Point::new(400.0, 300.0), &square()).unwrap();
        assert_eq!(a, Point::new(200.0, 200.0));
        assert_eq!(b, Point::new(400.0, 300.0));

        let (a, b) = clip_segment(Point::new(500.0, 1500.0), Point::new(500.0, 500.0), &square()).unwrap();
        assert_eq!(a, Point::new(500.0, 1000.0));
        assert_eq!(b, Point::new(500.0, 500.0));

        assert!(clip_segment(Point::new(1100.0, 0.0), Point::new(1200.0, 50.0), &square()).is_none());
    }
}
