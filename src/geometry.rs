use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

use thiserror::Error;

/// Tolerance used by every geometric predicate in the crate.
///
/// Coordinates and distances closer than this are treated as equal, which absorbs the
/// rounding noise of repeated subtractions in the bisector and circumcenter formulas.
pub const EPSILON: f64 = 1e-9;

/// Index of a site in the slice handed to the tessellation.
pub type SiteId = usize;

/// Returns true if `a` and `b` differ by no more than [`EPSILON`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// A point (or vector) in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the 3D cross product.
    pub fn cross(&self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Rotates the vector by 90 degrees counter-clockwise.
    pub fn perp(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_sq(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Component-wise comparison within [`EPSILON`].
    pub fn approx_eq(&self, other: Point) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Point::new(p[0], p[1])
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point::new(p.0, p.1)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// An infinite line in parametric form `origin + t * dir`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub origin: Point,
    pub dir: Point,
}

impl Line {
    pub fn new(origin: Point, dir: Point) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Point {
        self.origin + self.dir * t
    }
}

/// Returned by [`circumcenter`] when the three points have no finite circumcenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("points are collinear and have no finite circumcenter")]
pub struct DegenerateTripleError;

/// The perpendicular bisector of `a` and `b`.
///
/// The line passes through the midpoint and points along `perp(b - a)`, so `a` lies on
/// its left-hand side and `b` on its right-hand side. Coincident points give a zero
/// direction, which callers must treat as degenerate.
pub fn bisector(a: Point, b: Point) -> Line {
    Line::new(a.midpoint(b), (b - a).perp())
}

/// Orientation of the triple `(p, q, r)`.
///
/// - `Greater` if counter-clockwise
/// - `Less` if clockwise
/// - `Equal` if collinear (within [`EPSILON`])
pub fn orientation(p: Point, q: Point, r: Point) -> Ordering {
    let cross = (q - p).cross(r - p);
    if cross > EPSILON {
        Ordering::Greater
    } else if cross < -EPSILON {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// The point equidistant from `a`, `b` and `c`.
pub fn circumcenter(a: Point, b: Point, c: Point) -> Result<Point, DegenerateTripleError> {
    // Work relative to `a` to keep the magnitudes small.
    let b = b - a;
    let c = c - a;
    let d = 2.0 * b.cross(c);
    if d.abs() <= EPSILON {
        return Err(DegenerateTripleError);
    }

    let b2 = b.dot(b);
    let c2 = c.dot(c);
    let ux = (c.y * b2 - b.y * c2) / d;
    let uy = (b.x * c2 - c.x * b2) / d;

    Ok(Point::new(a.x + ux, a.y + uy))
}

/// The x coordinate where the beach-line arc of `left` hands over to the arc of `right`
/// when the sweep line is at `directrix`.
///
/// Sites lying on the sweep line have degenerate (vertical ray) arcs; the breakpoint then
/// sits at that site's x. Two sites at the same height meet halfway between them.
pub fn breakpoint_x(left: Point, right: Point, directrix: f64) -> f64 {
    if approx_eq(left.y, right.y) {
        return (left.x + right.x) * 0.5;
    }

    let dl = left.y - directrix;
    let dr = right.y - directrix;
    if dl.abs() <= EPSILON {
        return left.x;
    }
    if dr.abs() <= EPSILON {
        return right.x;
    }

    // Solve dr * u^2 - dl * (u - dx)^2 + dl * dr * (dl - dr) = 0 for u = x - left.x.
    let dx = right.x - left.x;
    let a = dr - dl;
    let b = 2.0 * dl * dx;
    let c = -dl * dx * dx + dl * dr * (dl - dr);

    let disc = (b * b - 4.0 * a * c).max(0.0);
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    let (r1, r2) = if q == 0.0 {
        // b == 0 and c == 0, both roots vanish.
        (0.0, 0.0)
    } else {
        (q / a, c / q)
    };
    let (lo, hi) = if r1 < r2 { (r1, r2) } else { (r2, r1) };

    // The site closer to the sweep line has the narrower arc, which only wins between
    // the two roots.
    let u = if left.y > right.y { hi } else { lo };
    left.x + u
}
