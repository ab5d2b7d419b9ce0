use crate::error::VoronoiError;
use crate::geometry::{approx_eq, Point, EPSILON};

/// Clip rectangle ID for the bottom side (Y-Min), it is negative to prevent conflicts with site IDs.
pub const BOX_ID_BOTTOM: i32 = -3;
/// Clip rectangle ID for the right side (X-Max), it is negative to prevent conflicts with site IDs.
pub const BOX_ID_RIGHT: i32 = -2;
/// Clip rectangle ID for the top side (Y-Max), it is negative to prevent conflicts with site IDs.
pub const BOX_ID_TOP: i32 = -4;
/// Clip rectangle ID for the left side (X-Min), it is negative to prevent conflicts with site IDs.
pub const BOX_ID_LEFT: i32 = -1;

/// Calculates the ID for a side of the clip rectangle based on the axis and direction.
///
/// The IDs start at -1 and decrease.
/// - Axis 0 (X) Min: -1
/// - Axis 0 (X) Max: -2
/// - Axis 1 (Y) Min: -3
/// - Axis 1 (Y) Max: -4
pub fn box_side(axis: usize, is_max: bool) -> i32 {
    -1 - (axis * 2 + if is_max { 1 } else { 0 }) as i32
}

/// Where a point sits relative to the perimeter of a [`BoundingBox`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BorderLocation {
    NotOnBorder,
    Left,
    Bottom,
    Right,
    Top,
    BottomLeft,
    BottomRight,
    TopRight,
    TopLeft,
}

impl BorderLocation {
    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            BorderLocation::BottomLeft
                | BorderLocation::BottomRight
                | BorderLocation::TopRight
                | BorderLocation::TopLeft
        )
    }

    pub fn is_on_border(&self) -> bool {
        *self != BorderLocation::NotOnBorder
    }
}

/// Axis-aligned clip rectangle `[min[0], max[0]] x [min[1], max[1]]`.
/// Inclusive on all bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    /// Creates a rectangle from `minX, minY, maxX, maxY`.
    pub fn from_corners(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new([min_x, min_y], [max_x, max_y])
    }

    /// Checks that the bounds are finite and strictly ordered on both axes.
    pub fn validate(&self) -> Result<(), VoronoiError> {
        let finite = self.min.iter().chain(self.max.iter()).all(|v| v.is_finite());
        if !finite || self.min[0] >= self.max[0] || self.min[1] >= self.max[1] {
            return Err(VoronoiError::InvalidBounds {
                min_x: self.min[0],
                min_y: self.min[1],
                max_x: self.max[0],
                max_y: self.max[1],
            });
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
        )
    }

    /// Closed containment test with [`EPSILON`] slack.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min[0] - EPSILON
            && p.x <= self.max[0] + EPSILON
            && p.y >= self.min[1] - EPSILON
            && p.y <= self.max[1] + EPSILON
    }

    /// Clamps a point into the rectangle and pulls coordinates within [`EPSILON`] of a side
    /// exactly onto it.
    pub fn snap(&self, p: Point) -> Point {
        let snap_axis = |v: f64, lo: f64, hi: f64| {
            if v <= lo + EPSILON {
                lo
            } else if v >= hi - EPSILON {
                hi
            } else {
                v
            }
        };
        Point::new(
            snap_axis(p.x, self.min[0], self.max[0]),
            snap_axis(p.y, self.min[1], self.max[1]),
        )
    }

    /// The four corners, counter-clockwise from the bottom-left one.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min[0], self.min[1]),
            Point::new(self.max[0], self.min[1]),
            Point::new(self.max[0], self.max[1]),
            Point::new(self.min[0], self.max[1]),
        ]
    }

    pub fn border_location(&self, p: Point) -> BorderLocation {
        let left = approx_eq(p.x, self.min[0]);
        let right = approx_eq(p.x, self.max[0]);
        let bottom = approx_eq(p.y, self.min[1]);
        let top = approx_eq(p.y, self.max[1]);
        let within_x = p.x >= self.min[0] - EPSILON && p.x <= self.max[0] + EPSILON;
        let within_y = p.y >= self.min[1] - EPSILON && p.y <= self.max[1] + EPSILON;

        match (left, right, bottom, top) {
            (true, _, true, _) => BorderLocation::BottomLeft,
            (_, true, true, _) => BorderLocation::BottomRight,
            (_, true, _, true) => BorderLocation::TopRight,
            (true, _, _, true) => BorderLocation::TopLeft,
            (true, _, _, _) if within_y => BorderLocation::Left,
            (_, true, _, _) if within_y => BorderLocation::Right,
            (_, _, true, _) if within_x => BorderLocation::Bottom,
            (_, _, _, true) if within_x => BorderLocation::Top,
            _ => BorderLocation::NotOnBorder,
        }
    }

    /// Arc length along the perimeter, walking counter-clockwise from the bottom-left corner.
    ///
    /// Only meaningful for points on the border.
    pub fn perimeter_position(&self, p: Point) -> f64 {
        let w = self.width();
        let h = self.height();
        match self.border_location(p) {
            BorderLocation::BottomLeft => 0.0,
            BorderLocation::Bottom => p.x - self.min[0],
            BorderLocation::BottomRight => w,
            BorderLocation::Right => w + (p.y - self.min[1]),
            BorderLocation::TopRight => w + h,
            BorderLocation::Top => w + h + (self.max[0] - p.x),
            BorderLocation::TopLeft => 2.0 * w + h,
            BorderLocation::Left => 2.0 * w + h + (self.max[1] - p.y),
            BorderLocation::NotOnBorder => f64::NAN,
        }
    }

    /// Inverse of [`BoundingBox::perimeter_position`], wrapping around the perimeter.
    pub fn point_at_perimeter(&self, s: f64) -> Point {
        let w = self.width();
        let h = self.height();
        let s = s.rem_euclid(2.0 * (w + h));
        if s <= w {
            Point::new(self.min[0] + s, self.min[1])
        } else if s <= w + h {
            Point::new(self.max[0], self.min[1] + (s - w))
        } else if s <= 2.0 * w + h {
            Point::new(self.max[0] - (s - w - h), self.max[1])
        } else {
            Point::new(self.min[0], self.max[1] - (s - 2.0 * w - h))
        }
    }

    /// Neighbor ID of the side a border point lies on, used by [`crate::Cell`] edges.
    pub fn side_id(&self, p: Point) -> Option<i32> {
        match self.border_location(p) {
            BorderLocation::Left => Some(box_side(0, false)),
            BorderLocation::Right => Some(box_side(0, true)),
            BorderLocation::Bottom => Some(box_side(1, false)),
            BorderLocation::Top => Some(box_side(1, true)),
            _ => None,
        }
    }
}
