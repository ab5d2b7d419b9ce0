use crate::bounds::BoundingBox;
use crate::clip::{clip_parametric, clip_segment};
use crate::geometry::{Point, SiteId};

/// State of one end of an edge under construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum EdgeEnd {
    /// Still traced by a breakpoint, or unbounded.
    Open,
    /// Fixed at a Voronoi vertex.
    Closed(Point),
}

/// Which end of an edge a breakpoint is tracing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Start,
    End,
}

/// A breakpoint's handle on the edge it traces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct HalfEdge {
    pub edge: usize,
    pub slot: Slot,
}

/// An edge as seen by the sweep: a piece of the bisector between `left` and `right`.
///
/// The bisector runs through `origin` along `dir`; the `start` end lies towards `-dir` and
/// the `end` end towards `+dir`. `left` is on the left-hand side of `dir`. Each end is
/// closed at most once.
#[derive(Clone, Debug)]
pub(crate) struct EdgeBuilder {
    pub left: SiteId,
    pub right: SiteId,
    pub origin: Point,
    pub dir: Point,
    pub start: EdgeEnd,
    pub end: EdgeEnd,
}

impl EdgeBuilder {
    pub fn new(left: SiteId, right: SiteId, origin: Point, dir: Point) -> Self {
        Self {
            left,
            right,
            origin,
            dir,
            start: EdgeEnd::Open,
            end: EdgeEnd::Open,
        }
    }

    /// Fixes one end at a vertex.
    pub fn close(&mut self, slot: Slot, vertex: Point) {
        let end = match slot {
            Slot::Start => &mut self.start,
            Slot::End => &mut self.end,
        };
        debug_assert!(*end == EdgeEnd::Open, "edge end closed twice");
        *end = EdgeEnd::Closed(vertex);
    }

    /// Resolves the open ends against the clip rectangle.
    ///
    /// Returns `None` if nothing of the edge lies inside the rectangle.
    pub fn resolve(&self, bounds: &BoundingBox) -> Option<(Point, Point)> {
        let inf = f64::INFINITY;
        match (self.start, self.end) {
            (EdgeEnd::Closed(s), EdgeEnd::Closed(e)) => clip_segment(s, e, bounds),
            (EdgeEnd::Closed(s), EdgeEnd::Open) => clip_parametric(s, self.dir, 0.0, inf, bounds),
            (EdgeEnd::Open, EdgeEnd::Closed(e)) => clip_parametric(e, self.dir, -inf, 0.0, bounds),
            (EdgeEnd::Open, EdgeEnd::Open) => clip_parametric(self.origin, self.dir, -inf, inf, bounds),
        }
    }
}
