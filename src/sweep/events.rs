use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::geometry::Point;

use super::beachline::ArcId;

pub(crate) type EventId = u64;

/// A predicted vertex: the arc `arc` vanishes when the sweep line reaches `y`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CircleEvent {
    pub id: EventId,
    /// Sweep position at which the event fires (top of the circle).
    pub y: f64,
    /// The future Voronoi vertex.
    pub center: Point,
    pub arc: ArcId,
}

impl CircleEvent {
    /// Position of the event in sweep order.
    pub fn position(&self) -> Point {
        Point::new(self.center.x, self.y)
    }
}

impl PartialEq for CircleEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CircleEvent {}

impl PartialOrd for CircleEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CircleEvent {
    // Reversed so that `BinaryHeap` pops the lowest (y, x, id) first.
    fn cmp(&self, other: &Self) -> Ordering {
        sweep_order(other.position(), self.position()).then_with(|| other.id.cmp(&self.id))
    }
}

/// Total order of sweep positions: by y, then by x.
pub(crate) fn sweep_order(a: Point, b: Point) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x))
}

/// Min-queue of circle events with lazy invalidation.
///
/// Stale events are not removed from the heap. The owning arc records the id of its
/// pending event and the engine compares ids when an event is popped.
#[derive(Default)]
pub(crate) struct EventQueue {
    heap: BinaryHeap<CircleEvent>,
    next_id: EventId,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, y: f64, center: Point, arc: ArcId) -> EventId {
        let id = self.next_id;
        self.next_id += 1;
        self.heap.push(CircleEvent { id, y, center, arc });
        id
    }

    pub fn peek(&self) -> Option<&CircleEvent> {
        self.heap.peek()
    }

    pub fn pop(&mut self) -> Option<CircleEvent> {
        self.heap.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
