//! Fortune's sweep over the sites, producing edge builders with possibly open ends.
//!
//! The sweep line moves towards increasing y. Sites on the same line are taken by
//! increasing x, then by input index. Open ends left when the sweep completes are resolved
//! later against the clip rectangle.

mod beachline;
mod edge;
mod events;

use std::cmp::Ordering;

use tracing::trace;

use crate::geometry::{approx_eq, circumcenter, orientation, Point, SiteId, EPSILON};

use beachline::{ArcId, Beachline};
pub(crate) use edge::EdgeBuilder;
use edge::{HalfEdge, Slot};
use events::{sweep_order, CircleEvent, EventQueue};

/// Phases of the sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SweepState {
    /// Nothing processed yet.
    Idle,
    /// Site events remain.
    Active,
    /// Only circle events remain.
    Draining,
    Done,
}

/// Sites in sweep order with coincident duplicates removed.
pub(crate) struct SiteOrder {
    pub order: Vec<SiteId>,
    /// For each site, the earlier site (in sweep order) it coincides with.
    pub owners: Vec<Option<SiteId>>,
}

impl SiteOrder {
    pub fn new(sites: &[Point]) -> Self {
        let mut sorted: Vec<SiteId> = (0..sites.len()).collect();
        sorted.sort_unstable_by(|&a, &b| sweep_order(sites[a], sites[b]).then(a.cmp(&b)));

        let mut order: Vec<SiteId> = Vec::with_capacity(sorted.len());
        let mut owners = vec![None; sites.len()];
        for i in sorted {
            // Other sites in the same EPSILON band of y may sort between two coincident ones.
            let owner = order
                .iter()
                .rev()
                .take_while(|&&k| sites[i].y - sites[k].y <= EPSILON)
                .find(|&&k| sites[k].approx_eq(sites[i]))
                .copied();
            match owner {
                Some(k) => owners[i] = Some(k),
                None => order.push(i),
            }
        }

        Self { order, owners }
    }

    pub fn merged(&self) -> usize {
        self.owners.iter().filter(|o| o.is_some()).count()
    }
}

pub(crate) struct SweepEngine<'a> {
    sites: &'a [Point],
    order: Vec<SiteId>,
    next_site: usize,
    beachline: Beachline,
    events: EventQueue,
    edges: Vec<EdgeBuilder>,
    sweep_y: f64,
    state: SweepState,
}

impl<'a> SweepEngine<'a> {
    pub fn new(sites: &'a [Point], order: Vec<SiteId>) -> Self {
        Self {
            sites,
            beachline: Beachline::with_capacity(2 * order.len()),
            edges: Vec::with_capacity(3 * order.len()),
            order,
            next_site: 0,
            events: EventQueue::new(),
            sweep_y: f64::NEG_INFINITY,
            state: SweepState::Idle,
        }
    }

    #[cfg(test)]
    fn state(&self) -> SweepState {
        self.state
    }

    /// Runs the sweep to completion.
    pub fn run(mut self) -> Vec<EdgeBuilder> {
        while self.state != SweepState::Done {
            self.step();
        }
        trace!(
            edges = self.edges.len(),
            arcs = self.beachline.len(),
            beachline = ?self.beachline.sites(),
            "sweep finished"
        );
        self.edges
    }

    /// Processes at most one event.
    pub fn step(&mut self) {
        match self.state {
            SweepState::Idle => {
                self.state = if self.order.is_empty() {
                    SweepState::Done
                } else {
                    SweepState::Active
                };
            }
            SweepState::Active | SweepState::Draining => {
                let site = self.order.get(self.next_site).copied();
                let circle_first = match (site, self.events.peek()) {
                    (Some(s), Some(c)) => sweep_order(c.position(), self.sites[s]) == Ordering::Less,
                    (None, Some(_)) => true,
                    (_, None) => false,
                };

                if circle_first {
                    if let Some(event) = self.events.pop() {
                        self.handle_circle(event);
                    }
                } else if let Some(s) = site {
                    self.next_site += 1;
                    self.handle_site(s);
                }

                if self.next_site >= self.order.len() {
                    self.state = if self.events.is_empty() {
                        SweepState::Done
                    } else {
                        SweepState::Draining
                    };
                }
            }
            SweepState::Done => {}
        }
    }

    fn push_edge(&mut self, edge: EdgeBuilder) -> usize {
        self.edges.push(edge);
        self.edges.len() - 1
    }

    fn handle_site(&mut self, s: SiteId) {
        let p = self.sites[s];
        self.sweep_y = p.y;
        trace!(site = s, x = p.x, y = p.y, "site event");

        let Some(arc) = self.beachline.locate(self.sites, p.x, p.y) else {
            self.beachline.insert_first(s);
            return;
        };

        // Arcs of sites on the sweep line are vertical rays and cannot be split. This only
        // happens while every site so far lies on the first sweep line.
        let q = self.sites[self.beachline.site(arc)];
        if approx_eq(q.y, p.y) {
            if p.x >= q.x && self.beachline.next(arc).is_none() {
                let new = self.beachline.insert_after(arc, s);
                self.start_level_edge(arc, new);
                return;
            }
            if p.x < q.x && self.beachline.prev(arc).is_none() {
                let new = self.beachline.insert_before(arc, s);
                self.start_level_edge(new, arc);
                return;
            }
        }

        self.split(arc, s);
    }

    /// Adds the vertical bisector between two arcs on the first sweep line. Its lower end is
    /// unbounded and never closed.
    fn start_level_edge(&mut self, left_arc: ArcId, right_arc: ArcId) {
        let left = self.beachline.site(left_arc);
        let right = self.beachline.site(right_arc);
        let (lp, rp) = (self.sites[left], self.sites[right]);

        let e = self.push_edge(EdgeBuilder::new(left, right, lp.midpoint(rp), (rp - lp).perp()));
        self.beachline.arc_mut(left_arc).right_edge = Some(HalfEdge { edge: e, slot: Slot::End });
    }

    /// Splits `arc` around the new site `s`: `arc, new, copy`.
    fn split(&mut self, arc: ArcId, s: SiteId) {
        let a = self.beachline.site(arc);
        self.invalidate(arc);

        let copy = self.beachline.insert_after(arc, a);
        let new = self.beachline.insert_after(arc, s);
        let carried = self.beachline.arc_mut(arc).right_edge.take();
        self.beachline.arc_mut(copy).right_edge = carried;

        // The two new breakpoints trace the bisector in opposite directions.
        let (p, q) = (self.sites[s], self.sites[a]);
        let e = self.push_edge(EdgeBuilder::new(s, a, p.midpoint(q), (q - p).perp()));
        self.beachline.arc_mut(arc).right_edge = Some(HalfEdge { edge: e, slot: Slot::Start });
        self.beachline.arc_mut(new).right_edge = Some(HalfEdge { edge: e, slot: Slot::End });

        self.check_circle(arc);
        self.check_circle(copy);
    }

    fn handle_circle(&mut self, event: CircleEvent) {
        let b = event.arc;
        if !self.beachline.is_alive(b) || self.beachline.arc(b).event != Some(event.id) {
            trace!(id = event.id, "stale circle event dropped");
            return;
        }
        let (Some(a), Some(c)) = (self.beachline.prev(b), self.beachline.next(b)) else {
            return;
        };

        self.sweep_y = event.y;
        let v = event.center;
        trace!(id = event.id, x = v.x, y = v.y, pending = self.events.len(), "circle event");

        for arc in [a, b] {
            if let Some(h) = self.beachline.arc(arc).right_edge {
                self.edges[h.edge].close(h.slot, v);
            }
        }
        self.invalidate(a);
        self.invalidate(c);

        let (sa, sc) = (self.beachline.site(a), self.beachline.site(c));
        let mut edge = EdgeBuilder::new(sa, sc, v, (self.sites[sc] - self.sites[sa]).perp());
        edge.close(Slot::Start, v);
        let e = self.push_edge(edge);
        self.beachline.arc_mut(a).right_edge = Some(HalfEdge { edge: e, slot: Slot::End });

        self.beachline.remove(b);

        self.check_circle(a);
        self.check_circle(c);
    }

    fn invalidate(&mut self, arc: ArcId) {
        self.beachline.arc_mut(arc).event = None;
    }

    /// Schedules the disappearance of `b` if its breakpoints converge.
    fn check_circle(&mut self, b: ArcId) {
        let (Some(a), Some(c)) = (self.beachline.prev(b), self.beachline.next(b)) else {
            return;
        };
        let (sa, sb, sc) = (self.beachline.site(a), self.beachline.site(b), self.beachline.site(c));
        if sa == sc {
            return;
        }

        let (pa, pb, pc) = (self.sites[sa], self.sites[sb], self.sites[sc]);
        // Clockwise and collinear triples diverge.
        if orientation(pa, pb, pc) != Ordering::Greater {
            return;
        }
        let Ok(center) = circumcenter(pa, pb, pc) else {
            return;
        };

        let y = center.y + center.distance(pb);
        if y < self.sweep_y - EPSILON {
            return;
        }

        let id = self.events.push(y, center, b);
        self.beachline.arc_mut(b).event = Some(id);
    }

    #[cfg(test)]
    fn beachline_sites(&self) -> Vec<SiteId> {
        self.beachline.sites()
    }
}
