//! The beach line: the ordered sequence of parabolic arcs above the sweep line.
//!
//! Arcs live in an arena and are linked twice: a doubly linked list gives O(1) neighbour
//! access and splicing, and a treap over the same nodes (ordered by list position, not by a
//! stored key) gives O(log n) expected search by x. Breakpoint positions depend on the sweep
//! line, so the search computes them on the fly while descending.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::{breakpoint_x, Point, SiteId};

use super::edge::HalfEdge;
use super::events::EventId;

pub(crate) type ArcId = usize;

/// Fixed seed for treap priorities; the tree shape never shows in the output.
const PRIORITY_SEED: u64 = 0x5eed_a4c5;

#[derive(Clone, Debug)]
pub(crate) struct Arc {
    pub site: SiteId,
    pub prev: Option<ArcId>,
    pub next: Option<ArcId>,
    /// Edge traced by the breakpoint between this arc and `next`.
    pub right_edge: Option<HalfEdge>,
    /// Pending circle event that would remove this arc.
    pub event: Option<EventId>,
    alive: bool,
    parent: Option<ArcId>,
    left: Option<ArcId>,
    right: Option<ArcId>,
    priority: u32,
}

pub(crate) struct Beachline {
    arcs: Vec<Arc>,
    root: Option<ArcId>,
    len: usize,
    rng: StdRng,
}

impl Default for Beachline {
    fn default() -> Self {
        Self::new()
    }
}

impl Beachline {
    pub fn new() -> Self {
        Self {
            arcs: Vec::new(),
            root: None,
            len: 0,
            rng: StdRng::seed_from_u64(PRIORITY_SEED),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut beachline = Self::new();
        beachline.arcs.reserve(capacity);
        beachline
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn arc(&self, id: ArcId) -> &Arc {
        &self.arcs[id]
    }

    pub fn arc_mut(&mut self, id: ArcId) -> &mut Arc {
        &mut self.arcs[id]
    }

    pub fn is_alive(&self, id: ArcId) -> bool {
        self.arcs.get(id).is_some_and(|a| a.alive)
    }

    pub fn site(&self, id: ArcId) -> SiteId {
        self.arcs[id].site
    }

    pub fn prev(&self, id: ArcId) -> Option<ArcId> {
        self.arcs[id].prev
    }

    pub fn next(&self, id: ArcId) -> Option<ArcId> {
        self.arcs[id].next
    }

    fn alloc(&mut self, site: SiteId) -> ArcId {
        let id = self.arcs.len();
        let priority: u32 = self.rng.r#gen();
        self.arcs.push(Arc {
            site,
            prev: None,
            next: None,
            right_edge: None,
            event: None,
            alive: true,
            parent: None,
            left: None,
            right: None,
            priority,
        });
        self.len += 1;
        id
    }

    /// Starts the beach line with a single arc.
    pub fn insert_first(&mut self, site: SiteId) -> ArcId {
        debug_assert!(self.is_empty());
        let id = self.alloc(site);
        self.root = Some(id);
        id
    }

    /// Inserts a new arc directly to the right of `after`.
    pub fn insert_after(&mut self, after: ArcId, site: SiteId) -> ArcId {
        let id = self.alloc(site);
        let next = self.arcs[after].next;

        self.arcs[id].prev = Some(after);
        self.arcs[id].next = next;
        self.arcs[after].next = Some(id);
        if let Some(n) = next {
            self.arcs[n].prev = Some(id);
        }

        // In-order successor slot: the right child of `after` if free, otherwise the left
        // child of its old successor (which is the leftmost node of that right subtree).
        match (self.arcs[after].right, next) {
            (None, _) => {
                self.arcs[after].right = Some(id);
                self.arcs[id].parent = Some(after);
            }
            (Some(_), Some(n)) => {
                debug_assert!(self.arcs[n].left.is_none());
                self.arcs[n].left = Some(id);
                self.arcs[id].parent = Some(n);
            }
            (Some(_), None) => unreachable!("a right subtree implies an in-order successor"),
        }

        self.sift_up(id);
        id
    }

    /// Inserts a new arc directly to the left of `before`.
    pub fn insert_before(&mut self, before: ArcId, site: SiteId) -> ArcId {
        if let Some(prev) = self.arcs[before].prev {
            return self.insert_after(prev, site);
        }

        // `before` is the leftmost arc, so it has no left child.
        let id = self.alloc(site);
        debug_assert!(self.arcs[before].left.is_none());
        self.arcs[id].next = Some(before);
        self.arcs[before].prev = Some(id);
        self.arcs[before].left = Some(id);
        self.arcs[id].parent = Some(before);

        self.sift_up(id);
        id
    }

    fn sift_up(&mut self, id: ArcId) {
        while let Some(p) = self.arcs[id].parent {
            if self.arcs[id].priority <= self.arcs[p].priority {
                break;
            }
            self.rotate_up(id);
        }
    }

    /// Removes an arc from both the list and the tree.
    pub fn remove(&mut self, id: ArcId) {
        // Rotate the node down until it is a leaf.
        loop {
            let child = match (self.arcs[id].left, self.arcs[id].right) {
                (None, None) => break,
                (Some(l), None) => l,
                (None, Some(r)) => r,
                (Some(l), Some(r)) => {
                    if self.arcs[l].priority > self.arcs[r].priority {
                        l
                    } else {
                        r
                    }
                }
            };
            self.rotate_up(child);
        }

        match self.arcs[id].parent {
            None => self.root = None,
            Some(p) => {
                if self.arcs[p].left == Some(id) {
                    self.arcs[p].left = None;
                } else {
                    self.arcs[p].right = None;
                }
            }
        }

        let prev = self.arcs[id].prev;
        let next = self.arcs[id].next;
        if let Some(p) = prev {
            self.arcs[p].next = next;
        }
        if let Some(n) = next {
            self.arcs[n].prev = prev;
        }

        let arc = &mut self.arcs[id];
        arc.alive = false;
        arc.parent = None;
        arc.prev = None;
        arc.next = None;
        arc.event = None;
        arc.right_edge = None;
        self.len -= 1;
    }

    /// Rotates `x` above its parent, preserving the in-order sequence.
    fn rotate_up(&mut self, x: ArcId) {
        let Some(p) = self.arcs[x].parent else {
            return;
        };
        let g = self.arcs[p].parent;

        if self.arcs[p].left == Some(x) {
            let b = self.arcs[x].right;
            self.arcs[p].left = b;
            if let Some(b) = b {
                self.arcs[b].parent = Some(p);
            }
            self.arcs[x].right = Some(p);
        } else {
            let b = self.arcs[x].left;
            self.arcs[p].right = b;
            if let Some(b) = b {
                self.arcs[b].parent = Some(p);
            }
            self.arcs[x].left = Some(p);
        }

        self.arcs[p].parent = Some(x);
        self.arcs[x].parent = g;
        match g {
            None => self.root = Some(x),
            Some(g) => {
                if self.arcs[g].left == Some(p) {
                    self.arcs[g].left = Some(x);
                } else {
                    self.arcs[g].right = Some(x);
                }
            }
        }
    }

    /// Finds the arc lying above `x` when the sweep line is at `directrix`.
    ///
    /// A query exactly on a breakpoint returns the arc to its left.
    pub fn locate(&self, sites: &[Point], x: f64, directrix: f64) -> Option<ArcId> {
        let mut node = self.root?;
        loop {
            let arc = &self.arcs[node];
            let here = sites[arc.site];

            if let Some(prev) = arc.prev {
                let left_x = breakpoint_x(sites[self.arcs[prev].site], here, directrix);
                // Ties go to the left arc.
                if x <= left_x {
                    match arc.left {
                        Some(l) => {
                            node = l;
                            continue;
                        }
                        // Breakpoints out of order by rounding noise; settle for this arc.
                        None => return Some(node),
                    }
                }
            }

            if let Some(next) = arc.next {
                let right_x = breakpoint_x(here, sites[self.arcs[next].site], directrix);
                if x > right_x {
                    match arc.right {
                        Some(r) => {
                            node = r;
                            continue;
                        }
                        None => return Some(node),
                    }
                }
            }

            return Some(node);
        }
    }

    /// The leftmost arc.
    pub fn first(&self) -> Option<ArcId> {
        let mut node = self.root?;
        while let Some(l) = self.arcs[node].left {
            node = l;
        }
        Some(node)
    }

    /// Arc ids from left to right.
    pub fn iter(&self) -> impl Iterator<Item = ArcId> + '_ {
        std::iter::successors(self.first(), move |&id| self.arcs[id].next)
    }

    /// Sites of the arcs from left to right.
    pub fn sites(&self) -> Vec<SiteId> {
        self.iter().map(|id| self.arcs[id].site).collect()
    }

    #[cfg(test)]
    fn in_order(&self) -> Vec<ArcId> {
        fn walk(arcs: &[Arc], node: Option<ArcId>, out: &mut Vec<ArcId>) {
            if let Some(n) = node {
                walk(arcs, arcs[n].left, out);
                out.push(n);
                walk(arcs, arcs[n].right, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.arcs, self.root, &mut out);
        out
    }
}
