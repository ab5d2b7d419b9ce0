//! Edges along the rectangle's perimeter that close the cells touching it.
//!
//! The perimeter is cut at its corners and at every bisector endpoint lying on it. Each
//! stretch between two consecutive cuts belongs to exactly one cell.

use crate::bounds::BoundingBox;
use crate::diagram::Edge;
use crate::geometry::{Point, SiteId, EPSILON};
use crate::grid::SiteGrid;

/// A cut of the perimeter, with the sites of the bisectors ending there.
struct Stop {
    s: f64,
    point: Point,
    sites: Vec<SiteId>,
}

pub(crate) fn synthesize(
    bounds: &BoundingBox,
    sites: &[Point],
    edges: &[Edge],
    grid: &SiteGrid,
) -> Vec<Edge> {
    if grid.is_empty() {
        return Vec::new();
    }

    let mut marks: Vec<(f64, Point, Option<&Edge>)> = bounds
        .corners()
        .into_iter()
        .map(|c| (bounds.perimeter_position(c), c, None))
        .collect();
    for edge in edges {
        for p in [edge.start, edge.end] {
            if bounds.border_location(p).is_on_border() {
                marks.push((bounds.perimeter_position(p), p, Some(edge)));
            }
        }
    }
    marks.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut stops: Vec<Stop> = Vec::with_capacity(marks.len());
    for (s, point, edge) in marks {
        let merge = stops.last().is_some_and(|last| s - last.s <= EPSILON);
        if !merge {
            stops.push(Stop {
                s,
                point,
                sites: Vec::new(),
            });
        }
        if let (Some(edge), Some(stop)) = (edge, stops.last_mut()) {
            stop.sites.push(edge.left);
            stop.sites.extend(edge.right);
        }
    }

    let perimeter = 2.0 * (bounds.width() + bounds.height());
    let mut borders = Vec::with_capacity(stops.len());
    for i in 0..stops.len() {
        let from = &stops[i];
        let (to, to_s) = match stops.get(i + 1) {
            Some(next) => (next, next.s),
            None => (&stops[0], stops[0].s + perimeter),
        };
        if to_s - from.s <= EPSILON {
            continue;
        }

        let mid = bounds.point_at_perimeter((from.s + to_s) * 0.5);
        let owner = from
            .sites
            .iter()
            .chain(to.sites.iter())
            .copied()
            .min_by(|&a, &b| {
                mid.distance_sq(sites[a])
                    .total_cmp(&mid.distance_sq(sites[b]))
                    .then(a.cmp(&b))
            })
            .or_else(|| grid.nearest(mid));

        if let Some(owner) = owner {
            borders.push(Edge {
                start: from.point,
                end: to.point,
                left: owner,
                right: None,
            });
        }
    }

    borders
}
