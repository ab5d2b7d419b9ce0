use rayon::prelude::*;
use tracing::{debug, trace};

use crate::border;
use crate::bounds::BoundingBox;
use crate::cell::{Cell, CellScratch};
use crate::geometry::{Point, SiteId, EPSILON};
use crate::grid::SiteGrid;
use crate::sweep::EdgeBuilder;

/// Whether the assembler closes cells along the rectangle's perimeter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderMode {
    /// Add border edges so that every cell's boundary is closed.
    WithBorders,
    /// Only the clipped bisectors.
    #[default]
    WithoutBorders,
}

/// A segment of the diagram, clipped to the rectangle.
///
/// `left` lies to the left of the directed segment `start -> end`, `right` to its right.
/// Border edges run counter-clockwise along the perimeter and have no `right` site.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
    pub left: SiteId,
    pub right: Option<SiteId>,
}

impl Edge {
    pub fn sites(&self) -> (SiteId, Option<SiteId>) {
        (self.left, self.right)
    }

    pub fn is_border(&self) -> bool {
        self.right.is_none()
    }

    /// True if this is the bisector between `a` and `b`, in either order.
    pub fn separates(&self, a: SiteId, b: SiteId) -> bool {
        match self.right {
            Some(r) => (self.left == a && r == b) || (self.left == b && r == a),
            None => false,
        }
    }

    pub fn touches(&self, site: SiteId) -> bool {
        self.left == site || self.right == Some(site)
    }

    /// The site on the other side of the edge from `site`, if any.
    pub fn other_site(&self, site: SiteId) -> Option<SiteId> {
        if self.left == site {
            self.right
        } else if self.right == Some(site) {
            Some(self.left)
        } else {
            None
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }
}

/// The result of a tessellation: clipped edges together with the sites they separate.
#[derive(Clone, Debug)]
pub struct Diagram {
    sites: Vec<Point>,
    bounds: BoundingBox,
    mode: BorderMode,
    edges: Vec<Edge>,
    owners: Vec<Option<SiteId>>,
    site_edges: Vec<Vec<usize>>,
    grid: SiteGrid,
}

impl Diagram {
    /// Resolves the open ends of the sweep's edges and builds the adjacency.
    pub(crate) fn assemble(
        sites: Vec<Point>,
        bounds: BoundingBox,
        mode: BorderMode,
        owners: Vec<Option<SiteId>>,
        builders: Vec<EdgeBuilder>,
    ) -> Self {
        let mut edges = Vec::with_capacity(builders.len());
        for builder in &builders {
            match builder.resolve(&bounds) {
                Some((start, end)) if start.distance(end) > EPSILON => edges.push(Edge {
                    start,
                    end,
                    left: builder.left,
                    right: Some(builder.right),
                }),
                _ => trace!(left = builder.left, right = builder.right, "edge dropped"),
            }
        }

        let dropped = builders.len() - edges.len();

        let mut grid = SiteGrid::for_count(sites.len(), &bounds);
        grid.set_sites(
            sites
                .iter()
                .copied()
                .enumerate()
                .filter(|(i, _)| owners[*i].is_none()),
        );

        if mode == BorderMode::WithBorders {
            let borders = border::synthesize(&bounds, &sites, &edges, &grid);
            trace!(count = borders.len(), "border edges");
            edges.extend(borders);
        }

        let mut site_edges = vec![Vec::new(); sites.len()];
        for (i, edge) in edges.iter().enumerate() {
            site_edges[edge.left].push(i);
            if let Some(r) = edge.right {
                site_edges[r].push(i);
            }
        }

        debug!(
            sites = sites.len(),
            edges = edges.len(),
            dropped,
            "diagram assembled"
        );

        Diagram {
            sites,
            bounds,
            mode,
            edges,
            owners,
            site_edges,
            grid,
        }
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn border_mode(&self) -> BorderMode {
        self.mode
    }

    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// The edges bounding the cell of `site`. Empty for a merged duplicate.
    ///
    /// # Panics
    ///
    /// Panics if `site` is not below [`Diagram::site_count`], like every query here that
    /// takes a site id.
    pub fn site_edges(&self, site: SiteId) -> impl Iterator<Item = &Edge> + '_ {
        self.site_edges[site].iter().map(move |&i| &self.edges[i])
    }

    /// Sites sharing a bisector edge with `site`, sorted.
    pub fn neighbors(&self, site: SiteId) -> Vec<SiteId> {
        let mut neighbors: Vec<SiteId> = self
            .site_edges(site)
            .filter_map(|e| e.other_site(site))
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// The site whose cell `site` uses: itself, or the first of a group of coincident sites.
    ///
    /// Panics if `site` is out of range.
    pub fn owner(&self, site: SiteId) -> SiteId {
        self.owners[site].unwrap_or(site)
    }

    pub fn is_merged(&self, site: SiteId) -> bool {
        self.owners[site].is_some()
    }

    /// The site whose cell contains `p`.
    pub fn nearest_site(&self, p: Point) -> Option<SiteId> {
        self.grid.nearest(p)
    }

    /// The cell polygon of `site`.
    ///
    /// Panics if `site` is out of range; see [`Tessellation`](crate::Tessellation) for a
    /// checked container.
    pub fn cell(&self, site: SiteId) -> Cell {
        self.cell_with_scratch(site, &mut CellScratch::default())
    }

    /// All cell polygons, indexed by site.
    pub fn cells(&self) -> Vec<Cell> {
        (0..self.sites.len())
            .into_par_iter()
            .map_init(CellScratch::default, |scratch, i| self.cell_with_scratch(i, scratch))
            .collect()
    }

    fn cell_with_scratch(&self, site: SiteId, scratch: &mut CellScratch) -> Cell {
        if self.is_merged(site) {
            return Cell::empty(site);
        }

        let g = self.sites[site];
        let mut cell = Cell::new(site, &self.bounds);
        for j in self.neighbors(site) {
            let n = self.sites[j];
            cell.clip(g.midpoint(n), n - g, j as i32, scratch);
        }
        cell
    }
}
