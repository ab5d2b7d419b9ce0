use crate::bounds::{box_side, BoundingBox};
use crate::geometry::{Point, EPSILON};

/// Scratch buffer to reuse allocations during clipping.
#[derive(Default, Clone)]
pub struct CellScratch {
    vertices: Vec<f64>,
    neighbors: Vec<i32>,
    dists: Vec<f64>,
}

/// The Voronoi cell of one site, clipped to the rectangle, as a counter-clockwise polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub(crate) id: usize,
    // Flat array of vertices [x, y, x, y, ...]
    pub(crate) vertices: Vec<f64>,
    // Neighbor ID for each edge. edge_neighbors[i] corresponds to edge starting at vertices[2*i].
    // Site IDs are non-negative, sides of the rectangle use the negative `box_side` IDs.
    pub(crate) edge_neighbors: Vec<i32>,
}

impl Cell {
    /// Starts a cell covering the whole rectangle.
    pub fn new(id: usize, bounds: &BoundingBox) -> Cell {
        let vertices = bounds
            .corners()
            .iter()
            .flat_map(|c| [c.x, c.y])
            .collect();

        let edge_neighbors = vec![
            box_side(1, false), // Bottom
            box_side(0, true),  // Right
            box_side(1, true),  // Top
            box_side(0, false), // Left
        ];

        Cell {
            id,
            vertices,
            edge_neighbors,
        }
    }

    /// A cell without area, used for sites merged into a coincident one.
    pub fn empty(id: usize) -> Cell {
        Cell {
            id,
            vertices: Vec::new(),
            edge_neighbors: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn vertices(&self) -> Vec<f64> {
        self.vertices.clone()
    }

    pub fn edge_neighbors(&self) -> Vec<i32> {
        self.edge_neighbors.clone()
    }

    pub fn points(&self) -> Vec<Point> {
        self.vertices
            .chunks_exact(2)
            .map(|v| Point::new(v[0], v[1]))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 6
    }

    pub fn area(&self) -> f64 {
        let n = self.vertices.len() / 2;
        if n < 3 {
            return 0.0;
        }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let xi = self.vertices[i * 2];
            let yi = self.vertices[i * 2 + 1];
            let xj = self.vertices[j * 2];
            let yj = self.vertices[j * 2 + 1];
            area += xi * yj - xj * yi;
        }
        (area * 0.5).abs()
    }

    /// Area-weighted centroid, or `None` for a cell without area.
    pub fn centroid(&self) -> Option<Point> {
        let n = self.vertices.len() / 2;
        if n < 3 {
            return None;
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut area = 0.0;

        for i in 0..n {
            let j = (i + 1) % n;
            let xi = self.vertices[i * 2];
            let yi = self.vertices[i * 2 + 1];
            let xj = self.vertices[j * 2];
            let yj = self.vertices[j * 2 + 1];

            let cross = xi * yj - xj * yi;
            area += cross;
            cx += (xi + xj) * cross;
            cy += (yi + yj) * cross;
        }

        if area.abs() < EPSILON {
            return None;
        }

        let factor = 1.0 / (3.0 * area);
        Some(Point::new(cx * factor, cy * factor))
    }

    /// Closed containment test with [`EPSILON`] slack.
    pub fn contains(&self, p: Point) -> bool {
        let points = self.points();
        if points.len() < 3 {
            return false;
        }
        (0..points.len()).all(|i| {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            let edge = b - a;
            edge.cross(p - a) >= -EPSILON * edge.length().max(1.0)
        })
    }

    /// Cuts away the part of the cell on the positive side of the line through `point` with
    /// the given `normal`. The new edge, if any, is tagged with `neighbor_id`.
    ///
    /// Returns true if the cell changed.
    pub fn clip(&mut self, point: Point, normal: Point, neighbor_id: i32, scratch: &mut CellScratch) -> bool {
        let num_verts = self.vertices.len() / 2;
        if num_verts < 3 {
            return false;
        }

        scratch.dists.clear();
        scratch.dists.reserve(num_verts);

        let mut all_inside = true;
        let mut all_outside = true;

        for i in 0..num_verts {
            let v = Point::new(self.vertices[i * 2], self.vertices[i * 2 + 1]);
            let d = (v - point).dot(normal);
            scratch.dists.push(d);

            if d > EPSILON {
                all_inside = false;
            } else if d < -EPSILON {
                all_outside = false;
            }
        }

        if all_inside {
            return false;
        }
        if all_outside {
            self.vertices.clear();
            self.edge_neighbors.clear();
            return true;
        }

        scratch.vertices.clear();
        scratch.neighbors.clear();

        for i in 0..num_verts {
            let j = (i + 1) % num_verts;

            let d_i = scratch.dists[i];
            let d_j = scratch.dists[j];
            let neighbor = self.edge_neighbors[i];
            let xi = self.vertices[i * 2];
            let yi = self.vertices[i * 2 + 1];
            let xj = self.vertices[j * 2];
            let yj = self.vertices[j * 2 + 1];

            if d_i <= EPSILON {
                scratch.vertices.push(xi);
                scratch.vertices.push(yi);

                if d_j <= EPSILON {
                    scratch.neighbors.push(neighbor);
                } else {
                    // Leaving: the edge from V_i to I keeps its neighbor, the edge from I on
                    // runs along the cut.
                    let t = d_i / (d_i - d_j);
                    scratch.neighbors.push(neighbor);
                    scratch.vertices.push(xi + t * (xj - xi));
                    scratch.vertices.push(yi + t * (yj - yi));
                    scratch.neighbors.push(neighbor_id);
                }
            } else if d_j <= EPSILON {
                // Entering
                let t = d_i / (d_i - d_j);
                scratch.vertices.push(xi + t * (xj - xi));
                scratch.vertices.push(yi + t * (yj - yi));
                scratch.neighbors.push(neighbor);
            }
        }

        std::mem::swap(&mut self.vertices, &mut scratch.vertices);
        std::mem::swap(&mut self.edge_neighbors, &mut scratch.neighbors);
        self.drop_short_edges();
        true
    }

    // A cut through a vertex leaves a duplicate point behind.
    fn drop_short_edges(&mut self) {
        let mut i = 0;
        while self.vertices.len() >= 6 && i < self.vertices.len() / 2 {
            let n = self.vertices.len() / 2;
            let j = (i + 1) % n;
            let a = Point::new(self.vertices[i * 2], self.vertices[i * 2 + 1]);
            let b = Point::new(self.vertices[j * 2], self.vertices[j * 2 + 1]);
            if a.approx_eq(b) {
                // The edge from b on survives.
                self.vertices.drain(i * 2..i * 2 + 2);
                self.edge_neighbors.remove(i);
            } else {
                i += 1;
            }
        }
    }
}
