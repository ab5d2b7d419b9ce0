use crate::bounds::BoundingBox;
use crate::geometry::{Point, SiteId};

/// A spatial index of sites based on a uniform grid over the clip rectangle.
///
/// Used to answer nearest-site queries after construction, e.g. to find the owner of a
/// stretch of the rectangle's perimeter that no bisector touches.
#[derive(Clone, Debug)]
pub struct SiteGrid {
    /// Number of bins along the X axis.
    pub grid_res_x: usize,
    /// Number of bins along the Y axis.
    pub grid_res_y: usize,
    /// Scale factor for X coordinate to grid index.
    pub grid_scale_x: f64,
    /// Scale factor for Y coordinate to grid index.
    pub grid_scale_y: f64,
    grid_limit_x: f64,
    grid_limit_y: f64,
    min_x: f64,
    min_y: f64,
    /// The grid bins, each containing a list of site indices and positions.
    grid_bins: Vec<Vec<(SiteId, Point)>>,
    /// Precomputed search order for visiting neighboring bins, by minimum distance.
    bin_search_order: Vec<(isize, isize, f64)>,
}

impl SiteGrid {
    /// Creates an empty grid with the specified dimensions and bounds.
    pub fn new(nx: usize, ny: usize, bounds: &BoundingBox) -> Self {
        let nx = nx.max(1);
        let ny = ny.max(1);
        let sx = (nx as f64) / bounds.width();
        let sy = (ny as f64) / bounds.height();

        let cell_size_x = 1.0 / sx;
        let cell_size_y = 1.0 / sy;

        let get_min_dist_sq = |dx: isize, dy: isize| {
            let mx = (dx.unsigned_abs().saturating_sub(1)) as f64 * cell_size_x;
            let my = (dy.unsigned_abs().saturating_sub(1)) as f64 * cell_size_y;
            mx * mx + my * my
        };

        let rx = nx as isize;
        let ry = ny as isize;
        let mut bin_search_order = Vec::with_capacity((2 * nx + 1) * (2 * ny + 1));
        for y in -ry..=ry {
            for x in -rx..=rx {
                bin_search_order.push((x, y, get_min_dist_sq(x, y)));
            }
        }
        bin_search_order.sort_unstable_by(|a, b| a.2.total_cmp(&b.2));

        SiteGrid {
            grid_res_x: nx,
            grid_res_y: ny,
            grid_scale_x: sx,
            grid_scale_y: sy,
            grid_limit_x: (nx as f64) - 1e-5,
            grid_limit_y: (ny as f64) - 1e-5,
            min_x: bounds.min[0],
            min_y: bounds.min[1],
            grid_bins: vec![Vec::new(); nx * ny],
            bin_search_order,
        }
    }

    /// Creates a grid sized for roughly one site per bin.
    pub fn for_count(count: usize, bounds: &BoundingBox) -> Self {
        let n = ((count as f64).sqrt().ceil() as usize).clamp(1, 256);
        Self::new(n, n, bounds)
    }

    /// Calculates the linear index of the bin corresponding to the given coordinates.
    pub fn bin_index(&self, p: Point) -> usize {
        let ix = ((p.x - self.min_x) * self.grid_scale_x).clamp(0.0, self.grid_limit_x) as usize;
        let iy = ((p.y - self.min_y) * self.grid_scale_y).clamp(0.0, self.grid_limit_y) as usize;
        ix + iy * self.grid_res_x
    }

    /// Replaces the contents of the grid.
    pub fn set_sites<I>(&mut self, sites: I)
    where
        I: IntoIterator<Item = (SiteId, Point)>,
    {
        self.grid_bins.iter_mut().for_each(|bin| bin.clear());
        for (id, p) in sites {
            let bin = self.bin_index(p);
            self.grid_bins[bin].push((id, p));
        }
    }

    pub fn len(&self) -> usize {
        self.grid_bins.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.grid_bins.iter().all(Vec::is_empty)
    }

    /// The site closest to `p`; ties go to the lower index.
    pub fn nearest(&self, p: Point) -> Option<SiteId> {
        let bin_idx = self.bin_index(p);
        let idx_x = (bin_idx % self.grid_res_x) as isize;
        let idx_y = (bin_idx / self.grid_res_x) as isize;

        let mut best: Option<(f64, SiteId)> = None;
        for &(dx, dy, min_d2) in &self.bin_search_order {
            if let Some((best_d2, _)) = best {
                if min_d2 > best_d2 {
                    break;
                }
            }

            let bx = idx_x + dx;
            let by = idx_y + dy;
            if bx < 0 || bx >= self.grid_res_x as isize || by < 0 || by >= self.grid_res_y as isize {
                continue;
            }

            let bin = (bx as usize) + (by as usize) * self.grid_res_x;
            for &(id, q) in &self.grid_bins[bin] {
                let d2 = p.distance_sq(q);
                let closer = match best {
                    None => true,
                    Some((best_d2, best_id)) => d2 < best_d2 || (d2 == best_d2 && id < best_id),
                };
                if closer {
                    best = Some((d2, id));
                }
            }
        }

        best.map(|(_, id)| id)
    }
}
