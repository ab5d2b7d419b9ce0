use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::debug;

use crate::bounds::BoundingBox;
use crate::cell::Cell;
use crate::diagram::{BorderMode, Diagram, Edge};
use crate::error::VoronoiError;
use crate::geometry::Point;
use crate::sweep::{SiteOrder, SweepEngine};

/// Computes the Voronoi edges of `sites` clipped to `bounds`.
///
/// Every site must be finite and lie inside the closed rectangle. The order of the returned
/// edges carries no meaning.
///
/// ```
/// use voroplane::{tessellate, BorderMode, BoundingBox, Point};
///
/// let sites = [Point::new(500.0, 700.0), Point::new(500.0, 300.0)];
/// let bounds = BoundingBox::from_corners(0.0, 0.0, 1000.0, 1000.0);
/// let edges = tessellate(&sites, bounds, BorderMode::WithoutBorders).unwrap();
///
/// assert_eq!(edges.len(), 1);
/// assert!(edges[0].separates(0, 1));
/// ```
pub fn tessellate(sites: &[Point], bounds: BoundingBox, mode: BorderMode) -> Result<Vec<Edge>, VoronoiError> {
    Ok(build_diagram(sites, bounds, mode)?.into_edges())
}

/// Like [`tessellate`], but keeps the sites and the adjacency around for further queries.
pub fn build_diagram(sites: &[Point], bounds: BoundingBox, mode: BorderMode) -> Result<Diagram, VoronoiError> {
    bounds.validate()?;
    validate_sites(sites, &bounds)?;

    let order = SiteOrder::new(sites);
    debug!(
        sites = sites.len(),
        merged = order.merged(),
        ?mode,
        "tessellating"
    );

    let builders = SweepEngine::new(sites, order.order).run();
    Ok(Diagram::assemble(sites.to_vec(), bounds, mode, order.owners, builders))
}

fn validate_sites(sites: &[Point], bounds: &BoundingBox) -> Result<(), VoronoiError> {
    for (index, p) in sites.iter().enumerate() {
        if !p.is_finite() {
            return Err(VoronoiError::NonFiniteSite { index, x: p.x, y: p.y });
        }
        if !bounds.contains(*p) {
            return Err(VoronoiError::SiteOutsideBounds { index, x: p.x, y: p.y });
        }
    }
    Ok(())
}

/// The main container for computing and relaxing 2D Voronoi tessellations.
///
/// Sites are kept as a flat `[x, y, x, y, ...]` buffer so that they can be handed across the
/// WASM boundary without conversion.
#[derive(Clone, Debug)]
pub struct Tessellation {
    pub bounds: BoundingBox,
    pub mode: BorderMode,
    generators: Vec<f64>,
    diagram: Option<Diagram>,
}

impl Tessellation {
    pub fn new(bounds: BoundingBox, mode: BorderMode) -> Self {
        Self {
            bounds,
            mode,
            generators: Vec::new(),
            diagram: None,
        }
    }

    pub fn set_sites(&mut self, sites: &[Point]) {
        self.generators = sites.iter().flat_map(|p| [p.x, p.y]).collect();
        self.diagram = None;
    }

    /// Sets the sites from a flat `[x, y, x, y, ...]` buffer.
    pub fn set_generators(&mut self, generators: &[f64]) -> Result<(), VoronoiError> {
        if generators.len() % 2 != 0 {
            return Err(VoronoiError::MalformedGenerators { len: generators.len() });
        }
        self.generators = generators.to_vec();
        self.diagram = None;
        Ok(())
    }

    pub fn set_site(&mut self, index: usize, p: Point) -> Result<(), VoronoiError> {
        let count = self.count_sites();
        if index >= count {
            return Err(VoronoiError::SiteIndexOutOfRange { index, count });
        }
        self.generators[index * 2] = p.x;
        self.generators[index * 2 + 1] = p.y;
        self.diagram = None;
        Ok(())
    }

    /// Replaces the sites by `count` uniformly distributed random ones.
    pub fn random_generators(&mut self, count: usize) {
        self.random_generators_seeded(count, get_seed());
    }

    pub fn random_generators_seeded(&mut self, count: usize, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let w = self.bounds.width();
        let h = self.bounds.height();

        let mut points = Vec::with_capacity(count * 2);
        for _ in 0..count {
            points.push(self.bounds.min[0] + rng.r#gen::<f64>() * w);
            points.push(self.bounds.min[1] + rng.r#gen::<f64>() * h);
        }

        self.generators = points;
        self.diagram = None;
    }

    pub fn count_sites(&self) -> usize {
        self.generators.len() / 2
    }

    pub fn get_site(&self, index: usize) -> Option<Point> {
        let x = *self.generators.get(index * 2)?;
        let y = *self.generators.get(index * 2 + 1)?;
        Some(Point::new(x, y))
    }

    pub fn sites(&self) -> Vec<Point> {
        self.generators
            .chunks_exact(2)
            .map(|p| Point::new(p[0], p[1]))
            .collect()
    }

    pub fn generators(&self) -> &[f64] {
        &self.generators
    }

    pub fn calculate(&mut self) -> Result<(), VoronoiError> {
        let diagram = build_diagram(&self.sites(), self.bounds, self.mode)?;
        self.diagram = Some(diagram);
        Ok(())
    }

    /// The last calculated diagram, if the sites have not changed since.
    pub fn diagram(&self) -> Option<&Diagram> {
        self.diagram.as_ref()
    }

    pub fn edges(&self) -> &[Edge] {
        self.diagram.as_ref().map(|d| d.edges()).unwrap_or(&[])
    }

    pub fn cells(&self) -> Vec<Cell> {
        self.diagram.as_ref().map_or_else(Vec::new, |d| d.cells())
    }

    /// One step of Lloyd's relaxation: moves every site to the centroid of its cell and
    /// recalculates. Sites without a cell (merged duplicates) stay where they are.
    pub fn relax(&mut self) -> Result<(), VoronoiError> {
        if self.diagram.is_none() {
            self.calculate()?;
        }

        let cells = self.cells();
        let new_generators: Vec<f64> = cells
            .par_iter()
            .zip(self.generators.par_chunks(2))
            .flat_map_iter(|(cell, original_pos)| match cell.centroid() {
                Some(c) => [c.x, c.y],
                None => [original_pos[0], original_pos[1]],
            })
            .collect();

        self.set_generators(&new_generators)?;
        self.calculate()
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        rand::thread_rng().r#gen()
    }
}
