use wasm_bindgen::prelude::*;

use crate::bounds::BoundingBox;
use crate::cell::Cell;
use crate::diagram::{BorderMode, Edge};
use crate::error::VoronoiError;
use crate::geometry::Point;
use crate::tessellation::Tessellation;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_BOUNDS: &'static str = r#"
export const BOX_ID_LEFT = -1;
export const BOX_ID_RIGHT = -2;
export const BOX_ID_BOTTOM = -3;
export const BOX_ID_TOP = -4;
"#;

impl From<VoronoiError> for JsValue {
    fn from(err: VoronoiError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

// --- Bounding Box ---

#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[wasm_bindgen]
impl BoundingBox2D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox2D {
        BoundingBox2D { min_x, min_y, max_x, max_y }
    }
}

impl From<BoundingBox2D> for BoundingBox {
    fn from(b: BoundingBox2D) -> Self {
        BoundingBox::from_corners(b.min_x, b.min_y, b.max_x, b.max_y)
    }
}

// --- Cell Wrapper ---

#[wasm_bindgen(js_name = Cell2D)]
pub struct Cell2DWASM {
    inner: Cell,
}

#[wasm_bindgen(js_class = Cell2D)]
impl Cell2DWASM {
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> usize { self.inner.id() }
    #[wasm_bindgen(getter)]
    pub fn vertices(&self) -> Vec<f64> { self.inner.vertices() }
    #[wasm_bindgen(getter)]
    pub fn edge_neighbors(&self) -> Vec<i32> { self.inner.edge_neighbors() }
    pub fn area(&self) -> f64 { self.inner.area() }
    /// Empty for a cell without area.
    pub fn centroid(&self) -> Vec<f64> { self.inner.centroid().map_or_else(Vec::new, |c| vec![c.x, c.y]) }
    pub fn contains(&self, x: f64, y: f64) -> bool { self.inner.contains(Point::new(x, y)) }
}

// --- Tessellation ---

#[wasm_bindgen(js_name = Tessellation2D)]
pub struct Tessellation2D {
    inner: Tessellation,
}

#[wasm_bindgen(js_class = Tessellation2D)]
impl Tessellation2D {
    #[wasm_bindgen(constructor)]
    pub fn new(bounds: BoundingBox2D, with_borders: bool) -> Tessellation2D {
        let mode = if with_borders { BorderMode::WithBorders } else { BorderMode::WithoutBorders };
        Tessellation2D { inner: Tessellation::new(bounds.into(), mode) }
    }
    pub fn set_generators(&mut self, generators: &[f64]) -> Result<(), JsValue> {
        Ok(self.inner.set_generators(generators)?)
    }
    pub fn set_generator(&mut self, index: usize, x: f64, y: f64) -> Result<(), JsValue> {
        Ok(self.inner.set_site(index, Point::new(x, y))?)
    }
    pub fn random_generators(&mut self, count: usize) { self.inner.random_generators(count); }
    pub fn calculate(&mut self) -> Result<(), JsValue> { Ok(self.inner.calculate()?) }
    pub fn relax(&mut self) -> Result<(), JsValue> { Ok(self.inner.relax()?) }
    #[wasm_bindgen(getter)]
    pub fn count_generators(&self) -> usize { self.inner.count_sites() }
    pub fn get_generator(&self, index: usize) -> Vec<f64> {
        self.inner.get_site(index).map_or_else(Vec::new, |p| vec![p.x, p.y])
    }
    #[wasm_bindgen(getter)]
    pub fn generators(&self) -> Vec<f64> { self.inner.generators().to_vec() }
    #[wasm_bindgen(getter)]
    pub fn count_edges(&self) -> usize { self.inner.edges().len() }
    /// Edge endpoints as `[x0, y0, x1, y1, ...]`, four values per edge.
    #[wasm_bindgen(getter)]
    pub fn edge_points(&self) -> Vec<f64> { edge_points(self.inner.edges()) }
    /// Edge sites as `[left, right, ...]`, two values per edge; border edges have `right = -1`.
    #[wasm_bindgen(getter)]
    pub fn edge_sites(&self) -> Vec<i32> { edge_sites(self.inner.edges()) }
    pub fn get_cell(&self, index: usize) -> Option<Cell2DWASM> {
        let diagram = self.inner.diagram()?;
        (index < diagram.site_count()).then(|| Cell2DWASM { inner: diagram.cell(index) })
    }
    #[wasm_bindgen(getter)]
    pub fn cells(&self) -> Vec<Cell2DWASM> {
        self.inner.cells().into_iter().map(|inner| Cell2DWASM { inner }).collect()
    }
}

fn edge_points(edges: &[Edge]) -> Vec<f64> {
    edges
        .iter()
        .flat_map(|e| [e.start.x, e.start.y, e.end.x, e.end.y])
        .collect()
}

fn edge_sites(edges: &[Edge]) -> Vec<i32> {
    edges
        .iter()
        .flat_map(|e| [e.left as i32, e.right.map_or(-1, |r| r as i32)])
        .collect()
}
