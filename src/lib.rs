//! # voroplane
//!
//! `voroplane` is a Rust library for planar Voronoi diagrams, designed to be used in Rust
//! as well as compiled to WebAssembly (WASM). Diagrams are built with Fortune's sweep and
//! clipped to an axis-aligned rectangle.
//!
//! ## Features
//!
//! - **Exact edges**: every edge carries the one or two sites it separates.
//! - **Degeneracies**: collinear sites, sites on the rectangle, cocircular ties and coincident
//!   sites are handled without failing.
//! - **Border edges**: optionally close every cell along the rectangle's perimeter.
//! - **Cells**: cell polygons, centroids and Lloyd relaxation, computed in parallel.
//! - **WASM-first**: Built with `wasm-bindgen` for seamless integration with JavaScript and TypeScript.
//!
//! ## Example
//!
//! ```
//! use voroplane::{tessellate, BorderMode, BoundingBox, Point};
//!
//! let sites = [
//!     Point::new(300.0, 700.0),
//!     Point::new(300.0, 300.0),
//!     Point::new(700.0, 300.0),
//!     Point::new(700.0, 700.0),
//! ];
//! let bounds = BoundingBox::from_corners(0.0, 0.0, 1000.0, 1000.0);
//! let edges = tessellate(&sites, bounds, BorderMode::WithoutBorders).unwrap();
//! assert_eq!(edges.len(), 4);
//! ```
//!
//! ## Main Interface
//!
//! [`tessellate`] is the one-shot entry point. [`build_diagram`] returns a [`Diagram`] with
//! adjacency queries and cells, and [`Tessellation`] keeps sites around for relaxation.

mod border;
mod bounds;
mod cell;
mod clip;
mod diagram;
mod error;
mod geometry;
mod grid;
mod sweep;
mod tessellation;
pub mod wasm;

pub use bounds::box_side;
pub use bounds::BorderLocation;
pub use bounds::BoundingBox;
pub use bounds::BOX_ID_BOTTOM;
pub use bounds::BOX_ID_LEFT;
pub use bounds::BOX_ID_RIGHT;
pub use bounds::BOX_ID_TOP;
pub use cell::Cell;
pub use cell::CellScratch;
pub use clip::{clip_line, clip_parametric, clip_ray, clip_segment};
pub use diagram::{BorderMode, Diagram, Edge};
pub use error::VoronoiError;
pub use geometry::{
    approx_eq, bisector, breakpoint_x, circumcenter, orientation, DegenerateTripleError, Line, Point,
    SiteId, EPSILON,
};
pub use grid::SiteGrid;
pub use tessellation::{build_diagram, tessellate, Tessellation};
