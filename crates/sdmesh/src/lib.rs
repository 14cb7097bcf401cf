//! Implicit 2D shape composition.
//!
//! Primitives expose signed distance functions; a `Mesh` combines them with
//! boolean operators, samples the composite field on a grid, extracts the
//! zero iso-contour with marching squares, simplifies it and keeps the shape
//! boundary as its working polygon.
//!
//! Pipeline (one commit)
//! - `boolean::BooleanGroup` builds the composite SDF (min/max folds).
//! - `contour::extract_contours` traces closed polylines in closed mode.
//! - `simplify::douglas_peucker` decimates each contour.
//! - `boundary::select_boundary` drops frame-hugging contours and keeps the
//!   outer boundary (holes spliced in).
//!
//! Drawing is a sink (`draw::Canvas`) and never feeds back into the pipeline.

pub mod api;
pub mod boolean;
pub mod boundary;
pub mod contour;
pub mod draw;
pub mod geom2;
pub mod mesh;
pub mod shape;
pub mod simplify;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{Rect, Vec2};
pub use mesh::{Mesh, MeshCfg};
pub use shape::{Arc, Circle, Polygon, Rectangle, Shape, ShapeError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{arc, circle, make_mesh, polygon, rectangle};
    pub use crate::boolean::{BoolOp, BooleanGroup};
    pub use crate::boundary::BoundaryCfg;
    pub use crate::draw::{Canvas, Dash, Draw, Outline, Rgba, Stroke};
    pub use crate::geom2::{Rect, Vec2};
    pub use crate::mesh::{Mesh, MeshCfg, MeshStyle};
    pub use crate::shape::{fit_arc, Arc, Circle, Polygon, Rectangle, Sdf, Shape, ShapeError};
    pub use crate::simplify::douglas_peucker;
}
