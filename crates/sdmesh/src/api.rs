//! Convenience constructors over plain coordinates.
//!
//! These mirror the shape constructors (`Circle::new`, ...) with scalar
//! arguments and are what scenes and callers usually reach for.

use crate::geom2::Vec2;
use crate::mesh::Mesh;
use crate::shape::{Arc, Circle, Polygon, Rectangle, ShapeError};

/// Mesh with default configuration and an empty working polygon.
pub fn make_mesh() -> Mesh {
    Mesh::new()
}

pub fn circle(cx: f64, cy: f64, r: f64) -> Result<Circle, ShapeError> {
    Circle::new(Vec2::new(cx, cy), r)
}

/// Axis-aligned rectangle from its lower-left corner and size.
pub fn rectangle(ox: f64, oy: f64, w: f64, h: f64) -> Result<Rectangle, ShapeError> {
    Rectangle::new(Vec2::new(ox, oy), Vec2::new(w, h))
}

pub fn polygon(vertices: &[(f64, f64)]) -> Result<Polygon, ShapeError> {
    Polygon::new(vertices.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
}

/// Arc swept counter-clockwise from `a0` to `a1` (radians).
pub fn arc(cx: f64, cy: f64, r: f64, a0: f64, a1: f64) -> Result<Arc, ShapeError> {
    Arc::new(Vec2::new(cx, cy), r, a0, a1)
}
