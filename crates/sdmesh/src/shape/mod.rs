//! Primitive shapes and their signed distance functions.
//!
//! Conventions
//! - `signed_distance(p) < 0` strictly inside, `0` on the boundary, `> 0` outside.
//! - Every SDF here is 1-Lipschitz in the Euclidean metric.
//! - `translate`/`scale` return new values; shapes are never mutated in place.
//!
//! Arcs carry no SDF. They join boolean composition by flattening into a
//! polygon (`Shape::from(Arc)`).

mod arc;
mod circle;
mod polygon;
mod rectangle;

use std::fmt;

pub use arc::{arc_direction, fit_arc, Arc, ArcDirection};
pub use circle::Circle;
pub use polygon::Polygon;
pub use rectangle::Rectangle;

use crate::geom2::{Rect, Vec2};

/// Signed distance field with a finite support box.
pub trait Sdf {
    fn signed_distance(&self, p: Vec2) -> f64;

    /// Axis-aligned box containing every point with `signed_distance <= 0`.
    fn bounding_box(&self) -> Rect;
}

/// Closed set of primitives that can take part in boolean composition.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
    Polygon(Polygon),
}

impl Shape {
    pub fn translate(&self, d: Vec2) -> Shape {
        match self {
            Shape::Circle(c) => Shape::Circle(c.translate(d)),
            Shape::Rectangle(r) => Shape::Rectangle(r.translate(d)),
            Shape::Polygon(p) => Shape::Polygon(p.translate(d)),
        }
    }

    pub fn scale(&self, k: f64) -> Shape {
        match self {
            Shape::Circle(c) => Shape::Circle(c.scale(k)),
            Shape::Rectangle(r) => Shape::Rectangle(r.scale(k)),
            Shape::Polygon(p) => Shape::Polygon(p.scale(k)),
        }
    }

    /// Degenerate shapes (the empty working polygon) contribute nothing to a frame.
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Shape::Polygon(p) if p.is_empty())
    }
}

impl Sdf for Shape {
    #[inline]
    fn signed_distance(&self, p: Vec2) -> f64 {
        match self {
            Shape::Circle(c) => c.signed_distance(p),
            Shape::Rectangle(r) => r.signed_distance(p),
            Shape::Polygon(poly) => poly.signed_distance(p),
        }
    }

    fn bounding_box(&self) -> Rect {
        match self {
            Shape::Circle(c) => c.bounding_box(),
            Shape::Rectangle(r) => r.bounding_box(),
            Shape::Polygon(p) => p.bounding_box(),
        }
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

impl From<Rectangle> for Shape {
    fn from(r: Rectangle) -> Self {
        Shape::Rectangle(r)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Shape::Polygon(p)
    }
}

impl From<Arc> for Shape {
    fn from(a: Arc) -> Self {
        Shape::Polygon(a.to_polygon())
    }
}

/// Precondition violations surfaced by shape constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Polygons need at least three vertices (arc fits need three samples).
    TooFewVertices { got: usize },
    NonPositiveRadius { radius: f64 },
    DegenerateSize { width: f64, height: f64 },
    /// NaN or infinite input coordinate.
    NonFinite { what: &'static str },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::TooFewVertices { got } => {
                write!(f, "need at least 3 vertices, got {got}")
            }
            ShapeError::NonPositiveRadius { radius } => {
                write!(f, "radius must be > 0, got {radius}")
            }
            ShapeError::DegenerateSize { width, height } => {
                write!(f, "rectangle size must be > 0 in both axes, got {width}×{height}")
            }
            ShapeError::NonFinite { what } => write!(f, "{what} must be finite"),
        }
    }
}

impl std::error::Error for ShapeError {}

pub(crate) fn ensure_finite(v: Vec2, what: &'static str) -> Result<(), ShapeError> {
    if v.x.is_finite() && v.y.is_finite() {
        Ok(())
    } else {
        Err(ShapeError::NonFinite { what })
    }
}
