//! Mesh orchestrator: boolean commits against a working polygon.
//!
//! Model
//! - The working polygon starts empty. Every commit forms the group
//!   `[working polygon, shape]`, samples its composite SDF on a grid and
//!   replaces the working polygon with the traced boundary.
//! - Sampling frame: the merged bounding box grown by `padding`, translated
//!   to the origin and scaled by `scale`. One grid step is `1/scale` world units.
//! - Committing onto an empty polygon: a union rasterizes the shape alone;
//!   difference and intersection leave the polygon empty.

use crate::boolean::{BoolOp, BooleanGroup};
use crate::boundary::{select_boundary, BoundaryCfg};
use crate::contour::{extract_contours, Contour};
use crate::draw::Rgba;
use crate::geom2::{Rect, Vec2};
use crate::shape::{Polygon, Sdf, Shape};
use crate::simplify::douglas_peucker;

/// Pipeline parameters. Defaults match drawing at the library's usual resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshCfg {
    /// Grid samples per world unit.
    pub scale: f64,
    /// World-unit margin around the shapes' bounding box.
    pub padding: f64,
    /// Douglas–Peucker tolerance in grid units.
    pub simplify_eps: f64,
    pub iso_level: f64,
    pub boundary: BoundaryCfg,
}

impl Default for MeshCfg {
    fn default() -> Self {
        Self {
            scale: 10.0,
            padding: 20.0,
            simplify_eps: 0.1,
            iso_level: 0.0,
            boundary: BoundaryCfg::default(),
        }
    }
}

/// Appearance of a mesh drawn with `Mesh::paint`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshStyle {
    pub fill: Rgba,
    pub outline: Rgba,
    pub outline_width: f64,
    pub filled: bool,
}

impl Default for MeshStyle {
    fn default() -> Self {
        Self {
            fill: Rgba::new(0.8, 0.8, 0.8, 1.0),
            outline: Rgba::BLACK,
            outline_width: 1.0,
            filled: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    polygon: Polygon,
    cfg: MeshCfg,
    style: MeshStyle,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cfg(cfg: MeshCfg) -> Self {
        debug_assert!(cfg.scale > 0.0, "sampling scale must be positive");
        Self {
            cfg,
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: MeshStyle) -> Self {
        self.style = style;
        self
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn into_polygon(self) -> Polygon {
        self.polygon
    }

    #[inline]
    pub fn cfg(&self) -> &MeshCfg {
        &self.cfg
    }

    #[inline]
    pub fn style(&self) -> &MeshStyle {
        &self.style
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygon.is_empty()
    }

    pub fn bounding_box(&self) -> Rect {
        self.polygon.bounding_box()
    }

    /// SDF of the working polygon (`+inf` while it is empty).
    pub fn signed_distance(&self, p: Vec2) -> f64 {
        self.polygon.signed_distance(p)
    }

    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    pub fn translate(&self, d: Vec2) -> Mesh {
        Mesh {
            polygon: self.polygon.translate(d),
            ..self.clone()
        }
    }

    pub fn scale(&self, k: f64) -> Mesh {
        Mesh {
            polygon: self.polygon.scale(k),
            ..self.clone()
        }
    }

    pub fn add(&mut self, shape: impl Into<Shape>) -> &mut Self {
        self.apply(BoolOp::Union, shape)
    }

    pub fn subtract(&mut self, shape: impl Into<Shape>) -> &mut Self {
        self.apply(BoolOp::Difference, shape)
    }

    pub fn intersect(&mut self, shape: impl Into<Shape>) -> &mut Self {
        self.apply(BoolOp::Intersection, shape)
    }

    /// Commit `op` with `shape` and replace the working polygon.
    pub fn apply(&mut self, op: BoolOp, shape: impl Into<Shape>) -> &mut Self {
        let shape = shape.into();
        let group = if self.polygon.is_empty() {
            if op != BoolOp::Union {
                tracing::debug!(op = ?op, "working polygon empty, result stays empty");
                return self;
            }
            BooleanGroup::new(vec![shape])
        } else {
            BooleanGroup::new(vec![Shape::Polygon(self.polygon.clone()), shape])
        };
        self.polygon = commit(&group, op, &self.cfg);
        self
    }
}

/// Run one sampling pass over `group` and return the boundary in world coordinates.
pub fn commit(group: &BooleanGroup, op: BoolOp, cfg: &MeshCfg) -> Polygon {
    let Some(bb) = group.bounding_box() else {
        return Polygon::empty();
    };
    let frame = bb.grow(cfg.padding);
    let local = group.transformed(-frame.position, cfg.scale);
    let width = (frame.size.x * cfg.scale).ceil() as usize;
    let height = (frame.size.y * cfg.scale).ceil() as usize;

    let contours = extract_contours(
        width,
        height,
        |x, y| local.eval(op, Vec2::new(x as f64, y as f64)),
        cfg.iso_level,
    );
    let traced = contours.len();
    let simplified: Vec<Contour> = contours
        .iter()
        .map(|c| douglas_peucker(c, cfg.simplify_eps))
        .collect();
    let boundary = select_boundary(simplified, width, height, &cfg.boundary);
    tracing::debug!(
        op = ?op,
        shapes = group.len(),
        width,
        height,
        traced,
        vertices = boundary.len(),
        "commit"
    );
    boundary.scale(1.0 / cfg.scale).translate(frame.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{circle, rectangle};
    use nalgebra::vector;

    fn coarse() -> MeshCfg {
        MeshCfg {
            scale: 2.0,
            padding: 5.0,
            ..MeshCfg::default()
        }
    }

    #[test]
    fn defaults() {
        let cfg = MeshCfg::default();
        assert_eq!((cfg.scale, cfg.padding, cfg.simplify_eps), (10.0, 20.0, 0.1));
        assert_eq!(cfg.iso_level, 0.0);
        assert_eq!(cfg.boundary, BoundaryCfg::default());
        let m = Mesh::new();
        assert!(m.is_empty());
        assert_eq!(m.signed_distance(vector![0.0, 0.0]), f64::INFINITY);
    }

    #[test]
    fn first_union_rasterizes_the_shape() {
        let mut m = Mesh::with_cfg(coarse());
        m.add(circle(10.0, -4.0, 6.0).unwrap());
        assert!(!m.is_empty());
        let bb = m.bounding_box();
        assert!((bb.position - vector![4.0, -10.0]).norm() < 0.6);
        assert!((bb.end() - vector![16.0, 2.0]).norm() < 0.6);
        assert!(m.signed_distance(vector![10.0, -4.0]) < -5.0);
        assert!(m.signed_distance(vector![20.0, -4.0]) > 3.0);
    }

    #[test]
    fn difference_or_intersection_on_empty_stays_empty() {
        let mut m = Mesh::with_cfg(coarse());
        m.subtract(circle(0.0, 0.0, 3.0).unwrap());
        assert!(m.is_empty());
        m.intersect(rectangle(0.0, 0.0, 3.0, 3.0).unwrap());
        assert!(m.is_empty());
    }

    #[test]
    fn disjoint_intersection_empties_the_mesh() {
        let mut m = Mesh::with_cfg(coarse());
        m.add(circle(0.0, 0.0, 3.0).unwrap());
        m.intersect(circle(20.0, 0.0, 3.0).unwrap());
        assert!(m.is_empty());
        assert_eq!(m.area(), 0.0);
    }

    #[test]
    fn union_of_overlapping_circles_grows_area() {
        let mut m = Mesh::with_cfg(coarse());
        m.add(circle(0.0, 0.0, 5.0).unwrap());
        let a1 = m.area();
        m.add(circle(6.0, 0.0, 5.0).unwrap());
        let a2 = m.area();
        assert!(a2 > a1 * 1.4 && a2 < a1 * 2.0, "{a1} -> {a2}");
        assert!(m.signed_distance(vector![3.0, 0.0]) < 0.0);
    }

    #[test]
    fn translate_and_scale_copy_the_mesh() {
        let mut m = Mesh::with_cfg(coarse());
        m.add(rectangle(0.0, 0.0, 4.0, 2.0).unwrap());
        let moved = m.translate(vector![10.0, 0.0]);
        assert!((moved.bounding_box().position.x - m.bounding_box().position.x - 10.0).abs() < 1e-9);
        let big = m.scale(2.0);
        assert!((big.area() - 4.0 * m.area()).abs() < 1e-6);
        assert_eq!(big.cfg(), m.cfg());
    }
}
