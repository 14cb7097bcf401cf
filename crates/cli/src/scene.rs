//! JSON scene format: an ordered list of boolean commits.
//!
//! ```json
//! {"ops": [{"op": "add", "shape": {"kind": "circle", "cx": 0, "cy": 0, "r": 5}}]}
//! ```

use anyhow::{Context, Result};
use sdmesh::boolean::BoolOp;
use sdmesh::draw::Rgba;
use sdmesh::mesh::{Mesh, MeshCfg, MeshStyle};
use sdmesh::{Arc, Polygon, Shape, ShapeError, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub ops: Vec<Step>,
    #[serde(default)]
    pub style: Option<StyleSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub op: OpKind,
    pub shape: ShapeSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Add,
    Subtract,
    Intersect,
}

impl From<OpKind> for BoolOp {
    fn from(k: OpKind) -> Self {
        match k {
            OpKind::Add => BoolOp::Union,
            OpKind::Subtract => BoolOp::Difference,
            OpKind::Intersect => BoolOp::Intersection,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    Circle { cx: f64, cy: f64, r: f64 },
    Rectangle { x: f64, y: f64, w: f64, h: f64 },
    Polygon { points: Vec<[f64; 2]> },
    /// Angles in radians, swept counter-clockwise.
    Arc { cx: f64, cy: f64, r: f64, start: f64, end: f64 },
    /// Arc fitted through sampled points.
    ArcPoints { points: Vec<[f64; 2]> },
}

fn points(raw: &[[f64; 2]]) -> Vec<Vec2> {
    raw.iter().map(|&[x, y]| Vec2::new(x, y)).collect()
}

impl ShapeSpec {
    pub fn to_shape(&self) -> Result<Shape, ShapeError> {
        Ok(match self {
            ShapeSpec::Circle { cx, cy, r } => sdmesh::api::circle(*cx, *cy, *r)?.into(),
            ShapeSpec::Rectangle { x, y, w, h } => sdmesh::api::rectangle(*x, *y, *w, *h)?.into(),
            ShapeSpec::Polygon { points: raw } => Polygon::new(points(raw))?.into(),
            ShapeSpec::Arc { cx, cy, r, start, end } => {
                sdmesh::api::arc(*cx, *cy, *r, *start, *end)?.into()
            }
            ShapeSpec::ArcPoints { points: raw } => Arc::from_points(&points(raw))?.into(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSpec {
    pub fill: [f64; 4],
    pub outline: [f64; 4],
    pub outline_width: f64,
    #[serde(default = "yes")]
    pub filled: bool,
}

fn yes() -> bool {
    true
}

impl From<&StyleSpec> for MeshStyle {
    fn from(s: &StyleSpec) -> Self {
        let [r, g, b, a] = s.fill;
        let [or, og, ob, oa] = s.outline;
        MeshStyle {
            fill: Rgba::new(r, g, b, a),
            outline: Rgba::new(or, og, ob, oa),
            outline_width: s.outline_width,
            filled: s.filled,
        }
    }
}

pub fn load(path: &std::path::Path) -> Result<Scene> {
    let bytes = std::fs::read(path).with_context(|| format!("reading scene {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing scene {}", path.display()))
}

/// Commit every step of `scene` in order.
pub fn build(scene: &Scene, cfg: MeshCfg) -> Result<Mesh> {
    let mut mesh = Mesh::with_cfg(cfg);
    if let Some(style) = &scene.style {
        mesh = mesh.with_style(style.into());
    }
    for (i, step) in scene.ops.iter().enumerate() {
        let shape = step
            .shape
            .to_shape()
            .with_context(|| format!("op {i}: invalid {:?}", step.shape))?;
        mesh.apply(step.op.into(), shape);
        tracing::debug!(step = i, op = ?step.op, vertices = mesh.polygon().len(), "step");
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RING: &str = r#"{
        "ops": [
            {"op": "add", "shape": {"kind": "circle", "cx": 0, "cy": 0, "r": 10}},
            {"op": "subtract", "shape": {"kind": "rectangle", "x": -3, "y": -3, "w": 6, "h": 6}}
        ],
        "style": {"fill": [1, 0, 0, 1], "outline": [0, 0, 0, 1], "outline_width": 0.5}
    }"#;

    fn coarse() -> MeshCfg {
        MeshCfg {
            scale: 2.0,
            padding: 4.0,
            ..MeshCfg::default()
        }
    }

    #[test]
    fn parses_ops_and_style() {
        let scene: Scene = serde_json::from_str(RING).unwrap();
        assert_eq!(scene.ops.len(), 2);
        assert_eq!(scene.ops[1].op, OpKind::Subtract);
        let style = MeshStyle::from(scene.style.as_ref().unwrap());
        assert!(style.filled);
        assert_eq!(style.fill, Rgba([1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn builds_a_ring_with_a_square_hole() {
        let scene: Scene = serde_json::from_str(RING).unwrap();
        let mesh = build(&scene, coarse()).unwrap();
        let want = std::f64::consts::PI * 100.0 - 36.0;
        assert!((mesh.area() - want).abs() / want < 0.05, "area {}", mesh.area());
        assert!(mesh.signed_distance(Vec2::new(0.0, 0.0)) > 0.0);
        assert_eq!(mesh.style().outline_width, 0.5);
    }

    #[test]
    fn every_shape_kind_converts() {
        let raw = r#"[
            {"kind": "polygon", "points": [[0, 0], [1, 0], [0, 1]]},
            {"kind": "arc", "cx": 0, "cy": 0, "r": 2, "start": 0, "end": 3.14},
            {"kind": "arc_points", "points": [[-1, 0], [0, 1], [1, 0]]}
        ]"#;
        let specs: Vec<ShapeSpec> = serde_json::from_str(raw).unwrap();
        for s in &specs {
            assert!(matches!(s.to_shape().unwrap(), Shape::Polygon(_)));
        }
    }

    #[test]
    fn invalid_shape_names_its_step() {
        let raw = r#"{"ops": [{"op": "add", "shape": {"kind": "circle", "cx": 0, "cy": 0, "r": -1}}]}"#;
        let scene: Scene = serde_json::from_str(raw).unwrap();
        let err = build(&scene, coarse()).unwrap_err();
        assert!(format!("{err:#}").contains("op 0"));
    }
}
