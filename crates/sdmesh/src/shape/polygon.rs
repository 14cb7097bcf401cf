use std::collections::HashMap;

use super::{ensure_finite, Sdf, ShapeError};
use crate::geom2::{self, Rect, Vec2};

/// Ordered vertex ring, implicitly closed (the first vertex follows the last).
///
/// Either winding is accepted; the SDF sign comes from a crossing test, not
/// from the orientation. A polygon produced by the mesh pipeline may be empty
/// (no surviving boundary); an empty polygon is outside everywhere.
///
/// Holes are carried as keyholes: the hole ring is spliced into the outer
/// ring through a zero-width bridge walked once in each direction. Only the
/// splicer marks such seam edges; they are not boundary and are skipped by
/// the SDF. Every edge of a user-built polygon counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    // seams[i] marks edge (v[i], v[i-1]); empty when there are none
    seams: Vec<bool>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        if vertices.len() < 3 {
            return Err(ShapeError::TooFewVertices {
                got: vertices.len(),
            });
        }
        for v in &vertices {
            ensure_finite(*v, "polygon vertex")?;
        }
        Ok(Self::from_ring(vertices))
    }

    /// Polygon with no vertices.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap a ring produced by the pipeline without precondition checks.
    pub(crate) fn from_ring(vertices: Vec<Vec2>) -> Self {
        Self {
            vertices,
            seams: Vec::new(),
        }
    }

    /// Ring whose `seams[i]` marks edge `(v[i-1], v[i])` as a bridge.
    pub(crate) fn with_seams(vertices: Vec<Vec2>, seams: Vec<bool>) -> Self {
        debug_assert_eq!(vertices.len(), seams.len());
        let seams = if seams.contains(&true) {
            seams
        } else {
            Vec::new()
        };
        Self { vertices, seams }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Vec2> {
        self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Shoelace area, counter-clockwise positive.
    pub fn signed_area(&self) -> f64 {
        geom2::signed_area(&self.vertices)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn centroid(&self) -> Option<Vec2> {
        geom2::centroid(&self.vertices)
    }

    pub fn perimeter(&self) -> f64 {
        geom2::perimeter(&self.vertices)
    }

    /// Strict containment via the even-odd rule.
    pub fn contains(&self, p: Vec2) -> bool {
        geom2::ring_contains(&self.vertices, p)
    }

    /// Number of bridge edges (two per spliced hole).
    pub fn seam_count(&self) -> usize {
        self.seams.iter().filter(|&&s| s).count()
    }

    pub fn translate(&self, d: Vec2) -> Polygon {
        Polygon {
            vertices: self.vertices.iter().map(|v| *v + d).collect(),
            seams: self.seams.clone(),
        }
    }

    pub fn scale(&self, k: f64) -> Polygon {
        debug_assert!(k > 0.0, "scale factor must be positive");
        Polygon {
            vertices: self.vertices.iter().map(|v| *v * k).collect(),
            seams: self.seams.clone(),
        }
    }

    /// Boundary rings with bridges removed: the outer ring first, then one
    /// ring per spliced hole. A polygon without seams is its own single ring.
    pub fn rings(&self) -> Vec<Vec<Vec2>> {
        if self.seams.is_empty() {
            return if self.is_empty() {
                Vec::new()
            } else {
                vec![self.vertices.clone()]
            };
        }
        let v = &self.vertices;
        let n = v.len();
        // edge i runs v[i] -> v[i+1]; it is a seam when seams[i+1] is set
        let is_bridge = |i: usize| self.is_seam((i + 1) % n);
        let mut outgoing: HashMap<(u64, u64), Vec<usize>> = HashMap::new();
        for i in (0..n).filter(|&i| !is_bridge(i)) {
            outgoing.entry(bits(v[i])).or_default().push(i);
        }
        let mut seen = vec![false; n];
        let mut rings = Vec::new();
        for start in 0..n {
            if seen[start] || is_bridge(start) {
                continue;
            }
            let mut ring = Vec::new();
            let mut e = start;
            loop {
                seen[e] = true;
                ring.push(v[e]);
                let next = outgoing
                    .get(&bits(v[(e + 1) % n]))
                    .and_then(|es| es.iter().copied().find(|&k| !seen[k]));
                match next {
                    Some(k) => e = k,
                    None => break,
                }
            }
            rings.push(ring);
        }
        rings
    }

    #[inline]
    fn is_seam(&self, i: usize) -> bool {
        self.seams.get(i).copied().unwrap_or(false)
    }
}

#[inline]
fn bits(p: Vec2) -> (u64, u64) {
    (p.x.to_bits(), p.y.to_bits())
}

impl Sdf for Polygon {
    /// Distance to the nearest edge, signed by a crossing test evaluated in
    /// the same scan. Edges are visited as `(v[i], v[i-1])`; seam pairs
    /// would toggle the sign twice and are skipped altogether.
    fn signed_distance(&self, p: Vec2) -> f64 {
        let v = &self.vertices;
        let n = v.len();
        if n == 0 {
            return f64::INFINITY;
        }
        let mut d = (p - v[0]).norm_squared();
        let mut s = 1.0;
        for i in 0..n {
            if self.is_seam(i) {
                continue;
            }
            let j = (i + n - 1) % n;
            let e = v[j] - v[i];
            let w = p - v[i];
            let len2 = e.norm_squared();
            let t = if len2 > 0.0 {
                (w.dot(&e) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let b = w - e * t;
            d = d.min(b.norm_squared());

            let c1 = p.y >= v[i].y;
            let c2 = p.y < v[j].y;
            let c3 = e.x * w.y > e.y * w.x;
            if (c1 && c2 && c3) || (!c1 && !c2 && !c3) {
                s = -s;
            }
        }
        s * d.sqrt()
    }

    /// Empty polygons report a zero-size box at the origin.
    fn bounding_box(&self) -> Rect {
        Rect::bounding(&self.vertices).unwrap_or_default()
    }
}
