//! Boundary selection over traced contours.
//!
//! Purpose
//! - Closed-mode tracing wraps every region that reaches the sampling frame,
//!   so a composite whose inside extends past the padded box yields a contour
//!   hugging the frame. Such contours are rejected by the share of their
//!   vertices lying on the frame.
//! - Of the survivors, the outer ring (positive area) with the most vertices
//!   is the shape boundary. Hole rings (negative area) inside it are spliced
//!   in through zero-width bridges, so the result is one ordered ring.
//! - Without any surviving outer ring the contour with the most vertices wins.

use std::collections::HashSet;

use crate::contour::Contour;
use crate::geom2::{cross, ring_contains, signed_area, Vec2};
use crate::shape::Polygon;

/// Frame-artifact filter parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryCfg {
    /// Distance from the frame under which a vertex counts as "on the frame".
    pub tolerance: f64,
    /// Contours with `frame vertices / vertices >= ratio_threshold` are rejected.
    pub ratio_threshold: f64,
}

impl Default for BoundaryCfg {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            ratio_threshold: 0.2,
        }
    }
}

/// Fraction of `ring` vertices within `tol` of (or beyond) the `[0,w]×[0,h]` frame.
pub fn frame_ratio(ring: &[Vec2], width: f64, height: f64, tol: f64) -> f64 {
    if ring.is_empty() {
        return 0.0;
    }
    let on_frame = ring
        .iter()
        .filter(|p| p.x < tol || p.y < tol || p.x > width - tol || p.y > height - tol)
        .count();
    on_frame as f64 / ring.len() as f64
}

/// Drop the repeated closing point of a traced loop.
fn open_ring(mut c: Contour) -> Vec<Vec2> {
    if c.len() > 1 && c.first() == c.last() {
        c.pop();
    }
    c
}

/// Contours (as open rings) that pass the frame filter, in input order.
pub fn retain_interior(
    contours: Vec<Contour>,
    width: usize,
    height: usize,
    cfg: &BoundaryCfg,
) -> Vec<Vec<Vec2>> {
    let (w, h) = (width as f64, height as f64);
    contours
        .into_iter()
        .map(open_ring)
        .filter(|ring| {
            if ring.len() < 3 {
                tracing::trace!(vertices = ring.len(), "rejected degenerate contour");
                return false;
            }
            let ratio = frame_ratio(ring, w, h, cfg.tolerance);
            if ratio >= cfg.ratio_threshold {
                tracing::trace!(vertices = ring.len(), ratio, "rejected frame contour");
                return false;
            }
            true
        })
        .collect()
}

/// The shape boundary among `contours` (grid coordinates), or an empty polygon.
pub fn select_boundary(
    contours: Vec<Contour>,
    width: usize,
    height: usize,
    cfg: &BoundaryCfg,
) -> Polygon {
    let total = contours.len();
    let survivors = retain_interior(contours, width, height, cfg);
    tracing::trace!(total, survivors = survivors.len(), "boundary filter");

    let (outers, holes): (Vec<_>, Vec<_>) =
        survivors.into_iter().partition(|r| signed_area(r) > 0.0);

    let Some(outer) = most_vertices(outers) else {
        return most_vertices(holes).map(Polygon::from_ring).unwrap_or_default();
    };
    let inner: Vec<Vec<Vec2>> = holes
        .into_iter()
        .filter(|h| ring_contains(&outer, h[0]))
        .collect();
    splice_holes(outer, inner)
}

/// First ring with the maximal vertex count.
fn most_vertices(rings: Vec<Vec<Vec2>>) -> Option<Vec<Vec2>> {
    let mut best: Option<Vec<Vec2>> = None;
    for r in rings {
        if best.as_ref().map_or(true, |b| r.len() > b.len()) {
            best = Some(r);
        }
    }
    best
}

type Key = (u64, u64);

#[inline]
fn key(p: Vec2) -> Key {
    (p.x.to_bits(), p.y.to_bits())
}

/// Splice clockwise `holes` into the counter-clockwise `outer` ring.
///
/// Holes go in order of decreasing rightmost x. Each is bridged from its
/// rightmost vertex to the nearest ring vertex whose connecting segment
/// crosses no edge of the ring or of any hole. Bridge endpoints are not reused.
/// Both directions of every bridge are marked as seams on the result.
pub fn splice_holes(outer: Vec<Vec2>, mut holes: Vec<Vec<Vec2>>) -> Polygon {
    holes.retain(|h| h.len() >= 3);
    for h in &mut holes {
        if signed_area(h) > 0.0 {
            h.reverse();
        }
    }
    holes.sort_by(|a, b| rightmost(b).1.total_cmp(&rightmost(a).1));

    let mut ring = outer;
    // seams[k] marks the edge arriving at ring[k]
    let mut seams = vec![false; ring.len()];
    let mut used: HashSet<Key> = HashSet::new();
    for k in 0..holes.len() {
        let hole = &holes[k];
        let j = rightmost(hole).0;
        let hv = hole[j];

        let mut candidates: Vec<usize> = (0..ring.len())
            .filter(|&i| !used.contains(&key(ring[i])))
            .collect();
        candidates.sort_by(|&a, &b| {
            (ring[a] - hv)
                .norm_squared()
                .total_cmp(&(ring[b] - hv).norm_squared())
        });
        let visible = candidates.into_iter().find(|&i| {
            let rv = ring[i];
            !crosses_ring(&ring, hv, rv) && holes[k..].iter().all(|h| !crosses_ring(h, hv, rv))
        });
        let Some(i) = visible else {
            tracing::trace!(vertices = hole.len(), "hole without visible bridge dropped");
            continue;
        };

        let rv = ring[i];
        used.insert(key(rv));
        used.insert(key(hv));
        let extra = hole.len() + 2;
        let mut spliced = Vec::with_capacity(ring.len() + extra);
        spliced.extend_from_slice(&ring[..=i]);
        spliced.extend_from_slice(&hole[j..]);
        spliced.extend_from_slice(&hole[..=j]);
        spliced.extend_from_slice(&ring[i..]);

        let mut marks = Vec::with_capacity(seams.len() + extra);
        marks.extend_from_slice(&seams[..=i]);
        // ring[i] -> hole[j], then the hole walked once around
        marks.push(true);
        marks.extend(std::iter::repeat(false).take(hole.len()));
        // hole[j] -> ring[i], then the rest of the ring unchanged
        marks.push(true);
        marks.extend_from_slice(&seams[i + 1..]);

        ring = spliced;
        seams = marks;
    }
    Polygon::with_seams(ring, seams)
}

/// Index and x of the first vertex with maximal x.
fn rightmost(r: &[Vec2]) -> (usize, f64) {
    r.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |acc, (i, p)| if p.x > acc.1 { (i, p.x) } else { acc })
}

/// Does segment `a–b` properly cross an edge of `ring`? Edges touching `a` or `b` are ignored.
fn crosses_ring(ring: &[Vec2], a: Vec2, b: Vec2) -> bool {
    let n = ring.len();
    (0..n).any(|i| {
        let (p, q) = (ring[i], ring[(i + 1) % n]);
        if p == a || p == b || q == a || q == b {
            return false;
        }
        segments_cross(a, b, p, q)
    })
}

#[inline]
fn segments_cross(a: Vec2, b: Vec2, p: Vec2, q: Vec2) -> bool {
    let d1 = cross(b - a, p - a);
    let d2 = cross(b - a, q - a);
    let d3 = cross(q - p, a - p);
    let d4 = cross(q - p, b - p);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}
