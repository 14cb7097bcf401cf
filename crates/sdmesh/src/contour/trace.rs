//! Stitching of oriented cell segments into polylines.
//!
//! Every crossing edge starts exactly one segment (in the cell whose
//! counter-clockwise walk leaves the inside there) and ends at most one, so
//! following `start → next` from any key walks a single polyline.

use std::collections::{HashMap, HashSet};

use crate::geom2::Vec2;

/// Lattice edge: horizontal edges run `(x,y)→(x+1,y)`, vertical `(x,y)→(x,y+1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(super) struct EdgeKey {
    pub horizontal: bool,
    pub x: i64,
    pub y: i64,
}

impl EdgeKey {
    #[inline]
    pub fn horizontal(x: i64, y: i64) -> Self {
        Self {
            horizontal: true,
            x,
            y,
        }
    }

    #[inline]
    pub fn vertical(x: i64, y: i64) -> Self {
        Self {
            horizontal: false,
            x,
            y,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Link {
    from: Vec2,
    to: Vec2,
    next: EdgeKey,
}

#[derive(Default)]
pub(super) struct Tracer {
    links: HashMap<EdgeKey, Link>,
    // insertion order keeps output deterministic
    order: Vec<EdgeKey>,
}

impl Tracer {
    pub fn push(&mut self, k0: EdgeKey, p0: Vec2, k1: EdgeKey, p1: Vec2) {
        let link = Link {
            from: p0,
            to: p1,
            next: k1,
        };
        if self.links.insert(k0, link).is_none() {
            self.order.push(k0);
        }
    }

    /// Consume all segments. Open chains (only possible without a closed
    /// frame) are emitted first, starting from keys nothing points to.
    pub fn finish(mut self, closed: bool) -> Vec<Vec<Vec2>> {
        let mut out = Vec::new();
        if !closed {
            let targets: HashSet<EdgeKey> = self.links.values().map(|l| l.next).collect();
            let heads: Vec<EdgeKey> = self
                .order
                .iter()
                .copied()
                .filter(|k| !targets.contains(k))
                .collect();
            for head in heads {
                if let Some(chain) = self.walk(head) {
                    out.push(chain);
                }
            }
        }
        let order = std::mem::take(&mut self.order);
        for start in order {
            if let Some(ring) = self.walk(start) {
                out.push(ring);
            }
        }
        out
    }

    /// Follow links from `start` until the polyline closes or runs out.
    /// Closed loops repeat their first point at the end.
    ///
    /// A sample exactly at the iso level puts the crossings of two adjacent
    /// lattice edges on the same corner; such repeats are collapsed.
    fn walk(&mut self, start: EdgeKey) -> Option<Vec<Vec2>> {
        let first = self.links.remove(&start)?;
        let mut pts = vec![first.from];
        let mut last = first;
        let mut cur = first.next;
        loop {
            if cur == start {
                push_distinct(&mut pts, first.from);
                return Some(pts);
            }
            match self.links.remove(&cur) {
                Some(link) => {
                    push_distinct(&mut pts, link.from);
                    last = link;
                    cur = link.next;
                }
                None => {
                    push_distinct(&mut pts, last.to);
                    return Some(pts);
                }
            }
        }
    }
}

#[inline]
fn push_distinct(pts: &mut Vec<Vec2>, p: Vec2) {
    if pts.last() != Some(&p) {
        pts.push(p);
    }
}
