//! Composite SDFs over an ordered group of shapes.
//!
//! - `union = min_i sd_i`
//! - `intersection = max_i sd_i`, folded as `max(acc, sd_i)`
//! - `difference = max(sd_0, -sd_1, ..., -sd_n)`: the first shape minus all others
//! - `negated_union = -min_i sd_i`: the complement of the union, kept for
//!   callers that relied on the older "difference distance" operator
//!
//! All evaluators are O(n) in group size.

use crate::geom2::{Rect, Vec2};
use crate::shape::{Sdf, Shape};

/// Boolean operator applied by a mesh commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoolOp {
    Union,
    Difference,
    Intersection,
}

/// Ordered shapes; the first element is the accumulator in a mesh commit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BooleanGroup {
    pub shapes: Vec<Shape>,
}

impl BooleanGroup {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Merged bounding box of every non-empty member.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .filter(|s| !s.is_empty())
            .map(Sdf::bounding_box)
            .reduce(|a, b| a.merge(&b))
    }

    /// Copy with every member translated by `d`, then scaled by `k`.
    pub fn transformed(&self, d: Vec2, k: f64) -> BooleanGroup {
        BooleanGroup {
            shapes: self.shapes.iter().map(|s| s.translate(d).scale(k)).collect(),
        }
    }

    pub fn union(&self, p: Vec2) -> f64 {
        self.shapes
            .iter()
            .fold(f64::INFINITY, |acc, s| acc.min(s.signed_distance(p)))
    }

    pub fn intersection(&self, p: Vec2) -> f64 {
        self.shapes
            .iter()
            .fold(f64::NEG_INFINITY, |acc, s| acc.max(s.signed_distance(p)))
    }

    /// First member minus the union of the rest. A single-member group is that member.
    pub fn difference(&self, p: Vec2) -> f64 {
        let Some((first, rest)) = self.shapes.split_first() else {
            return f64::INFINITY;
        };
        rest.iter()
            .fold(first.signed_distance(p), |acc, s| acc.max(-s.signed_distance(p)))
    }

    pub fn negated_union(&self, p: Vec2) -> f64 {
        -self.union(p)
    }

    /// Evaluator for `op`.
    pub fn eval(&self, op: BoolOp, p: Vec2) -> f64 {
        match op {
            BoolOp::Union => self.union(p),
            BoolOp::Difference => self.difference(p),
            BoolOp::Intersection => self.intersection(p),
        }
    }
}
