use std::f64::consts::{PI, TAU};

use super::{ensure_finite, Polygon, ShapeError};
use crate::geom2::{Rect, Vec2};

/// Maximum chord spacing (in units of the radius) used when flattening.
const FLATTEN_INTERVAL: f64 = 0.05;
const FLATTEN_MIN_STEPS: usize = 9;

/// Circular arc swept counter-clockwise from `angle_start` to `angle_end` (radians).
///
/// A sweep with `angle_end < angle_start` wraps through 2π.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub center: Vec2,
    pub radius: f64,
    pub angle_start: f64,
    pub angle_end: f64,
}

/// Turning sense between two positions around an origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

impl Arc {
    pub fn new(
        center: Vec2,
        radius: f64,
        angle_start: f64,
        angle_end: f64,
    ) -> Result<Self, ShapeError> {
        ensure_finite(center, "arc center")?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ShapeError::NonPositiveRadius { radius });
        }
        if !(angle_start.is_finite() && angle_end.is_finite()) {
            return Err(ShapeError::NonFinite { what: "arc angle" });
        }
        Ok(Self {
            center,
            radius,
            angle_start,
            angle_end,
        })
    }

    /// Fit an arc through sampled points (see [`fit_arc`]). The sweep follows
    /// the samples from first to last.
    pub fn from_points(points: &[Vec2]) -> Result<Self, ShapeError> {
        let (center, radius) = fit_arc(points)?;
        let first = points[0];
        let last = points[points.len() - 1];
        let a0 = angle_to_point(center, first);
        let a1 = angle_to_point(center, last);
        match arc_direction(first, points[1], center) {
            ArcDirection::CounterClockwise => Arc::new(center, radius, a0, a1),
            ArcDirection::Clockwise => Arc::new(center, radius, a1, a0),
        }
    }

    /// Angular sweep in `[0, 2π)`. Spans of a full turn or more wrap.
    pub fn sweep(&self) -> f64 {
        let total = (self.angle_end - self.angle_start).rem_euclid(TAU);
        // rem_euclid may round up to TAU for tiny negative spans
        if total >= TAU {
            0.0
        } else {
            total
        }
    }

    pub fn length(&self) -> f64 {
        self.radius * self.sweep()
    }

    #[inline]
    pub fn point_at(&self, angle: f64) -> Vec2 {
        self.center + Vec2::new(angle.cos(), angle.sin()) * self.radius
    }

    /// Nearest point on the supporting circle.
    pub fn project(&self, p: Vec2) -> Vec2 {
        let d = p - self.center;
        match d.try_normalize(0.0) {
            Some(u) => self.center + u * self.radius,
            None => self.point_at(self.angle_start),
        }
    }

    /// Evenly spaced samples from start to end, endpoints included.
    ///
    /// The step count is odd, at least `min_steps`, and large enough that
    /// consecutive samples are no further apart (along the arc) than `max_interval`.
    pub fn discretize(&self, max_interval: f64, min_steps: usize) -> Vec<Vec2> {
        let total = self.sweep();
        let by_interval = if max_interval > 0.0 {
            (self.length() / max_interval).ceil() as usize + 1
        } else {
            0
        };
        let mut steps = by_interval.max(min_steps).max(2);
        if steps % 2 == 0 {
            steps += 1;
        }
        let step = total / (steps - 1) as f64;
        (0..steps)
            .map(|i| self.point_at(self.angle_start + i as f64 * step))
            .collect()
    }

    /// Circular segment bounded by the arc and its chord.
    pub fn to_polygon(&self) -> Polygon {
        let samples = self.discretize(self.radius * FLATTEN_INTERVAL, FLATTEN_MIN_STEPS);
        Polygon::from_ring(samples)
    }

    /// Tight box around the swept curve (endpoints plus axis extremes inside the sweep).
    pub fn bounding_box(&self) -> Rect {
        let mut r = Rect::at(self.point_at(self.angle_start)).expand(self.point_at(self.angle_end));
        let total = self.sweep();
        for k in 0..4 {
            let axis = k as f64 * PI / 2.0;
            let rel = (axis - self.angle_start).rem_euclid(TAU);
            if rel <= total {
                r = r.expand(self.point_at(axis));
            }
        }
        r
    }

    pub fn translate(&self, d: Vec2) -> Arc {
        Arc {
            center: self.center + d,
            ..*self
        }
    }

    pub fn scale(&self, k: f64) -> Arc {
        debug_assert!(k > 0.0, "scale factor must be positive");
        Arc {
            center: self.center * k,
            radius: self.radius * k,
            ..*self
        }
    }
}

#[inline]
fn angle_to_point(origin: Vec2, p: Vec2) -> f64 {
    let d = p - origin;
    d.y.atan2(d.x)
}

/// Direction of travel from `last` to `current` as seen from `origin`,
/// using the angle difference wrapped to `(-π, π]`.
pub fn arc_direction(last: Vec2, current: Vec2, origin: Vec2) -> ArcDirection {
    let mut diff = angle_to_point(origin, current) - angle_to_point(origin, last);
    if diff > PI {
        diff -= TAU;
    } else if diff < -PI {
        diff += TAU;
    }
    if diff > 0.0 {
        ArcDirection::CounterClockwise
    } else {
        ArcDirection::Clockwise
    }
}

/// Circumscribed circle through the first sample, the last sample, and the
/// interior sample nearest to their midpoint.
///
/// Returns `(center, radius)`. Collinear samples yield the sentinel
/// `(p_mid, 0.0)`; fewer than three samples is a precondition violation.
pub fn fit_arc(points: &[Vec2]) -> Result<(Vec2, f64), ShapeError> {
    if points.len() < 3 {
        return Err(ShapeError::TooFewVertices { got: points.len() });
    }
    let e1 = points[0];
    let e2 = points[points.len() - 1];
    let mid = (e1 + e2) * 0.5;

    // apex candidates: interior samples only
    let mut np = points[1];
    let mut best = f64::INFINITY;
    for p in &points[1..points.len() - 1] {
        let dist = (mid - p).norm();
        if dist < best {
            best = dist;
            np = *p;
        }
    }

    let a = (e1 - e2).norm();
    let b = (e1 - np).norm();
    let c = (e2 - np).norm();
    let product = (a + b + c) * (a + b - c) * (a - b + c) * (b + c - a);
    if product <= 0.0 {
        return Ok((np, 0.0));
    }
    let radius = a * b * c / product.sqrt();

    let aa = e1 - np;
    let bb = e2 - np;
    let d = aa.dot(&((e1 + np) * 0.5));
    let e = bb.dot(&((e2 + np) * 0.5));
    let det = aa.x * bb.y - bb.x * aa.y;
    if det == 0.0 {
        return Ok((np, 0.0));
    }
    let center = Vec2::new((d * bb.y - e * aa.y) / det, (aa.x * e - bb.x * d) / det);
    Ok((center, radius))
}
