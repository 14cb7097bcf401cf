use super::{ensure_finite, Sdf, ShapeError};
use crate::geom2::{Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vec2, radius: f64) -> Result<Self, ShapeError> {
        ensure_finite(center, "circle center")?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ShapeError::NonPositiveRadius { radius });
        }
        Ok(Self { center, radius })
    }

    #[inline]
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    #[inline]
    pub fn translate(&self, d: Vec2) -> Circle {
        Circle {
            center: self.center + d,
            radius: self.radius,
        }
    }

    #[inline]
    pub fn scale(&self, k: f64) -> Circle {
        debug_assert!(k > 0.0, "scale factor must be positive");
        Circle {
            center: self.center * k,
            radius: self.radius * k,
        }
    }
}

impl Sdf for Circle {
    #[inline]
    fn signed_distance(&self, p: Vec2) -> f64 {
        (p - self.center).norm() - self.radius
    }

    fn bounding_box(&self) -> Rect {
        let r = Vec2::new(self.radius, self.radius);
        Rect::from_corners(self.center - r, self.center + r)
    }
}
