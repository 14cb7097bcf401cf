use super::{ensure_finite, Sdf, ShapeError};
use crate::geom2::{Rect, Vec2};

/// Axis-aligned rectangle given by its minimum corner and size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub offset: Vec2,
    pub size: Vec2,
}

impl Rectangle {
    pub fn new(offset: Vec2, size: Vec2) -> Result<Self, ShapeError> {
        ensure_finite(offset, "rectangle offset")?;
        ensure_finite(size, "rectangle size")?;
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(ShapeError::DegenerateSize {
                width: size.x,
                height: size.y,
            });
        }
        Ok(Self { offset, size })
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.size.x * self.size.y
    }

    /// Corners in counter-clockwise order starting at `offset`.
    pub fn corners(&self) -> [Vec2; 4] {
        let o = self.offset;
        let s = self.size;
        [
            o,
            Vec2::new(o.x + s.x, o.y),
            o + s,
            Vec2::new(o.x, o.y + s.y),
        ]
    }

    #[inline]
    pub fn translate(&self, d: Vec2) -> Rectangle {
        Rectangle {
            offset: self.offset + d,
            size: self.size,
        }
    }

    #[inline]
    pub fn scale(&self, k: f64) -> Rectangle {
        debug_assert!(k > 0.0, "scale factor must be positive");
        Rectangle {
            offset: self.offset * k,
            size: self.size * k,
        }
    }
}

impl Sdf for Rectangle {
    fn signed_distance(&self, p: Vec2) -> f64 {
        let half = self.size * 0.5;
        let q = (p - (self.offset + half)).abs() - half;
        let outside = q.sup(&Vec2::zeros()).norm();
        let inside = q.x.max(q.y).min(0.0);
        outside + inside
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(self.offset, self.size)
    }
}
