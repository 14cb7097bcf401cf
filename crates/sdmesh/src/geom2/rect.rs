use super::Vec2;

/// Axis-aligned rectangle `[position, position + size]`.
///
/// Invariant: `size.x >= 0` and `size.y >= 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Negative extents are folded into the position so the invariant holds.
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self::from_corners(position, position + size)
    }

    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let lo = a.inf(&b);
        let hi = a.sup(&b);
        Self {
            position: lo,
            size: hi - lo,
        }
    }

    /// Degenerate box at a single point.
    #[inline]
    pub fn at(p: Vec2) -> Self {
        Self {
            position: p,
            size: Vec2::zeros(),
        }
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.position + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.size.x * self.size.y
    }

    /// Closed containment test.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let e = self.end();
        p.x >= self.position.x && p.y >= self.position.y && p.x <= e.x && p.y <= e.y
    }

    /// Smallest box containing `self` and `p`.
    pub fn expand(&self, p: Vec2) -> Rect {
        Rect::from_corners(self.position.inf(&p), self.end().sup(&p))
    }

    /// Smallest box containing both boxes.
    pub fn merge(&self, other: &Rect) -> Rect {
        Rect::from_corners(
            self.position.inf(&other.position),
            self.end().sup(&other.end()),
        )
    }

    /// Grow by `k` on every side. Negative `k` shrinks, clamped at zero size.
    pub fn grow(&self, k: f64) -> Rect {
        let size = (self.size + Vec2::new(2.0 * k, 2.0 * k)).sup(&Vec2::zeros());
        Rect {
            position: self.position - Vec2::new(k, k),
            size,
        }
    }

    #[inline]
    pub fn translate(&self, d: Vec2) -> Rect {
        Rect {
            position: self.position + d,
            size: self.size,
        }
    }

    /// Scale about the origin. `k` must be positive.
    #[inline]
    pub fn scale(&self, k: f64) -> Rect {
        Rect {
            position: self.position * k,
            size: self.size * k,
        }
    }

    /// Bounding box of a point cloud; `None` for an empty slice.
    pub fn bounding(points: &[Vec2]) -> Option<Rect> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Rect::at(*first), |r, p| r.expand(*p)))
    }
}
