//! Marching-squares iso-contours on a unit grid.
//!
//! Model
//! - Samples sit at integer lattice points `(x, y)` with `0 <= x <= width`,
//!   `0 <= y <= height`. A sample is *inside* when its value is `< z`.
//! - Each cell looks up its 4-bit case `(a<z)(b<z)(c<z)(d<z)` with corners
//!   `a=(x,y)`, `b=(x+1,y)`, `c=(x+1,y+1)`, `d=(x,y+1)` and emits oriented
//!   segments between linearly interpolated edge crossings.
//! - Segments keep the inside on their left, so traced outer boundaries are
//!   counter-clockwise (positive shoelace area) and holes clockwise.
//! - Saddles (cases 5 and 10) are resolved by the mean of the four corners.
//!
//! Closed mode surrounds the grid with a ring of virtual samples valued
//! `z + 1` (solid outside), so every traced polyline is a closed loop.
//! Rows are sampled as a stream: only two rows of values are alive at a time.

mod trace;

use crate::geom2::Vec2;
use trace::{EdgeKey, Tracer};

/// Closed polyline in grid coordinates; closed loops repeat their first point at the end.
pub type Contour = Vec<Vec2>;

/// Value of the virtual frame ring relative to the iso-level in closed mode.
const FRAME_OFFSET: f64 = 1.0;

// Cell edges in counter-clockwise walk order: 0 = a→b (bottom), 1 = b→c (right),
// 2 = c→d (top), 3 = d→a (left). Each pair runs from the edge where the walk
// leaves the inside to the edge where it re-enters.
const SEGMENTS: [&[(u8, u8)]; 16] = [
    &[],
    &[(3, 2)],
    &[(2, 1)],
    &[(3, 1)],
    &[(1, 0)],
    &[(1, 0), (3, 2)], // saddle, b and d kept apart
    &[(2, 0)],
    &[(3, 0)],
    &[(0, 3)],
    &[(0, 2)],
    &[(0, 3), (2, 1)], // saddle, a and c kept apart
    &[(0, 1)],
    &[(1, 3)],
    &[(1, 2)],
    &[(2, 3)],
    &[],
];

// Saddle layouts when the cell center is inside and the two inside corners connect.
const SADDLE_5_JOINED: &[(u8, u8)] = &[(1, 2), (3, 0)];
const SADDLE_10_JOINED: &[(u8, u8)] = &[(0, 1), (2, 3)];

/// Scalar field on the lattice `[0, width] × [0, height]`, queried lazily.
pub struct ContourMap<F> {
    width: usize,
    height: usize,
    field: F,
    closed: bool,
}

impl<F> ContourMap<F>
where
    F: FnMut(usize, usize) -> f64,
{
    pub fn from_fn(width: usize, height: usize, field: F) -> Self {
        Self {
            width,
            height,
            field,
            closed: false,
        }
    }

    /// Treat everything beyond the lattice as solid outside.
    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    /// All polylines at iso-level `z`. Open mode may return open chains
    /// that end on the lattice border.
    pub fn contours(&mut self, z: f64) -> Vec<Contour> {
        let (lo, hi_x, hi_y) = if self.closed {
            (-1i64, self.width as i64 + 1, self.height as i64 + 1)
        } else {
            (0i64, self.width as i64, self.height as i64)
        };
        if hi_x <= lo || hi_y <= lo {
            return Vec::new();
        }

        let mut tracer = Tracer::default();
        let mut below = self.row(lo, lo, hi_x, z);
        for y in lo..hi_y {
            let above = self.row(y + 1, lo, hi_x, z);
            for x in lo..hi_x {
                let i = (x - lo) as usize;
                let corners = [below[i], below[i + 1], above[i + 1], above[i]];
                emit_cell(&mut tracer, x, y, corners, z);
            }
            below = above;
        }
        tracer.finish(self.closed)
    }

    fn row(&mut self, y: i64, lo: i64, hi_x: i64, z: f64) -> Vec<f64> {
        (lo..=hi_x).map(|x| self.sample(x, y, z)).collect()
    }

    fn sample(&mut self, x: i64, y: i64, z: f64) -> f64 {
        let inside_x = x >= 0 && x <= self.width as i64;
        let inside_y = y >= 0 && y <= self.height as i64;
        if inside_x && inside_y {
            (self.field)(x as usize, y as usize)
        } else {
            z + FRAME_OFFSET
        }
    }
}

/// Closed-mode contours of `field` at iso-level `z`.
pub fn extract_contours<F>(width: usize, height: usize, field: F, z: f64) -> Vec<Contour>
where
    F: FnMut(usize, usize) -> f64,
{
    ContourMap::from_fn(width, height, field).closed().contours(z)
}

fn emit_cell(tracer: &mut Tracer, x: i64, y: i64, v: [f64; 4], z: f64) {
    let case = ((v[0] < z) as usize) << 3
        | ((v[1] < z) as usize) << 2
        | ((v[2] < z) as usize) << 1
        | (v[3] < z) as usize;
    let segments = match case {
        5 | 10 if (v[0] + v[1] + v[2] + v[3]) * 0.25 < z => {
            if case == 5 {
                SADDLE_5_JOINED
            } else {
                SADDLE_10_JOINED
            }
        }
        _ => SEGMENTS[case],
    };
    for &(from, to) in segments {
        let (k0, p0) = crossing(x, y, from, v, z);
        let (k1, p1) = crossing(x, y, to, v, z);
        tracer.push(k0, p0, k1, p1);
    }
}

/// Lattice edge id and interpolated crossing for cell edge `edge`.
///
/// The point is computed from the edge's own endpoints in lattice order, so
/// both cells sharing the edge agree bit for bit.
fn crossing(x: i64, y: i64, edge: u8, v: [f64; 4], z: f64) -> (EdgeKey, Vec2) {
    // (key, start corner index, end corner index) with start = lower coordinate
    let (key, i0, i1) = match edge {
        0 => (EdgeKey::horizontal(x, y), 0, 1),
        1 => (EdgeKey::vertical(x + 1, y), 1, 2),
        2 => (EdgeKey::horizontal(x, y + 1), 3, 2),
        _ => (EdgeKey::vertical(x, y), 0, 3),
    };
    let t = (z - v[i0]) / (v[i1] - v[i0]);
    let p = if key.horizontal {
        Vec2::new(key.x as f64 + t, key.y as f64)
    } else {
        Vec2::new(key.x as f64, key.y as f64 + t)
    };
    (key, p)
}
