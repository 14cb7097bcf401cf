//! 2D vector and rectangle algebra.
//!
//! - `Vec2`: nalgebra column vector, used for points and offsets alike.
//! - `Rect`: axis-aligned box (position + non-negative size).
//! - ring helpers (`signed_area`, `ring_contains`, `distance_to_segment`)
//!   shared by polygons, the simplifier and the boundary selector.

mod rect;
mod util;

pub use rect::Rect;
pub use util::{
    centroid, cross, distance_to_segment, perimeter, ring_contains, signed_area,
    squared_distance_to_segment,
};

/// 2D point/vector in world or grid coordinates.
pub type Vec2 = nalgebra::Vector2<f64>;
