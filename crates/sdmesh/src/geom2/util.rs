use super::Vec2;

/// z-component of the 2D cross product.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Squared distance from `p` to the segment `a–b` (projection clamped to [0,1]).
/// A zero-length segment degenerates to the distance to `a`.
#[inline]
pub fn squared_distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    let e = b - a;
    let w = p - a;
    let len2 = e.norm_squared();
    if len2 <= 0.0 {
        return w.norm_squared();
    }
    let t = (w.dot(&e) / len2).clamp(0.0, 1.0);
    (w - e * t).norm_squared()
}

#[inline]
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    squared_distance_to_segment(p, a, b).sqrt()
}

/// Shoelace signed area of an implicitly closed ring. Counter-clockwise
/// (x right, y up) is positive. Rings with fewer than 3 vertices have zero area.
pub fn signed_area(ring: &[Vec2]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, p) in ring.iter().enumerate() {
        let q = ring[(i + 1) % ring.len()];
        acc += cross(*p, q);
    }
    0.5 * acc
}

/// Area centroid of an implicitly closed ring, or the vertex mean when the
/// ring has no area.
pub fn centroid(ring: &[Vec2]) -> Option<Vec2> {
    if ring.is_empty() {
        return None;
    }
    let a = signed_area(ring);
    if a.abs() <= f64::EPSILON {
        let sum = ring.iter().fold(Vec2::zeros(), |acc, p| acc + p);
        return Some(sum / ring.len() as f64);
    }
    let mut c = Vec2::zeros();
    for (i, p) in ring.iter().enumerate() {
        let q = ring[(i + 1) % ring.len()];
        c += (p + q) * cross(*p, q);
    }
    Some(c / (6.0 * a))
}

/// Length of the closed ring (closing edge included).
pub fn perimeter(ring: &[Vec2]) -> f64 {
    if ring.len() < 2 {
        return 0.0;
    }
    ring.iter()
        .enumerate()
        .map(|(i, p)| (ring[(i + 1) % ring.len()] - p).norm())
        .sum()
}

/// Even-odd crossing test (horizontal ray towards +x).
pub fn ring_contains(ring: &[Vec2], p: Vec2) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
