//! Douglas–Peucker polyline simplification.

use crate::geom2::{distance_to_segment, Vec2};

/// Keep the endpoints, and recursively every vertex further than `epsilon`
/// from the chord of its sub-range (distance to the segment, not the line).
///
/// Inputs with fewer than three points, or a non-positive `epsilon`, are
/// returned unchanged. Closed polylines (first == last) stay closed.
pub fn douglas_peucker(points: &[Vec2], epsilon: f64) -> Vec<Vec2> {
    if points.len() < 3 || epsilon <= 0.0 {
        return points.to_vec();
    }
    let start = points[0];
    let end = points[points.len() - 1];

    let mut index = 0;
    let mut max_dist = 0.0;
    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = distance_to_segment(*p, start, end);
        if d > max_dist {
            max_dist = d;
            index = i;
        }
    }

    if max_dist > epsilon {
        let mut left = douglas_peucker(&points[..=index], epsilon);
        let right = douglas_peucker(&points[index..], epsilon);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![start, end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use proptest::prelude::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Vec2> {
        raw.iter().map(|&(x, y)| vector![x, y]).collect()
    }

    #[test]
    fn small_deviations_collapse_to_chord() {
        let p = pts(&[(0.0, 0.0), (1.0, 0.05), (2.0, -0.03), (3.0, 0.1), (4.0, 0.0)]);
        assert_eq!(douglas_peucker(&p, 0.2), pts(&[(0.0, 0.0), (4.0, 0.0)]));
    }

    #[test]
    fn point_on_a_kept_chord_is_dropped() {
        // (2,0) lies on the segment (1,0.5)-(3,-0.5)
        let p = pts(&[(0.0, 0.0), (1.0, 0.5), (2.0, 0.0), (3.0, -0.5), (4.0, 0.0)]);
        assert_eq!(
            douglas_peucker(&p, 0.2),
            pts(&[(0.0, 0.0), (1.0, 0.5), (3.0, -0.5), (4.0, 0.0)])
        );
    }

    #[test]
    fn zigzag_above_tolerance_is_kept() {
        let p = pts(&[(0.0, 0.0), (1.0, 0.5), (2.0, -0.5), (3.0, 0.5), (4.0, 0.0)]);
        assert_eq!(douglas_peucker(&p, 0.2), p);
    }

    #[test]
    fn short_inputs_and_zero_tolerance_pass_through() {
        let two = pts(&[(0.0, 0.0), (5.0, 5.0)]);
        assert_eq!(douglas_peucker(&two, 1.0), two);
        assert!(douglas_peucker(&[], 1.0).is_empty());
        let line = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(douglas_peucker(&line, 0.0), line);
    }

    #[test]
    fn closed_ring_stays_closed() {
        let ring = pts(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (2.0, 2.0),
            (0.0, 2.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ]);
        let s = douglas_peucker(&ring, 0.1);
        assert_eq!(s.first(), s.last());
        assert_eq!(s, pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]));
    }

    fn arb_polyline() -> impl Strategy<Value = Vec<Vec2>> {
        prop::collection::vec((-10.0..10.0f64, -10.0..10.0f64), 0..40)
            .prop_map(|v| v.into_iter().map(|(x, y)| vector![x, y]).collect())
    }

    proptest! {
        #[test]
        fn output_is_an_ordered_subsequence(p in arb_polyline(), eps in 0.01..3.0f64) {
            let s = douglas_peucker(&p, eps);
            prop_assert!(s.len() <= p.len());
            // every kept point appears in P, in order
            let mut it = p.iter();
            for q in &s {
                prop_assert!(it.any(|x| x == q));
            }
            if p.len() >= 2 {
                prop_assert_eq!(s.first(), p.first());
                prop_assert_eq!(s.last(), p.last());
            }
        }

        #[test]
        fn removed_points_are_within_tolerance(p in arb_polyline(), eps in 0.01..3.0f64) {
            let s = douglas_peucker(&p, eps);
            if p.len() < 3 {
                return Ok(());
            }
            // walk P and S together: points between kept neighbours lie near that segment
            let mut k = 0;
            for q in &p {
                if k + 1 < s.len() && *q == s[k + 1] && *q != s[k] {
                    k += 1;
                    continue;
                }
                if k + 1 < s.len() {
                    prop_assert!(distance_to_segment(*q, s[k], s[k + 1]) <= eps + 1e-9);
                }
            }
        }
    }
}
