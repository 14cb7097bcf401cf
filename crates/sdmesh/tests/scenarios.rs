//! End-to-end commits through the default mesh configuration.

use std::f64::consts::PI;

use nalgebra::vector;
use sdmesh::prelude::*;

fn rel_err(got: f64, want: f64) -> f64 {
    (got - want).abs() / want
}

#[test]
fn single_circle() {
    let mut mesh = make_mesh();
    mesh.add(circle(500.0, 500.0, 100.0).unwrap());
    assert!(!mesh.polygon().is_empty());
    assert!(mesh.polygon().len() > 3);

    let bb = mesh.bounding_box();
    assert!((bb.position - vector![400.0, 400.0]).amax() <= 2.0, "{bb:?}");
    assert!((bb.end() - vector![600.0, 600.0]).amax() <= 2.0, "{bb:?}");
    assert!(rel_err(mesh.area(), PI * 100.0 * 100.0) < 0.02, "area {}", mesh.area());
    assert!(mesh.signed_distance(vector![500.0, 500.0]) < -99.0);
}

#[test]
fn rectangle_minus_circle_keeps_the_hole() {
    let mut mesh = make_mesh();
    mesh.add(rectangle(200.0, 200.0, 400.0, 400.0).unwrap());
    mesh.subtract(circle(400.0, 400.0, 100.0).unwrap());

    let want = 160_000.0 - PI * 10_000.0;
    assert!(rel_err(mesh.area(), want) < 0.03, "area {}", mesh.area());
    // hole interior is outside the result
    assert!(mesh.signed_distance(vector![400.0, 400.0]) > 0.0);
    assert!(mesh.signed_distance(vector![250.0, 250.0]) < 0.0);
    assert_eq!(mesh.polygon().rings().len(), 2);
}

#[test]
fn square_intersect_circle_is_a_quarter_disk() {
    let mut mesh = make_mesh();
    mesh.add(polygon(&[(200.0, 200.0), (400.0, 200.0), (400.0, 400.0), (200.0, 400.0)]).unwrap());
    mesh.intersect(circle(400.0, 400.0, 100.0).unwrap());

    let want = PI * 10_000.0 / 4.0;
    assert!(rel_err(mesh.area(), want) < 0.03, "area {}", mesh.area());
    let bb = mesh.bounding_box();
    assert!((bb.position - vector![300.0, 300.0]).amax() <= 2.0, "{bb:?}");
    assert!((bb.end() - vector![400.0, 400.0]).amax() <= 2.0, "{bb:?}");
}

#[test]
fn simplify_scenarios() {
    let pts = |raw: &[(f64, f64)]| -> Vec<Vec2> { raw.iter().map(|&(x, y)| vector![x, y]).collect() };
    let noisy = pts(&[(0.0, 0.0), (1.0, 0.05), (2.0, -0.03), (3.0, 0.1), (4.0, 0.0)]);
    assert_eq!(douglas_peucker(&noisy, 0.2), pts(&[(0.0, 0.0), (4.0, 0.0)]));
    let zigzag = pts(&[(0.0, 0.0), (1.0, 0.5), (2.0, 0.0), (3.0, -0.5), (4.0, 0.0)]);
    assert_eq!(
        douglas_peucker(&zigzag, 0.2),
        pts(&[(0.0, 0.0), (1.0, 0.5), (3.0, -0.5), (4.0, 0.0)])
    );
    let sharp = pts(&[(0.0, 0.0), (1.0, 0.5), (2.0, -0.5), (3.0, 0.5), (4.0, 0.0)]);
    assert_eq!(douglas_peucker(&sharp, 0.2), sharp);
}

#[test]
fn arc_fit_through_three_points() {
    let (c, r) = fit_arc(&[vector![-1.0, 0.0], vector![0.0, 1.0], vector![1.0, 0.0]]).unwrap();
    assert!(c.norm() < 1e-9);
    assert!((r - 1.0).abs() < 1e-9);
}

#[test]
fn flattened_arc_joins_a_union() {
    let mut mesh = make_mesh();
    mesh.add(rectangle(0.0, 0.0, 20.0, 10.0).unwrap());
    let before = mesh.area();
    // half disk on top of the rectangle
    mesh.add(arc(10.0, 10.0, 10.0, 0.0, PI).unwrap());
    let want = before + PI * 100.0 / 2.0;
    assert!(rel_err(mesh.area(), want) < 0.03, "area {}", mesh.area());
    assert!(mesh.signed_distance(vector![10.0, 15.0]) < 0.0);
}
