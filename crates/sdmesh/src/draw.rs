//! Drawing sink interface.
//!
//! Shapes describe themselves as an `Outline`; a `Canvas` decides how to
//! stroke or fill it. Nothing here feeds back into the geometry pipeline.

use std::f64::consts::TAU;

use crate::geom2::{Rect, Vec2};
use crate::mesh::Mesh;
use crate::shape::{Arc, Circle, Polygon, Rectangle, Shape};

/// Straight-alpha color, every channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba(pub [f64; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0.0, 0.0, 0.0, 1.0]);
    pub const WHITE: Rgba = Rgba([1.0, 1.0, 1.0, 1.0]);
    pub const TRANSPARENT: Rgba = Rgba([0.0, 0.0, 0.0, 0.0]);

    /// Channels are clamped into `[0, 1]`; NaN becomes 0.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        let c = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Rgba([c(r), c(g), c(b), c(a)])
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.0[3]
    }

    /// 8-bit channels, rounded.
    pub fn to_u8(&self) -> [u8; 4] {
        self.0.map(|v| (v * 255.0).round() as u8)
    }
}

/// Dash pattern: `length` drawn, then `interval` skipped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dash {
    pub length: f64,
    pub interval: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
    pub dash: Option<Dash>,
}

impl Stroke {
    pub fn solid(color: Rgba, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(self, length: f64, interval: f64) -> Self {
        Self {
            dash: Some(Dash { length, interval }),
            ..self
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::solid(Rgba::BLACK, 1.0)
    }
}

/// Geometry handed to a canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
    /// Closed rings, filled with the even-odd rule (holes are rings too).
    Rings(Vec<Vec<Vec2>>),
    /// Counter-clockwise arc from `start` to `end` (radians).
    Arc {
        center: Vec2,
        radius: f64,
        start: f64,
        end: f64,
    },
    Rect(Rect),
}

impl Outline {
    /// Axis-aligned bounds of the outline, `None` when it has no points.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Outline::Rings(rings) => rings
                .iter()
                .filter_map(|r| Rect::bounding(r))
                .reduce(|a, b| a.merge(&b)),
            Outline::Arc { center, radius, .. } => {
                let r = Vec2::new(*radius, *radius);
                Some(Rect::from_corners(center - r, center + r))
            }
            Outline::Rect(r) => Some(*r),
        }
    }
}

/// Drawing backend.
pub trait Canvas {
    fn stroke(&mut self, outline: &Outline, stroke: &Stroke);
    fn fill(&mut self, outline: &Outline, color: Rgba);
}

/// Anything that can hand its outline to a canvas.
pub trait Draw {
    fn outline(&self) -> Outline;

    fn draw(&self, canvas: &mut dyn Canvas, stroke: &Stroke) {
        canvas.stroke(&self.outline(), stroke);
    }

    fn draw_filled(&self, canvas: &mut dyn Canvas, color: Rgba) {
        canvas.fill(&self.outline(), color);
    }
}

impl Draw for Circle {
    fn outline(&self) -> Outline {
        Outline::Arc {
            center: self.center,
            radius: self.radius,
            start: 0.0,
            end: TAU,
        }
    }
}

impl Draw for Rectangle {
    fn outline(&self) -> Outline {
        Outline::Rect(Rect::new(self.offset, self.size))
    }
}

impl Draw for Arc {
    fn outline(&self) -> Outline {
        Outline::Arc {
            center: self.center,
            radius: self.radius,
            start: self.angle_start,
            end: self.angle_start + self.sweep(),
        }
    }
}

impl Draw for Polygon {
    fn outline(&self) -> Outline {
        Outline::Rings(self.rings())
    }
}

impl Draw for Shape {
    fn outline(&self) -> Outline {
        match self {
            Shape::Circle(c) => c.outline(),
            Shape::Rectangle(r) => r.outline(),
            Shape::Polygon(p) => p.outline(),
        }
    }
}

impl Draw for Mesh {
    fn outline(&self) -> Outline {
        self.polygon().outline()
    }
}

impl Mesh {
    /// Fill (when the style asks for it), then stroke the working polygon.
    /// An empty mesh draws nothing.
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        if self.polygon().is_empty() {
            return;
        }
        let style = self.style();
        let outline = self.outline();
        if style.filled {
            canvas.fill(&outline, style.fill);
        }
        canvas.stroke(&outline, &Stroke::solid(style.outline, style.outline_width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{arc, circle, polygon, rectangle};
    use nalgebra::vector;

    #[derive(Default)]
    struct Recorder {
        ops: Vec<(&'static str, Outline, Rgba)>,
    }

    impl Canvas for Recorder {
        fn stroke(&mut self, outline: &Outline, stroke: &Stroke) {
            self.ops.push(("stroke", outline.clone(), stroke.color));
        }

        fn fill(&mut self, outline: &Outline, color: Rgba) {
            self.ops.push(("fill", outline.clone(), color));
        }
    }

    #[test]
    fn colors_are_clamped() {
        let c = Rgba::new(1.5, -0.2, 0.5, f64::NAN);
        assert_eq!(c, Rgba([1.0, 0.0, 0.5, 0.0]));
        assert_eq!(Rgba::WHITE.to_u8(), [255, 255, 255, 255]);
        let s = Stroke::solid(Rgba::BLACK, 2.0).dashed(4.0, 2.0);
        assert_eq!(
            s.dash,
            Some(Dash {
                length: 4.0,
                interval: 2.0
            })
        );
    }

    #[test]
    fn primitives_describe_their_outline() {
        let c = circle(1.0, 2.0, 3.0).unwrap();
        match c.outline() {
            Outline::Arc { center, radius, start, end } => {
                assert_eq!(center, vector![1.0, 2.0]);
                assert_eq!(radius, 3.0);
                assert_eq!((start, end), (0.0, TAU));
            }
            other => panic!("unexpected {other:?}"),
        }
        let r = rectangle(0.0, 0.0, 4.0, 2.0).unwrap();
        assert_eq!(r.outline().bounds().unwrap().size, vector![4.0, 2.0]);
        let p = polygon(&[(0.0, 0.0), (2.0, 0.0), (1.0, 1.0)]).unwrap();
        assert_eq!(p.outline(), Outline::Rings(vec![p.vertices().to_vec()]));
        let a = arc(0.0, 0.0, 1.0, 3.0, 1.0).unwrap();
        match a.outline() {
            Outline::Arc { start, end, .. } => assert!(end > start && (end - start) < TAU),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn draw_routes_through_the_canvas() {
        let mut canvas = Recorder::default();
        let shape: Shape = circle(0.0, 0.0, 1.0).unwrap().into();
        shape.draw(&mut canvas, &Stroke::default());
        shape.draw_filled(&mut canvas, Rgba::WHITE);
        assert_eq!(canvas.ops.len(), 2);
        assert_eq!(canvas.ops[0].0, "stroke");
        assert_eq!(canvas.ops[1].0, "fill");
        assert_eq!(canvas.ops[1].2, Rgba::WHITE);
    }

    #[test]
    fn empty_mesh_paints_nothing() {
        let mut canvas = Recorder::default();
        Mesh::new().paint(&mut canvas);
        assert!(canvas.ops.is_empty());
    }
}
