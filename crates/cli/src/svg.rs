//! Minimal SVG canvas. World y points up; the document flips it.

use std::f64::consts::TAU;

use sdmesh::draw::{Canvas, Outline, Rgba, Stroke};
use sdmesh::{Rect, Vec2};

pub struct SvgCanvas {
    view: Rect,
    body: String,
}

impl SvgCanvas {
    /// Canvas showing `view` (world coordinates).
    pub fn new(view: Rect) -> Self {
        Self {
            view,
            body: String::new(),
        }
    }

    /// Complete SVG document.
    pub fn finish(self) -> String {
        let (x, y) = (self.view.position.x, self.view.position.y);
        let (w, h) = (self.view.size.x, self.view.size.y);
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{x} {} {w} {h}\">\n\
             <g transform=\"scale(1,-1)\">\n{}</g>\n</svg>\n",
            -(y + h),
            self.body
        )
    }

    fn push_path(&mut self, d: &str, attrs: &str) {
        self.body.push_str(&format!("<path d=\"{d}\" {attrs}/>\n"));
    }
}

fn color(c: Rgba) -> (String, f64) {
    let [r, g, b, _] = c.to_u8();
    (format!("rgb({r},{g},{b})"), c.alpha())
}

fn point(p: Vec2) -> String {
    format!("{} {}", p.x, p.y)
}

fn path_data(outline: &Outline) -> String {
    match outline {
        Outline::Rings(rings) => rings
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| {
                let mut d = format!("M{}", point(r[0]));
                for p in &r[1..] {
                    d.push_str(&format!(" L{}", point(*p)));
                }
                d.push_str(" Z ");
                d
            })
            .collect(),
        Outline::Arc {
            center,
            radius,
            start,
            end,
        } => {
            let at = |a: f64| center + Vec2::new(a.cos(), a.sin()) * *radius;
            let sweep = end - start;
            if sweep >= TAU - 1e-12 {
                // a full turn needs two half arcs
                let (p0, p1) = (at(*start), at(start + TAU * 0.5));
                format!(
                    "M{} A{radius} {radius} 0 1 1 {} A{radius} {radius} 0 1 1 {} Z",
                    point(p0),
                    point(p1),
                    point(p0)
                )
            } else {
                let large = if sweep > TAU * 0.5 { 1 } else { 0 };
                format!(
                    "M{} A{radius} {radius} 0 {large} 1 {}",
                    point(at(*start)),
                    point(at(*end))
                )
            }
        }
        Outline::Rect(r) => format!(
            "M{} h{} v{} h{} Z",
            point(r.position),
            r.size.x,
            r.size.y,
            -r.size.x
        ),
    }
}

impl Canvas for SvgCanvas {
    fn stroke(&mut self, outline: &Outline, stroke: &Stroke) {
        let (rgb, alpha) = color(stroke.color);
        let mut attrs = format!(
            "fill=\"none\" stroke=\"{rgb}\" stroke-opacity=\"{alpha}\" stroke-width=\"{}\"",
            stroke.width
        );
        if let Some(dash) = stroke.dash {
            attrs.push_str(&format!(" stroke-dasharray=\"{} {}\"", dash.length, dash.interval));
        }
        self.push_path(&path_data(outline), &attrs);
    }

    fn fill(&mut self, outline: &Outline, paint: Rgba) {
        let (rgb, alpha) = color(paint);
        let attrs = format!("fill=\"{rgb}\" fill-opacity=\"{alpha}\" fill-rule=\"evenodd\"");
        self.push_path(&path_data(outline), &attrs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdmesh::draw::Draw;
    use sdmesh::prelude::*;

    #[test]
    fn document_flips_y_and_contains_paths() {
        let mut canvas = SvgCanvas::new(Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 5.0)));
        circle(5.0, 2.0, 1.0)
            .unwrap()
            .draw(&mut canvas, &Stroke::default().dashed(1.0, 0.5));
        rectangle(1.0, 1.0, 2.0, 2.0)
            .unwrap()
            .draw_filled(&mut canvas, Rgba::new(1.0, 0.0, 0.0, 0.5));
        let svg = canvas.finish();
        assert!(svg.contains("viewBox=\"0 -5 10 5\""));
        assert!(svg.contains("scale(1,-1)"));
        assert!(svg.contains("stroke-dasharray=\"1 0.5\""));
        assert!(svg.contains("fill=\"rgb(255,0,0)\" fill-opacity=\"0.5\""));
        assert!(svg.contains("M1 1 h2 v2 h-2 Z"));
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn rings_become_subpaths() {
        let d = path_data(&Outline::Rings(vec![
            vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)],
            vec![Vec2::new(1.0, 1.0), Vec2::new(1.0, 2.0), Vec2::new(2.0, 1.0)],
        ]));
        assert_eq!(d.matches('M').count(), 2);
        assert_eq!(d.matches('Z').count(), 2);
    }
}
