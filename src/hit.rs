//! Hit-testing against board elements.
//!
//! All functions here are pure geometry so selection and eraser logic can be
//! tested without a browser. Thin shapes (lines, strokes) get a slop margin
//! so they remain clickable at small widths; text boxes are estimated from
//! font metrics ratios since the core has no layout engine.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HIT_SLOP_PX, TEXT_ADVANCE_RATIO, TEXT_LINE_HEIGHT_RATIO};
use crate::doc::{Element, SceneDoc, StrokeElement, TextElement};
use crate::geom::{Point, segment_distance};

/// Axis-aligned bounding box in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Bounds {
    /// Whether `pt` falls inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x
            && pt.x <= self.x + self.width
            && pt.y >= self.y
            && pt.y <= self.y + self.height
    }

    /// A copy grown by `pad` on all four sides.
    #[must_use]
    pub fn inflated(&self, pad: f64) -> Bounds {
        Bounds {
            x: self.x - pad,
            y: self.y - pad,
            width: self.width + pad * 2.0,
            height: self.height + pad * 2.0,
        }
    }
}

/// The topmost element under `pt`, if any.
///
/// Elements are checked top-down (reverse document order) so overlapping
/// elements resolve to the one drawn last.
#[must_use]
pub fn hit_test(doc: &SceneDoc, pt: Point) -> Option<&Element> {
    doc.elements().iter().rev().find(|el| hits(el, pt))
}

/// Whether `pt` falls on `el` (body, outline, or slop margin).
#[must_use]
pub fn hits(el: &Element, pt: Point) -> bool {
    match el {
        Element::Stroke(s) => stroke_hit(s, pt),
        Element::Rect(r) => {
            let body = Bounds { x: r.x, y: r.y, width: r.width, height: r.height };
            body.inflated(r.stroke_width / 2.0).contains(pt)
        }
        Element::Circle(c) => {
            pt.distance_to(Point::new(c.x, c.y)) <= c.radius + c.stroke_width / 2.0
        }
        Element::Line(l) => {
            let d = segment_distance(pt, Point::new(l.x1, l.y1), Point::new(l.x2, l.y2));
            d <= hit_halfwidth(l.stroke_width)
        }
        Element::Text(t) => text_bounds(t).contains(pt),
    }
}

/// Axis-aligned bounding box of an element, ignoring stroke width.
#[must_use]
pub fn bounds(el: &Element) -> Bounds {
    match el {
        Element::Stroke(s) => stroke_bounds(s),
        Element::Rect(r) => Bounds { x: r.x, y: r.y, width: r.width, height: r.height },
        Element::Circle(c) => Bounds {
            x: c.x - c.radius,
            y: c.y - c.radius,
            width: c.radius * 2.0,
            height: c.radius * 2.0,
        },
        Element::Line(l) => {
            let x = l.x1.min(l.x2);
            let y = l.y1.min(l.y2);
            Bounds { x, y, width: (l.x1 - l.x2).abs(), height: (l.y1 - l.y2).abs() }
        }
        Element::Text(t) => text_bounds(t),
    }
}

/// Estimated box for a text element.
///
/// Stored width/height win when present; otherwise the box is derived from
/// line count and the longest line at the standard advance/line-height
/// ratios. Both axes are floored at one em so empty text stays clickable.
#[must_use]
pub fn text_bounds(t: &TextElement) -> Bounds {
    let lines = t.text.lines().count().max(1);
    let longest = t.text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    let width = t
        .width
        .unwrap_or_else(|| longest as f64 * t.font_size * TEXT_ADVANCE_RATIO);
    #[allow(clippy::cast_precision_loss)]
    let height = t
        .height
        .unwrap_or_else(|| lines as f64 * t.font_size * TEXT_LINE_HEIGHT_RATIO);
    Bounds {
        x: t.x,
        y: t.y,
        width: width.max(t.font_size),
        height: height.max(t.font_size),
    }
}

/// Half the clickable thickness of a line or stroke segment.
fn hit_halfwidth(width: f64) -> f64 {
    width.max(HIT_SLOP_PX) / 2.0
}

fn stroke_hit(s: &StrokeElement, pt: Point) -> bool {
    let pts: Vec<Point> = s
        .points
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect();
    match pts.len() {
        0 => false,
        1 => pt.distance_to(pts[0]) <= hit_halfwidth(s.width),
        _ => pts
            .windows(2)
            .any(|w| segment_distance(pt, w[0], w[1]) <= hit_halfwidth(s.width)),
    }
}

fn stroke_bounds(s: &StrokeElement) -> Bounds {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for pair in s.points.chunks_exact(2) {
        min_x = min_x.min(pair[0]);
        max_x = max_x.max(pair[0]);
        min_y = min_y.min(pair[1]);
        max_y = max_y.max(pair[1]);
    }
    if min_x > max_x {
        // No complete coordinate pairs.
        return Bounds { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
    }
    Bounds { x: min_x, y: min_y, width: max_x - min_x, height: max_y - min_y }
}
