#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::doc::{CircleElement, LineElement, RectElement};

fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> Element {
    Element::Rect(RectElement {
        id: id.to_owned(),
        x,
        y,
        width: w,
        height: h,
        stroke: "#000".to_owned(),
        stroke_width: 2.0,
        fill: None,
    })
}

fn circle(id: &str, x: f64, y: f64, r: f64) -> Element {
    Element::Circle(CircleElement {
        id: id.to_owned(),
        x,
        y,
        radius: r,
        stroke: "#000".to_owned(),
        stroke_width: 2.0,
        fill: None,
    })
}

fn line(id: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
    Element::Line(LineElement {
        id: id.to_owned(),
        x1,
        y1,
        x2,
        y2,
        stroke: "#000".to_owned(),
        stroke_width: 2.0,
    })
}

fn stroke(id: &str, points: Vec<f64>) -> Element {
    Element::Stroke(StrokeElement {
        id: id.to_owned(),
        points,
        color: "#000".to_owned(),
        width: 4.0,
    })
}

fn text(id: &str, x: f64, y: f64, content: &str) -> Element {
    Element::Text(TextElement {
        id: id.to_owned(),
        x,
        y,
        text: content.to_owned(),
        font_size: 18.0,
        font_weight: "normal".to_owned(),
        font_style: "normal".to_owned(),
        fill: "#1f2937".to_owned(),
        width: None,
        height: None,
    })
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn bounds_contains_edges_inclusive() {
    let b = Bounds { x: 10.0, y: 10.0, width: 20.0, height: 10.0 };
    assert!(b.contains(Point::new(10.0, 10.0)));
    assert!(b.contains(Point::new(30.0, 20.0)));
    assert!(b.contains(Point::new(15.0, 15.0)));
    assert!(!b.contains(Point::new(31.0, 15.0)));
    assert!(!b.contains(Point::new(15.0, 9.0)));
}

#[test]
fn bounds_inflated_grows_all_sides() {
    let b = Bounds { x: 10.0, y: 10.0, width: 20.0, height: 10.0 }.inflated(4.0);
    assert_eq!(b.x, 6.0);
    assert_eq!(b.y, 6.0);
    assert_eq!(b.width, 28.0);
    assert_eq!(b.height, 18.0);
}

#[test]
fn element_bounds_per_kind() {
    assert_eq!(
        bounds(&rect("r", 10.0, 20.0, 30.0, 40.0)),
        Bounds { x: 10.0, y: 20.0, width: 30.0, height: 40.0 }
    );
    assert_eq!(
        bounds(&circle("c", 50.0, 50.0, 10.0)),
        Bounds { x: 40.0, y: 40.0, width: 20.0, height: 20.0 }
    );
    assert_eq!(
        bounds(&line("l", 30.0, 5.0, 10.0, 25.0)),
        Bounds { x: 10.0, y: 5.0, width: 20.0, height: 20.0 }
    );
    assert_eq!(
        bounds(&stroke("s", vec![5.0, 10.0, 15.0, 2.0, 9.0, 20.0])),
        Bounds { x: 5.0, y: 2.0, width: 10.0, height: 18.0 }
    );
}

#[test]
fn empty_stroke_has_zero_bounds() {
    let b = bounds(&stroke("s", vec![]));
    assert_eq!(b, Bounds { x: 0.0, y: 0.0, width: 0.0, height: 0.0 });
}

#[test]
fn text_bounds_grow_with_content() {
    let short = text("a", 0.0, 0.0, "hi");
    let long = text("b", 0.0, 0.0, "a much longer line of text");
    assert!(bounds(&long).width > bounds(&short).width);
}

#[test]
fn text_bounds_grow_with_lines() {
    let one = text("a", 0.0, 0.0, "hello");
    let three = text("b", 0.0, 0.0, "hello\nthere\nworld");
    assert!(bounds(&three).height > bounds(&one).height);
}

#[test]
fn text_bounds_stored_size_wins() {
    let el = Element::Text(TextElement {
        id: "t".to_owned(),
        x: 1.0,
        y: 2.0,
        text: "hi".to_owned(),
        font_size: 18.0,
        font_weight: "normal".to_owned(),
        font_style: "normal".to_owned(),
        fill: "#1f2937".to_owned(),
        width: Some(123.0),
        height: Some(45.0),
    });
    assert_eq!(bounds(&el), Bounds { x: 1.0, y: 2.0, width: 123.0, height: 45.0 });
}

#[test]
fn empty_text_stays_clickable() {
    let b = bounds(&text("t", 0.0, 0.0, ""));
    assert!(b.width >= 18.0);
    assert!(b.height >= 18.0);
}

// =============================================================
// Per-kind hits
// =============================================================

#[test]
fn rect_hit_inside_and_outside() {
    let el = rect("r", 10.0, 10.0, 100.0, 50.0);
    assert!(hits(&el, Point::new(50.0, 30.0)));
    assert!(hits(&el, Point::new(10.0, 10.0)));
    assert!(!hits(&el, Point::new(200.0, 30.0)));
}

#[test]
fn circle_hit_respects_radius() {
    let el = circle("c", 50.0, 50.0, 30.0);
    assert!(hits(&el, Point::new(50.0, 50.0)));
    assert!(hits(&el, Point::new(79.0, 50.0)));
    assert!(!hits(&el, Point::new(90.0, 50.0)));
}

#[test]
fn line_hit_uses_slop_for_thin_strokes() {
    let el = line("l", 0.0, 0.0, 100.0, 0.0);
    assert!(hits(&el, Point::new(50.0, 0.0)));
    // Within the 8px slop halfwidth even though the stroke is 2px.
    assert!(hits(&el, Point::new(50.0, 3.0)));
    assert!(!hits(&el, Point::new(50.0, 10.0)));
}

#[test]
fn stroke_hit_checks_each_segment() {
    let el = stroke("s", vec![0.0, 0.0, 50.0, 0.0, 50.0, 50.0]);
    assert!(hits(&el, Point::new(25.0, 1.0)));
    assert!(hits(&el, Point::new(50.0, 25.0)));
    assert!(!hits(&el, Point::new(25.0, 25.0)));
}

#[test]
fn single_point_stroke_is_clickable() {
    let el = stroke("s", vec![10.0, 10.0]);
    assert!(hits(&el, Point::new(12.0, 10.0)));
    assert!(!hits(&el, Point::new(30.0, 10.0)));
}

#[test]
fn text_hit_uses_estimated_box() {
    let el = text("t", 100.0, 100.0, "hello");
    assert!(hits(&el, Point::new(110.0, 110.0)));
    assert!(!hits(&el, Point::new(90.0, 90.0)));
}

// =============================================================
// Document hit-testing
// =============================================================

#[test]
fn hit_test_empty_doc_is_none() {
    let doc = SceneDoc::new();
    assert!(hit_test(&doc, Point::new(0.0, 0.0)).is_none());
}

#[test]
fn hit_test_miss_is_none() {
    let mut doc = SceneDoc::new();
    doc.append(rect("r", 10.0, 10.0, 20.0, 20.0));
    assert!(hit_test(&doc, Point::new(500.0, 500.0)).is_none());
}

#[test]
fn hit_test_topmost_wins() {
    let mut doc = SceneDoc::new();
    doc.append(rect("below", 0.0, 0.0, 100.0, 100.0));
    doc.append(rect("above", 0.0, 0.0, 100.0, 100.0));
    let hit = hit_test(&doc, Point::new(50.0, 50.0));
    assert_eq!(hit.map(Element::id), Some("above"));
}

#[test]
fn hit_test_falls_through_to_lower_element() {
    let mut doc = SceneDoc::new();
    doc.append(rect("big", 0.0, 0.0, 100.0, 100.0));
    doc.append(rect("small", 0.0, 0.0, 10.0, 10.0));
    let hit = hit_test(&doc, Point::new(50.0, 50.0));
    assert_eq!(hit.map(Element::id), Some("big"));
}
