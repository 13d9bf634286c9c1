#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

#[test]
fn distance_between_points() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert_eq!(a.distance_to(b), 5.0);
    assert_eq!(b.distance_to(a), 5.0);
}

#[test]
fn distance_to_self_is_zero() {
    let p = Point::new(7.5, -2.0);
    assert_eq!(p.distance_to(p), 0.0);
}

#[test]
fn segment_distance_perpendicular() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    assert_eq!(segment_distance(Point::new(5.0, 3.0), a, b), 3.0);
}

#[test]
fn segment_distance_clamps_to_endpoints() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    // Beyond b: distance is to b itself, not the infinite line.
    assert_eq!(segment_distance(Point::new(13.0, 4.0), a, b), 5.0);
    // Before a.
    assert_eq!(segment_distance(Point::new(-3.0, 4.0), a, b), 5.0);
}

#[test]
fn segment_distance_degenerate_segment() {
    let a = Point::new(2.0, 2.0);
    assert_eq!(segment_distance(Point::new(5.0, 6.0), a, a), 5.0);
}

#[test]
fn point_on_segment_is_zero() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 10.0);
    assert!(segment_distance(Point::new(5.0, 5.0), a, b) < 1e-9);
}
