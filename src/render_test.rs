#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::doc::TextElement;

fn text(weight: &str, style: &str, size: f64) -> TextElement {
    TextElement {
        id: "t1".to_owned(),
        x: 0.0,
        y: 0.0,
        text: "hi".to_owned(),
        font_size: size,
        font_weight: weight.to_owned(),
        font_style: style.to_owned(),
        fill: "#1f2937".to_owned(),
        width: None,
        height: None,
    }
}

// =============================================================
// Font shorthand
// =============================================================

#[test]
fn font_string_plain() {
    assert_eq!(font_string(&text("normal", "normal", 18.0), 1.0), "18px Inter, sans-serif");
}

#[test]
fn font_string_bold_italic_order() {
    assert_eq!(
        font_string(&text("bold", "italic", 18.0), 1.0),
        "italic bold 18px Inter, sans-serif"
    );
    assert_eq!(font_string(&text("bold", "normal", 18.0), 1.0), "bold 18px Inter, sans-serif");
    assert_eq!(
        font_string(&text("normal", "italic", 18.0), 1.0),
        "italic 18px Inter, sans-serif"
    );
}

#[test]
fn font_string_applies_live_scale() {
    assert_eq!(font_string(&text("normal", "normal", 10.0), 2.0), "20px Inter, sans-serif");
}

#[test]
fn font_string_never_collapses_to_zero() {
    assert_eq!(font_string(&text("normal", "normal", 10.0), 0.0), "1px Inter, sans-serif");
}

// =============================================================
// Live transform scale
// =============================================================

#[test]
fn live_scale_identity_when_idle() {
    assert_eq!(live_scale(&GestureState::Idle, "r1"), (1.0, 1.0));
}

#[test]
fn live_scale_applies_only_to_target() {
    let gesture =
        GestureState::Transforming { id: "r1".to_owned(), scale_x: 2.0, scale_y: 3.0 };
    assert_eq!(live_scale(&gesture, "r1"), (2.0, 3.0));
    assert_eq!(live_scale(&gesture, "other"), (1.0, 1.0));
}
