#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn default_tool_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn drawing_tools_classified() {
    let cases = [
        (Tool::Select, false),
        (Tool::Pen, true),
        (Tool::Rect, true),
        (Tool::Circle, true),
        (Tool::Line, true),
        (Tool::Text, false),
        (Tool::Eraser, false),
    ];
    for (tool, draws) in cases {
        assert_eq!(tool.draws(), draws, "{tool:?}");
    }
}

#[test]
fn tool_clone_and_copy() {
    let a = Tool::Pen;
    let b = a;
    let c = a.clone();
    assert_eq!(a, b);
    assert_eq!(a, c);
}

// =============================================================
// Modifiers
// =============================================================

#[test]
fn default_modifiers_are_clear() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
    assert!(!m.primary());
}

#[test]
fn primary_is_ctrl_or_meta() {
    assert!(Modifiers { ctrl: true, ..Modifiers::default() }.primary());
    assert!(Modifiers { meta: true, ..Modifiers::default() }.primary());
    assert!(!Modifiers { shift: true, alt: true, ..Modifiers::default() }.primary());
}

// =============================================================
// Key
// =============================================================

#[test]
fn key_equality() {
    assert_eq!(Key("Delete".to_owned()), Key("Delete".to_owned()));
    assert_ne!(Key("z".to_owned()), Key("Z".to_owned()));
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn ui_state_defaults() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Select);
    assert_eq!(ui.selected_id, None);
}

#[test]
fn style_state_defaults() {
    let style = StyleState::default();
    assert_eq!(style.color, "#1f2937");
    assert_eq!(style.stroke_width, 4.0);
}

#[test]
fn gesture_default_is_idle() {
    assert_eq!(GestureState::default(), GestureState::Idle);
}
