//! Input model: tools, modifier keys, style state, and the gesture state machine.
//!
//! This module defines the types consumed by the input engine. `Tool` and
//! `Modifiers` capture the user's intent at the time of a pointer event.
//! `GestureState` is the active gesture being tracked between pointer-down
//! and pointer-up, carrying all context needed to compute incremental deltas
//! and decide what to commit on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::{DEFAULT_COLOR, DEFAULT_DRAW_WIDTH};
use crate::doc::ElementId;
use crate::geom::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Freehand pen strokes.
    Pen,
    /// Draw a rectangle.
    Rect,
    /// Draw a circle.
    Circle,
    /// Draw a straight line segment.
    Line,
    /// Place an editable text block.
    Text,
    /// Click an element to remove it.
    Eraser,
}

impl Tool {
    /// Whether pointer-down with this tool starts a drag-to-size gesture.
    #[must_use]
    pub fn draws(self) -> bool {
        matches!(self, Self::Pen | Self::Rect | Self::Circle | Self::Line)
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// The platform shortcut modifier: Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub fn primary(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g.
/// `"Delete"`, `"Escape"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The id of the currently selected element, if any. May briefly outlive
    /// a deletion; readers validate liveness against the document.
    pub selected_id: Option<ElementId>,
}

/// Active style applied to newly created elements.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleState {
    /// Stroke (and text fill) color as a CSS color string.
    pub color: String,
    /// Stroke width in pixels for pen, shapes, and lines.
    pub stroke_width: f64,
}

impl Default for StyleState {
    fn default() -> Self {
        Self { color: DEFAULT_COLOR.to_owned(), stroke_width: DEFAULT_DRAW_WIDTH }
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas and
/// decide what to commit on release.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// The user is sizing the most recently appended element (pen stroke or
    /// drag-to-size shape).
    Drawing,
    /// The user is moving an existing element across the board.
    Dragging {
        /// Id of the element being dragged.
        id: ElementId,
        /// Pointer position at the previous event, used to compute the delta.
        last: Point,
        /// Whether any nonzero delta has been applied yet.
        moved: bool,
    },
    /// A resize is in progress; the scale factors are baked into the
    /// element's size fields when the gesture ends.
    Transforming {
        /// Id of the element being resized.
        id: ElementId,
        /// Live horizontal scale factor relative to the element's stored size.
        scale_x: f64,
        /// Live vertical scale factor relative to the element's stored size.
        scale_y: f64,
    },
}

impl Default for GestureState {
    fn default() -> Self {
        Self::Idle
    }
}
