//! Document model: board element types and the ordered scene document.
//!
//! This module defines the core data types that describe what is on the board
//! (`Element` and its per-kind structs) and the runtime container that owns
//! all live elements (`SceneDoc`). Elements serialize with an internal
//! `"type"` tag and camelCase field names so saved documents interchange with
//! boards exported by earlier versions of the app.
//!
//! Data flows into this layer from persistence (JSON deserialization) and
//! from the input engine (mutations). The renderer reads `elements()` in
//! order; element order is z-order and appends always land on top.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COLOR, DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH};

/// Unique identifier for a board element (prefixed string, see [`crate::ident`]).
pub type ElementId = String;

fn default_stroke_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

fn default_font_variant() -> String {
    "normal".to_owned()
}

fn default_text_fill() -> String {
    DEFAULT_COLOR.to_owned()
}

/// Freehand polyline accumulated from pointer positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeElement {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Flat `[x0, y0, x1, y1, ...]` coordinate pairs in absolute pixels.
    pub points: Vec<f64>,
    /// Stroke color as a CSS color string.
    pub color: String,
    /// Stroke width in pixels.
    #[serde(default = "default_stroke_width")]
    pub width: f64,
}

/// Axis-aligned rectangle positioned by its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectElement {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Outline color as a CSS color string.
    pub stroke: String,
    /// Outline width in pixels.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Interior fill color; transparent when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

/// Circle positioned by its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleElement {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Center x in pixels.
    pub x: f64,
    /// Center y in pixels.
    pub y: f64,
    /// Radius in pixels.
    pub radius: f64,
    /// Outline color as a CSS color string.
    pub stroke: String,
    /// Outline width in pixels.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Interior fill color; transparent when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

/// Straight segment between two endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// First endpoint x in pixels.
    pub x1: f64,
    /// First endpoint y in pixels.
    pub y1: f64,
    /// Second endpoint x in pixels.
    pub x2: f64,
    /// Second endpoint y in pixels.
    pub y2: f64,
    /// Stroke color as a CSS color string.
    pub stroke: String,
    /// Stroke width in pixels.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

/// Positioned text block with inline-editable content and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Text content; may span multiple lines.
    pub text: String,
    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// `"normal"` or `"bold"`.
    #[serde(default = "default_font_variant")]
    pub font_weight: String,
    /// `"normal"` or `"italic"`.
    #[serde(default = "default_font_variant")]
    pub font_style: String,
    /// Glyph fill color as a CSS color string.
    #[serde(default = "default_text_fill")]
    pub fill: String,
    /// Fixed box width, when the element has been given one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Fixed box height, when the element has been given one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// A drawable board element. The `type` field discriminates on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// Freehand pen stroke.
    Stroke(StrokeElement),
    /// Axis-aligned rectangle.
    Rect(RectElement),
    /// Circle positioned by center.
    Circle(CircleElement),
    /// Straight line segment.
    Line(LineElement),
    /// Text block.
    Text(TextElement),
}

impl Element {
    /// The element's unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Stroke(e) => &e.id,
            Self::Rect(e) => &e.id,
            Self::Circle(e) => &e.id,
            Self::Line(e) => &e.id,
            Self::Text(e) => &e.id,
        }
    }

    /// Wire discriminator; also used as the prefix for new ids.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stroke(_) => "stroke",
            Self::Rect(_) => "rect",
            Self::Circle(_) => "circle",
            Self::Line(_) => "line",
            Self::Text(_) => "text",
        }
    }

    /// Whether this is a freehand stroke.
    #[must_use]
    pub fn is_stroke(&self) -> bool {
        matches!(self, Self::Stroke(_))
    }

    /// Whether this is a text block.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Translate the element by a delta. Strokes store absolute points and
    /// are not draggable; they refuse and report `false`.
    pub fn translate_by(&mut self, dx: f64, dy: f64) -> bool {
        match self {
            Self::Stroke(_) => false,
            Self::Rect(r) => {
                r.x += dx;
                r.y += dy;
                true
            }
            Self::Circle(c) => {
                c.x += dx;
                c.y += dy;
                true
            }
            Self::Line(l) => {
                l.x1 += dx;
                l.y1 += dy;
                l.x2 += dx;
                l.y2 += dy;
                true
            }
            Self::Text(t) => {
                t.x += dx;
                t.y += dy;
                true
            }
        }
    }
}

/// Ordered scene document.
///
/// Element order is z-order: earlier elements draw beneath later ones, and
/// appends always land on top. A monotonically increasing revision counter
/// is bumped by every mutation so callers can tell at a glance whether the
/// scene changed since they last looked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDoc {
    elements: Vec<Element>,
    revision: u64,
}

impl SceneDoc {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a loaded element list.
    #[must_use]
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let mut doc = Self::new();
        doc.replace_all(elements);
        doc
    }

    /// Append an element on top. If an element with the same id already
    /// exists it is replaced in place, keeping its z-position.
    pub fn append(&mut self, element: Element) {
        self.revision += 1;
        if let Some(slot) = self.elements.iter_mut().find(|e| e.id() == element.id()) {
            *slot = element;
        } else {
            self.elements.push(element);
        }
    }

    /// Mutate the most recently appended element. Returns `false` on an
    /// empty document.
    pub fn update_last(&mut self, mutate: impl FnOnce(&mut Element)) -> bool {
        let Some(last) = self.elements.last_mut() else {
            return false;
        };
        mutate(last);
        self.revision += 1;
        true
    }

    /// Mutate an element by id. Returns `false` if the id is absent.
    pub fn update(&mut self, id: &str, mutate: impl FnOnce(&mut Element)) -> bool {
        let Some(slot) = self.elements.iter_mut().find(|e| e.id() == id) else {
            return false;
        };
        mutate(slot);
        self.revision += 1;
        true
    }

    /// Swap in a replacement for `id`, keeping its z-position. Returns
    /// `false` if the id is absent.
    pub fn replace(&mut self, id: &str, element: Element) -> bool {
        let Some(slot) = self.elements.iter_mut().find(|e| e.id() == id) else {
            return false;
        };
        *slot = element;
        self.revision += 1;
        true
    }

    /// Remove an element by id, returning it if it was present. Removing a
    /// missing id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let idx = self.elements.iter().position(|e| e.id() == id)?;
        self.revision += 1;
        Some(self.elements.remove(idx))
    }

    /// Remove and return the most recently appended element.
    pub fn pop_last(&mut self) -> Option<Element> {
        let popped = self.elements.pop()?;
        self.revision += 1;
        Some(popped)
    }

    /// Replace the whole document with a new element list. Duplicate ids
    /// within the list collapse to the last occurrence via the append rule.
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        self.elements.clear();
        self.revision += 1;
        for element in elements {
            self.append(element);
        }
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// All elements in draw order (bottom to top).
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of elements currently in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the document contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Mutation counter; bumped by every change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
