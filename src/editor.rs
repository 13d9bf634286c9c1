//! Inline text editing.
//!
//! Editing happens in a host-owned overlay (a floating textarea) while the
//! engine holds a `TextEditSession`: a draft of the element's content and
//! style that only touches the document on commit. Cancel discards the draft
//! and the element is left exactly as it was.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use crate::consts::MIN_FONT_SIZE;
use crate::doc::{Element, ElementId, SceneDoc, TextElement};
use crate::hit::{Bounds, text_bounds};

/// Editable snapshot of a text element's content and style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraft {
    /// Draft text content.
    pub text: String,
    /// Draft font size in pixels.
    pub font_size: f64,
    /// Whether the bold toggle is on.
    pub bold: bool,
    /// Whether the italic toggle is on.
    pub italic: bool,
    /// Draft glyph color as a CSS color string.
    pub fill: String,
}

/// An open inline-edit session for one text element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditSession {
    /// Id of the element being edited.
    pub id: ElementId,
    /// The draft the host's overlay mutates.
    pub draft: TextDraft,
}

impl TextEditSession {
    /// Open a session pre-filled from the target element.
    #[must_use]
    pub fn open(element: &TextElement) -> Self {
        Self {
            id: element.id.clone(),
            draft: TextDraft {
                text: element.text.clone(),
                font_size: element.font_size,
                bold: element.font_weight == "bold",
                italic: element.font_style == "italic",
                fill: element.fill.clone(),
            },
        }
    }

    /// Where the host should place the overlay textarea, in canvas pixels.
    /// `None` when the target element no longer exists or changed kind.
    #[must_use]
    pub fn overlay_bounds(&self, doc: &SceneDoc) -> Option<Bounds> {
        match doc.find(&self.id)? {
            Element::Text(t) => Some(text_bounds(t)),
            _ => None,
        }
    }

    /// Write the draft back into the document. The font size is floored at
    /// the minimum. Returns `false` when the target no longer exists, which
    /// callers treat as nothing left to commit.
    pub fn commit(&self, doc: &mut SceneDoc) -> bool {
        let Some(Element::Text(current)) = doc.find(&self.id) else {
            return false;
        };
        let updated = TextElement {
            text: self.draft.text.clone(),
            font_size: self.draft.font_size.max(MIN_FONT_SIZE),
            font_weight: if self.draft.bold { "bold" } else { "normal" }.to_owned(),
            font_style: if self.draft.italic { "italic" } else { "normal" }.to_owned(),
            fill: self.draft.fill.clone(),
            ..current.clone()
        };
        doc.replace(&self.id, Element::Text(updated))
    }
}
