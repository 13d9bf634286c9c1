//! Top-level engine: input handling, gesture dispatch, and side effects.
//!
//! [`EngineCore`] is the browser-free heart of the crate: it owns the scene
//! document, UI state, style state, and the gesture state machine, and every
//! input handler returns a `Vec<Action>` describing what the host (or the
//! browser wrapper) should do next. This keeps the core natively testable:
//! tests feed pointer and key events in and assert on the document and the
//! returned actions.
//!
//! [`Engine`] wraps the core for the browser. It owns the canvas renderer and
//! the localStorage slot, consumes `RenderNeeded`/`SaveNeeded` actions
//! itself, and hands everything else back to the host JS layer.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::consts::{
    DEFAULT_FONT_SIZE, EXPORT_JSON_FILENAME, EXPORT_PIXEL_RATIO, EXPORT_PNG_FILENAME,
    MIN_CIRCLE_RADIUS, MIN_DRAW_EXTENT, MIN_FONT_SIZE, MIN_RECT_EXTENT, TEXT_PLACEHOLDER,
};
use crate::doc::{
    CircleElement, Element, ElementId, LineElement, RectElement, SceneDoc, StrokeElement,
    TextElement,
};
use crate::editor::TextEditSession;
use crate::geom::Point;
use crate::hit;
use crate::ident::element_id;
use crate::input::{GestureState, Key, Modifiers, StyleState, Tool, UiState};
use crate::persist::{self, PersistError, WebStorage};
use crate::render::{CanvasRenderer, Renderer};

/// Side effects requested by the core for the host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The scene changed visually; redraw.
    RenderNeeded,
    /// The document mutated; persist it to the local slot.
    SaveNeeded,
    /// A freshly placed text element wants inline editing once it is on
    /// screen. The host mounts its overlay and calls `begin_text_edit`.
    EditTextRequested {
        /// Id of the text element to edit.
        id: ElementId,
    },
}

/// Core engine state and input handling, independent of the browser.
#[derive(Debug, Default)]
pub struct EngineCore {
    /// The scene document.
    pub doc: SceneDoc,
    /// Tool and selection state.
    pub ui: UiState,
    /// Style applied to newly created elements.
    pub style: StyleState,
    /// The in-flight pointer gesture.
    pub gesture: GestureState,
    /// The open inline text-edit session, if any.
    pub editing: Option<TextEditSession>,
}

impl EngineCore {
    /// Create an engine with an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine hydrated with a loaded element list.
    #[must_use]
    pub fn with_elements(elements: Vec<Element>) -> Self {
        Self { doc: SceneDoc::from_elements(elements), ..Self::default() }
    }

    // =============================================================
    // Queries
    // =============================================================

    /// The currently selected element id, validated against the document.
    /// A selection whose element has since been removed reads as `None`.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        let id = self.ui.selected_id.as_deref()?;
        self.doc.find(id).map(Element::id)
    }

    /// Whether an inline text-edit session is open.
    #[must_use]
    pub fn is_editing_text(&self) -> bool {
        self.editing.is_some()
    }

    /// The open edit session, for the host's overlay to read.
    #[must_use]
    pub fn editing(&self) -> Option<&TextEditSession> {
        self.editing.as_ref()
    }

    /// Mutable access to the open edit session's draft, for the host's
    /// overlay controls (textarea, bold/italic toggles, size stepper).
    pub fn editing_mut(&mut self) -> Option<&mut TextEditSession> {
        self.editing.as_mut()
    }

    // =============================================================
    // Tool and style
    // =============================================================

    /// Switch the active tool. Does not disturb the selection.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    /// Set the stroke/text color applied to new elements.
    pub fn set_color(&mut self, color: &str) {
        self.style.color = color.to_owned();
    }

    /// Set the stroke width applied to new elements, floored at 1.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.style.stroke_width = width.max(1.0);
    }

    // =============================================================
    // Pointer events
    // =============================================================

    /// Handle pointer-down at `pt`.
    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        let mut actions = Vec::new();

        // An open text edit loses focus to any pointer-down; commit it first.
        if self.editing.is_some() {
            actions.extend(self.commit_text_edit());
        }

        let hit_id = hit::hit_test(&self.doc, pt).map(|el| el.id().to_owned());
        if hit_id.is_none() && self.ui.selected_id.take().is_some() {
            actions.push(Action::RenderNeeded);
        }

        match self.ui.tool {
            Tool::Select => {
                if let Some(id) = hit_id {
                    self.select_and_maybe_drag(id, pt, &mut actions);
                }
            }
            Tool::Pen => {
                self.doc.append(Element::Stroke(StrokeElement {
                    id: element_id("stroke"),
                    points: vec![pt.x, pt.y],
                    color: self.style.color.clone(),
                    width: self.style.stroke_width,
                }));
                self.gesture = GestureState::Drawing;
                actions.push(Action::RenderNeeded);
                actions.push(Action::SaveNeeded);
            }
            Tool::Rect => {
                let id = element_id("rect");
                self.doc.append(Element::Rect(RectElement {
                    id: id.clone(),
                    x: pt.x,
                    y: pt.y,
                    width: MIN_DRAW_EXTENT,
                    height: MIN_DRAW_EXTENT,
                    stroke: self.style.color.clone(),
                    stroke_width: self.style.stroke_width,
                    fill: None,
                }));
                self.ui.selected_id = Some(id);
                self.gesture = GestureState::Drawing;
                actions.push(Action::RenderNeeded);
                actions.push(Action::SaveNeeded);
            }
            Tool::Circle => {
                let id = element_id("circle");
                self.doc.append(Element::Circle(CircleElement {
                    id: id.clone(),
                    x: pt.x,
                    y: pt.y,
                    radius: MIN_DRAW_EXTENT,
                    stroke: self.style.color.clone(),
                    stroke_width: self.style.stroke_width,
                    fill: None,
                }));
                self.ui.selected_id = Some(id);
                self.gesture = GestureState::Drawing;
                actions.push(Action::RenderNeeded);
                actions.push(Action::SaveNeeded);
            }
            Tool::Line => {
                let id = element_id("line");
                self.doc.append(Element::Line(LineElement {
                    id: id.clone(),
                    x1: pt.x,
                    y1: pt.y,
                    x2: pt.x,
                    y2: pt.y,
                    stroke: self.style.color.clone(),
                    stroke_width: self.style.stroke_width,
                }));
                self.ui.selected_id = Some(id);
                self.gesture = GestureState::Drawing;
                actions.push(Action::RenderNeeded);
                actions.push(Action::SaveNeeded);
            }
            Tool::Text => {
                let id = element_id("text");
                self.doc.append(Element::Text(TextElement {
                    id: id.clone(),
                    x: pt.x,
                    y: pt.y,
                    text: TEXT_PLACEHOLDER.to_owned(),
                    font_size: DEFAULT_FONT_SIZE,
                    font_weight: "normal".to_owned(),
                    font_style: "normal".to_owned(),
                    fill: self.style.color.clone(),
                    width: None,
                    height: None,
                }));
                self.ui.selected_id = Some(id.clone());
                actions.push(Action::RenderNeeded);
                actions.push(Action::SaveNeeded);
                actions.push(Action::EditTextRequested { id });
            }
            Tool::Eraser => {
                if let Some(id) = hit_id {
                    self.doc.remove(&id);
                    self.ui.selected_id = None;
                    actions.push(Action::RenderNeeded);
                    actions.push(Action::SaveNeeded);
                }
            }
        }

        actions
    }

    /// Handle pointer-move at `pt`.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        match self.gesture.clone() {
            GestureState::Idle | GestureState::Transforming { .. } => Vec::new(),
            GestureState::Drawing => {
                if self.doc.update_last(|el| size_to(el, pt)) {
                    vec![Action::RenderNeeded, Action::SaveNeeded]
                } else {
                    Vec::new()
                }
            }
            GestureState::Dragging { id, last, moved } => {
                let dx = pt.x - last.x;
                let dy = pt.y - last.y;
                let translated = self.doc.update(&id, |el| {
                    el.translate_by(dx, dy);
                });
                if !translated {
                    // Target vanished mid-gesture; nothing left to drag.
                    self.gesture = GestureState::Idle;
                    return Vec::new();
                }
                let did_move = moved || dx.abs() + dy.abs() > 0.0;
                self.gesture = GestureState::Dragging { id, last: pt, moved: did_move };
                vec![Action::RenderNeeded, Action::SaveNeeded]
            }
        }
    }

    /// Handle pointer-up at `pt`.
    pub fn on_pointer_up(&mut self, _pt: Point) -> Vec<Action> {
        match self.gesture.clone() {
            GestureState::Idle | GestureState::Transforming { .. } => Vec::new(),
            GestureState::Drawing => {
                self.gesture = GestureState::Idle;
                Vec::new()
            }
            GestureState::Dragging { moved, .. } => {
                self.gesture = GestureState::Idle;
                if moved { vec![Action::SaveNeeded] } else { Vec::new() }
            }
        }
    }

    /// Handle a double-click at `pt`: open inline editing on a text element.
    pub fn on_double_click(&mut self, pt: Point) -> Vec<Action> {
        let session = match hit::hit_test(&self.doc, pt) {
            Some(Element::Text(t)) => TextEditSession::open(t),
            _ => return Vec::new(),
        };
        self.ui.selected_id = Some(session.id.clone());
        self.editing = Some(session);
        vec![Action::RenderNeeded]
    }

    fn select_and_maybe_drag(&mut self, id: ElementId, pt: Point, actions: &mut Vec<Action>) {
        let changed = self.ui.selected_id.as_deref() != Some(id.as_str());
        self.ui.selected_id = Some(id.clone());
        // Strokes select but are not draggable (absolute points).
        let draggable = self.doc.find(&id).is_some_and(|el| !el.is_stroke());
        if draggable {
            self.gesture = GestureState::Dragging { id, last: pt, moved: false };
        }
        if changed {
            actions.push(Action::RenderNeeded);
        }
    }

    // =============================================================
    // Transform gesture (resize via host handles)
    // =============================================================

    /// Begin a resize on `id`. Returns `false` when the element is missing
    /// or has no transform handles (strokes and lines).
    pub fn begin_transform(&mut self, id: &str) -> bool {
        let resizable = matches!(
            self.doc.find(id),
            Some(Element::Rect(_) | Element::Circle(_) | Element::Text(_))
        );
        if !resizable {
            return false;
        }
        self.ui.selected_id = Some(id.to_owned());
        self.gesture =
            GestureState::Transforming { id: id.to_owned(), scale_x: 1.0, scale_y: 1.0 };
        true
    }

    /// Update the live scale factors of the active transform.
    pub fn set_transform_scale(&mut self, sx: f64, sy: f64) -> Vec<Action> {
        if let GestureState::Transforming { scale_x, scale_y, .. } = &mut self.gesture {
            *scale_x = sx;
            *scale_y = sy;
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// End the transform: bake the applied scale into the element's stored
    /// size fields (with per-kind floors) and reset the visual scale to
    /// identity.
    pub fn end_transform(&mut self) -> Vec<Action> {
        let GestureState::Transforming { id, scale_x, scale_y } = self.gesture.clone() else {
            return Vec::new();
        };
        self.gesture = GestureState::Idle;
        if self.doc.update(&id, |el| bake_scale(el, scale_x, scale_y)) {
            vec![Action::RenderNeeded, Action::SaveNeeded]
        } else {
            vec![Action::RenderNeeded]
        }
    }

    // =============================================================
    // Text editing
    // =============================================================

    /// Open inline editing on a text element by id (the follow-up to
    /// [`Action::EditTextRequested`]). Returns `false` for missing or
    /// non-text targets.
    pub fn begin_text_edit(&mut self, id: &str) -> bool {
        let session = match self.doc.find(id) {
            Some(Element::Text(t)) => TextEditSession::open(t),
            _ => return false,
        };
        self.ui.selected_id = Some(session.id.clone());
        self.editing = Some(session);
        true
    }

    /// Commit the open edit session into the document and close it.
    pub fn commit_text_edit(&mut self) -> Vec<Action> {
        let Some(session) = self.editing.take() else {
            return Vec::new();
        };
        if session.commit(&mut self.doc) {
            vec![Action::RenderNeeded, Action::SaveNeeded]
        } else {
            // Target vanished while editing; just drop the overlay.
            vec![Action::RenderNeeded]
        }
    }

    /// Discard the open edit session without touching the document.
    pub fn cancel_text_edit(&mut self) -> Vec<Action> {
        if self.editing.take().is_some() {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // =============================================================
    // Keyboard
    // =============================================================

    /// Handle a key-down event.
    pub fn on_key_down(&mut self, key: &Key, mods: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            "Escape" => {
                if self.editing.is_some() {
                    return self.cancel_text_edit();
                }
                self.gesture = GestureState::Idle;
                if self.ui.selected_id.take().is_some() {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            // While the overlay textarea has focus these keys edit text,
            // not the board.
            "Delete" | "Backspace" if !self.is_editing_text() => self.delete_selection(),
            "z" | "Z" if mods.primary() => self.undo(),
            "s" | "S" if mods.primary() => vec![Action::SaveNeeded],
            _ => Vec::new(),
        }
    }

    /// Remove the selected element and clear the selection. A selection of
    /// a since-removed element is a no-op.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        let Some(id) = self.selection().map(ToOwned::to_owned) else {
            return Vec::new();
        };
        self.doc.remove(&id);
        self.ui.selected_id = None;
        vec![Action::RenderNeeded, Action::SaveNeeded]
    }

    /// Single-level undo: drop the most recently appended element, whatever
    /// the last input actually was. Never errors on an empty document. Any
    /// active gesture is reset so it cannot keep mutating a popped element.
    pub fn undo(&mut self) -> Vec<Action> {
        self.gesture = GestureState::Idle;
        if self.doc.pop_last().is_some() {
            vec![Action::RenderNeeded, Action::SaveNeeded]
        } else {
            Vec::new()
        }
    }

    // =============================================================
    // Import
    // =============================================================

    /// Replace the whole document with an imported element list. Callers
    /// validate the file first; a parse failure never reaches this point, so
    /// a failed import leaves the prior document untouched.
    pub fn import(&mut self, elements: Vec<Element>) -> Vec<Action> {
        self.doc.replace_all(elements);
        self.ui.selected_id = None;
        self.gesture = GestureState::Idle;
        self.editing = None;
        vec![Action::RenderNeeded, Action::SaveNeeded]
    }
}

/// Apply a drag-to-size pointer position to the in-progress element.
fn size_to(el: &mut Element, pt: Point) {
    match el {
        Element::Stroke(s) => {
            s.points.push(pt.x);
            s.points.push(pt.y);
        }
        Element::Rect(r) => {
            r.width = (pt.x - r.x).max(MIN_DRAW_EXTENT);
            r.height = (pt.y - r.y).max(MIN_DRAW_EXTENT);
        }
        Element::Circle(c) => {
            c.radius = Point::new(c.x, c.y).distance_to(pt).max(MIN_DRAW_EXTENT);
        }
        Element::Line(l) => {
            l.x2 = pt.x;
            l.y2 = pt.y;
        }
        Element::Text(_) => {}
    }
}

/// Bake transform scale factors into an element's stored size fields.
/// Strokes and lines have no transform handles and do not bake.
fn bake_scale(el: &mut Element, sx: f64, sy: f64) {
    match el {
        Element::Rect(r) => {
            r.width = (r.width * sx).max(MIN_RECT_EXTENT);
            r.height = (r.height * sy).max(MIN_RECT_EXTENT);
        }
        Element::Circle(c) => {
            c.radius = (c.radius * sx.max(sy)).max(MIN_CIRCLE_RADIUS);
        }
        Element::Text(t) => {
            t.font_size = (t.font_size * sy).max(MIN_FONT_SIZE);
        }
        Element::Stroke(_) | Element::Line(_) => {}
    }
}

/// Browser engine: the core plus its renderer and storage slot.
///
/// Consumes `RenderNeeded` and `SaveNeeded` actions itself; anything else
/// (currently only `EditTextRequested`) is returned for the host to handle.
pub struct Engine {
    renderer: CanvasRenderer,
    store: WebStorage,
    /// The wrapped core, exposed for host queries.
    pub core: EngineCore,
}

impl Engine {
    /// Bind to a canvas element and hydrate from the saved local slot.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no usable 2D context.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let renderer = CanvasRenderer::new(canvas)?;
        let store = WebStorage::new();
        let elements = persist::load_local(&store).unwrap_or_default();
        Ok(Self { renderer, store, core: EngineCore::with_elements(elements) })
    }

    /// Run renderer and persistence side effects; hand the rest to the host.
    fn dispatch(&mut self, actions: Vec<Action>) -> Result<Vec<Action>, JsValue> {
        let mut for_host = Vec::new();
        let mut render = false;
        let mut save = false;
        for action in actions {
            match action {
                Action::RenderNeeded => render = true,
                Action::SaveNeeded => save = true,
                other => for_host.push(other),
            }
        }
        if save {
            // Auto-save is fire-and-forget; a failed write must not break
            // the input path.
            if let Err(err) = persist::save_local(&self.store, self.core.doc.elements()) {
                log::warn!("auto-save failed: {err}");
            }
        }
        if render {
            self.render()?;
        }
        Ok(for_host)
    }

    /// Draw the current scene.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.renderer.draw(&self.core.doc, &self.core.ui, &self.core.gesture)
    }

    /// Handle pointer-down at canvas coordinates.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a resulting redraw fails.
    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.on_pointer_down(Point::new(x, y));
        self.dispatch(actions)
    }

    /// Handle pointer-move at canvas coordinates.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a resulting redraw fails.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.on_pointer_move(Point::new(x, y));
        self.dispatch(actions)
    }

    /// Handle pointer-up at canvas coordinates.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a resulting redraw fails.
    pub fn on_pointer_up(&mut self, x: f64, y: f64) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.on_pointer_up(Point::new(x, y));
        self.dispatch(actions)
    }

    /// Handle a double-click at canvas coordinates.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a resulting redraw fails.
    pub fn on_double_click(&mut self, x: f64, y: f64) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.on_double_click(Point::new(x, y));
        self.dispatch(actions)
    }

    /// Handle a key-down event with the browser's key name.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a resulting redraw fails.
    pub fn on_key_down(&mut self, key: &str, mods: Modifiers) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.on_key_down(&Key(key.to_owned()), mods);
        self.dispatch(actions)
    }

    /// End the active transform gesture and bake its scale.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a resulting redraw fails.
    pub fn end_transform(&mut self) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.end_transform();
        self.dispatch(actions)
    }

    /// Commit the open inline text edit.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a resulting redraw fails.
    pub fn commit_text_edit(&mut self) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.commit_text_edit();
        self.dispatch(actions)
    }

    /// Cancel the open inline text edit.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a resulting redraw fails.
    pub fn cancel_text_edit(&mut self) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.cancel_text_edit();
        self.dispatch(actions)
    }

    /// Force a persistence write (the explicit save shortcut path).
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization or the storage write fails.
    pub fn save(&self) -> Result<(), PersistError> {
        persist::save_local(&self.store, self.core.doc.elements())
    }

    /// Serialize the board and trigger a JSON file download.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization or the download glue fails.
    pub fn export_json(&self) -> Result<(), JsValue> {
        let json = persist::to_pretty_json(self.core.doc.elements())
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        persist::download_text(EXPORT_JSON_FILENAME, &json, "application/json")
    }

    /// Rasterize the board and trigger a PNG file download.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the offscreen rasterization or download glue fails.
    pub fn export_png(&self) -> Result<(), JsValue> {
        let url = self.renderer.to_png_data_url(&self.core.doc, EXPORT_PIXEL_RATIO)?;
        persist::download_url(EXPORT_PNG_FILENAME, &url)
    }

    /// Read a user-selected file and import it, replacing the board. On any
    /// failure the prior document is untouched and the error is returned for
    /// the host to surface.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be read or is not a board document.
    pub async fn import_file(&mut self, file: web_sys::File) -> Result<(), PersistError> {
        let text = persist::read_file_text(&file).await?;
        let elements = persist::parse_board(&text)?;
        let actions = self.core.import(elements);
        if let Err(err) = self.dispatch(actions) {
            log::warn!("redraw after import failed: {err:?}");
        }
        Ok(())
    }
}
