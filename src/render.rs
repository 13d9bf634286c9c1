//! Rendering: draws the full board scene to a 2D context.
//!
//! The interaction engine never touches a drawing API; it emits
//! `RenderNeeded` actions and a [`Renderer`] turns the document into pixels.
//! [`CanvasRenderer`] is the browser backend on
//! [`web_sys::CanvasRenderingContext2d`]; the trait keeps the seam narrow so
//! an alternative backend (or a recording renderer in tests) can slot in.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::TEXT_LINE_HEIGHT_RATIO;
use crate::doc::{
    CircleElement, Element, LineElement, RectElement, SceneDoc, StrokeElement, TextElement,
};
use crate::hit;
use crate::input::{GestureState, UiState};

/// Selection dash segment length in pixels.
const SELECTION_DASH_PX: f64 = 4.0;

/// Half-size of a square resize handle in pixels.
const HANDLE_HALF_PX: f64 = 4.0;

/// Padding between an element's bounds and its selection box.
const SELECTION_PAD_PX: f64 = 4.0;

/// Selection accent color.
const SELECTION_COLOR: &str = "#1E90FF";

/// Drawing backend seam: anything that can draw a scene.
pub trait Renderer {
    /// Backend-specific failure type.
    type Error;

    /// Draw the whole scene, including selection UI.
    fn draw(
        &mut self,
        doc: &SceneDoc,
        ui: &UiState,
        gesture: &GestureState,
    ) -> Result<(), Self::Error>;
}

/// Canvas2D renderer bound to one `<canvas>` element.
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Bind to a canvas element's 2D context.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element has no usable 2D context.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = context_2d(canvas)?;
        Ok(Self { canvas: canvas.clone(), ctx })
    }

    /// Rasterize the scene to a PNG data URL at `pixel_ratio`x supersampling,
    /// using an offscreen canvas so the visible one keeps its selection UI.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the offscreen canvas cannot be created or drawn to.
    pub fn to_png_data_url(&self, doc: &SceneDoc, pixel_ratio: f64) -> Result<String, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let offscreen: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;

        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            offscreen.set_width((width * pixel_ratio) as u32);
            offscreen.set_height((height * pixel_ratio) as u32);
        }

        let scratch = context_2d(&offscreen)?;
        scratch.scale(pixel_ratio, pixel_ratio)?;
        scratch.clear_rect(0.0, 0.0, width, height);
        for el in doc.elements() {
            draw_element(&scratch, el, (1.0, 1.0))?;
        }
        offscreen.to_data_url_with_type("image/png")
    }
}

impl Renderer for CanvasRenderer {
    type Error = JsValue;

    fn draw(
        &mut self,
        doc: &SceneDoc,
        ui: &UiState,
        gesture: &GestureState,
    ) -> Result<(), JsValue> {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());

        // Layer 1: clear.
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx.clear_rect(0.0, 0.0, width, height);

        // Layer 2: elements in z-order (bottom first).
        for el in doc.elements() {
            draw_element(&self.ctx, el, live_scale(gesture, el.id()))?;
        }

        // Layer 3: selection UI.
        if let Some(selected) = ui.selected_id.as_deref().and_then(|id| doc.find(id)) {
            draw_selection(&self.ctx, selected)?;
        }

        Ok(())
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into()
        .map_err(|_| JsValue::from_str("2d context has unexpected type"))
}

/// The live scale of the element mid-transform, identity otherwise.
fn live_scale(gesture: &GestureState, id: &str) -> (f64, f64) {
    match gesture {
        GestureState::Transforming { id: target, scale_x, scale_y } if target == id => {
            (*scale_x, *scale_y)
        }
        _ => (1.0, 1.0),
    }
}

// =============================================================
// Element dispatch
// =============================================================

fn draw_element(
    ctx: &CanvasRenderingContext2d,
    el: &Element,
    scale: (f64, f64),
) -> Result<(), JsValue> {
    match el {
        Element::Stroke(s) => draw_stroke(ctx, s),
        Element::Rect(r) => draw_rect(ctx, r, scale),
        Element::Circle(c) => draw_circle(ctx, c, scale),
        Element::Line(l) => draw_line(ctx, l),
        Element::Text(t) => draw_text(ctx, t, scale),
    }
}

// =============================================================
// Element renderers
// =============================================================

fn draw_stroke(ctx: &CanvasRenderingContext2d, s: &StrokeElement) -> Result<(), JsValue> {
    let mut pairs = s.points.chunks_exact(2);
    let Some(first) = pairs.next() else {
        return Ok(());
    };

    ctx.save();
    ctx.set_stroke_style_str(&s.color);
    ctx.set_line_width(s.width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    ctx.begin_path();
    ctx.move_to(first[0], first[1]);
    for pair in pairs {
        ctx.line_to(pair[0], pair[1]);
    }
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_rect(
    ctx: &CanvasRenderingContext2d,
    r: &RectElement,
    (sx, sy): (f64, f64),
) -> Result<(), JsValue> {
    let width = r.width * sx;
    let height = r.height * sy;

    ctx.save();
    if let Some(fill) = &r.fill {
        ctx.set_fill_style_str(fill);
        ctx.fill_rect(r.x, r.y, width, height);
    }
    ctx.set_stroke_style_str(&r.stroke);
    ctx.set_line_width(r.stroke_width);
    ctx.stroke_rect(r.x, r.y, width, height);
    ctx.restore();
    Ok(())
}

fn draw_circle(
    ctx: &CanvasRenderingContext2d,
    c: &CircleElement,
    (sx, sy): (f64, f64),
) -> Result<(), JsValue> {
    let radius = c.radius * sx.max(sy);
    if radius <= 0.0 {
        return Ok(());
    }

    ctx.save();
    ctx.begin_path();
    ctx.arc(c.x, c.y, radius, 0.0, 2.0 * PI)?;
    if let Some(fill) = &c.fill {
        ctx.set_fill_style_str(fill);
        ctx.fill();
    }
    ctx.set_stroke_style_str(&c.stroke);
    ctx.set_line_width(c.stroke_width);
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_line(ctx: &CanvasRenderingContext2d, l: &LineElement) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(&l.stroke);
    ctx.set_line_width(l.stroke_width);
    ctx.set_line_cap("round");

    ctx.begin_path();
    ctx.move_to(l.x1, l.y1);
    ctx.line_to(l.x2, l.y2);
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_text(
    ctx: &CanvasRenderingContext2d,
    t: &TextElement,
    (_, sy): (f64, f64),
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str(&t.fill);
    ctx.set_text_baseline("top");
    ctx.set_font(&font_string(t, sy));

    let line_height = t.font_size * sy * TEXT_LINE_HEIGHT_RATIO;
    for (idx, line) in t.text.lines().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        ctx.fill_text(line, t.x, t.y + line_height * idx as f64)?;
    }
    ctx.restore();
    Ok(())
}

/// CSS font shorthand for a text element, e.g. `italic bold 18px Inter, sans-serif`.
fn font_string(t: &TextElement, scale_y: f64) -> String {
    let size = (t.font_size * scale_y).max(1.0);
    let style = if t.font_style == "italic" { "italic " } else { "" };
    let weight = if t.font_weight == "bold" { "bold " } else { "" };
    format!("{style}{weight}{size}px Inter, sans-serif")
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, el: &Element) -> Result<(), JsValue> {
    let b = hit::bounds(el).inflated(SELECTION_PAD_PX);

    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0);

    let dash_array = js_sys::Array::new();
    dash_array.push(&SELECTION_DASH_PX.into());
    dash_array.push(&SELECTION_DASH_PX.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.stroke_rect(b.x, b.y, b.width, b.height);
    ctx.set_line_dash(&js_sys::Array::new())?;

    // Resize handles on the corners. Strokes and lines resize through their
    // geometry, not handles.
    if matches!(el, Element::Rect(_) | Element::Circle(_) | Element::Text(_)) {
        ctx.set_fill_style_str("#fff");
        for (hx, hy) in [
            (b.x, b.y),
            (b.x + b.width, b.y),
            (b.x, b.y + b.height),
            (b.x + b.width, b.y + b.height),
        ] {
            ctx.fill_rect(
                hx - HANDLE_HALF_PX,
                hy - HANDLE_HALF_PX,
                HANDLE_HALF_PX * 2.0,
                HANDLE_HALF_PX * 2.0,
            );
            ctx.stroke_rect(
                hx - HANDLE_HALF_PX,
                hy - HANDLE_HALF_PX,
                HANDLE_HALF_PX * 2.0,
                HANDLE_HALF_PX * 2.0,
            );
        }
    }

    ctx.restore();
    Ok(())
}
