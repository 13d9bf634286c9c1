//! Shared numeric constants and default styles.
//!
//! Centralizing these keeps the engine, renderer, and persistence layers in
//! agreement about size floors and defaults without scattering magic numbers.

/// localStorage slot the board auto-saves into.
pub const STORAGE_KEY: &str = "sketchboard:state:v1";

/// Download filename for JSON exports.
pub const EXPORT_JSON_FILENAME: &str = "sketchboard.json";

/// Download filename for PNG exports.
pub const EXPORT_PNG_FILENAME: &str = "sketchboard.png";

/// Fixed supersampling factor applied when rasterizing a PNG export.
pub const EXPORT_PIXEL_RATIO: f64 = 2.0;

/// Minimum rect extent / circle radius while a drag-to-size gesture is live.
pub const MIN_DRAW_EXTENT: f64 = 1.0;

/// Minimum rect width/height after a transform bake.
pub const MIN_RECT_EXTENT: f64 = 5.0;

/// Minimum circle radius after a transform bake.
pub const MIN_CIRCLE_RADIUS: f64 = 2.0;

/// Minimum font size after a transform bake or an editor commit.
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Stroke width applied when a stored element omits one.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Stroke width the style panel starts at for freshly drawn elements.
pub const DEFAULT_DRAW_WIDTH: f64 = 4.0;

/// Font size for new text elements and for stored text that omits one.
pub const DEFAULT_FONT_SIZE: f64 = 18.0;

/// Color the style panel starts at; also the text fill fallback.
pub const DEFAULT_COLOR: &str = "#1f2937";

/// Seed content for a freshly placed text element.
pub const TEXT_PLACEHOLDER: &str = "Double-click to edit";

/// Hit-testing slop in pixels for thin lines and freehand strokes.
pub const HIT_SLOP_PX: f64 = 8.0;

/// Approximate glyph advance as a fraction of font size, used to estimate
/// text bounds without a layout engine.
pub const TEXT_ADVANCE_RATIO: f64 = 0.6;

/// Line height as a fraction of font size for multi-line text.
pub const TEXT_LINE_HEIGHT_RATIO: f64 = 1.2;
