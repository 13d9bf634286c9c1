//! Whiteboard editor engine for the browser.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of a whiteboard canvas: translating raw DOM input events
//! into document mutations, hit-testing elements, rendering the scene to a
//! Canvas2D context, and persisting the document to a single localStorage
//! slot. The host JavaScript layer is responsible only for wiring DOM events
//! to the engine and reacting to the [`engine::Action`]s it returns (e.g.
//! mounting the inline text editor overlay).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Scene document and board element types |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing and bounding boxes for board elements |
//! | [`editor`] | Inline text-edit sessions |
//! | [`persist`] | Board JSON format, local slot, import/export glue |
//! | [`render`] | Renderer seam and the Canvas2D backend |
//! | [`geom`] | Points and small geometry helpers |
//! | [`ident`] | Prefixed unique element identifiers |
//! | [`consts`] | Shared numeric constants (size floors, defaults, etc.) |

pub mod consts;
pub mod doc;
pub mod editor;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod ident;
pub mod input;
pub mod persist;
pub mod render;
