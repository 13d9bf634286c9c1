//! Persistence: the board JSON format, the single local slot, and browser
//! file glue.
//!
//! The durable and interchange format is the same: `{ "elements": [...] }`,
//! unversioned. Auto-save overwrites one localStorage slot on every mutation;
//! loading treats absent and corrupt content identically as "no saved board"
//! (corrupt content is logged, never surfaced as an error). Explicit import
//! and export go through the browser's file APIs and do surface errors, with
//! the prior document untouched on failure.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::consts::STORAGE_KEY;
use crate::doc::Element;

/// Failures the persistence layer can report.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The content is not a valid board document.
    #[error("malformed board document: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The browser storage area is unavailable or rejected the write.
    #[error("local storage rejected the write")]
    StorageWrite,
    /// The selected file could not be read.
    #[error("could not read the selected file")]
    FileRead,
}

/// The board document as stored and exchanged: a bare element list under a
/// required `elements` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardFile {
    /// All elements in draw order.
    pub elements: Vec<Element>,
}

/// Serialize a document for the local slot (compact).
pub fn to_json(elements: &[Element]) -> Result<String, PersistError> {
    Ok(serde_json::to_string(&BoardFile { elements: elements.to_vec() })?)
}

/// Serialize a document for file export (pretty-printed).
pub fn to_pretty_json(elements: &[Element]) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(&BoardFile { elements: elements.to_vec() })?)
}

/// Parse a board document. Anything without a top-level `elements` array
/// (including `{}`) is rejected.
pub fn parse_board(json: &str) -> Result<Vec<Element>, PersistError> {
    let file: BoardFile = serde_json::from_str(json)?;
    Ok(file.elements)
}

/// A single-slot key-value store the board auto-saves into.
///
/// Swappable so the engine core stays browser-free: `WebStorage` in the
/// browser, `MemoryStore` natively and in tests.
pub trait LocalStore {
    /// Read the value under `key`, if present.
    fn read(&self, key: &str) -> Option<String>;
    /// Overwrite the value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// Overwrite the local slot with the current document.
pub fn save_local(store: &impl LocalStore, elements: &[Element]) -> Result<(), PersistError> {
    store.write(STORAGE_KEY, &to_json(elements)?)
}

/// Load the previously saved document. Absent and corrupt content both come
/// back as `None`; corruption is logged and the slot left alone.
pub fn load_local(store: &impl LocalStore) -> Option<Vec<Element>> {
    let raw = store.read(STORAGE_KEY)?;
    match parse_board(&raw) {
        Ok(elements) => Some(elements),
        Err(err) => {
            log::warn!("ignoring corrupt saved board: {err}");
            None
        }
    }
}

/// In-memory store for native use and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.slots.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Store backed by `window.localStorage`.
#[derive(Debug, Default)]
pub struct WebStorage;

impl WebStorage {
    /// Handle to the browser's localStorage-backed slot.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LocalStore for WebStorage {
    fn read(&self, key: &str) -> Option<String> {
        let window = web_sys::window()?;
        let storage = match window.local_storage() {
            Ok(Some(storage)) => storage,
            _ => return None,
        };
        match storage.get_item(key) {
            Ok(value) => value,
            Err(_) => None,
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let storage = match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(Some(storage))) => storage,
            _ => return Err(PersistError::StorageWrite),
        };
        storage.set_item(key, value).map_err(|_| PersistError::StorageWrite)
    }
}

/// Trigger a browser download of `content` under `filename` via a transient
/// object URL.
pub fn download_text(filename: &str, content: &str, mime: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let clicked = download_url(filename, &url);
    web_sys::Url::revoke_object_url(&url)?;
    clicked
}

/// Click a transient anchor pointing at `url` to start a download.
pub fn download_url(filename: &str, url: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(url);
    anchor.set_download(filename);
    anchor.click();
    Ok(())
}

/// Read a user-selected file as text. One import at a time; there is no
/// cancellation for the pending future.
pub async fn read_file_text(file: &web_sys::File) -> Result<String, PersistError> {
    let value = JsFuture::from(file.text())
        .await
        .map_err(|_| PersistError::FileRead)?;
    value.as_string().ok_or(PersistError::FileRead)
}
