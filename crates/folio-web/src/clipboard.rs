#![forbid(unsafe_code)]

//! `navigator.clipboard` writer and the on-page banner.

use folio_core::FolioError;
use folio_core::clipboard::{Banner, ClipboardError, ClipboardWriter};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Window};

use crate::dom::{host_error, js_message};
use crate::timers;

/// Async Clipboard API of the current window.
///
/// The API is looked up on every write: it is absent on insecure origins and
/// in some embedded browsers.
#[derive(Debug, Clone)]
pub(crate) struct WebClipboard {
    window: Window,
}

impl WebClipboard {
    pub(crate) fn new(window: Window) -> Self {
        Self { window }
    }
}

impl ClipboardWriter for WebClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let navigator = self.window.navigator();
        let clipboard = Reflect::get(navigator.as_ref(), &JsValue::from_str("clipboard"))
            .map_err(|_| ClipboardError::NotAvailable)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(ClipboardError::NotAvailable);
        }
        let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or(ClipboardError::NotAvailable)?;

        let pending = write_text
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(|e| ClipboardError::Rejected(js_message(&e)))?
            .dyn_into::<Promise>()
            .map_err(|_| ClipboardError::Rejected("writeText returned no promise".into()))?;
        JsFuture::from(pending)
            .await
            .map_err(|e| ClipboardError::Rejected(js_message(&e)))?;
        Ok(())
    }
}

/// Append `banner` to `<body>` and remove it after its lifetime.
pub(crate) fn show_banner(
    window: &Window,
    document: &Document,
    banner: &Banner,
) -> Result<(), FolioError> {
    let body = document
        .body()
        .ok_or_else(|| FolioError::Host("document has no body".into()))?;
    let node = document
        .create_element("div")
        .map_err(|e| host_error("createElement", &e))?;
    node.set_text_content(Some(&banner.text));
    node.set_attribute("style", &banner.css)
        .map_err(|e| host_error("banner style", &e))?;
    body.append_child(&node)
        .map_err(|e| host_error("appendChild", &e))?;

    timers::set_timeout(window, banner.lifetime, move || node.remove())?;
    Ok(())
}
