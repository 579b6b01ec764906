#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::state::UiState;
use folio_core::theme::DarkMode;
use folio_core::{FolioConfig, FolioError};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::dom::{host_error, to_js};
use crate::features;
use crate::{defers_install, parse_boot_options};
use crate::storage::LocalStore;

/// Everything the installed handlers share. Lives for the page's lifetime.
pub(crate) struct Runtime {
    pub(crate) window: Window,
    pub(crate) document: Document,
    pub(crate) config: FolioConfig,
    pub(crate) state: RefCell<UiState>,
    pub(crate) store: RefCell<LocalStore>,
    pub(crate) dark_mode: DarkMode,
}

impl Runtime {
    fn new(window: Window, document: Document, config: FolioConfig) -> Self {
        let store = LocalStore::open(&window);
        let dark_mode = DarkMode::new(&config.theme);
        Self {
            window,
            document,
            config,
            state: RefCell::new(UiState::new()),
            store: RefCell::new(store),
            dark_mode,
        }
    }
}

thread_local! {
    static RUNTIME: RefCell<Option<Rc<Runtime>>> = const { RefCell::new(None) };
}

fn current() -> Result<Rc<Runtime>, JsValue> {
    RUNTIME
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| JsValue::from_str("folio is not booted; call boot() first"))
}

/// Install every enabled feature, now or once the DOM has been parsed.
///
/// `options_json` overrides any subset of the defaults. Booting twice keeps
/// the first runtime and its listeners.
#[wasm_bindgen]
pub fn boot(options_json: Option<String>) -> Result<(), JsValue> {
    let config = parse_boot_options(options_json.as_deref()).map_err(|e| to_js(&e))?;
    crate::console::init(config.log_level);

    if RUNTIME.with(|slot| slot.borrow().is_some()) {
        tracing::warn!("boot called twice; keeping the first configuration");
        return Ok(());
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let runtime = Rc::new(Runtime::new(window, document, config));
    RUNTIME.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&runtime)));

    if defers_install(&runtime.document.ready_state()) {
        let deferred = Rc::clone(&runtime);
        let on_ready = Closure::once_into_js(move || features::install_all(&deferred));
        runtime
            .document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(|e| to_js(&host_error("DOMContentLoaded", &e)))?;
        tracing::debug!("waiting for DOMContentLoaded");
    } else {
        features::install_all(&runtime);
    }
    Ok(())
}

/// Copy `text` to the system clipboard and show a transient banner.
///
/// The promise rejects with the error text when the write fails.
#[wasm_bindgen(js_name = copyToClipboard)]
pub async fn copy_to_clipboard(text: String) -> Result<(), JsValue> {
    let runtime = current()?;
    features::copy(&runtime, &text)
        .await
        .map_err(|e: FolioError| to_js(&e))
}

/// Flip dark mode, persist it, and return the new state.
#[wasm_bindgen(js_name = toggleDarkMode)]
pub fn toggle_dark_mode() -> Result<bool, JsValue> {
    let runtime = current()?;
    features::toggle_dark_mode(&runtime).map_err(|e| to_js(&e))
}
