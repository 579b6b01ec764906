#![forbid(unsafe_code)]

//! WASM frontend for folio.
//!
//! This crate is host-specific (browser/WASM). It binds the controllers in
//! `folio-core` to the live document and exports the page's JS API:
//! - `boot(optionsJson?)`: install every enabled feature once the DOM is ready,
//! - `copyToClipboard(text)`: copy with a confirmation banner,
//! - `toggleDarkMode()`: flip and persist the theme.

use folio_core::{FolioConfig, Result};

#[cfg(target_arch = "wasm32")]
mod clipboard;
#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod features;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod timers;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{boot, copy_to_clipboard, toggle_dark_mode};

/// Parse the optional JSON options passed to `boot`.
///
/// `None`, an empty string, or `"null"` select the defaults.
pub fn parse_boot_options(options: Option<&str>) -> Result<FolioConfig> {
    match options.map(str::trim) {
        None | Some("" | "null") => Ok(FolioConfig::default()),
        Some(json) => FolioConfig::from_json(json),
    }
}

/// Whether installation must wait for `DOMContentLoaded`, given
/// `document.readyState`.
///
/// Only `"loading"` defers; `"interactive"` and `"complete"` mean the DOM is
/// already parsed.
pub fn defers_install(ready_state: &str) -> bool {
    ready_state == "loading"
}
