#![forbid(unsafe_code)]

//! `folio-core` holds the page-enhancement logic for the folio portfolio site.
//!
//! Design goals:
//! - **Host-driven**: the embedding environment (the browser adapter in
//!   `folio-web`, or a test) owns the DOM and pushes events in.
//! - **Capability traits at the seam**: every feature talks to the page through
//!   a small trait ([`capability`]), so the same controller runs against real
//!   `web_sys` elements and against the in-memory fakes in [`fake`].
//! - **Deterministic time**: timers and debouncing are driven by an explicit
//!   clock ([`scheduler`]), never by sleeping.
//!
//! Each feature is independent. A missing element or a disabled feature only
//! turns that one feature off.

pub mod anchor;
pub mod button;
pub mod capability;
pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod error;
pub mod fake;
pub mod form;
pub mod lazy;
pub mod logging;
pub mod nav;
pub mod navbar;
pub mod page;
pub mod reveal;
pub mod scheduler;
pub mod state;
pub mod storage;
pub mod theme;

pub use config::{Features, FolioConfig, LogLevel};
pub use error::{FolioError, Result};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
