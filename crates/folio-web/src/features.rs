#![forbid(unsafe_code)]

//! Binds each enabled feature to the live document.
//!
//! Every installer looks up its elements once. Missing elements turn the
//! feature off; a JS exception while binding is logged and the remaining
//! features still install.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::anchor::handle_anchor_click;
use folio_core::button::{begin_loading, is_submit_control};
use folio_core::capability::BodyTheme;
use folio_core::clipboard::{Banner, ClipboardError, copy_to_clipboard};
use folio_core::form::validate_submission;
use folio_core::lazy::LazyImageTracker;
use folio_core::nav::NavMenu;
use folio_core::navbar::apply_navbar_style;
use folio_core::reveal::{IntersectionEntry, ObserverOptions, reveal_intersecting};
use folio_core::{Features, FolioError};
use js_sys::{Array, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::clipboard::{WebClipboard, show_banner};
use crate::dom::{DomElement, DomImage, host_error, js_message, query_all, query_all_in};
use crate::timers::{self, BrowserDebounce};
use crate::wasm::Runtime;

type Installer = fn(&Rc<Runtime>) -> Result<bool, FolioError>;

const INSTALLERS: [(Features, &str, Installer); 9] = [
    (Features::DARK_MODE, "dark-mode", install_dark_mode),
    (Features::NAV_TOGGLE, "nav-toggle", install_nav_toggle),
    (Features::SMOOTH_SCROLL, "smooth-scroll", install_smooth_scroll),
    (Features::NAVBAR_SCROLL, "navbar-scroll", install_navbar_scroll),
    (Features::FORM_VALIDATION, "form-validation", install_form_validation),
    (Features::REVEAL, "reveal", install_reveal),
    (Features::BUTTON_LOADING, "button-loading", install_button_loading),
    (Features::LAZY_IMAGES, "lazy-images", install_lazy_images),
    (Features::SCROLL_DEBOUNCE, "scroll-debounce", install_scroll_debounce),
];

/// Install every enabled feature. Never fails as a whole.
pub(crate) fn install_all(rt: &Rc<Runtime>) {
    for (feature, name, install) in INSTALLERS {
        if !rt.config.is_enabled(feature) {
            tracing::debug!(feature = name, "disabled by configuration");
            continue;
        }
        match install(rt) {
            Ok(true) => tracing::debug!(feature = name, "installed"),
            Ok(false) => tracing::debug!(feature = name, "no matching elements"),
            Err(err) => tracing::warn!(feature = name, error = %err, "feature not installed"),
        }
    }
    tracing::info!("page enhancements ready");
}

/// Attach a listener that lives as long as the page.
fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), FolioError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| host_error(event, &e))?;
    closure.forget();
    Ok(())
}

fn has_intersection_observer(rt: &Runtime) -> bool {
    Reflect::has(rt.window.as_ref(), &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Observe `targets`, calling `on_entries` with each batch of notifications.
fn observe<F>(
    targets: &[Element],
    options: &ObserverOptions,
    on_entries: F,
) -> Result<(), FolioError>
where
    F: FnMut(Array, IntersectionObserver) + 'static,
{
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(on_entries);
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| host_error("IntersectionObserver", &e))?;
    for target in targets {
        observer.observe(target);
    }
    callback.forget();
    Ok(())
}

fn entries(batch: &Array) -> impl Iterator<Item = IntersectionObserverEntry> + '_ {
    batch
        .iter()
        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
}

fn scroll_offset(rt: &Runtime) -> Option<f64> {
    match rt.window.scroll_y() {
        Ok(y) => Some(y),
        Err(err) => {
            tracing::warn!(error = %js_message(&err), "scroll offset unavailable");
            None
        }
    }
}

fn install_nav_toggle(rt: &Rc<Runtime>) -> Result<bool, FolioError> {
    let cfg = &rt.config.nav;
    let toggle = rt.document.get_element_by_id(&cfg.toggle_id).map(DomElement::new);
    let menu = rt.document.get_element_by_id(&cfg.menu_id).map(DomElement::new);
    let Some(nav) = NavMenu::bind(toggle, menu) else {
        return Ok(false);
    };
    let toggle_el = nav.toggle().element().clone();
    let nav = Rc::new(RefCell::new(nav));

    let on_toggle = Rc::clone(&nav);
    let state_rt = Rc::clone(rt);
    listen(toggle_el.as_ref(), "click", move |_| {
        let open = on_toggle.borrow_mut().on_toggle_click();
        if state_rt.state.borrow_mut().set_menu_open(open) {
            tracing::debug!(open, "mobile menu");
        }
    })?;

    for link in query_all(&rt.document, &cfg.link_selector)? {
        let nav = Rc::clone(&nav);
        let link_rt = Rc::clone(rt);
        listen(link.as_ref(), "click", move |_| {
            nav.borrow_mut().on_link_click();
            link_rt.state.borrow_mut().set_menu_open(false);
        })?;
    }
    Ok(true)
}

fn install_smooth_scroll(rt: &Rc<Runtime>) -> Result<bool, FolioError> {
    let anchors = query_all(&rt.document, &rt.config.scroll.anchor_selector)?;
    for anchor in &anchors {
        let document = rt.document.clone();
        let href_source = anchor.clone();
        listen(anchor.as_ref(), "click", move |event| {
            let href = href_source.get_attribute("href").unwrap_or_default();
            let outcome = handle_anchor_click(&href, |id| {
                document.get_element_by_id(id).map(DomElement::new)
            });
            if outcome.prevent_default {
                event.prevent_default();
            }
        })?;
    }
    Ok(!anchors.is_empty())
}

fn install_navbar_scroll(rt: &Rc<Runtime>) -> Result<bool, FolioError> {
    let navbar = rt
        .document
        .query_selector(&rt.config.navbar.selector)
        .map_err(|e| host_error(&rt.config.navbar.selector, &e))?;
    let Some(navbar) = navbar else {
        return Ok(false);
    };
    let mut navbar = DomElement::new(navbar);
    let handler_rt = Rc::clone(rt);
    listen(rt.window.as_ref(), "scroll", move |_| {
        let Some(y) = scroll_offset(&handler_rt) else {
            return;
        };
        let style = apply_navbar_style(&mut navbar, y, &handler_rt.config.navbar);
        let elevated = style.is_elevated();
        if handler_rt.state.borrow_mut().set_navbar_elevated(elevated) {
            tracing::trace!(elevated, y, "navbar style changed");
        }
    })?;
    Ok(true)
}

fn install_form_validation(rt: &Rc<Runtime>) -> Result<bool, FolioError> {
    let form = rt
        .document
        .query_selector(&rt.config.form.selector)
        .map_err(|e| host_error(&rt.config.form.selector, &e))?;
    let Some(form) = form else {
        return Ok(false);
    };
    let handler_rt = Rc::clone(rt);
    let form_el = form.clone();
    listen(form.as_ref(), "submit", move |event| {
        let cfg = &handler_rt.config.form;
        let fields = match query_all_in(&form_el, &cfg.required_selector) {
            Ok(fields) => fields,
            Err(err) => {
                tracing::warn!(error = %err, "required fields not found");
                return;
            }
        };
        let outcome = validate_submission(fields.into_iter().map(DomElement::new), cfg);
        if outcome.prevent_default {
            event.prevent_default();
        }
        if let Some(message) = &outcome.alert {
            if let Err(err) = handler_rt.window.alert_with_message(message) {
                tracing::warn!(error = %js_message(&err), "alert failed");
            }
        }
    })?;
    Ok(true)
}

fn install_reveal(rt: &Rc<Runtime>) -> Result<bool, FolioError> {
    let targets = query_all(&rt.document, &rt.config.reveal.selector)?;
    if targets.is_empty() {
        return Ok(false);
    }
    if !has_intersection_observer(rt) {
        tracing::debug!("IntersectionObserver missing; cards stay static");
        return Ok(false);
    }
    let options = ObserverOptions::from(&rt.config.reveal);
    observe(&targets, &options, |batch, _observer| {
        let revealed = reveal_intersecting(entries(&batch).map(|entry| {
            IntersectionEntry::new(DomElement::new(entry.target()), entry.is_intersecting())
        }));
        if revealed > 0 {
            tracing::trace!(revealed, "cards revealed");
        }
    })?;
    Ok(true)
}

fn install_button_loading(rt: &Rc<Runtime>) -> Result<bool, FolioError> {
    let buttons = query_all(&rt.document, &rt.config.button.selector)?;
    for button in &buttons {
        let handler_rt = Rc::clone(rt);
        let button_el = button.clone();
        listen(button.as_ref(), "click", move |_| {
            let type_attr = button_el.get_attribute("type");
            if !is_submit_control(&button_el.tag_name(), type_attr.as_deref()) {
                return;
            }
            let cfg = &handler_rt.config.button;
            let mut control = DomElement::new(button_el.clone());
            let Some(pending) = begin_loading(&mut control, cfg) else {
                return;
            };
            let scheduled = timers::set_timeout(&handler_rt.window, cfg.restore_after(), move || {
                pending.restore(&mut control);
            });
            if let Err(err) = scheduled {
                tracing::warn!(error = %err, "button restore not scheduled");
            }
        })?;
    }
    Ok(!buttons.is_empty())
}

fn install_lazy_images(rt: &Rc<Runtime>) -> Result<bool, FolioError> {
    let images = query_all(&rt.document, &rt.config.lazy.selector)?;
    if images.is_empty() {
        return Ok(false);
    }
    if !has_intersection_observer(rt) {
        tracing::debug!("IntersectionObserver missing; images keep placeholders");
        return Ok(false);
    }
    let source_attribute = rt.config.lazy.source_attribute.clone();
    let known = images.clone();
    let mut tracker = LazyImageTracker::<usize>::new();
    observe(&images, &ObserverOptions::default(), move |batch, observer| {
        for entry in entries(&batch) {
            let target = entry.target();
            let Some(key) = known.iter().position(|img| *img == target) else {
                continue;
            };
            let image = DomImage {
                element: &target,
                source_attribute: &source_attribute,
            };
            let step = tracker.on_intersection(key, image, entry.is_intersecting());
            if step.stop_observing() {
                observer.unobserve(&target);
            }
        }
    })?;
    Ok(true)
}

fn install_dark_mode(rt: &Rc<Runtime>) -> Result<bool, FolioError> {
    let Some(body) = rt.document.body() else {
        return Ok(false);
    };
    let mut body = DomElement::new(body.into());
    let dark = rt.dark_mode.restore(&mut body, &*rt.store.borrow());
    rt.state.borrow_mut().set_dark_mode(dark);
    Ok(true)
}

fn install_scroll_debounce(rt: &Rc<Runtime>) -> Result<bool, FolioError> {
    let hook = BrowserDebounce::new(
        rt.window.clone(),
        rt.config.scroll.debounce_wait(),
        |y: f64| tracing::trace!(y, "scroll settled"),
    );
    let handler_rt = Rc::clone(rt);
    listen(rt.window.as_ref(), "scroll", move |_| {
        if let Some(y) = scroll_offset(&handler_rt) {
            hook.borrow_mut().trigger(y);
        }
    })?;
    Ok(true)
}

/// `copyToClipboard`: write, then show the confirmation (or failure) banner.
pub(crate) async fn copy(rt: &Runtime, text: &str) -> Result<(), FolioError> {
    if !rt.config.is_enabled(Features::CLIPBOARD) {
        return Err(ClipboardError::NotAvailable.into());
    }
    let clipboard = WebClipboard::new(rt.window.clone());
    match copy_to_clipboard(&clipboard, text, &rt.config.clipboard).await {
        Ok(banner) => show_banner(&rt.window, &rt.document, &banner),
        Err(err) => {
            tracing::warn!(error = %err, "copy to clipboard failed");
            if let Some(banner) = Banner::failure(&rt.config.clipboard) {
                if let Err(shown) = show_banner(&rt.window, &rt.document, &banner) {
                    tracing::warn!(error = %shown, "failure banner not shown");
                }
            }
            Err(err.into())
        }
    }
}

/// `toggleDarkMode`: flip the body class and persist it. Returns the new state.
pub(crate) fn toggle_dark_mode(rt: &Runtime) -> Result<bool, FolioError> {
    let body = rt
        .document
        .body()
        .ok_or_else(|| FolioError::Host("document has no body".into()))?;
    let mut body = DomElement::new(body.into());
    if let Err(err) = rt.dark_mode.toggle(&mut body, &mut *rt.store.borrow_mut()) {
        tracing::warn!(error = %err, "dark mode preference not saved");
    }
    let dark = body.is_dark();
    rt.state.borrow_mut().set_dark_mode(dark);
    Ok(dark)
}
