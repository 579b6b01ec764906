#![forbid(unsafe_code)]

//! `web_sys` implementations of the core capability traits.

use folio_core::FolioError;
use folio_core::capability::{
    ACTIVE_CLASS, BodyTheme, ButtonControl, DARK_MODE_CLASS, FADE_IN_UP_CLASS, FormField,
    LAZY_CLASS, LazyLoadable, Revealable, ScrollTarget, StyleTarget, Toggleable,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    NodeList, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

const BORDER_COLOR_PROPERTY: &str = "border-color";

/// Best-effort text for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

pub(crate) fn host_error(context: &str, value: &JsValue) -> FolioError {
    FolioError::Host(format!("{context}: {}", js_message(value)))
}

pub(crate) fn to_js(err: &FolioError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// `querySelectorAll` collected into owned elements, in document order.
pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, FolioError> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| host_error(selector, &e))?;
    Ok(elements(&list))
}

/// `querySelectorAll` scoped to `root`.
pub(crate) fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, FolioError> {
    let list = root
        .query_selector_all(selector)
        .map_err(|e| host_error(selector, &e))?;
    Ok(elements(&list))
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// A live element viewed through the class/style/attribute capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DomElement {
    element: Element,
}

impl DomElement {
    pub(crate) fn new(element: Element) -> Self {
        Self { element }
    }

    pub(crate) fn element(&self) -> &Element {
        &self.element
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn set_class(&self, class: &str, on: bool) {
        if let Err(err) = self.element.class_list().toggle_with_force(class, on) {
            tracing::warn!(class, error = %js_message(&err), "class update failed");
        }
    }

    fn set_flag_attribute(&self, name: &str, on: bool) {
        let result = if on {
            self.element.set_attribute(name, "")
        } else {
            self.element.remove_attribute(name)
        };
        if let Err(err) = result {
            tracing::warn!(attribute = name, error = %js_message(&err), "attribute update failed");
        }
    }
}

impl Toggleable for DomElement {
    fn is_active(&self) -> bool {
        self.has_class(ACTIVE_CLASS)
    }

    fn set_active(&mut self, active: bool) {
        self.set_class(ACTIVE_CLASS, active);
    }
}

impl Revealable for DomElement {
    fn is_revealed(&self) -> bool {
        self.has_class(FADE_IN_UP_CLASS)
    }

    fn reveal(&mut self) {
        self.set_class(FADE_IN_UP_CLASS, true);
    }
}

impl StyleTarget for DomElement {
    fn set_style(&mut self, property: &str, value: &str) {
        let Some(html) = self.element.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = html.style().set_property(property, value) {
            tracing::warn!(property, error = %js_message(&err), "style update failed");
        }
    }
}

impl FormField for DomElement {
    fn value(&self) -> String {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            self.element.text_content().unwrap_or_default()
        }
    }

    fn set_border_color(&mut self, color: &str) {
        self.set_style(BORDER_COLOR_PROPERTY, color);
    }
}

impl ButtonControl for DomElement {
    fn label(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn set_label(&mut self, label: &str) {
        self.element.set_text_content(Some(label));
    }

    fn is_disabled(&self) -> bool {
        self.element.has_attribute("disabled")
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.set_flag_attribute("disabled", disabled);
    }
}

impl BodyTheme for DomElement {
    fn is_dark(&self) -> bool {
        self.has_class(DARK_MODE_CLASS)
    }

    fn set_dark(&mut self, dark: bool) {
        self.set_class(DARK_MODE_CLASS, dark);
    }
}

impl ScrollTarget for DomElement {
    fn scroll_into_view_smoothly(&mut self) {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        opts.set_block(ScrollLogicalPosition::Start);
        self.element
            .scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

/// An `<img>` whose real source sits in a configurable attribute.
#[derive(Debug)]
pub(crate) struct DomImage<'a> {
    pub(crate) element: &'a Element,
    pub(crate) source_attribute: &'a str,
}

impl LazyLoadable for DomImage<'_> {
    fn deferred_source(&self) -> Option<String> {
        self.element.get_attribute(self.source_attribute)
    }

    fn set_source(&mut self, src: &str) {
        if let Err(err) = self.element.set_attribute("src", src) {
            tracing::warn!(error = %js_message(&err), "image src update failed");
        }
    }

    fn clear_lazy_marker(&mut self) {
        if let Err(err) = self.element.class_list().remove_1(LAZY_CLASS) {
            tracing::warn!(error = %js_message(&err), "lazy class removal failed");
        }
    }
}
