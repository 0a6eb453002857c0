//! DOM implementation of the core view surface.

use crate::{dom, i18n};
use a11y_panel_core::{Notice, Target, ViewSurface};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlSelectElement};

/// Child of a toggle button holding its on/off action label.
const TOGGLE_STATE_SELECTOR: &str = ".toggle-state";

/// Applies view mutations to the live document. Missing targets are skipped.
#[derive(Debug, Default)]
pub struct DomView;

impl DomView {
    fn resolve(target: Target<'_>) -> Option<Element> {
        let element = match target {
            Target::Root => dom::document().and_then(|doc| doc.document_element()),
            Target::Body => dom::body().map(Element::from),
            Target::Element(id) => dom::by_id(id),
            Target::Query(selector) => dom::query(selector),
        };
        if element.is_none() {
            log::debug!("view target {target} not found");
        }
        element
    }

    fn resolve_html(target: Target<'_>) -> Option<HtmlElement> {
        Self::resolve(target).and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

impl ViewSurface for DomView {
    fn set_style(&mut self, target: Target<'_>, property: &str, value: &str) {
        let Some(el) = Self::resolve_html(target) else {
            return;
        };
        let style = el.style();
        let _ = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
    }

    fn set_attribute(&mut self, target: Target<'_>, name: &str, value: &str) {
        if let Some(el) = Self::resolve(target) {
            let _ = el.set_attribute(name, value);
        }
    }

    fn set_class(&mut self, target: Target<'_>, class: &str, present: bool) {
        if let Some(el) = Self::resolve(target) {
            let _ = el.class_list().toggle_with_force(class, present);
        }
    }

    fn set_text(&mut self, target: Target<'_>, text: &str) {
        if let Some(el) = Self::resolve(target) {
            el.set_text_content(Some(text));
        }
    }

    fn set_value(&mut self, target: Target<'_>, value: &str) {
        if let Some(select) =
            Self::resolve(target).and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(value);
        }
    }

    fn set_pressed(&mut self, target: Target<'_>, pressed: bool) {
        let Some(el) = Self::resolve(target) else {
            return;
        };
        let _ = el.set_attribute("aria-pressed", if pressed { "true" } else { "false" });
        if let Ok(Some(label)) = el.query_selector(TOGGLE_STATE_SELECTOR) {
            label.set_text_content(Some(&i18n::toggle_action(pressed)));
        }
    }

    fn disable(&mut self, target: Target<'_>, reason: &Notice) {
        if let Some(el) = Self::resolve_html(target) {
            let _ = el.set_attribute("disabled", "");
            let _ = el.set_attribute("aria-disabled", "true");
            el.set_title(&i18n::notice_text(reason));
        }
    }

    fn focus(&mut self, target: Target<'_>) {
        if let Some(el) = Self::resolve_html(target)
            && let Err(err) = el.focus()
        {
            log::debug!("focus on {target} failed: {}", dom::js_error_message(&err));
        }
    }
}
