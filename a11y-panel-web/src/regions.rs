//! Locating page regions to read aloud.

use crate::dom;
use a11y_panel_core::text::UNREADABLE_SELECTOR;
use a11y_panel_core::view::NAVBAR_SELECTOR;
use a11y_panel_core::{PanelMsg, collapse_whitespace};
use std::cell::Cell;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

pub const CONTENT_SECTION_SELECTOR: &str = ".content-section";
pub const HERO_SECTION_SELECTOR: &str = ".hero-section";
/// Rows below the sticky header that still count as "in view".
const HEADER_SLACK_PX: f64 = 100.0;

thread_local! {
    static NEXT_REGION: Cell<u32> = const { Cell::new(1) };
}

/// Visible text of `element`, minus action buttons and screen-reader-only nodes.
#[must_use]
pub fn readable_text(element: &Element) -> String {
    let Some(copy) = element
        .clone_node_with_deep(true)
        .ok()
        .and_then(|node| node.dyn_into::<Element>().ok())
    else {
        return String::new();
    };
    if let Ok(hidden) = copy.query_selector_all(UNREADABLE_SELECTOR) {
        for node in (0..hidden.length()).filter_map(|i| hidden.get(i)) {
            if let Some(parent) = node.parent_node() {
                let _ = parent.remove_child(&node);
            }
        }
    }
    collapse_whitespace(&copy.text_content().unwrap_or_default())
}

/// Id used to mark `element` while it is read; assigns one when missing.
pub fn region_id(element: &Element) -> String {
    let id = element.id();
    if !id.is_empty() {
        return id;
    }
    let generated = NEXT_REGION.with(|next| {
        let n = next.get();
        next.set(n + 1);
        format!("read-region-{n}")
    });
    element.set_id(&generated);
    generated
}

/// Message that reads `element` aloud.
pub fn read_message(element: &Element) -> PanelMsg {
    PanelMsg::ReadRegion {
        region: region_id(element),
        text: readable_text(element),
    }
}

/// The content section under the sticky header, or the first one on the page.
#[must_use]
pub fn current_section() -> Option<Element> {
    let offset = dom::query(NAVBAR_SELECTOR)
        .and_then(|nav| nav.dyn_into::<HtmlElement>().ok())
        .map_or(0.0, |nav| f64::from(nav.offset_height()))
        + HEADER_SLACK_PX;
    let sections = dom::query_all(CONTENT_SECTION_SELECTOR);
    sections
        .iter()
        .find(|section| {
            let rect = section.get_bounding_client_rect();
            rect.top() <= offset && rect.bottom() >= offset
        })
        .or_else(|| sections.first())
        .cloned()
}
