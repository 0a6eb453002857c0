//! Notification banners and screen-reader announcements.

use crate::{dom, i18n};
use a11y_panel_core::{Feedback, Notice, Severity};
use web_sys::Element;

const NOTIFICATION_SELECTOR: &str = ".notification";
const NOTIFICATION_VISIBLE_MS: i32 = 5_000;
const NOTIFICATION_FADE_MS: i32 = 300;
const ANNOUNCEMENT_MS: i32 = 1_000;

/// Renders notices into the page: one banner at a time, plus transient
/// `aria-live` nodes for assistive technology.
#[derive(Debug, Default)]
pub struct PageFeedback;

impl Feedback for PageFeedback {
    fn notify(&mut self, notice: Notice, severity: Severity) {
        let text = i18n::notice_text(&notice);
        if let Some(existing) = dom::query(NOTIFICATION_SELECTOR) {
            existing.remove();
        }
        let class = format!("notification notification-{}", severity.as_str());
        let Some(banner) = create_node(&class, &text) else {
            return;
        };
        let _ = banner.set_attribute("role", "alert");
        let _ = banner.set_attribute("aria-live", "polite");

        wasm_bindgen_futures::spawn_local(async move {
            if dom::sleep_ms(NOTIFICATION_VISIBLE_MS).await.is_err() {
                return;
            }
            // Already replaced by a newer notification.
            if banner.parent_node().is_none() {
                return;
            }
            let _ = banner.set_attribute("style", "opacity: 0");
            if dom::sleep_ms(NOTIFICATION_FADE_MS).await.is_ok() {
                banner.remove();
            }
        });
    }

    fn announce(&mut self, notice: Notice) {
        let text = i18n::notice_text(&notice);
        let Some(node) = create_node("sr-only", &text) else {
            return;
        };
        let _ = node.set_attribute("aria-live", "polite");
        let _ = node.set_attribute("aria-atomic", "true");

        wasm_bindgen_futures::spawn_local(async move {
            if dom::sleep_ms(ANNOUNCEMENT_MS).await.is_ok() {
                node.remove();
            }
        });
    }
}

/// Append a `<div>` with `class` and `text` to the body.
fn create_node(class: &str, text: &str) -> Option<Element> {
    let doc = dom::document()?;
    let body = doc.body()?;
    let node = doc.create_element("div").ok()?;
    node.set_class_name(class);
    node.set_text_content(Some(text));
    body.append_child(&node).ok()?;
    Some(node)
}
