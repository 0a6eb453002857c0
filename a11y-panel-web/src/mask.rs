//! Pointer tracking for the reading mask.

use crate::dom;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::MouseEvent;

/// Owns the document `mousemove` listener while the mask is active.
#[derive(Default)]
pub struct PointerTracker {
    listener: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl PointerTracker {
    /// Start forwarding pointer rows to `on_move`. No-op when already attached.
    pub fn attach(&mut self, on_move: impl FnMut(i32) + 'static) {
        if self.listener.is_some() {
            return;
        }
        let Some(doc) = dom::document() else {
            return;
        };
        let mut on_move = on_move;
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            on_move(event.client_y());
        });
        match doc.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref()) {
            Ok(()) => self.listener = Some(closure),
            Err(err) => log::warn!(
                "failed to track pointer for reading mask: {}",
                dom::js_error_message(&err)
            ),
        }
    }

    pub fn detach(&mut self) {
        let Some(closure) = self.listener.take() else {
            return;
        };
        if let Some(doc) = dom::document() {
            let _ = doc
                .remove_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        }
    }
}
