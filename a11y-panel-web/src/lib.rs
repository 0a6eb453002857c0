#![forbid(unsafe_code)]
//! Browser front end for the accessibility panel.
//!
//! Implements the core crate's storage, view, speech and feedback seams on top
//! of `web-sys` and wires them to the controls of a static page.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod boot;
pub mod config;
pub mod dom;
pub mod feedback;
pub mod i18n;
pub mod logger;
pub mod mask;
pub mod regions;
pub mod runtime;
pub mod speech;
pub mod storage;
pub mod view;
pub mod wiring;

pub use runtime::Runtime;

#[cfg(target_arch = "wasm32")]
thread_local! {
    static RUNTIME: std::cell::RefCell<Option<std::rc::Rc<Runtime>>> =
        const { std::cell::RefCell::new(None) };
}

#[cfg(target_arch = "wasm32")]
fn boot_page() {
    match boot::boot() {
        Ok(runtime) => RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime)),
        Err(err) => dom::console_error(&format!("accessibility panel failed to start: {err:#}")),
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let search = dom::window()
        .and_then(|win| win.location().search().ok())
        .unwrap_or_default();
    logger::init(logger::level_from_query(&search).unwrap_or(log::LevelFilter::Info));

    let Some(doc) = dom::document() else {
        dom::console_error("accessibility panel: no document");
        return;
    };
    if doc.ready_state() == "loading" {
        if let Err(err) = dom::listen(&doc, "DOMContentLoaded", |_| boot_page()) {
            dom::console_error(&dom::js_error_message(&err));
        }
    } else {
        boot_page();
    }
}
