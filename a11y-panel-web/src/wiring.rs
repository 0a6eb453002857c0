//! DOM event listeners feeding the runtime.
//!
//! Every handler translates a browser event into a [`PanelMsg`]. A control
//! missing from the page is logged and skipped; the rest still work.

use crate::dom;
use crate::regions::{self, CONTENT_SECTION_SELECTOR, HERO_SECTION_SELECTOR};
use crate::runtime::Runtime;
use a11y_panel_core::view::{
    FONT_SELECTOR_ID, LINE_SPACING_SELECTOR_ID, OPTIONS_SELECTOR, PANEL_ID, PANEL_TOGGLE_ID,
    THEME_SELECTOR_ID,
};
use a11y_panel_core::{PanelMsg, Shortcut, Step, ToggleControl};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, EventTarget, HtmlSelectElement, KeyboardEvent};

const DECREASE_FONT_ID: &str = "decrease-font";
const INCREASE_FONT_ID: &str = "increase-font";
const RESET_ID: &str = "reset-settings";
const PLAY_INTRO_ID: &str = "play-intro";
const TEXT_ONLY_ID: &str = "text-only";
const PRINT_PAGE_ID: &str = "print-page";
const SECTION_READ_SELECTOR: &str = ".section-read-aloud";
const INITIAL_SCROLL_DELAY_MS: i32 = 100;

/// Attach every listener the panel needs.
pub fn wire(runtime: &Rc<Runtime>) {
    wire_panel(runtime);
    wire_font_size(runtime);
    wire_selects(runtime);
    wire_toggles(runtime);
    on_id(runtime, RESET_ID, "click", |_| Some(PanelMsg::Reset));
    wire_shortcuts(runtime);
    wire_options_scroll(runtime);
    wire_read_buttons(runtime);
    wire_page_tools(runtime);
    wire_voices(runtime);
}

/// Forward `event` on `target` to the runtime through `translate`.
fn forward(
    runtime: &Rc<Runtime>,
    target: &EventTarget,
    event: &str,
    translate: impl Fn(&Event) -> Option<PanelMsg> + 'static,
) {
    let rt = Rc::clone(runtime);
    if let Err(err) = dom::listen(target, event, move |ev| {
        if let Some(msg) = translate(&ev) {
            rt.dispatch(msg);
        }
    }) {
        log::warn!("failed to listen for {event}: {}", dom::js_error_message(&err));
    }
}

fn on_id(
    runtime: &Rc<Runtime>,
    id: &str,
    event: &str,
    translate: impl Fn(&Event) -> Option<PanelMsg> + 'static,
) {
    match dom::by_id(id) {
        Some(el) => forward(runtime, &el, event, translate),
        None => log::warn!("#{id} not found; control left unwired"),
    }
}

fn wire_panel(runtime: &Rc<Runtime>) {
    on_id(runtime, PANEL_TOGGLE_ID, "click", |ev| {
        ev.stop_propagation();
        Some(PanelMsg::TogglePanel)
    });
    // Clicks inside the panel never reach the document handler below.
    if let Some(panel) = dom::by_id(PANEL_ID)
        && let Err(err) = dom::listen(&panel, "click", |ev| ev.stop_propagation())
    {
        log::warn!("failed to listen for click: {}", dom::js_error_message(&err));
    }
    if let Some(doc) = dom::document() {
        let rt = Rc::clone(runtime);
        forward(runtime, &doc, "click", move |_| {
            rt.is_open().then_some(PanelMsg::ClosePanel {
                restore_focus: false,
            })
        });
    }
}

fn wire_font_size(runtime: &Rc<Runtime>) {
    on_id(runtime, DECREASE_FONT_ID, "click", |_| {
        Some(PanelMsg::StepFontSize(Step::Down))
    });
    on_id(runtime, INCREASE_FONT_ID, "click", |_| {
        Some(PanelMsg::StepFontSize(Step::Up))
    });
}

fn select_value(ev: &Event) -> Option<String> {
    ev.target()
        .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
}

fn wire_selects(runtime: &Rc<Runtime>) {
    on_id(runtime, THEME_SELECTOR_ID, "change", |ev| {
        select_value(ev).map(PanelMsg::SelectTheme)
    });
    on_id(runtime, FONT_SELECTOR_ID, "change", |ev| {
        select_value(ev).map(PanelMsg::SelectFont)
    });
    on_id(runtime, LINE_SPACING_SELECTOR_ID, "change", |ev| {
        select_value(ev).map(PanelMsg::SelectLineSpacing)
    });
}

fn wire_toggles(runtime: &Rc<Runtime>) {
    for control in ToggleControl::ALL {
        on_id(runtime, control.element_id(), "click", move |_| {
            Some(PanelMsg::Toggle(control))
        });
    }
}

fn wire_shortcuts(runtime: &Rc<Runtime>) {
    let Some(doc) = dom::document() else {
        return;
    };
    forward(runtime, &doc, "keydown", |ev| {
        let key = ev.dyn_ref::<KeyboardEvent>()?;
        let shortcut = Shortcut::from_key(&key.key(), key.alt_key())?;
        if shortcut.prevents_default() {
            ev.prevent_default();
        }
        Some(PanelMsg::Shortcut(shortcut))
    });
}

fn scroll_msg(options: &Element) -> PanelMsg {
    PanelMsg::OptionsScrolled {
        scroll_top: f64::from(options.scroll_top()),
        scroll_height: f64::from(options.scroll_height()),
        client_height: f64::from(options.client_height()),
    }
}

fn wire_options_scroll(runtime: &Rc<Runtime>) {
    let Some(options) = dom::query(OPTIONS_SELECTOR) else {
        log::debug!("{OPTIONS_SELECTOR} not found; scroll hints disabled");
        return;
    };
    let watched = options.clone();
    forward(runtime, &options, "scroll", move |_| Some(scroll_msg(&watched)));

    let rt = Rc::clone(runtime);
    wasm_bindgen_futures::spawn_local(async move {
        if dom::sleep_ms(INITIAL_SCROLL_DELAY_MS).await.is_ok() {
            rt.dispatch(scroll_msg(&options));
        }
    });
}

fn wire_read_buttons(runtime: &Rc<Runtime>) {
    if let Some(button) = dom::by_id(PLAY_INTRO_ID) {
        forward(runtime, &button, "click", |_| {
            dom::query(HERO_SECTION_SELECTOR).map(|hero| regions::read_message(&hero))
        });
    }
    for button in dom::query_all(SECTION_READ_SELECTOR) {
        let origin = button.clone();
        forward(runtime, &button, "click", move |_| {
            origin
                .closest(CONTENT_SECTION_SELECTOR)
                .ok()
                .flatten()
                .map(|section| regions::read_message(&section))
        });
    }
}

/// Optional page links: text-only mode and print.
fn wire_page_tools(runtime: &Rc<Runtime>) {
    if let Some(link) = dom::by_id(TEXT_ONLY_ID) {
        forward(runtime, &link, "click", |ev| {
            ev.prevent_default();
            Some(PanelMsg::ToggleTextOnly)
        });
    }
    if let Some(link) = dom::by_id(PRINT_PAGE_ID)
        && let Err(err) = dom::listen(&link, "click", |ev| {
            ev.prevent_default();
            if let Some(Err(err)) = dom::window().map(|win| win.print()) {
                log::warn!("print failed: {}", dom::js_error_message(&err));
            }
        })
    {
        log::warn!("failed to listen for click: {}", dom::js_error_message(&err));
    }
}

fn wire_voices(runtime: &Rc<Runtime>) {
    let synth = runtime.with_panel(|panel| panel.speech().engine().synthesis().cloned());
    let Some(synth) = synth else {
        return;
    };
    let rt = Rc::clone(runtime);
    let closure = Closure::<dyn FnMut()>::new(move || rt.refresh_voices());
    synth.set_onvoiceschanged(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
}
