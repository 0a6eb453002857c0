#![cfg(target_arch = "wasm32")]

use a11y_panel_core::{
    PanelConfig, PanelMsg, PreferenceStorage, SpeechEngine, SpeechOptions, Step, ToggleControl,
    Utterance, UtteranceEvent, UtteranceId,
};
use a11y_panel_web::regions;
use a11y_panel_web::speech::BrowserSpeech;
use a11y_panel_web::storage::BrowserStorage;
use a11y_panel_web::{Runtime, dom, i18n, wiring};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r##"
<nav class="navbar"></nav>
<button id="accessibility-toggle" aria-expanded="false">A11y</button>
<div id="accessibility-panel">
  <div class="accessibility-options">
    <button id="decrease-font">A-</button>
    <span id="current-font-size">100%</span>
    <button id="increase-font">A+</button>
    <select id="theme-selector">
      <option value="light">Claro</option><option value="dark">Escuro</option>
    </select>
    <select id="font-selector"><option value="open-sans">Open Sans</option></select>
    <select id="line-spacing"><option value="normal">Normal</option></select>
    <button id="animation-toggle" class="toggle-button"><span class="toggle-state">Ativar</span></button>
    <button id="reading-mode" class="toggle-button"><span class="toggle-state">Ativar</span></button>
    <button id="reading-mask" class="toggle-button"><span class="toggle-state">Ativar</span></button>
    <button id="text-to-speech" class="toggle-button"><span class="toggle-state">Ativar</span></button>
    <button id="reset-settings">Reset</button>
    <a id="text-only" href="#">Texto</a>
  </div>
</div>
<div id="reading-mask-overlay"></div>
<main id="main-content">
  <section class="content-section" id="sobre">
    <h2>Sobre</h2>
    <div class="section-actions"><button class="section-read-aloud">Ouvir</button></div>
    <p>Texto   da
       seção.</p>
    <span class="sr-only">oculto</span>
  </section>
  <section class="content-section"><p>Segunda</p></section>
</main>
"##;

/// Fresh page body and a runtime bound to `key`.
fn mount(key: &str) -> std::rc::Rc<Runtime> {
    i18n::set_lang("pt");
    dom::body().expect("body").set_inner_html(FIXTURE);
    let _ = BrowserStorage::open().remove(key);
    let config = PanelConfig {
        storage_key: key.to_string(),
        ..PanelConfig::default()
    };
    let runtime = Runtime::new(&config);
    runtime.start();
    runtime
}

fn root_attr(name: &str) -> Option<String> {
    dom::document()
        .and_then(|doc| doc.document_element())
        .and_then(|root| root.get_attribute(name))
}

#[wasm_bindgen_test]
fn theme_change_renders_and_persists() {
    let runtime = mount("a11yTestTheme");
    runtime.dispatch(PanelMsg::SelectTheme("dark".into()));
    assert_eq!(root_attr("data-theme").as_deref(), Some("dark"));

    let stored = BrowserStorage::open()
        .read("a11yTestTheme")
        .expect("storage readable")
        .expect("snapshot written");
    assert!(stored.contains(r#""theme":"dark""#));

    let reloaded = mount_without_clearing("a11yTestTheme");
    assert_eq!(reloaded.with_panel(|p| p.prefs().theme.as_str()), "dark");
}

fn mount_without_clearing(key: &str) -> std::rc::Rc<Runtime> {
    let config = PanelConfig {
        storage_key: key.to_string(),
        ..PanelConfig::default()
    };
    let runtime = Runtime::new(&config);
    runtime.start();
    runtime
}

#[wasm_bindgen_test]
fn font_step_updates_label_and_root_size() {
    let runtime = mount("a11yTestFont");
    runtime.dispatch(PanelMsg::StepFontSize(Step::Up));
    let label = dom::by_id("current-font-size").expect("label");
    assert_eq!(label.text_content().as_deref(), Some("113%"));
    let root = dom::document()
        .and_then(|doc| doc.document_element())
        .expect("root");
    assert!(
        root.get_attribute("style")
            .unwrap_or_default()
            .contains("font-size: 18px")
    );
}

#[wasm_bindgen_test]
fn toggle_flips_pressed_state_and_label() {
    let runtime = mount("a11yTestToggle");
    runtime.dispatch(PanelMsg::Toggle(ToggleControl::ReadingMode));
    let button = dom::by_id("reading-mode").expect("button");
    assert_eq!(button.get_attribute("aria-pressed").as_deref(), Some("true"));
    let state = button
        .query_selector(".toggle-state")
        .ok()
        .flatten()
        .and_then(|el| el.text_content());
    assert_eq!(state.as_deref(), Some("Desativar"));
    assert!(dom::body().expect("body").class_list().contains("reading-mode"));
}

#[wasm_bindgen_test]
fn reset_closes_panel_and_shows_notification() {
    let runtime = mount("a11yTestReset");
    runtime.dispatch(PanelMsg::TogglePanel);
    assert!(runtime.is_open());
    runtime.dispatch(PanelMsg::SelectTheme("dark".into()));
    runtime.dispatch(PanelMsg::Reset);

    assert!(!runtime.is_open());
    assert_eq!(root_attr("data-theme").as_deref(), Some("light"));
    let banner = dom::query(".notification").expect("notification shown");
    assert!(banner.class_list().contains("notification-success"));
    assert_eq!(banner.get_attribute("role").as_deref(), Some("alert"));
    assert_eq!(
        BrowserStorage::open().read("a11yTestReset").expect("readable"),
        None
    );
}

#[wasm_bindgen_test]
fn readable_text_skips_actions_and_hidden_nodes() {
    mount("a11yTestRegions");
    let section = dom::by_id("sobre").expect("section");
    assert_eq!(regions::readable_text(&section), "Sobre Texto da seção.");

    let sections = dom::query_all(".content-section");
    let unnamed = &sections[1];
    let id = regions::region_id(unnamed);
    assert!(id.starts_with("read-region-"));
    assert_eq!(regions::region_id(unnamed), id);
}

#[wasm_bindgen_test]
fn text_only_link_toggles_body_class_with_info_banner() {
    let runtime = mount("a11yTestTextOnly");
    wiring::wire(&runtime);
    let link: HtmlElement = dom::by_id("text-only")
        .expect("text-only link")
        .dyn_into()
        .expect("html element");
    link.click();
    let body = dom::body().expect("body");
    assert!(body.class_list().contains("text-only-mode"));
    let banner = dom::query(".notification").expect("notification shown");
    assert!(banner.class_list().contains("notification-info"));
    assert_eq!(banner.text_content().as_deref(), Some("Modo texto ativado"));

    link.click();
    assert!(!body.class_list().contains("text-only-mode"));
    assert_eq!(dom::query_all(".notification").len(), 1);
}

#[wasm_bindgen_test]
fn speech_engine_keeps_only_the_latest_handlers() {
    let mut engine = BrowserSpeech::new(Rc::new(|_: UtteranceEvent| {}));
    if !engine.is_supported() {
        return;
    }
    let utterance = |id| Utterance {
        id: UtteranceId::new(id),
        text: "Olá".into(),
        options: SpeechOptions {
            volume: 0.0,
            ..SpeechOptions::default()
        },
    };
    engine.speak(&utterance(1)).expect("first utterance accepted");
    assert_eq!(engine.bound_utterance(), Some(UtteranceId::new(1)));
    engine.speak(&utterance(2)).expect("second utterance accepted");
    assert_eq!(engine.bound_utterance(), Some(UtteranceId::new(2)));
    engine.cancel();
    assert_eq!(engine.bound_utterance(), None);
}
