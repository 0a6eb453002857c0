#[cfg(target_arch = "wasm32")]
use a11y_panel_web::dom;
use a11y_panel_core::{FontFamily, LineSpacing, Notice, PanelConfig, ToggleControl};
use a11y_panel_web::{config, i18n};
use std::collections::BTreeMap;

#[cfg(target_arch = "wasm32")]
#[test]
fn dom_helpers_find_window() {
    assert!(dom::window().is_some());
    assert!(dom::document().is_some());
}

#[test]
fn english_bundle_renders_notices() {
    assert!(i18n::set_lang("en"));
    assert_eq!(i18n::current_lang(), "en");
    assert_eq!(
        i18n::notice_text(&Notice::FontChanged(FontFamily::OpenDyslexic)),
        "Font changed to OpenDyslexic"
    );
    assert_eq!(
        i18n::notice_text(&Notice::LineSpacingChanged(LineSpacing::Large)),
        "Line spacing changed to Large"
    );
    assert_eq!(
        i18n::notice_text(&Notice::Toggled {
            control: ToggleControl::TextToSpeech,
            enabled: false
        }),
        "Read aloud off"
    );
    assert_eq!(i18n::toggle_action(true), "Turn off");
}

#[test]
fn missing_keys_render_as_key() {
    i18n::set_lang("en");
    assert_eq!(i18n::t("missing.key"), "missing.key");

    let mut vars = BTreeMap::new();
    vars.insert("percent", "125");
    assert_eq!(
        i18n::tr("font_size.changed", Some(&vars)),
        "Font size changed to 125 percent"
    );
}

#[test]
fn every_notice_has_text_in_every_locale() {
    let notices = [
        Notice::PanelOpened,
        Notice::PanelClosed,
        Notice::SettingsReset,
        Notice::AllSettingsReset,
        Notice::TextOnlyToggled { enabled: true },
        Notice::TextOnlyToggled { enabled: false },
        Notice::SpeechStarted,
        Notice::SpeechFinished,
        Notice::SpeechStopped,
        Notice::SpeechFailed,
        Notice::SpeechUnsupported,
        Notice::NavigatedToMain,
        Notice::NavigatedToMenu,
    ];
    for meta in i18n::locales() {
        assert!(i18n::set_lang(meta.code));
        for notice in &notices {
            let text = i18n::notice_text(notice);
            assert_ne!(text, notice.key(), "{} lacks {}", meta.code, notice.key());
        }
    }
}

#[test]
fn page_language_selects_locale() {
    let cfg = config::load();
    assert_eq!(config::resolve_locale(&cfg, Some("en")), "en");
    assert_eq!(
        config::resolve_locale(&PanelConfig::default(), Some("EN-gb")),
        "en"
    );
}
