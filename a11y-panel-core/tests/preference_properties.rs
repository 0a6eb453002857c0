//! Property tests for clamping and persist/reload round-trips.

use a11y_panel_core::store::STORAGE_KEY;
use a11y_panel_core::{
    FontFamily, LineSpacing, MemoryStorage, PrefUpdate, PreferenceStore, Step, Theme,
    ToggleControl,
};
use proptest::prelude::*;

fn arb_update() -> impl Strategy<Value = PrefUpdate> {
    let theme = prop_oneof![
        Just("light".to_string()),
        Just("dark".to_string()),
        Just("high-contrast".to_string()),
        Just("sepia".to_string()),
        "[a-z]{1,8}",
    ];
    let font = prop_oneof![
        Just(FontFamily::OpenSans.as_str().to_string()),
        Just(FontFamily::OpenDyslexic.as_str().to_string()),
        "[a-z-]{1,12}",
    ];
    let spacing = prop_oneof![
        Just(LineSpacing::Medium.as_str().to_string()),
        Just(LineSpacing::Large.as_str().to_string()),
        "[a-z]{1,8}",
    ];
    let control = prop_oneof![
        Just(ToggleControl::Animations),
        Just(ToggleControl::ReadingMode),
        Just(ToggleControl::ReadingMask),
        Just(ToggleControl::TextToSpeech),
    ];
    prop_oneof![
        any::<i64>().prop_map(PrefUpdate::FontSize),
        prop_oneof![Just(Step::Up), Just(Step::Down)].prop_map(PrefUpdate::StepFontSize),
        theme.prop_map(PrefUpdate::Theme),
        font.prop_map(PrefUpdate::Font),
        spacing.prop_map(PrefUpdate::LineSpacing),
        (control, any::<bool>()).prop_map(|(c, on)| PrefUpdate::Toggle(c, on)),
    ]
}

proptest! {
    #[test]
    fn font_size_update_clamps_any_integer(n in any::<i64>()) {
        let storage = MemoryStorage::new();
        let mut store = PreferenceStore::load(&storage, STORAGE_KEY);
        let prefs = store.update(&PrefUpdate::FontSize(n));
        prop_assert_eq!(i64::from(prefs.font_size.px()), n.clamp(12, 24));
    }

    #[test]
    fn reload_returns_last_updated_state(updates in prop::collection::vec(arb_update(), 1..24)) {
        let storage = MemoryStorage::new();
        let mut store = PreferenceStore::load(&storage, STORAGE_KEY);
        let mut last = *store.prefs();
        for update in &updates {
            last = store.update(update);
        }
        let reloaded = PreferenceStore::load(&storage, STORAGE_KEY);
        prop_assert_eq!(*reloaded.prefs(), last);
    }

    #[test]
    fn persisted_font_size_always_in_range(raw in any::<i64>()) {
        let storage = MemoryStorage::with_entry(STORAGE_KEY, &format!(r#"{{"fontSize":{raw}}}"#));
        let store = PreferenceStore::load(&storage, STORAGE_KEY);
        let px = store.prefs().font_size.px();
        prop_assert!((12..=24).contains(&px));
    }
}

#[test]
fn known_values_survive_reload() {
    let storage = MemoryStorage::new();
    let mut store = PreferenceStore::load(&storage, STORAGE_KEY);
    store.update(&PrefUpdate::Theme(Theme::Sepia.as_str().into()));
    store.update(&PrefUpdate::Font(FontFamily::Verdana.as_str().into()));
    store.update(&PrefUpdate::LineSpacing(LineSpacing::Large.as_str().into()));
    let reloaded = PreferenceStore::load(&storage, STORAGE_KEY);
    assert_eq!(reloaded.prefs().theme, Theme::Sepia);
    assert_eq!(reloaded.prefs().font, FontFamily::Verdana);
    assert_eq!(reloaded.prefs().line_spacing, LineSpacing::Large);
}
