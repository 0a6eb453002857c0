use crate::i18n::locales::{is_supported, load_translations};
use serde_json::Value;
use std::cell::RefCell;

/// Default UI language; also the fallback for missing keys.
pub const DEFAULT_LANG: &str = "pt";

pub struct I18nBundle {
    pub lang: String,
    pub translations: Value,
    pub fallback: Value,
}

fn build_bundle(lang: &str) -> Option<I18nBundle> {
    if !is_supported(lang) {
        return None;
    }
    let fallback = load_translations(DEFAULT_LANG)?;
    let translations = load_translations(lang)?;

    Some(I18nBundle {
        lang: lang.to_string(),
        translations,
        fallback,
    })
}

fn fallback_bundle() -> I18nBundle {
    let fallback =
        load_translations(DEFAULT_LANG).unwrap_or(Value::Object(serde_json::Map::new()));

    I18nBundle {
        lang: DEFAULT_LANG.to_string(),
        translations: fallback.clone(),
        fallback,
    }
}

thread_local! {
    pub(super) static CURRENT: RefCell<I18nBundle> =
        RefCell::new(build_bundle(DEFAULT_LANG).unwrap_or_else(fallback_bundle));
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

/// Set the language used for announcements and notifications.
///
/// Unsupported codes leave the current bundle in place and return false.
pub fn set_lang(lang: &str) -> bool {
    match build_bundle(lang) {
        Some(bundle) => {
            CURRENT.with(|cell| cell.replace(bundle));
            true
        }
        None => {
            log::warn!("unsupported locale {lang:?}; keeping {}", current_lang());
            false
        }
    }
}

/// Get the current active language code
#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_bundle_loads_requested_locale() {
        let bundle = build_bundle("en").expect("bundle should load");
        assert_eq!(bundle.lang, "en");
        assert!(bundle.translations.is_object());
        assert!(bundle.fallback.is_object());
    }

    #[test]
    fn fallback_bundle_defaults_to_portuguese() {
        let bundle = fallback_bundle();
        assert_eq!(bundle.lang, "pt");
        assert!(bundle.translations.is_object());
    }

    #[test]
    fn unsupported_lang_is_rejected() {
        assert!(build_bundle("klingon").is_none());
        assert!(!set_lang("klingon"));
        assert_eq!(current_lang(), "pt");
    }
}
