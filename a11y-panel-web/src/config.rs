//! Embedded panel configuration and locale resolution.

use crate::i18n;
use a11y_panel_core::PanelConfig;

const PANEL_CONFIG: &str = include_str!("../static/config/panel.json");

/// Load the bundled configuration; a malformed file falls back to defaults.
#[must_use]
pub fn load() -> PanelConfig {
    parse(PANEL_CONFIG)
}

fn parse(json: &str) -> PanelConfig {
    PanelConfig::from_json(json).unwrap_or_else(|err| {
        log::error!("invalid panel configuration, using defaults: {err}");
        PanelConfig::default()
    })
}

/// UI locale: the configured one, else the page's `<html lang>`, else the default.
#[must_use]
pub fn resolve_locale(config: &PanelConfig, html_lang: Option<&str>) -> String {
    if let Some(locale) = config.locale.as_deref()
        && i18n::is_supported(locale)
    {
        return locale.to_string();
    }
    html_lang
        .and_then(|lang| lang.split(['-', '_']).next())
        .map(str::to_ascii_lowercase)
        .filter(|primary| i18n::is_supported(primary))
        .unwrap_or_else(|| i18n::DEFAULT_LANG.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_parses() {
        let cfg = load();
        assert_eq!(cfg.storage_key, "accessibilitySettings");
        assert_eq!(cfg.speech.lang, "pt-BR");
        assert_eq!(cfg.voice_lang_prefix, "pt");
    }

    #[test]
    fn malformed_config_uses_defaults() {
        assert_eq!(parse("{not json"), PanelConfig::default());
    }

    #[test]
    fn locale_prefers_config_then_page() {
        let mut cfg = PanelConfig::default();
        assert_eq!(resolve_locale(&cfg, Some("en-US")), "en");
        assert_eq!(resolve_locale(&cfg, Some("pt-BR")), "pt");
        assert_eq!(resolve_locale(&cfg, Some("fr")), "pt");
        assert_eq!(resolve_locale(&cfg, None), "pt");

        cfg.locale = Some("en".into());
        assert_eq!(resolve_locale(&cfg, Some("pt-BR")), "en");
        cfg.locale = Some("xx".into());
        assert_eq!(resolve_locale(&cfg, Some("en")), "en");
    }
}
