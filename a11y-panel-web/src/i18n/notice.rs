//! Localized text for core notices.

use crate::i18n::render::{t, tr};
use a11y_panel_core::Notice;
use std::collections::BTreeMap;

/// Render a notice in the current language.
#[must_use]
pub fn notice_text(notice: &Notice) -> String {
    let percent;
    let name;
    let mut args = BTreeMap::new();
    match notice {
        Notice::FontSizeChanged { percent: value } => {
            percent = value.to_string();
            args.insert("percent", percent.as_str());
        }
        Notice::ThemeChanged(theme) => {
            name = t(&format!("theme.names.{theme}"));
            args.insert("name", name.as_str());
        }
        Notice::FontChanged(font) => {
            name = t(&format!("font.names.{font}"));
            args.insert("name", name.as_str());
        }
        Notice::LineSpacingChanged(spacing) => {
            name = t(&format!("line_spacing.names.{spacing}"));
            args.insert("name", name.as_str());
        }
        Notice::Toggled { control, .. } => {
            name = t(&format!("toggle.labels.{}", control.key()));
            args.insert("label", name.as_str());
        }
        _ => {}
    }
    tr(notice.key(), Some(&args))
}

/// Label of a toggle button: the action pressing it would take.
#[must_use]
pub fn toggle_action(pressed: bool) -> String {
    t(if pressed {
        "toggle.action.on"
    } else {
        "toggle.action.off"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11y_panel_core::{Theme, ToggleControl};

    #[test]
    fn renders_portuguese_by_default() {
        assert_eq!(
            notice_text(&Notice::FontSizeChanged { percent: 113 }),
            "Tamanho da fonte alterado para 113 por cento"
        );
        assert_eq!(
            notice_text(&Notice::ThemeChanged(Theme::HighContrast)),
            "Tema alterado para Alto contraste"
        );
        assert_eq!(
            notice_text(&Notice::Toggled {
                control: ToggleControl::ReadingMask,
                enabled: true
            }),
            "Máscara de leitura ativado"
        );
        assert_eq!(
            notice_text(&Notice::TextOnlyToggled { enabled: true }),
            "Modo texto ativado"
        );
        assert_eq!(toggle_action(false), "Ativar");
    }
}
