//! Page-wide keyboard shortcuts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Alt+1
    FocusMain,
    /// Alt+2
    FocusMenu,
    /// Alt+A
    TogglePanel,
    /// Alt+S
    StopSpeech,
    /// Escape; only acts while the panel is open.
    ClosePanel,
}

impl Shortcut {
    /// Map a `KeyboardEvent.key` value and Alt state to a shortcut.
    #[must_use]
    pub fn from_key(key: &str, alt: bool) -> Option<Self> {
        if key == "Escape" {
            return Some(Self::ClosePanel);
        }
        if !alt {
            return None;
        }
        match key {
            "1" => Some(Self::FocusMain),
            "2" => Some(Self::FocusMenu),
            "a" | "A" => Some(Self::TogglePanel),
            "s" | "S" => Some(Self::StopSpeech),
            _ => None,
        }
    }

    /// Whether the browser's default action for the key should be suppressed.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        !matches!(self, Self::ClosePanel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alt_combinations_map_to_shortcuts() {
        assert_eq!(Shortcut::from_key("1", true), Some(Shortcut::FocusMain));
        assert_eq!(Shortcut::from_key("2", true), Some(Shortcut::FocusMenu));
        assert_eq!(Shortcut::from_key("a", true), Some(Shortcut::TogglePanel));
        assert_eq!(Shortcut::from_key("S", true), Some(Shortcut::StopSpeech));
        assert_eq!(Shortcut::from_key("Escape", false), Some(Shortcut::ClosePanel));
    }

    #[test]
    fn plain_keys_are_ignored() {
        assert_eq!(Shortcut::from_key("a", false), None);
        assert_eq!(Shortcut::from_key("1", false), None);
        assert_eq!(Shortcut::from_key("x", true), None);
    }
}
