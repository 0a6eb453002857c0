//! User-configurable accessibility preferences and their value domains.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root font size in CSS pixels, always within [`FontSize::MIN`, `FontSize::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FontSize(u8);

impl FontSize {
    pub const MIN: u8 = 12;
    pub const MAX: u8 = 24;
    pub const STEP: u8 = 2;
    pub const BASE: u8 = 16;

    /// Build a font size from an arbitrary integer, clamping into range.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        // Clamped into [12, 24] above, so the narrowing cannot truncate.
        Self(u8::try_from(clamped).unwrap_or(Self::BASE))
    }

    #[must_use]
    pub const fn px(self) -> u8 {
        self.0
    }

    /// Move one step up or down, saturating at the bounds.
    #[must_use]
    pub fn step(self, step: Step) -> Self {
        let delta = i64::from(Self::STEP);
        match step {
            Step::Up => Self::clamped(i64::from(self.0) + delta),
            Step::Down => Self::clamped(i64::from(self.0) - delta),
        }
    }

    /// Size relative to the 16px base, rounded to a whole percent.
    #[must_use]
    pub fn percent(self) -> u16 {
        let base = u16::from(Self::BASE);
        (u16::from(self.0) * 100 + base / 2) / base
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(Self::BASE)
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    HighContrast,
    Sepia,
}

impl Theme {
    pub const ALL: [Self; 4] = [Self::Light, Self::Dark, Self::HighContrast, Self::Sepia];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::HighContrast => "high-contrast",
            Self::Sepia => "sepia",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    #[default]
    OpenSans,
    Arial,
    Verdana,
    OpenDyslexic,
}

impl FontFamily {
    pub const ALL: [Self; 4] = [Self::OpenSans, Self::Arial, Self::Verdana, Self::OpenDyslexic];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenSans => "open-sans",
            Self::Arial => "arial",
            Self::Verdana => "verdana",
            Self::OpenDyslexic => "open-dyslexic",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontFamily {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|font| font.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LineSpacing {
    #[default]
    Normal,
    Medium,
    Large,
}

impl LineSpacing {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Medium, Self::Large];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for LineSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineSpacing {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|spacing| spacing.as_str() == s)
            .ok_or(())
    }
}

/// The on/off controls of the panel, one per boolean preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleControl {
    Animations,
    ReadingMode,
    ReadingMask,
    TextToSpeech,
}

impl ToggleControl {
    pub const ALL: [Self; 4] = [
        Self::Animations,
        Self::ReadingMode,
        Self::ReadingMask,
        Self::TextToSpeech,
    ];

    /// Id of the button element driving this control.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Animations => "animation-toggle",
            Self::ReadingMode => "reading-mode",
            Self::ReadingMask => "reading-mask",
            Self::TextToSpeech => "text-to-speech",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Animations => "animations",
            Self::ReadingMode => "reading_mode",
            Self::ReadingMask => "reading_mask",
            Self::TextToSpeech => "text_to_speech",
        }
    }

    #[must_use]
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|control| control.element_id() == id)
    }
}

/// A single requested change, validated by [`Preferences::apply`].
///
/// Enum-valued fields carry the raw string from the control so that values
/// outside the known set can be rejected without touching the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefUpdate {
    FontSize(i64),
    StepFontSize(Step),
    Theme(String),
    Font(String),
    LineSpacing(String),
    Toggle(ToggleControl, bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub font_size: FontSize,
    pub theme: Theme,
    pub font: FontFamily,
    pub line_spacing: LineSpacing,
    pub animations_enabled: bool,
    pub reading_mode: bool,
    pub reading_mask_enabled: bool,
    pub text_to_speech_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            font_size: FontSize::default(),
            theme: Theme::default(),
            font: FontFamily::default(),
            line_spacing: LineSpacing::default(),
            animations_enabled: true,
            reading_mode: false,
            reading_mask_enabled: false,
            text_to_speech_enabled: false,
        }
    }
}

impl Preferences {
    #[must_use]
    pub const fn toggle(&self, control: ToggleControl) -> bool {
        match control {
            ToggleControl::Animations => self.animations_enabled,
            ToggleControl::ReadingMode => self.reading_mode,
            ToggleControl::ReadingMask => self.reading_mask_enabled,
            ToggleControl::TextToSpeech => self.text_to_speech_enabled,
        }
    }

    pub fn set_toggle(&mut self, control: ToggleControl, enabled: bool) {
        let slot = match control {
            ToggleControl::Animations => &mut self.animations_enabled,
            ToggleControl::ReadingMode => &mut self.reading_mode,
            ToggleControl::ReadingMask => &mut self.reading_mask_enabled,
            ToggleControl::TextToSpeech => &mut self.text_to_speech_enabled,
        };
        *slot = enabled;
    }

    /// Validate and merge one update. Returns whether any field changed.
    pub fn apply(&mut self, update: &PrefUpdate) -> bool {
        let before = *self;
        match update {
            PrefUpdate::FontSize(px) => self.font_size = FontSize::clamped(*px),
            PrefUpdate::StepFontSize(step) => self.font_size = self.font_size.step(*step),
            PrefUpdate::Theme(raw) => match raw.parse() {
                Ok(theme) => self.theme = theme,
                Err(()) => log::debug!("ignoring unknown theme {raw:?}"),
            },
            PrefUpdate::Font(raw) => match raw.parse() {
                Ok(font) => self.font = font,
                Err(()) => log::debug!("ignoring unknown font {raw:?}"),
            },
            PrefUpdate::LineSpacing(raw) => match raw.parse() {
                Ok(spacing) => self.line_spacing = spacing,
                Err(()) => log::debug!("ignoring unknown line spacing {raw:?}"),
            },
            PrefUpdate::Toggle(control, enabled) => self.set_toggle(*control, *enabled),
        }
        before != *self
    }
}
