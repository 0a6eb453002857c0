//! User-visible notifications and assistive-technology announcements.
//!
//! The core only describes *what* to say with [`Notice`]; rendering to text
//! (and translation) belongs to the platform implementation of [`Feedback`].

use crate::prefs::{FontFamily, LineSpacing, Theme, ToggleControl};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    PanelOpened,
    PanelClosed,
    FontSizeChanged { percent: u16 },
    ThemeChanged(Theme),
    FontChanged(FontFamily),
    LineSpacingChanged(LineSpacing),
    Toggled { control: ToggleControl, enabled: bool },
    TextOnlyToggled { enabled: bool },
    SettingsReset,
    AllSettingsReset,
    SpeechStarted,
    SpeechFinished,
    SpeechStopped,
    SpeechFailed,
    SpeechUnsupported,
    NavigatedToMain,
    NavigatedToMenu,
}

impl Notice {
    /// Translation key for this notice.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::PanelOpened => "panel.opened",
            Self::PanelClosed => "panel.closed",
            Self::FontSizeChanged { .. } => "font_size.changed",
            Self::ThemeChanged(_) => "theme.changed",
            Self::FontChanged(_) => "font.changed",
            Self::LineSpacingChanged(_) => "line_spacing.changed",
            Self::Toggled { enabled: true, .. } => "toggle.enabled",
            Self::Toggled { enabled: false, .. } => "toggle.disabled",
            Self::TextOnlyToggled { enabled: true } => "text_only.enabled",
            Self::TextOnlyToggled { enabled: false } => "text_only.disabled",
            Self::SettingsReset => "reset.notice",
            Self::AllSettingsReset => "reset.announce",
            Self::SpeechStarted => "speech.started",
            Self::SpeechFinished => "speech.finished",
            Self::SpeechStopped => "speech.stopped",
            Self::SpeechFailed => "speech.failed",
            Self::SpeechUnsupported => "speech.unsupported",
            Self::NavigatedToMain => "nav.main",
            Self::NavigatedToMenu => "nav.menu",
        }
    }
}

/// Fire-and-forget feedback surface.
pub trait Feedback {
    /// Show a transient banner to every user.
    fn notify(&mut self, notice: Notice, severity: Severity);

    /// Speak through the assistive-technology live region.
    fn announce(&mut self, notice: Notice);
}

/// Collects notices in order; used natively and by tests.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pub notifications: Vec<(Notice, Severity)>,
    pub announcements: Vec<Notice>,
}

impl RecordingFeedback {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_announcement(&self) -> Option<&Notice> {
        self.announcements.last()
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
        self.announcements.clear();
    }
}

impl Feedback for RecordingFeedback {
    fn notify(&mut self, notice: Notice, severity: Severity) {
        self.notifications.push((notice, severity));
    }

    fn announce(&mut self, notice: Notice) {
        self.announcements.push(notice);
    }
}
