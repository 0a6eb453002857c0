//! Message dispatch for the accessibility panel.
//!
//! [`Panel`] is the single owned context for a page: the preference store, the
//! read-aloud controller and the reading mask. Every user action arrives as a
//! [`PanelMsg`] and is handled to completion (update, persist, view sync,
//! feedback) before the next one starts.

use crate::config::PanelConfig;
use crate::feedback::{Feedback, Notice, Severity};
use crate::mask::{MaskTransition, ReadingMask};
use crate::prefs::{PrefUpdate, Preferences, Step, ToggleControl};
use crate::scroll::ScrollZone;
use crate::shortcuts::Shortcut;
use crate::speech::{
    ActiveUtterance, ReadAloudController, ReadOutcome, SpeechEngine, SpeechTransition,
    UtteranceEvent, VoiceInfo, select_voice,
};
use crate::storage::PreferenceStorage;
use crate::store::PreferenceStore;
use crate::view::{
    MAIN_CONTENT_ID, MASK_OVERLAY_ID, NAVBAR_SELECTOR, OPTIONS_SELECTOR, PANEL_ID,
    PANEL_TOGGLE_ID, Target, ViewSurface, ViewSynchronizer,
};

/// Class carried by the region currently being read aloud.
pub const READING_ALOUD_CLASS: &str = "reading-aloud";
/// Body class of the session-only text mode.
pub const TEXT_ONLY_CLASS: &str = "text-only-mode";

#[derive(Debug, Clone, PartialEq)]
pub enum PanelMsg {
    TogglePanel,
    /// Close if open. Keyboard dismissal restores focus to the toggle and announces.
    ClosePanel {
        restore_focus: bool,
    },
    StepFontSize(Step),
    SetFontSize(i64),
    SelectTheme(String),
    SelectFont(String),
    SelectLineSpacing(String),
    Toggle(ToggleControl),
    /// Session-only; never persisted.
    ToggleTextOnly,
    Reset,
    ReadRegion {
        region: String,
        text: String,
    },
    Speech(UtteranceEvent),
    StopSpeech,
    VoicesChanged(Vec<VoiceInfo>),
    PointerMoved {
        client_y: i32,
    },
    OptionsScrolled {
        scroll_top: f64,
        scroll_height: f64,
        client_height: f64,
    },
    Shortcut(Shortcut),
}

/// Work the platform layer must do after a message, beyond view mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelEffects {
    pub mask: MaskTransition,
    /// Text-to-speech was just enabled: read the section in view.
    pub read_current_section: bool,
}

impl Default for PanelEffects {
    fn default() -> Self {
        Self {
            mask: MaskTransition::Unchanged,
            read_current_section: false,
        }
    }
}

pub struct Panel<S, E>
where
    S: PreferenceStorage,
    E: SpeechEngine,
{
    store: PreferenceStore<S>,
    speech: ReadAloudController<E>,
    mask: ReadingMask,
    open: bool,
    text_only: bool,
    voice_prefix: String,
}

impl<S, E> Panel<S, E>
where
    S: PreferenceStorage,
    E: SpeechEngine,
{
    /// Load persisted preferences and build the controllers around them.
    pub fn new(config: &PanelConfig, storage: S, engine: E) -> Self {
        let store = PreferenceStore::load(storage, config.storage_key.clone());
        let speaking_allowed = store.prefs().text_to_speech_enabled && engine.is_supported();
        Self {
            speech: ReadAloudController::new(engine, config.speech.clone(), speaking_allowed),
            store,
            mask: ReadingMask::default(),
            open: false,
            text_only: false,
            voice_prefix: config.voice_lang_prefix.clone(),
        }
    }

    #[must_use]
    pub const fn prefs(&self) -> &Preferences {
        self.store.prefs()
    }

    #[must_use]
    pub const fn store(&self) -> &PreferenceStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn speech(&self) -> &ReadAloudController<E> {
        &self.speech
    }

    pub const fn speech_mut(&mut self) -> &mut ReadAloudController<E> {
        &mut self.speech
    }

    #[must_use]
    pub const fn mask(&self) -> ReadingMask {
        self.mask
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn text_only(&self) -> bool {
        self.text_only
    }

    /// Startup pass: render loaded preferences and reflect missing capabilities.
    pub fn start(&mut self, view: &mut impl ViewSurface) -> PanelEffects {
        let prefs = *self.prefs();
        ViewSynchronizer::sync(&prefs, view);
        if !self.speech.is_supported() {
            log::info!("speech synthesis unavailable; disabling read-aloud control");
            view.disable(
                Target::Element(ToggleControl::TextToSpeech.element_id()),
                &Notice::SpeechUnsupported,
            );
        }
        PanelEffects {
            mask: self.mask.set_enabled(prefs.reading_mask_enabled),
            read_current_section: false,
        }
    }

    /// Handle one message to completion.
    pub fn dispatch(
        &mut self,
        msg: PanelMsg,
        view: &mut impl ViewSurface,
        feedback: &mut impl Feedback,
    ) -> PanelEffects {
        log::trace!("dispatch {msg:?}");
        let mut effects = PanelEffects::default();
        match msg {
            PanelMsg::TogglePanel => self.set_open(!self.open, view, feedback),
            PanelMsg::ClosePanel { restore_focus } => {
                if self.open {
                    self.open = false;
                    Self::render_open(false, view);
                    if restore_focus {
                        view.focus(Target::Element(PANEL_TOGGLE_ID));
                        feedback.announce(Notice::PanelClosed);
                    }
                }
            }
            PanelMsg::StepFontSize(step) => {
                self.font_size_update(&PrefUpdate::StepFontSize(step), view, feedback);
            }
            PanelMsg::SetFontSize(px) => {
                self.font_size_update(&PrefUpdate::FontSize(px), view, feedback);
            }
            PanelMsg::SelectTheme(raw) => {
                if let Some(prefs) = self.apply(&PrefUpdate::Theme(raw), view) {
                    feedback.announce(Notice::ThemeChanged(prefs.theme));
                }
            }
            PanelMsg::SelectFont(raw) => {
                if let Some(prefs) = self.apply(&PrefUpdate::Font(raw), view) {
                    feedback.announce(Notice::FontChanged(prefs.font));
                }
            }
            PanelMsg::SelectLineSpacing(raw) => {
                if let Some(prefs) = self.apply(&PrefUpdate::LineSpacing(raw), view) {
                    feedback.announce(Notice::LineSpacingChanged(prefs.line_spacing));
                }
            }
            PanelMsg::Toggle(control) => {
                effects = self.toggle(control, view, feedback);
            }
            PanelMsg::ToggleTextOnly => {
                self.text_only = !self.text_only;
                let enabled = self.text_only;
                view.set_class(Target::Body, TEXT_ONLY_CLASS, enabled);
                let severity = if enabled {
                    Severity::Info
                } else {
                    Severity::Success
                };
                feedback.notify(Notice::TextOnlyToggled { enabled }, severity);
                feedback.announce(Notice::TextOnlyToggled { enabled });
            }
            PanelMsg::Reset => {
                effects = self.reset(view, feedback);
            }
            PanelMsg::ReadRegion { region, text } => {
                self.read_region(&region, &text, view, feedback);
            }
            PanelMsg::Speech(event) => self.speech_event(&event, view, feedback),
            PanelMsg::StopSpeech => {
                if let Some(active) = self.speech.cancel() {
                    Self::clear_region(&active, view);
                    feedback.announce(Notice::SpeechStopped);
                }
            }
            PanelMsg::VoicesChanged(voices) => {
                let voice = select_voice(&voices, &self.voice_prefix).map(|v| v.name.clone());
                log::debug!("preferred voice: {voice:?}");
                self.speech.set_voice(voice);
            }
            PanelMsg::PointerMoved { client_y } => {
                if self.mask.is_active() {
                    view.set_style(
                        Target::Element(MASK_OVERLAY_ID),
                        "background-position",
                        &ReadingMask::position_for(client_y),
                    );
                }
            }
            PanelMsg::OptionsScrolled {
                scroll_top,
                scroll_height,
                client_height,
            } => {
                let zone = ScrollZone::classify(scroll_top, scroll_height, client_height);
                for candidate in ScrollZone::ALL {
                    view.set_class(
                        Target::Query(OPTIONS_SELECTOR),
                        candidate.class(),
                        candidate == zone,
                    );
                }
            }
            PanelMsg::Shortcut(shortcut) => {
                effects = self.shortcut(shortcut, view, feedback);
            }
        }
        effects
    }

    fn shortcut(
        &mut self,
        shortcut: Shortcut,
        view: &mut impl ViewSurface,
        feedback: &mut impl Feedback,
    ) -> PanelEffects {
        match shortcut {
            Shortcut::FocusMain => {
                view.focus(Target::Element(MAIN_CONTENT_ID));
                feedback.announce(Notice::NavigatedToMain);
                PanelEffects::default()
            }
            Shortcut::FocusMenu => {
                view.focus(Target::Query(NAVBAR_SELECTOR));
                feedback.announce(Notice::NavigatedToMenu);
                PanelEffects::default()
            }
            Shortcut::TogglePanel => self.dispatch(PanelMsg::TogglePanel, view, feedback),
            Shortcut::StopSpeech => self.dispatch(PanelMsg::StopSpeech, view, feedback),
            Shortcut::ClosePanel => self.dispatch(
                PanelMsg::ClosePanel {
                    restore_focus: true,
                },
                view,
                feedback,
            ),
        }
    }

    fn set_open(&mut self, open: bool, view: &mut impl ViewSurface, feedback: &mut impl Feedback) {
        self.open = open;
        Self::render_open(open, view);
        feedback.announce(if open {
            Notice::PanelOpened
        } else {
            Notice::PanelClosed
        });
    }

    fn render_open(open: bool, view: &mut impl ViewSurface) {
        view.set_class(Target::Element(PANEL_ID), "expanded", open);
        view.set_attribute(
            Target::Element(PANEL_TOGGLE_ID),
            "aria-expanded",
            if open { "true" } else { "false" },
        );
    }

    /// Persist and re-render only when `update` actually changes something.
    fn apply(&mut self, update: &PrefUpdate, view: &mut impl ViewSurface) -> Option<Preferences> {
        let mut probe = *self.prefs();
        if !probe.apply(update) {
            return None;
        }
        let prefs = self.store.update(update);
        ViewSynchronizer::sync(&prefs, view);
        Some(prefs)
    }

    fn font_size_update(
        &mut self,
        update: &PrefUpdate,
        view: &mut impl ViewSurface,
        feedback: &mut impl Feedback,
    ) {
        if let Some(prefs) = self.apply(update, view) {
            feedback.announce(Notice::FontSizeChanged {
                percent: prefs.font_size.percent(),
            });
        }
    }

    fn toggle(
        &mut self,
        control: ToggleControl,
        view: &mut impl ViewSurface,
        feedback: &mut impl Feedback,
    ) -> PanelEffects {
        let enabled = !self.prefs().toggle(control);
        let mut effects = PanelEffects::default();
        if self
            .apply(&PrefUpdate::Toggle(control, enabled), view)
            .is_none()
        {
            return effects;
        }
        feedback.announce(Notice::Toggled { control, enabled });

        match control {
            ToggleControl::ReadingMask => effects.mask = self.mask.set_enabled(enabled),
            ToggleControl::TextToSpeech => {
                let speaking_allowed = enabled && self.speech.is_supported();
                if let Some(active) = self.speech.set_enabled(speaking_allowed) {
                    Self::clear_region(&active, view);
                }
                effects.read_current_section = speaking_allowed;
            }
            ToggleControl::Animations | ToggleControl::ReadingMode => {}
        }
        effects
    }

    fn reset(&mut self, view: &mut impl ViewSurface, feedback: &mut impl Feedback) -> PanelEffects {
        let prefs = self.store.reset();
        if let Some(active) = self.speech.set_enabled(false) {
            Self::clear_region(&active, view);
        }
        let mask = self.mask.set_enabled(false);
        ViewSynchronizer::sync(&prefs, view);
        self.open = false;
        Self::render_open(false, view);
        feedback.notify(Notice::SettingsReset, Severity::Success);
        feedback.announce(Notice::AllSettingsReset);
        log::info!("accessibility settings reset to defaults");
        PanelEffects {
            mask,
            read_current_section: false,
        }
    }

    fn read_region(
        &mut self,
        region: &str,
        text: &str,
        view: &mut impl ViewSurface,
        feedback: &mut impl Feedback,
    ) {
        match self.speech.read(region, text) {
            ReadOutcome::Speaking { interrupted, .. } => {
                if let Some(previous) = interrupted {
                    Self::clear_region(&previous, view);
                }
            }
            ReadOutcome::Skipped(reason) => {
                log::debug!("read-aloud of {region:?} skipped: {reason:?}");
            }
            ReadOutcome::Failed { interrupted, .. } => {
                if let Some(previous) = interrupted {
                    Self::clear_region(&previous, view);
                }
                feedback.notify(Notice::SpeechFailed, Severity::Error);
            }
        }
    }

    fn speech_event(
        &mut self,
        event: &UtteranceEvent,
        view: &mut impl ViewSurface,
        feedback: &mut impl Feedback,
    ) {
        let Some(transition) = self.speech.on_event(event) else {
            return;
        };
        match transition {
            SpeechTransition::Started(active) => {
                view.set_class(Target::Element(&active.region), READING_ALOUD_CLASS, true);
                feedback.announce(Notice::SpeechStarted);
            }
            SpeechTransition::Finished(active) => {
                Self::clear_region(&active, view);
                feedback.announce(Notice::SpeechFinished);
            }
            SpeechTransition::Canceled(active) => Self::clear_region(&active, view),
            SpeechTransition::Failed(active, _) => {
                Self::clear_region(&active, view);
                feedback.notify(Notice::SpeechFailed, Severity::Error);
            }
        }
    }

    fn clear_region(active: &ActiveUtterance, view: &mut impl ViewSurface) {
        view.set_class(Target::Element(&active.region), READING_ALOUD_CLASS, false);
    }
}
