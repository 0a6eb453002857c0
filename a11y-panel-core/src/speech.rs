//! Read-aloud controller: at most one active utterance, tied to the
//! text-to-speech preference.

use crate::text::collapse_whitespace;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtteranceId(u64);

impl UtteranceId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "utterance-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechOptions {
    /// BCP 47 language tag handed to the engine.
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    /// Preferred voice name, resolved from the engine's voice list.
    pub voice: Option<String>,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            lang: "pt-BR".to_string(),
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
            voice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub options: SpeechOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    pub name: String,
    pub lang: String,
}

/// First voice whose language tag starts with or contains `prefix`.
#[must_use]
pub fn select_voice<'a>(voices: &'a [VoiceInfo], prefix: &str) -> Option<&'a VoiceInfo> {
    if prefix.is_empty() {
        return None;
    }
    voices
        .iter()
        .find(|voice| voice.lang.starts_with(prefix))
        .or_else(|| voices.iter().find(|voice| voice.lang.contains(prefix)))
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SpeechError {
    #[error("speech synthesis is not supported")]
    Unsupported,
    #[error("speech engine error: {0}")]
    Engine(String),
}

/// Platform speech synthesizer.
///
/// Progress is reported back asynchronously as [`UtteranceEvent`]s carrying
/// the id of the utterance they belong to.
pub trait SpeechEngine {
    fn is_supported(&self) -> bool;

    /// Queue `utterance` for playback.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine refuses the utterance.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Stop any playback. Best effort.
    fn cancel(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceEventKind {
    Started,
    Ended,
    /// Stopped by a `cancel()`; browsers report this through their error callback.
    Canceled,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtteranceEvent {
    pub id: UtteranceId,
    pub kind: UtteranceEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveUtterance {
    pub id: UtteranceId,
    /// Id of the page region being read.
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpeechState {
    #[default]
    Idle,
    Speaking(ActiveUtterance),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    EmptyText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Speaking {
        id: UtteranceId,
        interrupted: Option<ActiveUtterance>,
    },
    Skipped(SkipReason),
    Failed {
        error: SpeechError,
        interrupted: Option<ActiveUtterance>,
    },
}

/// Result of feeding an engine event to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechTransition {
    Started(ActiveUtterance),
    Finished(ActiveUtterance),
    Canceled(ActiveUtterance),
    Failed(ActiveUtterance, String),
}

pub struct ReadAloudController<E>
where
    E: SpeechEngine,
{
    engine: E,
    options: SpeechOptions,
    enabled: bool,
    state: SpeechState,
    next_id: u64,
}

impl<E> ReadAloudController<E>
where
    E: SpeechEngine,
{
    pub const fn new(engine: E, options: SpeechOptions, enabled: bool) -> Self {
        Self {
            engine,
            options,
            enabled,
            state: SpeechState::Idle,
            next_id: 1,
        }
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.engine.is_supported()
    }

    #[must_use]
    pub const fn state(&self) -> &SpeechState {
        &self.state
    }

    #[must_use]
    pub const fn active(&self) -> Option<&ActiveUtterance> {
        match &self.state {
            SpeechState::Speaking(active) => Some(active),
            SpeechState::Idle => None,
        }
    }

    #[must_use]
    pub const fn is_speaking(&self) -> bool {
        matches!(self.state, SpeechState::Speaking(_))
    }

    #[must_use]
    pub const fn options(&self) -> &SpeechOptions {
        &self.options
    }

    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    pub const fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn set_voice(&mut self, voice: Option<String>) {
        self.options.voice = voice;
    }

    /// Read `text` aloud on behalf of `region`, replacing any active utterance.
    pub fn read(&mut self, region: &str, text: &str) -> ReadOutcome {
        if !self.enabled {
            return ReadOutcome::Skipped(SkipReason::Disabled);
        }
        let text = collapse_whitespace(text);
        if text.is_empty() {
            return ReadOutcome::Skipped(SkipReason::EmptyText);
        }

        let interrupted = self.cancel();
        let id = UtteranceId(self.next_id);
        self.next_id += 1;
        let utterance = Utterance {
            id,
            text,
            options: self.options.clone(),
        };

        match self.engine.speak(&utterance) {
            Ok(()) => {
                log::debug!("speaking {id} for region {region:?}");
                self.state = SpeechState::Speaking(ActiveUtterance {
                    id,
                    region: region.to_string(),
                });
                ReadOutcome::Speaking { id, interrupted }
            }
            Err(error) => {
                log::error!("speech engine refused {id}: {error}");
                ReadOutcome::Failed { error, interrupted }
            }
        }
    }

    /// Cancel the active utterance, if any, and return to idle.
    pub fn cancel(&mut self) -> Option<ActiveUtterance> {
        match std::mem::take(&mut self.state) {
            SpeechState::Speaking(active) => {
                log::debug!("canceling {}", active.id);
                self.engine.cancel();
                Some(active)
            }
            SpeechState::Idle => None,
        }
    }

    /// Follow the text-to-speech preference; disabling cancels immediately.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<ActiveUtterance> {
        self.enabled = enabled;
        if enabled { None } else { self.cancel() }
    }

    /// Apply an engine callback. Events for anything but the active utterance are stale.
    pub fn on_event(&mut self, event: &UtteranceEvent) -> Option<SpeechTransition> {
        let active = match &self.state {
            SpeechState::Speaking(active) if active.id == event.id => active.clone(),
            _ => {
                log::debug!("ignoring stale event {event:?}");
                return None;
            }
        };
        match &event.kind {
            UtteranceEventKind::Started => Some(SpeechTransition::Started(active)),
            UtteranceEventKind::Ended => {
                self.state = SpeechState::Idle;
                Some(SpeechTransition::Finished(active))
            }
            UtteranceEventKind::Canceled => {
                self.state = SpeechState::Idle;
                Some(SpeechTransition::Canceled(active))
            }
            UtteranceEventKind::Failed(reason) => {
                log::error!("read-aloud failed for {}: {reason}", active.id);
                self.state = SpeechState::Idle;
                Some(SpeechTransition::Failed(active, reason.clone()))
            }
        }
    }
}

/// Engine that records what it was asked to do; used natively and in tests.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub unsupported: bool,
    pub spoken: Vec<Utterance>,
    pub cancels: usize,
    /// When set, the next `speak` fails with this message.
    pub fail_next: Option<String>,
}

impl RecordingEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_id(&self) -> Option<UtteranceId> {
        self.spoken.last().map(|utterance| utterance.id)
    }
}

impl SpeechEngine for RecordingEngine {
    fn is_supported(&self) -> bool {
        !self.unsupported
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        if self.unsupported {
            return Err(SpeechError::Unsupported);
        }
        if let Some(reason) = self.fail_next.take() {
            return Err(SpeechError::Engine(reason));
        }
        self.spoken.push(utterance.clone());
        Ok(())
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}
