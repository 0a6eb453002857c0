//! Accessibility panel engine
//!
//! Platform-agnostic preference state, persistence and view synchronization for
//! a page's accessibility panel, plus the read-aloud and reading-mask state
//! machines. This crate has no browser dependencies; the web crate provides the
//! storage, view, speech and feedback implementations.

pub mod config;
pub mod feedback;
pub mod mask;
pub mod panel;
pub mod prefs;
pub mod scroll;
pub mod shortcuts;
pub mod snapshot;
pub mod speech;
pub mod storage;
pub mod store;
pub mod text;
pub mod view;

// Re-export commonly used types
pub use config::PanelConfig;
pub use feedback::{Feedback, Notice, RecordingFeedback, Severity};
pub use mask::{MaskTransition, ReadingMask};
pub use panel::{Panel, PanelMsg};
pub use prefs::{
    FontFamily, FontSize, LineSpacing, PrefUpdate, Preferences, Step, Theme, ToggleControl,
};
pub use scroll::ScrollZone;
pub use shortcuts::Shortcut;
pub use snapshot::SnapshotError;
pub use speech::{
    ActiveUtterance, ReadAloudController, ReadOutcome, RecordingEngine, SkipReason, SpeechEngine,
    SpeechError, SpeechOptions, SpeechState, SpeechTransition, Utterance, UtteranceEvent,
    UtteranceEventKind, UtteranceId, VoiceInfo, select_voice,
};
pub use storage::{MemoryStorage, PreferenceStorage, StorageError};
pub use store::PreferenceStore;
pub use text::collapse_whitespace;
pub use view::{MemoryView, Target, ViewSurface, ViewSynchronizer};
