//! Web Speech API engine.

use crate::dom;
use a11y_panel_core::{
    SpeechEngine, SpeechError, Utterance, UtteranceEvent, UtteranceEventKind, UtteranceId,
    VoiceInfo,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    SpeechSynthesis, SpeechSynthesisErrorCode, SpeechSynthesisErrorEvent, SpeechSynthesisEvent,
    SpeechSynthesisUtterance, SpeechSynthesisVoice,
};

/// Receives progress callbacks for utterances handed to the browser.
pub type EventSink = Rc<dyn Fn(UtteranceEvent)>;

type CallbackSlot = Rc<RefCell<Option<UtteranceCallbacks>>>;

/// Event handlers of the utterance in flight. Dropping detaches them from the
/// utterance before the closures are freed.
struct UtteranceCallbacks {
    id: UtteranceId,
    utterance: SpeechSynthesisUtterance,
    _on_start: Closure<dyn FnMut(SpeechSynthesisEvent)>,
    _on_end: Closure<dyn FnMut(SpeechSynthesisEvent)>,
    _on_error: Closure<dyn FnMut(SpeechSynthesisErrorEvent)>,
}

impl Drop for UtteranceCallbacks {
    fn drop(&mut self) {
        self.utterance.set_onstart(None);
        self.utterance.set_onend(None);
        self.utterance.set_onerror(None);
    }
}

pub struct BrowserSpeech {
    synth: Option<SpeechSynthesis>,
    sink: EventSink,
    callbacks: CallbackSlot,
}

impl BrowserSpeech {
    /// Bind to `window.speechSynthesis` if the browser exposes it.
    #[must_use]
    pub fn new(sink: EventSink) -> Self {
        let synth = dom::window().and_then(|win| win.speech_synthesis().ok());
        if synth.is_none() {
            log::warn!("window.speechSynthesis is not available");
        }
        Self {
            synth,
            sink,
            callbacks: Rc::new(RefCell::new(None)),
        }
    }

    /// Voices currently known to the browser; often empty until `voiceschanged`.
    #[must_use]
    pub fn voices(&self) -> Vec<VoiceInfo> {
        self.browser_voices()
            .iter()
            .map(|voice| VoiceInfo {
                name: voice.name(),
                lang: voice.lang(),
            })
            .collect()
    }

    #[must_use]
    pub const fn synthesis(&self) -> Option<&SpeechSynthesis> {
        self.synth.as_ref()
    }

    /// Id of the utterance whose handlers are still attached, if any.
    #[must_use]
    pub fn bound_utterance(&self) -> Option<UtteranceId> {
        self.callbacks.borrow().as_ref().map(|callbacks| callbacks.id)
    }

    fn browser_voices(&self) -> Vec<SpeechSynthesisVoice> {
        self.synth
            .as_ref()
            .map(|synth| {
                synth
                    .get_voices()
                    .iter()
                    .filter_map(|value| value.dyn_into::<SpeechSynthesisVoice>().ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Free the handlers of `id` once its terminal callback has returned.
    fn release_later(slot: &Weak<RefCell<Option<UtteranceCallbacks>>>, id: UtteranceId) {
        let slot = slot.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let Some(slot) = slot.upgrade() else {
                return;
            };
            let mut bound = slot.borrow_mut();
            if bound.as_ref().is_some_and(|callbacks| callbacks.id == id) {
                *bound = None;
            }
        });
    }

    fn bind_callbacks(&self, utterance: &SpeechSynthesisUtterance, id: UtteranceId) {
        let sink = Rc::clone(&self.sink);
        let on_start = Closure::<dyn FnMut(SpeechSynthesisEvent)>::new(move |_| {
            sink(UtteranceEvent {
                id,
                kind: UtteranceEventKind::Started,
            });
        });
        utterance.set_onstart(Some(on_start.as_ref().unchecked_ref()));

        let sink = Rc::clone(&self.sink);
        let slot = Rc::downgrade(&self.callbacks);
        let on_end = Closure::<dyn FnMut(SpeechSynthesisEvent)>::new(move |_| {
            sink(UtteranceEvent {
                id,
                kind: UtteranceEventKind::Ended,
            });
            Self::release_later(&slot, id);
        });
        utterance.set_onend(Some(on_end.as_ref().unchecked_ref()));

        let sink = Rc::clone(&self.sink);
        let slot = Rc::downgrade(&self.callbacks);
        let on_error = Closure::<dyn FnMut(SpeechSynthesisErrorEvent)>::new(
            move |event: SpeechSynthesisErrorEvent| {
                sink(UtteranceEvent {
                    id,
                    kind: error_kind(event.error()),
                });
                Self::release_later(&slot, id);
            },
        );
        utterance.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        // Replacing the previous set detaches and frees its handlers.
        *self.callbacks.borrow_mut() = Some(UtteranceCallbacks {
            id,
            utterance: utterance.clone(),
            _on_start: on_start,
            _on_end: on_end,
            _on_error: on_error,
        });
    }
}

/// Browsers report `cancel()` through the error callback.
fn error_kind(code: SpeechSynthesisErrorCode) -> UtteranceEventKind {
    match code {
        SpeechSynthesisErrorCode::Canceled | SpeechSynthesisErrorCode::Interrupted => {
            UtteranceEventKind::Canceled
        }
        other => UtteranceEventKind::Failed(format!("{other:?}")),
    }
}

impl SpeechEngine for BrowserSpeech {
    fn is_supported(&self) -> bool {
        self.synth.is_some()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        let synth = self.synth.as_ref().ok_or(SpeechError::Unsupported)?;
        let native = SpeechSynthesisUtterance::new_with_text(&utterance.text)
            .map_err(|err| SpeechError::Engine(dom::js_error_message(&err)))?;
        let options = &utterance.options;
        native.set_lang(&options.lang);
        native.set_rate(options.rate);
        native.set_pitch(options.pitch);
        native.set_volume(options.volume);
        if let Some(name) = options.voice.as_deref() {
            let voice = self.browser_voices().into_iter().find(|v| v.name() == name);
            native.set_voice(voice.as_ref());
        }

        self.bind_callbacks(&native, utterance.id);
        synth.speak(&native);
        Ok(())
    }

    fn cancel(&mut self) {
        *self.callbacks.borrow_mut() = None;
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }
}
