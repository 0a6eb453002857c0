//! Browser runtime: owns the panel and serializes every event into it.

use crate::feedback::PageFeedback;
use crate::mask::PointerTracker;
use crate::regions;
use crate::speech::{BrowserSpeech, EventSink};
use crate::storage::BrowserStorage;
use crate::view::DomView;
use a11y_panel_core::panel::PanelEffects;
use a11y_panel_core::{MaskTransition, Panel, PanelConfig, PanelMsg, UtteranceEvent};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

pub type WebPanel = Panel<BrowserStorage, BrowserSpeech>;

/// Single owner of the page's panel state.
///
/// Event handlers call [`Runtime::dispatch`]; a message raised while another
/// is being handled (a synchronous speech callback, a follow-up read) is
/// queued and handled after it, so the panel is never borrowed twice.
pub struct Runtime {
    panel: RefCell<WebPanel>,
    view: RefCell<DomView>,
    feedback: RefCell<PageFeedback>,
    pointer: RefCell<PointerTracker>,
    queue: RefCell<VecDeque<PanelMsg>>,
    draining: Cell<bool>,
    this: Weak<Self>,
}

impl Runtime {
    #[must_use]
    pub fn new(config: &PanelConfig) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| {
            let events = this.clone();
            let sink: EventSink = Rc::new(move |event: UtteranceEvent| {
                if let Some(runtime) = events.upgrade() {
                    runtime.dispatch(PanelMsg::Speech(event));
                }
            });
            let panel = Panel::new(config, BrowserStorage::open(), BrowserSpeech::new(sink));
            Self {
                panel: RefCell::new(panel),
                view: RefCell::new(DomView),
                feedback: RefCell::new(PageFeedback),
                pointer: RefCell::new(PointerTracker::default()),
                queue: RefCell::new(VecDeque::new()),
                draining: Cell::new(false),
                this: this.clone(),
            }
        })
    }

    /// Render loaded preferences and pick up the initial voice list.
    pub fn start(&self) {
        let effects = {
            let mut panel = self.panel.borrow_mut();
            panel.start(&mut *self.view.borrow_mut())
        };
        self.apply_effects(effects);
        self.refresh_voices();
    }

    /// Queue `msg` and, unless a message is already in flight, handle the queue.
    pub fn dispatch(&self, msg: PanelMsg) {
        self.queue.borrow_mut().push_back(msg);
        if self.draining.replace(true) {
            return;
        }
        loop {
            let Some(next) = self.queue.borrow_mut().pop_front() else {
                break;
            };
            let effects = {
                let mut panel = self.panel.borrow_mut();
                panel.dispatch(
                    next,
                    &mut *self.view.borrow_mut(),
                    &mut *self.feedback.borrow_mut(),
                )
            };
            self.apply_effects(effects);
        }
        self.draining.set(false);
    }

    pub fn refresh_voices(&self) {
        let voices = self.panel.borrow().speech().engine().voices();
        if !voices.is_empty() {
            self.dispatch(PanelMsg::VoicesChanged(voices));
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.panel.borrow().is_open()
    }

    /// Run `f` against the panel; for inspection only.
    pub fn with_panel<R>(&self, f: impl FnOnce(&WebPanel) -> R) -> R {
        f(&self.panel.borrow())
    }

    fn apply_effects(&self, effects: PanelEffects) {
        match effects.mask {
            MaskTransition::Attach => {
                let this = self.this.clone();
                self.pointer.borrow_mut().attach(move |client_y| {
                    if let Some(runtime) = this.upgrade() {
                        runtime.dispatch(PanelMsg::PointerMoved { client_y });
                    }
                });
            }
            MaskTransition::Detach => self.pointer.borrow_mut().detach(),
            MaskTransition::Unchanged => {}
        }
        if effects.read_current_section {
            match regions::current_section() {
                Some(section) => self.dispatch(regions::read_message(&section)),
                None => log::debug!("no content section to read"),
            }
        }
    }
}
