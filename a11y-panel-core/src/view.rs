//! One-way projection from [`Preferences`] onto the rendered page.

use crate::feedback::Notice;
use crate::prefs::{Preferences, ToggleControl};
use std::collections::BTreeMap;
use std::fmt;

pub const FONT_SIZE_LABEL_ID: &str = "current-font-size";
pub const THEME_SELECTOR_ID: &str = "theme-selector";
pub const FONT_SELECTOR_ID: &str = "font-selector";
pub const LINE_SPACING_SELECTOR_ID: &str = "line-spacing";
pub const MASK_OVERLAY_ID: &str = "reading-mask-overlay";
pub const PANEL_ID: &str = "accessibility-panel";
pub const PANEL_TOGGLE_ID: &str = "accessibility-toggle";
pub const MAIN_CONTENT_ID: &str = "main-content";
pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const OPTIONS_SELECTOR: &str = ".accessibility-options";

/// Where a view mutation lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// The document element (`<html>`).
    Root,
    Body,
    /// Element looked up by id.
    Element(&'a str),
    /// First element matching a CSS selector.
    Query(&'a str),
}

impl fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Body => f.write_str("body"),
            Self::Element(id) => write!(f, "#{id}"),
            Self::Query(selector) => f.write_str(selector),
        }
    }
}

/// Narrow mutation primitives the core needs from the rendered view.
///
/// Implementations should treat a missing target as a no-op.
pub trait ViewSurface {
    fn set_style(&mut self, target: Target<'_>, property: &str, value: &str);
    fn set_attribute(&mut self, target: Target<'_>, name: &str, value: &str);
    fn set_class(&mut self, target: Target<'_>, class: &str, present: bool);
    fn set_text(&mut self, target: Target<'_>, text: &str);
    /// Current value of a form control such as a `<select>`.
    fn set_value(&mut self, target: Target<'_>, value: &str);
    /// Pressed state of a toggle button, including its visible on/off label.
    fn set_pressed(&mut self, target: Target<'_>, pressed: bool);
    /// Disable a control and explain why.
    fn disable(&mut self, target: Target<'_>, reason: &Notice);
    fn focus(&mut self, target: Target<'_>);
}

/// Deterministic, idempotent preference projection.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewSynchronizer;

impl ViewSynchronizer {
    /// Set exactly one view attribute per field, plus the control that edits it.
    pub fn sync(prefs: &Preferences, view: &mut impl ViewSurface) {
        let size = prefs.font_size;
        view.set_style(Target::Root, "font-size", &size.to_string());
        view.set_text(
            Target::Element(FONT_SIZE_LABEL_ID),
            &format!("{}%", size.percent()),
        );

        view.set_attribute(Target::Root, "data-theme", prefs.theme.as_str());
        view.set_value(Target::Element(THEME_SELECTOR_ID), prefs.theme.as_str());

        view.set_attribute(Target::Body, "data-font", prefs.font.as_str());
        view.set_value(Target::Element(FONT_SELECTOR_ID), prefs.font.as_str());

        view.set_attribute(Target::Body, "data-line-spacing", prefs.line_spacing.as_str());
        view.set_value(
            Target::Element(LINE_SPACING_SELECTOR_ID),
            prefs.line_spacing.as_str(),
        );

        view.set_attribute(
            Target::Root,
            "data-animations",
            if prefs.animations_enabled {
                "enabled"
            } else {
                "disabled"
            },
        );

        view.set_class(Target::Body, "reading-mode", prefs.reading_mode);

        view.set_class(
            Target::Element(MASK_OVERLAY_ID),
            "active",
            prefs.reading_mask_enabled,
        );
        view.set_style(
            Target::Body,
            "cursor",
            if prefs.reading_mask_enabled { "none" } else { "" },
        );

        for control in ToggleControl::ALL {
            view.set_pressed(Target::Element(control.element_id()), prefs.toggle(control));
        }
    }
}

/// In-memory view that records resulting state and counts effective mutations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryView {
    state: BTreeMap<String, String>,
    focused: Option<String>,
    mutations: usize,
}

impl MemoryView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls that actually changed recorded state.
    #[must_use]
    pub const fn mutations(&self) -> usize {
        self.mutations
    }

    #[must_use]
    pub fn attribute(&self, target: Target<'_>, name: &str) -> Option<&str> {
        self.get(target, &format!("attr:{name}"))
    }

    #[must_use]
    pub fn style(&self, target: Target<'_>, property: &str) -> Option<&str> {
        self.get(target, &format!("style:{property}"))
    }

    #[must_use]
    pub fn has_class(&self, target: Target<'_>, class: &str) -> bool {
        self.get(target, &format!("class:{class}")).is_some()
    }

    #[must_use]
    pub fn text(&self, target: Target<'_>) -> Option<&str> {
        self.get(target, "text")
    }

    #[must_use]
    pub fn value(&self, target: Target<'_>) -> Option<&str> {
        self.get(target, "value")
    }

    #[must_use]
    pub fn pressed(&self, target: Target<'_>) -> Option<bool> {
        self.get(target, "pressed").map(|v| v == "true")
    }

    #[must_use]
    pub fn disabled_reason(&self, target: Target<'_>) -> Option<&str> {
        self.get(target, "disabled")
    }

    #[must_use]
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    fn get(&self, target: Target<'_>, slot: &str) -> Option<&str> {
        self.state.get(&format!("{target}|{slot}")).map(String::as_str)
    }

    fn put(&mut self, target: Target<'_>, slot: &str, value: Option<String>) {
        let key = format!("{target}|{slot}");
        let changed = match value {
            Some(value) => self.state.insert(key, value.clone()).as_ref() != Some(&value),
            None => self.state.remove(&key).is_some(),
        };
        if changed {
            self.mutations += 1;
        }
    }
}

impl ViewSurface for MemoryView {
    fn set_style(&mut self, target: Target<'_>, property: &str, value: &str) {
        let value = (!value.is_empty()).then(|| value.to_string());
        self.put(target, &format!("style:{property}"), value);
    }

    fn set_attribute(&mut self, target: Target<'_>, name: &str, value: &str) {
        self.put(target, &format!("attr:{name}"), Some(value.to_string()));
    }

    fn set_class(&mut self, target: Target<'_>, class: &str, present: bool) {
        self.put(target, &format!("class:{class}"), present.then(String::new));
    }

    fn set_text(&mut self, target: Target<'_>, text: &str) {
        self.put(target, "text", Some(text.to_string()));
    }

    fn set_value(&mut self, target: Target<'_>, value: &str) {
        self.put(target, "value", Some(value.to_string()));
    }

    fn set_pressed(&mut self, target: Target<'_>, pressed: bool) {
        self.put(target, "pressed", Some(pressed.to_string()));
    }

    fn disable(&mut self, target: Target<'_>, reason: &Notice) {
        self.put(target, "disabled", Some(reason.key().to_string()));
    }

    fn focus(&mut self, target: Target<'_>) {
        let next = target.to_string();
        if self.focused.as_deref() != Some(next.as_str()) {
            self.focused = Some(next);
            self.mutations += 1;
        }
    }
}
