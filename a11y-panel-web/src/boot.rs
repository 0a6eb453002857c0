//! Page startup.

use crate::runtime::Runtime;
use crate::{config, dom, i18n, wiring};
use anyhow::{Context, anyhow};
use std::rc::Rc;

/// Resolve the locale, build the runtime, render saved preferences and wire
/// the page's controls.
///
/// # Errors
/// Returns an error if the page has no document or no `<body>`.
pub fn boot() -> anyhow::Result<Rc<Runtime>> {
    let doc = dom::document().ok_or_else(|| anyhow!("document unavailable"))?;
    doc.body().context("page has no <body>")?;

    let config = config::load();
    let html_lang = doc
        .document_element()
        .and_then(|root| root.get_attribute("lang"));
    let locale = config::resolve_locale(&config, html_lang.as_deref());
    i18n::set_lang(&locale);

    let runtime = Runtime::new(&config);
    runtime.start();
    wiring::wire(&runtime);
    log::info!(
        "accessibility panel ready (locale {locale}, storage key {:?})",
        config.storage_key
    );
    Ok(runtime)
}
