mod bundle;
mod locales;
mod notice;
mod render;

pub use bundle::{DEFAULT_LANG, I18nBundle, current_lang, set_lang};
pub use locales::{LocaleMeta, is_supported, locales};
pub use notice::{notice_text, toggle_action};
pub use render::{t, tr};
