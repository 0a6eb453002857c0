//! JSON snapshot codec for persisted preferences.
//!
//! Encoding always writes the complete set of fields. Decoding is lenient: each
//! known field overrides its default only when present and well-typed, and
//! anything else in the blob is skipped.

use crate::prefs::{FontSize, Preferences};
use serde_json::{Map, Value};
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Serialize the full preference set.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(prefs: &Preferences) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(prefs)?)
}

/// Parse a persisted snapshot, falling back to defaults field by field.
#[must_use]
pub fn decode(raw: &str) -> Preferences {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => from_map(&map),
        Ok(other) => {
            log::warn!("persisted preferences are not an object ({other}); using defaults");
            Preferences::default()
        }
        Err(err) => {
            log::warn!("persisted preferences are not valid JSON: {err}; using defaults");
            Preferences::default()
        }
    }
}

fn from_map(map: &Map<String, Value>) -> Preferences {
    let mut prefs = Preferences::default();

    if let Some(size) = field(map, "fontSize", None, font_size) {
        prefs.font_size = size;
    }
    if let Some(theme) = field(map, "theme", None, parse_str) {
        prefs.theme = theme;
    }
    if let Some(font) = field(map, "font", None, parse_str) {
        prefs.font = font;
    }
    if let Some(spacing) = field(map, "lineSpacing", None, parse_str) {
        prefs.line_spacing = spacing;
    }
    if let Some(on) = field(map, "animationsEnabled", Some("animations"), Value::as_bool) {
        prefs.animations_enabled = on;
    }
    if let Some(on) = field(map, "readingMode", None, Value::as_bool) {
        prefs.reading_mode = on;
    }
    if let Some(on) = field(map, "readingMaskEnabled", Some("readingMask"), Value::as_bool) {
        prefs.reading_mask_enabled = on;
    }
    if let Some(on) = field(map, "textToSpeechEnabled", Some("textToSpeech"), Value::as_bool) {
        prefs.text_to_speech_enabled = on;
    }

    for key in map.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            log::debug!("skipping unknown persisted key {key:?}");
        }
    }
    prefs
}

const KNOWN_KEYS: &[&str] = &[
    "fontSize",
    "theme",
    "font",
    "lineSpacing",
    "animationsEnabled",
    "animations",
    "readingMode",
    "readingMaskEnabled",
    "readingMask",
    "textToSpeechEnabled",
    "textToSpeech",
];

/// Look up `key`, then its legacy alias, keeping the first well-typed value.
fn field<T>(
    map: &Map<String, Value>,
    key: &str,
    legacy: Option<&str>,
    parse: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let current = map.get(key).and_then(&parse);
    if current.is_none() && map.contains_key(key) {
        log::debug!("ignoring malformed persisted value for {key:?}");
    }
    current.or_else(|| legacy.and_then(|alias| map.get(alias)).and_then(&parse))
}

fn font_size(value: &Value) -> Option<FontSize> {
    if let Some(px) = value.as_i64() {
        return Some(FontSize::clamped(px));
    }
    let px = value.as_f64().filter(|px| px.is_finite())?;
    let clamped = px.round().clamp(f64::from(FontSize::MIN), f64::from(FontSize::MAX));
    // Whole number inside [12, 24] after the clamp above.
    #[allow(clippy::cast_possible_truncation)]
    Some(FontSize::clamped(clamped as i64))
}

fn parse_str<T: FromStr>(value: &Value) -> Option<T> {
    value.as_str().and_then(|raw| raw.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{FontFamily, LineSpacing, Theme};

    #[test]
    fn encode_writes_every_field_in_camel_case() {
        let json: Value = serde_json::from_str(&encode(&Preferences::default()).unwrap()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        assert_eq!(obj["fontSize"], 16);
        assert_eq!(obj["theme"], "light");
        assert_eq!(obj["font"], "open-sans");
        assert_eq!(obj["lineSpacing"], "normal");
        assert_eq!(obj["animationsEnabled"], true);
        assert_eq!(obj["readingMode"], false);
        assert_eq!(obj["readingMaskEnabled"], false);
        assert_eq!(obj["textToSpeechEnabled"], false);
    }

    #[test]
    fn decode_reads_documented_example() {
        let prefs = decode(
            r#"{"fontSize":18,"theme":"dark","font":"open-sans","lineSpacing":"normal",
                "animationsEnabled":true,"readingMode":false,"readingMaskEnabled":true,
                "textToSpeechEnabled":false}"#,
        );
        assert_eq!(prefs.font_size.px(), 18);
        assert_eq!(prefs.theme, Theme::Dark);
        assert!(prefs.reading_mask_enabled);
    }

    #[test]
    fn decode_ignores_unknown_and_malformed_fields() {
        let prefs = decode(r#"{"bogus":1,"fontSize":20,"theme":42,"font":"wingdings"}"#);
        assert_eq!(prefs.font_size.px(), 20);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.font, FontFamily::OpenSans);
    }

    #[test]
    fn decode_clamps_out_of_range_font_sizes() {
        assert_eq!(decode(r#"{"fontSize":400}"#).font_size.px(), 24);
        assert_eq!(decode(r#"{"fontSize":-3}"#).font_size.px(), 12);
        assert_eq!(decode(r#"{"fontSize":17.6}"#).font_size.px(), 18);
        assert_eq!(decode(r#"{"fontSize":"big"}"#).font_size.px(), 16);
    }

    #[test]
    fn decode_accepts_legacy_blob() {
        let prefs = decode(
            r#"{"fontSize":14,"theme":"dark","font":"open-sans","lineSpacing":"large",
                "animations":false,"readingMode":true,"readingMask":true,
                "textToSpeech":true,"currentSpeech":null}"#,
        );
        assert_eq!(prefs.font_size.px(), 14);
        assert_eq!(prefs.line_spacing, LineSpacing::Large);
        assert!(!prefs.animations_enabled);
        assert!(prefs.reading_mode);
        assert!(prefs.reading_mask_enabled);
        assert!(prefs.text_to_speech_enabled);
    }

    #[test]
    fn current_key_wins_over_legacy_alias() {
        let prefs = decode(r#"{"animations":false,"animationsEnabled":true}"#);
        assert!(prefs.animations_enabled);
    }

    #[test]
    fn decode_falls_back_on_garbage() {
        assert_eq!(decode("not json"), Preferences::default());
        assert_eq!(decode("[1,2,3]"), Preferences::default());
        assert_eq!(decode("null"), Preferences::default());
    }
}
