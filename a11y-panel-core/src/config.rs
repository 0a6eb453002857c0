//! Panel configuration.

use crate::speech::SpeechOptions;
use crate::store::STORAGE_KEY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Storage key of the persisted snapshot.
    pub storage_key: String,
    pub speech: SpeechOptions,
    /// Language prefix used to pick a voice from the engine's list.
    pub voice_lang_prefix: String,
    /// UI locale; when absent the page's own language is used.
    pub locale: Option<String>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            speech: SpeechOptions::default(),
            voice_lang_prefix: "pt".to_string(),
            locale: None,
        }
    }
}

impl PanelConfig {
    /// Parse a configuration document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_fills_defaults() {
        let cfg = PanelConfig::from_json(r#"{"speech":{"rate":1.2},"locale":"en"}"#).unwrap();
        assert_eq!(cfg.storage_key, "accessibilitySettings");
        assert_eq!(cfg.speech.lang, "pt-BR");
        assert!((cfg.speech.rate - 1.2).abs() < f32::EPSILON);
        assert_eq!(cfg.voice_lang_prefix, "pt");
        assert_eq!(cfg.locale.as_deref(), Some("en"));
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(PanelConfig::from_json(r#"{"storage_key":7}"#).is_err());
    }
}
