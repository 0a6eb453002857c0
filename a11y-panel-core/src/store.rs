//! Source of truth for preferences: load, validated update, reset.

use crate::prefs::{PrefUpdate, Preferences};
use crate::snapshot;
use crate::storage::PreferenceStorage;

/// Default storage key for the persisted snapshot.
pub const STORAGE_KEY: &str = "accessibilitySettings";

/// Owns the single in-memory [`Preferences`] and mirrors it into storage.
///
/// Storage failures never propagate: they are logged and the in-memory state
/// stays authoritative for the rest of the session.
pub struct PreferenceStore<S>
where
    S: PreferenceStorage,
{
    storage: S,
    key: String,
    prefs: Preferences,
}

impl<S> PreferenceStore<S>
where
    S: PreferenceStorage,
{
    /// Load persisted preferences from `storage` under `key`.
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let prefs = match storage.read(&key) {
            Ok(Some(raw)) => snapshot::decode(&raw),
            Ok(None) => Preferences::default(),
            Err(err) => {
                log::warn!("failed to read persisted preferences: {err}");
                Preferences::default()
            }
        };
        log::debug!("loaded preferences {prefs:?}");
        Self {
            storage,
            key,
            prefs,
        }
    }

    #[must_use]
    pub const fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Validate and apply `update`, then persist the full snapshot.
    pub fn update(&mut self, update: &PrefUpdate) -> Preferences {
        if self.prefs.apply(update) {
            log::debug!("preference update {update:?} -> {:?}", self.prefs);
        }
        self.persist();
        self.prefs
    }

    /// Restore defaults and delete the persisted snapshot.
    pub fn reset(&mut self) -> Preferences {
        self.prefs = Preferences::default();
        if let Err(err) = self.storage.remove(&self.key) {
            log::warn!("failed to clear persisted preferences: {err}");
        }
        self.prefs
    }

    fn persist(&self) {
        let encoded = match snapshot::encode(&self.prefs) {
            Ok(encoded) => encoded,
            Err(err) => {
                log::error!("failed to encode preferences: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.write(&self.key, &encoded) {
            log::warn!("failed to persist preferences: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{Step, Theme, ToggleControl};
    use crate::storage::MemoryStorage;

    #[test]
    fn load_without_snapshot_yields_defaults() {
        let storage = MemoryStorage::new();
        let store = PreferenceStore::load(&storage, STORAGE_KEY);
        assert_eq!(*store.prefs(), Preferences::default());
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn every_update_writes_once() {
        let storage = MemoryStorage::new();
        let mut store = PreferenceStore::load(&storage, STORAGE_KEY);
        store.update(&PrefUpdate::StepFontSize(Step::Up));
        store.update(&PrefUpdate::Theme("dark".into()));
        store.update(&PrefUpdate::Theme("neon".into()));
        assert_eq!(storage.writes(), 3);
        let reloaded = PreferenceStore::load(&storage, STORAGE_KEY);
        assert_eq!(reloaded.prefs().theme, Theme::Dark);
        assert_eq!(reloaded.prefs().font_size.px(), 18);
    }

    #[test]
    fn failed_writes_keep_memory_authoritative() {
        let storage = MemoryStorage::new();
        storage.set_reject_writes(true);
        let mut store = PreferenceStore::load(&storage, STORAGE_KEY);
        let prefs = store.update(&PrefUpdate::Toggle(ToggleControl::ReadingMode, true));
        assert!(prefs.reading_mode);
        assert!(store.prefs().reading_mode);
        assert!(!storage.contains(STORAGE_KEY));
        let after_reset = store.reset();
        assert_eq!(after_reset, Preferences::default());
    }

    #[test]
    fn reset_deletes_snapshot() {
        let storage = MemoryStorage::with_entry(STORAGE_KEY, r#"{"theme":"dark"}"#);
        let mut store = PreferenceStore::load(&storage, STORAGE_KEY);
        assert_eq!(store.prefs().theme, Theme::Dark);
        store.reset();
        assert!(!storage.contains(STORAGE_KEY));
        assert_eq!(*store.prefs(), Preferences::default());
    }
}
