//! `localStorage` backend for the preference snapshot.

use crate::dom;
use a11y_panel_core::PreferenceStorage;
use web_sys::Storage;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("localStorage unavailable")]
    Unavailable,
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Web preference storage using localStorage.
///
/// Private browsing modes and disabled storage leave the handle empty; every
/// operation then fails with [`WebStorageError::Unavailable`].
pub struct BrowserStorage {
    storage: Option<Storage>,
}

impl BrowserStorage {
    #[must_use]
    pub fn open() -> Self {
        let storage = match dom::local_storage() {
            Ok(storage) => Some(storage),
            Err(err) => {
                log::warn!(
                    "preferences will not persist: {}",
                    dom::js_error_message(&err)
                );
                None
            }
        };
        Self { storage }
    }

    fn handle(&self) -> Result<&Storage, WebStorageError> {
        self.storage.as_ref().ok_or(WebStorageError::Unavailable)
    }
}

impl PreferenceStorage for BrowserStorage {
    type Error = WebStorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.handle()?
            .get_item(key)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.handle()?
            .set_item(key, value)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.handle()?
            .remove_item(key)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }
}
