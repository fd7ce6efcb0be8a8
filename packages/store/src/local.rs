//! # `localStorage` backend: browser-side session persistence
//!
//! [`LocalStorage`] is the [`KeyValueStorage`] used on the **web platform**.
//! Entries are scoped to the page origin and never expire on their own; the
//! backend token lifetime is the only expiry.
//!
//! Like the rest of the storage layer, every failure (no `window`, storage
//! disabled by privacy settings, quota exceeded) degrades to "nothing stored"
//! instead of surfacing an error to the UI.

use crate::storage::KeyValueStorage;

/// `window.localStorage`-backed storage.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!(key, "localStorage write rejected");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}
