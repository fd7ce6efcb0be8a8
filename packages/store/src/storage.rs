//! Key-value persistence used by [`crate::SessionStore`].
//!
//! Browser `localStorage` is synchronous, so the trait is too. Backends never
//! fail loudly: an unavailable store reads as empty and ignores writes, which
//! is also how the non-browser rendering pass behaves.

pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}
