//! Lightweight preference storage contracts and adapters.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::Serialize;

/// Host service for lightweight preference values (JSON stored as text per key).
///
/// Calls are synchronous: the browser adapter sits directly on `localStorage`, and callers
/// persist on every change without batching.
pub trait PrefsStore {
    /// Loads a raw JSON string for a preference key.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store is unavailable or the read fails.
    fn load_pref(&self, key: &str) -> Result<Option<String>, String>;

    /// Saves a raw JSON string for a preference key.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store is unavailable or the write fails.
    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
///
/// Clones share the same backing map, so a test can hand one clone to the code under test
/// and inspect writes through another.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns the raw value currently stored for `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }
}

/// Serializes and saves a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or store save fails.
pub fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_pref(key, &raw)
}
