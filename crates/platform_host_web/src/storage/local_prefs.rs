//! `localStorage`-backed preference store implementation.

use platform_host::PrefsStore;

#[derive(Debug, Clone, Copy, Default)]
/// Browser preference store backed by `window.localStorage`.
pub struct WebPrefsStore;

impl WebPrefsStore {
    /// Loads a raw JSON string for a preference key.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the read throws.
    pub fn load_json(self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .get_item(key)
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    /// Saves a raw JSON string for a preference key.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails (for example, quota).
    pub fn save_json(self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .set_item(key, raw_json)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }
}

impl PrefsStore for WebPrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        self.load_json(key)
    }

    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), String> {
        self.save_json(key, raw_json)
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}
