use anyhow::{anyhow, Result};
use calendar_domain::SessionStore;
use gloo::storage::{LocalStorage, Storage};
use tracing::warn;

/// Browser local storage as a [`SessionStore`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    /// `None` when the browser has local storage disabled
    pub fn open() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .map(|_| LocalStore)
    }

    fn try_get(key: &str) -> Result<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| anyhow!("reading '{}' failed: {:?}", key, e))
    }

    fn try_set(key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| anyhow!("writing '{}' failed (quota?): {:?}", key, e))
    }
}

impl SessionStore for LocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::try_get(key).unwrap_or_else(|e| {
            warn!("{}", e);
            None
        })
    }

    fn set_item(&self, key: &str, value: &str) -> std::result::Result<(), String> {
        Self::try_set(key, value).map_err(|e| e.to_string())
    }

    fn remove_item(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_round_trip_through_local_storage() {
        let store = LocalStore::open().unwrap();
        store.set_item("calendar-test", "{\"id\":\"u1\"}").unwrap();
        assert_eq!(store.get_item("calendar-test").as_deref(), Some("{\"id\":\"u1\"}"));
        store.remove_item("calendar-test");
        assert_eq!(store.get_item("calendar-test"), None);
    }
}
