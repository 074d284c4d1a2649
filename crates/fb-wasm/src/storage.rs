//! `window.localStorage` as a blob store.

use fb_core::{BlobStore, StoreError};
use web_sys::Storage;

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// The page's local storage, if the browser exposes one.
    pub fn from_window() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl BlobStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|e| StoreError {
            key: key.to_string(),
            reason: format!("{e:?}"),
        })
    }
}
