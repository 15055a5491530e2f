//! localStorage blob store.
//! Persistent across reloads of the web-view; values are plain strings.

use octo_core::ports::BlobStore;
use octo_types::{Result, UiError};

pub struct LocalBlobStore {
    storage: web_sys::Storage,
}

impl LocalBlobStore {
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| UiError::Storage("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| UiError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| UiError::Storage("localStorage not available".to_string()))?;

        Ok(Self { storage })
    }
}

impl BlobStore for LocalBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| UiError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // Throws QuotaExceededError when the origin is full
        self.storage
            .set_item(key, value)
            .map_err(|e| UiError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| UiError::Storage(format!("{:?}", e)))
    }

    fn backend_name(&self) -> &str {
        "localstorage"
    }
}
