//! Pick the best available blob store.
//!
//! Priority: localStorage → Memory (fallback)

use std::rc::Rc;
use octo_core::ports::BlobStore;
use super::{LocalBlobStore, MemoryBlobStore};

/// Open the best available store.
/// Returns a trait object so callers are backend-agnostic.
pub fn auto_detect_store() -> Rc<dyn BlobStore> {
    match LocalBlobStore::open() {
        Ok(local) => {
            log::info!("Blob store backend: localStorage");
            Rc::new(local)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), falling back to memory", e);
            Rc::new(MemoryBlobStore::new())
        }
    }
}
