pub mod memory;
pub mod local;
pub mod auto;

pub use memory::MemoryBlobStore;
pub use local::LocalBlobStore;
pub use auto::auto_detect_store;
