//! Persistence Adapters - Key-Value Storage Backends
//!
//! Implements the `KeyValueStore` port:
//! - `MemoryStore`: process-local map, lost on exit
//! - `FileStore`: one atomically-written JSON file per key

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
