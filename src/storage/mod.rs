//! Key-value persistence for the ledger blob.

pub mod codec;
pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Abstraction over string key-value stores the ledger can persist into.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Overwrites any previous value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
