//! Storage Backends
//!
//! Durable key-value facilities the cache store persists through. The store
//! only needs read/write/delete/list over opaque bytes; everything about
//! entry shape and expiry lives above this layer.

mod fs;
mod memory;

// Re-export public types
pub use fs::FsBackend;
pub use memory::MemoryBackend;

use async_trait::async_trait;

use crate::error::StorageError;

// == Storage Backend Trait ==
/// A durable key-value facility addressed by string keys.
///
/// Implementations must be safe for concurrent access; every key is
/// independently readable and writable, and a write replaces the previous
/// value for that key wholesale.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Reads the bytes stored under `key`, or `None` when absent.
    ///
    /// Absence is a normal outcome, never an error.
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Writes `bytes` under `key`, replacing any previous value.
    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Deletes any value stored under `key`. No-op when absent.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Enumerates every stored key.
    async fn list(&self) -> Result<Vec<String>, StorageError>;
}
