//! Persistent key-value storage.
//!
//! The cart snapshot is written through a [`PersistentStore`], a synchronous
//! byte store addressed by string keys. Writes replace the previous value in
//! full; a reader never observes a partially written value.

pub mod errors;
pub mod file;
pub mod memory;

use mockall::automock;

pub use errors::StorageError;
pub use file::FileStore;
pub use memory::InMemoryStore;

/// Synchronous key-value byte store.
#[automock]
pub trait PersistentStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be read.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be written.
    fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}
