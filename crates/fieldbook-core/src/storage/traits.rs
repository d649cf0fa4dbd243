//! Key-value store trait definition.
//!
//! The `KeyValueStore` trait defines the interface every durable backend
//! must implement. The core only ever reads and writes whole values under
//! fixed keys, so the surface is deliberately small.

use crate::error::Result;

/// Durable key-value storage interface.
///
/// All implementations must ensure:
/// - A completed `put` is durable before it returns
/// - `get` observes the latest completed `put` for the same key
/// - Concurrent callers are serialized internally
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Durably store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `FieldbookError::Persistence` if the write cannot be
    /// completed; the previous value remains in place.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` and its value. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}
