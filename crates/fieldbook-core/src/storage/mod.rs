//! Durable key-value storage for fieldbook.
//!
//! Persisted state lives under a small set of fixed keys, each holding one
//! serialized payload. The layer is backend-agnostic: anything implementing
//! `KeyValueStore` can back the application; `SqliteStore` is the shipped
//! embedded backend.
//!
//! Writes are synchronous write-through: a mutation's durable write
//! completes (or fails) before the calling operation returns. There is no
//! write buffering and no partial-write recovery.

pub mod sqlite;
pub mod traits;

// Re-export public types
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;

/// Key holding the serialized primary data set.
pub const DATA_KEY: &str = "fieldbook_data";

/// Key holding the serialized backup snapshot ring.
pub const BACKUPS_KEY: &str = "fieldbook_backups";

/// Key holding the auto-backup flag, stored as `"true"` / `"false"`.
pub const AUTO_BACKUP_KEY: &str = "auto_backup";
