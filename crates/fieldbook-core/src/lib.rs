//! # Fieldbook Core
//!
//! Core library for Fieldbook - single-user bookkeeping for an
//! agricultural-equipment operator: work performed for clients, operating
//! expenses, derived financial reports, and snapshot backups, all
//! persisted locally for offline use.
//!
//! This crate provides the core domain logic, storage abstraction, and
//! data models independent of any presentation layer.
//!
//! ## Architecture
//!
//! - **storage**: Durable key-value store trait and the SQLite backend
//! - **store**: Record store, the sole owner and mutator of the data set
//! - **ledger**: Per-client ledger aggregation
//! - **report**: Pure reporting queries (stats, services, months, rankings)
//! - **backup**: Bounded snapshot ring, restore, auto-backup trigger
//! - **export**: JSON and CSV file-boundary formats
//! - **app**: `Fieldbook`, the facade the presentation layer drives
//!
//! Reads flow store → aggregation/reporting → presentation; mutations
//! flow presentation → record store → (auto-backup trigger) → durable
//! write. All derived views are recomputed per query, never cached.

pub mod app;
pub mod backup;
pub mod config;
pub mod error;
pub mod export;
pub mod ledger;
pub mod model;
pub mod report;
pub mod storage;
pub mod store;

pub use app::Fieldbook;
pub use backup::{BackupSnapshot, BackupStats, SnapshotOrigin, SNAPSHOT_CAP};
pub use error::{FieldbookError, Result};
pub use ledger::{group_clients, ClientLedger};
pub use model::{
    AppData, ExpenseEntry, ExpenseKind, NewExpenseEntry, NewWorkEntry, PayStatus, ServiceKind,
    WorkEntry, WorkPatch,
};
pub use storage::{KeyValueStore, SqliteStore};
pub use store::RecordStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
