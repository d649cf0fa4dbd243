//! The application facade.
//!
//! `Fieldbook` composes the record store and the backup manager over one
//! shared store handle, giving the presentation layer a single entry
//! point. It also wires the coupling between them: when auto-backup is
//! enabled, every accepted mutation is followed by an automatic snapshot.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::backup::{BackupManager, BackupSnapshot, BackupStats, SnapshotOrigin};
use crate::error::Result;
use crate::export;
use crate::model::{AppData, ExpenseEntry, NewExpenseEntry, NewWorkEntry, WorkEntry, WorkPatch};
use crate::storage::KeyValueStore;
use crate::store::RecordStore;

/// One open bookkeeping session over a durable store.
pub struct Fieldbook<S> {
    records: RecordStore<S>,
    backups: BackupManager<S>,
}

impl<S: KeyValueStore> Fieldbook<S> {
    /// Open a session, loading the data set, the snapshot ring, and the
    /// auto-backup flag from `store`.
    pub fn open(store: S) -> Result<Self> {
        let store = Arc::new(store);
        let records = RecordStore::load(Arc::clone(&store))?;
        let backups = BackupManager::load(store)?;
        Ok(Self { records, backups })
    }

    /// Read-only view of the current data set.
    pub fn data(&self) -> &AppData {
        self.records.data()
    }

    pub fn snapshots(&self) -> &[BackupSnapshot] {
        self.backups.snapshots()
    }

    pub fn backup_stats(&self) -> BackupStats {
        self.backups.stats()
    }

    pub fn auto_backup_enabled(&self) -> bool {
        self.backups.auto_backup_enabled()
    }

    // --- Record mutations ---

    pub fn add_work(&mut self, new: NewWorkEntry) -> Result<WorkEntry> {
        let entry = self.records.add_work(new)?;
        self.auto_snapshot()?;
        Ok(entry)
    }

    pub fn update_work(&mut self, id: &str, patch: &WorkPatch) -> Result<WorkEntry> {
        let entry = self.records.update_work(id, patch)?;
        self.auto_snapshot()?;
        Ok(entry)
    }

    pub fn delete_work(&mut self, id: &str) -> Result<()> {
        self.records.delete_work(id)?;
        self.auto_snapshot()
    }

    pub fn add_expense(&mut self, new: NewExpenseEntry) -> Result<ExpenseEntry> {
        let entry = self.records.add_expense(new)?;
        self.auto_snapshot()?;
        Ok(entry)
    }

    pub fn delete_expense(&mut self, id: &str) -> Result<()> {
        self.records.delete_expense(id)?;
        self.auto_snapshot()
    }

    pub fn clear_expenses(&mut self) -> Result<()> {
        self.records.clear_expenses()?;
        self.auto_snapshot()
    }

    pub fn reset(&mut self) -> Result<()> {
        self.records.reset()?;
        self.auto_snapshot()
    }

    // --- Import / export ---

    /// Replace the data set with the contents of an external JSON file.
    /// An invalid payload is rejected before any state changes.
    pub fn import_json(&mut self, raw: &str) -> Result<()> {
        let data = export::import_json(raw)?;
        self.records.replace_all(data)?;
        info!("imported data set");
        self.auto_snapshot()
    }

    pub fn export_json(&self) -> Result<String> {
        export::export_json(self.records.data())
    }

    pub fn export_table(&self) -> Result<String> {
        export::export_table(&self.records.data().work)
    }

    // --- Backups ---

    /// Take a manual snapshot. A missing name gets a date-stamped default.
    pub fn create_backup(&mut self, name: Option<String>) -> Result<BackupSnapshot> {
        let name =
            name.unwrap_or_else(|| format!("manual backup {}", Utc::now().date_naive()));
        self.backups
            .create_snapshot(self.records.data(), SnapshotOrigin::Manual, name)
    }

    /// Replace the data set with a snapshot's contents.
    ///
    /// Confirming destructive intent is the caller's concern. Restoring
    /// does not itself take an automatic snapshot; the restored state is
    /// already in the ring.
    pub fn restore_backup(&mut self, id: &str) -> Result<()> {
        let data = self.backups.snapshot(id)?.data.clone();
        self.records.replace_all(data)?;
        info!(id, "restored snapshot");
        Ok(())
    }

    pub fn delete_backup(&mut self, id: &str) -> Result<()> {
        self.backups.delete_snapshot(id)
    }

    /// Persist the auto-backup flag. Turning it on takes an immediate
    /// automatic snapshot of the current data set.
    pub fn set_auto_backup(&mut self, enabled: bool) -> Result<()> {
        self.backups.set_auto_backup(enabled)?;
        if enabled {
            self.take_auto_snapshot()?;
        }
        Ok(())
    }

    fn auto_snapshot(&mut self) -> Result<()> {
        if self.backups.auto_backup_enabled() {
            self.take_auto_snapshot()?;
        }
        Ok(())
    }

    fn take_auto_snapshot(&mut self) -> Result<()> {
        let name = format!("auto backup {}", Utc::now().date_naive());
        self.backups
            .create_snapshot(self.records.data(), SnapshotOrigin::Automatic, name)?;
        Ok(())
    }
}
