//! Snapshot backups of the full data set.
//!
//! Snapshots live in a bounded ring persisted under its own key, separate
//! from the primary data. The ring keeps the 10 most recent snapshots;
//! creating an eleventh evicts the oldest.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{FieldbookError, Result};
use crate::model::AppData;
use crate::storage::{KeyValueStore, AUTO_BACKUP_KEY, BACKUPS_KEY};

/// Maximum number of snapshots retained in the ring.
pub const SNAPSHOT_CAP: usize = 10;

/// How a snapshot came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotOrigin {
    /// Requested explicitly
    Manual,
    /// Taken by the auto-backup trigger after a mutation
    Automatic,
}

/// A named, timestamped deep copy of the full data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    pub id: String,
    pub name: String,
    pub origin: SnapshotOrigin,
    pub date: DateTime<Utc>,

    /// Serialized byte length of `data` at snapshot time
    pub size: u64,

    pub data: AppData,
}

/// Headline figures for the backup screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupStats {
    pub total_snapshots: usize,
    pub total_size: u64,
    pub last_backup: Option<DateTime<Utc>>,
    pub automatic_count: usize,
}

/// Owns the snapshot ring and the auto-backup flag.
pub struct BackupManager<S> {
    store: Arc<S>,
    ring: Vec<BackupSnapshot>,
    auto_backup: bool,
}

impl<S: KeyValueStore> BackupManager<S> {
    /// Load the ring and flag from the store; unwritten keys yield an
    /// empty ring and a disabled flag.
    pub fn load(store: Arc<S>) -> Result<Self> {
        let ring = match store.get(BACKUPS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                FieldbookError::Persistence(format!("Corrupt backup payload: {}", e))
            })?,
            None => Vec::new(),
        };
        let auto_backup = matches!(store.get(AUTO_BACKUP_KEY)?.as_deref(), Some("true"));
        Ok(Self {
            store,
            ring,
            auto_backup,
        })
    }

    /// The retained snapshots, oldest first.
    pub fn snapshots(&self) -> &[BackupSnapshot] {
        &self.ring
    }

    pub fn auto_backup_enabled(&self) -> bool {
        self.auto_backup
    }

    /// Snapshot `data` into the ring, evicting the oldest snapshot past
    /// the cap, and persist the updated ring.
    pub fn create_snapshot(
        &mut self,
        data: &AppData,
        origin: SnapshotOrigin,
        name: impl Into<String>,
    ) -> Result<BackupSnapshot> {
        let payload = serde_json::to_string(data)
            .map_err(|e| FieldbookError::Persistence(format!("Serialize failed: {}", e)))?;

        let snapshot = BackupSnapshot {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            origin,
            date: Utc::now(),
            size: payload.len() as u64,
            data: data.clone(),
        };

        let mut next = self.ring.clone();
        next.push(snapshot.clone());
        if next.len() > SNAPSHOT_CAP {
            let evicted = next.remove(0);
            info!(id = %evicted.id, name = %evicted.name, "evicted oldest snapshot");
        }

        self.persist_ring(next)?;
        debug!(count = self.ring.len(), ?origin, "created snapshot");
        Ok(snapshot)
    }

    /// Look up a snapshot by id.
    ///
    /// # Errors
    ///
    /// Returns `FieldbookError::NotFound` when no snapshot has `id`.
    pub fn snapshot(&self, id: &str) -> Result<&BackupSnapshot> {
        self.ring
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| FieldbookError::NotFound(format!("Snapshot {}", id)))
    }

    /// Remove the snapshot with `id` and persist the ring. Absent ids
    /// are a no-op.
    pub fn delete_snapshot(&mut self, id: &str) -> Result<()> {
        if !self.ring.iter().any(|s| s.id == id) {
            return Ok(());
        }
        let mut next = self.ring.clone();
        next.retain(|s| s.id != id);
        self.persist_ring(next)?;
        debug!(id, "deleted snapshot");
        Ok(())
    }

    /// Persist the auto-backup flag. The immediate snapshot taken when
    /// the flag turns on is wired at the facade, which holds the data.
    pub fn set_auto_backup(&mut self, enabled: bool) -> Result<()> {
        self.store
            .put(AUTO_BACKUP_KEY, if enabled { "true" } else { "false" })?;
        self.auto_backup = enabled;
        debug!(enabled, "auto-backup flag changed");
        Ok(())
    }

    /// Counts and sizes over the retained snapshots.
    pub fn stats(&self) -> BackupStats {
        BackupStats {
            total_snapshots: self.ring.len(),
            total_size: self.ring.iter().map(|s| s.size).sum(),
            last_backup: self.ring.last().map(|s| s.date),
            automatic_count: self
                .ring
                .iter()
                .filter(|s| s.origin == SnapshotOrigin::Automatic)
                .count(),
        }
    }

    fn persist_ring(&mut self, next: Vec<BackupSnapshot>) -> Result<()> {
        let payload = serde_json::to_string(&next)
            .map_err(|e| FieldbookError::Persistence(format!("Serialize failed: {}", e)))?;
        self.store.put(BACKUPS_KEY, &payload)?;
        self.ring = next;
        Ok(())
    }
}
