//! The record store: sole owner of the application data.
//!
//! Every mutation passes through here so each change is immediately
//! durably persisted. A mutation builds the candidate state, writes it
//! under the data key, and only then replaces the in-memory copy;
//! a failed write surfaces as an error and leaves memory untouched.

use std::sync::Arc;

use tracing::debug;

use crate::error::{FieldbookError, Result};
use crate::model::{AppData, ExpenseEntry, NewExpenseEntry, NewWorkEntry, WorkEntry, WorkPatch};
use crate::storage::{KeyValueStore, DATA_KEY};

/// Owns `AppData` and the durable write path for it.
pub struct RecordStore<S> {
    store: Arc<S>,
    data: AppData,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Load the data set from the store; an unwritten key yields the
    /// empty default.
    ///
    /// # Errors
    ///
    /// Returns `FieldbookError::Persistence` if the stored payload exists
    /// but cannot be decoded. A corrupt store is never silently reset.
    pub fn load(store: Arc<S>) -> Result<Self> {
        let data = match store.get(DATA_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                FieldbookError::Persistence(format!("Corrupt data payload: {}", e))
            })?,
            None => AppData::default(),
        };
        Ok(Self { store, data })
    }

    /// Read-only view of the current data set.
    pub fn data(&self) -> &AppData {
        &self.data
    }

    /// Append a validated work entry. Returns the stored entry with its
    /// minted id and timestamp.
    pub fn add_work(&mut self, new: NewWorkEntry) -> Result<WorkEntry> {
        new.validate()?;
        let entry = new.into_entry();
        let mut next = self.data.clone();
        next.work.push(entry.clone());
        self.commit(next)?;
        debug!(id = %entry.id, client = %entry.name, "added work entry");
        Ok(entry)
    }

    /// Append a validated expense entry.
    pub fn add_expense(&mut self, new: NewExpenseEntry) -> Result<ExpenseEntry> {
        new.validate()?;
        let entry = new.into_entry();
        let mut next = self.data.clone();
        next.expenses.push(entry.clone());
        self.commit(next)?;
        debug!(id = %entry.id, kind = %entry.kind, "added expense entry");
        Ok(entry)
    }

    /// Merge `patch` into the matching work entry and re-validate it.
    ///
    /// # Errors
    ///
    /// Returns `FieldbookError::NotFound` if no entry has `id`, and
    /// `FieldbookError::Validation` if the merged entry breaks an
    /// invariant (nothing is persisted in either case).
    pub fn update_work(&mut self, id: &str, patch: &WorkPatch) -> Result<WorkEntry> {
        let mut next = self.data.clone();
        let entry = next
            .work
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| FieldbookError::NotFound(format!("Work entry {}", id)))?;
        patch.apply(entry);
        entry.validate()?;
        let updated = entry.clone();
        self.commit(next)?;
        debug!(id = %updated.id, "updated work entry");
        Ok(updated)
    }

    /// Remove the work entry with `id`. Absent ids are a no-op.
    pub fn delete_work(&mut self, id: &str) -> Result<()> {
        if !self.data.work.iter().any(|w| w.id == id) {
            return Ok(());
        }
        let mut next = self.data.clone();
        next.work.retain(|w| w.id != id);
        self.commit(next)?;
        debug!(id, "deleted work entry");
        Ok(())
    }

    /// Remove the expense entry with `id`. Absent ids are a no-op.
    pub fn delete_expense(&mut self, id: &str) -> Result<()> {
        if !self.data.expenses.iter().any(|e| e.id == id) {
            return Ok(());
        }
        let mut next = self.data.clone();
        next.expenses.retain(|e| e.id != id);
        self.commit(next)?;
        debug!(id, "deleted expense entry");
        Ok(())
    }

    /// Empty the expense collection, leaving work untouched.
    pub fn clear_expenses(&mut self) -> Result<()> {
        let mut next = self.data.clone();
        next.expenses.clear();
        self.commit(next)?;
        debug!("cleared expenses");
        Ok(())
    }

    /// Wholesale replacement of the data set. Used by restore and import;
    /// no merge semantics.
    pub fn replace_all(&mut self, data: AppData) -> Result<()> {
        self.commit(data)?;
        debug!("replaced data set");
        Ok(())
    }

    /// Replace the data set with the empty default.
    pub fn reset(&mut self) -> Result<()> {
        self.replace_all(AppData::default())
    }

    /// Persist `next`, then make it the current state. The in-memory copy
    /// is only swapped after the durable write succeeds.
    fn commit(&mut self, next: AppData) -> Result<()> {
        let payload = serde_json::to_string(&next)
            .map_err(|e| FieldbookError::Persistence(format!("Serialize failed: {}", e)))?;
        self.store.put(DATA_KEY, &payload)?;
        self.data = next;
        Ok(())
    }
}
