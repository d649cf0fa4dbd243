//! Core data model for the bookkeeping domain.
//!
//! These types define the persisted record shapes and their construction
//! inputs. Serialized field names follow the established on-disk dialect
//! (`payStatus`, `type`, `timestamp`) so previously exported files import
//! without translation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FieldbookError, Result};

/// Kind of field service performed for a client.
///
/// A closed set; free-form service names are rejected at construction time
/// and fall under `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    Plowing,
    Harvesting,
    Transport,
    Harrowing,
    Threshing,
    Other,
}

impl ServiceKind {
    /// Wire name, as used in serialized data and tabular exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Plowing => "plowing",
            ServiceKind::Harvesting => "harvesting",
            ServiceKind::Transport => "transport",
            ServiceKind::Harrowing => "harrowing",
            ServiceKind::Threshing => "threshing",
            ServiceKind::Other => "other",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = FieldbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plowing" => Ok(ServiceKind::Plowing),
            "harvesting" => Ok(ServiceKind::Harvesting),
            "transport" => Ok(ServiceKind::Transport),
            "harrowing" => Ok(ServiceKind::Harrowing),
            "threshing" => Ok(ServiceKind::Threshing),
            "other" => Ok(ServiceKind::Other),
            _ => Err(FieldbookError::Validation(format!(
                "Unknown service kind: {}",
                s
            ))),
        }
    }
}

/// Payment state of a work entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayStatus {
    /// Fully settled; the whole amount counts as paid
    PaidInFull,
    /// Payment postponed; the whole amount counts as debt
    Deferred,
    /// Half collected up front, half outstanding
    HalfPaid,
}

impl PayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayStatus::PaidInFull => "paid-in-full",
            PayStatus::Deferred => "deferred",
            PayStatus::HalfPaid => "half-paid",
        }
    }
}

impl fmt::Display for PayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a recorded operating cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseKind {
    Fuel,
    Oil,
    Maintenance,
    Parts,
    Labor,
    Other,
}

impl ExpenseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseKind::Fuel => "fuel",
            ExpenseKind::Oil => "oil",
            ExpenseKind::Maintenance => "maintenance",
            ExpenseKind::Parts => "parts",
            ExpenseKind::Labor => "labor",
            ExpenseKind::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of field work performed for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    /// Opaque unique id, stable for the entry's lifetime
    pub id: String,

    /// Client name; non-empty, the client's natural key
    pub name: String,

    /// Day the work was performed
    pub date: NaiveDate,

    /// Where the work took place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// What was done
    pub service: ServiceKind,

    /// Hours worked; always positive
    pub hours: f64,

    /// Hourly price in the operator's local currency
    pub price: f64,

    /// How the bill was settled
    pub pay_status: PayStatus,

    /// Client phone number, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Creation time; immutable once set
    pub timestamp: DateTime<Utc>,
}

impl WorkEntry {
    /// Billed amount. Always recomputed, never stored.
    pub fn amount(&self) -> f64 {
        self.hours * self.price
    }

    /// Re-check the domain invariants, e.g. after a patch merge.
    pub(crate) fn validate(&self) -> Result<()> {
        check_work_invariants(&self.name, self.hours, self.price)
    }
}

fn check_work_invariants(name: &str, hours: f64, price: f64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(FieldbookError::Validation(
            "Client name must not be empty".to_string(),
        ));
    }
    if !(hours > 0.0) {
        return Err(FieldbookError::Validation(
            "Hours must be greater than zero".to_string(),
        ));
    }
    if !(price >= 0.0) {
        return Err(FieldbookError::Validation(
            "Price must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// One recorded operating cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: String,

    pub date: NaiveDate,

    /// Expense category (serialized as `type`, the established wire name)
    #[serde(rename = "type")]
    pub kind: ExpenseKind,

    /// Cost; always positive
    pub amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    pub timestamp: DateTime<Utc>,
}

/// The aggregate root: every work entry and every expense, in insertion
/// order. Owned exclusively by the record store; all other components
/// receive read-only views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub work: Vec<WorkEntry>,
    pub expenses: Vec<ExpenseEntry>,
}

impl AppData {
    pub fn is_empty(&self) -> bool {
        self.work.is_empty() && self.expenses.is_empty()
    }
}

/// Builder for creating new work entries.
#[derive(Debug, Clone)]
pub struct NewWorkEntry {
    pub name: String,
    pub date: NaiveDate,
    pub location: Option<String>,
    pub service: ServiceKind,
    pub hours: f64,
    pub price: f64,
    pub pay_status: PayStatus,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl NewWorkEntry {
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        service: ServiceKind,
        hours: f64,
        price: f64,
        pay_status: PayStatus,
    ) -> Self {
        Self {
            name: name.into(),
            date,
            location: None,
            service,
            hours,
            price,
            pay_status,
            phone: None,
            notes: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Check the domain invariants for a work record.
    pub fn validate(&self) -> Result<()> {
        check_work_invariants(&self.name, self.hours, self.price)
    }

    /// Mint a full entry with a fresh id and creation timestamp.
    pub(crate) fn into_entry(self) -> WorkEntry {
        WorkEntry {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            date: self.date,
            location: self.location,
            service: self.service,
            hours: self.hours,
            price: self.price,
            pay_status: self.pay_status,
            phone: self.phone,
            notes: self.notes,
            timestamp: Utc::now(),
        }
    }
}

/// Builder for creating new expense entries.
#[derive(Debug, Clone)]
pub struct NewExpenseEntry {
    pub date: NaiveDate,
    pub kind: ExpenseKind,
    pub amount: f64,
    pub details: Option<String>,
}

impl NewExpenseEntry {
    pub fn new(date: NaiveDate, kind: ExpenseKind, amount: f64) -> Self {
        Self {
            date,
            kind,
            amount,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.amount > 0.0) {
            return Err(FieldbookError::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_entry(self) -> ExpenseEntry {
        ExpenseEntry {
            id: Uuid::new_v4().to_string(),
            date: self.date,
            kind: self.kind,
            amount: self.amount,
            details: self.details,
            timestamp: Utc::now(),
        }
    }
}

/// Partial update for a work entry. `None` leaves a field unchanged;
/// `id` and `timestamp` are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPatch {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub service: Option<ServiceKind>,
    pub hours: Option<f64>,
    pub price: Option<f64>,
    pub pay_status: Option<PayStatus>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl WorkPatch {
    /// Merge the set fields into `entry`.
    pub(crate) fn apply(&self, entry: &mut WorkEntry) {
        if let Some(name) = &self.name {
            entry.name = name.clone();
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(location) = &self.location {
            entry.location = Some(location.clone());
        }
        if let Some(service) = self.service {
            entry.service = service;
        }
        if let Some(hours) = self.hours {
            entry.hours = hours;
        }
        if let Some(price) = self.price {
            entry.price = price;
        }
        if let Some(pay_status) = self.pay_status {
            entry.pay_status = pay_status;
        }
        if let Some(phone) = &self.phone {
            entry.phone = Some(phone.clone());
        }
        if let Some(notes) = &self.notes {
            entry.notes = Some(notes.clone());
        }
    }
}
