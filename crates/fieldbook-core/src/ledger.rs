//! Per-client ledger aggregation.
//!
//! A ledger is a derived, ephemeral view: it is recomputed from the
//! canonical work collection on every query and never cached across
//! mutations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{PayStatus, ServiceKind, WorkEntry};

/// Aggregated financial view of all work entries for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientLedger {
    /// Client name, the grouping key
    pub name: String,

    /// Phone from the client's first entry in insertion order; later
    /// entries never overwrite it
    pub phone: Option<String>,

    /// Total billed across all entries
    pub total: f64,

    /// Portion collected
    pub paid: f64,

    /// Portion outstanding
    pub debt: f64,

    /// The contributing work entries, in insertion order
    pub entries: Vec<WorkEntry>,

    /// Earliest entry date
    pub first_date: NaiveDate,

    /// Latest entry date
    pub last_date: NaiveDate,

    /// Cumulative billed amount per service kind
    pub services: BTreeMap<ServiceKind, f64>,
}

impl ClientLedger {
    fn seed(entry: &WorkEntry) -> Self {
        Self {
            name: entry.name.clone(),
            phone: entry.phone.clone(),
            total: 0.0,
            paid: 0.0,
            debt: 0.0,
            entries: Vec::new(),
            first_date: entry.date,
            last_date: entry.date,
            services: BTreeMap::new(),
        }
    }
}

/// Group work entries into per-client ledgers, keyed by client name.
///
/// Pure: the input is never mutated and the result is fully recomputed on
/// each call. The returned map iterates in name order, so downstream
/// consumers are deterministic. The only order-dependent outputs are the
/// seeded phone number (first entry wins) and the per-client entry list,
/// which both follow the input sequence.
pub fn group_clients(work: &[WorkEntry]) -> BTreeMap<String, ClientLedger> {
    let mut grouped: BTreeMap<String, ClientLedger> = BTreeMap::new();

    for entry in work {
        let ledger = grouped
            .entry(entry.name.clone())
            .or_insert_with(|| ClientLedger::seed(entry));

        let amount = entry.amount();
        ledger.entries.push(entry.clone());
        ledger.total += amount;

        match entry.pay_status {
            PayStatus::PaidInFull => ledger.paid += amount,
            PayStatus::HalfPaid => {
                ledger.paid += amount / 2.0;
                ledger.debt += amount / 2.0;
            }
            PayStatus::Deferred => ledger.debt += amount,
        }

        if entry.date > ledger.last_date {
            ledger.last_date = entry.date;
        }
        if entry.date < ledger.first_date {
            ledger.first_date = entry.date;
        }

        *ledger.services.entry(entry.service).or_insert(0.0) += amount;
    }

    grouped
}
