//! Reporting queries over the data set.
//!
//! Every query here is pure and idempotent: nothing mutates its input and
//! calling twice with unchanged input yields identical output. Derived
//! figures are recomputed on each call rather than incrementally
//! maintained.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ledger::{group_clients, ClientLedger};
use crate::model::{AppData, ExpenseEntry, ServiceKind, WorkEntry};

/// Headline figures for the whole data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub total_jobs: usize,
    pub total_expense_items: usize,
}

/// Aggregates for one service kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub service: ServiceKind,
    pub count: usize,
    pub amount: f64,
    pub total_hours: f64,

    /// Amount per hour across the group: a genuine hourly rate, zero
    /// when no hours were recorded. Distinct from `avg_per_job`.
    pub avg_price: f64,

    /// Amount per job across the group
    pub avg_per_job: f64,
}

/// Income, expenses, and profit for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// `YYYY-MM` key
    pub month: String,
    pub work_count: usize,
    pub income: f64,
    pub expenses: f64,
    pub net_profit: f64,
}

/// Headcount and balance figures across all clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientStats {
    pub total_clients: usize,
    pub paid_clients: usize,
    pub debt_clients: usize,
    pub total_debt: f64,
    pub total_paid: f64,
}

/// Headline statistics. Empty input yields all zeros.
pub fn stats(data: &AppData) -> Stats {
    let total_income: f64 = data.work.iter().map(|w| w.amount()).sum();
    let total_expenses: f64 = data.expenses.iter().map(|e| e.amount).sum();

    Stats {
        total_income,
        total_expenses,
        net_profit: total_income - total_expenses,
        total_jobs: data.work.len(),
        total_expense_items: data.expenses.len(),
    }
}

/// Per-service aggregates, ordered by service tag.
pub fn service_stats(work: &[WorkEntry]) -> Vec<ServiceStats> {
    let mut grouped: BTreeMap<ServiceKind, (usize, f64, f64)> = BTreeMap::new();

    for entry in work {
        let slot = grouped.entry(entry.service).or_insert((0, 0.0, 0.0));
        slot.0 += 1;
        slot.1 += entry.amount();
        slot.2 += entry.hours;
    }

    grouped
        .into_iter()
        .map(|(service, (count, amount, total_hours))| ServiceStats {
            service,
            count,
            amount,
            total_hours,
            // Guarded: a group can carry amount with zero recorded hours
            avg_price: if total_hours > 0.0 { amount / total_hours } else { 0.0 },
            avg_per_job: amount / count as f64,
        })
        .collect()
}

/// Month-by-month rollup of both collections, most recent month first.
pub fn monthly_report(work: &[WorkEntry], expenses: &[ExpenseEntry]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<String, (usize, f64, f64)> = BTreeMap::new();

    for entry in work {
        let slot = months
            .entry(entry.date.format("%Y-%m").to_string())
            .or_insert((0, 0.0, 0.0));
        slot.0 += 1;
        slot.1 += entry.amount();
    }

    for expense in expenses {
        let slot = months
            .entry(expense.date.format("%Y-%m").to_string())
            .or_insert((0, 0.0, 0.0));
        slot.2 += expense.amount;
    }

    months
        .into_iter()
        .rev()
        .map(|(month, (work_count, income, expenses))| MonthlyTotals {
            month,
            work_count,
            income,
            expenses,
            net_profit: income - expenses,
        })
        .collect()
}

/// The `limit` clients with the highest paid amount, descending. Equal
/// paid amounts break by client name ascending.
pub fn top_clients(work: &[WorkEntry], limit: usize) -> Vec<ClientLedger> {
    let mut clients: Vec<ClientLedger> = group_clients(work).into_values().collect();
    // Already name-ordered, so a stable sort on paid keeps the tie-break
    clients.sort_by(|a, b| b.paid.total_cmp(&a.paid));
    clients.truncate(limit);
    clients
}

/// The `limit` services with the highest billed amount, descending.
/// Equal amounts break by service tag order.
pub fn top_services(work: &[WorkEntry], limit: usize) -> Vec<ServiceStats> {
    let mut services = service_stats(work);
    services.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    services.truncate(limit);
    services
}

/// Client headcounts and paid/debt balances across all ledgers.
pub fn client_stats(work: &[WorkEntry]) -> ClientStats {
    let grouped = group_clients(work);

    ClientStats {
        total_clients: grouped.len(),
        paid_clients: grouped.values().filter(|c| c.debt == 0.0).count(),
        debt_clients: grouped.values().filter(|c| c.debt > 0.0).count(),
        total_debt: grouped.values().map(|c| c.debt).sum(),
        total_paid: grouped.values().map(|c| c.paid).sum(),
    }
}

/// Mean of the hourly price column. Zero on empty input.
pub fn average_hour_price(work: &[WorkEntry]) -> f64 {
    if work.is_empty() {
        return 0.0;
    }
    work.iter().map(|w| w.price).sum::<f64>() / work.len() as f64
}

/// Mean hours per job. Zero on empty input.
pub fn average_hours_per_job(work: &[WorkEntry]) -> f64 {
    if work.is_empty() {
        return 0.0;
    }
    work.iter().map(|w| w.hours).sum::<f64>() / work.len() as f64
}
