//! End-to-end flows over one session: record, aggregate, report, back up,
//! export, restore.

use fieldbook_core::model::{ExpenseKind, NewExpenseEntry, NewWorkEntry, PayStatus, ServiceKind};
use fieldbook_core::storage::SqliteStore;
use fieldbook_core::{group_clients, report, Fieldbook, SNAPSHOT_CAP};

fn open_session() -> anyhow::Result<Fieldbook<SqliteStore>> {
    Ok(Fieldbook::open(SqliteStore::open_in_memory()?)?)
}

fn seed_season(session: &mut Fieldbook<SqliteStore>) -> anyhow::Result<()> {
    let jobs = [
        ("Ali", "2024-01-15", ServiceKind::Plowing, 2.0, 100.0, PayStatus::PaidInFull),
        ("Ali", "2024-02-10", ServiceKind::Transport, 1.0, 80.0, PayStatus::Deferred),
        ("Omar", "2024-01-20", ServiceKind::Plowing, 3.0, 90.0, PayStatus::HalfPaid),
        ("Omar", "2024-02-02", ServiceKind::Harvesting, 4.0, 110.0, PayStatus::PaidInFull),
        ("Sara", "2024-02-15", ServiceKind::Threshing, 2.5, 120.0, PayStatus::Deferred),
    ];
    for (name, date, service, hours, price, pay_status) in jobs {
        session.add_work(NewWorkEntry::new(
            name,
            date.parse()?,
            service,
            hours,
            price,
            pay_status,
        ))?;
    }

    session.add_expense(NewExpenseEntry::new(
        "2024-01-20".parse()?,
        ExpenseKind::Fuel,
        30.0,
    ))?;
    session.add_expense(
        NewExpenseEntry::new("2024-02-05".parse()?, ExpenseKind::Maintenance, 150.0)
            .with_details("hydraulic hose"),
    )?;
    Ok(())
}

#[test]
fn test_totals_are_conserved_across_views() -> anyhow::Result<()> {
    let mut session = open_session()?;
    seed_season(&mut session)?;

    let data = session.data();
    let billed: f64 = data.work.iter().map(|w| w.amount()).sum();

    let ledgers = group_clients(&data.work);
    let ledger_total: f64 = ledgers.values().map(|c| c.total).sum();
    assert!((billed - ledger_total).abs() < 1e-9);

    for ledger in ledgers.values() {
        assert!((ledger.paid + ledger.debt - ledger.total).abs() < 1e-9);
    }

    let stats = report::stats(data);
    assert!((stats.total_income - billed).abs() < 1e-9);
    assert_eq!(stats.net_profit, stats.total_income - stats.total_expenses);

    let client_stats = report::client_stats(&data.work);
    let ledger_paid: f64 = ledgers.values().map(|c| c.paid).sum();
    assert!((client_stats.total_paid - ledger_paid).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_monthly_rollup_most_recent_first() -> anyhow::Result<()> {
    let mut session = open_session()?;
    seed_season(&mut session)?;

    let data = session.data();
    let months = report::monthly_report(&data.work, &data.expenses);
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].month, "2024-02");
    assert_eq!(months[1].month, "2024-01");

    // January: 200 + 270 billed, 30 spent
    assert_eq!(months[1].work_count, 2);
    assert!((months[1].income - 470.0).abs() < 1e-9);
    assert!((months[1].net_profit - 440.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_rankings() -> anyhow::Result<()> {
    let mut session = open_session()?;
    seed_season(&mut session)?;

    let data = session.data();
    // Paid: Ali 200, Omar 135 + 440 = 575, Sara 0
    let top = report::top_clients(&data.work, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "Omar");

    let services = report::top_services(&data.work, 2);
    assert_eq!(services.len(), 2);
    // Plowing 200 + 270 = 470, Harvesting 440, Threshing 300
    assert_eq!(services[0].service, ServiceKind::Plowing);
    assert_eq!(services[1].service, ServiceKind::Harvesting);
    Ok(())
}

#[test]
fn test_auto_backup_ring_stays_bounded() -> anyhow::Result<()> {
    let mut session = open_session()?;
    session.set_auto_backup(true)?;

    for i in 0..SNAPSHOT_CAP + 5 {
        session.add_expense(NewExpenseEntry::new(
            "2024-03-01".parse()?,
            ExpenseKind::Fuel,
            1.0 + i as f64,
        ))?;
    }

    assert_eq!(session.snapshots().len(), SNAPSHOT_CAP);
    // The newest snapshot reflects the latest state
    let newest = session.snapshots().last().expect("ring is non-empty");
    assert_eq!(newest.data.expenses.len(), SNAPSHOT_CAP + 5);
    Ok(())
}

#[test]
fn test_backup_restore_round_trip() -> anyhow::Result<()> {
    let mut session = open_session()?;
    seed_season(&mut session)?;
    let before = session.data().clone();

    let snapshot = session.create_backup(None)?;
    session.reset()?;
    assert!(session.data().is_empty());

    session.restore_backup(&snapshot.id)?;
    assert_eq!(session.data(), &before);
    Ok(())
}

#[test]
fn test_file_round_trip_preserves_everything() -> anyhow::Result<()> {
    let mut session = open_session()?;
    seed_season(&mut session)?;
    let exported = session.export_json()?;

    let mut other = open_session()?;
    other.import_json(&exported)?;
    assert_eq!(other.data(), session.data());

    // Reports over the imported copy match the source
    assert_eq!(report::stats(other.data()), report::stats(session.data()));
    Ok(())
}

#[test]
fn test_table_export_lists_every_job() -> anyhow::Result<()> {
    let mut session = open_session()?;
    seed_season(&mut session)?;

    let table = session.export_table()?;
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 1 + session.data().work.len());
    assert!(lines[0].starts_with("\"client\""));
    assert!(lines[1].contains("\"Ali\""));
    assert!(lines[1].contains("\"200\""));
    Ok(())
}
