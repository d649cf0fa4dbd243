use fieldbook_core::model::{ExpenseKind, NewExpenseEntry, NewWorkEntry, PayStatus, ServiceKind};
use fieldbook_core::storage::SqliteStore;
use fieldbook_core::Fieldbook;

fn some_work(name: &str) -> NewWorkEntry {
    NewWorkEntry::new(
        name,
        "2024-03-01".parse().expect("valid date"),
        ServiceKind::Plowing,
        2.0,
        100.0,
        PayStatus::HalfPaid,
    )
    .with_phone("0100000000")
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir should be available");
    let path = dir.path().join("fieldbook.db");

    {
        let store = SqliteStore::open(&path).expect("open should succeed");
        let mut session = Fieldbook::open(store).expect("session should open");
        session.add_work(some_work("Ali")).expect("add should succeed");
        session
            .add_expense(NewExpenseEntry::new(
                "2024-03-02".parse().expect("valid date"),
                ExpenseKind::Fuel,
                30.0,
            ))
            .expect("add should succeed");
    }

    let store = SqliteStore::open(&path).expect("reopen should succeed");
    let session = Fieldbook::open(store).expect("session should open");
    assert_eq!(session.data().work.len(), 1);
    assert_eq!(session.data().work[0].name, "Ali");
    assert_eq!(session.data().expenses.len(), 1);
}

#[test]
fn test_backups_and_flag_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir should be available");
    let path = dir.path().join("fieldbook.db");

    let snapshot_id = {
        let store = SqliteStore::open(&path).expect("open should succeed");
        let mut session = Fieldbook::open(store).expect("session should open");
        session.add_work(some_work("Ali")).expect("add should succeed");
        session.set_auto_backup(true).expect("flag should persist");
        session
            .create_backup(Some("end of week".to_string()))
            .expect("backup should succeed")
            .id
    };

    let store = SqliteStore::open(&path).expect("reopen should succeed");
    let mut session = Fieldbook::open(store).expect("session should open");
    assert!(session.auto_backup_enabled());
    // One automatic snapshot from enabling the flag, one manual
    assert_eq!(session.snapshots().len(), 2);

    session.reset().expect("reset should succeed");
    session
        .restore_backup(&snapshot_id)
        .expect("restore should succeed");
    assert_eq!(session.data().work.len(), 1);
}

#[test]
fn test_fresh_store_starts_empty() {
    let dir = tempfile::tempdir().expect("tempdir should be available");
    let path = dir.path().join("fieldbook.db");

    let store = SqliteStore::open(&path).expect("open should succeed");
    let session = Fieldbook::open(store).expect("session should open");
    assert!(session.data().is_empty());
    assert!(session.snapshots().is_empty());
    assert!(!session.auto_backup_enabled());
}
