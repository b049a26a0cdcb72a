//! Persistence behavior of the store: round-trips, defaults, and recovery
//! from stale documents.

use std::fs;

use finance_core::ledger::DEFAULT_CATEGORIES;
use finance_core::money::Money;
use finance_core::storage::JsonStorage;
use finance_core::store::LedgerStore;
use tempfile::TempDir;

fn open_store(temp: &TempDir) -> LedgerStore {
    let storage = JsonStorage::new(temp.path().join("ledger.json"));
    LedgerStore::open(Box::new(storage)).expect("open store")
}

#[test]
fn fresh_store_starts_with_defaults() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp);

    assert!(store.transactions().is_empty());
    assert_eq!(store.balance(), Money::ZERO);
    assert_eq!(store.categories().len(), DEFAULT_CATEGORIES.len());
    for category in DEFAULT_CATEGORIES {
        assert!(store.categories().contains(category));
    }
    assert!(store.is_synced());
}

#[test]
fn state_survives_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let mut store = open_store(&temp);
        store
            .add_transaction("1000.00", "Salary", "2024-01-01", "Income", "Employer")
            .unwrap();
        store
            .add_transaction("200.50", "Food", "2024-01-05", "Expense", "Groceries")
            .unwrap();
        store.add_category("Travel").unwrap();
    }

    let reopened = open_store(&temp);
    assert_eq!(reopened.transactions().len(), 2);
    assert_eq!(reopened.balance(), Money::from_cents(79_950));
    assert!(reopened.categories().contains("Travel"));
    let sources: Vec<_> = reopened
        .transactions()
        .iter()
        .map(|txn| txn.source.as_str())
        .collect();
    assert_eq!(sources, vec!["Employer", "Groceries"]);
}

#[test]
fn mutations_are_persisted_immediately() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ledger.json");
    let mut store = open_store(&temp);

    assert!(!path.exists(), "no document before the first mutation");
    store
        .add_transaction("5.00", "Food", "2024-01-05", "Expense", "Snack")
        .unwrap();
    assert!(path.exists(), "document written after the mutation");

    let before = fs::read_to_string(&path).unwrap();
    store.add_category("Travel").unwrap();
    let after = fs::read_to_string(&path).unwrap();
    assert_ne!(before, after, "category change overwrites the document");
}

#[test]
fn id_counter_survives_delete_and_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let mut store = open_store(&temp);
        store
            .add_transaction("1.00", "Food", "2024-01-01", "Expense", "a")
            .unwrap();
        let kept = store
            .add_transaction("2.00", "Food", "2024-01-02", "Expense", "b")
            .unwrap();
        store.delete_transaction(0).unwrap();
        assert_eq!(kept, 1);
    }

    let mut reopened = open_store(&temp);
    let next = reopened
        .add_transaction("3.00", "Food", "2024-01-03", "Expense", "c")
        .unwrap();
    assert_eq!(next, 2, "counter resumes past the highest surviving id");
}

#[test]
fn stale_persisted_balance_is_ignored_at_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ledger.json");
    let document = serde_json::json!({
        "transactions": [
            {
                "amount": 1000.0,
                "category": "Salary",
                "date": "2024-01-01",
                "type": "Income",
                "source": "Employer",
                "index": 0
            },
            {
                "amount": 200.5,
                "category": "Food",
                "date": "2024-01-05",
                "type": "Expense",
                "source": "Groceries",
                "index": 1
            }
        ],
        "balance": 12345.0,
        "categories": ["Food", "Salary"]
    });
    fs::write(&path, document.to_string()).unwrap();

    let store = LedgerStore::open(Box::new(JsonStorage::new(&path))).expect("open store");
    assert_eq!(store.balance(), Money::from_cents(79_950));
}
