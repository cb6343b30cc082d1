#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chartbook::{services::AccountCatalog, storage::JsonStore};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh application home that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let home = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    home
}

/// Seeded store under its own temporary home.
pub fn open_store() -> JsonStore {
    JsonStore::open(&temp_home()).expect("open seeded store")
}

/// Groups and accounts for one line in every balance-sheet category.
pub fn populate_balance_accounts(store: &JsonStore) {
    let catalog = AccountCatalog::new(store);
    for (code, name, parent) in [
        ("11", "CURRENT ASSETS", "1"),
        ("1101", "Cash", "11"),
        ("12", "NON CURRENT ASSETS", "1"),
        ("1201", "Equipment", "12"),
        ("21", "CURRENT LIABILITIES", "2"),
        ("2101", "Suppliers", "21"),
        ("22", "NON CURRENT LIABILITIES", "2"),
        ("2201", "Bank Loans", "22"),
        ("31", "Capital", "3"),
    ] {
        catalog
            .create(code, name, parent)
            .unwrap_or_else(|err| panic!("create {code}: {err}"));
    }
}
