use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use uuid::Uuid;

use crate::{
    errors::{BookError, Result, ValidationError},
    ledger::{seed_accounts, Account, LedgerLine, StatementRecord},
    utils::{paths, persistence::write_atomic},
};

use super::BookStorage;

pub const STORE_SCHEMA_VERSION: u32 = 1;

/// On-disk layout: one JSON document holding every logical table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Tables {
    #[serde(default = "Tables::schema_version_default")]
    schema_version: u32,
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    ledger_lines: Vec<LedgerLine>,
    #[serde(default)]
    statements: Vec<StatementRecord>,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            schema_version: STORE_SCHEMA_VERSION,
            accounts: Vec::new(),
            ledger_lines: Vec::new(),
            statements: Vec::new(),
        }
    }
}

impl Tables {
    fn schema_version_default() -> u32 {
        STORE_SCHEMA_VERSION
    }

    fn sort_accounts(&mut self) {
        self.accounts.sort_by(|a, b| a.code.cmp(&b.code));
    }
}

/// Single-file store. Holds only its path; every operation reads the file,
/// applies the change and writes it back atomically.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Opens the store under an application home and seeds the class accounts.
    pub fn open(home: &Path) -> Result<Self> {
        let store = Self::at(paths::store_file_in(home));
        store.seed()?;
        Ok(store)
    }

    /// Store at an explicit file path, without seeding.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts each seed account whose code is not yet present.
    pub fn seed(&self) -> Result<usize> {
        self.transact(|tables| {
            let mut added = 0;
            for account in seed_accounts() {
                if tables.accounts.iter().all(|a| a.code != account.code) {
                    tables.accounts.push(account);
                    added += 1;
                }
            }
            tables.sort_accounts();
            Ok(added)
        })
        .map(|added| {
            if added > 0 {
                tracing::debug!(added, path = %self.path.display(), "seeded class accounts");
            }
            added
        })
    }

    fn read(&self) -> Result<Tables> {
        if !self.path.exists() {
            return Ok(Tables::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let tables: Tables = serde_json::from_str(&data)?;
        if tables.schema_version > STORE_SCHEMA_VERSION {
            return Err(BookError::Storage(format!(
                "store `{}` is from a newer schema version",
                self.path.display()
            )));
        }
        Ok(tables)
    }

    fn write(&self, tables: &Tables) -> Result<()> {
        let json = serde_json::to_string_pretty(tables)?;
        write_atomic(&self.path, json.as_bytes())?;
        tracing::debug!(path = %self.path.display(), "store committed");
        Ok(())
    }

    /// Read-modify-write cycle. Nothing is written when `apply` fails.
    fn transact<T>(&self, apply: impl FnOnce(&mut Tables) -> Result<T>) -> Result<T> {
        let mut tables = self.read()?;
        let value = apply(&mut tables)?;
        self.write(&tables)?;
        Ok(value)
    }
}

impl BookStorage for JsonStore {
    fn insert_account(&self, account: &Account) -> Result<()> {
        self.transact(|tables| {
            if tables.accounts.iter().any(|a| a.code == account.code) {
                return Err(ValidationError::DuplicateCode(account.code.clone()).into());
            }
            tables.accounts.push(account.clone());
            tables.sort_accounts();
            Ok(())
        })
    }

    fn find_account(&self, code: &str) -> Result<Option<Account>> {
        let tables = self.read()?;
        Ok(tables.accounts.into_iter().find(|a| a.code == code))
    }

    fn update_account(&self, original_code: &str, account: &Account) -> Result<bool> {
        let mut tables = self.read()?;
        let Some(index) = tables.accounts.iter().position(|a| a.code == original_code) else {
            return Ok(false);
        };
        if account.code != original_code
            && tables.accounts.iter().any(|a| a.code == account.code)
        {
            return Err(ValidationError::DuplicateCode(account.code.clone()).into());
        }
        tables.accounts[index] = account.clone();
        tables.sort_accounts();
        self.write(&tables)?;
        Ok(true)
    }

    fn delete_account(&self, code: &str) -> Result<bool> {
        let mut tables = self.read()?;
        let before = tables.accounts.len();
        tables.accounts.retain(|a| a.code != code);
        if tables.accounts.len() == before {
            return Ok(false);
        }
        self.write(&tables)?;
        Ok(true)
    }

    fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut tables = self.read()?;
        tables.sort_accounts();
        Ok(tables.accounts)
    }

    fn save_statement(&self, record: &StatementRecord, lines: &[LedgerLine]) -> Result<()> {
        self.transact(|tables| {
            tables.statements.retain(|s| s.id != record.id);
            tables
                .ledger_lines
                .retain(|line| line.statement_id != Some(record.id));
            tables.statements.push(record.clone());
            tables
                .ledger_lines
                .extend(lines.iter().map(|line| line.stored_under(record.id)));
            Ok(())
        })
    }

    fn list_statements(&self) -> Result<Vec<StatementRecord>> {
        let mut statements = self.read()?.statements;
        statements.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at));
        Ok(statements)
    }

    fn statement_lines(&self, statement_id: Uuid) -> Result<Vec<LedgerLine>> {
        let tables = self.read()?;
        Ok(tables
            .ledger_lines
            .into_iter()
            .filter(|line| line.statement_id == Some(statement_id))
            .collect())
    }

    fn delete_line(&self, line_id: Uuid) -> Result<bool> {
        let mut tables = self.read()?;
        let before = tables.ledger_lines.len();
        tables.ledger_lines.retain(|line| line.id != line_id);
        if tables.ledger_lines.len() == before {
            return Ok(false);
        }
        self.write(&tables)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Amount, LineCategory, StatementKind};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn open_seeds_class_accounts_once() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let codes: Vec<_> = store
            .list_accounts()
            .unwrap()
            .into_iter()
            .map(|a| a.code)
            .collect();
        assert_eq!(codes, ["1", "2", "3", "4", "5", "6"]);
        assert_eq!(store.seed().unwrap(), 0);
    }

    #[test]
    fn seeding_never_overwrites_existing_rows() {
        let dir = tempdir().unwrap();
        let store = JsonStore::at(dir.path().join("books.json"));
        store
            .insert_account(&Account::new("1", "Activo", None))
            .unwrap();
        store.seed().unwrap();
        assert_eq!(store.find_account("1").unwrap().unwrap().name, "Activo");
        assert_eq!(store.list_accounts().unwrap().len(), 6);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let err = store
            .insert_account(&Account::new("1", "Other", None))
            .unwrap_err();
        assert!(matches!(
            err,
            BookError::Validation(ValidationError::DuplicateCode(code)) if code == "1"
        ));
    }

    #[test]
    fn update_and_delete_report_missing_rows() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let account = Account::new("11", "Current", Some("1"));
        assert!(!store.update_account("11", &account).unwrap());
        store.insert_account(&account).unwrap();
        let renamed = Account::new("12", "Fixed", Some("1"));
        assert!(store.update_account("11", &renamed).unwrap());
        assert!(store.find_account("11").unwrap().is_none());
        assert!(store.delete_account("12").unwrap());
        assert!(!store.delete_account("12").unwrap());
    }

    #[test]
    fn statements_keep_their_lines() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let record = StatementRecord::new(StatementKind::IncomeStatement, "Acme", date);
        let lines = vec![
            LedgerLine::named("Sales", LineCategory::Revenue, Amount::from_cents(10_000)),
            LedgerLine::named("Rent", LineCategory::OperatingExpense, Amount::from_cents(2_500)),
        ];
        store.save_statement(&record, &lines).unwrap();

        let statements = store.list_statements().unwrap();
        assert_eq!(statements, vec![record.clone()]);
        let stored = store.statement_lines(record.id).unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|l| l.statement_id == Some(record.id)));

        assert!(store.delete_line(stored[0].id).unwrap());
        assert!(!store.delete_line(stored[0].id).unwrap());
        assert_eq!(store.statement_lines(record.id).unwrap().len(), 1);
    }

    #[test]
    fn saving_a_draft_twice_keeps_line_ids_apart() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let lines = vec![
            LedgerLine::named("Sales", LineCategory::Revenue, Amount::from_cents(10_000)),
            LedgerLine::named("Rent", LineCategory::OperatingExpense, Amount::from_cents(2_500)),
        ];
        let first = StatementRecord::new(StatementKind::IncomeStatement, "Acme", date);
        let second = StatementRecord::new(StatementKind::IncomeStatement, "Acme", date);
        store.save_statement(&first, &lines).unwrap();
        store.save_statement(&second, &lines).unwrap();

        let first_lines = store.statement_lines(first.id).unwrap();
        let second_lines = store.statement_lines(second.id).unwrap();
        assert!(first_lines
            .iter()
            .all(|a| second_lines.iter().all(|b| a.id != b.id)));

        assert!(store.delete_line(second_lines[0].id).unwrap());
        assert_eq!(store.statement_lines(first.id).unwrap().len(), 2);
        assert_eq!(store.statement_lines(second.id).unwrap().len(), 1);
    }

    #[test]
    fn legacy_category_labels_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.json");
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{ "accounts": [], "ledger_lines": [
                {{ "id": "{id}", "name": "Caja", "category": "Activo Circulante", "amount": "5.00" }}
            ] }}"#
        );
        fs::write(&path, json).unwrap();
        let store = JsonStore::at(&path);
        let tables = store.read().unwrap();
        assert_eq!(tables.ledger_lines[0].category, LineCategory::AssetCurrent);
        assert_eq!(tables.ledger_lines[0].amount, Amount::from_cents(500));
        assert_eq!(tables.schema_version, STORE_SCHEMA_VERSION);
    }
}
