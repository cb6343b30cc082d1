pub mod json_backend;

use uuid::Uuid;

use crate::{
    errors::Result,
    ledger::{Account, LedgerLine, StatementRecord},
};

/// Abstraction over persistence backends holding the chart of accounts and saved
/// statements.
///
/// Each call is a complete unit of work: implementations acquire the store, apply
/// the change and release it before returning.
pub trait BookStorage: Send + Sync {
    /// Inserts a new account. Fails with a duplicate-code error when the code exists.
    fn insert_account(&self, account: &Account) -> Result<()>;
    fn find_account(&self, code: &str) -> Result<Option<Account>>;
    /// Replaces the account stored under `original_code`. Returns `false` when no
    /// such account exists.
    fn update_account(&self, original_code: &str, account: &Account) -> Result<bool>;
    /// Returns `false` when nothing was deleted.
    fn delete_account(&self, code: &str) -> Result<bool>;
    /// All accounts ordered by code.
    fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Persists the statement header and its lines in one write.
    fn save_statement(&self, record: &StatementRecord, lines: &[LedgerLine]) -> Result<()>;
    fn list_statements(&self) -> Result<Vec<StatementRecord>>;
    fn statement_lines(&self, statement_id: Uuid) -> Result<Vec<LedgerLine>>;
    fn delete_line(&self, line_id: Uuid) -> Result<bool>;
}

pub use json_backend::{JsonStore, STORE_SCHEMA_VERSION};
