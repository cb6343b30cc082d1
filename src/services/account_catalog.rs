use std::{collections::BTreeSet, fmt};

use crate::{
    errors::{BookError, Result, ValidationError},
    ledger::{Account, LineCategory},
    storage::BookStorage,
    validation::{check_account_code, is_alphabetic_name},
};

use super::non_blank;

/// Integrity findings that do not block any operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    /// An account whose parent code no longer exists.
    OrphanedAccount { code: String, parent_code: String },
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogWarning::OrphanedAccount { code, parent_code } => write!(
                f,
                "Account {code} refers to missing parent {parent_code}"
            ),
        }
    }
}

/// Chart-of-accounts operations over a storage backend.
pub struct AccountCatalog<'a> {
    storage: &'a dyn BookStorage,
}

impl<'a> AccountCatalog<'a> {
    pub fn new(storage: &'a dyn BookStorage) -> Self {
        Self { storage }
    }

    /// Validates and inserts a new account. `parent` may be blank for a top-level
    /// account.
    pub fn create(&self, code: &str, name: &str, parent: &str) -> Result<Account> {
        let account = self.validated(code, name, parent, None)?;
        match self.storage.insert_account(&account) {
            Ok(()) => {
                tracing::info!(code = %account.code, name = %account.name, "account created");
                Ok(account)
            }
            Err(err) => {
                tracing::warn!(code = %account.code, error = %err, "account rejected");
                Err(err)
            }
        }
    }

    pub fn find(&self, code: &str) -> Result<Option<Account>> {
        self.storage.find_account(code.trim())
    }

    /// Replaces the account stored under `original_code`, re-validating every field
    /// against the new parent.
    pub fn edit(
        &self,
        original_code: &str,
        code: &str,
        name: &str,
        parent: &str,
    ) -> Result<Account> {
        let original_code = original_code.trim();
        if self.storage.find_account(original_code)?.is_none() {
            return Err(BookError::AccountNotFound(original_code.to_string()));
        }
        let account = self.validated(code, name, parent, Some(original_code))?;
        if !self.storage.update_account(original_code, &account)? {
            return Err(BookError::AccountNotFound(original_code.to_string()));
        }
        tracing::info!(from = original_code, to = %account.code, "account updated");
        Ok(account)
    }

    /// Deletes by code. Returns `false` when no account had that code.
    ///
    /// Children are left in place; see [`AccountCatalog::warnings`].
    pub fn delete(&self, code: &str) -> Result<bool> {
        let code = code.trim();
        let deleted = self.storage.delete_account(code)?;
        if deleted {
            tracing::info!(code, "account deleted");
        } else {
            tracing::warn!(code, "delete matched no account");
        }
        Ok(deleted)
    }

    pub fn list(&self) -> Result<Vec<Account>> {
        self.storage.list_accounts()
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.storage.list_accounts()?.len())
    }

    /// Accounts that may be booked under a balance-sheet category. Income categories
    /// have no catalog prefix and yield nothing.
    pub fn eligible_for(&self, category: LineCategory) -> Result<Vec<Account>> {
        let Some(prefix) = category.code_prefix() else {
            return Ok(Vec::new());
        };
        Ok(self
            .storage
            .list_accounts()?
            .into_iter()
            .filter(|account| account.is_under(prefix))
            .collect())
    }

    pub fn warnings(&self) -> Result<Vec<CatalogWarning>> {
        let accounts = self.storage.list_accounts()?;
        let codes: BTreeSet<&str> = accounts.iter().map(|a| a.code.as_str()).collect();
        Ok(accounts
            .iter()
            .filter_map(|account| {
                let parent = account.parent_code.as_deref()?;
                (!codes.contains(parent)).then(|| CatalogWarning::OrphanedAccount {
                    code: account.code.clone(),
                    parent_code: parent.to_string(),
                })
            })
            .collect())
    }

    fn validated(
        &self,
        code: &str,
        name: &str,
        parent: &str,
        editing: Option<&str>,
    ) -> Result<Account> {
        let code = non_blank(code).ok_or(ValidationError::Required("Code"))?;
        let name = non_blank(name).ok_or(ValidationError::Required("Name"))?;
        let parent = non_blank(parent);

        if !is_alphabetic_name(name) {
            return Err(ValidationError::NonAlphabeticName(name.to_string()).into());
        }
        check_account_code(code, parent).map_err(|reason| ValidationError::InvalidCode {
            code: code.to_string(),
            reason,
        })?;

        if let Some(parent) = parent {
            let is_self = editing == Some(parent);
            if is_self || self.storage.find_account(parent)?.is_none() {
                return Err(ValidationError::UnknownParent(parent.to_string()).into());
            }
        }

        if editing != Some(code) && self.storage.find_account(code)?.is_some() {
            return Err(ValidationError::DuplicateCode(code.to_string()).into());
        }

        Ok(Account::new(code, name, parent))
    }
}
