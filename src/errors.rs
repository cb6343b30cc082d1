use std::result::Result as StdResult;

use thiserror::Error;

use crate::{
    ledger::LineCategory,
    statements::BalanceRejection,
    validation::CodeRejection,
};

/// Field-level problems the user fixes and resubmits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Name `{0}` may only contain letters and spaces")]
    NonAlphabeticName(String),
    #[error("Amount `{0}` must be digits with at most two decimals")]
    MalformedAmount(String),
    #[error("Amount `{0}` exceeds the largest accepted value 999,999,999,999,999.99")]
    AmountOutOfRange(String),
    #[error("Amounts must be greater than zero")]
    ZeroAmount,
    #[error("Account code `{code}` is invalid: {reason}")]
    InvalidCode { code: String, reason: CodeRejection },
    #[error("Account code `{0}` already exists")]
    DuplicateCode(String),
    #[error("Parent account `{0}` does not exist")]
    UnknownParent(String),
    #[error("Account `{0}` does not exist")]
    UnknownAccount(String),
    #[error("Account `{code}` cannot be listed under {category}")]
    IneligibleAccount { code: String, category: LineCategory },
    #[error("{0} lines do not belong on this statement")]
    WrongCategory(LineCategory),
    #[error("Unknown category `{0}`")]
    UnknownCategory(String),
    #[error("Date `{0}` must be dd/mm/yyyy or yyyy-mm-dd")]
    InvalidDate(String),
    #[error("Enter at least one line")]
    NoLines,
}

/// Unified error type for the validation, statement, storage and reporting layers.
#[derive(Debug, Error)]
pub enum BookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Rejected(#[from] BalanceRejection),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Report error: {0}")]
    Report(String),
}

pub type Result<T> = StdResult<T, BookError>;

impl From<std::io::Error> for BookError {
    fn from(err: std::io::Error) -> Self {
        BookError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for BookError {
    fn from(err: serde_json::Error) -> Self {
        BookError::Storage(err.to_string())
    }
}
