//! Operations the presentation layer calls. Each service combines the field
//! validators, the statement arithmetic and a [`BookStorage`](crate::storage::BookStorage).

pub mod account_catalog;
pub mod balance_sheet;
pub mod income_statement;

pub use account_catalog::{AccountCatalog, CatalogWarning};
pub use balance_sheet::BalanceSheetDraft;
pub use income_statement::IncomeStatementDraft;

use crate::{errors::ValidationError, ledger::Amount, validation::has_at_most_two_decimals};

/// Parses a form amount: two-decimal digits only and strictly positive.
pub(crate) fn positive_amount(text: &str) -> Result<Amount, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::Required("Amount"));
    }
    if !has_at_most_two_decimals(text) {
        return Err(ValidationError::MalformedAmount(text.to_string()));
    }
    let amount = Amount::parse(text)?;
    if !amount.is_positive() {
        return Err(ValidationError::ZeroAmount);
    }
    Ok(amount)
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
