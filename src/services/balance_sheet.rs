use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    errors::{BookError, Result, ValidationError},
    ledger::{LedgerLine, LineCategory, StatementKind, StatementRecord},
    statements::{BalanceSheetAccumulator, SectionPolicy, StatementTotals},
    storage::BookStorage,
    validation::parse_statement_date,
};

use super::{non_blank, positive_amount, AccountCatalog};

/// In-memory balance-sheet form: company, date and lines drawn from the catalog.
#[derive(Debug, Clone, Default)]
pub struct BalanceSheetDraft {
    company: String,
    date: Option<NaiveDate>,
    lines: Vec<LedgerLine>,
}

impl BalanceSheetDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_company(&mut self, company: &str) {
        self.company = company.trim().to_string();
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    /// Parses and stores the statement date; the previous date is kept on failure.
    pub fn set_date(&mut self, text: &str) -> Result<NaiveDate> {
        let date = parse_statement_date(text)?;
        self.date = Some(date);
        Ok(date)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn lines(&self) -> &[LedgerLine] {
        &self.lines
    }

    /// Books `amount_text` against the catalog account `code` under `category`.
    pub fn add_line(
        &mut self,
        catalog: &AccountCatalog<'_>,
        category: LineCategory,
        code: &str,
        amount_text: &str,
    ) -> Result<&LedgerLine> {
        let Some(prefix) = category.code_prefix() else {
            return Err(ValidationError::WrongCategory(category).into());
        };
        let code = non_blank(code).ok_or(ValidationError::Required("Account"))?;
        let account = catalog
            .find(code)?
            .ok_or_else(|| ValidationError::UnknownAccount(code.to_string()))?;
        if !account.is_under(prefix) {
            return Err(ValidationError::IneligibleAccount {
                code: account.code,
                category,
            }
            .into());
        }
        let amount = positive_amount(amount_text)?;

        tracing::debug!(code = %account.code, %category, %amount, "balance line added");
        self.lines
            .push(LedgerLine::for_account(&account, category, amount));
        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Removes a line by id. Returns `false` when no line matched.
    pub fn remove_line(&mut self, id: Uuid) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        self.lines.len() != before
    }

    /// Running totals; available at any time, whether or not the sheet balances.
    pub fn totals(&self, policy: SectionPolicy) -> StatementTotals {
        BalanceSheetAccumulator::new(policy).totals(&self.lines)
    }

    /// Company and date, the minimum needed to title a report.
    pub fn header(&self) -> Result<(&str, NaiveDate)> {
        let company = non_blank(&self.company).ok_or(ValidationError::Required("Company"))?;
        let date = self.date.ok_or(ValidationError::Required("Date"))?;
        Ok((company, date))
    }

    /// Checks the sheet against `policy` and persists it with its lines.
    pub fn save(
        &self,
        storage: &dyn BookStorage,
        policy: SectionPolicy,
    ) -> Result<(StatementRecord, StatementTotals)> {
        let (company, date) = self.header()?;
        let totals = BalanceSheetAccumulator::new(policy)
            .evaluate(&self.lines)
            .map_err(|rejection| {
                tracing::warn!(company, %rejection, "balance sheet rejected");
                BookError::from(rejection)
            })?;

        let record = StatementRecord::new(StatementKind::BalanceSheet, company, date);
        storage.save_statement(&record, &self.lines)?;
        tracing::info!(
            company,
            %date,
            lines = self.lines.len(),
            total_assets = %totals.total_assets,
            "balance sheet saved"
        );
        Ok((record, totals))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
