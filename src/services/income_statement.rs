use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::{
    errors::{Result, ValidationError},
    ledger::{LedgerLine, LineCategory, StatementKind, StatementRecord},
    statements::IncomeStatementTotals,
    storage::BookStorage,
    validation::parse_statement_date,
};

use super::{non_blank, positive_amount};

/// In-memory income-statement form. Lines are free text; no catalog lookup.
#[derive(Debug, Clone)]
pub struct IncomeStatementDraft {
    company: String,
    date: NaiveDate,
    lines: Vec<LedgerLine>,
}

impl Default for IncomeStatementDraft {
    fn default() -> Self {
        Self {
            company: String::new(),
            date: Local::now().date_naive(),
            lines: Vec::new(),
        }
    }
}

impl IncomeStatementDraft {
    /// Empty form dated today.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_company(&mut self, company: &str) {
        self.company = company.trim().to_string();
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn set_date(&mut self, text: &str) -> Result<NaiveDate> {
        self.date = parse_statement_date(text)?;
        Ok(self.date)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn lines(&self) -> &[LedgerLine] {
        &self.lines
    }

    pub fn add_line(
        &mut self,
        category: LineCategory,
        name: &str,
        amount_text: &str,
    ) -> Result<&LedgerLine> {
        if category.statement() != StatementKind::IncomeStatement {
            return Err(ValidationError::WrongCategory(category).into());
        }
        let name = non_blank(name).ok_or(ValidationError::Required("Account name"))?;
        let amount = positive_amount(amount_text)?;

        tracing::debug!(name, %category, %amount, "income line added");
        self.lines.push(LedgerLine::named(name, category, amount));
        Ok(&self.lines[self.lines.len() - 1])
    }

    pub fn remove_line(&mut self, id: Uuid) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        self.lines.len() != before
    }

    pub fn totals(&self) -> IncomeStatementTotals {
        IncomeStatementTotals::from_lines(&self.lines)
    }

    /// Company name, once at least one line has been entered.
    pub fn ensure_ready(&self) -> Result<&str> {
        let company = non_blank(&self.company).ok_or(ValidationError::Required("Company"))?;
        if self.lines.is_empty() {
            return Err(ValidationError::NoLines.into());
        }
        Ok(company)
    }

    pub fn save(
        &self,
        storage: &dyn BookStorage,
    ) -> Result<(StatementRecord, IncomeStatementTotals)> {
        let company = self.ensure_ready().map_err(|err| {
            tracing::warn!(error = %err, "income statement rejected");
            err
        })?;
        let totals = self.totals();
        let record = StatementRecord::new(StatementKind::IncomeStatement, company, self.date);
        storage.save_statement(&record, &self.lines)?;
        tracing::info!(
            company,
            date = %self.date,
            lines = self.lines.len(),
            net_profit = %totals.net_profit,
            "income statement saved"
        );
        Ok((record, totals))
    }

    /// Clears the form and re-dates it today.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
