use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    IncomeStatement,
    BalanceSheet,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementKind::IncomeStatement => "Income statement",
            StatementKind::BalanceSheet => "Balance sheet",
        })
    }
}

/// Header row written when a statement is saved; its lines reference `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatementRecord {
    pub id: Uuid,
    pub kind: StatementKind,
    pub company: String,
    pub date: NaiveDate,
    pub recorded_at: DateTime<Utc>,
}

impl StatementRecord {
    pub fn new(kind: StatementKind, company: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            company: company.into(),
            date,
            recorded_at: Utc::now(),
        }
    }
}
