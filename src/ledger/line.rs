use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Account, Amount, LineCategory};

/// One entered amount contributing to a statement.
///
/// Lines are never edited in place; forms remove and re-add them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerLine {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_code: Option<String>,
    pub name: String,
    pub category: LineCategory,
    pub amount: Amount,
}

impl LedgerLine {
    /// Line booked against a catalog account.
    pub fn for_account(account: &Account, category: LineCategory, amount: Amount) -> Self {
        Self {
            id: Uuid::new_v4(),
            statement_id: None,
            account_code: Some(account.code.clone()),
            name: account.name.clone(),
            category,
            amount,
        }
    }

    /// Free-text line with no catalog reference.
    pub fn named(name: impl Into<String>, category: LineCategory, amount: Amount) -> Self {
        Self {
            id: Uuid::new_v4(),
            statement_id: None,
            account_code: None,
            name: name.into(),
            category,
            amount,
        }
    }

    /// Stored copy of a draft line. Each save mints new ids, so saving the
    /// same draft twice never shares a line between statements.
    pub fn stored_under(&self, statement_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            statement_id: Some(statement_id),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_copies_get_their_own_ids() {
        let draft = LedgerLine::named("Sales", LineCategory::Revenue, Amount::from_cents(500));
        let first = Uuid::new_v4();
        let stored = draft.stored_under(first);
        assert_ne!(stored.id, draft.id);
        assert_eq!(stored.statement_id, Some(first));
        assert_eq!(stored.amount, draft.amount);
        assert_ne!(draft.stored_under(first).id, stored.id);
    }
}
