use std::fmt;

use serde::{Deserialize, Serialize};

/// Entry in the chart of accounts, keyed by its hierarchical digit code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_code: Option<String>,
}

impl Account {
    /// Creates an account; an empty parent is stored as a top-level account.
    pub fn new(code: impl Into<String>, name: impl Into<String>, parent_code: Option<&str>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            parent_code: parent_code
                .filter(|parent| !parent.is_empty())
                .map(str::to_string),
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_code.is_none()
    }

    /// True when the account sits strictly below `prefix` in the hierarchy.
    pub fn is_under(&self, prefix: &str) -> bool {
        self.code.starts_with(prefix) && self.code.len() > prefix.len()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

const SEED: [(&str, &str); 6] = [
    ("1", "ASSETS"),
    ("2", "LIABILITIES"),
    ("3", "EQUITY"),
    ("4", "DEBIT RESULT ACCOUNTS"),
    ("5", "CREDIT RESULT ACCOUNTS"),
    ("6", "CLOSING BRIDGE ACCOUNT"),
];

/// Class-level accounts every new catalog starts with.
pub fn seed_accounts() -> Vec<Account> {
    SEED.iter()
        .map(|(code, name)| Account::new(*code, *name, None))
        .collect()
}
