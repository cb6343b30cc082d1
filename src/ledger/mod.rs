//! Bookkeeping domain models and persistence-friendly types.

pub mod account;
pub mod amount;
pub mod category;
pub mod line;
pub mod statement;

pub use account::{seed_accounts, Account};
pub use amount::Amount;
pub use category::{BalanceSection, LineCategory};
pub use line::LedgerLine;
pub use statement::{StatementKind, StatementRecord};
