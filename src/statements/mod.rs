//! Pure statement arithmetic: balance-sheet totals with the accounting identity
//! check, and the income-statement reduction.

pub mod balance;
pub mod income;

pub use balance::{BalanceRejection, BalanceSheetAccumulator, SectionPolicy, StatementTotals};
pub use income::IncomeStatementTotals;
