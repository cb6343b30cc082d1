use crate::ledger::{Amount, LedgerLine, LineCategory};

/// Straight-line income statement reduction. No tax is modeled, so profit before
/// taxes and net profit equal operating profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IncomeStatementTotals {
    pub revenue: Amount,
    pub cost: Amount,
    pub operating_expense: Amount,
    pub gross_profit: Amount,
    pub operating_profit: Amount,
    pub profit_before_tax: Amount,
    pub net_profit: Amount,
}

impl IncomeStatementTotals {
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a LedgerLine>,
    {
        let mut totals = Self::default();
        for line in lines {
            match line.category {
                LineCategory::Revenue => totals.revenue += line.amount,
                LineCategory::Cost => totals.cost += line.amount,
                LineCategory::OperatingExpense => totals.operating_expense += line.amount,
                _ => {}
            }
        }

        totals.gross_profit = totals.revenue - totals.cost;
        totals.operating_profit = totals.gross_profit - totals.operating_expense;
        totals.profit_before_tax = totals.operating_profit;
        totals.net_profit = totals.profit_before_tax;
        totals
    }
}
