use std::collections::BTreeMap;

use thiserror::Error;

use crate::ledger::{Amount, BalanceSection, LedgerLine, LineCategory};

/// Acceptance rules applied before a balance sheet may be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionPolicy {
    /// Demand at least one asset, one liability and one equity line.
    pub require_all_sections: bool,
    /// Largest absolute difference still treated as balanced.
    pub tolerance: Amount,
}

impl Default for SectionPolicy {
    fn default() -> Self {
        Self {
            require_all_sections: true,
            tolerance: Amount::from_cents(1),
        }
    }
}

/// Derived totals for a set of balance-sheet lines. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatementTotals {
    pub by_category: BTreeMap<LineCategory, Amount>,
    pub lines_per_section: BTreeMap<BalanceSection, usize>,
    pub total_assets: Amount,
    pub total_liabilities: Amount,
    pub total_equity: Amount,
    /// Assets minus (liabilities + equity).
    pub difference: Amount,
    pub balanced: bool,
}

impl StatementTotals {
    pub fn liabilities_and_equity(&self) -> Amount {
        self.total_liabilities + self.total_equity
    }

    pub fn category(&self, category: LineCategory) -> Amount {
        self.by_category.get(&category).copied().unwrap_or_default()
    }

    pub fn has_section(&self, section: BalanceSection) -> bool {
        self.lines_per_section.get(&section).copied().unwrap_or(0) > 0
    }
}

/// Business-rule failures; the save is refused and the diagnostic shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceRejection {
    #[error("Include at least one {0} account")]
    MissingSection(BalanceSection),
    #[error(
        "The balance does not square: total assets {assets}, \
         total liabilities + equity {liabilities_and_equity}, difference {difference}"
    )]
    Unbalanced {
        assets: Amount,
        liabilities: Amount,
        equity: Amount,
        liabilities_and_equity: Amount,
        difference: Amount,
    },
}

/// Sums balance-sheet lines and checks Assets = Liabilities + Equity.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceSheetAccumulator {
    policy: SectionPolicy,
}

impl BalanceSheetAccumulator {
    pub fn new(policy: SectionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> SectionPolicy {
        self.policy
    }

    /// Computes totals; lines tagged with income-statement categories are ignored.
    pub fn totals<'a, I>(&self, lines: I) -> StatementTotals
    where
        I: IntoIterator<Item = &'a LedgerLine>,
    {
        let mut totals = StatementTotals::default();
        for line in lines {
            let Some(section) = line.category.balance_section() else {
                continue;
            };
            *totals.by_category.entry(line.category).or_default() += line.amount;
            *totals.lines_per_section.entry(section).or_default() += 1;
            match section {
                BalanceSection::Assets => totals.total_assets += line.amount,
                BalanceSection::Liabilities => totals.total_liabilities += line.amount,
                BalanceSection::Equity => totals.total_equity += line.amount,
            }
        }

        totals.difference = totals.total_assets - totals.liabilities_and_equity();
        totals.balanced = totals.difference.abs() <= self.policy.tolerance;
        totals
    }

    /// Totals the lines and applies the policy, returning the totals only when the
    /// sheet may be persisted.
    pub fn evaluate<'a, I>(&self, lines: I) -> Result<StatementTotals, BalanceRejection>
    where
        I: IntoIterator<Item = &'a LedgerLine>,
    {
        let totals = self.totals(lines);

        if self.policy.require_all_sections {
            for section in [
                BalanceSection::Assets,
                BalanceSection::Liabilities,
                BalanceSection::Equity,
            ] {
                if !totals.has_section(section) {
                    return Err(BalanceRejection::MissingSection(section));
                }
            }
        }

        if !totals.balanced {
            return Err(BalanceRejection::Unbalanced {
                assets: totals.total_assets,
                liabilities: totals.total_liabilities,
                equity: totals.total_equity,
                liabilities_and_equity: totals.liabilities_and_equity(),
                difference: totals.difference,
            });
        }

        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(category: LineCategory, cents: i64) -> LedgerLine {
        LedgerLine::named(category.label(), category, Amount::from_cents(cents))
    }

    #[test]
    fn balanced_sheet_reports_matching_totals() {
        let lines = vec![
            line(LineCategory::AssetCurrent, 10_000),
            line(LineCategory::LiabilityCurrent, 6_000),
            line(LineCategory::Equity, 4_000),
        ];
        let totals = BalanceSheetAccumulator::default().evaluate(&lines).unwrap();
        assert_eq!(totals.total_assets, Amount::from_cents(10_000));
        assert_eq!(totals.liabilities_and_equity(), Amount::from_cents(10_000));
        assert_eq!(totals.difference, Amount::ZERO);
        assert!(totals.balanced);
    }

    #[test]
    fn imbalance_reports_signed_difference() {
        let lines = vec![
            line(LineCategory::AssetCurrent, 10_000),
            line(LineCategory::LiabilityCurrent, 6_000),
            line(LineCategory::Equity, 3_000),
        ];
        let rejection = BalanceSheetAccumulator::default()
            .evaluate(&lines)
            .unwrap_err();
        assert_eq!(
            rejection,
            BalanceRejection::Unbalanced {
                assets: Amount::from_cents(10_000),
                liabilities: Amount::from_cents(6_000),
                equity: Amount::from_cents(3_000),
                liabilities_and_equity: Amount::from_cents(9_000),
                difference: Amount::from_cents(1_000),
            }
        );
        assert!(rejection.to_string().contains("difference $10.00"));
    }

    #[test]
    fn one_cent_is_within_tolerance() {
        let lines = vec![
            line(LineCategory::AssetNonCurrent, 10_001),
            line(LineCategory::LiabilityNonCurrent, 5_000),
            line(LineCategory::Equity, 5_000),
        ];
        let totals = BalanceSheetAccumulator::default().totals(&lines);
        assert_eq!(totals.difference, Amount::from_cents(1));
        assert!(totals.balanced);

        let strict = BalanceSheetAccumulator::new(SectionPolicy {
            tolerance: Amount::ZERO,
            ..SectionPolicy::default()
        });
        assert!(!strict.totals(&lines).balanced);
    }

    #[test]
    fn missing_section_is_rejected_when_required() {
        let lines = vec![
            line(LineCategory::AssetCurrent, 5_000),
            line(LineCategory::Equity, 5_000),
        ];
        assert_eq!(
            BalanceSheetAccumulator::default().evaluate(&lines),
            Err(BalanceRejection::MissingSection(BalanceSection::Liabilities))
        );

        let relaxed = BalanceSheetAccumulator::new(SectionPolicy {
            require_all_sections: false,
            ..SectionPolicy::default()
        });
        assert!(relaxed.evaluate(&lines).is_ok());
    }

    #[test]
    fn subtotals_split_current_and_non_current() {
        let lines = vec![
            line(LineCategory::AssetCurrent, 2_500),
            line(LineCategory::AssetCurrent, 2_500),
            line(LineCategory::AssetNonCurrent, 5_000),
            line(LineCategory::Revenue, 99_999),
        ];
        let totals = BalanceSheetAccumulator::default().totals(&lines);
        assert_eq!(totals.category(LineCategory::AssetCurrent), Amount::from_cents(5_000));
        assert_eq!(totals.category(LineCategory::AssetNonCurrent), Amount::from_cents(5_000));
        assert_eq!(totals.category(LineCategory::Revenue), Amount::ZERO);
        assert_eq!(totals.total_assets, Amount::from_cents(10_000));
        assert_eq!(totals.lines_per_section[&BalanceSection::Assets], 3);
    }

    #[test]
    fn empty_input_is_balanced_but_incomplete() {
        let lines: Vec<LedgerLine> = Vec::new();
        let totals = BalanceSheetAccumulator::default().totals(&lines);
        assert!(totals.balanced);
        assert!(!totals.has_section(BalanceSection::Assets));
    }
}
