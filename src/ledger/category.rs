use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::statement::StatementKind;
use crate::errors::ValidationError;

/// Canonical classification for every entered line.
///
/// Stored under [`LineCategory::key`]; legacy labels are normalized on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LineCategory {
    AssetCurrent,
    AssetNonCurrent,
    LiabilityCurrent,
    LiabilityNonCurrent,
    Equity,
    Revenue,
    Cost,
    OperatingExpense,
}

/// The three sides of the accounting identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BalanceSection {
    Assets,
    Liabilities,
    Equity,
}

impl fmt::Display for BalanceSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BalanceSection::Assets => "asset",
            BalanceSection::Liabilities => "liability",
            BalanceSection::Equity => "equity",
        })
    }
}

impl LineCategory {
    pub const BALANCE_SHEET: [LineCategory; 5] = [
        LineCategory::AssetCurrent,
        LineCategory::AssetNonCurrent,
        LineCategory::LiabilityCurrent,
        LineCategory::LiabilityNonCurrent,
        LineCategory::Equity,
    ];

    pub const INCOME_STATEMENT: [LineCategory; 3] = [
        LineCategory::Revenue,
        LineCategory::Cost,
        LineCategory::OperatingExpense,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LineCategory::AssetCurrent => "asset-current",
            LineCategory::AssetNonCurrent => "asset-non-current",
            LineCategory::LiabilityCurrent => "liability-current",
            LineCategory::LiabilityNonCurrent => "liability-non-current",
            LineCategory::Equity => "equity",
            LineCategory::Revenue => "revenue",
            LineCategory::Cost => "cost",
            LineCategory::OperatingExpense => "operating-expense",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineCategory::AssetCurrent => "Current Assets",
            LineCategory::AssetNonCurrent => "Non-current Assets",
            LineCategory::LiabilityCurrent => "Current Liabilities",
            LineCategory::LiabilityNonCurrent => "Non-current Liabilities",
            LineCategory::Equity => "Equity",
            LineCategory::Revenue => "Revenue",
            LineCategory::Cost => "Cost",
            LineCategory::OperatingExpense => "Operating Expense",
        }
    }

    pub fn statement(self) -> StatementKind {
        match self {
            LineCategory::Revenue | LineCategory::Cost | LineCategory::OperatingExpense => {
                StatementKind::IncomeStatement
            }
            _ => StatementKind::BalanceSheet,
        }
    }

    pub fn balance_section(self) -> Option<BalanceSection> {
        match self {
            LineCategory::AssetCurrent | LineCategory::AssetNonCurrent => {
                Some(BalanceSection::Assets)
            }
            LineCategory::LiabilityCurrent | LineCategory::LiabilityNonCurrent => {
                Some(BalanceSection::Liabilities)
            }
            LineCategory::Equity => Some(BalanceSection::Equity),
            _ => None,
        }
    }

    /// Catalog prefix whose descendants may be booked under this category.
    pub fn code_prefix(self) -> Option<&'static str> {
        match self {
            LineCategory::AssetCurrent => Some("11"),
            LineCategory::AssetNonCurrent => Some("12"),
            LineCategory::LiabilityCurrent => Some("21"),
            LineCategory::LiabilityNonCurrent => Some("22"),
            LineCategory::Equity => Some("3"),
            _ => None,
        }
    }

    /// Maps canonical keys, English labels and the legacy Spanish labels found in
    /// older data onto one category.
    pub fn normalize(label: &str) -> Option<LineCategory> {
        let folded = fold_label(label);
        let category = match folded.as_str() {
            "assetcurrent" | "currentasset" | "currentassets" | "activocirculante"
            | "activoscirculantes" | "activocorriente" | "activoscorrientes" => {
                LineCategory::AssetCurrent
            }
            "assetnoncurrent" | "noncurrentasset" | "noncurrentassets" | "activonocirculante"
            | "activosnocirculantes" | "activonocorriente" | "activosnocorrientes" => {
                LineCategory::AssetNonCurrent
            }
            "liabilitycurrent" | "currentliability" | "currentliabilities"
            | "pasivocirculante" | "pasivoscirculantes" | "pasivocorriente"
            | "pasivoscorrientes" => LineCategory::LiabilityCurrent,
            "liabilitynoncurrent" | "noncurrentliability" | "noncurrentliabilities"
            | "pasivonocirculante" | "pasivosnocirculantes" | "pasivonocorriente"
            | "pasivosnocorrientes" => LineCategory::LiabilityNonCurrent,
            "equity" | "capital" | "patrimonio" => LineCategory::Equity,
            "revenue" | "revenues" | "income" | "ingreso" | "ingresos" => LineCategory::Revenue,
            "cost" | "costs" | "costo" | "costos" => LineCategory::Cost,
            "operatingexpense" | "operatingexpenses" | "opex" | "gastodeoperacion"
            | "gastosdeoperacion" => LineCategory::OperatingExpense,
            _ => return None,
        };
        Some(category)
    }
}

fn fold_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LineCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LineCategory::normalize(s).ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for LineCategory {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LineCategory> for String {
    fn from(category: LineCategory) -> Self {
        category.key().to_string()
    }
}
