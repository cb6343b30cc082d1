use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, validation::has_at_most_two_decimals};

/// Money value with two decimal places.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Largest value a form accepts: 999,999,999,999,999.99.
    pub const MAX_INPUT: Amount =
        Amount(Decimal::from_parts(1_569_325_055, 23_283_064, 0, false, 2));

    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value.round_dp(2))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Parses user input that passes [`has_at_most_two_decimals`] and does not exceed
    /// [`Amount::MAX_INPUT`].
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        if !has_at_most_two_decimals(trimmed) {
            return Err(ValidationError::MalformedAmount(trimmed.to_string()));
        }
        let value = Decimal::from_str(trimmed)
            .map_err(|_| ValidationError::AmountOutOfRange(trimmed.to_string()))?;
        let amount = Self(value);
        if amount > Self::MAX_INPUT {
            return Err(ValidationError::AmountOutOfRange(trimmed.to_string()));
        }
        Ok(amount)
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Renders as `<symbol>1,234.50`, with a leading minus for negatives.
    pub fn format_with(self, symbol: &str) -> String {
        let sign = if self.0.is_sign_negative() && !self.0.is_zero() {
            "-"
        } else {
            ""
        };
        let plain = format!("{:.2}", self.0.abs().round_dp(2));
        let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (idx, ch) in whole.chars().enumerate() {
            if idx != 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{sign}{symbol}{grouped}.{fraction}")
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

// Totals saturate at the decimal range; form input is capped far below it.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_input() {
        assert_eq!(Amount::parse("12").unwrap(), Amount::from_cents(1200));
        assert_eq!(Amount::parse("12.5").unwrap(), Amount::from_cents(1250));
        assert_eq!(Amount::parse("12.05").unwrap(), Amount::from_cents(1205));
        assert_eq!(Amount::parse(" 0.99 ").unwrap(), Amount::from_cents(99));
    }

    #[test]
    fn rejects_what_the_field_validator_rejects() {
        for text in ["12.555", "12,50", "-1", "abc", ""] {
            assert!(
                matches!(Amount::parse(text), Err(ValidationError::MalformedAmount(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn input_ceiling_is_enforced() {
        assert_eq!(Amount::MAX_INPUT.to_string(), "$999,999,999,999,999.99");
        assert_eq!(Amount::parse("999999999999999.99").unwrap(), Amount::MAX_INPUT);
        for text in ["1000000000000000", "90000000000000000", "99999999999999999999999999999999"] {
            assert!(
                matches!(Amount::parse(text), Err(ValidationError::AmountOutOfRange(_))),
                "{text} should be out of range"
            );
        }
    }

    #[test]
    fn sums_near_the_limit_do_not_panic() {
        let huge = Amount::from_decimal(Decimal::MAX);
        assert_eq!(huge + huge, huge);
        assert!(huge.checked_add(huge).is_none());
        assert_eq!(
            Amount::MAX_INPUT.checked_add(Amount::MAX_INPUT).unwrap().to_string(),
            "$1,999,999,999,999,999.98"
        );
    }

    #[test]
    fn formats_with_grouping_and_sign() {
        assert_eq!(Amount::from_cents(123_456_789).to_string(), "$1,234,567.89");
        assert_eq!(Amount::from_cents(100_000).to_string(), "$1,000.00");
        assert_eq!(Amount::from_cents(5).to_string(), "$0.05");
        assert_eq!(Amount::from_cents(-1000).to_string(), "-$10.00");
        assert_eq!(Amount::parse("7.5").unwrap().to_string(), "$7.50");
        assert_eq!(Amount::from_cents(1000).format_with("€"), "€10.00");
    }

    #[test]
    fn arithmetic_is_exact() {
        let total: Amount = [Amount::from_cents(10), Amount::from_cents(20)].iter().sum();
        assert_eq!(total, Amount::from_cents(30));
        assert_eq!((total - Amount::from_cents(40)).abs(), Amount::from_cents(10));
        assert_eq!(-total, Amount::from_cents(-30));
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Amount::from_cents(1250)).unwrap();
        assert_eq!(json, "\"12.50\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Amount::from_cents(1250));
    }
}
