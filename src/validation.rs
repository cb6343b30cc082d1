//! Pure field and account-code predicates shared by every form.
//!
//! Nothing here touches storage: uniqueness of codes and existence of parents
//! are checked by [`crate::services::AccountCatalog`].

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::errors::ValidationError;

/// Code lengths of the chart levels: class, group, subgroup, account, sub-account.
pub const ACCOUNT_CODE_LENGTHS: [usize; 5] = [1, 2, 4, 6, 8];

/// Why an account code failed [`check_account_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRejection {
    NotDigits,
    OutsideParent,
    NotLongerThanParent,
    UnsupportedLength(usize),
}

impl fmt::Display for CodeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeRejection::NotDigits => f.write_str("codes contain digits only"),
            CodeRejection::OutsideParent => f.write_str("code must start with its parent code"),
            CodeRejection::NotLongerThanParent => {
                f.write_str("code must be longer than its parent code")
            }
            CodeRejection::UnsupportedLength(len) => {
                write!(f, "length {len} is not one of 1, 2, 4, 6 or 8")
            }
        }
    }
}

/// Checks `code` against the chart hierarchy rules and reports the first failure.
///
/// An empty or missing `parent_code` means a top-level account.
pub fn check_account_code(code: &str, parent_code: Option<&str>) -> Result<(), CodeRejection> {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(CodeRejection::NotDigits);
    }

    if let Some(parent) = parent_code.filter(|p| !p.is_empty()) {
        if !code.starts_with(parent) {
            return Err(CodeRejection::OutsideParent);
        }
        if code.len() <= parent.len() {
            return Err(CodeRejection::NotLongerThanParent);
        }
    }

    if !ACCOUNT_CODE_LENGTHS.contains(&code.len()) {
        return Err(CodeRejection::UnsupportedLength(code.len()));
    }

    Ok(())
}

/// Boolean form of [`check_account_code`].
pub fn validate_account_code(code: &str, parent_code: Option<&str>) -> bool {
    check_account_code(code, parent_code).is_ok()
}

/// True when every character is a letter or whitespace. Empty text passes.
pub fn is_alphabetic_name(text: &str) -> bool {
    text.chars().all(|c| c.is_alphabetic() || c.is_whitespace())
}

/// True for plain decimal amounts: digits, optionally a point and one or two digits.
pub fn has_at_most_two_decimals(text: &str) -> bool {
    static AMOUNT_PATTERN: OnceCell<Regex> = OnceCell::new();
    let pattern =
        AMOUNT_PATTERN.get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").unwrap());
    pattern.is_match(text)
}

/// Parses a statement date written as `dd/mm/yyyy` or `yyyy-mm-dd`.
pub fn parse_statement_date(text: &str) -> Result<NaiveDate, ValidationError> {
    static DAY_FIRST: OnceCell<Regex> = OnceCell::new();
    static ISO: OnceCell<Regex> = OnceCell::new();

    let trimmed = text.trim();
    let day_first = DAY_FIRST.get_or_init(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").unwrap());
    let iso = ISO.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

    let parsed = if day_first.is_match(trimmed) {
        NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok()
    } else if iso.is_match(trimmed) {
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
    } else {
        None
    };

    parsed.ok_or_else(|| ValidationError::InvalidDate(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_codes_follow_length_table() {
        for code in ["1", "12", "1234", "123456", "12345678"] {
            assert!(validate_account_code(code, None), "{code} should be valid");
            assert!(validate_account_code(code, Some("")), "{code} with empty parent");
        }
        for code in ["123", "12345", "1234567", "123456789"] {
            assert!(!validate_account_code(code, None), "{code} should be rejected");
        }
    }

    #[test]
    fn parent_relationship_is_enforced() {
        assert!(validate_account_code("11", Some("1")));
        assert_eq!(
            check_account_code("21", Some("1")),
            Err(CodeRejection::OutsideParent)
        );
        assert_eq!(
            check_account_code("1", Some("1")),
            Err(CodeRejection::NotLongerThanParent)
        );
        assert!(validate_account_code("110101", Some("1101")));
    }

    #[test]
    fn prefix_is_checked_before_length() {
        assert_eq!(
            check_account_code("221", Some("1")),
            Err(CodeRejection::OutsideParent)
        );
        assert_eq!(
            check_account_code("111", Some("1")),
            Err(CodeRejection::UnsupportedLength(3))
        );
    }

    #[test]
    fn non_digit_codes_are_rejected() {
        assert_eq!(check_account_code("", None), Err(CodeRejection::NotDigits));
        assert_eq!(check_account_code("1a", None), Err(CodeRejection::NotDigits));
        assert_eq!(check_account_code(" 1", None), Err(CodeRejection::NotDigits));
        assert_eq!(check_account_code("-1", None), Err(CodeRejection::NotDigits));
    }

    #[test]
    fn names_accept_letters_and_spaces() {
        assert!(is_alphabetic_name("Cuentas por Pagar"));
        assert!(is_alphabetic_name("Depreciación Acumulada"));
        assert!(is_alphabetic_name(""));
        assert!(!is_alphabetic_name("Cuentas123"));
        assert!(!is_alphabetic_name("Cash-on-hand"));
    }

    #[test]
    fn amounts_allow_two_decimals() {
        assert!(has_at_most_two_decimals("12"));
        assert!(has_at_most_two_decimals("12.5"));
        assert!(has_at_most_two_decimals("12.50"));
        assert!(!has_at_most_two_decimals("12.555"));
        assert!(!has_at_most_two_decimals("12,50"));
        assert!(!has_at_most_two_decimals("1,200.00"));
        assert!(!has_at_most_two_decimals("-3"));
        assert!(!has_at_most_two_decimals("1e3"));
        assert!(!has_at_most_two_decimals("12."));
        assert!(!has_at_most_two_decimals(".5"));
        assert!(!has_at_most_two_decimals(""));
    }

    #[test]
    fn statement_dates_accept_both_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(parse_statement_date("31/12/2024").unwrap(), expected);
        assert_eq!(parse_statement_date("2024-12-31").unwrap(), expected);
        assert!(parse_statement_date("31/02/2024").is_err());
        assert!(parse_statement_date("1/1/2024").is_err());
        assert!(parse_statement_date("").is_err());
    }
}
