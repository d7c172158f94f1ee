//! Amount type for monetary values.
//!
//! This module provides the `Amount` type which wraps `Decimal`. Parsing tolerates a leading
//! dollar sign and thousands separators, the way people tend to type money.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Represents a sum of money in the single, implicit currency of the expense file.
///
/// `Display` writes the plain decimal with its scale preserved, which is what goes into the CSV
/// file. Use [`Amount::dollars`] for the human-facing form.
///
/// # Examples
///
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("$1,250.50").unwrap();
/// assert_eq!(amount.to_string(), "1250.50");
/// assert_eq!(amount.dollars(), "$1,250.50");
/// ```
///
/// Equality is numeric:
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("30").unwrap();
/// let b = Amount::from_str("30.00").unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Adds two amounts, returning `None` if the result cannot be represented.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Formats the amount with a dollar sign, thousands separators and two decimal places, e.g.
    /// `$1,234.50` or `-$7.00`.
    pub fn dollars(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = self.0.abs().round_dp(2);
        format!(
            "{sign}${}",
            format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
        )
    }
}

/// An error that can occur when parsing a string into an `Amount`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AmountError {
    #[error("no value was given")]
    Empty,
    #[error("'{0}' has a misplaced thousands separator or an unsupported character")]
    Malformed(String),
    #[error("{0}")]
    Parse(#[from] rust_decimal::Error),
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        // Remove dollar sign if present: "$50.00", "-$50.00"
        let without_dollar = if let Some(after_minus) = trimmed.strip_prefix('-') {
            match after_minus.strip_prefix('$') {
                Some(after_dollar) => format!("-{after_dollar}"),
                None => trimmed.to_string(),
            }
        } else {
            trimmed.strip_prefix('$').unwrap_or(trimmed).to_string()
        };

        // Decimal::from_str would quietly drop these
        if without_dollar.contains('_') {
            return Err(AmountError::Malformed(trimmed.to_string()));
        }

        let without_commas = strip_thousands_separators(&without_dollar)
            .ok_or_else(|| AmountError::Malformed(trimmed.to_string()))?;

        let value = Decimal::from_str(&without_commas)?;
        Ok(Amount(value))
    }
}

/// Removes commas from the integer part of `s`, provided they sit between groups of three digits
/// (`1,234,567.89`). Returns `None` for commas anywhere else.
fn strip_thousands_separators(s: &str) -> Option<String> {
    if !s.contains(',') {
        return Some(s.to_string());
    }
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    if frac.is_some_and(|f| f.contains(',')) {
        return None;
    }

    let mut groups = int.split(',');
    let first = groups.next()?;
    let digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    if first.is_empty() || first.len() > 3 || !digits(first) {
        return None;
    }
    let mut out = format!("{sign}{first}");
    for group in groups {
        if group.len() != 3 || !digits(group) {
            return None;
        }
        out.push_str(group);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("12.50").unwrap();
        assert_eq!(amount.value(), dec("12.50"));
    }

    #[test]
    fn test_parse_with_dollar_sign_and_commas() {
        let amount = Amount::from_str("$1,234,567.89").unwrap();
        assert_eq!(amount.value(), dec("1234567.89"));
    }

    #[test]
    fn test_parse_negative_with_dollar_sign() {
        let amount = Amount::from_str("-$50.00").unwrap();
        assert_eq!(amount.value(), dec("-50.00"));
        assert!(amount.is_negative());
    }

    #[test]
    fn test_parse_whitespace() {
        let amount = Amount::from_str("  30  ").unwrap();
        assert_eq!(amount.value(), dec("30"));
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(matches!(Amount::from_str("   "), Err(AmountError::Empty)));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            Amount::from_str("abc"),
            Err(AmountError::Parse(_))
        ));
        assert!(Amount::from_str("12.5.0").is_err());
    }

    #[test]
    fn test_display_keeps_scale() {
        assert_eq!(Amount::from_str("12.50").unwrap().to_string(), "12.50");
        assert_eq!(Amount::from_str("30").unwrap().to_string(), "30");
    }

    #[test]
    fn test_dollars() {
        assert_eq!(Amount::from_str("42.5").unwrap().dollars(), "$42.50");
        assert_eq!(Amount::from_str("60000").unwrap().dollars(), "$60,000.00");
        assert_eq!(Amount::from_str("-7").unwrap().dollars(), "-$7.00");
        assert_eq!(Amount::ZERO.dollars(), "$0.00");
    }

    #[test]
    fn test_zero_is_not_negative() {
        let zero = Amount::from_str("-0.00").unwrap();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());
    }

    #[test]
    fn test_checked_add() {
        let total = ["12.50", "30.00", "0.25"]
            .iter()
            .map(|s| Amount::from_str(s).unwrap())
            .try_fold(Amount::ZERO, Amount::checked_add)
            .unwrap();
        assert_eq!(total.value(), dec("42.75"));
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Amount::new(Decimal::MAX);
        assert_eq!(max.checked_add(Amount::from_str("1").unwrap()), None);
    }

    #[test]
    fn test_parse_rejects_misplaced_commas() {
        for bad in ["1,2,3", ",100", "1,00", "1234,567", "1,000.0,0", "12,", "-,5"] {
            assert!(
                matches!(Amount::from_str(bad), Err(AmountError::Malformed(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_underscores() {
        assert!(matches!(
            Amount::from_str("1_000"),
            Err(AmountError::Malformed(_))
        ));
        assert!(Amount::from_str("$1_000.00").is_err());
    }

    #[test]
    fn test_parse_valid_commas() {
        assert_eq!(Amount::from_str("999").unwrap().value(), dec("999"));
        assert_eq!(Amount::from_str("1,000").unwrap().value(), dec("1000"));
        assert_eq!(Amount::from_str("-$12,345.6").unwrap().value(), dec("-12345.6"));
    }

    #[test]
    fn test_serde_json() {
        let amount = Amount::from_str("12.50").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"12.50\"");
        let back: Amount = serde_json::from_str("\"$12.50\"").unwrap();
        assert_eq!(back, amount);
    }
}
