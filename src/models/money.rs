//! Money type for representing currency amounts
//!
//! Amounts are kept at full decimal precision and only rounded to two places
//! when formatted for display. Stored records write the amount as a decimal
//! string; reading accepts either a string or a JSON number.
//!
//! Arithmetic saturates at the bounds of [`Decimal`] instead of panicking, so
//! totals over stored records stay computable whatever those records hold.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Largest amount accepted for a transaction, budget ceiling or income
///
/// One trillion currency units. Totals of this many entries stay far inside
/// the range of [`Decimal`].
pub const MAX_AMOUNT: Money = Money(Decimal::from_parts(3_567_587_328, 232, 0, false, 0));

/// A currency amount backed by an exact decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create an amount from an integer mantissa and a decimal scale
    ///
    /// # Examples
    /// ```
    /// use xpens::models::Money;
    /// let amount = Money::new(1050, 2); // 10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    /// Create an amount from whole currency units
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The underlying decimal, unrounded
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Whether the amount is larger than [`MAX_AMOUNT`]
    pub fn exceeds_max(&self) -> bool {
        *self > MAX_AMOUNT
    }

    /// The amount rounded to two decimal places (half away from zero)
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Parse a money amount from user input
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", "1,250.00"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let rest = rest.strip_prefix('$').unwrap_or(rest).trim();
        if rest.is_empty() || rest.starts_with('-') || rest.starts_with('+') {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();
        let value = Decimal::from_str(&cleaned)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol, rounded to two decimals
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.rounded();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}{:.2}", symbol, rounded.abs())
        } else {
            format!("{}{:.2}", symbol, rounded.abs())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_keeps_precision() {
        let m = Money::new(12345, 3);
        assert_eq!(m.amount(), dec!(12.345));
        assert_eq!(m.rounded(), dec!(12.35));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(1050, 2).to_string(), "$10.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::new(-1050, 2).to_string(), "-$10.50");
        assert_eq!(Money::new(5, 2).to_string(), "$0.05");
        assert_eq!(Money::from_units(20).to_string(), "$20.00");
    }

    #[test]
    fn test_display_tiny_negative_rounds_to_zero() {
        assert_eq!(Money::new(-1, 3).to_string(), "$0.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::new(99999, 2).format_with_symbol("€"), "€999.99");
        assert_eq!(Money::new(-5000, 2).format_with_symbol("£"), "-£50.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(10);
        let b = Money::new(250, 2);

        assert_eq!((a + b).amount(), dec!(12.50));
        assert_eq!((a - b).amount(), dec!(7.50));
        assert_eq!((-a).amount(), dec!(-10));
    }

    #[test]
    fn test_decimal_sum_is_exact() {
        let total: Money = [Money::new(1, 1), Money::new(2, 1)].iter().sum();
        assert_eq!(total.amount(), dec!(0.3));
    }

    #[test]
    fn test_max_amount() {
        assert_eq!(MAX_AMOUNT.amount(), dec!(1_000_000_000_000));
        assert!(!MAX_AMOUNT.exceeds_max());
        assert!(Money::new(100_000_000_000_001, 2).exceeds_max());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from(Decimal::MAX);

        assert_eq!((huge + huge).amount(), Decimal::MAX);
        assert_eq!((-huge - huge).amount(), Decimal::MIN);

        let total: Money = [huge, huge, Money::from_units(1)].iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);

        let mut running = huge;
        running += huge;
        assert_eq!(running.amount(), Decimal::MAX);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().amount(), dec!(10.50));
        assert_eq!(Money::parse("$10.50").unwrap().amount(), dec!(10.50));
        assert_eq!(Money::parse("-10.50").unwrap().amount(), dec!(-10.50));
        assert_eq!(Money::parse(" 10 ").unwrap().amount(), dec!(10));
        assert_eq!(Money::parse("1,250.125").unwrap().amount(), dec!(1250.125));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("$").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_is_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_units(1).is_positive());
        assert!(Money::from_units(-1).is_negative());
    }

    #[test]
    fn test_serializes_as_string() {
        let m = Money::new(1050, 2);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"10.50\"");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn test_deserializes_json_numbers() {
        let from_float: Money = serde_json::from_str("20.5").unwrap();
        assert_eq!(from_float.amount(), dec!(20.5));

        let from_int: Money = serde_json::from_str("500").unwrap();
        assert_eq!(from_int.amount(), dec!(500));
    }
}
