//! Budget model
//!
//! A budget is a spending ceiling per category. A category without an entry
//! in the [`BudgetMap`] has no budget; that is different from an entry whose
//! ceiling happens to be zero.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

use super::money::{Money, MAX_AMOUNT};

/// Per-category spending ceilings
pub type BudgetMap = BTreeMap<String, Money>;

/// Spending of one category measured against its ceiling
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub category: String,

    /// Sum of expenses recorded in this category
    pub spent: Money,

    /// The ceiling, if a budget has been set for this category
    pub ceiling: Option<Money>,
}

impl BudgetStatus {
    pub fn new(category: impl Into<String>, spent: Money, ceiling: Option<Money>) -> Self {
        Self {
            category: category.into(),
            spent,
            ceiling,
        }
    }

    /// Whether the category has an entry in the budget map
    pub fn has_budget(&self) -> bool {
        self.ceiling.is_some()
    }

    /// The ceiling, with "no budget" counted as zero
    pub fn ceiling_or_zero(&self) -> Money {
        self.ceiling.unwrap_or_default()
    }

    /// `ceiling - spent`; negative once spending passes the ceiling
    pub fn remaining(&self) -> Money {
        self.ceiling_or_zero() - self.spent
    }

    /// Only a positive ceiling can be exceeded
    pub fn is_over_budget(&self) -> bool {
        let ceiling = self.ceiling_or_zero();
        ceiling.is_positive() && self.spent > ceiling
    }

    /// Spent as a percentage of the ceiling, unclamped; 0 without a positive ceiling
    ///
    /// Saturates at `Decimal::MAX` when the ratio is too large to represent.
    pub fn percentage(&self) -> Decimal {
        let ceiling = self.ceiling_or_zero();
        if !ceiling.is_positive() {
            return Decimal::ZERO;
        }
        self.spent
            .amount()
            .checked_div(ceiling.amount())
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX)
    }

    /// [`percentage`](Self::percentage) clamped to `0..=100` for progress bars
    pub fn display_percentage(&self) -> Decimal {
        self.percentage().clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ceiling {
            Some(ceiling) => write!(f, "{}: {} / {}", self.category, self.spent, ceiling),
            None => write!(f, "{}: {}", self.category, self.spent),
        }
    }
}

/// Validation errors for budget input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeCeiling(Money),
    CeilingTooLarge(Money),
    NegativeIncome(Money),
    IncomeTooLarge(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeCeiling(amount) => {
                write!(f, "Budget ceiling cannot be negative, got {}", amount)
            }
            Self::CeilingTooLarge(amount) => {
                write!(f, "Budget ceiling {} exceeds the maximum of {}", amount, MAX_AMOUNT)
            }
            Self::IncomeTooLarge(amount) => {
                write!(f, "Baseline income {} exceeds the maximum of {}", amount, MAX_AMOUNT)
            }
            Self::NegativeIncome(amount) => {
                write!(f, "Baseline income cannot be negative, got {}", amount)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

/// Check a ceiling before it is stored
pub fn validate_ceiling(amount: Money) -> Result<(), BudgetValidationError> {
    if amount.is_negative() {
        return Err(BudgetValidationError::NegativeCeiling(amount));
    }
    if amount.exceeds_max() {
        return Err(BudgetValidationError::CeilingTooLarge(amount));
    }
    Ok(())
}

/// Check a baseline income value before it is stored
pub fn validate_income(amount: Money) -> Result<(), BudgetValidationError> {
    if amount.is_negative() {
        return Err(BudgetValidationError::NegativeIncome(amount));
    }
    if amount.exceeds_max() {
        return Err(BudgetValidationError::IncomeTooLarge(amount));
    }
    Ok(())
}
