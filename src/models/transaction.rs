//! Transaction model
//!
//! A transaction is a single income or expense event. Amounts are always
//! non-negative; whether a transaction adds or subtracts is decided by its
//! type alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{FALLBACK_CATEGORY, INCOME_CATEGORY};
use super::ids::TransactionId;
use super::money::{Money, MAX_AMOUNT};

/// Whether a transaction brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// When the transaction was recorded
    pub date: DateTime<Utc>,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Category label (`Income` for every income transaction)
    pub category: String,

    /// Non-negative amount
    pub amount: Money,

    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Build a transaction from caller input, assigning a fresh id and the
    /// current time. The input is expected to have been validated.
    pub fn from_input(input: NewTransaction) -> Self {
        let category = input.resolved_category();
        let description = match input.description {
            Some(d) if !d.trim().is_empty() => d.trim().to_string(),
            _ => category.clone(),
        };

        Self {
            id: TransactionId::new(),
            date: Utc::now(),
            kind: input.kind,
            category,
            amount: input.amount,
            description,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    /// The amount with the sign implied by the type (negative for expenses)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_income() { "+" } else { "-" };
        write!(
            f,
            "{} {} {}{}",
            self.date.format("%Y-%m-%d"),
            self.description,
            sign,
            self.amount
        )
    }
}

/// Caller input for recording a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub amount: Money,
    /// Ignored for income; blank or missing falls back to `Other` for expenses
    pub category: Option<String>,
    /// Blank or missing falls back to the category name
    pub description: Option<String>,
}

impl NewTransaction {
    /// An expense in the given category
    pub fn expense(amount: Money, category: impl Into<String>) -> Self {
        Self {
            kind: TransactionType::Expense,
            amount,
            category: Some(category.into()),
            description: None,
        }
    }

    /// An income entry (always categorized as `Income`)
    pub fn income(amount: Money) -> Self {
        Self {
            kind: TransactionType::Income,
            amount,
            category: None,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The category the stored transaction will carry
    pub fn resolved_category(&self) -> String {
        match self.kind {
            TransactionType::Income => INCOME_CATEGORY.to_string(),
            TransactionType::Expense => match &self.category {
                Some(c) if !c.trim().is_empty() => c.trim().to_string(),
                _ => FALLBACK_CATEGORY.to_string(),
            },
        }
    }

    /// Check the input before it reaches the ledger
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount.exceeds_max() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        Ok(())
    }
}

/// Validation errors for transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Transaction amount {} exceeds the maximum of {}", amount, MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
