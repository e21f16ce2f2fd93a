//! Core data models for Xpens
//!
//! Transactions, budgets and the money type they are measured in.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use budget::{BudgetMap, BudgetStatus, BudgetValidationError};
pub use category::{DEFAULT_CATEGORIES, FALLBACK_CATEGORY, INCOME_CATEGORY};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError, MAX_AMOUNT};
pub use transaction::{NewTransaction, Transaction, TransactionType, TransactionValidationError};
