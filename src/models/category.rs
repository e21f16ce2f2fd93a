//! Category labels
//!
//! The store accepts any category string; these are the labels the default
//! interface offers, plus the fixed label every income transaction carries.

/// Category label assigned to every income transaction
pub const INCOME_CATEGORY: &str = "Income";

/// Fallback for an expense recorded without a category
pub const FALLBACK_CATEGORY: &str = "Other";

/// Expense categories offered by the default interface, in display order
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Entertainment",
    "Shopping",
    "Bills",
    "Other",
];
