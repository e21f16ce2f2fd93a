//! Derived ledger figures: totals, per-category spending and budget status

use std::collections::BTreeMap;

use super::store::LedgerStore;
use crate::models::{BudgetMap, BudgetStatus, Money, Transaction};
use crate::storage::KeyValueStore;

/// Sum of all expense amounts
pub fn total_expenses(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum()
}

/// Sum of all income-transaction amounts, excluding baseline income
pub fn total_income_transactions(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum()
}

/// Expense totals keyed by category; categories without expenses are absent
pub fn expenses_by_category(transactions: &[Transaction]) -> BTreeMap<String, Money> {
    let mut totals = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(t.category.clone()).or_insert_with(Money::zero) += t.amount;
    }
    totals
}

/// Status of one category given precomputed spending and the budget map
pub fn budget_status(
    category: &str,
    spending: &BTreeMap<String, Money>,
    budgets: &BudgetMap,
) -> BudgetStatus {
    BudgetStatus::new(
        category,
        spending.get(category).copied().unwrap_or_default(),
        budgets.get(category).copied(),
    )
}

/// Headline figures for a dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerSummary {
    /// Income transactions plus baseline income
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
    pub transaction_count: usize,
}

impl<S: KeyValueStore> LedgerStore<S> {
    pub fn total_expenses(&self) -> Money {
        total_expenses(self.transactions())
    }

    /// Income transactions plus the baseline income
    pub fn total_income(&self) -> Money {
        total_income_transactions(self.transactions()) + self.income()
    }

    pub fn expenses_by_category(&self) -> BTreeMap<String, Money> {
        expenses_by_category(self.transactions())
    }

    /// `total_income() - total_expenses()`
    pub fn balance(&self) -> Money {
        self.total_income() - self.total_expenses()
    }

    pub fn budget_status(&self, category: &str) -> BudgetStatus {
        budget_status(category, &self.expenses_by_category(), self.budgets())
    }

    /// Statuses for `categories`, in the order given
    pub fn budget_overview<I, C>(&self, categories: I) -> Vec<BudgetStatus>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let spending = self.expenses_by_category();
        categories
            .into_iter()
            .map(|c| budget_status(c.as_ref(), &spending, self.budgets()))
            .collect()
    }

    pub fn summary(&self) -> LedgerSummary {
        let total_income = self.total_income();
        let total_expenses = self.total_expenses();
        LedgerSummary {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            transaction_count: self.len(),
        }
    }
}
