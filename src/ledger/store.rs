//! The ledger store
//!
//! Owns the transaction list, the budget map and the baseline income. Every
//! mutation is applied in memory first and then written to the backing
//! [`KeyValueStore`]. A failed write is logged and remembered but never
//! undoes the in-memory change.

use tracing::{debug, error};

use super::records::{self, LoadedLedger};
use crate::error::{XpensError, XpensResult};
use crate::models::budget::{validate_ceiling, validate_income};
use crate::models::{BudgetMap, Money, NewTransaction, Transaction};
use crate::storage::{keys, KeyValueStore};

/// In-memory ledger backed by a key-value store
pub struct LedgerStore<S: KeyValueStore> {
    store: S,
    transactions: Vec<Transaction>,
    budgets: BudgetMap,
    income: Money,
    last_persist_error: Option<String>,
}

impl<S: KeyValueStore> LedgerStore<S> {
    /// An empty ledger that writes to `store` without reading from it
    pub fn new(store: S) -> Self {
        Self {
            store,
            transactions: Vec::new(),
            budgets: BudgetMap::new(),
            income: Money::zero(),
            last_persist_error: None,
        }
    }

    /// Restore a ledger from `store`
    ///
    /// Each record is read independently; a missing or corrupt record is
    /// replaced by its empty value, so loading never fails.
    pub fn load(store: S) -> Self {
        let mut ledger = Self::new(store);
        ledger.reload();
        ledger
    }

    /// Replace the in-memory state with what the store currently holds
    pub fn reload(&mut self) {
        let LoadedLedger {
            transactions,
            budgets,
            income,
        } = records::load_all(&self.store);

        debug!(
            "loaded ledger: {} transactions, {} budgets, income {}",
            transactions.len(),
            budgets.len(),
            income
        );

        self.transactions = transactions;
        self.budgets = budgets;
        self.income = income;
    }

    pub fn backing_store(&self) -> &S {
        &self.store
    }

    /// All transactions, newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &BudgetMap {
        &self.budgets
    }

    /// The declared baseline income
    pub fn income(&self) -> Money {
        self.income
    }

    pub fn get_transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Message of the most recent failed write, if any
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    /// Take and clear the most recent failed-write message
    pub fn take_persist_error(&mut self) -> Option<String> {
        self.last_persist_error.take()
    }

    /// Record a new transaction at the front of the list
    ///
    /// # Errors
    ///
    /// Returns a validation error if the amount is not positive. Nothing is
    /// changed or written in that case.
    pub fn add_transaction(&mut self, input: NewTransaction) -> XpensResult<&Transaction> {
        input
            .validate()
            .map_err(|e| XpensError::Validation(e.to_string()))?;

        let txn = Transaction::from_input(input);
        debug!("adding {} transaction {} ({})", txn.kind, txn.id, txn.amount);

        self.transactions.insert(0, txn);
        self.persist_transactions();

        Ok(&self.transactions[0])
    }

    /// Remove every transaction with the given id
    ///
    /// Deleting an unknown id changes nothing but still rewrites the record.
    pub fn delete_transaction(&mut self, id: &str) -> Option<Transaction> {
        let mut removed = None;
        self.transactions.retain(|t| {
            if t.id.as_str() == id {
                if removed.is_none() {
                    removed = Some(t.clone());
                }
                false
            } else {
                true
            }
        });

        match &removed {
            Some(t) => debug!("deleted transaction {}", t.id),
            None => debug!("delete of unknown transaction {} ignored", id),
        }

        self.persist_transactions();
        removed
    }

    /// Set or replace the ceiling for a category
    ///
    /// Any category name is accepted.
    pub fn set_budget(&mut self, category: impl Into<String>, amount: Money) -> XpensResult<()> {
        validate_ceiling(amount).map_err(|e| XpensError::Validation(e.to_string()))?;

        let category = category.into();
        debug!("budget for {} set to {}", category, amount);

        self.budgets.insert(category, amount);
        self.persist_budgets();
        Ok(())
    }

    /// Remove a category's budget, returning its previous ceiling
    pub fn clear_budget(&mut self, category: &str) -> Option<Money> {
        let previous = self.budgets.remove(category);
        if previous.is_some() {
            debug!("budget for {} cleared", category);
            self.persist_budgets();
        }
        previous
    }

    /// Replace the baseline income
    pub fn update_income(&mut self, amount: Money) -> XpensResult<()> {
        validate_income(amount).map_err(|e| XpensError::Validation(e.to_string()))?;

        debug!("baseline income set to {}", amount);
        self.income = amount;
        self.persist_income();
        Ok(())
    }

    fn persist_transactions(&mut self) {
        let encoded = records::encode_transactions(&self.transactions);
        self.write(keys::TRANSACTIONS, encoded);
    }

    fn persist_budgets(&mut self) {
        let encoded = records::encode_budgets(&self.budgets);
        self.write(keys::BUDGETS, encoded);
    }

    fn persist_income(&mut self) {
        let encoded = records::encode_income(self.income);
        self.write(keys::INCOME, Ok(encoded));
    }

    fn write(&mut self, key: &str, encoded: XpensResult<String>) {
        let result = encoded.and_then(|value| self.store.set(key, &value));
        if let Err(e) = result {
            error!("failed to persist '{}', change kept in memory only: {}", key, e);
            self.last_persist_error = Some(format!("{}: {}", key, e));
        }
    }
}

impl<S: KeyValueStore + std::fmt::Debug> std::fmt::Debug for LedgerStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore")
            .field("store", &self.store)
            .field("transactions", &self.transactions.len())
            .field("budgets", &self.budgets)
            .field("income", &self.income)
            .finish()
    }
}
