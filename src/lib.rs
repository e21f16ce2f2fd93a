//! Xpens - personal income and expense tracker
//!
//! The core of the crate is the [`LedgerStore`](ledger::LedgerStore): it owns
//! the transaction list, the per-category budgets and the declared baseline
//! income, and derives totals, per-category spending and budget status from
//! them. State is restored from and written back to any
//! [`KeyValueStore`](storage::KeyValueStore).
//!
//! # Architecture
//!
//! - `config`: data directory resolution and user settings
//! - `error`: custom error types
//! - `logging`: tracing subscriber setup for the binary
//! - `models`: money, transactions, budgets
//! - `storage`: key-value backends (files, memory, background writer)
//! - `ledger`: the ledger store and derived figures
//! - `display`: terminal formatting
//! - `cli`: command handlers
//!
//! # Example
//!
//! ```rust
//! use xpens::ledger::LedgerStore;
//! use xpens::models::{Money, NewTransaction};
//! use xpens::storage::MemoryStore;
//!
//! let mut ledger = LedgerStore::load(MemoryStore::new());
//! ledger.update_income(Money::from_units(100)).unwrap();
//! ledger
//!     .add_transaction(NewTransaction::expense(Money::from_units(30), "Food"))
//!     .unwrap();
//!
//! assert_eq!(ledger.balance(), Money::from_units(70));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod storage;

pub use error::{XpensError, XpensResult};
