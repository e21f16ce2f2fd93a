//! Ledger: the transaction list, budget map and baseline income, with the
//! figures derived from them.

pub mod records;
pub mod store;
pub mod summary;

pub use store::LedgerStore;
pub use summary::LedgerSummary;
