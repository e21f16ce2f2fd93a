//! Storage layer for Xpens
//!
//! The ledger persists three independent records through a string key-value
//! interface. Any backend implementing [`KeyValueStore`] can hold them:
//! JSON files on disk, an in-process map, or either of those behind a
//! background writer.

pub mod file_io;
pub mod file_store;
pub mod memory;
pub mod write_behind;

use std::sync::Arc;

pub use file_io::{read_text, write_text_atomic};
pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use write_behind::WriteBehindStore;

use crate::error::XpensError;

/// Stable keys of the persisted ledger records
pub mod keys {
    /// Ordered array of transactions, newest first
    pub const TRANSACTIONS: &str = "transactions";
    /// Flat object mapping category to ceiling
    pub const BUDGETS: &str = "budgets";
    /// Baseline income as decimal text
    pub const INCOME: &str = "income";
}

/// Abstraction over string key-value backends
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`; `None` if it was never written
    fn get(&self, key: &str) -> Result<Option<String>, XpensError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), XpensError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, XpensError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), XpensError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, XpensError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), XpensError> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_store_through_arc() {
        let store = Arc::new(MemoryStore::new());
        let handle: Arc<MemoryStore> = Arc::clone(&store);

        handle.set(keys::INCOME, "100").unwrap();
        assert_eq!(store.get(keys::INCOME).unwrap().as_deref(), Some("100"));
    }

    #[test]
    fn test_boxed_trait_object() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set(keys::BUDGETS, "{}").unwrap();
        assert_eq!(store.get(keys::BUDGETS).unwrap().as_deref(), Some("{}"));
        assert_eq!(store.get(keys::TRANSACTIONS).unwrap(), None);
    }
}
