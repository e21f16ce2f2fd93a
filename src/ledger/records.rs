//! Encoding and decoding of the three persisted ledger records
//!
//! Decoding is lenient: a record that cannot be read yields the empty value
//! for that record and a warning, never an error.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{XpensError, XpensResult};
use crate::models::{BudgetMap, Money, Transaction};
use crate::storage::{keys, KeyValueStore};

pub fn encode_transactions(transactions: &[Transaction]) -> XpensResult<String> {
    Ok(serde_json::to_string(transactions)?)
}

pub fn encode_budgets(budgets: &BudgetMap) -> XpensResult<String> {
    Ok(serde_json::to_string(budgets)?)
}

pub fn encode_income(income: Money) -> String {
    income.amount().normalize().to_string()
}

pub fn decode_transactions(raw: &str) -> XpensResult<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_str(raw)?;

    let (valid, invalid): (Vec<_>, Vec<_>) = transactions
        .into_iter()
        .partition(|t| !t.amount.is_negative());
    for t in &invalid {
        warn!("dropping stored transaction {} with negative amount {}", t.id, t.amount);
    }

    Ok(valid)
}

pub fn decode_budgets(raw: &str) -> XpensResult<BudgetMap> {
    let budgets: BudgetMap = serde_json::from_str(raw)?;

    Ok(budgets
        .into_iter()
        .filter(|(category, ceiling)| {
            if ceiling.is_negative() {
                warn!("dropping stored budget for {} with negative ceiling {}", category, ceiling);
                false
            } else {
                true
            }
        })
        .collect())
}

pub fn decode_income(raw: &str) -> XpensResult<Money> {
    // Older writers may have stored the value as a JSON string
    let text = raw.trim().trim_matches('"').trim();
    let value = Decimal::from_str(text)
        .map_err(|e| XpensError::Json(format!("invalid income value {:?}: {}", raw, e)))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(XpensError::Validation(format!(
            "stored income is negative: {}",
            value
        )));
    }
    Ok(Money::from(value))
}

/// Read one record, falling back to `T::default()` when it is missing,
/// unreadable, or undecodable
pub fn load_record<S, T, F>(store: &S, key: &str, decode: F) -> T
where
    S: KeyValueStore + ?Sized,
    T: Default,
    F: FnOnce(&str) -> XpensResult<T>,
{
    match store.get(key) {
        Ok(Some(raw)) => match decode(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("stored record '{}' is corrupt, using default: {}", key, e);
                T::default()
            }
        },
        Ok(None) => {
            debug!("no stored record '{}', using default", key);
            T::default()
        }
        Err(e) => {
            warn!("failed to read record '{}', using default: {}", key, e);
            T::default()
        }
    }
}

/// The three records as read from a store
#[derive(Debug, Default)]
pub struct LoadedLedger {
    pub transactions: Vec<Transaction>,
    pub budgets: BudgetMap,
    pub income: Money,
}

/// Issue the three independent reads
pub fn load_all<S: KeyValueStore + ?Sized>(store: &S) -> LoadedLedger {
    LoadedLedger {
        transactions: load_record(store, keys::TRANSACTIONS, decode_transactions),
        budgets: load_record(store, keys::BUDGETS, decode_budgets),
        income: load_record(store, keys::INCOME, decode_income),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use crate::storage::MemoryStore;
    use rust_decimal_macros::dec;

    #[test]
    fn test_income_encoding() {
        assert_eq!(encode_income(Money::new(250050, 2)), "2500.5");
        assert_eq!(encode_income(Money::zero()), "0");
        assert_eq!(decode_income("2500.5").unwrap().amount(), dec!(2500.5));
        assert_eq!(decode_income("\"100\"").unwrap().amount(), dec!(100));
    }

    #[test]
    fn test_decode_income_rejects_bad_values() {
        assert!(decode_income("NaN").is_err());
        assert!(decode_income("").is_err());
        assert!(decode_income("-5").is_err());
    }

    #[test]
    fn test_decode_budgets_accepts_numbers_and_strings() {
        let budgets = decode_budgets(r#"{"Food": 100, "Bills": "75.25"}"#).unwrap();
        assert_eq!(budgets["Food"], Money::from_units(100));
        assert_eq!(budgets["Bills"], Money::new(7525, 2));
    }

    #[test]
    fn test_decode_budgets_drops_negative_ceilings() {
        let budgets = decode_budgets(r#"{"Food": -1, "Bills": 10}"#).unwrap();
        assert!(!budgets.contains_key("Food"));
        assert!(budgets.contains_key("Bills"));
    }

    #[test]
    fn test_decode_transactions_drops_negative_amounts() {
        let raw = r#"[
            {"id":"1","date":"2024-01-01T00:00:00Z","type":"expense","category":"Food","amount":-3,"description":"x"},
            {"id":"2","date":"2024-01-01T00:00:00Z","type":"expense","category":"Food","amount":3,"description":"y"}
        ]"#;
        let txns = decode_transactions(raw).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].id.as_str(), "2");
    }

    #[test]
    fn test_transactions_roundtrip_exactly() {
        let txns = vec![
            Transaction::from_input(NewTransaction::expense(Money::new(12345, 3), "Food")),
            Transaction::from_input(NewTransaction::income(Money::from_units(500))),
        ];

        let decoded = decode_transactions(&encode_transactions(&txns).unwrap()).unwrap();
        assert_eq!(decoded, txns);
    }

    #[test]
    fn test_load_all_defaults_on_missing_and_corrupt() {
        let store = MemoryStore::with_entries([
            (keys::TRANSACTIONS, "{{ not json"),
            (keys::INCOME, "42"),
        ]);

        let loaded = load_all(&store);

        assert!(loaded.transactions.is_empty());
        assert!(loaded.budgets.is_empty());
        assert_eq!(loaded.income, Money::from_units(42));
    }
}
