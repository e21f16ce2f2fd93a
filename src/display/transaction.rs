//! Transaction display formatting
//!
//! Register-style listing of transactions for the terminal.

use crate::models::Transaction;

use super::truncate;

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, symbol: &str) -> String {
    let signed = txn.signed_amount();
    let amount = if signed.is_negative() {
        signed.format_with_symbol(symbol)
    } else {
        format!("+{}", signed.format_with_symbol(symbol))
    };

    format!(
        "{:8} {} {:24} {:14} {:>12}",
        txn.id.short(),
        txn.date.format("%Y-%m-%d"),
        truncate(&txn.description, 24),
        truncate(&txn.category, 14),
        amount
    )
}

/// Format a list of transactions as a register, newest first
pub fn format_transaction_register(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions yet. Add your first transaction to get started.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:8} {:10} {:24} {:14} {:>12}\n",
        "ID", "Date", "Description", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, symbol));
        output.push('\n');
    }

    output
}

/// Format transaction details, e.g. ahead of a delete confirmation
pub fn format_transaction_details(txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d %H:%M")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Description: {}\n", txn.description));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction};

    #[test]
    fn test_empty_register() {
        let output = format_transaction_register(&[], "$");
        assert!(output.starts_with("No transactions yet"));
    }

    #[test]
    fn test_row_signs() {
        let expense = Transaction::from_input(
            NewTransaction::expense(Money::new(1250, 2), "Food").with_description("Lunch"),
        );
        let income = Transaction::from_input(NewTransaction::income(Money::from_units(500)));

        let expense_row = format_transaction_row(&expense, "$");
        assert!(expense_row.contains("Lunch"));
        assert!(expense_row.contains("-$12.50"));

        assert!(format_transaction_row(&income, "€").contains("+€500.00"));
    }

    #[test]
    fn test_register_lists_every_row() {
        let txns = vec![
            Transaction::from_input(NewTransaction::expense(Money::from_units(1), "Food")),
            Transaction::from_input(NewTransaction::expense(Money::from_units(2), "Bills")),
        ];
        let output = format_transaction_register(&txns, "$");

        assert!(output.contains("Description"));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn test_details() {
        let txn = Transaction::from_input(NewTransaction::expense(Money::new(999, 2), "Shopping"));
        let details = format_transaction_details(&txn, "$");

        assert!(details.contains(txn.id.as_str()));
        assert!(details.contains("Expense"));
        assert!(details.contains("$9.99"));
    }
}
