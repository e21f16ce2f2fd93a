//! Display formatting for terminal output

pub mod report;
pub mod transaction;

pub use report::{format_budget_table, format_spending_by_category, format_summary};
pub use transaction::{
    format_transaction_details, format_transaction_register, format_transaction_row,
};

/// Pad or cut a string to exactly `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        format!("{:width$}", s, width = max_len)
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Food", 6), "Food  ");
        assert_eq!(truncate("Entertainment", 8), "Enter...");
        assert_eq!(truncate("Café au lait", 7), "Café...");
        assert_eq!(truncate("abcdef", 2), "..");
    }
}
