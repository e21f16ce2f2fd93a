//! Summary and budget formatting
//!
//! Renders the dashboard (balance, income, expenses, spending per category)
//! and the budget table.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::ledger::LedgerSummary;
use crate::models::{BudgetStatus, Money};

const BAR_WIDTH: usize = 20;

/// Progress bar for a percentage already clamped to `0..=100`
pub fn format_bar(percentage: Decimal, width: usize) -> String {
    let fraction = (percentage / Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0);
    let filled = ((fraction * width as f64).round() as usize).min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: Decimal) -> String {
    let strategy = RoundingStrategy::MidpointAwayFromZero;
    if pct < Decimal::TEN {
        format!("{:.1}%", pct.round_dp_with_strategy(1, strategy))
    } else {
        format!("{:.0}%", pct.round_dp_with_strategy(0, strategy))
    }
}

/// Balance, total income and total expenses
pub fn format_summary(summary: &LedgerSummary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Financial Summary\n");
    output.push_str(&"=".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "{:20} {:>19}{}\n",
        "Current Balance",
        summary.balance.format_with_symbol(symbol),
        if summary.balance.is_negative() { " !" } else { "" }
    ));
    output.push_str(&format!(
        "{:20} {:>19}\n",
        "Income",
        summary.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:20} {:>19}\n",
        "Expenses",
        summary.total_expenses.format_with_symbol(symbol)
    ));

    output
}

/// One line per category: spent, ceiling (if any) and a progress bar
pub fn format_spending_by_category(statuses: &[BudgetStatus], symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Spending by Category\n");
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for status in statuses {
        let amounts = match status.ceiling {
            Some(ceiling) if ceiling.is_positive() => format!(
                "{} / {}",
                status.spent.format_with_symbol(symbol),
                ceiling.format_with_symbol(symbol)
            ),
            _ => status.spent.format_with_symbol(symbol),
        };

        let bar = if status.ceiling_or_zero().is_positive() {
            format_bar(status.display_percentage(), BAR_WIDTH)
        } else {
            String::new()
        };

        output.push_str(&format!(
            "{:16} {:>24} {}{}\n",
            status.category,
            amounts,
            bar,
            over_budget_marker(status)
        ));
    }

    output
}

/// Budget table: ceiling, spent, remaining and percentage used
pub fn format_budget_table(statuses: &[BudgetStatus], income: Money, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Monthly income: {}\n\n",
        income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:16} {:>12} {:>12} {:>12} {:>7}\n",
        "Category", "Budget", "Spent", "Remaining", "Used"
    ));
    output.push_str(&"-".repeat(64));
    output.push('\n');

    for status in statuses {
        let (budget, remaining, used) = match status.ceiling {
            Some(ceiling) => (
                ceiling.format_with_symbol(symbol),
                status.remaining().format_with_symbol(symbol),
                format_percentage(status.display_percentage()),
            ),
            None => ("not set".to_string(), "-".to_string(), "-".to_string()),
        };

        output.push_str(&format!(
            "{:16} {:>12} {:>12} {:>12} {:>7}{}\n",
            status.category,
            budget,
            status.spent.format_with_symbol(symbol),
            remaining,
            used,
            over_budget_marker(status)
        ));
    }

    output
}

fn over_budget_marker(status: &BudgetStatus) -> &'static str {
    if status.is_over_budget() {
        " ⚠ over budget"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(dec!(0), 10), "░".repeat(10));
        assert_eq!(format_bar(dec!(100), 10), "█".repeat(10));
        assert_eq!(format_bar(dec!(50), 10), format!("{}{}", "█".repeat(5), "░".repeat(5)));
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec!(12.5)), "13%");
        assert_eq!(format_percentage(dec!(2.25)), "2.3%");
        assert_eq!(format_percentage(dec!(100)), "100%");
    }

    #[test]
    fn test_summary_shows_balance() {
        let summary = LedgerSummary {
            total_income: Money::from_units(150),
            total_expenses: Money::from_units(200),
            balance: Money::from_units(-50),
            transaction_count: 2,
        };
        let output = format_summary(&summary, "$");

        assert!(output.contains("-$50.00 !"));
        assert!(output.contains("$150.00"));
        assert!(output.contains("$200.00"));
    }

    #[test]
    fn test_spending_marks_over_budget() {
        let statuses = vec![
            BudgetStatus::new("Food", Money::from_units(150), Some(Money::from_units(100))),
            BudgetStatus::new("Transport", Money::from_units(40), None),
        ];
        let output = format_spending_by_category(&statuses, "$");
        let lines: Vec<_> = output.lines().collect();

        assert!(lines[2].contains("$150.00 / $100.00"));
        assert!(lines[2].contains("over budget"));
        assert!(lines[3].contains("$40.00"));
        assert!(!lines[3].contains("over budget"));
    }

    #[test]
    fn test_budget_table() {
        let statuses = vec![
            BudgetStatus::new("Food", Money::from_units(150), Some(Money::from_units(100))),
            BudgetStatus::new("Bills", Money::zero(), None),
        ];
        let output = format_budget_table(&statuses, Money::from_units(2500), "$");

        assert!(output.contains("Monthly income: $2500.00"));
        assert!(output.contains("-$50.00"));
        assert!(output.contains("100%"));
        assert!(output.contains("not set"));
    }
}
