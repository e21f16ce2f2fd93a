//! Budget and income CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_budget_table;
use crate::error::{XpensError, XpensResult};
use crate::ledger::LedgerStore;
use crate::storage::KeyValueStore;

use super::{budget_categories, parse_amount, report_persist_error};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the spending ceiling for a category
    Set {
        /// Category name
        category: String,
        /// Ceiling (e.g. "100" or "100.00")
        amount: String,
    },
    /// Remove a category's budget
    Clear {
        /// Category name
        category: String,
    },
    /// Show budgets, spending and remaining amounts
    Show,
}

/// Baseline income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Declare the recurring monthly income
    Set {
        /// Amount (e.g. "2500")
        amount: String,
    },
    /// Show the declared income
    Show,
}

/// Handle a budget command
pub fn handle_budget_command<S: KeyValueStore>(
    ledger: &mut LedgerStore<S>,
    settings: &Settings,
    cmd: BudgetCommands,
) -> XpensResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set { category, amount } => {
            let amount = parse_amount(&amount)?;
            let category = settings
                .find_category(&category)
                .map(str::to_string)
                .unwrap_or_else(|| category.trim().to_string());

            ledger.set_budget(category.clone(), amount)?;
            println!(
                "Budget for {} updated to {}",
                category,
                amount.format_with_symbol(symbol)
            );
            report_persist_error(ledger);
        }

        BudgetCommands::Clear { category } => {
            let category = settings
                .find_category(&category)
                .map(str::to_string)
                .unwrap_or(category);

            let previous = ledger
                .clear_budget(&category)
                .ok_or_else(|| XpensError::budget_not_found(&category))?;
            println!(
                "Budget for {} cleared (was {})",
                category,
                previous.format_with_symbol(symbol)
            );
            report_persist_error(ledger);
        }

        BudgetCommands::Show => {
            let statuses = ledger.budget_overview(budget_categories(ledger, settings));
            print!("{}", format_budget_table(&statuses, ledger.income(), symbol));
        }
    }

    Ok(())
}

/// Handle an income command
pub fn handle_income_command<S: KeyValueStore>(
    ledger: &mut LedgerStore<S>,
    settings: &Settings,
    cmd: IncomeCommands,
) -> XpensResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        IncomeCommands::Set { amount } => {
            let amount = parse_amount(&amount)?;
            ledger.update_income(amount)?;
            println!("Monthly income updated to {}", amount.format_with_symbol(symbol));
            report_persist_error(ledger);
        }
        IncomeCommands::Show => {
            println!("Monthly income: {}", ledger.income().format_with_symbol(symbol));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::MemoryStore;

    #[test]
    fn test_set_uses_configured_spelling() {
        let mut ledger = LedgerStore::new(MemoryStore::new());
        let settings = Settings::default();

        handle_budget_command(
            &mut ledger,
            &settings,
            BudgetCommands::Set {
                category: "transport".into(),
                amount: "60".into(),
            },
        )
        .unwrap();

        assert_eq!(ledger.budgets()["Transport"], Money::from_units(60));
    }

    #[test]
    fn test_set_rejects_negative() {
        let mut ledger = LedgerStore::new(MemoryStore::new());
        let err = handle_budget_command(
            &mut ledger,
            &Settings::default(),
            BudgetCommands::Set {
                category: "Food".into(),
                amount: "-5".into(),
            },
        )
        .unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn test_clear_unknown_budget() {
        let mut ledger = LedgerStore::new(MemoryStore::new());
        let err = handle_budget_command(
            &mut ledger,
            &Settings::default(),
            BudgetCommands::Clear {
                category: "Food".into(),
            },
        )
        .unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_income_set() {
        let mut ledger = LedgerStore::new(MemoryStore::new());
        handle_income_command(
            &mut ledger,
            &Settings::default(),
            IncomeCommands::Set {
                amount: "2500.50".into(),
            },
        )
        .unwrap();

        assert_eq!(ledger.income(), Money::new(250050, 2));
    }
}
