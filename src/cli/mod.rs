//! CLI command handlers
//!
//! The command line is the presentation layer in front of the ledger: it
//! parses user input, formats output and asks for confirmation before
//! destructive operations.

pub mod budget;
pub mod transaction;

pub use budget::{handle_budget_command, handle_income_command, BudgetCommands, IncomeCommands};
pub use transaction::{
    handle_transaction_command, AddArgs, DeleteArgs, ListArgs, TransactionCommands,
};

use crate::config::settings::Settings;
use crate::display::{format_spending_by_category, format_summary};
use crate::error::{XpensError, XpensResult};
use crate::ledger::LedgerStore;
use crate::models::Money;
use crate::storage::{KeyValueStore, WriteBehindStore};

/// Print the dashboard: balance, totals and spending per category
pub fn handle_summary_command<S: KeyValueStore>(
    ledger: &LedgerStore<S>,
    settings: &Settings,
) -> XpensResult<()> {
    let symbol = settings.currency_symbol.as_str();

    print!("{}", format_summary(&ledger.summary(), symbol));
    println!();

    let statuses = ledger.budget_overview(budget_categories(ledger, settings));
    print!("{}", format_spending_by_category(&statuses, symbol));

    Ok(())
}

/// Configured categories followed by any other category that has a budget
/// or recorded spending
pub(crate) fn budget_categories<S: KeyValueStore>(
    ledger: &LedgerStore<S>,
    settings: &Settings,
) -> Vec<String> {
    let mut categories = settings.categories.clone();
    let extra = ledger
        .budgets()
        .keys()
        .cloned()
        .chain(ledger.expenses_by_category().into_keys());

    for category in extra {
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    categories
}

/// Parse a user-entered amount
pub(crate) fn parse_amount(input: &str) -> XpensResult<Money> {
    Money::parse(input).map_err(|e| {
        XpensError::Validation(format!(
            "Invalid amount '{}'. Use a format like '12.50' or '100'. Error: {}",
            input, e
        ))
    })
}

/// Tell the user when the last change could not be saved
pub(crate) fn report_persist_error<S: KeyValueStore>(ledger: &mut LedgerStore<S>) {
    if let Some(message) = ledger.take_persist_error() {
        eprintln!("Warning: change applied but not saved ({})", message);
    }
}

/// Wait for queued background writes and warn if the store rejected any
///
/// Returns the number of rejected writes.
pub fn finish_background_writes<S: KeyValueStore + 'static>(
    store: &WriteBehindStore<S>,
) -> XpensResult<usize> {
    store.flush()?;

    let failed = store.failed_writes();
    if failed > 0 {
        eprintln!(
            "Warning: {} change(s) applied but not saved (run with RUST_LOG=xpens=error for details)",
            failed
        );
    }
    Ok(failed)
}
