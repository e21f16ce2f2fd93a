//! Transaction CLI commands
//!
//! Add, list and delete. Amount parsing, category checks and the delete
//! confirmation live here, in front of the ledger.

use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{XpensError, XpensResult};
use crate::ledger::LedgerStore;
use crate::models::{Money, NewTransaction, TransactionId, TransactionType};
use crate::storage::KeyValueStore;

use super::{parse_amount, report_persist_error};

/// Arguments for recording a transaction
#[derive(Args)]
pub struct AddArgs {
    /// Amount, e.g. "12.50"
    pub amount: String,
    /// Record income instead of an expense
    #[arg(short, long)]
    pub income: bool,
    /// Expense category (ignored for income)
    #[arg(short, long, default_value = "Food")]
    pub category: String,
    /// Description; defaults to the category name
    #[arg(short, long)]
    pub description: Option<String>,
    /// Accept a category that is not in the configured list
    #[arg(long)]
    pub any_category: bool,
}

/// Arguments for listing transactions
#[derive(Args)]
pub struct ListArgs {
    /// Number of transactions to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for deleting a transaction
#[derive(Args)]
pub struct DeleteArgs {
    /// Transaction ID or unique prefix
    pub id: String,
    /// Skip confirmation
    #[arg(short, long)]
    pub force: bool,
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an expense (or income with --income)
    Add(AddArgs),
    /// List transactions, newest first
    List(ListArgs),
    /// Show transaction details
    Show {
        /// Transaction ID or unique prefix
        id: String,
    },
    /// Delete a transaction
    Delete(DeleteArgs),
}

/// Handle a transaction command
pub fn handle_transaction_command<S: KeyValueStore>(
    ledger: &mut LedgerStore<S>,
    settings: &Settings,
    cmd: TransactionCommands,
) -> XpensResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add(AddArgs {
            amount,
            income,
            category,
            description,
            any_category,
        }) => {
            let amount = parse_positive_amount(&amount)?;

            let input = if income {
                NewTransaction::income(amount)
            } else {
                let category = resolve_category(settings, &category, any_category)?;
                NewTransaction::expense(amount, category)
            };
            let input = match description {
                Some(d) => input.with_description(d),
                None => input,
            };

            let txn = ledger.add_transaction(input)?;
            let verb = match txn.kind {
                TransactionType::Income => "income",
                TransactionType::Expense => "expense",
            };
            println!(
                "Added {} {} ({}) [{}]",
                verb,
                txn.amount.format_with_symbol(symbol),
                txn.description,
                txn.id
            );
            report_persist_error(ledger);
        }

        TransactionCommands::List(ListArgs { limit }) => {
            let transactions = ledger.transactions();
            let shown = match limit {
                Some(n) => &transactions[..n.min(transactions.len())],
                None => transactions,
            };
            print!("{}", format_transaction_register(shown, symbol));
            if shown.len() < transactions.len() {
                println!("({} of {} transactions shown)", shown.len(), transactions.len());
            }
        }

        TransactionCommands::Show { id } => {
            let id = find_transaction_id(ledger, &id)?;
            if let Some(txn) = ledger.get_transaction(id.as_str()) {
                print!("{}", format_transaction_details(txn, symbol));
            }
        }

        TransactionCommands::Delete(DeleteArgs { id, force }) => {
            let id = find_transaction_id(ledger, &id)?;

            if !force {
                if let Some(txn) = ledger.get_transaction(id.as_str()) {
                    println!("About to delete transaction:");
                    print!("{}", format_transaction_details(txn, symbol));
                    println!();
                    println!("Use --force to confirm deletion");
                }
                return Ok(());
            }

            if let Some(deleted) = ledger.delete_transaction(id.as_str()) {
                println!(
                    "Deleted transaction: {} ({} {})",
                    deleted.id,
                    deleted.description,
                    deleted.amount.format_with_symbol(symbol)
                );
            }
            report_persist_error(ledger);
        }
    }

    Ok(())
}

/// Parse an amount that must be strictly positive
fn parse_positive_amount(input: &str) -> XpensResult<Money> {
    let amount = parse_amount(input)?;
    if !amount.is_positive() {
        return Err(XpensError::Validation(format!(
            "Please enter a valid amount: '{}' is not greater than zero",
            input
        )));
    }
    Ok(amount)
}

fn resolve_category(settings: &Settings, name: &str, any_category: bool) -> XpensResult<String> {
    if any_category {
        return Ok(name.trim().to_string());
    }

    settings
        .find_category(name)
        .map(str::to_string)
        .ok_or_else(|| {
            XpensError::Validation(format!(
                "Unknown category '{}'. Choose one of: {} (or pass --any-category)",
                name,
                settings.categories.join(", ")
            ))
        })
}

/// Resolve a full id or a unique prefix of one
fn find_transaction_id<S: KeyValueStore>(
    ledger: &LedgerStore<S>,
    id: &str,
) -> XpensResult<TransactionId> {
    if let Some(txn) = ledger.get_transaction(id) {
        return Ok(txn.id.clone());
    }

    let mut matches = ledger
        .transactions()
        .iter()
        .filter(|t| !id.is_empty() && t.id.as_str().starts_with(id));

    match (matches.next(), matches.next()) {
        (Some(txn), None) => Ok(txn.id.clone()),
        (Some(_), Some(_)) => Err(XpensError::Validation(format!(
            "Transaction ID prefix '{}' is ambiguous",
            id
        ))),
        (None, _) => Err(XpensError::transaction_not_found(id)),
    }
}
