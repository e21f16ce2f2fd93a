use anyhow::Result;
use clap::{Parser, Subcommand};

use xpens::cli::{
    finish_background_writes, handle_budget_command, handle_income_command,
    handle_summary_command, handle_transaction_command, AddArgs, BudgetCommands, DeleteArgs,
    IncomeCommands, ListArgs, TransactionCommands,
};
use xpens::config::{paths::XpensPaths, settings::Settings};
use xpens::ledger::LedgerStore;
use xpens::storage::{FileStore, KeyValueStore, WriteBehindStore};

#[derive(Parser)]
#[command(
    name = "xpens",
    version,
    about = "Track income and expenses against per-category budgets",
    long_about = "Xpens records income and expense transactions, totals them by \
                  category and compares spending against the budgets you set."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an expense (or income with --income)
    Add(AddArgs),

    /// List transactions, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Delete a transaction by ID or unique prefix
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Baseline income commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Show balance, totals and spending by category
    Summary,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    xpens::logging::init();
    let cli = Cli::parse();

    let paths = XpensPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let file_store = FileStore::open(&paths)?;

    if settings.write_behind {
        let mut ledger = LedgerStore::load(WriteBehindStore::new(file_store)?);
        let result = run(cli.command, &mut ledger, &paths, &settings);
        finish_background_writes(ledger.backing_store())?;
        result
    } else {
        let mut ledger = LedgerStore::load(file_store);
        run(cli.command, &mut ledger, &paths, &settings)
    }
}

fn run<S: KeyValueStore>(
    command: Option<Commands>,
    ledger: &mut LedgerStore<S>,
    paths: &XpensPaths,
    settings: &Settings,
) -> Result<()> {
    match command {
        Some(Commands::Add(args)) => {
            handle_transaction_command(ledger, settings, TransactionCommands::Add(args))?;
        }
        Some(Commands::List(args)) => {
            handle_transaction_command(ledger, settings, TransactionCommands::List(args))?;
        }
        Some(Commands::Delete(args)) => {
            handle_transaction_command(ledger, settings, TransactionCommands::Delete(args))?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(ledger, settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(ledger, settings, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(ledger, settings, cmd)?;
        }
        Some(Commands::Summary) | None => {
            handle_summary_command(ledger, settings)?;
        }
        Some(Commands::Config) => {
            println!("Xpens Configuration");
            println!("===================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Categories:      {}", settings.categories.join(", "));
            println!("  Write-behind:    {}", settings.write_behind);
        }
    }

    Ok(())
}
