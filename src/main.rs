use clap::{Parser, Subcommand};

mod cmd;

use cmd::accounts::AccountsCommand;
use cmd::schema::SchemaCommand;
use cmd::tax::{CorporationTaxCommand, IncomeTaxCommand, PaymentsCommand};
use cmd::trial_balance::TrialBalanceCommand;
use cmd::validate::ValidateCommand;

#[derive(Parser, Debug)]
#[command(
    name = "booktax",
    version,
    about = "Double-entry books, trial balance and UK tax calculations"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the chart of accounts with balances
    Accounts(AccountsCommand),
    /// Trial balance of posted entries
    TrialBalance(TrialBalanceCommand),
    /// Report entries rejected by the posting rules
    Validate(ValidateCommand),
    /// Income Tax and Class 4 National Insurance on taxable income
    IncomeTax(IncomeTaxCommand),
    /// Corporation Tax with marginal relief
    CorporationTax(CorporationTaxCommand),
    /// Split a liability into two payments on account
    Payments(PaymentsCommand),
    /// Print input and export formats
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Accounts(cmd) => cmd.exec(),
        Command::TrialBalance(cmd) => cmd.exec(),
        Command::Validate(cmd) => cmd.exec(),
        Command::IncomeTax(cmd) => cmd.exec(),
        Command::CorporationTax(cmd) => cmd.exec(),
        Command::Payments(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
