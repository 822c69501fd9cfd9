//! Accounts command - chart of accounts with current balances

use super::{format_gbp, LedgerArgs};
use booktax::ledger::{Account, AccountType};
use clap::{Args, ValueEnum};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct AccountsCommand {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Only list accounts of this type
    #[arg(short = 't', long, value_enum)]
    account_type: Option<AccountTypeArg>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AccountTypeArg {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl From<AccountTypeArg> for AccountType {
    fn from(arg: AccountTypeArg) -> Self {
        match arg {
            AccountTypeArg::Asset => AccountType::Asset,
            AccountTypeArg::Liability => AccountType::Liability,
            AccountTypeArg::Equity => AccountType::Equity,
            AccountTypeArg::Revenue => AccountType::Revenue,
            AccountTypeArg::Expense => AccountType::Expense,
        }
    }
}

#[derive(Debug, Tabled)]
struct AccountRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    account_type: String,
    #[tabled(rename = "Normal")]
    normal_balance: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Last Posted")]
    last_posted: String,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        AccountRow {
            id: account.id.to_string(),
            code: account.code.clone(),
            name: account.name.clone(),
            account_type: account.account_type().to_string(),
            normal_balance: account.normal_balance().to_string(),
            balance: format_gbp(account.balance()),
            last_posted: account
                .last_transaction_at()
                .map_or(String::new(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}

impl AccountsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (ledger, _) = self.ledger.load()?;
        let accounts = ledger.list_accounts(self.account_type.map(Into::into));

        if self.json {
            println!("{}", serde_json::to_string_pretty(&accounts)?);
            return Ok(());
        }

        if accounts.is_empty() {
            println!("No accounts found matching filters");
            return Ok(());
        }

        let rows: Vec<AccountRow> = accounts.iter().map(AccountRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::one(5)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        Ok(())
    }
}
