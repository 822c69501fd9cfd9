//! Trial balance command - balances in their natural columns with totals

use super::{format_gbp, LedgerArgs};
use booktax::export::{trial_balance_records, write_csv};
use booktax::ledger::TrialBalanceReport;
use clap::Args;
use rust_decimal::Decimal;
use std::io;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct TrialBalanceCommand {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Output as CSV instead of formatted table
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct Row {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Account")]
    name: String,
    #[tabled(rename = "Debit")]
    debit: String,
    #[tabled(rename = "Credit")]
    credit: String,
}

impl TrialBalanceCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (ledger, rejections) = self.ledger.load()?;
        if !rejections.is_empty() {
            log::warn!(
                "{} entries were rejected and are not included; run `validate` for details",
                rejections.len()
            );
        }
        let report = ledger.trial_balance();

        if self.csv {
            write_csv(trial_balance_records(&report), io::stdout())
        } else if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        } else {
            self.print_table(&report);
            Ok(())
        }
    }

    fn print_table(&self, report: &TrialBalanceReport) {
        let column = |amount: Option<Decimal>| amount.map_or(String::new(), format_gbp);
        let mut rows: Vec<Row> = report
            .rows
            .iter()
            .map(|r| Row {
                code: r.account_code.clone(),
                name: r.account_name.clone(),
                debit: column(r.debit),
                credit: column(r.credit),
            })
            .collect();
        rows.push(Row {
            code: "TOTAL".to_string(),
            name: String::new(),
            debit: format_gbp(report.total_debits),
            credit: format_gbp(report.total_credits),
        });

        println!();
        println!("TRIAL BALANCE");
        println!();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
        if report.is_balanced {
            println!("\u{2713} Balanced");
        } else if report.totals_overflowed {
            println!("\u{26A0} NOT BALANCED: totals are out of range");
        } else {
            let larger = if report.difference.is_sign_positive() {
                "debits exceed credits"
            } else {
                "credits exceed debits"
            };
            println!(
                "\u{26A0} NOT BALANCED: {} by {}",
                larger,
                format_gbp(report.difference.abs())
            );
        }
    }
}
