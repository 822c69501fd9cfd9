//! Flat record shapes for exporting reports.

use crate::ledger::TrialBalanceReport;
use booktax_derive::CsvSchema;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// Column description generated by `#[derive(CsvSchema)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Trial balance row as written to CSV. The last row holds the totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, CsvSchema)]
pub struct TrialBalanceRecord {
    /// Account code, or TOTAL for the totals row
    pub account_code: String,
    /// Account name
    pub account_name: String,
    /// Balance of debit-normal accounts (Asset, Expense)
    pub debit: String,
    /// Balance of credit-normal accounts (Liability, Equity, Revenue)
    pub credit: String,
}

pub fn trial_balance_records(report: &TrialBalanceReport) -> Vec<TrialBalanceRecord> {
    let column = |amount: Option<Decimal>| amount.map_or(String::new(), |a| format!("{:.2}", a));
    report
        .rows
        .iter()
        .map(|row| TrialBalanceRecord {
            account_code: row.account_code.clone(),
            account_name: row.account_name.clone(),
            debit: column(row.debit),
            credit: column(row.credit),
        })
        .chain(std::iter::once(TrialBalanceRecord {
            account_code: "TOTAL".to_string(),
            account_name: String::new(),
            debit: column(Some(report.total_debits)),
            credit: column(Some(report.total_credits)),
        }))
        .collect()
}

pub fn write_csv<I, R, W>(records: I, writer: W) -> anyhow::Result<()>
where
    I: IntoIterator<Item = R>,
    R: Serialize,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records.into_iter() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
