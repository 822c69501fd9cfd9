use super::account::AccountInput;
use super::error::LedgerError;
use super::handle::Ledger;
use super::journal::{EntryInput, EntryStatus, LineInput};
use crate::export::CsvField;
use booktax_derive::CsvSchema;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;

/// Input root for ledger JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LedgerFile {
    #[serde(default)]
    pub accounts: Vec<AccountInput>,
    #[serde(default)]
    pub entries: Vec<EntryInput>,
}

/// An entry from an imported ledger that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Position of the entry in the input (1-based)
    pub row: usize,
    pub description: String,
    pub error: LedgerError,
}

pub fn read_ledger_json<R: Read>(reader: R) -> anyhow::Result<LedgerFile> {
    let file: LedgerFile = serde_json::from_reader(reader)?;
    Ok(file)
}

/// Builds a ledger from file contents.
///
/// Account errors abort the load. Entries are recorded in file order; rejected
/// entries are collected and the rest of the file still loads.
pub fn load_ledger(file: &LedgerFile) -> Result<(Ledger, Vec<Rejection>), LedgerError> {
    let ledger = Ledger::new();
    for account in &file.accounts {
        ledger.add_account(account)?;
    }

    let mut rejections = Vec::new();
    for (i, entry) in file.entries.iter().enumerate() {
        if let Err(error) = ledger.record(entry) {
            log::warn!(
                "Rejected entry {}: date={} description='{}': {}",
                i + 1,
                entry.date,
                entry.description,
                error
            );
            rejections.push(Rejection {
                row: i + 1,
                description: entry.description.clone(),
                error,
            });
        }
    }
    Ok((ledger, rejections))
}

/// One journal entry per CSV row
#[derive(Debug, Clone, Default, Serialize, Deserialize, CsvSchema)]
pub struct EntryRecord {
    /// Entry date (YYYY-MM-DD)
    pub date: String,
    /// What the entry records
    pub description: String,
    /// Free-text reference, e.g. an invoice number
    #[serde(default)]
    pub reference: String,
    /// Account id (acc-N) or code to debit
    pub debit_account: String,
    /// Account id (acc-N) or code to credit
    pub credit_account: String,
    /// Debit amount, must equal credit_amount
    pub debit_amount: String,
    /// Credit amount, must equal debit_amount
    pub credit_amount: String,
    /// Draft, Pending or Posted (default Posted)
    #[serde(default)]
    pub status: String,
}

impl TryFrom<EntryRecord> for EntryInput {
    type Error = anyhow::Error;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d")
            .map_err(|err| anyhow::anyhow!("invalid date '{}': {}", record.date, err))?;
        let status = match record.status.trim().to_lowercase().as_str() {
            "" => None,
            "draft" => Some(EntryStatus::Draft),
            "pending" => Some(EntryStatus::Pending),
            "posted" => Some(EntryStatus::Posted),
            other => anyhow::bail!("invalid status '{}'", other),
        };
        Ok(EntryInput {
            date,
            description: record.description,
            reference: Some(record.reference).filter(|r| !r.trim().is_empty()),
            status,
            debit: LineInput {
                account: record.debit_account,
                amount: parse_amount("debit_amount", &record.debit_amount)?,
            },
            credit: LineInput {
                account: record.credit_account,
                amount: parse_amount("credit_amount", &record.credit_amount)?,
            },
        })
    }
}

// Blank amounts stay `None` so validation can name the missing field.
fn parse_amount(column: &str, value: &str) -> anyhow::Result<Option<Decimal>> {
    let value = value.trim().trim_start_matches('£').replace(',', "");
    if value.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(&value)
        .map(Some)
        .map_err(|err| anyhow::anyhow!("invalid {} '{}': {}", column, value, err))
}

/// Reads journal entries from CSV, one entry per row
pub fn read_entries_csv<R: Read>(reader: R) -> anyhow::Result<Vec<EntryInput>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut entries = Vec::new();
    for (i, result) in rdr.deserialize::<EntryRecord>().enumerate() {
        let record = result?;
        let entry = EntryInput::try_from(record)
            .map_err(|err| anyhow::anyhow!("row {}: {}", i + 1, err))?;
        entries.push(entry);
    }
    Ok(entries)
}
