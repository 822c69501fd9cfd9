pub mod accounts;
pub mod schema;
pub mod tax;
pub mod trial_balance;
pub mod validate;

use anyhow::Context;
use booktax::ledger::{self, Ledger, LedgerFile, Rejection};
use clap::Args;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Ledger input shared by the bookkeeping commands
#[derive(Args, Debug)]
pub struct LedgerArgs {
    /// Ledger JSON file with accounts and entries ("-" reads stdin)
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Additional journal entries from a CSV file
    #[arg(long)]
    entries: Option<PathBuf>,
}

impl LedgerArgs {
    /// Builds the ledger, returning entries that failed validation alongside it
    pub fn load(&self) -> anyhow::Result<(Ledger, Vec<Rejection>)> {
        let mut file = read_ledger_file(&self.file)?;
        if let Some(path) = &self.entries {
            let csv = File::open(path)
                .with_context(|| format!("failed to open entries file {}", path.display()))?;
            let mut entries = ledger::read_entries_csv(BufReader::new(csv))
                .with_context(|| format!("failed to read entries from {}", path.display()))?;
            file.entries.append(&mut entries);
        }
        log::debug!(
            "Loading {} accounts and {} entries",
            file.accounts.len(),
            file.entries.len()
        );
        let loaded = ledger::load_ledger(&file)?;
        Ok(loaded)
    }
}

fn read_ledger_file(path: &Path) -> anyhow::Result<LedgerFile> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a ledger file or pipe data to stdin.");
        }
        ledger::read_ledger_json(buffer.as_slice())
    } else {
        let file = File::open(path)
            .with_context(|| format!("failed to open ledger file {}", path.display()))?;
        ledger::read_ledger_json(BufReader::new(file))
            .with_context(|| format!("failed to read ledger from {}", path.display()))
    }
}

fn format_gbp(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-£{:.2}", amount.abs())
    } else {
        format!("£{:.2}", amount)
    }
}

fn format_rate(rate: Decimal) -> String {
    let pct = (rate * Decimal::ONE_HUNDRED).normalize();
    format!("{}%", pct)
}
