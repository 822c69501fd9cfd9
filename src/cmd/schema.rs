//! Schema command - print expected input and export formats

use booktax::export::{CsvField, TrialBalanceRecord};
use booktax::ledger::{EntryRecord, LedgerFile};
use booktax::tax::TaxRates;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the ledger file
    JsonSchema,
    /// JSON Schema for the tax rates file
    RatesSchema,
    /// CSV header row for journal entry import
    CsvHeader,
    /// CSV column descriptions for entry import and trial balance export
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(LedgerFile);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::RatesSchema => {
                let schema = schema_for!(TaxRates);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => {
                let columns: Vec<_> = EntryRecord::csv_schema().iter().map(|f| f.name).collect();
                println!("{}", columns.join(","));
            }
            SchemaFormat::CsvFields => {
                print_fields("Journal Entry CSV Import", EntryRecord::csv_schema());
                print_fields("Trial Balance CSV Export", TrialBalanceRecord::csv_schema());
                println!("Amounts are plain decimals in pounds; a leading £ and thousands separators are accepted on import.");
            }
        }
        Ok(())
    }
}

fn print_fields(title: &str, fields: &[CsvField]) {
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!();
    for field in fields {
        let req = if field.required { "required" } else { "optional" };
        println!("{:16} ({:8})  {}", field.name, req, field.description);
    }
    println!();
}
