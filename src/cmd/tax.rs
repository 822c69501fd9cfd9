//! Tax commands - Income Tax and NI, Corporation Tax, payments on account

use super::{format_gbp, format_rate};
use anyhow::Context;
use booktax::tax::{self, TaxRates, TaxYear};
use clap::Args;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

fn load_rates(path: Option<&Path>) -> anyhow::Result<TaxRates> {
    match path {
        None => Ok(TaxRates::default()),
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open rates file {}", path.display()))?;
            let rates = TaxRates::read_json(BufReader::new(file))
                .with_context(|| format!("failed to read rates from {}", path.display()))?;
            log::debug!("Using tax rates from {}", path.display());
            Ok(rates)
        }
    }
}

#[derive(Args, Debug)]
pub struct IncomeTaxCommand {
    /// Taxable income, after personal allowance and expenses
    #[arg(short, long, allow_negative_numbers = true)]
    income: Decimal,

    /// JSON file overriding tax thresholds and rates
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl IncomeTaxCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rates = load_rates(self.rates.as_deref())?;
        let result = tax::compute_income_tax_and_ni_with_rates(self.income, &rates)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        println!();
        println!("INCOME TAX AND NATIONAL INSURANCE");
        println!("  Taxable income: {}", format_gbp(result.taxable_income));
        for band in &result.bands {
            println!(
                "  {:<10} {} @ {}: {}",
                band.band.name(),
                format_gbp(band.income),
                format_rate(band.rate),
                format_gbp(band.tax)
            );
        }
        println!("  Income Tax: {}", format_gbp(result.income_tax));
        println!("  Class 4 NI: {}", format_gbp(result.national_insurance));
        println!();
        println!("TOTAL: £{}", result.total);
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct CorporationTaxCommand {
    /// Taxable profit for the accounting period
    #[arg(short, long, allow_negative_numbers = true)]
    profit: Decimal,

    /// JSON file overriding tax thresholds and rates
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl CorporationTaxCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rates = load_rates(self.rates.as_deref())?;
        let result = tax::compute_corporation_tax_with_rates(self.profit, &rates)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        println!();
        println!("CORPORATION TAX");
        println!("  Taxable profit: {}", format_gbp(result.taxable_profit));
        println!("  Rate: {}", format_rate(result.rate));
        if !result.marginal_relief.is_zero() {
            println!("  Marginal relief: {}", format_gbp(result.marginal_relief));
        }
        println!(
            "  Tax: {} (effective {})",
            format_gbp(result.tax),
            format_rate(result.effective_rate)
        );
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct PaymentsCommand {
    /// Total liability to split into payments on account
    #[arg(short, long, allow_negative_numbers = true)]
    due: Decimal,

    /// Tax year the payments relate to (e.g., 2025 for 2024/25)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl PaymentsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let tax_year = self.year.map(TaxYear);
        let schedule = tax::compute_payment_schedule(self.due, tax_year)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&schedule)?);
            return Ok(());
        }

        let year_str = tax_year.map_or("no tax year".to_string(), |y| y.display());
        let due = |date: Option<chrono::NaiveDate>| {
            date.map_or(String::new(), |d| format!(" due {}", d.format("%d %B %Y")))
        };

        println!();
        println!("PAYMENTS ON ACCOUNT ({})", year_str);
        println!("  Total due: {}", format_gbp(schedule.total_due));
        println!(
            "  First payment: {}{}",
            format_gbp(schedule.first_payment_on_account),
            due(schedule.first_due)
        );
        println!(
            "  Second payment: {}{}",
            format_gbp(schedule.second_payment_on_account),
            due(schedule.second_due)
        );
        println!();
        Ok(())
    }
}
