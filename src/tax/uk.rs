use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Income tax band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaxBand {
    Basic,
    Higher,
    Additional,
}

impl TaxBand {
    pub fn name(self) -> &'static str {
        match self {
            TaxBand::Basic => "basic",
            TaxBand::Higher => "higher",
            TaxBand::Additional => "additional",
        }
    }
}

/// UK Tax Year (runs 6 April to 5 April)
/// The year value represents the end year (e.g., 2025 = 2024/25 tax year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Display as "2024/25" format
    pub fn display(&self) -> String {
        format!("{}/{:02}", self.0 - 1, self.0.rem_euclid(100))
    }

    /// First self assessment payment on account: 31 January within the tax year
    pub fn first_payment_due(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0, 1, 31)
    }

    /// Second payment on account: 31 July after the tax year ends
    pub fn second_payment_due(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0, 7, 31)
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Thresholds and rates used by the calculators.
///
/// Defaults are the Income Tax bands on taxable income, Class 4 NI profit limits
/// and the Corporation Tax small profits / main rate regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TaxRates {
    /// Top of the basic rate band
    #[schemars(with = "f64")]
    pub basic_rate_limit: Decimal,
    /// Top of the higher rate band; income above is taxed at the additional rate
    #[schemars(with = "f64")]
    pub higher_rate_limit: Decimal,
    #[schemars(with = "f64")]
    pub basic_rate: Decimal,
    #[schemars(with = "f64")]
    pub higher_rate: Decimal,
    #[schemars(with = "f64")]
    pub additional_rate: Decimal,

    /// Class 4 NI lower profits limit
    #[schemars(with = "f64")]
    pub ni_lower_profits_limit: Decimal,
    /// Class 4 NI upper profits limit
    #[schemars(with = "f64")]
    pub ni_upper_profits_limit: Decimal,
    /// Class 4 NI rate between the limits
    #[schemars(with = "f64")]
    pub ni_main_rate: Decimal,
    /// Class 4 NI rate above the upper limit
    #[schemars(with = "f64")]
    pub ni_additional_rate: Decimal,

    #[schemars(with = "f64")]
    pub ct_small_profits_rate: Decimal,
    #[schemars(with = "f64")]
    pub ct_main_rate: Decimal,
    /// Profits up to this are taxed at the small profits rate
    #[schemars(with = "f64")]
    pub ct_lower_limit: Decimal,
    /// Profits above this are taxed at the main rate with no relief
    #[schemars(with = "f64")]
    pub ct_upper_limit: Decimal,
    /// Standard marginal relief fraction
    #[schemars(with = "f64")]
    pub ct_marginal_relief_fraction: Decimal,
}

impl Default for TaxRates {
    fn default() -> Self {
        TaxRates {
            basic_rate_limit: dec!(37700),
            higher_rate_limit: dec!(125140),
            basic_rate: dec!(0.20),
            higher_rate: dec!(0.40),
            additional_rate: dec!(0.45),

            ni_lower_profits_limit: dec!(12570),
            ni_upper_profits_limit: dec!(50270),
            ni_main_rate: dec!(0.09),
            ni_additional_rate: dec!(0.02),

            ct_small_profits_rate: dec!(0.19),
            ct_main_rate: dec!(0.25),
            ct_lower_limit: dec!(50000),
            ct_upper_limit: dec!(250000),
            ct_marginal_relief_fraction: dec!(0.015),
        }
    }
}

impl TaxRates {
    /// Reads rates from JSON. Missing fields keep their defaults.
    pub fn read_json<R: Read>(reader: R) -> anyhow::Result<TaxRates> {
        let rates: TaxRates = serde_json::from_reader(reader)?;
        if rates.basic_rate_limit > rates.higher_rate_limit {
            anyhow::bail!("basic_rate_limit must not exceed higher_rate_limit");
        }
        if rates.ni_lower_profits_limit > rates.ni_upper_profits_limit {
            anyhow::bail!("ni_lower_profits_limit must not exceed ni_upper_profits_limit");
        }
        if rates.ct_lower_limit > rates.ct_upper_limit {
            anyhow::bail!("ct_lower_limit must not exceed ct_upper_limit");
        }
        Ok(rates)
    }
}
