use super::uk::{TaxBand, TaxRates};
use super::{require_non_negative, round_half_up, slice, TaxError};
use rust_decimal::Decimal;
use serde::Serialize;

/// Tax charged within one income tax band
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandCharge {
    pub band: TaxBand,
    pub income: Decimal,
    pub rate: Decimal,
    pub tax: Decimal,
}

/// Income Tax and Class 4 NI on taxable income
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeTaxAndNi {
    pub taxable_income: Decimal,
    /// Rounded to pence
    pub income_tax: Decimal,
    /// Rounded to pence
    pub national_insurance: Decimal,
    /// Rounded to whole pounds
    pub total: Decimal,
    /// Only bands with income in them
    pub bands: Vec<BandCharge>,
}

/// Income Tax and Class 4 NI at the default rates.
///
/// `taxable_income` is already net of personal allowance and expenses.
pub fn compute_income_tax_and_ni(taxable_income: Decimal) -> Result<IncomeTaxAndNi, TaxError> {
    compute_income_tax_and_ni_with_rates(taxable_income, &TaxRates::default())
}

pub fn compute_income_tax_and_ni_with_rates(
    taxable_income: Decimal,
    rates: &TaxRates,
) -> Result<IncomeTaxAndNi, TaxError> {
    require_non_negative("taxable_income", taxable_income)?;

    let bands: Vec<BandCharge> = [
        (TaxBand::Basic, Decimal::ZERO, Some(rates.basic_rate_limit), rates.basic_rate),
        (
            TaxBand::Higher,
            rates.basic_rate_limit,
            Some(rates.higher_rate_limit),
            rates.higher_rate,
        ),
        (TaxBand::Additional, rates.higher_rate_limit, None, rates.additional_rate),
    ]
    .into_iter()
    .map(|(band, lower, upper, rate)| {
        let income = slice(taxable_income, lower, upper);
        BandCharge {
            band,
            income,
            rate,
            tax: income * rate,
        }
    })
    .filter(|charge| !charge.income.is_zero())
    .collect();

    let income_tax = round_half_up(bands.iter().map(|b| b.tax).sum(), 2);

    let main_ni = slice(
        taxable_income,
        rates.ni_lower_profits_limit,
        Some(rates.ni_upper_profits_limit),
    ) * rates.ni_main_rate;
    let additional_ni =
        slice(taxable_income, rates.ni_upper_profits_limit, None) * rates.ni_additional_rate;
    let national_insurance = round_half_up(main_ni + additional_ni, 2);

    Ok(IncomeTaxAndNi {
        taxable_income,
        income_tax,
        national_insurance,
        total: round_half_up(income_tax + national_insurance, 0),
        bands,
    })
}
