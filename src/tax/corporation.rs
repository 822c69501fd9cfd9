use super::uk::TaxRates;
use super::{require_non_negative, round_half_up, TaxError};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorporationTax {
    pub taxable_profit: Decimal,
    /// Headline rate applied before any marginal relief
    pub rate: Decimal,
    pub marginal_relief: Decimal,
    /// Rounded to pence
    pub tax: Decimal,
    /// `tax / taxable_profit`, to four places
    pub effective_rate: Decimal,
}

/// Corporation Tax at the default rates
pub fn compute_corporation_tax(taxable_profit: Decimal) -> Result<CorporationTax, TaxError> {
    compute_corporation_tax_with_rates(taxable_profit, &TaxRates::default())
}

/// Small profits rate up to the lower limit, main rate above the upper limit, and
/// main rate less marginal relief in between:
/// `relief = fraction * (upper_limit - profit)`.
pub fn compute_corporation_tax_with_rates(
    taxable_profit: Decimal,
    rates: &TaxRates,
) -> Result<CorporationTax, TaxError> {
    require_non_negative("taxable_profit", taxable_profit)?;

    let (rate, marginal_relief) = if taxable_profit <= rates.ct_lower_limit {
        (rates.ct_small_profits_rate, Decimal::ZERO)
    } else if taxable_profit <= rates.ct_upper_limit {
        let relief = rates.ct_marginal_relief_fraction * (rates.ct_upper_limit - taxable_profit);
        (rates.ct_main_rate, relief)
    } else {
        (rates.ct_main_rate, Decimal::ZERO)
    };

    let tax = round_half_up(taxable_profit * rate - marginal_relief, 2);
    let effective_rate = if taxable_profit.is_zero() {
        Decimal::ZERO
    } else {
        round_half_up(tax / taxable_profit, 4)
    };

    Ok(CorporationTax {
        taxable_profit,
        rate,
        marginal_relief: round_half_up(marginal_relief, 2),
        tax,
        effective_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn small_profits_rate_at_lower_limit() {
        let ct = compute_corporation_tax(dec!(50000)).unwrap();
        assert_eq!(ct.rate, dec!(0.19));
        assert_eq!(ct.tax, dec!(9500));
        assert_eq!(ct.marginal_relief, dec!(0));
    }

    #[test]
    fn main_rate_above_upper_limit() {
        let ct = compute_corporation_tax(dec!(250001)).unwrap();
        assert_eq!(ct.rate, dec!(0.25));
        assert_eq!(ct.tax, dec!(62500.25));
        assert_eq!(ct.effective_rate, dec!(0.25));
    }

    #[test]
    fn marginal_relief_band() {
        let ct = compute_corporation_tax(dec!(100000)).unwrap();
        // 25,000 - 3/200 * 150,000
        assert_eq!(ct.marginal_relief, dec!(2250));
        assert_eq!(ct.tax, dec!(22750));
        assert_eq!(ct.effective_rate, dec!(0.2275));
    }

    #[test]
    fn marginal_relief_meets_both_rates() {
        // Just above the lower limit the charge is continuous with 19%
        let ct = compute_corporation_tax(dec!(50001)).unwrap();
        assert_eq!(ct.tax, dec!(9500.27));

        // No relief left at the upper limit
        let ct = compute_corporation_tax(dec!(250000)).unwrap();
        assert_eq!(ct.marginal_relief, dec!(0));
        assert_eq!(ct.tax, dec!(62500));
    }

    #[test]
    fn zero_profit() {
        let ct = compute_corporation_tax(Decimal::ZERO).unwrap();
        assert_eq!(ct.tax, Decimal::ZERO);
        assert_eq!(ct.effective_rate, Decimal::ZERO);
    }

    #[test]
    fn losses_rejected() {
        assert!(matches!(
            compute_corporation_tax(dec!(-500)),
            Err(TaxError::InvalidInput {
                field: "taxable_profit",
                ..
            })
        ));
    }
}
