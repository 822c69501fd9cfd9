//! Stateless UK tax calculators.

pub mod corporation;
pub mod income;
pub mod payments;
pub mod uk;

pub use corporation::{compute_corporation_tax, compute_corporation_tax_with_rates, CorporationTax};
pub use income::{compute_income_tax_and_ni, compute_income_tax_and_ni_with_rates, BandCharge, IncomeTaxAndNi};
pub use payments::{compute_payment_schedule, PaymentSchedule};
pub use uk::{TaxBand, TaxRates, TaxYear};

use rust_decimal::{Decimal, RoundingStrategy};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("invalid input: {field} must not be negative, got {value}")]
    InvalidInput { field: &'static str, value: Decimal },
}

fn require_non_negative(field: &'static str, value: Decimal) -> Result<(), TaxError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(TaxError::InvalidInput { field, value });
    }
    Ok(())
}

/// Rounds to `dp` places with halves going up
pub(crate) fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Portion of `amount` falling between `lower` and `upper` (unbounded when `None`)
pub(crate) fn slice(amount: Decimal, lower: Decimal, upper: Option<Decimal>) -> Decimal {
    let top = upper.map_or(amount, |u| amount.min(u));
    (top - lower).max(Decimal::ZERO)
}
