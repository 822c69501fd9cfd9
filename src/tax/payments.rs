use super::uk::TaxYear;
use super::{require_non_negative, round_half_up, TaxError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Two payments on account, each half the liability rounded to whole pounds.
/// They are not adjusted to re-sum to the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSchedule {
    pub total_due: Decimal,
    pub first_payment_on_account: Decimal,
    pub second_payment_on_account: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_due: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_due: Option<NaiveDate>,
}

pub fn compute_payment_schedule(
    total_due: Decimal,
    tax_year: Option<TaxYear>,
) -> Result<PaymentSchedule, TaxError> {
    require_non_negative("total_due", total_due)?;

    let payment = round_half_up(total_due / Decimal::TWO, 0);
    Ok(PaymentSchedule {
        total_due,
        first_payment_on_account: payment,
        second_payment_on_account: payment,
        first_due: tax_year.and_then(|ty| ty.first_payment_due()),
        second_due: tax_year.and_then(|ty| ty.second_payment_due()),
    })
}
