use super::account::{AccountId, AccountRegistry, AccountType, Side};
use rust_decimal::Decimal;
use serde::Serialize;

/// One account's balance placed in its natural column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceRow {
    pub account_id: AccountId,
    pub account_code: String,
    pub account_name: String,
    pub account_type: AccountType,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceReport {
    pub rows: Vec<TrialBalanceRow>,
    pub total_debits: Decimal,
    pub total_credits: Decimal,
    /// `total_debits - total_credits`
    pub difference: Decimal,
    pub is_balanced: bool,
    /// Set when a total left the representable range. The totals and difference
    /// are then clamped to `Decimal::MAX`/`Decimal::MIN` and the report is unbalanced.
    pub totals_overflowed: bool,
}

/// Projects current account balances into debit and credit columns.
///
/// An unbalanced book is reported, not rejected: callers need the rows to find
/// the discrepancy.
pub fn compute_trial_balance(registry: &AccountRegistry) -> TrialBalanceReport {
    let rows: Vec<TrialBalanceRow> = registry
        .list_accounts(None)
        .into_iter()
        .map(|account| {
            let (debit, credit) = match account.normal_balance() {
                Side::Debit => (Some(account.balance()), None),
                Side::Credit => (None, Some(account.balance())),
            };
            TrialBalanceRow {
                account_id: account.id,
                account_code: account.code.clone(),
                account_name: account.name.clone(),
                account_type: account.account_type(),
                debit,
                credit,
            }
        })
        .collect();

    let debits = checked_total(rows.iter().filter_map(|r| r.debit));
    let credits = checked_total(rows.iter().filter_map(|r| r.credit));
    let exact_difference = debits
        .zip(credits)
        .and_then(|(debits, credits)| debits.checked_sub(credits));

    let total_debits =
        debits.unwrap_or_else(|| saturated_total(rows.iter().filter_map(|r| r.debit)));
    let total_credits =
        credits.unwrap_or_else(|| saturated_total(rows.iter().filter_map(|r| r.credit)));
    let totals_overflowed = exact_difference.is_none();
    let difference =
        exact_difference.unwrap_or_else(|| total_debits.saturating_sub(total_credits));
    let is_balanced = !totals_overflowed && difference.is_zero();

    if totals_overflowed {
        log::warn!("Trial balance totals overflowed, figures are clamped");
    }
    if !is_balanced {
        log::warn!(
            "Trial balance does not balance: debits={} credits={} difference={}",
            total_debits,
            total_credits,
            difference
        );
    }

    TrialBalanceReport {
        rows,
        total_debits,
        total_credits,
        difference,
        is_balanced,
        totals_overflowed,
    }
}

fn checked_total(mut amounts: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    amounts.try_fold(Decimal::ZERO, Decimal::checked_add)
}

fn saturated_total(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}
