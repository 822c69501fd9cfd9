use super::account::{AccountId, Side};
use super::journal::{EntryId, EntryStatus};
use rust_decimal::Decimal;

/// Broad classification of ledger failures, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    ImbalancedEntry,
    NotFound,
    DuplicateCode,
    ImmutableEntry,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("missing field: {field}")]
    MissingField { field: &'static str },
    #[error("non-positive amount: {side}.amount must be greater than zero, got {amount}")]
    NonPositiveAmount { side: Side, amount: Decimal },
    #[error("imbalanced entry: debit amount {debit} does not equal credit amount {credit}")]
    ImbalancedEntry { debit: Decimal, credit: Decimal },
    #[error("account not found: {0}")]
    AccountNotFound(String),
    #[error("journal entry not found: {0}")]
    EntryNotFound(EntryId),
    #[error("duplicate account code: {0}")]
    DuplicateCode(String),
    #[error("invalid account type '{0}' (expected Asset, Liability, Equity, Revenue or Expense)")]
    InvalidAccountType(String),
    #[error("entry debits and credits the same account: {account}")]
    SelfPosting { account: AccountId },
    #[error("journal entry {0} is posted and can no longer be changed")]
    ImmutableEntry(EntryId),
    #[error("entries cannot be created as {0:?}, post them instead")]
    InvalidStatus(EntryStatus),
    #[error("journal entry {0} is not posted")]
    NotPosted(EntryId),
    #[error("journal entry {0} has already been reversed")]
    AlreadyReversed(EntryId),
    #[error("amount overflow: balance of account {account} is out of range")]
    AmountOverflow { account: String },
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::MissingField { .. }
            | LedgerError::NonPositiveAmount { .. }
            | LedgerError::InvalidAccountType(_)
            | LedgerError::SelfPosting { .. }
            | LedgerError::InvalidStatus(_)
            | LedgerError::NotPosted(_)
            | LedgerError::AlreadyReversed(_)
            | LedgerError::AmountOverflow { .. } => ErrorKind::Validation,
            LedgerError::ImbalancedEntry { .. } => ErrorKind::ImbalancedEntry,
            LedgerError::AccountNotFound(_) | LedgerError::EntryNotFound(_) => ErrorKind::NotFound,
            LedgerError::DuplicateCode(_) => ErrorKind::DuplicateCode,
            LedgerError::ImmutableEntry(_) => ErrorKind::ImmutableEntry,
        }
    }
}
