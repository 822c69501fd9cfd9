//! Double-entry bookkeeping: chart of accounts, journal posting and trial balance.

pub mod account;
pub mod error;
pub mod handle;
pub mod input;
pub mod journal;
pub mod trial_balance;

pub use account::{Account, AccountId, AccountInput, AccountRegistry, AccountType, Side};
pub use error::{ErrorKind, LedgerError};
pub use handle::{Books, Ledger};
pub use input::{load_ledger, read_entries_csv, read_ledger_json, EntryRecord, LedgerFile, Rejection};
pub use journal::{
    validate_entry, EntryId, EntryInput, EntryStatus, Journal, JournalEntry, Line, LineInput,
    ValidEntry,
};
pub use trial_balance::{compute_trial_balance, TrialBalanceReport, TrialBalanceRow};
