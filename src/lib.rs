//! Bookkeeping and tax computation core.
//!
//! - [`ledger`]: chart of accounts, double-entry journal and trial balance
//! - [`tax`]: Income Tax, Class 4 NI, Corporation Tax and payments on account
//! - [`export`]: flat records for CSV export

pub mod export;
pub mod ledger;
pub mod tax;
