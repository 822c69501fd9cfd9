use super::account::{Account, AccountInput, AccountRegistry, AccountType};
use super::error::LedgerError;
use super::journal::{EntryId, EntryInput, EntryStatus, Journal, JournalEntry};
use super::trial_balance::{compute_trial_balance, TrialBalanceReport};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Registry and journal together, as guarded by a [`Ledger`]
#[derive(Debug, Clone, Default)]
pub struct Books {
    pub registry: AccountRegistry,
    pub journal: Journal,
}

/// Shareable handle over a set of books.
///
/// Every mutation takes the single write lock for its whole validate-then-apply
/// sequence, so readers never observe one side of an entry without the other.
#[derive(Debug, Default)]
pub struct Ledger {
    books: RwLock<Books>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_books(books: Books) -> Self {
        Ledger {
            books: RwLock::new(books),
        }
    }

    // Balances only change inside `AccountRegistry::apply_posting`, after both
    // new balances have been computed without overflow. Nothing that runs under
    // the write guard panics mid-entry, so a poisoned guard holds whole entries.
    fn read(&self) -> RwLockReadGuard<'_, Books> {
        self.books.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Books> {
        self.books.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create_account(
        &self,
        code: &str,
        name: &str,
        account_type: AccountType,
        opening_balance: Decimal,
    ) -> Result<Account, LedgerError> {
        self.write()
            .registry
            .create_account(code, name, account_type, opening_balance)
    }

    pub fn add_account(&self, input: &AccountInput) -> Result<Account, LedgerError> {
        self.write().registry.create_from_input(input)
    }

    pub fn account(&self, key: &str) -> Result<Account, LedgerError> {
        self.read().registry.get_account(key).cloned()
    }

    pub fn list_accounts(&self, filter: Option<AccountType>) -> Vec<Account> {
        self.read()
            .registry
            .list_accounts(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn post_entry(&self, input: &EntryInput) -> Result<JournalEntry, LedgerError> {
        let mut books = self.write();
        let Books { registry, journal } = &mut *books;
        journal.post_entry(registry, input)
    }

    pub fn create_entry(
        &self,
        input: &EntryInput,
        status: EntryStatus,
    ) -> Result<JournalEntry, LedgerError> {
        let mut books = self.write();
        let Books { registry, journal } = &mut *books;
        journal.create_entry(registry, input, status)
    }

    pub fn record(&self, input: &EntryInput) -> Result<JournalEntry, LedgerError> {
        let mut books = self.write();
        let Books { registry, journal } = &mut *books;
        journal.record(registry, input)
    }

    pub fn update_entry(
        &self,
        id: EntryId,
        input: &EntryInput,
    ) -> Result<JournalEntry, LedgerError> {
        let mut books = self.write();
        let Books { registry, journal } = &mut *books;
        journal.update_entry(registry, id, input)
    }

    pub fn delete_entry(&self, id: EntryId) -> Result<JournalEntry, LedgerError> {
        self.write().journal.delete_entry(id)
    }

    pub fn post_draft(&self, id: EntryId) -> Result<JournalEntry, LedgerError> {
        let mut books = self.write();
        let Books { registry, journal } = &mut *books;
        journal.post_draft(registry, id)
    }

    pub fn reverse_entry(&self, id: EntryId, date: NaiveDate) -> Result<JournalEntry, LedgerError> {
        let mut books = self.write();
        let Books { registry, journal } = &mut *books;
        journal.reverse_entry(registry, id, date)
    }

    pub fn entry(&self, id: EntryId) -> Result<JournalEntry, LedgerError> {
        self.read().journal.entry(id).cloned()
    }

    pub fn entries(&self, status: Option<EntryStatus>) -> Vec<JournalEntry> {
        self.read()
            .journal
            .entries(status)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn trial_balance(&self) -> TrialBalanceReport {
        compute_trial_balance(&self.read().registry)
    }

    /// Point-in-time copy of the books
    pub fn snapshot(&self) -> Books {
        self.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LineInput;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::thread;

    fn ledger() -> Ledger {
        let ledger = Ledger::new();
        ledger
            .create_account("1000", "Cash", AccountType::Asset, dec!(0))
            .unwrap();
        ledger
            .create_account("4000", "Sales", AccountType::Revenue, dec!(0))
            .unwrap();
        ledger
            .create_account("6000", "Rent", AccountType::Expense, dec!(0))
            .unwrap();
        ledger
    }

    fn sale(amount: Decimal) -> EntryInput {
        EntryInput::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            "Sale",
            LineInput::new("1000", amount),
            LineInput::new("4000", amount),
        )
    }

    #[test]
    fn ledger_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Ledger>();
    }

    #[test]
    fn concurrent_postings_all_apply() {
        let ledger = Arc::new(ledger());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    for _ in 0..50 {
                        ledger.post_entry(&sale(dec!(10.01))).unwrap();
                        let report = ledger.trial_balance();
                        assert!(report.is_balanced);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.account("1000").unwrap().balance(), dec!(4004));
        assert_eq!(ledger.account("4000").unwrap().balance(), dec!(4004));
        assert_eq!(ledger.entries(Some(EntryStatus::Posted)).len(), 400);
    }

    #[test]
    fn failed_post_leaves_snapshot_unchanged() {
        let ledger = ledger();
        ledger.post_entry(&sale(dec!(100))).unwrap();
        let before = ledger.trial_balance();

        let mut bad = sale(dec!(100));
        bad.credit.account = "acc-99".to_string();
        assert_eq!(
            ledger.post_entry(&bad).unwrap_err(),
            LedgerError::AccountNotFound("acc-99".to_string())
        );
        assert_eq!(ledger.trial_balance(), before);
    }

    #[test]
    fn draft_lifecycle_through_handle() {
        let ledger = ledger();
        let rent = EntryInput::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            "June rent",
            LineInput::new("6000", dec!(900)),
            LineInput::new("1000", dec!(900)),
        );
        let draft = ledger.create_entry(&rent, EntryStatus::Pending).unwrap();
        assert_eq!(ledger.account("6000").unwrap().balance(), dec!(0));

        ledger.post_draft(draft.id).unwrap();
        assert_eq!(ledger.account("6000").unwrap().balance(), dec!(900));
        assert_eq!(
            ledger.delete_entry(draft.id).unwrap_err(),
            LedgerError::ImmutableEntry(draft.id)
        );

        let reversal = ledger
            .reverse_entry(draft.id, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap())
            .unwrap();
        assert_eq!(ledger.entry(reversal.id).unwrap().reversal_of(), Some(draft.id));
        assert_eq!(ledger.account("6000").unwrap().balance(), dec!(0));
        assert!(ledger.trial_balance().is_balanced);
    }
}
