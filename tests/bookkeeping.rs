//! Ledger-wide properties exercised through the public API

use booktax::ledger::{
    AccountType, EntryInput, EntryStatus, ErrorKind, Ledger, LedgerError, LineInput,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::thread;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
}

fn books() -> Ledger {
    let ledger = Ledger::new();
    for (code, name, account_type) in [
        ("1000", "Cash", AccountType::Asset),
        ("1200", "Accounts Receivable", AccountType::Asset),
        ("2000", "Accounts Payable", AccountType::Liability),
        ("3000", "Owner's Capital", AccountType::Equity),
        ("4000", "Sales Revenue", AccountType::Revenue),
        ("6000", "Operating Expenses", AccountType::Expense),
    ] {
        ledger
            .create_account(code, name, account_type, Decimal::ZERO)
            .unwrap();
    }
    ledger
}

fn entry(day: u32, description: &str, debit: &str, credit: &str, amount: Decimal) -> EntryInput {
    EntryInput::new(
        date(day),
        description,
        LineInput::new(debit, amount),
        LineInput::new(credit, amount),
    )
}

#[test]
fn posted_entries_keep_books_balanced() {
    let ledger = books();
    let postings = [
        entry(1, "Capital introduced", "1000", "3000", dec!(20000)),
        entry(2, "Invoice", "1200", "4000", dec!(4800.50)),
        entry(3, "Rent", "6000", "1000", dec!(1250)),
        entry(4, "Supplier bill", "6000", "2000", dec!(320.25)),
        entry(5, "Customer pays", "1000", "1200", dec!(4800.50)),
        entry(6, "Pay supplier", "2000", "1000", dec!(320.25)),
    ];
    for input in &postings {
        let posted = ledger.post_entry(input).unwrap();
        assert_eq!(posted.debit().amount, posted.credit().amount);
        assert!(ledger.trial_balance().is_balanced);
    }

    let report = ledger.trial_balance();
    assert_eq!(report.total_debits, report.total_credits);
    assert_eq!(report.total_debits, dec!(24800.50));
    assert_eq!(ledger.account("1000").unwrap().balance(), dec!(23230.25));
    assert_eq!(ledger.account("2000").unwrap().balance(), dec!(0));
}

#[test]
fn trial_balance_is_repeatable() {
    let ledger = books();
    ledger
        .post_entry(&entry(1, "Capital introduced", "1000", "3000", dec!(500)))
        .unwrap();
    assert_eq!(ledger.trial_balance(), ledger.trial_balance());
}

#[test]
fn imbalanced_entry_rejected() {
    let ledger = books();
    let input = EntryInput::new(
        date(1),
        "Cash sale",
        LineInput::new("1000", dec!(100)),
        LineInput::new("4000", dec!(99.99)),
    );
    let err = ledger.post_entry(&input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ImbalancedEntry);
    assert!(ledger.entries(None).is_empty());
}

#[test]
fn unknown_account_rejected_without_partial_posting() {
    let ledger = books();
    let before = ledger.snapshot();

    let err = ledger
        .post_entry(&entry(1, "Sale", "1000", "acc-404", dec!(75)))
        .unwrap_err();
    assert_eq!(err, LedgerError::AccountNotFound("acc-404".to_string()));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let after = ledger.snapshot();
    for account in before.registry.list_accounts(None) {
        let now = after.registry.get_account(&account.code).unwrap();
        assert_eq!(now.balance(), account.balance());
        assert_eq!(now.last_transaction_at(), None);
    }
}

#[test]
fn posted_history_is_corrected_by_reversal() {
    let ledger = books();
    let wrong = ledger
        .post_entry(&entry(1, "Rent booked to wrong account", "6000", "2000", dec!(900)))
        .unwrap();

    let edit = entry(1, "Rent", "6000", "1000", dec!(900));
    assert_eq!(
        ledger.update_entry(wrong.id, &edit).unwrap_err().kind(),
        ErrorKind::ImmutableEntry
    );
    assert_eq!(
        ledger.delete_entry(wrong.id).unwrap_err(),
        LedgerError::ImmutableEntry(wrong.id)
    );

    ledger.reverse_entry(wrong.id, date(2)).unwrap();
    ledger.post_entry(&edit).unwrap();

    assert_eq!(ledger.account("2000").unwrap().balance(), dec!(0));
    assert_eq!(ledger.account("1000").unwrap().balance(), dec!(-900));
    assert_eq!(ledger.account("6000").unwrap().balance(), dec!(900));
    assert_eq!(ledger.entries(Some(EntryStatus::Posted)).len(), 3);
    assert!(ledger.trial_balance().is_balanced);
}

#[test]
fn concurrent_readers_see_whole_entries() {
    let ledger = Arc::new(books());
    let writer = {
        let ledger = Arc::clone(&ledger);
        thread::spawn(move || {
            for day in 1..=28 {
                for _ in 0..20 {
                    ledger
                        .post_entry(&entry(day, "Sale", "1200", "4000", dec!(19.99)))
                        .unwrap();
                }
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                for _ in 0..200 {
                    let report = ledger.trial_balance();
                    assert!(report.is_balanced, "observed half an entry: {:?}", report);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(ledger.account("4000").unwrap().balance(), dec!(11194.40));
}

#[test]
fn overflowing_entry_is_not_half_posted() {
    let ledger = books();
    ledger
        .create_account("4100", "Other income", AccountType::Revenue, Decimal::MAX - dec!(1))
        .unwrap();
    let before = ledger.trial_balance();

    let err = ledger
        .post_entry(&entry(1, "Sale", "1000", "4100", dec!(100)))
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::AmountOverflow {
            account: "4100".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert_eq!(ledger.account("1000").unwrap().balance(), dec!(0));
    assert!(ledger.entries(None).is_empty());
    assert_eq!(ledger.trial_balance(), before);
}
