use super::account::{AccountId, AccountRegistry, Side};
use super::error::LedgerError;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Journal-assigned entry identifier, displayed as `je-<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u32);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "je-{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("je-").unwrap_or(s).parse().map(EntryId)
    }
}

impl Serialize for EntryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Only `Posted` entries move account balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EntryStatus {
    Draft,
    Pending,
    Posted,
}

/// One side of a proposed entry. Fields are optional so that incomplete input
/// can be reported field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LineInput {
    /// Account id (`acc-1`) or account code (`1000`)
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub amount: Option<Decimal>,
}

impl LineInput {
    pub fn new(account: &str, amount: Decimal) -> Self {
        LineInput {
            account: account.to_string(),
            amount: Some(amount),
        }
    }
}

/// A proposed journal entry, as typed by a user or read from a file
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EntryInput {
    #[schemars(with = "String")]
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reference: Option<String>,
    /// Status to record the entry with (default: Posted)
    #[serde(default)]
    pub status: Option<EntryStatus>,
    #[serde(default)]
    pub debit: LineInput,
    #[serde(default)]
    pub credit: LineInput,
}

impl EntryInput {
    pub fn new(date: NaiveDate, description: &str, debit: LineInput, credit: LineInput) -> Self {
        EntryInput {
            date,
            description: description.to_string(),
            reference: None,
            status: None,
            debit,
            credit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Line {
    pub account: AccountId,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub description: String,
    pub reference: Option<String>,
    debit: Line,
    credit: Line,
    status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reversal_of: Option<EntryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reversed_by: Option<EntryId>,
}

impl JournalEntry {
    pub fn debit(&self) -> Line {
        self.debit
    }

    pub fn credit(&self) -> Line {
        self.credit
    }

    pub fn amount(&self) -> Decimal {
        self.debit.amount
    }

    pub fn status(&self) -> EntryStatus {
        self.status
    }

    pub fn is_posted(&self) -> bool {
        self.status == EntryStatus::Posted
    }

    pub fn reversal_of(&self) -> Option<EntryId> {
        self.reversal_of
    }

    pub fn reversed_by(&self) -> Option<EntryId> {
        self.reversed_by
    }
}

/// Entry fields that passed validation against a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEntry {
    pub date: NaiveDate,
    pub description: String,
    pub reference: Option<String>,
    pub debit: Line,
    pub credit: Line,
}

/// Checks a proposed entry without mutating anything.
///
/// Checks run in a fixed order: required fields, positive amounts, debit equals
/// credit (exact decimal equality), both accounts exist, distinct accounts.
pub fn validate_entry(
    input: &EntryInput,
    registry: &AccountRegistry,
) -> Result<ValidEntry, LedgerError> {
    let description = input.description.trim();
    if description.is_empty() {
        return Err(LedgerError::MissingField {
            field: "description",
        });
    }
    if input.debit.account.trim().is_empty() {
        return Err(LedgerError::MissingField {
            field: "debit.account",
        });
    }
    if input.credit.account.trim().is_empty() {
        return Err(LedgerError::MissingField {
            field: "credit.account",
        });
    }
    let debit_amount = input.debit.amount.ok_or(LedgerError::MissingField {
        field: "debit.amount",
    })?;
    let credit_amount = input.credit.amount.ok_or(LedgerError::MissingField {
        field: "credit.amount",
    })?;

    for (side, amount) in [(Side::Debit, debit_amount), (Side::Credit, credit_amount)] {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount { side, amount });
        }
    }

    if debit_amount != credit_amount {
        return Err(LedgerError::ImbalancedEntry {
            debit: debit_amount,
            credit: credit_amount,
        });
    }

    let debit_account = registry.get_account(&input.debit.account)?.id;
    let credit_account = registry.get_account(&input.credit.account)?.id;
    if debit_account == credit_account {
        return Err(LedgerError::SelfPosting {
            account: debit_account,
        });
    }

    Ok(ValidEntry {
        date: input.date,
        description: description.to_string(),
        reference: input
            .reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string),
        debit: Line {
            account: debit_account,
            amount: debit_amount,
        },
        credit: Line {
            account: credit_account,
            amount: credit_amount,
        },
    })
}

/// Journal of entries. Posting is the only way an entry reaches `Posted`, and the
/// registry whose balances it moves is passed in explicitly.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: BTreeMap<EntryId, JournalEntry>,
    next_id: u32,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and posts an entry, moving both account balances together
    pub fn post_entry(
        &mut self,
        registry: &mut AccountRegistry,
        input: &EntryInput,
    ) -> Result<JournalEntry, LedgerError> {
        let valid = validate_entry(input, registry)?;
        self.post_valid(registry, valid, None)
    }

    /// Records a validated `Draft` or `Pending` entry without touching balances
    pub fn create_entry(
        &mut self,
        registry: &AccountRegistry,
        input: &EntryInput,
        status: EntryStatus,
    ) -> Result<JournalEntry, LedgerError> {
        if status == EntryStatus::Posted {
            return Err(LedgerError::InvalidStatus(status));
        }
        let valid = validate_entry(input, registry)?;
        let entry = self.insert(valid, status, None);
        log::debug!("Recorded {:?} entry {}", status, entry.id);
        Ok(entry)
    }

    /// Records an entry with the status it asks for (posted unless stated otherwise)
    pub fn record(
        &mut self,
        registry: &mut AccountRegistry,
        input: &EntryInput,
    ) -> Result<JournalEntry, LedgerError> {
        match input.status.unwrap_or(EntryStatus::Posted) {
            EntryStatus::Posted => self.post_entry(registry, input),
            status => self.create_entry(registry, input, status),
        }
    }

    /// Replaces the contents of a draft or pending entry
    pub fn update_entry(
        &mut self,
        registry: &AccountRegistry,
        id: EntryId,
        input: &EntryInput,
    ) -> Result<JournalEntry, LedgerError> {
        let existing = self.mutable_entry(id)?;
        let status = match input.status {
            Some(EntryStatus::Posted) => return Err(LedgerError::InvalidStatus(EntryStatus::Posted)),
            Some(status) => status,
            None => existing.status,
        };
        let valid = validate_entry(input, registry)?;

        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(LedgerError::EntryNotFound(id))?;
        entry.date = valid.date;
        entry.description = valid.description;
        entry.reference = valid.reference;
        entry.debit = valid.debit;
        entry.credit = valid.credit;
        entry.status = status;
        Ok(entry.clone())
    }

    /// Removes a draft or pending entry. Posted entries are reversed instead.
    pub fn delete_entry(&mut self, id: EntryId) -> Result<JournalEntry, LedgerError> {
        self.mutable_entry(id)?;
        self.entries.remove(&id).ok_or(LedgerError::EntryNotFound(id))
    }

    /// Moves an existing draft or pending entry through the posting gate
    pub fn post_draft(
        &mut self,
        registry: &mut AccountRegistry,
        id: EntryId,
    ) -> Result<JournalEntry, LedgerError> {
        let entry = self.mutable_entry(id)?;
        let (debit, credit) = (entry.debit, entry.credit);
        registry.apply_posting(
            (debit.account, debit.amount),
            (credit.account, credit.amount),
            Utc::now(),
        )?;

        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(LedgerError::EntryNotFound(id))?;
        entry.status = EntryStatus::Posted;
        log::debug!("Posted entry {}: {} {}", id, entry.description, entry.amount());
        Ok(entry.clone())
    }

    /// Posts a new entry that undoes a posted one, swapping its debit and credit
    pub fn reverse_entry(
        &mut self,
        registry: &mut AccountRegistry,
        id: EntryId,
        date: NaiveDate,
    ) -> Result<JournalEntry, LedgerError> {
        let original = self.entry(id)?;
        if !original.is_posted() {
            return Err(LedgerError::NotPosted(id));
        }
        if original.reversed_by.is_some() {
            return Err(LedgerError::AlreadyReversed(id));
        }

        let valid = ValidEntry {
            date,
            description: format!("Reversal: {}", original.description),
            reference: Some(format!("reversal of {id}")),
            debit: original.credit,
            credit: original.debit,
        };
        let reversal = self.post_valid(registry, valid, Some(id))?;
        if let Some(original) = self.entries.get_mut(&id) {
            original.reversed_by = Some(reversal.id);
        }
        log::info!("Reversed entry {} with {}", id, reversal.id);
        Ok(reversal)
    }

    pub fn entry(&self, id: EntryId) -> Result<&JournalEntry, LedgerError> {
        self.entries.get(&id).ok_or(LedgerError::EntryNotFound(id))
    }

    /// Entries in id order, optionally restricted to one status
    pub fn entries(&self, status: Option<EntryStatus>) -> Vec<&JournalEntry> {
        self.entries
            .values()
            .filter(|e| status.is_none_or(|s| e.status == s))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn mutable_entry(&self, id: EntryId) -> Result<&JournalEntry, LedgerError> {
        let entry = self.entry(id)?;
        if entry.is_posted() {
            return Err(LedgerError::ImmutableEntry(id));
        }
        Ok(entry)
    }

    fn post_valid(
        &mut self,
        registry: &mut AccountRegistry,
        valid: ValidEntry,
        reversal_of: Option<EntryId>,
    ) -> Result<JournalEntry, LedgerError> {
        registry.apply_posting(
            (valid.debit.account, valid.debit.amount),
            (valid.credit.account, valid.credit.amount),
            Utc::now(),
        )?;
        let entry = self.insert(valid, EntryStatus::Posted, reversal_of);
        log::debug!("Posted entry {}: {} {}", entry.id, entry.description, entry.amount());
        Ok(entry)
    }

    fn insert(
        &mut self,
        valid: ValidEntry,
        status: EntryStatus,
        reversal_of: Option<EntryId>,
    ) -> JournalEntry {
        self.next_id += 1;
        let entry = JournalEntry {
            id: EntryId(self.next_id),
            date: valid.date,
            description: valid.description,
            reference: valid.reference,
            debit: valid.debit,
            credit: valid.credit,
            status,
            reversal_of,
            reversed_by: None,
        };
        self.entries.insert(entry.id, entry.clone());
        entry
    }
}
