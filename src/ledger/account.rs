use super::error::LedgerError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Registry-assigned account identifier, displayed as `acc-<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub u32);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acc-{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("acc-").unwrap_or(s).parse().map(AccountId)
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Side of a posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Debit,
    Credit,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Debit => f.write_str("debit"),
            Side::Credit => f.write_str("credit"),
        }
    }
}

/// Account classification. Fixed for the life of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountType {
    /// The side on which this type of account accumulates value
    pub fn normal_balance(self) -> Side {
        match self {
            AccountType::Asset | AccountType::Expense => Side::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => Side::Credit,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for AccountType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" => Ok(AccountType::Asset),
            "liability" => Ok(AccountType::Liability),
            "equity" => Ok(AccountType::Equity),
            "revenue" => Ok(AccountType::Revenue),
            "expense" => Ok(AccountType::Expense),
            _ => Err(LedgerError::InvalidAccountType(s.to_string())),
        }
    }
}

/// Account as supplied by callers. The type arrives as text and is checked on creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AccountInput {
    /// Unique short code, e.g. "1000"
    pub code: String,
    pub name: String,
    /// One of Asset, Liability, Equity, Revenue, Expense (case-insensitive)
    pub account_type: String,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub opening_balance: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: AccountId,
    pub code: String,
    pub name: String,
    account_type: AccountType,
    /// Positive when the account sits on its normal side
    balance: Decimal,
    last_transaction_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn normal_balance(&self) -> Side {
        self.account_type.normal_balance()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn last_transaction_at(&self) -> Option<DateTime<Utc>> {
        self.last_transaction_at
    }

    /// Balance expressed as debits minus credits
    pub fn signed_debit_balance(&self) -> Decimal {
        match self.normal_balance() {
            Side::Debit => self.balance,
            Side::Credit => -self.balance,
        }
    }

    /// Balance after posting `amount` on `side`, or `None` if it would overflow
    fn balance_after(&self, side: Side, amount: Decimal) -> Option<Decimal> {
        if side == self.normal_balance() {
            self.balance.checked_add(amount)
        } else {
            self.balance.checked_sub(amount)
        }
    }
}

/// Chart of accounts. Codes are the true key; ids are assigned in creation order.
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: BTreeMap<AccountId, Account>,
    codes: BTreeMap<String, AccountId>,
    next_id: u32,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_account(
        &mut self,
        code: &str,
        name: &str,
        account_type: AccountType,
        opening_balance: Decimal,
    ) -> Result<Account, LedgerError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(LedgerError::MissingField { field: "code" });
        }
        if name.trim().is_empty() {
            return Err(LedgerError::MissingField { field: "name" });
        }
        if self.codes.contains_key(code) {
            return Err(LedgerError::DuplicateCode(code.to_string()));
        }

        self.next_id += 1;
        let account = Account {
            id: AccountId(self.next_id),
            code: code.to_string(),
            name: name.trim().to_string(),
            account_type,
            balance: opening_balance,
            last_transaction_at: None,
        };
        log::debug!(
            "Created account: id={} code={} type={}",
            account.id,
            account.code,
            account.account_type
        );
        self.codes.insert(account.code.clone(), account.id);
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    pub fn create_from_input(&mut self, input: &AccountInput) -> Result<Account, LedgerError> {
        let account_type = input.account_type.parse()?;
        self.create_account(
            &input.code,
            &input.name,
            account_type,
            input.opening_balance.unwrap_or(Decimal::ZERO),
        )
    }

    /// Look up by account id (`acc-3`) or by code (`1000`)
    pub fn get_account(&self, key: &str) -> Result<&Account, LedgerError> {
        let key = key.trim();
        let by_code = self.codes.get(key).and_then(|id| self.accounts.get(id));
        let by_id = || {
            let id = key.strip_prefix("acc-")?.parse().ok().map(AccountId)?;
            self.accounts.get(&id)
        };
        by_code
            .or_else(by_id)
            .ok_or_else(|| LedgerError::AccountNotFound(key.to_string()))
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Accounts ordered by code, optionally restricted to one type
    pub fn list_accounts(&self, filter: Option<AccountType>) -> Vec<&Account> {
        self.codes
            .values()
            .filter_map(|id| self.accounts.get(id))
            .filter(|a| filter.is_none_or(|t| a.account_type == t))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Applies both sides of a validated entry. Both new balances are worked out
    /// before either account changes.
    pub(crate) fn apply_posting(
        &mut self,
        debit: (AccountId, Decimal),
        credit: (AccountId, Decimal),
        at: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let mut updates = Vec::with_capacity(2);
        for (side, (id, amount)) in [(Side::Debit, debit), (Side::Credit, credit)] {
            let account = self
                .accounts
                .get(&id)
                .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))?;
            let balance = account
                .balance_after(side, amount)
                .ok_or_else(|| LedgerError::AmountOverflow {
                    account: account.code.clone(),
                })?;
            updates.push((id, balance));
        }
        for (id, balance) in updates {
            if let Some(account) = self.accounts.get_mut(&id) {
                account.balance = balance;
                account.last_transaction_at = Some(at);
            }
        }
        Ok(())
    }
}
