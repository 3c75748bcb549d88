//! Account snapshot model.
//!
//! An [`Account`] is an immutable value. Balance changes produce a new
//! snapshot; a caller holding an older one keeps seeing the older balance.

use crate::amount::Amount;
use crate::error::{LedgerError, Result};
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// Non-empty account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an identifier, failing with [`LedgerError::EmptyAccountId`] for `""`.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(LedgerError::EmptyAccountId);
        }
        Ok(AccountId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Lets the store look entries up by `&str` without allocating.
impl Borrow<str> for AccountId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Balance state of one account at one instant.
///
/// # Invariants
///
/// - `balance >= 0`, enforced by [`Amount`]
/// - The id never changes across snapshots of the same account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    #[serde(rename = "account")]
    id: AccountId,

    balance: Amount,
}

impl Account {
    pub fn new(id: AccountId, balance: Amount) -> Self {
        Account { id, balance }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Returns the snapshot after debiting `amount`.
    ///
    /// The remaining balance must be strictly greater than zero: debiting the
    /// whole balance fails with [`LedgerError::InsufficientFunds`]. A remainder
    /// `Decimal` cannot hold exactly fails with [`LedgerError::AmountOverflow`].
    pub fn debited(&self, amount: Amount) -> Result<Account> {
        if amount >= self.balance {
            return Err(LedgerError::InsufficientFunds {
                account_id: self.id.to_string(),
            });
        }
        let balance =
            self.balance
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::AmountOverflow {
                    account_id: self.id.to_string(),
                })?;
        Ok(Account {
            id: self.id.clone(),
            balance,
        })
    }

    /// Returns the snapshot after crediting `amount`.
    pub fn credited(&self, amount: Amount) -> Result<Account> {
        let balance =
            self.balance
                .checked_add(amount)
                .ok_or_else(|| LedgerError::AmountOverflow {
                    account_id: self.id.to_string(),
                })?;
        Ok(Account {
            id: self.id.clone(),
            balance,
        })
    }
}
