//! Account storage with atomic per-account balance updates.
//!
//! Every mutation is a single read-modify-write on one keyed entry. Updates to
//! the same account serialize; updates to different accounts do not share a
//! lock beyond the map's internal sharding.

use crate::account::{Account, AccountId};
use crate::amount::Amount;
use crate::error::{LedgerError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::debug;

/// Authoritative mapping of account id to current snapshot.
///
/// Callers only ever receive cloned snapshots, never handles into the store.
pub trait AccountStore: Send + Sync {
    /// Inserts the account if its id is absent.
    ///
    /// Fails with [`LedgerError::DuplicateAccount`] otherwise, leaving the
    /// existing entry untouched.
    fn create_account(&self, account: Account) -> Result<()>;

    /// Returns the current snapshot.
    fn get_account(&self, account_id: &str) -> Result<Account>;

    /// Atomically subtracts `amount`, keeping the balance strictly positive.
    fn debit(&self, account_id: &str, amount: Amount) -> Result<Account>;

    /// Atomically adds `amount`.
    fn credit(&self, account_id: &str, amount: Amount) -> Result<Account>;

    /// Removes every account. Test isolation only.
    fn clear_all(&self);

    /// Snapshots of all accounts, sorted by id.
    fn accounts(&self) -> Vec<Account>;
}

/// In-memory [`AccountStore`] backed by a sharded concurrent map.
pub struct InMemoryAccountStore {
    accounts: DashMap<AccountId, Account>,
}

impl InMemoryAccountStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        InMemoryAccountStore {
            accounts: DashMap::new(),
        }
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Replaces the snapshot for `account_id` with `apply(current)`.
    ///
    /// The entry's write guard is held for the whole call, so `apply` sees the
    /// latest committed value and nobody observes the slot in between. On error
    /// the slot keeps its previous snapshot. `apply` must not touch the store.
    fn update<F>(&self, account_id: &str, apply: F) -> Result<Account>
    where
        F: FnOnce(&Account) -> Result<Account>,
    {
        let mut entry =
            self.accounts
                .get_mut(account_id)
                .ok_or_else(|| LedgerError::AccountNotFound {
                    account_id: account_id.to_string(),
                })?;

        let updated = apply(entry.value())?;
        *entry = updated.clone();
        Ok(updated)
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn create_account(&self, account: Account) -> Result<()> {
        match self.accounts.entry(account.id().clone()) {
            Entry::Occupied(existing) => Err(LedgerError::DuplicateAccount {
                account_id: existing.key().to_string(),
            }),
            Entry::Vacant(slot) => {
                debug!(
                    "Created account {} with balance {}",
                    account.id(),
                    account.balance()
                );
                slot.insert(account);
                Ok(())
            }
        }
    }

    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.accounts
            .get(account_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LedgerError::AccountNotFound {
                account_id: account_id.to_string(),
            })
    }

    fn debit(&self, account_id: &str, amount: Amount) -> Result<Account> {
        let updated = self.update(account_id, |current| current.debited(amount))?;
        debug!(
            "Debited {} from account {}, balance {}",
            amount,
            account_id,
            updated.balance()
        );
        Ok(updated)
    }

    fn credit(&self, account_id: &str, amount: Amount) -> Result<Account> {
        let updated = self.update(account_id, |current| current.credited(amount))?;
        debug!(
            "Credited {} to account {}, balance {}",
            amount,
            account_id,
            updated.balance()
        );
        Ok(updated)
    }

    fn clear_all(&self) {
        self.accounts.clear();
    }

    fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        accounts
    }
}
