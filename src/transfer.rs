//! Transfer orchestration.
//!
//! A transfer is a debit on the source followed by a credit on the
//! destination. The store has no cross-account transaction, so a failed credit
//! is undone by crediting the amount back to the source.

use crate::account::Account;
use crate::amount::Amount;
use crate::error::{LedgerError, Result};
use crate::notification::NotificationSink;
use crate::store::AccountStore;
use log::{error, info, warn};
use rust_decimal::Decimal;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Inbound transfer call as supplied by a front end, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(
        from_account_id: impl Into<String>,
        to_account_id: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        TransferRequest {
            from_account_id: from_account_id.into(),
            to_account_id: to_account_id.into(),
            amount,
        }
    }

    /// Checks both ids are non-empty and the amount is not negative.
    ///
    /// Returns the validated amount.
    pub fn validate(&self) -> Result<Amount> {
        if self.from_account_id.is_empty() {
            return Err(LedgerError::InvalidRequest(
                "source account id must not be empty".to_string(),
            ));
        }
        if self.to_account_id.is_empty() {
            return Err(LedgerError::InvalidRequest(
                "destination account id must not be empty".to_string(),
            ));
        }
        Amount::new(self.amount).map_err(|_| {
            LedgerError::InvalidRequest("Transfer amount must be positive".to_string())
        })
    }
}

/// Post-transfer snapshots of both parties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub from: Account,
    pub to: Account,
}

/// Moves funds between accounts of an injected [`AccountStore`].
///
/// Cheap to share: wrap it in an `Arc` and call [`TransferService::transfer`]
/// from any number of threads.
pub struct TransferService {
    store: Arc<dyn AccountStore>,
    notifier: Arc<dyn NotificationSink>,
}

impl TransferService {
    pub fn new(store: Arc<dyn AccountStore>, notifier: Arc<dyn NotificationSink>) -> Self {
        TransferService { store, notifier }
    }

    /// The store this service operates on.
    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    pub fn create_account(&self, account: Account) -> Result<()> {
        self.store.create_account(account)
    }

    pub fn get_account(&self, account_id: &str) -> Result<Account> {
        self.store.get_account(account_id)
    }

    /// Validates a request and executes it.
    pub fn execute(&self, request: &TransferRequest) -> Result<TransferReceipt> {
        let amount = request.validate()?;
        info!("Executing transfer {:?}", request);
        self.transfer(&request.from_account_id, &request.to_account_id, amount)
    }

    /// Moves `amount` from `from_id` to `to_id`.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` / `InsufficientFunds` from the debit; nothing changed.
    /// - `CreditFailed` when the destination credit failed; the debit has been reversed.
    /// - `CompensationFailed` when reversing the debit also failed. This is fatal:
    ///   the debited amount is no longer in the ledger.
    pub fn transfer(
        &self,
        from_id: &str,
        to_id: &str,
        amount: Amount,
    ) -> Result<TransferReceipt> {
        let from = self.store.debit(from_id, amount)?;
        let to = self.credit_or_compensate(from_id, to_id, amount)?;

        self.notify(
            &from,
            &format!("Transferred amount {} to account {}", amount, to_id),
        );
        self.notify(
            &to,
            &format!("Received amount {} from account {}", amount, from_id),
        );

        Ok(TransferReceipt { from, to })
    }

    fn credit_or_compensate(
        &self,
        from_id: &str,
        to_id: &str,
        amount: Amount,
    ) -> Result<Account> {
        match self.store.credit(to_id, amount) {
            Ok(to) => Ok(to),
            Err(cause) => {
                warn!(
                    "Could not credit {} to account {} ({}). Reverting debit on account {}",
                    amount, to_id, cause, from_id
                );
                self.compensate(from_id, amount)?;
                Err(LedgerError::CreditFailed {
                    account_id: to_id.to_string(),
                    source: Box::new(cause),
                })
            }
        }
    }

    fn compensate(&self, from_id: &str, amount: Amount) -> Result<()> {
        match self.store.credit(from_id, amount) {
            Ok(restored) => {
                info!(
                    "Reverted {} to account {}, balance {}",
                    amount,
                    from_id,
                    restored.balance()
                );
                Ok(())
            }
            Err(cause) => {
                error!(
                    "Compensating credit of {} to account {} failed: {}. \
                     Funds are missing from the ledger",
                    amount, from_id, cause
                );
                Err(LedgerError::CompensationFailed {
                    account_id: from_id.to_string(),
                    amount,
                    source: Box::new(cause),
                })
            }
        }
    }

    // The transfer is already committed here; neither an error nor a panic
    // from the sink may reach the caller.
    fn notify(&self, account: &Account, message: &str) {
        let sent = panic::catch_unwind(AssertUnwindSafe(|| {
            self.notifier.notify(account, message)
        }));
        match sent {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Ignoring failed notification: {}", e),
            Err(_) => warn!(
                "Ignoring notification sink panic for account {}",
                account.id()
            ),
        }
    }
}
