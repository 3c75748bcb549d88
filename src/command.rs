//! Ledger commands as read from CSV.

use crate::account::{Account, AccountId};
use crate::amount::{self, Amount};
use crate::error::{LedgerError, Result};
use crate::transfer::TransferRequest;
use serde::Deserialize;
use std::str::FromStr;

/// Raw command record as read from CSV.
///
/// `to` is only meaningful for transfers; `amount` is the opening balance for
/// `open` and the transferred amount for `transfer`.
#[derive(Debug, Deserialize)]
pub struct CommandRecord {
    /// Command type: open, transfer
    #[serde(rename = "type")]
    pub kind: String,

    /// Account being opened, or the transfer source
    pub account: String,

    /// Transfer destination
    pub to: Option<String>,

    pub amount: Option<String>,
}

impl CommandRecord {
    /// Parses the raw CSV record into a typed command.
    ///
    /// Transfer requests are returned unvalidated; the transfer service
    /// validates them before execution.
    pub fn parse(&self) -> Result<LedgerCommand> {
        let kind = self.kind.trim().to_lowercase();

        match kind.as_str() {
            "open" => {
                let account_id = AccountId::new(self.account.trim())?;
                let balance = Amount::from_str(self.amount_str()?)?;
                Ok(LedgerCommand::Open(Account::new(account_id, balance)))
            }
            "transfer" => {
                let to = self
                    .to
                    .as_deref()
                    .map(str::trim)
                    .filter(|to| !to.is_empty())
                    .ok_or_else(|| {
                        LedgerError::InvalidRecord("transfer without destination".to_string())
                    })?;
                let amount = amount::parse_exact(self.amount_str()?)?;
                Ok(LedgerCommand::Transfer(TransferRequest::new(
                    self.account.trim(),
                    to,
                    amount,
                )))
            }
            other => Err(LedgerError::InvalidRecord(format!(
                "unknown command type '{}'",
                other
            ))),
        }
    }

    fn amount_str(&self) -> Result<&str> {
        self.amount
            .as_deref()
            .map(str::trim)
            .filter(|amount| !amount.is_empty())
            .ok_or_else(|| LedgerError::InvalidRecord("missing amount".to_string()))
    }
}

/// A parsed command ready for execution.
#[derive(Debug, Clone)]
pub enum LedgerCommand {
    /// Create an account with an opening balance.
    Open(Account),

    /// Move funds between two existing accounts.
    Transfer(TransferRequest),
}
