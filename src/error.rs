//! Error types for the ledger.

use crate::amount::Amount;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur during ledger operation.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// An account with this id is already present
    #[error("Account id {account_id} already exists!")]
    DuplicateAccount { account_id: String },

    /// The referenced account does not exist
    #[error("AccountId {account_id} does not exist or is invalid")]
    AccountNotFound { account_id: String },

    /// The debit would not leave the balance strictly positive
    #[error("Overdrafts are not supported")]
    InsufficientFunds { account_id: String },

    /// The new balance would overflow or lose digits to rounding
    #[error("Balance of account {account_id} cannot be represented exactly")]
    AmountOverflow { account_id: String },

    /// The destination credit failed after the source was debited.
    ///
    /// The debit has already been reversed when this is returned.
    #[error("Could not credit amount to account {account_id}")]
    CreditFailed {
        account_id: String,
        #[source]
        source: Box<LedgerError>,
    },

    /// Reversing a debit failed. Funds have left the ledger and an operator must intervene.
    #[error(
        "Compensating credit of {amount} to account {account_id} failed, ledger is inconsistent"
    )]
    CompensationFailed {
        account_id: String,
        amount: Amount,
        #[source]
        source: Box<LedgerError>,
    },

    /// Negative value where an amount was expected
    #[error("Amount must not be negative: {0}")]
    NegativeAmount(String),

    /// Value that does not parse as a decimal
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    /// Empty account identifier
    #[error("Account id must not be empty")]
    EmptyAccountId,

    /// Transfer request failed validation
    #[error("Invalid transfer request: {0}")]
    InvalidRequest(String),

    /// Input record could not be turned into a command
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: funds-ledger <input.csv>")]
    MissingArgument,
}

/// Who is responsible for an error, for callers mapping errors onto a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Validation or business rule rejection; the request can be corrected.
    Client,
    /// Internal failure; the request itself was fine.
    Server,
}

impl LedgerError {
    /// Returns `true` when the conservation invariant may have been broken.
    ///
    /// Fatal errors are never retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LedgerError::CompensationFailed { .. })
    }

    /// Classifies the error as client- or server-side.
    pub fn class(&self) -> ErrorClass {
        match self {
            LedgerError::CompensationFailed { .. } | LedgerError::Io(_) => ErrorClass::Server,
            LedgerError::CreditFailed { source, .. } => match source.as_ref() {
                LedgerError::AccountNotFound { .. } => ErrorClass::Client,
                _ => ErrorClass::Server,
            },
            _ => ErrorClass::Client,
        }
    }
}

/// Failure reported by a notification sink.
///
/// Never escapes the transfer service; it is logged and dropped.
#[derive(Error, Debug)]
#[error("Notification to account {account_id} failed: {reason}")]
pub struct NotificationError {
    pub account_id: String,
    pub reason: String,
}
