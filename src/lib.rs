//! # Funds Ledger
//!
//! An in-memory ledger of account balances that executes point-to-point
//! transfers under concurrent access without overdrafts and without losing or
//! duplicating funds.
//!
//! ## Design Principles
//!
//! - **Immutable snapshots**: every balance change produces a new [`Account`]
//! - **Per-account atomicity**: the store updates one entry at a time under that
//!   entry's lock, with no lock spanning two accounts
//! - **Compensated transfers**: a failed destination credit reverses the source debit
//! - **Non-negative by type**: [`Amount`] cannot hold a value below zero
//!
//! ## Example
//!
//! ```
//! use funds_ledger::{Account, AccountId, AccountStore, Amount, InMemoryAccountStore,
//!     LogNotifier, TransferService};
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryAccountStore::new());
//! for (id, balance) in [("A", 1000u32), ("B", 500u32)] {
//!     let account = Account::new(AccountId::new(id).unwrap(), Amount::from(balance));
//!     store.create_account(account).unwrap();
//! }
//!
//! let service = TransferService::new(store, Arc::new(LogNotifier));
//! service.transfer("A", "B", Amount::from(100u32)).unwrap();
//!
//! assert_eq!(service.get_account("A").unwrap().balance(), Amount::from(900u32));
//! assert_eq!(service.get_account("B").unwrap().balance(), Amount::from(600u32));
//! ```

pub mod account;
pub mod amount;
pub mod command;
pub mod engine;
pub mod error;
pub mod notification;
pub mod store;
pub mod transfer;

pub use account::{Account, AccountId};
pub use amount::Amount;
pub use command::{CommandRecord, LedgerCommand};
pub use engine::LedgerEngine;
pub use error::{ErrorClass, LedgerError, NotificationError, Result};
pub use notification::{LogNotifier, NotificationSink};
pub use store::{AccountStore, InMemoryAccountStore};
pub use transfer::{TransferReceipt, TransferRequest, TransferService};
