//! Post-transfer notifications.

use crate::account::Account;
use crate::error::NotificationError;
use log::info;

/// Receives one event per transfer party after a transfer commits.
///
/// Delivery is fire-and-forget: the transfer service logs a returned error or
/// a panic and moves on. Nothing a sink does can undo or fail a transfer.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, account: &Account, message: &str) -> Result<(), NotificationError>;
}

/// Sink that writes each notification to the log at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, account: &Account, message: &str) -> Result<(), NotificationError> {
        info!(
            "Sending notification to owner of {}: {} (balance {})",
            account.id(),
            message,
            account.balance()
        );
        Ok(())
    }
}
