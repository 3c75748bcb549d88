//! CSV front end for the ledger.
//!
//! Reads `open` and `transfer` commands in order, executes each one through
//! the [`TransferService`], and writes the final ledger. Each row stands on
//! its own: a rejected row is logged and the next row proceeds.

use crate::command::{CommandRecord, LedgerCommand};
use crate::error::Result;
use crate::notification::LogNotifier;
use crate::store::InMemoryAccountStore;
use crate::transfer::TransferService;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{debug, warn};
use std::io::{Read, Write};
use std::sync::Arc;

/// Drives CSV commands against a ledger.
///
/// # Output Ordering
///
/// Final balances are output sorted by account id to ensure deterministic,
/// reproducible output.
pub struct LedgerEngine {
    service: TransferService,
}

impl LedgerEngine {
    /// Creates an engine over a fresh in-memory store that logs notifications.
    pub fn new() -> Self {
        Self::with_service(TransferService::new(
            Arc::new(InMemoryAccountStore::new()),
            Arc::new(LogNotifier),
        ))
    }

    pub fn with_service(service: TransferService) -> Self {
        LedgerEngine { service }
    }

    pub fn service(&self) -> &TransferService {
        &self.service
    }

    /// Processes commands from a CSV reader in streaming fashion.
    ///
    /// Invalid and rejected rows are logged at warn level and skipped. A fatal
    /// error stops processing and is returned.
    pub fn process_csv<R: Read>(&self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<CommandRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                    continue;
                }
            };

            match record.parse() {
                Ok(command) => {
                    if let Err(e) = self.process_command(command, row_num) {
                        if e.is_fatal() {
                            return Err(e);
                        }
                        warn!("Row {}: {}", row_num, e);
                    }
                }
                Err(e) => warn!("Row {}: {}", row_num, e),
            }
        }

        Ok(())
    }

    fn process_command(&self, command: LedgerCommand, row: usize) -> Result<()> {
        match command {
            LedgerCommand::Open(account) => {
                let id = account.id().clone();
                let balance = account.balance();
                self.service.create_account(account)?;
                debug!("Row {}: Opened account {} with {}", row, id, balance);
            }
            LedgerCommand::Transfer(request) => {
                let receipt = self.service.execute(&request)?;
                debug!(
                    "Row {}: Transferred {} from {} to {}",
                    row, request.amount, receipt.from.id(), receipt.to.id()
                );
            }
        }
        Ok(())
    }

    /// Writes final balances to CSV, sorted by account id.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        csv_writer.write_record(["account", "balance"])?;
        for account in self.service.store().accounts() {
            csv_writer.serialize(&account)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new()
    }
}
