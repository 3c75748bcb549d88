//! Funds Ledger CLI
//!
//! Reads a CSV of account openings and transfers, applies them in order, and
//! prints the final balances.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- commands.csv > balances.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug`, `info` or `warn` to control logging verbosity
//!
//! # Exit Codes
//!
//! - `0`: all rows processed (rejected rows are logged, not fatal)
//! - `1`: the input could not be read
//! - `2`: a reversed debit could not be restored; balances are inconsistent

use funds_ledger::{LedgerEngine, LedgerError, Result};
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        report(&e);
        process::exit(exit_code(&e));
    }
}

fn exit_code(e: &LedgerError) -> i32 {
    if e.is_fatal() {
        2
    } else {
        1
    }
}

fn report(e: &LedgerError) {
    if !e.is_fatal() {
        eprintln!("Error: {}", e);
        return;
    }
    eprintln!("Fatal: {}", e);
    let mut cause = e.source();
    while let Some(inner) = cause {
        eprintln!("  caused by: {}", inner);
        cause = inner.source();
    }
    eprintln!("Processing aborted; balances must be reconciled before reuse");
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(LedgerError::MissingArgument);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let engine = LedgerEngine::new();
    engine.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    engine.write_output(handle)?;

    Ok(())
}
