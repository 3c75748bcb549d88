//! Edge case tests for the CSV front end of the ledger.

use std::io::Cursor;

fn run_csv(csv: &str) -> String {
    use funds_ledger::LedgerEngine;

    let engine = LedgerEngine::new();
    engine.process_csv(Cursor::new(csv)).unwrap();

    let mut output = Vec::new();
    engine.write_output(&mut output).unwrap();
    String::from_utf8(output).unwrap()
}

fn get_balance(output: &str, account: &str) -> Option<String> {
    output
        .lines()
        .skip(1) // Skip header
        .find(|line| line.split(',').next() == Some(account))
        .and_then(|line| line.split(',').nth(1))
        .map(|s| s.to_string())
}

// ==================== OPEN EDGE CASES ====================

#[test]
fn test_open_with_zero_balance() {
    let csv = "type,account,to,amount
open,A,,0";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "0");
}

#[test]
fn test_open_negative_balance_rejected() {
    let csv = "type,account,to,amount
open,A,,-10
open,B,,10";

    let output = run_csv(csv);
    assert!(get_balance(&output, "A").is_none());
    assert_eq!(get_balance(&output, "B").unwrap(), "10");
}

#[test]
fn test_open_without_amount_rejected() {
    let csv = "type,account,to,amount
open,A,,";

    let output = run_csv(csv);
    assert!(get_balance(&output, "A").is_none());
}

#[test]
fn test_open_duplicate_keeps_original_balance() {
    let csv = "type,account,to,amount
open,A,,1000
open,A,,0
open,A,,99999";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "1000");
    assert_eq!(output.lines().count(), 2);
}

#[test]
fn test_open_precision_preserved() {
    let csv = "type,account,to,amount
open,A,,0.123456789";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "0.123456789");
}

// ==================== TRANSFER EDGE CASES ====================

#[test]
fn test_transfer_exact_balance_rejected() {
    let csv = "type,account,to,amount
open,A,,100
open,B,,0
transfer,A,B,100";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "100");
    assert_eq!(get_balance(&output, "B").unwrap(), "0");
}

#[test]
fn test_transfer_just_below_balance_succeeds() {
    let csv = "type,account,to,amount
open,A,,100
open,B,,0
transfer,A,B,99.9999";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "0.0001");
    assert_eq!(get_balance(&output, "B").unwrap(), "99.9999");
}

#[test]
fn test_transfer_zero_amount() {
    let csv = "type,account,to,amount
open,A,,100
open,B,,5
transfer,A,B,0";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "100");
    assert_eq!(get_balance(&output, "B").unwrap(), "5");
}

#[test]
fn test_transfer_negative_amount_rejected() {
    let csv = "type,account,to,amount
open,A,,100
open,B,,5
transfer,A,B,-50";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "100");
    assert_eq!(get_balance(&output, "B").unwrap(), "5");
}

#[test]
fn test_transfer_from_unknown_account() {
    let csv = "type,account,to,amount
open,B,,5
transfer,A,B,1";

    let output = run_csv(csv);
    assert!(get_balance(&output, "A").is_none());
    assert_eq!(get_balance(&output, "B").unwrap(), "5");
}

#[test]
fn test_transfer_to_unknown_account_restores_source() {
    let csv = "type,account,to,amount
open,A,,1000
transfer,A,Z,250";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "1000");
    assert!(get_balance(&output, "Z").is_none());
}

#[test]
fn test_transfer_to_same_account() {
    let csv = "type,account,to,amount
open,A,,1000
transfer,A,A,10";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "1000");
}

#[test]
fn test_transfer_missing_destination_column() {
    let csv = "type,account,to,amount
open,A,,1000
open,B,,0
transfer,A,,10";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "1000");
    assert_eq!(get_balance(&output, "B").unwrap(), "0");
}

#[test]
fn test_transfer_before_open_then_after() {
    let csv = "type,account,to,amount
transfer,A,B,10
open,A,,100
open,B,,0
transfer,A,B,10";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "90");
    assert_eq!(get_balance(&output, "B").unwrap(), "10");
}

#[test]
fn test_chain_of_transfers() {
    let csv = "type,account,to,amount
open,A,,100
open,B,,100
open,C,,100
transfer,A,B,50
transfer,B,C,120
transfer,C,A,200";

    let output = run_csv(csv);
    // A: 100 - 50 + 200, B: 100 + 50 - 120, C: 100 + 120 - 200
    assert_eq!(get_balance(&output, "A").unwrap(), "250");
    assert_eq!(get_balance(&output, "B").unwrap(), "30");
    assert_eq!(get_balance(&output, "C").unwrap(), "20");
}

// ==================== CSV FORMAT EDGE CASES ====================

#[test]
fn test_empty_csv_with_header() {
    let csv = "type,account,to,amount\n";

    let output = run_csv(csv);
    assert_eq!(output.lines().count(), 1);
    assert!(output.contains("account,balance"));
}

#[test]
fn test_csv_with_extra_whitespace() {
    let csv = "type,  account,   to,    amount\n  open  ,  A  ,  ,   100.0  \n";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "100");
}

#[test]
fn test_csv_with_mixed_case_type() {
    let csv = "type,account,to,amount
OPEN,A,,100
Open,B,,0
TRANSFER,A,B,30";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "70");
    assert_eq!(get_balance(&output, "B").unwrap(), "30");
}

#[test]
fn test_csv_with_unknown_type() {
    let csv = "type,account,to,amount
close,A,,
open,A,,1";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "1");
}

#[test]
fn test_csv_with_invalid_amount() {
    let csv = "type,account,to,amount
open,A,,abc
open,A,,100
open,B,,0
transfer,A,B,xyz";

    let output = run_csv(csv);
    assert_eq!(get_balance(&output, "A").unwrap(), "100");
    assert_eq!(get_balance(&output, "B").unwrap(), "0");
}

// ==================== OUTPUT FORMAT VERIFICATION ====================

#[test]
fn test_output_sorted_by_account_id() {
    let csv = "type,account,to,amount
open,E,,5
open,A,,1
open,C,,3
open,B,,2
open,D,,4";

    let output = run_csv(csv);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "account,balance");
    assert!(lines[1].starts_with("A,"));
    assert!(lines[2].starts_with("B,"));
    assert!(lines[3].starts_with("C,"));
    assert!(lines[4].starts_with("D,"));
    assert!(lines[5].starts_with("E,"));
}

#[test]
fn test_total_conserved_across_many_rows() {
    let mut csv = String::from("type,account,to,amount\n");
    for i in 0..20 {
        csv.push_str(&format!("open,acc-{:02},,100\n", i));
    }
    for i in 0..200 {
        csv.push_str(&format!(
            "transfer,acc-{:02},acc-{:02},{}\n",
            i % 20,
            (i * 7 + 3) % 20,
            i % 150
        ));
    }

    let output = run_csv(&csv);
    let total: f64 = output
        .lines()
        .skip(1)
        .map(|line| line.split(',').nth(1).unwrap().parse::<f64>().unwrap())
        .sum();

    assert_eq!(output.lines().count(), 21);
    assert_eq!(total, 2000.0);
}
