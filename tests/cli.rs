//! E2E tests for the bookkeeping and tax commands

use std::process::{Command, Output};

fn booktax(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test that the trial balance of a well-formed ledger balances
#[test]
fn trial_balance_table() {
    let output = booktax(&["trial-balance", "tests/data/books.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("TRIAL BALANCE"));
    assert!(stdout.contains("Owner's Capital"));
    assert!(stdout.contains("£86800.00"));
    assert!(stdout.contains("Balanced"));
}

/// Test CSV export with a totals row
#[test]
fn trial_balance_csv() {
    let output = booktax(&["trial-balance", "tests/data/books.json", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.starts_with("account_code,account_name,debit,credit"));
    assert!(stdout.contains("1000,Cash,47250.00,"));
    assert!(stdout.contains("TOTAL,,86800.00,86800.00"));
}

/// Opening balances without closing entries leave the book unbalanced
#[test]
fn trial_balance_reports_imbalance() {
    let output = booktax(&["trial-balance", "tests/data/opening_balances.json", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(report["is_balanced"], false);
    assert_eq!(report["total_debits"], "119200");
    assert_eq!(report["total_credits"], "186800");
}

/// The message names the larger side and shows the gap unsigned
#[test]
fn trial_balance_table_names_larger_side() {
    let output = booktax(&["trial-balance", "tests/data/opening_balances.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("NOT BALANCED: credits exceed debits by £67600.00"));
    assert!(!stdout.contains("-£"));
}

/// Entries imported from CSV are posted after the ledger file's entries
#[test]
fn trial_balance_with_csv_entries() {
    let output = booktax(&[
        "trial-balance",
        "tests/data/books.json",
        "--entries",
        "tests/data/entries.csv",
        "--csv",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("1000,Cash,52250.00,"));
    assert!(stdout.contains("TOTAL,,81800.00,81800.00"));
}

/// Test filtering accounts by type
#[test]
fn accounts_filter_by_type() {
    let output = booktax(&["accounts", "tests/data/books.json", "--account-type", "expense"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Cost of Goods Sold"));
    assert!(stdout.contains("Operating Expenses"));
    assert!(!stdout.contains("Sales Revenue"));
}

/// Rejected entries are listed and the command exits with code 1
#[test]
fn validate_reports_rejections() {
    let output = booktax(&["validate", "tests/data/rejected.json", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    let result: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(result["issue_count"], 2);
    assert_eq!(result["issues"][0]["row"], 2);
    assert_eq!(result["issues"][0]["type"], "ImbalancedEntry");
    assert_eq!(result["issues"][1]["type"], "NotFound");
    assert_eq!(result["balanced"], true);
}

#[test]
fn validate_clean_ledger() {
    let output = booktax(&["validate", "tests/data/books.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("All entries accepted"));
}

#[test]
fn income_tax_summary() {
    let output = booktax(&["income-tax", "--income", "64730"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Income Tax: £18352.00"));
    assert!(stdout.contains("Class 4 NI: £3682.20"));
    assert!(stdout.contains("TOTAL: £22034"));
}

#[test]
fn income_tax_with_rates_file() {
    let output = booktax(&[
        "income-tax",
        "--income",
        "64730",
        "--rates",
        "tests/data/rates.json",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"national_insurance\": \"2551.20\""));
}

#[test]
fn negative_income_fails() {
    let output = booktax(&["income-tax", "--income", "-100"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("taxable_income must not be negative"));
}

#[test]
fn corporation_tax_marginal_relief() {
    let output = booktax(&["corporation-tax", "--profit", "100000"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Rate: 25%"));
    assert!(stdout.contains("Marginal relief: £2250.00"));
    assert!(stdout.contains("Tax: £22750.00"));
}

#[test]
fn payments_on_account() {
    let output = booktax(&["payments", "--due", "22035", "--year", "2025"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("PAYMENTS ON ACCOUNT (2024/25)"));
    assert!(stdout.contains("First payment: £11018.00 due 31 January 2025"));
    assert!(stdout.contains("Second payment: £11018.00 due 31 July 2025"));
}

#[test]
fn schema_csv_header() {
    let output = booktax(&["schema", "csv-header"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        stdout.trim(),
        "date,description,reference,debit_account,credit_account,debit_amount,credit_amount,status"
    );
}
