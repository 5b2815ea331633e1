//! Integration tests for cardledger-core
//!
//! These tests drive the public API end to end. Invoices are written to
//! real temporary directories; a failing sink stands in for a broken disk.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tempfile::TempDir;

use cardledger_core::adapters::FileInvoiceSink;
use cardledger_core::domain::result::Result as LedgerResult;
use cardledger_core::domain::{Account, CreditCard, Customer, Invoice};
use cardledger_core::ports::InvoiceSink;
use cardledger_core::services::InvoiceService;
use cardledger_core::{Error, LedgerContext};

// ============================================================================
// Test Helpers
// ============================================================================

/// Amount in cents, e.g. 8950 = USD 89.50
fn usd(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn open_account() -> (Account, Customer) {
    let mut customer = Customer::new("987.654.321-00", "John", "Doe");
    let account = Account::open(1_234_567, &mut customer);
    (account, customer)
}

/// Card with a 5000.00 limit issued on 2024-03-01
fn visa_card() -> CreditCard {
    CreditCard::new_as_of(
        4532015112830366,
        "Visa",
        usd(5000_00),
        654321,
        NaiveDate::from_ymd_opt(2027, 11, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    )
    .unwrap()
}

/// Sink whose disk is always full
struct FailingSink;

impl InvoiceSink for FailingSink {
    fn write_invoice(&self, _filename: &str, _invoice: &Invoice) -> LedgerResult<PathBuf> {
        Err(io::Error::new(io::ErrorKind::Other, "No space left on device").into())
    }
}

// ============================================================================
// Account Tests
// ============================================================================

/// Balance 2500 with a 2000 credit limit: 3500 fits, a further 1200 does not
#[test]
fn test_withdrawal_into_overdraft_then_refused() {
    let (mut account, customer) = open_account();
    assert_eq!(customer.account(), Some(account.number()));

    account.deposit(usd(2500_00)).unwrap();
    assert_eq!(account.withdraw(usd(3500_00)).unwrap(), usd(-1000_00));

    match account.withdraw(usd(1200_00)) {
        Err(Error::InsufficientFunds {
            requested,
            available,
        }) => {
            assert_eq!(requested, usd(1200_00));
            assert_eq!(available, usd(1000_00));
        }
        other => panic!("expected insufficient funds, got {:?}", other),
    }
    assert_eq!(account.balance(), usd(-1000_00));
}

#[test]
fn test_deposit_and_withdraw_are_exact() {
    let (mut account, _) = open_account();
    let mut expected = Decimal::ZERO;

    for cents in [0, 1, 99, 2500_00, 123_456_78] {
        expected += usd(cents);
        assert_eq!(account.deposit(usd(cents)).unwrap(), expected);
    }
    for cents in [1, 99, 100_000_00] {
        expected -= usd(cents);
        assert_eq!(account.withdraw(usd(cents)).unwrap(), expected);
    }

    assert!(account.deposit(usd(-1)).unwrap_err().is_validation());
    assert!(account.withdraw(usd(-1)).unwrap_err().is_validation());
    assert_eq!(account.balance(), expected);
}

// ============================================================================
// Credit Card Tests
// ============================================================================

/// Limit 5000: 699 and 89.50 fit, a further 4500 does not
#[test]
fn test_card_purchases_until_limit() {
    let mut card = visa_card();

    card.add_purchase(usd(699_00), "Gold ring").unwrap();
    assert_eq!(card.add_purchase(usd(89_50), "Wine bottle").unwrap(), usd(788_50));

    let err = card.add_purchase(usd(4500_00), "Sofa").unwrap_err();
    assert!(err.is_insufficient_funds());
    assert_eq!(card.purchases().len(), 2);
    assert_eq!(card.balance(), usd(788_50));
}

#[test]
fn test_account_owns_its_cards() {
    let (mut account, _) = open_account();
    account.add_credit_card(visa_card());

    account
        .credit_card_mut(4532015112830366)
        .unwrap()
        .add_purchase(usd(10_00), "Coffee")
        .unwrap();

    assert_eq!(account.credit_cards().len(), 1);
    assert_eq!(account.credit_cards()[0].balance(), usd(10_00));
}

// ============================================================================
// Invoice Tests
// ============================================================================

#[test]
fn test_invoice_file_matches_rendering() {
    let temp_dir = TempDir::new().unwrap();
    let mut card = visa_card();
    card.add_purchase_at(usd(699_00), "Gold ring", at(4, 10)).unwrap();
    card.add_purchase_at(usd(89_50), "Wine bottle", at(5, 19)).unwrap();

    let invoice = card.invoice(at(9, 7));
    let sink = FileInvoiceSink::new(temp_dir.path());
    let path = sink.write_invoice("invoice.txt", &invoice).unwrap();

    let text = fs::read_to_string(path).unwrap();
    assert_eq!(text, invoice.render());
    assert!(text.contains("04/03/2024\t699.00\tGold ring\n05/03/2024\t89.50\tWine bottle\n"));
    assert!(text.contains("TOTAL AMOUNT: USD 788.50\n"));
    assert!(text.contains("Remaining limit: USD 4211.50\n"));
    assert!(text.ends_with("Invoice generated at 09/03/2024, 07:00\n"));
    assert_eq!(invoice.total(), card.balance());
}

#[test]
fn test_invoice_write_failure_is_surfaced() {
    let mut card = visa_card();
    card.add_purchase(usd(699_00), "Gold ring").unwrap();

    let err = card.create_invoice(&FailingSink, "invoice.txt").unwrap_err();
    assert!(err.is_io());
    assert!(err.to_string().contains("No space left on device"));

    // The card itself is untouched by the failed export
    assert_eq!(card.balance(), usd(699_00));
}

#[test]
fn test_invoice_service_writes_default_filename() {
    let temp_dir = TempDir::new().unwrap();
    let sink = FileInvoiceSink::new(temp_dir.path().join("out"));
    let service = InvoiceService::new(Box::new(sink));

    let path = service.export(&visa_card(), None).unwrap();

    assert_eq!(path, temp_dir.path().join("out").join("invoice_4532015112830366.txt"));
    let text = fs::read_to_string(path).unwrap();
    assert!(text.starts_with("INVOICE FOR: Visa 4532015112830366\n"));
}

// ============================================================================
// Context / Scenario Tests
// ============================================================================

#[test]
fn test_scenario_writes_invoice_into_ledger_dir() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("settings.json"),
        r#"{"invoices": {"directory": "statements"}, "scenario": {"seed": 3}}"#,
    )
    .unwrap();

    let ctx = LedgerContext::new(temp_dir.path()).unwrap();
    let report = ctx.scenario_service.run().unwrap();

    assert_eq!(report.seed, 3);
    let card = report.card().unwrap();
    let expected = temp_dir
        .path()
        .join("statements")
        .join(format!("invoice_{}.txt", card.number()));
    assert_eq!(report.invoice_path, Some(expected.clone()));

    let text = fs::read_to_string(expected).unwrap();
    assert!(!text.contains("Sightseeing tour pack"));
    assert!(text.contains("Hotel reservation"));
    assert!(text.contains("TOTAL AMOUNT: USD 4684.50"));
}

#[test]
fn test_scenario_reports_invoice_failure_without_aborting() {
    let temp_dir = TempDir::new().unwrap();
    // A file where the invoice directory should be makes every write fail
    fs::write(temp_dir.path().join("invoices"), "not a directory").unwrap();

    let ctx = LedgerContext::new(temp_dir.path()).unwrap();
    let report = ctx.scenario_service.run_with_seed(11).unwrap();

    let step = report.step("Print invoice").unwrap();
    assert!(!step.succeeded());
    assert_eq!(
        step.outcome.context.as_ref().unwrap()["kind"],
        serde_json::json!("io")
    );
    assert!(report.invoice_path.is_none());
}
