//! Scenario service - the banking walkthrough
//!
//! Replays a fixed story against the domain model: John Doe opens an
//! account, deposits his salary, orders a card, withdraws cash and falls
//! back to the card when the account runs dry, books a trip and prints the
//! invoice when the card limit is hit. Every operation is recorded as a
//! step so callers can show what happened and why.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{CardIssuer, InvoiceService};
use crate::config::Config;
use crate::domain::result::{Error, OperationResult};
use crate::domain::{Account, CreditCard, Customer, PIN_MAX, PIN_MIN};

const CUSTOMER_CPF: &str = "987.654.321-00";

/// Salary deposited on day one (cents)
const SALARY: i64 = 2_500_00;

/// Cash withdrawals: rent and groceries, then money for the gifts (cents)
const WITHDRAWALS: [(i64, &str); 2] = [
    (3_500_00, "Withdraw rent and groceries"),
    (1_200_00, "Withdraw gift money"),
];

/// Paid by card when the gift money cannot be withdrawn (cents)
const GIFTS: [(i64, &str); 2] = [(699_00, "Gold ring"), (89_50, "Wine bottle")];

/// Weekend getaway booked by card (cents)
const TRIP: [(i64, &str); 3] = [
    (1_497_00, "Air tickets"),
    (2_399_00, "Hotel reservation"),
    (359_00, "Sightseeing tour pack"),
];

fn cents(amount: i64) -> Decimal {
    Decimal::new(amount, 2)
}

/// One recorded operation of a scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioStep {
    pub action: String,
    pub outcome: OperationResult<String>,
}

impl ScenarioStep {
    fn record<T>(
        action: impl Into<String>,
        result: &std::result::Result<T, Error>,
        describe: impl FnOnce(&T) -> String,
    ) -> Self {
        let outcome = match result {
            Ok(value) => OperationResult::ok(describe(value)),
            Err(e) => OperationResult::from_error(e),
        };
        Self {
            action: action.into(),
            outcome,
        }
    }

    /// Record an operation that returns a balance
    fn balance(action: impl Into<String>, result: &std::result::Result<Decimal, Error>) -> Self {
        Self::record(action, result, |balance| format!("{:.2}", balance))
    }

    pub fn succeeded(&self) -> bool {
        self.outcome.success
    }
}

/// Everything a scenario run produced
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    /// Seed that reproduces this run
    pub seed: u64,
    pub customer: Customer,
    pub account: Account,
    pub steps: Vec<ScenarioStep>,
    /// Where the invoice was written, if one was printed
    pub invoice_path: Option<PathBuf>,
}

impl ScenarioReport {
    /// The card used throughout the story
    pub fn card(&self) -> Option<&CreditCard> {
        self.account.credit_cards().first()
    }

    pub fn step(&self, action: &str) -> Option<&ScenarioStep> {
        self.steps.iter().find(|s| s.action == action)
    }

    pub fn failed_steps(&self) -> usize {
        self.steps.iter().filter(|s| !s.succeeded()).count()
    }
}

/// Scenario service driving the walkthrough
pub struct ScenarioService {
    config: Config,
    invoices: InvoiceService,
}

impl ScenarioService {
    pub fn new(config: Config, invoices: InvoiceService) -> Self {
        Self { config, invoices }
    }

    /// Run with the configured seed, or a fresh one
    pub fn run(&self) -> Result<ScenarioReport> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        self.run_with_seed(seed)
    }

    pub fn run_with_seed(&self, seed: u64) -> Result<ScenarioReport> {
        self.run_as_of(seed, Local::now().date_naive())
    }

    /// Run the walkthrough with `today` as the card issue date
    pub fn run_as_of(&self, seed: u64, today: NaiveDate) -> Result<ScenarioReport> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut steps = Vec::new();
        let mut invoice_path = None;

        // John Doe started a new job and opens an account
        let mut customer = Customer::new(CUSTOMER_CPF, "John", "Doe");
        let mut account = Account::open(rng.gen_range(1_000_000..=9_999_999), &mut customer);
        account
            .set_credit_limit(self.config.credit_limit)
            .context("Invalid credit limit in settings")?;
        tracing::info!("{}", customer);
        tracing::info!("{}", account);

        let deposit = account.deposit(cents(SALARY));
        steps.push(ScenarioStep::balance("Deposit salary", &deposit));
        deposit?;

        // Order a card if the account does not come with one
        let card_number = match account.credit_cards().first() {
            Some(card) => card.number(),
            None => {
                let card = CardIssuer::from_config(&self.config).issue(&mut rng, today)?;
                let number = card.number();
                steps.push(ScenarioStep::record(
                    format!("Issue {} card", card.brand()),
                    &Ok(number),
                    |n| n.to_string(),
                ));
                account.add_credit_card(card);
                number
            }
        };

        // A four-digit PIN is rejected; fall back to a valid one
        {
            let card = Self::card_mut(&mut account, card_number)?;
            let result = card.set_pin(rng.gen_range(1000..10000));
            steps.push(ScenarioStep::record("Set 4-digit PIN", &result, |_| {
                "PIN set".to_string()
            }));
            match result {
                Ok(()) => {}
                Err(e) if e.is_validation() => {
                    let result = card.set_pin(rng.gen_range(PIN_MIN..=PIN_MAX));
                    steps.push(ScenarioStep::record("Set 6-digit PIN", &result, |_| {
                        "PIN set".to_string()
                    }));
                    result?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        // Cash for rent, groceries and the anniversary gifts
        let mut withdrawal_refused = false;
        for (amount, action) in WITHDRAWALS {
            let result = account.withdraw(cents(amount));
            steps.push(ScenarioStep::balance(action, &result));
            match result {
                Ok(_) => {}
                Err(e) if e.is_insufficient_funds() => {
                    withdrawal_refused = true;
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        if withdrawal_refused {
            tracing::warn!("Withdrawal refused, paying the gifts by credit card");
            let card = Self::card_mut(&mut account, card_number)?;
            match Self::purchase_all(card, &GIFTS, &mut steps) {
                Ok(()) => {}
                Err(e) if e.is_insufficient_funds() => {
                    tracing::warn!("Anniversary gifts can not be purchased: {}", e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        // The weekend getaway; print the invoice if the card runs out
        let card = Self::card_mut(&mut account, card_number)?;
        match Self::purchase_all(card, &TRIP, &mut steps) {
            Ok(()) => {}
            Err(e) if e.is_insufficient_funds() => {
                tracing::warn!("Trip could not be fully booked: {}", e);
                let result = self.invoices.export(card, None);
                steps.push(ScenarioStep::record("Print invoice", &result, |path| {
                    path.display().to_string()
                }));
                invoice_path = result.ok();
            }
            Err(e) => return Err(e.into()),
        }

        Ok(ScenarioReport {
            seed,
            customer,
            account,
            steps,
            invoice_path,
        })
    }

    fn card_mut(account: &mut Account, number: u64) -> Result<&mut CreditCard> {
        account
            .credit_card_mut(number)
            .ok_or_else(|| anyhow!("Credit card {} not found on account", number))
    }

    /// Buy each item in order, stopping at the first failure
    fn purchase_all(
        card: &mut CreditCard,
        items: &[(i64, &str)],
        steps: &mut Vec<ScenarioStep>,
    ) -> std::result::Result<(), Error> {
        for (amount, description) in items {
            let result = card.add_purchase(cents(*amount), *description);
            steps.push(ScenarioStep::balance(format!("Buy {}", description), &result));
            result?;
        }
        Ok(())
    }
}
