//! Credit card domain model

use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use super::result::{Error, Result};
use super::{Invoice, Purchase};
use crate::ports::InvoiceSink;

pub const PIN_MIN: u32 = 100_000;
pub const PIN_MAX: u32 = 999_999;

pub const CARD_NUMBER_MIN: u64 = 1_000_000_000_000_000;
pub const CARD_NUMBER_MAX: u64 = 9_999_999_999_999_999;

/// A credit card owned by an account
///
/// The balance is the accumulated spend. It only grows: there is no
/// payment operation, and every purchase must fit under the limit.
#[derive(Debug, Clone, Serialize)]
pub struct CreditCard {
    number: u64,
    brand: String,
    limit: Decimal,
    balance: Decimal,
    expiration_date: NaiveDate,
    #[serde(skip)]
    pin: u32,
    purchases: Vec<Purchase>,
}

impl CreditCard {
    /// Issue a card, checking the expiration date against today
    pub fn new(
        number: u64,
        brand: impl Into<String>,
        limit: Decimal,
        pin: u32,
        expiration_date: NaiveDate,
    ) -> Result<Self> {
        Self::new_as_of(
            number,
            brand,
            limit,
            pin,
            expiration_date,
            Local::now().date_naive(),
        )
    }

    /// Issue a card, checking the expiration date against `today`
    pub fn new_as_of(
        number: u64,
        brand: impl Into<String>,
        limit: Decimal,
        pin: u32,
        expiration_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self> {
        if expiration_date < today {
            return Err(Error::validation(
                "Credit card expiration date should not be in the past",
            ));
        }
        if !(CARD_NUMBER_MIN..=CARD_NUMBER_MAX).contains(&number) {
            return Err(Error::validation(
                "Credit card number must have exactly 16 digits",
            ));
        }

        let mut card = Self {
            number,
            brand: brand.into(),
            limit: Decimal::ZERO,
            balance: Decimal::ZERO,
            expiration_date,
            pin: PIN_MIN,
            purchases: Vec::new(),
        };
        card.set_limit(limit)?;
        card.set_pin(pin)?;
        Ok(card)
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn limit(&self) -> Decimal {
        self.limit
    }

    pub fn set_limit(&mut self, limit: Decimal) -> Result<()> {
        if limit < Decimal::ZERO {
            return Err(Error::validation(
                "Credit card limit should be a positive value",
            ));
        }
        self.limit = limit;
        Ok(())
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn remaining_limit(&self) -> Decimal {
        self.limit - self.balance
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }

    pub fn set_pin(&mut self, pin: u32) -> Result<()> {
        if !(PIN_MIN..=PIN_MAX).contains(&pin) {
            return Err(Error::validation("PIN code must have exactly six digits"));
        }
        self.pin = pin;
        Ok(())
    }

    pub fn expiration_date(&self) -> NaiveDate {
        self.expiration_date
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    /// Record a purchase made now; returns the new balance
    pub fn add_purchase(
        &mut self,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<Decimal> {
        self.add_purchase_at(amount, description, Local::now().naive_local())
    }

    /// Record a purchase made at `made_at`; returns the new balance
    pub fn add_purchase_at(
        &mut self,
        amount: Decimal,
        description: impl Into<String>,
        made_at: NaiveDateTime,
    ) -> Result<Decimal> {
        let purchase = Purchase::at(amount, description, made_at)?;

        // An overflowing total is over any limit
        let balance = match self.balance.checked_add(amount) {
            Some(balance) if balance <= self.limit => balance,
            _ => return Err(Error::insufficient_funds(amount, self.remaining_limit())),
        };

        self.balance = balance;
        tracing::info!(
            card = self.number,
            "CC {} | New purchase: USD {:.2} | Current balance: USD {:.2}",
            self.number,
            amount,
            self.balance
        );
        self.purchases.push(purchase);

        Ok(self.balance)
    }

    /// Snapshot the card for invoicing
    pub fn invoice(&self, generated_at: NaiveDateTime) -> Invoice {
        Invoice {
            brand: self.brand.clone(),
            card_number: self.number,
            purchases: self.purchases.clone(),
            balance: self.balance,
            limit: self.limit,
            generated_at,
        }
    }

    /// Render the invoice now and write it to `sink` under `filename`
    ///
    /// Write failures are returned as `Error::Io`.
    pub fn create_invoice(&self, sink: &dyn InvoiceSink, filename: &str) -> Result<PathBuf> {
        let invoice = self.invoice(Local::now().naive_local());
        match sink.write_invoice(filename, &invoice) {
            Ok(location) => {
                tracing::info!(
                    card = self.number,
                    "CC {} | Invoice generated in {}",
                    self.number,
                    location.display()
                );
                Ok(location)
            }
            Err(e) => {
                tracing::error!(
                    card = self.number,
                    "Error while exporting credit card invoice: {}",
                    e
                );
                Err(e)
            }
        }
    }
}
