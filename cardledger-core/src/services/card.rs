//! Card issuing - numbers, PINs and expiration dates for new cards

use anyhow::{anyhow, Result};
use chrono::{Local, Months, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;

use crate::config::Config;
use crate::domain::{CreditCard, CARD_NUMBER_MAX, CARD_NUMBER_MIN, PIN_MAX, PIN_MIN};

/// Issues cards with random numbers and PINs
#[derive(Debug, Clone)]
pub struct CardIssuer {
    brand: String,
    limit: Decimal,
    validity_years: u32,
}

impl CardIssuer {
    pub fn new(brand: impl Into<String>, limit: Decimal, validity_years: u32) -> Self {
        Self {
            brand: brand.into(),
            limit,
            validity_years,
        }
    }

    /// Issuer using the configured brand, limit and validity
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.card_brand.as_str(),
            config.card_limit,
            config.card_validity_years,
        )
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_limit(mut self, limit: Decimal) -> Self {
        self.limit = limit;
        self
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Issue a card today from the thread RNG
    pub fn issue_today(&self) -> Result<CreditCard> {
        self.issue(&mut rand::thread_rng(), Local::now().date_naive())
    }

    /// Issue a card on `today`; the number is drawn before the PIN
    pub fn issue<R: Rng>(&self, rng: &mut R, today: NaiveDate) -> Result<CreditCard> {
        let expiration = self
            .validity_years
            .checked_mul(12)
            .and_then(|months| today.checked_add_months(Months::new(months)))
            .ok_or_else(|| {
                anyhow!(
                    "Card validity of {} years is out of range",
                    self.validity_years
                )
            })?;
        let number = rng.gen_range(CARD_NUMBER_MIN..=CARD_NUMBER_MAX);
        let pin = rng.gen_range(PIN_MIN..=PIN_MAX);

        let card = CreditCard::new_as_of(
            number,
            self.brand.as_str(),
            self.limit,
            pin,
            expiration,
            today,
        )?;
        tracing::info!(
            "Credit card number {} created with a USD {:.2} limit",
            number,
            card.limit()
        );
        Ok(card)
    }
}
